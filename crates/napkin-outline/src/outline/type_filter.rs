//! Checkable per-kind filter buttons.

use napkin_outline_core::logging::targets;
use napkin_outline_core::{ObjectKind, Signal};

/// One checkable button of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeButton {
    /// The kind this button enables.
    pub kind: ObjectKind,
    /// Whether the button is checked.
    pub checked: bool,
}

/// A row of checkable buttons, one per object kind.
///
/// The checked kinds form the type filter of the outline. With no button
/// checked, every kind is shown.
///
/// # Signals
///
/// - `filter_changed(Vec<ObjectKind>)`: Emitted with the checked kinds when
///   the user toggles a button
pub struct TypeFilterBar {
    buttons: Vec<TypeButton>,

    /// Emitted when a user toggle changed the checked kinds.
    pub filter_changed: Signal<Vec<ObjectKind>>,
}

impl Default for TypeFilterBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeFilterBar {
    /// Creates a bar without buttons.
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            filter_changed: Signal::new(),
        }
    }

    /// Replaces the buttons with one unchecked button per kind.
    pub fn set_types(&mut self, kinds: impl IntoIterator<Item = ObjectKind>) {
        self.buttons.clear();
        for kind in kinds {
            if !self.buttons.iter().any(|b| b.kind == kind) {
                self.buttons.push(TypeButton {
                    kind,
                    checked: false,
                });
            }
        }
    }

    /// Returns the buttons in display order.
    pub fn buttons(&self) -> &[TypeButton] {
        &self.buttons
    }

    /// Returns the kinds that have a button, in display order.
    pub fn types(&self) -> Vec<ObjectKind> {
        self.buttons.iter().map(|b| b.kind).collect()
    }

    /// Returns the tooltip of the button for `kind`.
    pub fn tooltip(kind: ObjectKind) -> String {
        format!("Show instances of {kind}")
    }

    /// Returns `true` if the button for `kind` is checked.
    pub fn is_checked(&self, kind: ObjectKind) -> bool {
        self.buttons.iter().any(|b| b.kind == kind && b.checked)
    }

    /// Returns the checked kinds, in display order.
    pub fn enabled_types(&self) -> Vec<ObjectKind> {
        self.buttons
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.kind)
            .collect()
    }

    /// Checks exactly the buttons whose kind is in `kinds`.
    ///
    /// This is a programmatic update and does not emit `filter_changed`.
    pub fn set_types_enabled(&mut self, kinds: &[ObjectKind]) {
        for button in &mut self.buttons {
            button.checked = kinds.contains(&button.kind);
        }
    }

    /// Checks or unchecks the button for `kind`, as a user click would.
    ///
    /// Emits `filter_changed` if the state changed. Kinds without a button
    /// are ignored.
    pub fn set_checked(&mut self, kind: ObjectKind, checked: bool) {
        let Some(button) = self.buttons.iter_mut().find(|b| b.kind == kind) else {
            return;
        };
        if button.checked == checked {
            return;
        }
        button.checked = checked;

        let enabled = self.enabled_types();
        tracing::debug!(target: targets::PANEL, %kind, checked, ?enabled, "type button toggled");
        self.filter_changed.emit(enabled);
    }

    /// Flips the button for `kind`.
    pub fn toggle(&mut self, kind: ObjectKind) {
        let checked = self.is_checked(kind);
        self.set_checked(kind, !checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn bar() -> TypeFilterBar {
        let mut bar = TypeFilterBar::new();
        bar.set_types([ObjectKind::Entity, ObjectKind::Component, ObjectKind::Attribute]);
        bar
    }

    #[test]
    fn test_set_types() {
        let bar = bar();
        assert_eq!(bar.buttons().len(), 3);
        assert!(bar.enabled_types().is_empty());
        assert!(!bar.types().contains(&ObjectKind::Resource));
    }

    #[test]
    fn test_tooltip() {
        assert_eq!(
            TypeFilterBar::tooltip(ObjectKind::Component),
            "Show instances of Component"
        );
    }

    #[test]
    fn test_toggle_emits_enabled_types() {
        let mut bar = bar();
        let received = Arc::new(Mutex::new(Vec::new()));
        let r = received.clone();
        bar.filter_changed.connect(move |kinds| r.lock().push(kinds.clone()));

        bar.toggle(ObjectKind::Attribute);
        bar.toggle(ObjectKind::Entity);
        bar.toggle(ObjectKind::Attribute);

        assert_eq!(
            *received.lock(),
            vec![
                vec![ObjectKind::Attribute],
                vec![ObjectKind::Entity, ObjectKind::Attribute],
                vec![ObjectKind::Entity],
            ]
        );
    }

    #[test]
    fn test_set_checked_without_change_is_silent() {
        let mut bar = bar();
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        bar.filter_changed.connect(move |_| *c.lock() += 1);

        bar.set_checked(ObjectKind::Entity, false);
        bar.set_checked(ObjectKind::Resource, true);
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_set_types_enabled() {
        let mut bar = bar();
        bar.set_types_enabled(&[ObjectKind::Component, ObjectKind::Resource]);
        assert_eq!(bar.enabled_types(), vec![ObjectKind::Component]);

        bar.set_types_enabled(&[]);
        assert!(bar.enabled_types().is_empty());
    }
}
