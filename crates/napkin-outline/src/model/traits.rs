//! Core traits for the outline's model/view layer.
//!
//! [`ItemModel`] is the read interface every model exposes to views.
//! [`SourceTree`] adds what the leaf filter needs from the model it wraps:
//! whether the root row is shown, and which document object each row shows.

use napkin_outline_core::{ObjectId, ObjectKind, Signal};

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};

/// Header orientation for `header_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Column headers.
    Horizontal,
    /// Row headers.
    Vertical,
}

/// The read interface of a hierarchical item model.
///
/// At minimum, implement [`row_count`](ItemModel::row_count),
/// [`column_count`](ItemModel::column_count), [`data`](ItemModel::data),
/// [`index`](ItemModel::index), [`parent`](ItemModel::parent) and
/// [`signals`](ItemModel::signals).
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows under the given parent.
    ///
    /// The invalid index stands for the invisible parent of top-level rows.
    fn row_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the number of columns for children of the given parent.
    fn column_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the data stored under the given role for the item at index.
    ///
    /// Returns `ItemData::None` for invalid indices and unsupported roles.
    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData;

    /// Creates a model index for the given row and column under parent.
    ///
    /// Returns `ModelIndex::invalid()` if the position is out of bounds.
    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex;

    /// Returns the parent of the given index.
    fn parent(&self, index: &ModelIndex) -> ModelIndex;

    /// Returns the signals for this model.
    fn signals(&self) -> &ModelSignals;

    /// Returns `true` if the item at parent has any children.
    fn has_children(&self, parent: &ModelIndex) -> bool {
        self.row_count(parent) > 0
    }

    /// Returns header data for the given section.
    fn header_data(&self, _section: usize, _orientation: Orientation, _role: ItemRole) -> ItemData {
        ItemData::None
    }

    /// Returns the display text for an item (convenience for `data(index, Display)`).
    fn display_text(&self, index: &ModelIndex) -> Option<String> {
        self.data(index, ItemRole::Display).into_string()
    }
}

/// A tree model that a leaf filter can project.
pub trait SourceTree: ItemModel {
    /// Returns `false` when the host hides the root row and shows its
    /// children at the top level instead.
    fn is_root_visible(&self) -> bool;

    /// Returns the document object shown in the row of `index`.
    ///
    /// Returns `None` for the invalid index and for stale rows.
    fn object(&self, index: &ModelIndex) -> Option<ObjectId>;

    /// Returns the kind of the object shown in the row of `index`.
    fn object_kind(&self, index: &ModelIndex) -> Option<ObjectKind>;
}

/// Signals emitted by item models.
///
/// Views connect to these to stay synchronized with the model.
pub struct ModelSignals {
    /// Emitted before the set of visible rows changes (e.g. a new filter).
    pub layout_about_to_change: Signal<()>,

    /// Emitted after the set of visible rows changed.
    pub layout_changed: Signal<()>,

    /// Emitted before the model is reset.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            layout_about_to_change: Signal::new(),
            layout_changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about_to_reset and reset signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }

    /// Emits signals for a layout change.
    ///
    /// Calls the provided function between the about_to_change and changed signals.
    pub fn emit_layout_changed<F>(&self, change_fn: F)
    where
        F: FnOnce(),
    {
        self.layout_about_to_change.emit(());
        change_fn();
        self.layout_changed.emit(());
    }
}
