//! The outline panel: filter controls, a filtered tree and a selection.
//!
//! `OutlinePanel` is the toolkit-free state behind an outline widget. A UI
//! draws [`OutlinePanel::visible_rows`] and forwards user input to the
//! panel's methods; the panel keeps the model, the leaf filter, the type
//! filter bar, the expansion state and the selection consistent.

use std::sync::Arc;

use napkin_outline_core::logging::targets;
use napkin_outline_core::{ConnectionId, ObjectId, ObjectKind, PerfSpan, Signal};

use super::expansion::ExpansionState;
use super::type_filter::TypeFilterBar;
use crate::config::OutlineConfig;
use crate::document::Document;
use crate::model::{ItemModel, LeafFilterProxyModel, ModelIndex, OutlineModel, SourceTree};

/// A row as the panel displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Index into the filtered model.
    pub index: ModelIndex,
    /// Indentation level; the first displayed level is 0.
    pub depth: usize,
    /// Whether the row has visible children.
    pub has_children: bool,
    /// Whether the row is expanded.
    pub is_expanded: bool,
    /// Whether the row is the last displayed child of its parent.
    pub is_last_child: bool,
}

/// State of an outline panel over one document.
///
/// The panel is disabled until a root is set.
///
/// # Signals
///
/// - `selection_changed(Option<ObjectId>)`: Emitted with the first selected
///   object when the selection changes, if selection propagation is on
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use napkin_outline::document::Document;
/// use napkin_outline::outline::OutlinePanel;
///
/// let doc = Arc::new(Document::new());
/// let root = doc.add_entity(None, "Root").unwrap();
/// let lamp = doc.add_entity(Some(root), "Lamp").unwrap();
/// doc.add_component(lamp, "Light").unwrap();
///
/// let mut panel = OutlinePanel::new(doc);
/// panel.set_root(Some(root));
/// panel.set_filter_text("light");
/// panel.expand_all();
///
/// let depths: Vec<_> = panel.visible_rows().iter().map(|r| r.depth).collect();
/// assert_eq!(depths, vec![0, 1, 2]);
/// ```
pub struct OutlinePanel {
    model: Arc<OutlineModel>,
    proxy: Arc<LeafFilterProxyModel<OutlineModel>>,
    type_bar: TypeFilterBar,
    expansion: ExpansionState,
    selection: Vec<ObjectId>,
    filter_text: String,
    case_sensitive: bool,
    propagate_selection: bool,
    enabled: bool,
    reset_connection: ConnectionId,

    /// Emitted with the first selected object, if selection propagation is on.
    pub selection_changed: Signal<Option<ObjectId>>,
}

impl OutlinePanel {
    /// Creates a disabled panel over `document` with the default configuration.
    pub fn new(document: Arc<Document>) -> Self {
        let model = Arc::new(OutlineModel::new(document));
        model.connect_document();
        let proxy = Arc::new(LeafFilterProxyModel::new(model.clone()));

        let weak_proxy = Arc::downgrade(&proxy);
        let reset_connection = model.signals().model_reset.connect(move |_| {
            if let Some(proxy) = weak_proxy.upgrade() {
                proxy.invalidate();
            }
        });

        let mut type_bar = TypeFilterBar::new();
        let bar_proxy = proxy.clone();
        type_bar
            .filter_changed
            .connect(move |kinds| bar_proxy.set_type_filter(kinds.iter().copied()));

        let mut panel = Self {
            model,
            proxy,
            type_bar,
            expansion: ExpansionState::new(),
            selection: Vec::new(),
            filter_text: String::new(),
            case_sensitive: false,
            propagate_selection: false,
            enabled: false,
            reset_connection,
            selection_changed: Signal::new(),
        };
        panel.apply_config(&OutlineConfig::default());
        panel
    }

    /// Applies a configuration while building the panel.
    pub fn with_config(mut self, config: &OutlineConfig) -> Self {
        self.apply_config(config);
        self
    }

    /// Applies a configuration to this panel.
    pub fn apply_config(&mut self, config: &OutlineConfig) {
        self.type_bar.set_types(config.type_buttons.iter().copied());
        self.model.set_root_visible(config.root_visible);
        self.case_sensitive = config.case_sensitive;
        self.proxy.set_filter_key_column(config.filter_key_column);
        self.proxy
            .set_text_filter(self.filter_text.clone(), self.case_sensitive);
        self.set_filter_types(&config.enabled_types);
        match config.sort_column {
            Some(column) => self.proxy.sort_by_column(column, config.sort_descending),
            None => self.proxy.clear_sort(),
        }
        self.propagate_selection = config.propagate_selection;
    }

    /// Returns the unfiltered model.
    pub fn model(&self) -> &Arc<OutlineModel> {
        &self.model
    }

    /// Returns the filtered model the panel displays.
    pub fn proxy(&self) -> &Arc<LeafFilterProxyModel<OutlineModel>> {
        &self.proxy
    }

    /// Returns the type filter bar.
    pub fn type_filter_bar(&self) -> &TypeFilterBar {
        &self.type_bar
    }

    /// Returns the expansion state.
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Returns `true` once a root is set.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // =========================================================================
    // Root
    // =========================================================================

    /// Shows the subtree rooted at `root`, or nothing for `None`.
    ///
    /// Clears the selection and the expansion state.
    pub fn set_root(&mut self, root: Option<ObjectId>) {
        self.enabled = root.is_some();
        self.expansion.collapse_all();
        self.model.set_root(root);
        tracing::debug!(target: targets::PANEL, ?root, enabled = self.enabled, "panel root set");
        self.set_selection(Vec::new());
    }

    /// Returns the object shown as the root.
    pub fn root(&self) -> Option<ObjectId> {
        self.model.root()
    }

    /// Sets whether the root row itself is shown.
    pub fn set_root_visible(&mut self, visible: bool) {
        self.model.set_root_visible(visible);
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Checks exactly the given kinds in the type filter bar and filters by them.
    pub fn set_filter_types(&mut self, kinds: &[ObjectKind]) {
        self.type_bar.set_types_enabled(kinds);
        self.proxy.set_type_filter(self.type_bar.enabled_types());
    }

    /// Flips one button of the type filter bar, as a click would.
    pub fn toggle_type(&mut self, kind: ObjectKind) {
        self.type_bar.toggle(kind);
    }

    /// Sets the text filter pattern.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.proxy
            .set_text_filter(self.filter_text.clone(), self.case_sensitive);
    }

    /// Returns the text filter pattern.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Sets whether the text filter distinguishes case.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
        self.proxy
            .set_text_filter(self.filter_text.clone(), self.case_sensitive);
    }

    /// Sorts sibling rows by the display text of `column`.
    pub fn sort_by_column(&mut self, column: usize, descending: bool) {
        self.proxy.sort_by_column(column, descending);
    }

    /// Shows sibling rows in document order.
    pub fn clear_sort(&mut self) {
        self.proxy.clear_sort();
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Expands every visible row.
    pub fn expand_all(&mut self) {
        self.expansion.expand_all(&*self.proxy);
    }

    /// Expands the row of `object` and every visible row below it.
    pub fn expand(&mut self, object: ObjectId, recursive: bool) {
        let index = self.proxy_index_for(object);
        if recursive {
            self.expansion.expand_children(&*self.proxy, &index, true);
        } else {
            self.expansion.expand(&*self.proxy, &index);
        }
    }

    /// Collapses the row of `object`.
    pub fn collapse(&mut self, object: ObjectId) {
        let index = self.proxy_index_for(object);
        self.expansion.collapse(&index);
    }

    /// Expands the selected rows and everything below them.
    pub fn expand_selection(&mut self) {
        self.expand_selection_to(true);
    }

    /// Collapses the selected rows and everything below them.
    pub fn collapse_selection(&mut self) {
        self.expand_selection_to(false);
    }

    fn expand_selection_to(&mut self, expanded: bool) {
        for object in self.selected_objects() {
            let index = self.proxy_index_for(object);
            self.expansion
                .expand_children(&*self.proxy, &index, expanded);
        }
    }

    fn proxy_index_for(&self, object: ObjectId) -> ModelIndex {
        self.proxy
            .map_from_source(&self.model.index_for_object(object))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Sets whether selection changes are published through `selection_changed`.
    pub fn set_propagate_selection(&mut self, propagate: bool) {
        self.propagate_selection = propagate;
    }

    /// Returns whether selection changes are published.
    pub fn propagate_selection(&self) -> bool {
        self.propagate_selection
    }

    /// Replaces the selection with the given objects.
    pub fn select(&mut self, objects: impl IntoIterator<Item = ObjectId>) {
        let mut selection = Vec::new();
        for object in objects {
            if !selection.contains(&object) {
                selection.push(object);
            }
        }
        self.set_selection(selection);
    }

    /// Selects `object` and expands its ancestors so that its row is displayed.
    ///
    /// Does nothing if the filter hides the object or it lies outside the root.
    pub fn select_and_reveal(&mut self, object: ObjectId) {
        let index = self.proxy_index_for(object);
        if !index.is_valid() {
            tracing::debug!(target: targets::PANEL, ?object, "object not shown, nothing revealed");
            return;
        }
        self.expansion.expand_to(&*self.proxy, &index);
        self.select([object]);
    }

    /// Replaces the selection with the rows at the given filtered-model indices.
    pub fn select_indices(&mut self, indices: &[ModelIndex]) {
        let objects: Vec<_> = indices
            .iter()
            .filter_map(|index| SourceTree::object(&*self.proxy, index))
            .collect();
        self.select(objects);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.set_selection(Vec::new());
    }

    fn set_selection(&mut self, selection: Vec<ObjectId>) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        if self.propagate_selection {
            self.selection_changed.emit(self.selected_object());
        }
    }

    /// Returns the selected objects that still exist, in selection order.
    pub fn selected_objects(&self) -> Vec<ObjectId> {
        let document = self.model.document();
        self.selection
            .iter()
            .copied()
            .filter(|&id| document.contains(id))
            .collect()
    }

    /// Returns the first selected object that still exists.
    pub fn selected_object(&self) -> Option<ObjectId> {
        let document = self.model.document();
        self.selection.iter().copied().find(|&id| document.contains(id))
    }

    /// Returns `true` if the row showing `object` is selected.
    pub fn is_selected(&self, object: ObjectId) -> bool {
        self.selection.contains(&object)
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Returns the rows to display, top to bottom.
    ///
    /// Only visible rows under expanded parents are included. When the root
    /// is hidden, its children form the first level. The whole list comes
    /// from one filter pass.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let _span = PerfSpan::new("panel.visible_rows");
        let mut rows = Vec::new();
        let top = ModelIndex::invalid();
        let start = if self.model.is_root_visible() {
            top
        } else {
            let root = self.proxy.index(0, 0, &top);
            if !root.is_valid() {
                return rows;
            }
            root
        };

        self.proxy.walk(&start, |row| {
            let is_expanded = self.expansion.is_expanded(&row.index);
            rows.push(VisibleRow {
                index: row.index.clone(),
                depth: row.depth,
                has_children: row.child_count > 0,
                is_expanded,
                is_last_child: row.is_last_child,
            });
            is_expanded
        });
        tracing::trace!(target: targets::PANEL, rows = rows.len(), "rows flattened");
        rows
    }
}

impl Drop for OutlinePanel {
    fn drop(&mut self) {
        self.model
            .signals()
            .model_reset
            .disconnect(self.reset_connection);
    }
}
