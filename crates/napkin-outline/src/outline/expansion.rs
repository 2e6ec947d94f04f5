//! Expanded/collapsed state of outline rows.
//!
//! Expansion is tracked per document object rather than per row, so it
//! survives filter changes that move rows around.

use std::collections::HashSet;

use napkin_outline_core::{ObjectId, Signal};

use crate::model::{ItemModel, ModelIndex};

/// The set of expanded rows of a tree view.
///
/// # Signals
///
/// - `expanded(ObjectId)`: Emitted when a row is expanded
/// - `collapsed(ObjectId)`: Emitted when a row is collapsed
#[derive(Default)]
pub struct ExpansionState {
    expanded_ids: HashSet<ObjectId>,

    /// Emitted when a row is expanded.
    pub expanded: Signal<ObjectId>,
    /// Emitted when a row is collapsed.
    pub collapsed: Signal<ObjectId>,
}

impl ExpansionState {
    /// Creates a state with every row collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the row at the given index is expanded.
    pub fn is_expanded(&self, index: &ModelIndex) -> bool {
        index
            .object()
            .is_some_and(|id| self.expanded_ids.contains(&id))
    }

    /// Returns whether the row showing `object` is expanded.
    pub fn is_object_expanded(&self, object: ObjectId) -> bool {
        self.expanded_ids.contains(&object)
    }

    /// Returns the number of expanded rows.
    pub fn len(&self) -> usize {
        self.expanded_ids.len()
    }

    /// Returns `true` if every row is collapsed.
    pub fn is_empty(&self) -> bool {
        self.expanded_ids.is_empty()
    }

    /// Expands the row at the given index if it has children.
    pub fn expand(&mut self, model: &dyn ItemModel, index: &ModelIndex) {
        let Some(id) = index.object() else {
            return;
        };
        if !model.has_children(index) {
            return;
        }
        if self.expanded_ids.insert(id) {
            self.expanded.emit(id);
        }
    }

    /// Collapses the row at the given index.
    pub fn collapse(&mut self, index: &ModelIndex) {
        let Some(id) = index.object() else {
            return;
        };
        if self.expanded_ids.remove(&id) {
            self.collapsed.emit(id);
        }
    }

    /// Toggles the expanded state of the row at the given index.
    pub fn toggle(&mut self, model: &dyn ItemModel, index: &ModelIndex) {
        if self.is_expanded(index) {
            self.collapse(index);
        } else {
            self.expand(model, index);
        }
    }

    /// Expands or collapses the row at `index` together with all its descendants.
    pub fn expand_children(&mut self, model: &dyn ItemModel, index: &ModelIndex, expanded: bool) {
        if !index.is_valid() {
            return;
        }
        for row in 0..model.row_count(index) {
            let child = model.index(row, 0, index);
            self.expand_children(model, &child, expanded);
        }

        if expanded {
            self.expand(model, index);
        } else {
            self.collapse(index);
        }
    }

    /// Expands every row of the model that has children.
    pub fn expand_all(&mut self, model: &dyn ItemModel) {
        let parent = ModelIndex::invalid();
        for row in 0..model.row_count(&parent) {
            let index = model.index(row, 0, &parent);
            self.expand_children(model, &index, true);
        }
    }

    /// Collapses every row.
    pub fn collapse_all(&mut self) {
        self.expanded_ids.clear();
    }

    /// Expands every ancestor of `index` so that the row becomes reachable.
    pub fn expand_to(&mut self, model: &dyn ItemModel, index: &ModelIndex) {
        let mut current = model.parent(index);
        while current.is_valid() {
            self.expand(model, &current);
            current = model.parent(&current);
        }
    }
}
