//! The outline model: a live tree view over a document.
//!
//! `OutlineModel` shows one document object as its single top-level row and
//! that object's descendants below it, with the columns Name, Type and Value.
//! It keeps no copy of the tree: every query reads the document, so rows
//! always reflect the document's current shape.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use napkin_outline_core::logging::targets;
use napkin_outline_core::{ConnectionId, ObjectId, ObjectKind};

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};
use super::traits::{ItemModel, ModelSignals, Orientation, SourceTree};
use crate::document::Document;

/// Column showing the object name.
pub const NAME_COLUMN: usize = 0;
/// Column showing the object kind.
pub const TYPE_COLUMN: usize = 1;
/// Column showing the object value.
pub const VALUE_COLUMN: usize = 2;

const HEADER_LABELS: [&str; 3] = ["Name", "Type", "Value"];

/// A hierarchical model of one document subtree.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use napkin_outline::document::Document;
/// use napkin_outline::model::{ItemModel, ModelIndex, OutlineModel};
///
/// let doc = Arc::new(Document::new());
/// let world = doc.add_entity(None, "World").unwrap();
/// doc.add_entity(Some(world), "Lamp").unwrap();
///
/// let model = OutlineModel::new(doc);
/// let root = model.set_root(Some(world));
///
/// assert_eq!(model.row_count(&ModelIndex::invalid()), 1);
/// assert_eq!(model.row_count(&root), 1);
/// assert_eq!(model.display_text(&root).as_deref(), Some("World"));
/// ```
pub struct OutlineModel {
    document: Arc<Document>,
    root: RwLock<Option<ObjectId>>,
    root_visible: RwLock<bool>,
    signals: ModelSignals,
    document_connections: Mutex<Vec<ConnectionId>>,
}

impl OutlineModel {
    /// Creates an empty model over `document`.
    pub fn new(document: Arc<Document>) -> Self {
        Self {
            document,
            root: RwLock::new(None),
            root_visible: RwLock::new(true),
            signals: ModelSignals::new(),
            document_connections: Mutex::new(Vec::new()),
        }
    }

    /// Returns the document this model shows.
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Returns the object shown as the top-level row.
    pub fn root(&self) -> Option<ObjectId> {
        *self.root.read()
    }

    /// Replaces the shown subtree with the one rooted at `root`.
    ///
    /// Passing `None` empties the model. Returns the index of the new root
    /// row, or an invalid index when the model is empty.
    pub fn set_root(&self, root: Option<ObjectId>) -> ModelIndex {
        self.signals.emit_reset(|| {
            *self.root.write() = root;
        });
        tracing::debug!(target: targets::MODEL, ?root, "outline root set");
        self.index(0, NAME_COLUMN, &ModelIndex::invalid())
    }

    /// Returns `true` if the root row itself is meant to be displayed.
    pub fn is_root_visible(&self) -> bool {
        *self.root_visible.read()
    }

    /// Sets whether the root row itself is displayed.
    ///
    /// When hidden, views show the root's children at the top level.
    pub fn set_root_visible(&self, visible: bool) {
        self.signals.emit_layout_changed(|| {
            *self.root_visible.write() = visible;
        });
    }

    /// Tells views to re-query everything after external document edits.
    pub fn refresh(&self) {
        self.signals.emit_reset(|| {});
    }

    /// Refreshes the model whenever the document is edited.
    ///
    /// The connections hold only a weak reference to the model and are
    /// removed when the model is dropped.
    pub fn connect_document(self: &Arc<Self>) {
        let mut connections = self.document_connections.lock();
        if !connections.is_empty() {
            return;
        }

        let signals = self.document.signals();
        for signal in [
            &signals.object_added,
            &signals.object_removed,
            &signals.object_changed,
        ] {
            let model: Weak<Self> = Arc::downgrade(self);
            connections.push(signal.connect(move |_| {
                if let Some(model) = model.upgrade() {
                    model.refresh();
                }
            }));
        }
    }

    /// Returns the index of the row showing `object`, or an invalid index if
    /// the object is not part of the shown subtree.
    pub fn index_for_object(&self, object: ObjectId) -> ModelIndex {
        let Some(root) = self.root() else {
            return ModelIndex::invalid();
        };

        let mut chain = vec![object];
        let mut current = object;
        while current != root {
            match self.document.parent(current) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => return ModelIndex::invalid(),
            }
        }
        if !self.document.contains(root) {
            return ModelIndex::invalid();
        }

        let mut index = ModelIndex::new(0, NAME_COLUMN, ModelIndex::invalid(), root);
        for &id in chain.iter().rev().skip(1) {
            let Some(row) = self.document.row_of(id) else {
                return ModelIndex::invalid();
            };
            index = ModelIndex::new(row, NAME_COLUMN, index, id);
        }
        index
    }

    fn live_object(&self, index: &ModelIndex) -> Option<ObjectId> {
        index.object().filter(|&id| self.document.contains(id))
    }
}

impl Drop for OutlineModel {
    fn drop(&mut self) {
        let signals = self.document.signals();
        let connections = std::mem::take(self.document_connections.get_mut());
        // Same order as in `connect_document`.
        for (signal, id) in [
            &signals.object_added,
            &signals.object_removed,
            &signals.object_changed,
        ]
        .into_iter()
        .zip(connections)
        {
            signal.disconnect(id);
        }
    }
}

impl ItemModel for OutlineModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        if !parent.is_valid() {
            return self
                .root()
                .filter(|&root| self.document.contains(root))
                .map_or(0, |_| 1);
        }
        if parent.column() != NAME_COLUMN {
            return 0;
        }
        self.live_object(parent)
            .map_or(0, |id| self.document.child_count(id))
    }

    fn column_count(&self, _parent: &ModelIndex) -> usize {
        HEADER_LABELS.len()
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        let Some(id) = self.live_object(index) else {
            return ItemData::None;
        };
        let Some(object) = self.document.object(id) else {
            return ItemData::None;
        };

        match role {
            ItemRole::Display => match index.column() {
                NAME_COLUMN => ItemData::from(object.name()),
                TYPE_COLUMN => ItemData::from(object.kind().name()),
                VALUE_COLUMN => ItemData::from(object.value()),
                _ => ItemData::None,
            },
            ItemRole::ToolTip => ItemData::from(format!("{} '{}'", object.kind(), object.name())),
            ItemRole::Kind => ItemData::from(object.kind()),
            ItemRole::User(_) => ItemData::None,
        }
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if column >= HEADER_LABELS.len() {
            return ModelIndex::invalid();
        }

        if !parent.is_valid() {
            return match self.root() {
                Some(root) if row == 0 && self.document.contains(root) => {
                    ModelIndex::new(0, column, ModelIndex::invalid(), root)
                }
                _ => ModelIndex::invalid(),
            };
        }

        let Some(parent_id) = self.live_object(parent) else {
            return ModelIndex::invalid();
        };
        match self.document.child_at(parent_id, row) {
            Some(child) => ModelIndex::new(row, column, parent.sibling_at_column(NAME_COLUMN), child),
            None => ModelIndex::invalid(),
        }
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        let Some(id) = self.live_object(index) else {
            return ModelIndex::invalid();
        };
        if Some(id) == self.root() {
            return ModelIndex::invalid();
        }
        match self.document.parent(id) {
            Some(parent) => self.index_for_object(parent),
            None => ModelIndex::invalid(),
        }
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn header_data(&self, section: usize, orientation: Orientation, role: ItemRole) -> ItemData {
        match (orientation, role) {
            (Orientation::Horizontal, ItemRole::Display) => {
                HEADER_LABELS.get(section).copied().into()
            }
            _ => ItemData::None,
        }
    }
}

impl SourceTree for OutlineModel {
    fn is_root_visible(&self) -> bool {
        OutlineModel::is_root_visible(self)
    }

    fn object(&self, index: &ModelIndex) -> Option<ObjectId> {
        self.live_object(index)
    }

    fn object_kind(&self, index: &ModelIndex) -> Option<ObjectKind> {
        self.live_object(index).and_then(|id| self.document.kind(id))
    }
}
