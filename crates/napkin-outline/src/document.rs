//! The document object table.
//!
//! A [`Document`] owns every object of an edited NAP document: entities,
//! their components, attributes and free-standing resources. Objects form a
//! tree through parent/child links, but the tree is stored flat in a
//! `SlotMap` so that the rest of the outline can refer to objects through
//! cheap [`ObjectId`] handles instead of references.
//!
//! # Example
//!
//! ```
//! use napkin_outline::document::Document;
//!
//! let doc = Document::new();
//! let world = doc.add_entity(None, "World").unwrap();
//! let lamp = doc.add_entity(Some(world), "Lamp").unwrap();
//! let light = doc.add_component(lamp, "Light").unwrap();
//! doc.add_attribute(light, "intensity", "0.8").unwrap();
//!
//! assert_eq!(doc.children(world), vec![lamp]);
//! assert_eq!(doc.name(light).as_deref(), Some("Light"));
//! ```

use parking_lot::RwLock;
use slotmap::SlotMap;

use napkin_outline_core::logging::targets;
use napkin_outline_core::{ObjectId, ObjectKind, OutlineError, Result, Signal};

/// A single object in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentObject {
    name: String,
    kind: ObjectKind,
    value: Option<String>,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

impl DocumentObject {
    fn new(name: String, kind: ObjectKind, parent: Option<ObjectId>) -> Self {
        Self {
            name,
            kind,
            value: None,
            parent,
            children: Vec::new(),
        }
    }

    /// Returns the object's name (its id in the NAP document).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the object's kind.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Returns the object's value, if it carries one.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the parent object, or `None` for top-level objects.
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Returns the children in row order.
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }
}

/// Signals emitted by a [`Document`] when it is edited.
pub struct DocumentSignals {
    /// Emitted after an object was added.
    pub object_added: Signal<ObjectId>,
    /// Emitted after an object and its subtree were removed.
    /// The id is already stale when slots run.
    pub object_removed: Signal<ObjectId>,
    /// Emitted after an object's name or value changed.
    pub object_changed: Signal<ObjectId>,
}

impl DocumentSignals {
    fn new() -> Self {
        Self {
            object_added: Signal::new(),
            object_removed: Signal::new(),
            object_changed: Signal::new(),
        }
    }
}

struct DocumentStorage {
    objects: SlotMap<ObjectId, DocumentObject>,
    roots: Vec<ObjectId>,
}

impl DocumentStorage {
    fn siblings(&self, parent: Option<ObjectId>) -> &[ObjectId] {
        match parent {
            None => &self.roots,
            Some(id) => self
                .objects
                .get(id)
                .map(|o| o.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    fn remove_subtree(&mut self, id: ObjectId) -> Option<DocumentObject> {
        let object = self.objects.remove(id)?;
        for &child in &object.children {
            self.remove_subtree(child);
        }
        Some(object)
    }
}

/// The object table of an edited document.
///
/// All methods take `&self`; the table uses interior mutability so that it
/// can be shared between the outline model and the host application.
pub struct Document {
    storage: RwLock<DocumentStorage>,
    signals: DocumentSignals,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(DocumentStorage {
                objects: SlotMap::with_key(),
                roots: Vec::new(),
            }),
            signals: DocumentSignals::new(),
        }
    }

    /// Returns the document's signals.
    pub fn signals(&self) -> &DocumentSignals {
        &self.signals
    }

    /// Adds an object under `parent`, or at the top level when `parent` is `None`.
    ///
    /// Fails with [`OutlineError::UnknownObject`] if the parent was removed.
    pub fn add_object(
        &self,
        parent: Option<ObjectId>,
        name: impl Into<String>,
        kind: ObjectKind,
    ) -> Result<ObjectId> {
        self.insert(parent, name.into(), kind, None)
    }

    fn insert(
        &self,
        parent: Option<ObjectId>,
        name: String,
        kind: ObjectKind,
        value: Option<String>,
    ) -> Result<ObjectId> {
        let id = {
            let mut storage = self.storage.write();
            if let Some(parent_id) = parent {
                if !storage.objects.contains_key(parent_id) {
                    return Err(OutlineError::UnknownObject(parent_id));
                }
            }

            let mut object = DocumentObject::new(name.clone(), kind, parent);
            object.value = value;
            let id = storage.objects.insert(object);
            match parent {
                Some(parent_id) => storage.objects[parent_id].children.push(id),
                None => storage.roots.push(id),
            }
            id
        };

        tracing::debug!(target: targets::DOCUMENT, ?id, %kind, name = %name, "object added");
        self.signals.object_added.emit(id);
        Ok(id)
    }

    /// Adds an entity.
    pub fn add_entity(&self, parent: Option<ObjectId>, name: impl Into<String>) -> Result<ObjectId> {
        self.add_object(parent, name, ObjectKind::Entity)
    }

    /// Adds a component to an entity.
    pub fn add_component(&self, entity: ObjectId, name: impl Into<String>) -> Result<ObjectId> {
        self.add_object(Some(entity), name, ObjectKind::Component)
    }

    /// Adds an attribute with a value to `owner`.
    pub fn add_attribute(
        &self,
        owner: ObjectId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<ObjectId> {
        self.insert(Some(owner), name.into(), ObjectKind::Attribute, Some(value.into()))
    }

    /// Adds a top-level resource.
    pub fn add_resource(&self, name: impl Into<String>) -> Result<ObjectId> {
        self.add_object(None, name, ObjectKind::Resource)
    }

    /// Removes an object and all its descendants.
    ///
    /// Returns the removed object, or `None` if the handle was already stale.
    pub fn remove(&self, id: ObjectId) -> Option<DocumentObject> {
        let removed = {
            let mut storage = self.storage.write();
            let parent = storage.objects.get(id)?.parent;
            match parent {
                Some(parent_id) => {
                    if let Some(p) = storage.objects.get_mut(parent_id) {
                        p.children.retain(|&child| child != id);
                    }
                }
                None => storage.roots.retain(|&root| root != id),
            }
            storage.remove_subtree(id)
        };

        tracing::debug!(target: targets::DOCUMENT, ?id, "object removed");
        self.signals.object_removed.emit(id);
        removed
    }

    /// Renames an object.
    pub fn rename(&self, id: ObjectId, name: impl Into<String>) -> Result<()> {
        self.modify(id, |object| object.name = name.into())
    }

    /// Sets the value carried by an object.
    pub fn set_value(&self, id: ObjectId, value: impl Into<String>) -> Result<()> {
        self.modify(id, |object| object.value = Some(value.into()))
    }

    fn modify<F>(&self, id: ObjectId, f: F) -> Result<()>
    where
        F: FnOnce(&mut DocumentObject),
    {
        {
            let mut storage = self.storage.write();
            let object = storage
                .objects
                .get_mut(id)
                .ok_or(OutlineError::UnknownObject(id))?;
            f(object);
        }
        self.signals.object_changed.emit(id);
        Ok(())
    }

    /// Provides read access to an object.
    pub fn with_object<F, R>(&self, id: ObjectId, f: F) -> Option<R>
    where
        F: FnOnce(&DocumentObject) -> R,
    {
        self.storage.read().objects.get(id).map(f)
    }

    /// Returns a copy of an object.
    pub fn object(&self, id: ObjectId) -> Option<DocumentObject> {
        self.with_object(id, Clone::clone)
    }

    /// Returns `true` if the handle refers to a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.storage.read().objects.contains_key(id)
    }

    /// Returns an object's name.
    pub fn name(&self, id: ObjectId) -> Option<String> {
        self.with_object(id, |o| o.name.clone())
    }

    /// Returns an object's kind.
    pub fn kind(&self, id: ObjectId) -> Option<ObjectKind> {
        self.with_object(id, |o| o.kind)
    }

    /// Returns an object's value.
    pub fn value(&self, id: ObjectId) -> Option<String> {
        self.with_object(id, |o| o.value.clone()).flatten()
    }

    /// Returns an object's parent.
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.with_object(id, |o| o.parent).flatten()
    }

    /// Returns an object's children in row order.
    pub fn children(&self, id: ObjectId) -> Vec<ObjectId> {
        self.with_object(id, |o| o.children.clone())
            .unwrap_or_default()
    }

    /// Returns the number of children of an object.
    pub fn child_count(&self, id: ObjectId) -> usize {
        self.with_object(id, |o| o.children.len()).unwrap_or(0)
    }

    /// Returns the child at `row`.
    pub fn child_at(&self, id: ObjectId, row: usize) -> Option<ObjectId> {
        self.with_object(id, |o| o.children.get(row).copied())
            .flatten()
    }

    /// Returns the row of an object among its siblings.
    pub fn row_of(&self, id: ObjectId) -> Option<usize> {
        let storage = self.storage.read();
        let parent = storage.objects.get(id)?.parent;
        storage.siblings(parent).iter().position(|&s| s == id)
    }

    /// Returns the top-level objects.
    pub fn roots(&self) -> Vec<ObjectId> {
        self.storage.read().roots.clone()
    }

    /// Returns the number of objects in the document.
    pub fn len(&self) -> usize {
        self.storage.read().objects.len()
    }

    /// Returns `true` if the document has no objects.
    pub fn is_empty(&self) -> bool {
        self.storage.read().objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_build_hierarchy() {
        let doc = Document::new();
        let world = doc.add_entity(None, "World").unwrap();
        let lamp = doc.add_entity(Some(world), "Lamp").unwrap();
        let light = doc.add_component(lamp, "Light").unwrap();
        let intensity = doc.add_attribute(light, "intensity", "0.8").unwrap();

        assert_eq!(doc.len(), 4);
        assert_eq!(doc.roots(), vec![world]);
        assert_eq!(doc.parent(intensity), Some(light));
        assert_eq!(doc.kind(light), Some(ObjectKind::Component));
        assert_eq!(doc.value(intensity).as_deref(), Some("0.8"));
        assert_eq!(doc.child_at(lamp, 0), Some(light));
        assert_eq!(doc.row_of(lamp), Some(0));
    }

    #[test]
    fn test_unknown_parent() {
        let doc = Document::new();
        let gone = doc.add_entity(None, "Gone").unwrap();
        doc.remove(gone);

        let result = doc.add_component(gone, "Light");
        assert!(matches!(result, Err(OutlineError::UnknownObject(id)) if id == gone));
    }

    #[test]
    fn test_remove_subtree() {
        let doc = Document::new();
        let root = doc.add_entity(None, "Root").unwrap();
        let a = doc.add_entity(Some(root), "A").unwrap();
        let b = doc.add_entity(Some(root), "B").unwrap();
        let a_light = doc.add_component(a, "Light").unwrap();

        let removed = doc.remove(a).unwrap();
        assert_eq!(removed.name(), "A");
        assert!(!doc.contains(a));
        assert!(!doc.contains(a_light));
        assert_eq!(doc.children(root), vec![b]);
        assert_eq!(doc.row_of(b), Some(0));
        assert!(doc.remove(a).is_none());
    }

    #[test]
    fn test_stale_handles_miss() {
        let doc = Document::new();
        let id = doc.add_resource("Texture").unwrap();
        doc.remove(id);

        assert_eq!(doc.name(id), None);
        assert_eq!(doc.child_count(id), 0);
        assert!(doc.rename(id, "Other").is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_signals() {
        let doc = Document::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let e = events.clone();
        doc.signals().object_added.connect(move |_| e.lock().push("added"));
        let e = events.clone();
        doc.signals()
            .object_changed
            .connect(move |_| e.lock().push("changed"));
        let e = events.clone();
        doc.signals()
            .object_removed
            .connect(move |_| e.lock().push("removed"));

        let id = doc.add_entity(None, "Foo").unwrap();
        doc.rename(id, "Bar").unwrap();
        doc.remove(id);

        assert_eq!(*events.lock(), vec!["added", "changed", "removed"]);
    }
}
