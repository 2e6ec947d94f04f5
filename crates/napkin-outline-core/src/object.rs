//! Object identity for the napkin outline.
//!
//! Document objects are owned by a separate object table; everything else in
//! the outline (models, filters, selections) refers to them through an
//! [`ObjectId`] handle. Handles stay cheap to copy and never dangle: once the
//! object is removed, lookups with a stale handle simply miss.

use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// A stable handle to an object in a document.
    ///
    /// `ObjectId`s remain valid while the document tree is edited around
    /// them and become stale when the object itself is removed.
    pub struct ObjectId;
}

/// The kind of a document object.
///
/// Kinds drive the "Type" column of the outline and the type filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A scene entity; may own child entities and components.
    Entity,
    /// A component attached to an entity.
    Component,
    /// A named value on a component or entity.
    Attribute,
    /// Any other resource in the document.
    Resource,
}

impl ObjectKind {
    /// All kinds, in the order the type filter bar presents them.
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Entity,
        ObjectKind::Component,
        ObjectKind::Attribute,
        ObjectKind::Resource,
    ];

    /// Returns the display name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Entity => "Entity",
            ObjectKind::Component => "Component",
            ObjectKind::Attribute => "Attribute",
            ObjectKind::Resource => "Resource",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
