//! Model index for addressing rows in the outline.
//!
//! A `ModelIndex` locates one cell of a hierarchical model: a row and column
//! under a parent index. Every valid index in the outline carries the
//! [`ObjectId`] of the document object shown in that row, so models can
//! resolve an index without walking the tree.

use std::hash::{Hash, Hasher};

use napkin_outline_core::ObjectId;

/// Represents a position within an `ItemModel`.
///
/// # Index Validity
///
/// Indices are snapshots: after the document is edited, a previously obtained
/// index may point at a different row. The object handle inside stays safe
/// to use; it simply stops resolving once the object is removed.
#[derive(Clone)]
pub struct ModelIndex {
    row: usize,
    column: usize,
    parent: Option<Box<ModelIndex>>,
    /// `None` marks the invalid index.
    object: Option<ObjectId>,
}

impl Default for ModelIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl ModelIndex {
    /// Creates an invalid (null) model index.
    ///
    /// An invalid index stands for the invisible parent of top-level rows and
    /// for out-of-bounds lookups.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            row: 0,
            column: 0,
            parent: None,
            object: None,
        }
    }

    /// Creates a valid index for the row showing `object`.
    #[inline]
    pub fn new(row: usize, column: usize, parent: ModelIndex, object: ObjectId) -> Self {
        Self {
            row,
            column,
            parent: if parent.is_valid() {
                Some(Box::new(parent))
            } else {
                None
            },
            object: Some(object),
        }
    }

    /// Returns `true` if this is a valid index.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.object.is_some()
    }

    /// Returns the row of this index within its parent.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the column of this index.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the object shown in this row, or `None` for the invalid index.
    #[inline]
    pub fn object(&self) -> Option<ObjectId> {
        self.object
    }

    /// Returns the parent index, or an invalid index for top-level rows.
    #[inline]
    pub fn parent(&self) -> ModelIndex {
        match &self.parent {
            Some(parent) => (**parent).clone(),
            None => ModelIndex::invalid(),
        }
    }

    /// Returns the same row at another column.
    pub fn sibling_at_column(&self, column: usize) -> ModelIndex {
        match self.object {
            Some(object) => ModelIndex::new(self.row, column, self.parent(), object),
            None => ModelIndex::invalid(),
        }
    }

    /// Returns the depth of this index; top-level rows have depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(parent) = current {
            depth += 1;
            current = parent.parent.as_deref();
        }
        depth
    }
}

impl std::fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.object {
            Some(object) => f
                .debug_struct("ModelIndex")
                .field("row", &self.row)
                .field("column", &self.column)
                .field("depth", &self.depth())
                .field("object", &object)
                .finish(),
            None => write!(f, "ModelIndex(invalid)"),
        }
    }
}

impl PartialEq for ModelIndex {
    fn eq(&self, other: &Self) -> bool {
        match (self.object, other.object) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a == b
                    && self.row == other.row
                    && self.column == other.column
                    && self.parent == other.parent
            }
            _ => false,
        }
    }
}

impl Eq for ModelIndex {}

impl Hash for ModelIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.object.hash(state);
        if self.object.is_some() {
            self.row.hash(state);
            self.column.hash(state);
        }
    }
}
