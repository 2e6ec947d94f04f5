//! Data roles for item models.
//!
//! Each cell can carry several pieces of data, distinguished by role. The
//! outline only needs a handful: display text, tooltips, and the object kind
//! for views that pick an icon per kind.

use napkin_outline_core::ObjectKind;

/// Roles for accessing different aspects of item data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// Primary text to display.
    Display,
    /// Tooltip text shown on hover.
    ToolTip,
    /// The kind of the object in this row, for icons.
    Kind,
    /// Application-specific data.
    User(u32),
}

/// Type-erased container for item data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemData {
    /// No data for this role.
    #[default]
    None,
    /// Text.
    String(String),
    /// An object kind.
    Kind(ObjectKind),
}

impl ItemData {
    /// Returns `true` if there is no data.
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// Returns the text, if this is a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts into the text, if this is a string.
    pub fn into_string(self) -> Option<String> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the kind, if this is a kind.
    pub fn as_kind(&self) -> Option<ObjectKind> {
        match self {
            ItemData::Kind(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::String(s)
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::String(s.to_string())
    }
}

impl From<ObjectKind> for ItemData {
    fn from(kind: ObjectKind) -> Self {
        ItemData::Kind(kind)
    }
}

impl<T: Into<ItemData>> From<Option<T>> for ItemData {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
