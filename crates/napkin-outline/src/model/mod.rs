//! Model/View layer of the outline.
//!
//! # Core Types
//!
//! - `ModelIndex`: Identifies a row and column in a model
//! - `ItemRole` / `ItemData`: What to read from a cell, and the result
//! - `ItemModel`: The read interface every model implements
//! - `SourceTree`: What the leaf filter needs from the model it wraps
//! - `ModelSignals`: Change notifications for views
//!
//! # Model Implementations
//!
//! - `OutlineModel`: A live view over one subtree of a `Document`
//! - `LeafFilterProxyModel`: Hides rows that neither match nor lead to a match
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────┐     ┌──────────────┐     ┌──────────────────────┐     ┌───────┐
//! │ Document │────>│ OutlineModel │────>│ LeafFilterProxyModel │────>│ Panel │
//! └──────────┘     └──────────────┘     └──────────────────────┘     └───────┘
//!                                          TextFilter, TypeFilter,
//!                                          item filter
//! ```

pub mod filter;
pub mod index;
pub mod leaf_filter;
pub mod outline_model;
pub mod role;
pub mod traits;

pub use filter::{TextFilter, TypeFilter};
pub use index::ModelIndex;
pub use leaf_filter::{CompareFn, ItemFilterFn, LeafFilterProxyModel, ProjectedRow};
pub use outline_model::{NAME_COLUMN, OutlineModel, TYPE_COLUMN, VALUE_COLUMN};
pub use role::{ItemData, ItemRole};
pub use traits::{ItemModel, ModelSignals, Orientation, SourceTree};
