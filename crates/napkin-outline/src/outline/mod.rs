//! Toolkit-free state of the outline panel.
//!
//! - `TypeFilterBar`: one checkable button per object kind
//! - `ExpansionState`: which rows are expanded
//! - `OutlinePanel`: ties the model, the leaf filter and the controls together

mod expansion;
mod panel;
mod type_filter;

pub use expansion::ExpansionState;
pub use panel::{OutlinePanel, VisibleRow};
pub use type_filter::{TypeButton, TypeFilterBar};
