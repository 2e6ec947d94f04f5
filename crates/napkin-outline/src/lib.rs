//! Napkin outline: a filtered tree view over a NAP document.
//!
//! The outline shows the objects of a document (entities, components,
//! attributes and resources) as a tree with the columns Name, Type and
//! Value. A text filter and a type filter narrow the tree down; a row stays
//! visible while it matches or leads to a row that matches, so a search for
//! a component keeps the entities that own it on screen.
//!
//! # Modules
//!
//! - [`document`]: the object table the outline shows
//! - [`model`]: the outline model and the leaf filter projection
//! - [`outline`]: panel state (filter bar, expansion, selection)
//! - [`config`]: panel configuration from TOML or JSON
//! - [`debug`]: text dumps of the tree
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use napkin_outline::document::Document;
//! use napkin_outline::model::{LeafFilterProxyModel, OutlineModel};
//!
//! let doc = Arc::new(Document::new());
//! let root = doc.add_entity(None, "Root").unwrap();
//! let foo = doc.add_entity(Some(root), "Foo").unwrap();
//! let bar = doc.add_entity(Some(root), "Bar").unwrap();
//! doc.add_component(bar, "Light").unwrap();
//!
//! let model = Arc::new(OutlineModel::new(doc));
//! model.set_root(Some(root));
//! let proxy = LeafFilterProxyModel::new(model.clone());
//! proxy.set_text_filter("Lig", false);
//!
//! assert!(proxy.is_row_visible(&model.index_for_object(bar)));
//! assert!(!proxy.is_row_visible(&model.index_for_object(foo)));
//! ```

pub mod config;
pub mod debug;
pub mod document;
pub mod model;
pub mod outline;

pub use napkin_outline_core::{ObjectId, ObjectKind, OutlineError, Result, Signal};

pub use config::OutlineConfig;
pub use document::Document;
pub use model::{LeafFilterProxyModel, OutlineModel};
pub use outline::OutlinePanel;
