//! Text dumps of the outline for logs and tests.
//!
//! [`OutlineTreeDebug`] walks any [`ItemModel`], so it prints the full
//! outline when given an `OutlineModel` and only the visible rows when given
//! a `LeafFilterProxyModel`.
//!
//! ```
//! use std::sync::Arc;
//! use napkin_outline::debug::OutlineTreeDebug;
//! use napkin_outline::document::Document;
//! use napkin_outline::model::OutlineModel;
//! use napkin_outline_core::{TreeFormatOptions, TreeStyle};
//!
//! let doc = Arc::new(Document::new());
//! let root = doc.add_entity(None, "Root").unwrap();
//! doc.add_entity(Some(root), "Lamp").unwrap();
//!
//! let model = OutlineModel::new(doc);
//! model.set_root(Some(root));
//!
//! let options = TreeFormatOptions { style: TreeStyle::Ascii, ..TreeFormatOptions::minimal() };
//! let text = OutlineTreeDebug::with_options(&model, options).format();
//! assert_eq!(text, "Root\n`-- Lamp\n");
//! ```

use std::fmt;

use napkin_outline_core::TreeFormatOptions;

use crate::model::{ItemData, ItemModel, ItemRole, ModelIndex, TYPE_COLUMN, VALUE_COLUMN};

/// Formats the rows of a model as an indented tree.
pub struct OutlineTreeDebug<'a, M: ItemModel + ?Sized> {
    model: &'a M,
    options: TreeFormatOptions,
}

impl<'a, M: ItemModel + ?Sized> OutlineTreeDebug<'a, M> {
    /// Creates a printer with default options.
    pub fn new(model: &'a M) -> Self {
        Self::with_options(model, TreeFormatOptions::default())
    }

    /// Creates a printer with custom options.
    pub fn with_options(model: &'a M, options: TreeFormatOptions) -> Self {
        Self { model, options }
    }

    /// Formats every row of the model.
    pub fn format(&self) -> String {
        let mut output = String::new();
        self.format_children(&ModelIndex::invalid(), &mut Vec::new(), &mut output);
        output
    }

    /// Formats the row at `index` and everything below it.
    pub fn format_subtree(&self, index: &ModelIndex) -> String {
        let mut output = String::new();
        if index.is_valid() {
            self.format_row(index, &mut Vec::new(), true, &mut output);
        }
        output
    }

    fn format_children(&self, parent: &ModelIndex, open_levels: &mut Vec<bool>, output: &mut String) {
        let count = self.model.row_count(parent);
        for row in 0..count {
            let index = self.model.index(row, 0, parent);
            if index.is_valid() {
                self.format_row(&index, open_levels, row + 1 == count, output);
            }
        }
    }

    fn format_row(
        &self,
        index: &ModelIndex,
        open_levels: &mut Vec<bool>,
        is_last: bool,
        output: &mut String,
    ) {
        let depth = open_levels.len();
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        output.push_str(&self.options.prefix(open_levels, is_last));
        let name = self.model.display_text(index).unwrap_or_default();
        output.push_str(if name.is_empty() { "(unnamed)" } else { &name });

        if self.options.show_types {
            let kind = self.cell_text(index, TYPE_COLUMN);
            if !kind.is_empty() {
                output.push_str(&format!(" ({kind})"));
            }
        }
        if self.options.show_values {
            let value = self.cell_text(index, VALUE_COLUMN);
            if !value.is_empty() {
                output.push_str(&format!(" = {value}"));
            }
        }
        output.push('\n');

        open_levels.push(!is_last);
        self.format_children(index, open_levels, output);
        open_levels.pop();
    }

    fn cell_text(&self, index: &ModelIndex, column: usize) -> String {
        match self.model.data(&index.sibling_at_column(column), ItemRole::Display) {
            ItemData::String(text) => text,
            _ => String::new(),
        }
    }
}

impl<M: ItemModel + ?Sized> fmt::Display for OutlineTreeDebug<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::model::{LeafFilterProxyModel, OutlineModel};
    use napkin_outline_core::TreeStyle;
    use std::sync::Arc;

    fn model() -> Arc<OutlineModel> {
        let doc = Arc::new(Document::new());
        let root = doc.add_entity(None, "Root").unwrap();
        doc.add_entity(Some(root), "Foo").unwrap();
        let bar = doc.add_entity(Some(root), "Bar").unwrap();
        let light = doc.add_component(bar, "Light").unwrap();
        doc.add_attribute(light, "intensity", "0.8").unwrap();

        let model = Arc::new(OutlineModel::new(doc));
        model.set_root(Some(root));
        model
    }

    fn ascii() -> TreeFormatOptions {
        TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_tree() {
        let model = model();
        let text = OutlineTreeDebug::with_options(&*model, ascii()).format();
        assert_eq!(
            text,
            "Root (Entity)\n\
             +-- Foo (Entity)\n\
             `-- Bar (Entity)\n    \
             `-- Light (Component)\n        \
             `-- intensity (Attribute) = 0.8\n"
        );
    }

    #[test]
    fn test_filtered_tree() {
        let model = model();
        let proxy = LeafFilterProxyModel::new(model);
        proxy.set_text_filter("Lig", true);

        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        };
        let text = OutlineTreeDebug::with_options(&proxy, options).to_string();
        assert_eq!(text, "Root\n`-- Bar\n    `-- Light\n");
    }

    #[test]
    fn test_max_depth() {
        let model = model();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let text = OutlineTreeDebug::with_options(&*model, options).format();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_empty_model() {
        let doc = Arc::new(Document::new());
        let model = OutlineModel::new(doc);
        assert_eq!(OutlineTreeDebug::new(&model).format(), "");
        assert_eq!(
            OutlineTreeDebug::new(&model).format_subtree(&ModelIndex::invalid()),
            ""
        );
    }
}
