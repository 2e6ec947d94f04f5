//! Leaf filter: a tree projection that keeps the path to every match.
//!
//! A plain row filter hides a parent that does not match and with it every
//! matching descendant. `LeafFilterProxyModel` instead keeps a row visible
//! when any row below it matches, so searching for a component still shows
//! the entities that own it.
//!
//! # Visibility rule
//!
//! A row is visible when:
//!
//! 1. the source hides its root row and this row is the top-level row; or
//! 2. the item filter, if any, accepts the row (a rejection hides the row
//!    and everything below it), and then either
//! 3. the row matches the text and type filters itself, or any direct child
//!    is visible under this same rule.
//!
//! Nothing is kept between queries. Each query runs one filter pass over the
//! current document, deciding every row at most once, so the projection is
//! always consistent with the document and the filters.
//!
//! # Sorting
//!
//! Visible siblings keep their source order unless a sort is set, either by
//! the display text of a column ([`LeafFilterProxyModel::sort_by_column`]) or
//! by a comparator ([`LeafFilterProxyModel::set_sort`]). Sorting only reorders
//! the projection; it never changes which rows are visible.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use napkin_outline_core::logging::targets;
use napkin_outline_core::{ObjectId, ObjectKind, PerfSpan, Result};

use super::filter::{TextFilter, TypeFilter};
use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};
use super::traits::{ItemModel, ModelSignals, Orientation, SourceTree};

/// Type alias for an item filter function.
///
/// Receives the source model and a source index. Returns `false` to hide the
/// row together with its whole subtree.
pub type ItemFilterFn<S> = Arc<dyn Fn(&S, &ModelIndex) -> bool + Send + Sync>;

/// Type alias for a compare function for sorting.
///
/// Compares two source rows under the same source parent.
pub type CompareFn<S> = Arc<dyn Fn(&S, usize, usize, &ModelIndex) -> Ordering + Send + Sync>;

/// Filter and sort settings read by one query.
struct Criteria<S> {
    text: TextFilter,
    types: TypeFilter,
    item: Option<ItemFilterFn<S>>,
    key_column: usize,
    compare: Option<CompareFn<S>>,
    sort_column: Option<usize>,
    sort_descending: bool,
}

impl<S> Clone for Criteria<S> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            types: self.types.clone(),
            item: self.item.clone(),
            key_column: self.key_column,
            compare: self.compare.clone(),
            sort_column: self.sort_column,
            sort_descending: self.sort_descending,
        }
    }
}

/// A visible row reached by [`LeafFilterProxyModel::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    /// Index into the projection.
    pub index: ModelIndex,
    /// Depth below the walk's starting parent; its children have depth 0.
    pub depth: usize,
    /// Number of visible children.
    pub child_count: usize,
    /// Whether this is the last visible child of its parent.
    pub is_last_child: bool,
}

/// A proxy model that shows matching rows together with their ancestors.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use napkin_outline::document::Document;
/// use napkin_outline::model::{LeafFilterProxyModel, OutlineModel};
///
/// let doc = Arc::new(Document::new());
/// let root = doc.add_entity(None, "Root").unwrap();
/// let foo = doc.add_entity(Some(root), "Foo").unwrap();
/// let bar = doc.add_entity(Some(root), "Bar").unwrap();
/// let light = doc.add_component(bar, "Light").unwrap();
///
/// let model = Arc::new(OutlineModel::new(doc));
/// model.set_root(Some(root));
///
/// let proxy = LeafFilterProxyModel::new(model.clone());
/// proxy.set_text_filter("Lig", true);
///
/// assert!(proxy.is_row_visible(&model.index_for_object(bar)));
/// assert!(proxy.is_row_visible(&model.index_for_object(light)));
/// assert!(!proxy.is_row_visible(&model.index_for_object(foo)));
/// ```
pub struct LeafFilterProxyModel<S: SourceTree> {
    source: Arc<S>,
    criteria: RwLock<Criteria<S>>,
    signals: ModelSignals,
}

impl<S: SourceTree + 'static> LeafFilterProxyModel<S> {
    /// Creates a proxy over `source` with empty filters and no sorting.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            criteria: RwLock::new(Criteria {
                text: TextFilter::default(),
                types: TypeFilter::default(),
                item: None,
                key_column: 0,
                compare: None,
                sort_column: None,
                sort_descending: false,
            }),
            signals: ModelSignals::new(),
        }
    }

    /// Sets an item filter while building the proxy.
    pub fn with_item_filter<F>(self, filter: F) -> Self
    where
        F: Fn(&S, &ModelIndex) -> bool + Send + Sync + 'static,
    {
        self.criteria.write().item = Some(Arc::new(filter));
        self
    }

    /// Sets a sort comparator while building the proxy.
    pub fn with_sort<F>(self, compare: F) -> Self
    where
        F: Fn(&S, usize, usize, &ModelIndex) -> Ordering + Send + Sync + 'static,
    {
        self.criteria.write().compare = Some(Arc::new(compare));
        self
    }

    /// Returns a reference to the source model.
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Replaces the set of enabled object kinds.
    ///
    /// An empty set enables every kind.
    pub fn set_type_filter(&self, enabled_types: impl IntoIterator<Item = ObjectKind>) {
        let types = TypeFilter::new(enabled_types);
        tracing::debug!(target: targets::FILTER, kinds = ?types, "type filter set");
        self.signals.emit_layout_changed(|| {
            self.criteria.write().types = types;
        });
    }

    /// Replaces the text pattern.
    ///
    /// The pattern is a regular expression searched in the filter key column.
    /// An invalid expression is matched literally. An empty pattern accepts
    /// every row.
    pub fn set_text_filter(&self, pattern: impl Into<String>, case_sensitive: bool) {
        self.apply_text_filter(TextFilter::new(pattern, case_sensitive));
    }

    /// Replaces the text pattern, failing on an invalid regular expression.
    ///
    /// The current pattern is kept when this fails.
    pub fn try_set_text_filter(&self, pattern: impl Into<String>, case_sensitive: bool) -> Result<()> {
        let text = TextFilter::try_new(pattern, case_sensitive)?;
        self.apply_text_filter(text);
        Ok(())
    }

    fn apply_text_filter(&self, text: TextFilter) {
        tracing::debug!(
            target: targets::FILTER,
            pattern = text.pattern(),
            case_sensitive = text.is_case_sensitive(),
            "text filter set"
        );
        self.signals.emit_layout_changed(|| {
            self.criteria.write().text = text;
        });
    }

    /// Sets the item filter dynamically.
    pub fn set_item_filter<F>(&self, filter: F)
    where
        F: Fn(&S, &ModelIndex) -> bool + Send + Sync + 'static,
    {
        self.signals.emit_layout_changed(|| {
            self.criteria.write().item = Some(Arc::new(filter));
        });
    }

    /// Removes the item filter.
    pub fn clear_item_filter(&self) {
        self.signals.emit_layout_changed(|| {
            self.criteria.write().item = None;
        });
    }

    /// Sets the column whose display text the text filter inspects.
    pub fn set_filter_key_column(&self, column: usize) {
        self.signals.emit_layout_changed(|| {
            self.criteria.write().key_column = column;
        });
    }

    /// Returns the column whose display text the text filter inspects.
    pub fn filter_key_column(&self) -> usize {
        self.criteria.read().key_column
    }

    /// Returns the active text filter.
    pub fn text_filter(&self) -> TextFilter {
        self.criteria.read().text.clone()
    }

    /// Returns the enabled object kinds; empty means all kinds.
    pub fn enabled_types(&self) -> Vec<ObjectKind> {
        self.criteria.read().types.kinds().collect()
    }

    /// Sets the sort comparator dynamically.
    ///
    /// A comparator takes precedence over column-based sorting.
    pub fn set_sort<F>(&self, compare: F)
    where
        F: Fn(&S, usize, usize, &ModelIndex) -> Ordering + Send + Sync + 'static,
    {
        self.signals.emit_layout_changed(|| {
            self.criteria.write().compare = Some(Arc::new(compare));
        });
    }

    /// Clears the custom sort comparator.
    ///
    /// Column-based sorting set via `sort_by_column` stays in effect.
    pub fn clear_custom_sort(&self) {
        self.signals.emit_layout_changed(|| {
            self.criteria.write().compare = None;
        });
    }

    /// Sorts siblings by the display text of `column`.
    pub fn sort_by_column(&self, column: usize, descending: bool) {
        tracing::debug!(target: targets::FILTER, column, descending, "sort set");
        self.signals.emit_layout_changed(|| {
            let mut criteria = self.criteria.write();
            criteria.sort_column = Some(column);
            criteria.sort_descending = descending;
        });
    }

    /// Clears column-based sorting; siblings return to source order.
    pub fn clear_sort(&self) {
        self.signals.emit_layout_changed(|| {
            self.criteria.write().sort_column = None;
        });
    }

    /// Returns the column siblings are sorted by, if any.
    pub fn sort_column(&self) -> Option<usize> {
        self.criteria.read().sort_column
    }

    /// Returns `true` if column-based sorting is descending.
    pub fn sort_descending(&self) -> bool {
        self.criteria.read().sort_descending
    }

    /// Tells views to re-query every row.
    ///
    /// Call this after the source changed in ways the proxy cannot see.
    pub fn invalidate(&self) {
        self.signals.emit_layout_changed(|| {});
    }

    fn pass(&self) -> Pass<'_, S> {
        Pass::new(&self.source, self.criteria.read().clone())
    }

    /// Returns `true` if the source row `source_row` under `source_parent` is visible.
    ///
    /// # Panics
    ///
    /// Panics if the row does not exist.
    pub fn filter_accepts_row(&self, source_row: usize, source_parent: &ModelIndex) -> bool {
        let count = self.source.row_count(source_parent);
        assert!(
            source_row < count,
            "row {source_row} out of range, parent has {count} rows"
        );
        self.is_row_visible(&self.source.index(source_row, 0, source_parent))
    }

    /// Returns `true` if the row at the source index is visible.
    ///
    /// # Panics
    ///
    /// Panics if `index` is invalid.
    pub fn is_row_visible(&self, index: &ModelIndex) -> bool {
        assert!(index.is_valid(), "visibility queried for an invalid index");
        let visible = self.pass().is_visible(index);
        tracing::trace!(target: targets::FILTER, ?index, visible, "row visibility");
        visible
    }

    /// Returns `true` if the row matches the text and type filters itself,
    /// ignoring its descendants and the item filter.
    pub fn self_matches(&self, index: &ModelIndex) -> bool {
        self.pass().self_matches(index)
    }

    /// Returns `true` if any direct child of the row is visible.
    pub fn has_accepted_children(&self, index: &ModelIndex) -> bool {
        self.pass().has_accepted_children(index)
    }

    /// Returns every visible source index, depth first in projection order.
    pub fn visible_indices(&self) -> Vec<ModelIndex> {
        let _span = PerfSpan::new("leaf_filter.visible_indices");
        let mut pass = self.pass();
        let mut out = Vec::new();
        pass.collect_visible(&ModelIndex::invalid(), &mut out);
        out
    }

    /// Visits the visible rows below `proxy_parent` depth first, in one pass.
    ///
    /// `visit` returns whether to descend into the row's children. Nothing
    /// is visited if `proxy_parent` is valid but no longer maps to a row.
    pub fn walk<F>(&self, proxy_parent: &ModelIndex, mut visit: F)
    where
        F: FnMut(&ProjectedRow) -> bool,
    {
        let _span = PerfSpan::new("leaf_filter.walk");
        let mut pass = self.pass();
        let Some(source_parent) = pass.source_parent(proxy_parent) else {
            return;
        };
        let rows = pass.rows(&source_parent);
        pass.walk_rows(proxy_parent, &source_parent, rows, 0, &mut visit);
    }

    /// Maps a proxy index to a source index.
    pub fn map_to_source(&self, proxy_index: &ModelIndex) -> ModelIndex {
        if !proxy_index.is_valid() {
            return ModelIndex::invalid();
        }
        self.pass().map_to_source(proxy_index)
    }

    /// Maps a source index to a proxy index.
    ///
    /// Returns an invalid index if the row is hidden.
    pub fn map_from_source(&self, source_index: &ModelIndex) -> ModelIndex {
        if !source_index.is_valid() {
            return ModelIndex::invalid();
        }
        self.pass().map_from_source(source_index)
    }
}

/// One query over the source.
///
/// Holds a snapshot of the settings, so an item filter or comparator may read
/// the proxy again, and remembers each visibility it decides.
struct Pass<'a, S: SourceTree> {
    source: &'a S,
    criteria: Criteria<S>,
    decided: HashMap<ObjectId, bool>,
}

impl<'a, S: SourceTree> Pass<'a, S> {
    fn new(source: &'a S, criteria: Criteria<S>) -> Self {
        Self {
            source,
            criteria,
            decided: HashMap::new(),
        }
    }

    fn is_visible(&mut self, index: &ModelIndex) -> bool {
        let Some(object) = self.source.object(index) else {
            return false;
        };
        if let Some(&visible) = self.decided.get(&object) {
            return visible;
        }
        let visible = self.decide(index);
        self.decided.insert(object, visible);
        visible
    }

    fn decide(&mut self, index: &ModelIndex) -> bool {
        if !self.source.is_root_visible() && !self.source.parent(index).is_valid() {
            return true;
        }
        if let Some(item) = &self.criteria.item {
            if !item(self.source, index) {
                return false;
            }
        }
        self.self_matches(index) || self.has_accepted_children(index)
    }

    fn self_matches(&self, index: &ModelIndex) -> bool {
        if !self.criteria.types.accepts(self.source.object_kind(index)) {
            return false;
        }
        if self.criteria.text.is_empty() {
            return true;
        }
        let key = index.sibling_at_column(self.criteria.key_column);
        let text = self
            .source
            .data(&key, ItemRole::Display)
            .into_string()
            .unwrap_or_default();
        self.criteria.text.matches(&text)
    }

    fn has_accepted_children(&mut self, index: &ModelIndex) -> bool {
        let parent = index.sibling_at_column(0);
        (0..self.source.row_count(&parent)).any(|row| {
            let child = self.source.index(row, 0, &parent);
            child.is_valid() && self.is_visible(&child)
        })
    }

    /// Returns the visible source rows below `source_parent`, in projection order.
    fn rows(&mut self, source_parent: &ModelIndex) -> Vec<usize> {
        let mut rows: Vec<usize> = (0..self.source.row_count(source_parent))
            .filter(|&row| {
                let child = self.source.index(row, 0, source_parent);
                child.is_valid() && self.is_visible(&child)
            })
            .collect();
        self.sort(&mut rows, source_parent);
        rows
    }

    fn sort(&self, rows: &mut Vec<usize>, source_parent: &ModelIndex) {
        if let Some(compare) = &self.criteria.compare {
            rows.sort_by(|&a, &b| compare(self.source, a, b, source_parent));
        } else if let Some(column) = self.criteria.sort_column {
            let mut keyed: Vec<(ItemData, usize)> = rows
                .iter()
                .map(|&row| {
                    let cell = self.source.index(row, column, source_parent);
                    (self.source.data(&cell, ItemRole::Display), row)
                })
                .collect();
            let descending = self.criteria.sort_descending;
            keyed.sort_by(|(a, _), (b, _)| {
                let ordering = compare_item_data(a, b);
                if descending { ordering.reverse() } else { ordering }
            });
            *rows = keyed.into_iter().map(|(_, row)| row).collect();
        }
    }

    /// Maps a proxy parent to its source parent; `None` if it no longer maps.
    fn source_parent(&mut self, proxy_parent: &ModelIndex) -> Option<ModelIndex> {
        if !proxy_parent.is_valid() {
            return Some(ModelIndex::invalid());
        }
        let mapped = self.map_to_source(proxy_parent);
        mapped.is_valid().then_some(mapped)
    }

    fn map_to_source(&mut self, proxy_index: &ModelIndex) -> ModelIndex {
        let Some(source_parent) = self.source_parent(&proxy_index.parent()) else {
            return ModelIndex::invalid();
        };
        match self.rows(&source_parent).get(proxy_index.row()) {
            Some(&row) => self.source.index(row, proxy_index.column(), &source_parent),
            None => ModelIndex::invalid(),
        }
    }

    fn map_from_source(&mut self, source_index: &ModelIndex) -> ModelIndex {
        let Some(object) = self.source.object(source_index) else {
            return ModelIndex::invalid();
        };
        if !self.is_visible(&source_index.sibling_at_column(0)) {
            return ModelIndex::invalid();
        }

        let source_parent = self.source.parent(source_index);
        let proxy_parent = if source_parent.is_valid() {
            let mapped = self.map_from_source(&source_parent);
            if !mapped.is_valid() {
                return ModelIndex::invalid();
            }
            mapped
        } else {
            ModelIndex::invalid()
        };

        match self
            .rows(&source_parent)
            .iter()
            .position(|&row| row == source_index.row())
        {
            Some(proxy_row) => {
                ModelIndex::new(proxy_row, source_index.column(), proxy_parent, object)
            }
            None => ModelIndex::invalid(),
        }
    }

    fn collect_visible(&mut self, parent: &ModelIndex, out: &mut Vec<ModelIndex>) {
        for row in self.rows(parent) {
            let child = self.source.index(row, 0, parent);
            out.push(child.clone());
            self.collect_visible(&child, out);
        }
    }

    fn walk_rows<F>(
        &mut self,
        proxy_parent: &ModelIndex,
        source_parent: &ModelIndex,
        rows: Vec<usize>,
        depth: usize,
        visit: &mut F,
    ) where
        F: FnMut(&ProjectedRow) -> bool,
    {
        let count = rows.len();
        for (proxy_row, source_row) in rows.into_iter().enumerate() {
            let source_index = self.source.index(source_row, 0, source_parent);
            let Some(object) = self.source.object(&source_index) else {
                continue;
            };
            let children = self.rows(&source_index);
            let row = ProjectedRow {
                index: ModelIndex::new(proxy_row, 0, proxy_parent.clone(), object),
                depth,
                child_count: children.len(),
                is_last_child: proxy_row + 1 == count,
            };
            if visit(&row) && !children.is_empty() {
                self.walk_rows(&row.index, &source_index, children, depth + 1, visit);
            }
        }
    }
}

/// Compares two display values for sorting; empty cells sort first.
fn compare_item_data(a: &ItemData, b: &ItemData) -> Ordering {
    match (a, b) {
        (ItemData::String(a), ItemData::String(b)) => a.cmp(b),
        (ItemData::Kind(a), ItemData::Kind(b)) => a.cmp(b),
        (ItemData::None, ItemData::None) => Ordering::Equal,
        (ItemData::None, _) => Ordering::Less,
        (_, ItemData::None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

impl<S: SourceTree + 'static> ItemModel for LeafFilterProxyModel<S> {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        if parent.is_valid() && parent.column() != 0 {
            return 0;
        }
        let mut pass = self.pass();
        match pass.source_parent(parent) {
            Some(source_parent) => pass.rows(&source_parent).len(),
            None => 0,
        }
    }

    fn column_count(&self, parent: &ModelIndex) -> usize {
        self.source.column_count(&self.map_to_source(parent))
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        self.source.data(&self.map_to_source(index), role)
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        let mut pass = self.pass();
        let Some(source_parent) = pass.source_parent(parent) else {
            return ModelIndex::invalid();
        };
        if column >= self.source.column_count(&source_parent) {
            return ModelIndex::invalid();
        }
        let Some(&source_row) = pass.rows(&source_parent).get(row) else {
            return ModelIndex::invalid();
        };
        let source_index = self.source.index(source_row, column, &source_parent);
        match self.source.object(&source_index) {
            Some(object) => ModelIndex::new(row, column, parent.sibling_at_column(0), object),
            None => ModelIndex::invalid(),
        }
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        index.parent()
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn header_data(&self, section: usize, orientation: Orientation, role: ItemRole) -> ItemData {
        self.source.header_data(section, orientation, role)
    }
}

impl<S: SourceTree + 'static> SourceTree for LeafFilterProxyModel<S> {
    fn is_root_visible(&self) -> bool {
        self.source.is_root_visible()
    }

    fn object(&self, index: &ModelIndex) -> Option<ObjectId> {
        self.source.object(&self.map_to_source(index))
    }

    fn object_kind(&self, index: &ModelIndex) -> Option<ObjectKind> {
        self.source.object_kind(&self.map_to_source(index))
    }
}
