//! Integration tests for the leaf filter over a document outline.

use std::sync::Arc;

use napkin_outline::document::Document;
use napkin_outline::model::{ItemModel, LeafFilterProxyModel, ModelIndex, OutlineModel};
use napkin_outline::{ObjectId, ObjectKind};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn outline(doc: &Arc<Document>, root: ObjectId) -> (Arc<OutlineModel>, LeafFilterProxyModel<OutlineModel>) {
    let model = Arc::new(OutlineModel::new(doc.clone()));
    model.set_root(Some(root));
    let proxy = LeafFilterProxyModel::new(model.clone());
    (model, proxy)
}

fn visible(model: &OutlineModel, proxy: &LeafFilterProxyModel<OutlineModel>, id: ObjectId) -> bool {
    proxy.is_row_visible(&model.index_for_object(id))
}

#[test]
fn lig_scenario_keeps_owner_of_match() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let foo = doc.add_entity(Some(root), "Foo").unwrap();
    let bar = doc.add_entity(Some(root), "Bar").unwrap();
    let light = doc.add_component(bar, "Light").unwrap();
    let (model, proxy) = outline(&doc, root);

    proxy.set_text_filter("Lig", false);

    assert!(visible(&model, &proxy, bar));
    assert!(visible(&model, &proxy, light));
    assert!(!visible(&model, &proxy, foo));

    model.set_root_visible(false);
    assert!(visible(&model, &proxy, root));
    assert!(!visible(&model, &proxy, foo));
}

#[test]
fn ancestors_of_visible_rows_are_visible() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "World").unwrap();
    let mut chain = vec![root];
    for depth in 0..5 {
        let parent = *chain.last().unwrap();
        chain.push(doc.add_entity(Some(parent), format!("level{depth}")).unwrap());
    }
    let leaf = doc
        .add_component(*chain.last().unwrap(), "Needle")
        .unwrap();
    doc.add_entity(Some(chain[2]), "Sibling").unwrap();
    let (model, proxy) = outline(&doc, root);

    proxy.set_text_filter("Needle", true);

    assert!(visible(&model, &proxy, leaf));
    for &id in &chain {
        assert!(visible(&model, &proxy, id));
    }

    for index in proxy.visible_indices() {
        let mut parent = model.parent(&index);
        while parent.is_valid() {
            assert!(proxy.is_row_visible(&parent));
            parent = model.parent(&parent);
        }
    }
}

#[test]
fn empty_filters_show_everything() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let a = doc.add_entity(Some(root), "A").unwrap();
    let b = doc.add_component(a, "B").unwrap();
    let c = doc.add_attribute(b, "C", "1").unwrap();
    let (model, proxy) = outline(&doc, root);

    proxy.set_text_filter("", true);
    proxy.set_type_filter(Vec::new());

    for id in [root, a, b, c] {
        assert!(visible(&model, &proxy, id));
    }
    assert_eq!(proxy.visible_indices().len(), 4);
}

#[test]
fn item_filter_veto_beats_matching_child() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let a = doc.add_entity(Some(root), "A").unwrap();
    let b = doc.add_entity(Some(a), "B").unwrap();
    let (model, proxy) = outline(&doc, root);

    proxy.set_item_filter(move |model: &OutlineModel, index: &ModelIndex| {
        napkin_outline::model::SourceTree::object(model, index) != Some(a)
    });
    proxy.set_text_filter("B", true);

    assert!(!visible(&model, &proxy, a));
    assert!(visible(&model, &proxy, b));
    assert!(!visible(&model, &proxy, root));
}

#[test]
fn type_filter_restricts_self_matches() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let lamp = doc.add_entity(Some(root), "Lamp").unwrap();
    let light = doc.add_component(lamp, "Light").unwrap();
    let color = doc.add_attribute(light, "color", "white").unwrap();
    let texture = doc.add_resource("LampTexture").unwrap();
    let (model, proxy) = outline(&doc, root);

    proxy.set_type_filter([ObjectKind::Component]);
    proxy.set_text_filter("L", true);

    assert!(visible(&model, &proxy, light));
    assert!(visible(&model, &proxy, lamp));
    assert!(!visible(&model, &proxy, color));
    assert!(!model.index_for_object(texture).is_valid());
}

#[test]
fn case_sensitivity() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let camera = doc.add_entity(Some(root), "MainCamera").unwrap();
    let (model, proxy) = outline(&doc, root);

    proxy.set_text_filter("camera", false);
    assert!(visible(&model, &proxy, camera));

    proxy.set_text_filter("camera", true);
    assert!(!visible(&model, &proxy, camera));

    proxy.set_text_filter("Camera", true);
    assert!(visible(&model, &proxy, camera));
}

#[test]
fn repeated_queries_agree() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let foo = doc.add_entity(Some(root), "Foo").unwrap();
    let bar = doc.add_entity(Some(root), "Bar").unwrap();
    doc.add_component(bar, "Light").unwrap();
    let (model, proxy) = outline(&doc, root);
    proxy.set_text_filter("Lig", true);

    for id in [root, foo, bar] {
        let first = visible(&model, &proxy, id);
        for _ in 0..3 {
            assert_eq!(visible(&model, &proxy, id), first);
        }
    }
}

#[test]
fn document_edits_are_seen_without_invalidation() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let foo = doc.add_entity(Some(root), "Foo").unwrap();
    let (model, proxy) = outline(&doc, root);
    proxy.set_text_filter("Light", true);
    assert!(!visible(&model, &proxy, foo));

    let light = doc.add_component(foo, "Light").unwrap();
    assert!(visible(&model, &proxy, foo));

    doc.rename(light, "Shadow").unwrap();
    assert!(!visible(&model, &proxy, foo));
}

#[test]
fn stale_rows_are_hidden() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    let foo = doc.add_entity(Some(root), "Foo").unwrap();
    let (model, proxy) = outline(&doc, root);
    let stale = model.index_for_object(foo);

    doc.remove(foo);

    assert!(!proxy.is_row_visible(&stale));
    assert!(!model.index_for_object(foo).is_valid());
    assert!(!proxy.map_from_source(&stale).is_valid());
    assert_eq!(proxy.row_count(&proxy.index(0, 0, &ModelIndex::invalid())), 0);
}

#[test]
fn projection_round_trips() {
    setup();
    let doc = Arc::new(Document::new());
    let root = doc.add_entity(None, "Root").unwrap();
    for name in ["Alpha", "Beta", "Gamma", "Delta"] {
        let entity = doc.add_entity(Some(root), name).unwrap();
        doc.add_component(entity, format!("{name}Light")).unwrap();
    }
    let (_model, proxy) = outline(&doc, root);
    proxy.set_text_filter("^(Beta|Delta)", true);

    let top = proxy.index(0, 0, &ModelIndex::invalid());
    assert_eq!(proxy.row_count(&top), 2);

    let names: Vec<_> = (0..proxy.row_count(&top))
        .map(|row| proxy.display_text(&proxy.index(row, 0, &top)).unwrap())
        .collect();
    assert_eq!(names, vec!["Beta", "Delta"]);

    for index in proxy.visible_indices() {
        let mapped = proxy.map_from_source(&index);
        assert!(mapped.is_valid());
        assert_eq!(proxy.map_to_source(&mapped), index);
    }
}
