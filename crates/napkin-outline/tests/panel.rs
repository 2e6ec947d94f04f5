//! Integration tests for the outline panel and its configuration.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use napkin_outline::debug::OutlineTreeDebug;
use napkin_outline::document::Document;
use napkin_outline::model::{ModelIndex, NAME_COLUMN, OutlineModel};
use napkin_outline::outline::{OutlinePanel, TypeFilterBar};
use napkin_outline::{ObjectId, ObjectKind, OutlineConfig, OutlineError};
use napkin_outline_core::{TreeFormatOptions, TreeStyle};

struct Scene {
    doc: Arc<Document>,
    world: ObjectId,
    camera: ObjectId,
    transform: ObjectId,
    lamp: ObjectId,
    light: ObjectId,
    intensity: ObjectId,
}

fn scene() -> Scene {
    let doc = Arc::new(Document::new());
    let world = doc.add_entity(None, "World").unwrap();
    let camera = doc.add_entity(Some(world), "Camera").unwrap();
    let transform = doc.add_component(camera, "Transform").unwrap();
    let lamp = doc.add_entity(Some(world), "Lamp").unwrap();
    let light = doc.add_component(lamp, "Light").unwrap();
    let intensity = doc.add_attribute(light, "intensity", "0.8").unwrap();
    doc.add_resource("Shader").unwrap();
    Scene {
        doc,
        world,
        camera,
        transform,
        lamp,
        light,
        intensity,
    }
}

fn shown(panel: &OutlinePanel) -> Vec<ObjectId> {
    panel
        .visible_rows()
        .iter()
        .filter_map(|row| row.index.object())
        .collect()
}

#[test]
fn default_type_buttons() {
    let s = scene();
    let panel = OutlinePanel::new(s.doc.clone());
    assert_eq!(
        panel.type_filter_bar().types(),
        vec![ObjectKind::Entity, ObjectKind::Component, ObjectKind::Attribute]
    );
    assert_eq!(
        TypeFilterBar::tooltip(ObjectKind::Entity),
        "Show instances of Entity"
    );
}

#[test]
fn filter_then_expand_all() {
    let s = scene();
    let mut panel = OutlinePanel::new(s.doc.clone());
    panel.set_root(Some(s.world));
    panel.set_filter_types(&[ObjectKind::Attribute]);
    panel.expand_all();

    assert_eq!(shown(&panel), vec![s.world, s.lamp, s.light, s.intensity]);
    let depths: Vec<_> = panel.visible_rows().iter().map(|r| r.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 3]);

    panel.set_filter_types(&[]);
    assert_eq!(
        shown(&panel),
        vec![s.world, s.camera, s.lamp, s.light, s.intensity]
    );
}

#[test]
fn expansion_survives_filter_changes() {
    let s = scene();
    let mut panel = OutlinePanel::new(s.doc.clone());
    panel.set_root(Some(s.world));
    panel.expand(s.world, false);
    panel.expand(s.lamp, false);

    panel.set_filter_text("intens");
    panel.set_filter_text("");

    assert!(panel.expansion().is_object_expanded(s.world));
    assert!(panel.expansion().is_object_expanded(s.lamp));
    assert_eq!(shown(&panel), vec![s.world, s.camera, s.lamp, s.light]);
}

#[test]
fn selection_is_published_when_propagating() {
    let s = scene();
    let mut panel = OutlinePanel::new(s.doc.clone());
    panel.set_root(Some(s.world));
    panel.set_propagate_selection(true);

    let published = Arc::new(Mutex::new(Vec::new()));
    let p = published.clone();
    panel.selection_changed.connect(move |id| p.lock().push(*id));

    panel.expand(s.world, false);
    let rows = panel.visible_rows();
    panel.select_indices(&[rows[2].index.clone()]);

    assert_eq!(panel.selected_object(), Some(s.lamp));
    assert_eq!(*published.lock(), vec![Some(s.lamp)]);

    panel.set_root(Some(s.lamp));
    assert_eq!(*published.lock(), vec![Some(s.lamp), None]);
}

#[test]
fn reveal_added_component() {
    let s = scene();
    let mut panel = OutlinePanel::new(s.doc.clone());
    panel.set_root(Some(s.world));

    let shadow = s.doc.add_component(s.camera, "Shadow").unwrap();
    panel.select_and_reveal(shadow);

    assert_eq!(panel.selected_object(), Some(shadow));
    assert_eq!(
        shown(&panel),
        vec![s.world, s.camera, s.transform, shadow, s.lamp]
    );
}

#[test]
fn flattening_decides_each_row_once() {
    let doc = Arc::new(Document::new());
    let world = doc.add_entity(None, "World").unwrap();
    for n in 0..200 {
        let entity = doc.add_entity(Some(world), format!("entity{n}")).unwrap();
        doc.add_component(entity, "Transform").unwrap();
    }
    let mut panel = OutlinePanel::new(doc);
    panel.set_root(Some(world));
    panel.expand_all();

    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    panel
        .proxy()
        .set_item_filter(move |_: &OutlineModel, _: &ModelIndex| {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });

    assert_eq!(panel.visible_rows().len(), 401);
    assert_eq!(calls.load(Ordering::SeqCst), 401);
}

#[test]
fn sorted_and_filtered_rows() {
    let s = scene();
    let mut panel = OutlinePanel::new(s.doc.clone());
    panel.set_root(Some(s.world));
    panel.set_filter_types(&[ObjectKind::Entity]);
    panel.sort_by_column(NAME_COLUMN, true);
    panel.expand_all();

    assert_eq!(shown(&panel), vec![s.world, s.lamp, s.camera]);
}

#[test]
fn debug_dump_matches_panel_filter() {
    let s = scene();
    let mut panel = OutlinePanel::new(s.doc.clone());
    panel.set_root(Some(s.world));
    panel.set_filter_text("light");

    let options = TreeFormatOptions {
        style: TreeStyle::Ascii,
        ..TreeFormatOptions::minimal()
    };
    let text = OutlineTreeDebug::with_options(&**panel.proxy(), options).format();
    assert_eq!(text, "World\n`-- Lamp\n    `-- Light\n");
}

#[test]
fn config_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "root_visible = false").unwrap();
    writeln!(file, "case_sensitive = true").unwrap();
    writeln!(file, "enabled_types = [\"component\"]").unwrap();
    writeln!(file, "sort_column = 0").unwrap();
    writeln!(file, "sort_descending = true").unwrap();

    let config = OutlineConfig::load(file.path()).unwrap();
    assert!(!config.root_visible);
    assert!(config.case_sensitive);
    assert_eq!(config.enabled_types, vec![ObjectKind::Component]);
    assert_eq!(config.sort_column, Some(0));
    assert!(config.sort_descending);

    let s = scene();
    let mut panel = OutlinePanel::new(s.doc.clone()).with_config(&config);
    panel.set_root(Some(s.world));
    panel.expand_all();
    assert_eq!(shown(&panel), vec![s.lamp, s.light, s.camera, s.transform]);
}

#[test]
fn config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outline.json");
    std::fs::write(&path, r#"{ "propagate_selection": true, "filter_key_column": 1 }"#).unwrap();

    let config = OutlineConfig::load(&path).unwrap();
    assert!(config.propagate_selection);
    assert_eq!(config.filter_key_column, 1);
    assert!(config.root_visible);
}

#[test]
fn config_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        OutlineConfig::load(&missing),
        Err(OutlineError::Io { .. })
    ));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    match OutlineConfig::load(&broken) {
        Err(OutlineError::ConfigParse { path, .. }) => assert_eq!(path, Some(broken)),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
