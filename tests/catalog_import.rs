//! Price-sheet import and catalog storage against a real SQLite database.

use std::fs;

use pc_build_advisor::{Catalog, Category, Resolution, UserProfile, build_recommendations, db, import};
use rusqlite::Connection;

fn memory_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

const GPU_SHEET: &str = r#"{
    "components": [
        {"id": "gpu-7600", "name": "RX 7600", "category": "GPU", "price": "$1.350.000", "performance": 105, "tags": ["ray-tracing"]},
        {"id": "gpu-a380", "name": "Arc A380", "category": "gpu", "price": 650000, "performance": 45}
    ],
    "requirements": {"Starfield": 140}
}"#;

#[test]
fn imports_sheets_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gpus.json"), GPU_SHEET).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(
        dir.path().join("nested").join("broken.json"),
        r#"{"components": [{"id": "x", "name": "X", "category": "Sound card", "price": 1, "performance": 1}]}"#,
    )
    .unwrap();
    fs::write(dir.path().join("empty.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a sheet").unwrap();

    let conn = memory_db();
    let stats = import::import_directory(&conn, dir.path()).unwrap();

    assert_eq!(stats.files, 3);
    assert_eq!(stats.components, 2);
    assert_eq!(stats.requirements, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.errors, 1);

    let catalog = db::load_catalog(&conn).unwrap();
    assert_eq!(catalog.components().len(), 2);
    assert_eq!(catalog.by_id("gpu-7600").map(|c| c.price), Some(1_350_000));
    assert!(catalog.by_id("x").is_none(), "failed sheet must not be written");
    assert_eq!(catalog.requirement("Starfield"), Some(140));
}

#[test]
fn imported_parts_extend_the_sample_catalog() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gpus.json"), GPU_SHEET).unwrap();

    let mut conn = memory_db();
    db::store_catalog(&mut conn, &Catalog::builtin()).unwrap();
    import::import_directory(&conn, dir.path()).unwrap();

    let catalog = db::load_catalog(&conn).unwrap();
    assert_eq!(catalog.components().len(), Catalog::builtin().components().len() + 2);

    let gpus: Vec<&str> = catalog.in_category(Category::Gpu).map(|c| c.id.as_str()).collect();
    assert_eq!(gpus.last(), Some(&"gpu-a380"));

    let profile = UserProfile {
        use_cases: ["gaming".to_string()].into(),
        selected_games: ["Starfield".to_string()].into(),
        budget: 4_000_000,
        resolution: Resolution::Fhd,
        ..UserProfile::default()
    };
    let recs = build_recommendations(&catalog, &profile).unwrap();
    for rec in &recs {
        assert!(rec.selection.total_spent <= rec.tier.ceiling);
    }
}

#[test]
fn reimport_updates_price_in_place() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gpus.json"), GPU_SHEET).unwrap();
    let conn = memory_db();
    import::import_directory(&conn, dir.path()).unwrap();

    fs::write(dir.path().join("gpus.json"), GPU_SHEET.replace("$1.350.000", "1,199,000 COP")).unwrap();
    import::import_directory(&conn, dir.path()).unwrap();

    let catalog = db::load_catalog(&conn).unwrap();
    assert_eq!(catalog.components().len(), 2);
    assert_eq!(catalog.components()[0].id, "gpu-7600");
    assert_eq!(catalog.components()[0].price, 1_199_000);
}

#[test]
fn blank_requirement_title_skips_the_sheet() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.json"),
        r#"{"requirements": {"": 10, "Doom": 70}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.json"), GPU_SHEET).unwrap();

    let conn = memory_db();
    let stats = import::import_directory(&conn, dir.path()).unwrap();
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.requirements, 1);

    let catalog = db::load_catalog(&conn).expect("catalog stays loadable");
    assert_eq!(catalog.requirement("Doom"), None);
    assert_eq!(catalog.requirement("Starfield"), Some(140));
}

#[test]
fn oversized_price_skips_whole_sheet_and_later_sheets_still_import() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.json"),
        r#"{"components": [
            {"id": "ok", "name": "OK", "category": "Case", "price": 100, "performance": 10},
            {"id": "big", "name": "Big", "category": "Case", "price": 18446744073709551615, "performance": 10}
        ]}"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.json"), r#"{"requirements": {"Doom": 70}}"#).unwrap();

    let conn = memory_db();
    let stats = import::import_directory(&conn, dir.path()).unwrap();
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.components, 0);
    assert_eq!(stats.requirements, 1);

    let catalog = db::load_catalog(&conn).unwrap();
    assert!(catalog.by_id("ok").is_none());
    assert_eq!(catalog.requirement("Doom"), Some(70));
}

#[test]
fn failed_store_rolls_back_the_sheet() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.json"), GPU_SHEET).unwrap();
    fs::write(
        dir.path().join("b.json"),
        r#"{"components": [{"id": "case-mid", "name": "Mid Tower", "category": "Case", "price": 210000, "performance": 15}]}"#,
    )
    .unwrap();

    let conn = memory_db();
    // components can be written but requirements cannot
    conn.execute_batch("DROP TABLE requirements;").unwrap();

    let stats = import::import_directory(&conn, dir.path()).unwrap();
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.components, 1);

    let ids: Vec<String> = conn
        .prepare("SELECT id FROM components ORDER BY rowid")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(ids, vec!["case-mid".to_string()]);
}
