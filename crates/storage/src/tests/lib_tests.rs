use super::*;
use chrono::Utc;
use shared::{
    domain::{Alignment, GridId, RowId, TemplateId},
    protocol::GridRowRecord,
};

fn ids(raw: &[&str]) -> Vec<ProductId> {
    raw.iter().map(|id| ProductId::from(*id)).collect()
}

fn sample_grid(name: &str) -> GridRecord {
    GridRecord {
        id: GridId::generate(),
        name: name.to_string(),
        rows: vec![GridRowRecord {
            id: RowId::generate(),
            template_id: TemplateId::from("template_002"),
            products: ids(&["prod_001", "prod_002"]),
        }],
        created_at: Utc::now(),
    }
}

async fn stores() -> Vec<(&'static str, Arc<dyn GridStore>)> {
    let sqlite = SqliteGridStore::new("sqlite::memory:").await.expect("db");
    vec![
        ("memory", Arc::new(MemoryGridStore::seeded()) as Arc<dyn GridStore>),
        ("sqlite", Arc::new(sqlite) as Arc<dyn GridStore>),
    ]
}

#[tokio::test]
async fn products_come_back_in_catalog_order_without_unknown_ids() {
    for (label, store) in stores().await {
        let products = store
            .products_by_ids(&ids(&["prod_003", "nope", "prod_001"]))
            .await
            .expect("products");
        let returned: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(returned, vec!["prod_001", "prod_003"], "{label}");
        assert_eq!(products[0].price.currency, "EUR", "{label}");
    }
}

#[tokio::test]
async fn empty_id_list_matches_nothing() {
    for (label, store) in stores().await {
        let products = store.products_by_ids(&[]).await.expect("products");
        assert!(products.is_empty(), "{label}");
    }
}

#[tokio::test]
async fn templates_are_the_three_builtin_alignments() {
    for (label, store) in stores().await {
        let templates = store.list_templates().await.expect("templates");
        let alignments: Vec<Alignment> = templates.iter().map(|t| t.alignment).collect();
        assert_eq!(alignments, Alignment::ALL.to_vec(), "{label}");
        assert_eq!(templates[0].id.as_str(), "template_001", "{label}");
    }
}

#[tokio::test]
async fn grids_are_listed_in_insertion_order() {
    for (label, store) in stores().await {
        let first = store.insert_grid(sample_grid("first")).await.expect("first");
        let second = store
            .insert_grid(sample_grid("second"))
            .await
            .expect("second");

        let grids = store.list_grids().await.expect("grids");
        assert_eq!(grids.len(), 2, "{label}");
        assert_eq!(grids[0].id, first.id, "{label}");
        assert_eq!(grids[1].id, second.id, "{label}");
        assert_eq!(grids[1].rows, second.rows, "{label}");
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let store = SqliteGridStore::new("sqlite::memory:").await.expect("db");
    store.health_check().await.expect("health check");
}

#[tokio::test]
async fn sqlite_file_store_survives_reopen() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("grids.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let store = SqliteGridStore::new(&database_url).await.expect("db");
    let saved = store.insert_grid(sample_grid("kept")).await.expect("insert");
    drop(store);
    assert!(db_path.exists(), "database file should exist: {}", db_path.display());

    let reopened = SqliteGridStore::new(&database_url).await.expect("reopen");
    let grids = reopened.list_grids().await.expect("grids");
    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].id, saved.id);
    assert_eq!(grids[0].name, "kept");

    let templates = reopened.list_templates().await.expect("templates");
    assert_eq!(templates.len(), 3, "seeding is idempotent");
}

#[tokio::test]
async fn open_store_defaults_to_memory() {
    let store = open_store(None).await.expect("store");
    assert!(store.list_grids().await.expect("grids").is_empty());
    assert_eq!(
        store
            .products_by_ids(&ids(&["prod_010"]))
            .await
            .expect("products")[0]
            .name,
        "Sneakers"
    );
}
