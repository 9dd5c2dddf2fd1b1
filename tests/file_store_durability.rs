//! File store durability tests
//!
//! The `file://` backend keeps every document in a checksummed append-only
//! log. Documents must survive a reopen in insertion order, and a damaged
//! log must be refused rather than partially served.

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;
use url::Url;

use weebtours::models::{Booking, Tour};
use weebtours::storage::{
    Database, DocumentStore, Entity, FileStore, Filter, LogReader, StoreError,
};

// =============================================================================
// Test Utilities
// =============================================================================

fn store_url(dir: &TempDir) -> String {
    Url::from_directory_path(dir.path()).unwrap().to_string()
}

fn tour(name: &str) -> Tour {
    Tour {
        name: name.to_string(),
        destination: "Akihabara".to_string(),
        start_date: "2025-08-15".to_string(),
        duration_days: 2,
        price: 350.0,
        summary: "Comiket weekend".to_string(),
        highlights: Some(vec!["Comiket".to_string()]),
        cover_image: None,
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Review {
    stars: u8,
}

impl Entity for Review {
    const COLLECTION: &'static str = "review";
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_documents_survive_reopen_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let url = store_url(&temp_dir);

    let ids: Vec<String> = {
        let db = Database::connect(&url, "weebtours").unwrap();
        ["Kyoto", "Osaka", "Nara"]
            .iter()
            .map(|name| db.collection::<Tour>().insert(&tour(name)).unwrap())
            .collect()
    };

    let db = Database::connect(&url, "weebtours").unwrap();
    let tours = db.collection::<Tour>().find(&Filter::all(), None).unwrap();

    let reopened_ids: Vec<&str> = tours.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(reopened_ids, ids.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(tours[1].record, tour("Osaka"));
}

#[test]
fn test_collections_share_one_log() {
    let temp_dir = TempDir::new().unwrap();
    let url = store_url(&temp_dir);

    {
        let db = Database::connect(&url, "weebtours").unwrap();
        db.collection::<Tour>().insert(&tour("Tokyo")).unwrap();
        db.create_document("booking", json!({"tour_id": "t", "full_name": "Yui", "email": "y@k.on"}))
            .unwrap();
        db.collection::<Review>().insert(&Review { stars: 5 }).unwrap();
    }

    let log = FileStore::log_path(temp_dir.path(), "weebtours");
    let records = LogReader::open(&log).unwrap().read_all().unwrap();
    let collections: Vec<&str> = records.iter().map(|r| r.collection.as_str()).collect();
    assert_eq!(collections, vec!["tour", "booking", "review"]);

    let store = FileStore::open(temp_dir.path(), "weebtours").unwrap();
    assert_eq!(
        store.list_collection_names().unwrap(),
        vec!["booking", "review", "tour"]
    );

    let db = Database::connect(&url, "weebtours").unwrap();
    let bookings = db.collection::<Booking>().find(&Filter::all(), None).unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].record.travelers, 1);
}

#[test]
fn test_limit_and_filter_after_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let url = store_url(&temp_dir);

    {
        let db = Database::connect(&url, "weebtours").unwrap();
        for name in ["A", "B", "C", "B"] {
            db.collection::<Tour>().insert(&tour(name)).unwrap();
        }
    }

    let db = Database::connect(&url, "weebtours").unwrap();
    let tours = db.collection::<Tour>();
    assert_eq!(tours.find(&Filter::all(), Some(2)).unwrap().len(), 2);
    assert_eq!(tours.find(&Filter::all().eq("name", "B"), None).unwrap().len(), 2);
}

// =============================================================================
// Corruption
// =============================================================================

#[test]
fn test_corrupted_log_refuses_to_open() {
    let temp_dir = TempDir::new().unwrap();
    let url = store_url(&temp_dir);

    {
        let db = Database::connect(&url, "weebtours").unwrap();
        db.collection::<Tour>().insert(&tour("Kyoto")).unwrap();
    }

    let log = FileStore::log_path(temp_dir.path(), "weebtours");
    let mut contents = fs::read(&log).unwrap();
    let mid = contents.len() / 2;
    contents[mid] ^= 0xFF;
    fs::write(&log, contents).unwrap();

    match Database::connect(&url, "weebtours") {
        Err(err @ StoreError::Corruption { .. }) => {
            assert!(err.to_string().to_lowercase().contains("checksum"));
        }
        Err(other) => panic!("expected corruption, got {}", other),
        Ok(_) => panic!("corrupted log must not open"),
    }

    // Startup keeps running with the handle unset
    let db = Database::from_settings(Some(&url), Some("weebtours"));
    assert!(!db.is_available());
}

#[test]
fn test_torn_tail_refuses_to_open() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = FileStore::open(temp_dir.path(), "weebtours").unwrap();
        let db = Database::new(std::sync::Arc::new(store));
        db.collection::<Tour>().insert(&tour("Kyoto")).unwrap();
        db.collection::<Tour>().insert(&tour("Osaka")).unwrap();
    }

    let log = FileStore::log_path(temp_dir.path(), "weebtours");
    let contents = fs::read(&log).unwrap();
    fs::write(&log, &contents[..contents.len() - 7]).unwrap();

    let err = FileStore::open(temp_dir.path(), "weebtours").err().unwrap();
    assert!(err.is_corruption());
}
