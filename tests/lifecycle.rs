//! End-to-end lifecycle against the filesystem backend.

use blogadmin::api::{BlogApi, ListFilter};
use blogadmin::clock::ManualClock;
use blogadmin::ids::UuidGenerator;
use blogadmin::model::{BlogStatus, NewRecord};
use blogadmin::retention::RetentionPolicy;
use blogadmin::store::fs_backend::FsBackend;
use blogadmin::store::RecordStore;
use chrono::{Duration, TimeZone, Utc};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, ManualClock, BlogApi<FsBackend, ManualClock, UuidGenerator>) {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    let store = RecordStore::with_backend(FsBackend::new(dir.path())).with_clock(clock.clone());
    (dir, clock, BlogApi::new(store))
}

#[test]
fn hello_is_created_deleted_and_purged() {
    let (_dir, clock, api) = setup();

    let created = api.create_post(NewRecord::titled("Hello")).unwrap();
    let id = created.affected_records[0].record.id.clone();

    let loaded = api.store().load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, id);
    assert_eq!(loaded[0].status, BlogStatus::Draft);
    assert!(!loaded[0].is_deleted);

    api.delete_post(&id).unwrap();
    let loaded = api.store().load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].is_deleted);

    clock.advance(Duration::days(8));
    assert!(api.store().load().unwrap().is_empty());
    // Durable: the file itself no longer holds the record.
    assert!(api.store().read().unwrap().is_empty());
}

#[test]
fn purge_happens_exactly_at_the_window() {
    let (_dir, clock, api) = setup();
    let id = api.create_post(NewRecord::titled("edge")).unwrap().affected_records[0]
        .record
        .id
        .clone();
    api.delete_post(&id).unwrap();

    clock.advance(Duration::days(7) - Duration::seconds(1));
    assert_eq!(api.store().load().unwrap().len(), 1);

    clock.advance(Duration::seconds(1));
    assert!(api.store().load().unwrap().is_empty());
}

#[test]
fn active_posts_survive_any_amount_of_time() {
    let (_dir, clock, api) = setup();
    api.create_post(NewRecord::titled("evergreen")).unwrap();

    clock.advance(Duration::days(3650));
    assert_eq!(api.store().load().unwrap().len(), 1);
}

#[test]
fn collection_file_is_camel_case_json() {
    let (dir, _clock, api) = setup();
    api.create_post(NewRecord::titled("shape")).unwrap();

    let raw = fs::read_to_string(dir.path().join("blogs.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["title"], "shape");
    assert_eq!(first["isDeleted"], false);
    assert_eq!(first["status"], "draft");
    assert_eq!(first["createdAt"], "2024-03-01T12:00:00Z");
}

#[test]
fn corrupt_file_reads_as_empty_and_next_create_replaces_it() {
    let (dir, _clock, api) = setup();
    fs::write(dir.path().join("blogs.json"), "not json at all").unwrap();

    let listing = api.list_posts(ListFilter::default()).unwrap();
    assert!(listing.listed_records.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("blogs.json")).unwrap(),
        "not json at all"
    );

    api.create_post(NewRecord::titled("fresh")).unwrap();
    assert_eq!(api.store().load().unwrap().len(), 1);
}

#[test]
fn records_written_by_another_client_are_read() {
    let (dir, clock, api) = setup();
    let raw = r#"[
        {"id":"a","title":"Old","description":"","category":"","author":"","publishDate":"","status":"published","createdAt":"2024-02-01T00:00:00.000Z","isDeleted":false},
        {"id":"b","title":"Binned","description":"","category":"","author":"","publishDate":"2024-02-02","status":"draft","createdAt":"2024-02-01T00:00:00.000Z","isDeleted":true,"deletedAt":"2024-02-27T12:00:00.000Z"}
    ]"#;
    fs::write(dir.path().join("blogs.json"), raw).unwrap();

    let loaded = api.store().load().unwrap();
    assert_eq!(loaded.len(), 2);

    // 2024-02-27T12:00 + 7 days = 2024-03-05T12:00
    clock.advance(Duration::days(4));
    let loaded = api.store().load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "a");
}

#[test]
fn custom_retention_window() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    let store = RecordStore::with_backend(FsBackend::new(dir.path()))
        .with_clock(clock.clone())
        .with_retention(RetentionPolicy::days(2));
    let api = BlogApi::new(store);

    let id = api.create_post(NewRecord::titled("short")).unwrap().affected_records[0]
        .record
        .id
        .clone();
    api.delete_post(&id).unwrap();

    clock.advance(Duration::days(2));
    assert!(api.store().load().unwrap().is_empty());
}

#[test]
fn blank_deletion_time_purges_only_that_post() {
    let (dir, _clock, api) = setup();
    let raw = r#"[
        {"id":"a","title":"Stays","createdAt":"2024-02-01T00:00:00.000Z","isDeleted":false},
        {"id":"b","title":"Gone","createdAt":"2024-02-01T00:00:00.000Z","isDeleted":true,"deletedAt":""}
    ]"#;
    fs::write(dir.path().join("blogs.json"), raw).unwrap();

    api.create_post(NewRecord::titled("Added")).unwrap();

    let titles: Vec<String> = api
        .store()
        .read()
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["Stays", "Added"]);
}

#[test]
fn unreadable_collection_is_an_error_and_left_alone() {
    let (dir, _clock, api) = setup();
    // A directory where the collection file should be cannot be read.
    fs::create_dir(dir.path().join("blogs.json")).unwrap();

    assert!(api.store().load().is_err());
    assert!(api.create_post(NewRecord::titled("Nope")).is_err());
    assert!(api.list_posts(ListFilter::default()).is_err());
    assert!(dir.path().join("blogs.json").is_dir());
}
