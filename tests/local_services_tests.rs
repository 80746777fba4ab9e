use std::path::Path;

use pretty_assertions::assert_eq;

use casesheet::io::local_services::{LocalFileStore, LocalTagCatalog};
use casesheet::state::reference::{values_or_empty, ReferenceError, ReferenceResolver, TagValueStatus};
use casesheet::state::upload::{upload_batch, FileUploader, PendingFile, UploadError};

const CATALOG: &str = r#"{
    "tags": [
        {
            "id": 1,
            "name": "Priority",
            "values": [
                { "id": 10, "name": "High" },
                { "id": 11, "name": "Legacy", "commentary": "no longer used", "status": "archived" }
            ]
        },
        { "id": 2, "name": "Component", "projects": ["checkout"], "values": [ { "id": 20, "name": "Cart" } ] },
        { "id": 3, "name": "Browser", "projects": ["mobile"] }
    ]
}"#;

fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("tags.json");
    std::fs::write(&path, CATALOG).unwrap();
    path
}

#[tokio::test]
async fn test_tags_are_scoped_to_project() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = LocalTagCatalog::new(Some(write_catalog(dir.path())));

    let tags = catalog.tags_for_project("checkout").await.unwrap();

    let names: Vec<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(names, vec!["Priority", "Component"]);
}

#[tokio::test]
async fn test_archived_values_are_listed_but_not_selectable() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = LocalTagCatalog::new(Some(write_catalog(dir.path())));

    let values = catalog.values_for_reference(1).await.unwrap();

    assert_eq!(values.values.len(), 2);
    let legacy = values.find(11).unwrap();
    assert_eq!(legacy.status, TagValueStatus::Archived);
    assert_eq!(legacy.commentary.as_deref(), Some("no longer used"));
    let selectable: Vec<u64> = values.selectable().map(|value| value.id).collect();
    assert_eq!(selectable, vec![10]);
}

#[tokio::test]
async fn test_unknown_tag_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = LocalTagCatalog::new(Some(write_catalog(dir.path())));

    let err = catalog.values_for_reference(99).await.unwrap_err();

    assert!(matches!(err, ReferenceError::UnknownTag(99)));
}

#[tokio::test]
async fn test_missing_catalog_degrades_to_empty_values() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = LocalTagCatalog::new(Some(dir.path().join("absent.json")));

    let (values, error) = values_or_empty(&catalog, 1).await;

    assert!(values.values.is_empty());
    assert!(matches!(error, Some(ReferenceError::Unavailable(_))));
}

#[tokio::test]
async fn test_unconfigured_catalog_has_no_tags() {
    let catalog = LocalTagCatalog::default();
    assert!(catalog.tags_for_project("checkout").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_store_copies_into_bucket() {
    let source_dir = tempfile::tempdir().unwrap();
    let store_dir = tempfile::tempdir().unwrap();
    let source = source_dir.path().join("evidence.txt");
    std::fs::write(&source, "step 3 failed").unwrap();
    let store = LocalFileStore::new(store_dir.path(), "attachments");

    let stored = store.upload(&PendingFile::from_path(&source)).await.unwrap();

    assert_eq!(stored.bucket, "attachments");
    assert!(stored.name.ends_with("-evidence.txt"));
    assert!(stored.name.starts_with(&stored.id));
    let copied = store.stored_path(&stored);
    assert_eq!(std::fs::read_to_string(copied).unwrap(), "step 3 failed");
    assert!(store.endpoint().starts_with("file://"));
}

#[tokio::test]
async fn test_file_store_reports_missing_source() {
    let store_dir = tempfile::tempdir().unwrap();
    let store = LocalFileStore::new(store_dir.path(), "attachments");
    let present = store_dir.path().join("present.txt");
    std::fs::write(&present, "ok").unwrap();
    let files = vec![
        PendingFile::from_path(&present),
        PendingFile::from_path(store_dir.path().join("gone.txt")),
        PendingFile::from_path(&present),
    ];

    let outcome = upload_batch(&store, files, |_| {}).await;

    assert_eq!(outcome.uploaded.len(), 1);
    assert_eq!(outcome.discarded, 1);
    let failure = outcome.failure.unwrap();
    assert_eq!(failure.name, "gone.txt");
    assert!(matches!(failure.error, UploadError::Io { .. }));
}
