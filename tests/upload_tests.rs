use std::cell::RefCell;

use pretty_assertions::assert_eq;

use casesheet::state::column::{Column, ColumnKind, FileRef};
use casesheet::state::ids::Id;
use casesheet::state::mode::TableConfig;
use casesheet::state::row::Row;
use casesheet::state::table_state::TableState;
use casesheet::state::upload::{
    file_url, upload_batch, FileUploader, PendingFile, UploadError, UploadProgress,
};

/// Uploader that rejects one file name and records every attempt.
struct FlakyStore {
    reject: &'static str,
    attempts: RefCell<Vec<String>>,
}

impl FlakyStore {
    fn rejecting(reject: &'static str) -> Self {
        Self {
            reject,
            attempts: RefCell::new(Vec::new()),
        }
    }
}

impl FileUploader for FlakyStore {
    async fn upload(&self, file: &PendingFile) -> Result<FileRef, UploadError> {
        self.attempts.borrow_mut().push(file.name.clone());
        if file.name == self.reject {
            return Err(UploadError::Rejected {
                name: file.name.clone(),
                reason: "quota exceeded".to_string(),
            });
        }
        Ok(FileRef {
            id: format!("id-{}", file.name),
            name: file.name.clone(),
            bucket: "attachments".to_string(),
        })
    }
}

fn pending(names: &[&str]) -> Vec<PendingFile> {
    names
        .iter()
        .map(|name| PendingFile::from_path(format!("/tmp/uploads/{name}")))
        .collect()
}

#[tokio::test]
async fn test_failed_upload_stops_the_batch() {
    let store = FlakyStore::rejecting("b.txt");
    let mut progress = Vec::new();

    let outcome = upload_batch(&store, pending(&["a.txt", "b.txt", "c.txt"]), |p| progress.push(p)).await;

    assert_eq!(outcome.uploaded.len(), 1);
    assert_eq!(outcome.uploaded[0].name, "a.txt");
    assert_eq!(outcome.discarded, 1);
    assert!(!outcome.is_complete());
    let failure = outcome.failure.as_ref().unwrap();
    assert_eq!(failure.name, "b.txt");
    assert!(matches!(failure.error, UploadError::Rejected { .. }));
    assert_eq!(*store.attempts.borrow(), vec!["a.txt", "b.txt"]);
    assert_eq!(
        progress,
        vec![
            UploadProgress {
                index: 0,
                total: 3,
                name: "a.txt".to_string()
            },
            UploadProgress {
                index: 1,
                total: 3,
                name: "b.txt".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_partial_batch_registers_uploaded_files() {
    let store = FlakyStore::rejecting("b.txt");
    let row = Row::new(Id(1), 1, 6).with_columns(vec![Column::new(
        Id(2),
        ColumnKind::MultipleFiles { files: Vec::new() },
    )]);
    let mut state = TableState::from_parts(vec![row], TableConfig::default());

    let outcome = upload_batch(&store, pending(&["a.txt", "b.txt", "c.txt"]), |_| {}).await;
    state.attach_files(Id(2), outcome.uploaded).unwrap();

    let files = state.column(0, 0).and_then(Column::files).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].id, "id-a.txt");
}

#[tokio::test]
async fn test_complete_batch_uploads_in_order() {
    let store = FlakyStore::rejecting("none");

    let outcome = upload_batch(&store, pending(&["one.png", "two.png"]), |_| {}).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.discarded, 0);
    let names: Vec<&str> = outcome.uploaded.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["one.png", "two.png"]);
}

#[tokio::test]
async fn test_empty_batch_does_nothing() {
    let store = FlakyStore::rejecting("none");

    let outcome = upload_batch(&store, Vec::new(), |_| panic!("no progress expected")).await;

    assert!(outcome.is_complete());
    assert!(outcome.uploaded.is_empty());
    assert!(store.attempts.borrow().is_empty());
}

#[test]
fn test_pending_file_takes_file_name() {
    let file = PendingFile::from_path("/home/tester/logs/run 1.txt");
    assert_eq!(file.name, "run 1.txt");
}

#[test]
fn test_file_url_joins_endpoint_bucket_and_name() {
    let file = FileRef {
        id: "1".to_string(),
        name: "1-shot.png".to_string(),
        bucket: "attachments".to_string(),
    };
    assert_eq!(
        file_url("https://files.example.com/", &file),
        "https://files.example.com/attachments/1-shot.png"
    );
    assert_eq!(file_url("file:///data", &file), "file:///data/attachments/1-shot.png");
}
