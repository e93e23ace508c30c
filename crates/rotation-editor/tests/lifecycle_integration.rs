//! End-to-end tests of `PageLifecycle` over the real file system adapters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rotation_core::{MissingEntryPolicy, PageStatus, ROTATOR_PAGE, RUBBISH_DIR};
use rotation_editor::application::{ErrorKind, PageLifecycle};
use rotation_editor::infrastructure::{FsPageDirectory, JsonConfigStore};
use uuid::Uuid;

struct Deployment {
    root: PathBuf,
    pages_dir: PathBuf,
    config_file: PathBuf,
}

impl Deployment {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("rotation_lifecycle_{}", Uuid::new_v4()));
        let pages_dir = root.join("pages");
        std::fs::create_dir_all(&pages_dir).unwrap();
        Self {
            config_file: root.join("config").join("pages-config.json"),
            pages_dir,
            root,
        }
    }

    fn lifecycle(&self, policy: MissingEntryPolicy) -> PageLifecycle {
        PageLifecycle::new(
            Arc::new(JsonConfigStore::new(&self.config_file)),
            Arc::new(FsPageDirectory::new(&self.pages_dir)),
            policy,
        )
    }

    fn rubbish_entries(&self) -> Vec<String> {
        let dir = self.pages_dir.join(RUBBISH_DIR);
        if !dir.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn sidecar(&self) -> String {
        std::fs::read_to_string(&self.config_file).unwrap()
    }
}

impl Drop for Deployment {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

#[tokio::test]
async fn test_create_toggle_delete_scenario() {
    // Arrange: empty page directory, no sidecar.
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);

    // Act + Assert: save a page.
    lifecycle.save("a.html", b"<p>A</p>").await.unwrap();
    assert_eq!(lifecycle.list_pages().await.unwrap(), vec!["a.html"]);
    assert!(lifecycle.get_config().await.unwrap().is_empty());
    assert!(!env.config_file.exists(), "saving a page must not write the config");

    // Toggle: the missing entry is synthesized as active and then flipped.
    let status = lifecycle.toggle("a.html").await.unwrap();
    assert_eq!(
        status,
        PageStatus {
            active: false,
            order: 1
        }
    );
    assert_eq!(
        env.sidecar(),
        "{\n    \"pages\": {\n        \"a.html\": {\n            \"active\": false,\n            \"order\": 1\n        }\n    }\n}"
    );

    // Delete: file goes to the rubbish bin and the entry is pruned.
    let outcome = lifecycle.delete("a.html").await.unwrap();
    assert!(outcome.config_pruned());
    assert!(lifecycle.list_pages().await.unwrap().is_empty());
    assert!(lifecycle.get_config().await.unwrap().is_empty());
    let rubbish = env.rubbish_entries();
    assert_eq!(rubbish.len(), 1);
    assert!(rubbish[0].starts_with("a.html_"), "got {}", rubbish[0]);
    assert_eq!(std::fs::read(&outcome.rubbish_path).unwrap(), b"<p>A</p>");
}

#[tokio::test]
async fn test_save_then_read_returns_exact_bytes() {
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);
    let content = "<!DOCTYPE html>\n<html><body>Grüße 🌍</body></html>\n";

    lifecycle.save("greeting.html", content.as_bytes()).await.unwrap();

    assert_eq!(
        lifecycle.read_page("greeting.html").await.unwrap(),
        content.as_bytes()
    );
}

#[tokio::test]
async fn test_rejected_writes_leave_directory_untouched() {
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);

    let txt = lifecycle.save("notes.txt", b"x").await.unwrap_err();
    let traversal = lifecycle.save("../x.html", b"x").await.unwrap_err();
    let reserved = lifecycle.save(ROTATOR_PAGE, b"x").await.unwrap_err();

    assert_eq!(txt.kind(), ErrorKind::InvalidInput);
    assert_eq!(traversal.kind(), ErrorKind::InvalidInput);
    assert_eq!(reserved.kind(), ErrorKind::Forbidden);
    assert_eq!(std::fs::read_dir(&env.pages_dir).unwrap().count(), 0);
    assert!(!env.root.join("x.html").exists());
}

#[tokio::test]
async fn test_toggle_twice_restores_listing_status() {
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);
    write(&env.pages_dir.join("a.html"), "a");

    let before = lifecycle.list_with_status().await.unwrap();
    lifecycle.toggle("a.html").await.unwrap();
    lifecycle.toggle("a.html").await.unwrap();
    let after = lifecycle.list_with_status().await.unwrap();

    assert_eq!(before[0].status.active, after[0].status.active);
    assert!(!before[0].configured);
    assert!(after[0].configured);
}

#[tokio::test]
async fn test_toggle_follows_inactive_policy() {
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Inactive);
    write(&env.pages_dir.join("a.html"), "a");

    let listed = lifecycle.list_with_status().await.unwrap();
    let toggled = lifecycle.toggle("a.html").await.unwrap();

    assert!(!listed[0].status.active);
    assert!(toggled.active);
}

#[tokio::test]
async fn test_deleting_twice_in_a_row_keeps_both_copies() {
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);

    lifecycle.save("a.html", b"first").await.unwrap();
    let first = lifecycle.delete("a.html").await.unwrap();
    lifecycle.save("a.html", b"second").await.unwrap();
    let second = lifecycle.delete("a.html").await.unwrap();

    assert_ne!(first.rubbish_path, second.rubbish_path);
    assert_eq!(env.rubbish_entries().len(), 2);
    assert_eq!(std::fs::read(&first.rubbish_path).unwrap(), b"first");
    assert_eq!(std::fs::read(&second.rubbish_path).unwrap(), b"second");
}

#[tokio::test]
async fn test_delete_missing_page_is_not_found_and_leaves_config() {
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);
    write(&env.pages_dir.join("a.html"), "a");
    lifecycle.toggle("a.html").await.unwrap();
    std::fs::remove_file(env.pages_dir.join("a.html")).unwrap();

    let err = lifecycle.delete("a.html").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(lifecycle.get_config().await.unwrap().get("a.html").is_some());
}

#[tokio::test]
async fn test_listing_hides_rotator_orphans_and_rubbish() {
    // Arrange: an orphaned config entry, the rotator page, a rubbish entry.
    let env = Deployment::new();
    std::fs::create_dir_all(env.config_file.parent().unwrap()).unwrap();
    write(
        &env.config_file,
        r#"{"pages":{"gone.html":{"active":true,"order":1},"b.html":{"active":false,"order":2}}}"#,
    );
    write(&env.pages_dir.join("b.html"), "b");
    write(&env.pages_dir.join("c.html"), "c");
    write(&env.pages_dir.join(ROTATOR_PAGE), "rotation");
    std::fs::create_dir_all(env.pages_dir.join(RUBBISH_DIR)).unwrap();
    write(
        &env.pages_dir.join(RUBBISH_DIR).join("old.html_2024-01-01_00-00-00"),
        "old",
    );
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);

    // Act
    let listing = lifecycle.list_with_status().await.unwrap();

    // Assert
    let names: Vec<&str> = listing.iter().map(|l| l.filename.as_str()).collect();
    assert_eq!(names, vec!["b.html", "c.html"]);
    assert!(!listing[0].status.active);
    assert!(listing[0].configured);
    assert!(listing[1].status.active);
    assert!(!listing[1].configured);
    // The orphan stays in the stored config untouched.
    assert!(lifecycle.get_config().await.unwrap().get("gone.html").is_some());
}

#[tokio::test]
async fn test_corrupt_sidecar_is_a_decode_failure() {
    let env = Deployment::new();
    std::fs::create_dir_all(env.config_file.parent().unwrap()).unwrap();
    write(&env.config_file, "{ not json");
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);

    let err = lifecycle.get_config().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    assert_eq!(env.sidecar(), "{ not json", "a failed load must not rewrite the file");
}

#[tokio::test]
async fn test_snapshot_replaces_config_verbatim() {
    let env = Deployment::new();
    let lifecycle = env.lifecycle(MissingEntryPolicy::Active);
    write(&env.pages_dir.join("a.html"), "a");
    lifecycle.toggle("a.html").await.unwrap();

    let snapshot = rotation_core::decode_config(
        br#"{"pages":{"z.html":{"active":true,"order":9}}}"#,
    )
    .unwrap();
    lifecycle.apply_snapshot("z.html", snapshot.clone()).await.unwrap();

    assert_eq!(lifecycle.get_config().await.unwrap(), snapshot);
}
