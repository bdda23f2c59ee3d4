//! Integration tests for tagbase
//!
//! These tests drive the public API end to end against a temporary store:
//! repository, DAOs, edit sessions and the controller together.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tagbase::db::{Dao, DeleteOutcome, Repository, RepositoryOptions};
use tagbase::{App, EditSession, SessionState, Tag, TaggedFile, Tagging, config::TagbaseConfig};
use tempfile::TempDir;

/// Helper function to create an app over a temporary store
fn setup_app() -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = TagbaseConfig {
        database: Some(dir.path().join("tagbase.db")),
        ..TagbaseConfig::default()
    };
    (App::open(&config).unwrap(), dir)
}

fn tag_names(taggings: &BTreeSet<Tagging>) -> Vec<String> {
    taggings.iter().map(|t| t.tag.clone()).collect()
}

#[test]
fn test_file_round_trip() {
    let (app, _dir) = setup_app();
    let files = app.repo().files();

    let mut file = TaggedFile::new("/a/b.txt");
    assert!(files.create(&mut file).unwrap());
    assert_eq!(files.read_by_id(&file.id).unwrap(), Some(file));
}

#[test]
fn test_tagging_scenario() {
    let (app, _dir) = setup_app();
    let repo = app.repo();

    let mut file = TaggedFile::new("/a/b.txt");
    assert!(repo.files().create(&mut file).unwrap());
    assert!(repo.tags().create(&mut Tag::new("work")).unwrap());

    let mut tagging = Tagging::new(file.id, "work").with_comment("");
    assert!(repo.taggings().create(&mut tagging).unwrap());

    let read = repo.taggings().read_by_file_id(file.id).unwrap();
    assert_eq!(read, BTreeSet::from([tagging]));

    assert_eq!(repo.taggings().delete_by_tag("work").unwrap(), 1);
    assert!(repo.taggings().read_by_file_id(file.id).unwrap().is_empty());
}

#[test]
fn test_duplicate_path_create_leaves_count_unchanged() {
    let (app, _dir) = setup_app();
    assert!(app.add_file(Path::new("/a/b.txt"), true).success);
    let before = app.repo().files().read_all().unwrap().len();

    let mut dup = TaggedFile::new("/a/b.txt");
    assert!(!app.repo().files().create(&mut dup).unwrap());
    assert_eq!(app.repo().files().read_all().unwrap().len(), before);
}

#[test]
fn test_delete_twice_succeeds() {
    let (app, _dir) = setup_app();
    let mut tag = Tag::new("temp");
    app.repo().tags().create(&mut tag).unwrap();

    let first = app.repo().tags().delete(&tag).unwrap();
    let second = app.repo().tags().delete(&tag).unwrap();
    assert_eq!((first, second), (DeleteOutcome::Deleted, DeleteOutcome::Absent));
    assert!(first.succeeded() && second.succeeded());
}

#[test]
fn test_edit_session_lifecycle() {
    let (app, _dir) = setup_app();
    assert!(app.add_file(Path::new("/docs/plan.md"), true).success);

    let mut session = app.begin_edit(Path::new("/docs/plan.md")).unwrap();
    assert_eq!(session.state(), SessionState::Clean);

    session.add_tag("work", None);
    session.add_tag("draft", Some("first pass".into()));
    assert_eq!(session.state(), SessionState::Dirty);
    assert_eq!(tag_names(&session.working_set()), vec!["draft", "work"]);

    let report = app.update_associations(&mut session);
    assert!(report.is_success());
    assert_eq!(session.state(), SessionState::Clean);

    // second edit: drop one, add one
    session.remove_tag("draft");
    session.add_tag("done", None);
    let file = session.file().clone();
    assert!(app.save_file(&file, &mut session, true).success);

    let stored = app.repo().taggings().read_by_file_id(file.id).unwrap();
    let mut names = tag_names(&stored);
    names.sort();
    assert_eq!(names, vec!["done", "work"]);
}

#[test]
fn test_cancelled_session_writes_nothing() {
    let (app, _dir) = setup_app();
    assert!(app.add_file(Path::new("/x.txt"), true).success);

    let mut session = app.begin_edit(Path::new("/x.txt")).unwrap();
    session.add_tag("never", None);
    session.cancel();

    assert!(app.repo().taggings().read_all().unwrap().is_empty());
    assert!(app.repo().tags().read_all().unwrap().is_empty());
}

#[test]
fn test_commit_of_stored_tagging_reports_failure() {
    let (app, _dir) = setup_app();
    assert!(app.add_file(Path::new("/x.txt"), true).success);
    let mut session = app.begin_edit(Path::new("/x.txt")).unwrap();
    session.add_tag("work", None);
    assert!(app.update_associations(&mut session).is_success());
    let base = session.base();

    let mut again = EditSession::begin(session.file().clone(), &app.repo().taggings()).unwrap();
    again.record_addition(Tagging::new(session.file().id, "work"));
    let report = again.commit(&app.repo().taggings());

    assert!(!report.is_success());
    assert_eq!(again.base(), base);
}

#[test]
fn test_delete_file_and_snapshot() {
    let (app, _dir) = setup_app();
    for path in ["/a.txt", "/b.txt"] {
        assert!(app.add_file(Path::new(path), true).success);
        let mut session = app.begin_edit(Path::new(path)).unwrap();
        session.add_tag("shared", None);
        assert!(app.update_associations(&mut session).is_success());
    }

    let a = app.find_file(Path::new("/a.txt")).unwrap().unwrap();
    assert!(app.delete_file(&a, true).success);

    let snapshot = app.snapshot().unwrap();
    assert_eq!(snapshot.files.len(), 1);
    assert_eq!(snapshot.files[0].file.path, PathBuf::from("/b.txt"));
    assert_eq!(snapshot.tags.get("shared"), Some(&1));
}

#[test]
fn test_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tagbase.db");
    {
        let repo = Repository::open(&path, RepositoryOptions::default()).unwrap();
        repo.tags().create(&mut Tag::new("kept")).unwrap();
    }
    let repo = Repository::open(&path, RepositoryOptions::default()).unwrap();
    assert!(repo.tags().read_by_id("kept").unwrap().is_some());
}
