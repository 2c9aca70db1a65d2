use std::fs;
use std::path::PathBuf;

use nullpointer_storage::{
    History, HistoryError, HistoryLocation, HistoryRecord, HistoryRepository, JsonFileHistory,
    Lookup,
};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = HistoryLocation::under(dir.path()).file();
        Self { _dir: dir, path }
    }

    fn with_content(content: &str) -> Self {
        let fixture = Self::new();
        fs::create_dir_all(fixture.path.parent().unwrap()).unwrap();
        fs::write(&fixture.path, content).unwrap();
        fixture
    }

    fn open(&self) -> JsonFileHistory {
        JsonFileHistory::open(&self.path).expect("open history")
    }
}

fn seeded(fixture: &Fixture, records: &[(&str, &str, &str)]) -> JsonFileHistory {
    let mut store = fixture.open();
    for (service_url, response, item) in records {
        store.append(item, service_url, response).unwrap();
    }
    store
}

#[test]
fn round_trip_across_instances() {
    let fixture = Fixture::new();
    let records = [
        ("http://0x0.st", "http://0x0.st/a.png", "/home/me/a.png"),
        ("http://0x0.st", "http://0x0.st/s", "https://example.com/long"),
        ("https://paste.example", "https://paste.example/x", "/tmp/x.txt"),
    ];
    drop(seeded(&fixture, &records));

    let expected: History = records
        .iter()
        .map(|(service_url, response, item)| HistoryRecord::new(*service_url, *response, *item))
        .collect();

    let mut reopened = fixture.open();
    assert_eq!(reopened.get().unwrap(), expected);
}

#[test]
fn append_is_idempotent() {
    let fixture = Fixture::new();
    let mut store = fixture.open();

    store.append("a.png", "http://svc", "http://svc/abc").unwrap();
    let once = store.get().unwrap();
    let bytes_once = fs::read(&fixture.path).unwrap();

    store.append("a.png", "http://svc", "http://svc/abc").unwrap();

    assert_eq!(store.get().unwrap(), once);
    assert_eq!(fs::read(&fixture.path).unwrap(), bytes_once);
}

#[test]
fn append_overwrites_same_response() {
    let fixture = Fixture::new();
    let mut store = fixture.open();

    store.append("a.png", "http://svc", "http://svc/abc").unwrap();
    store.append("b.png", "http://svc", "http://svc/abc").unwrap();

    let history = store.get().unwrap();
    assert_eq!(history.partition("http://svc").unwrap()["http://svc/abc"], "b.png");
    assert_eq!(history.len(), 1);
}

#[test]
fn pop_by_response_removes_exactly_one_entry() {
    let fixture = Fixture::new();
    let mut store = seeded(&fixture, &[("http://svc", "r1", "a"), ("http://svc", "r2", "b")]);

    let popped = store.pop("http://svc", Lookup::Response("r1")).unwrap();
    assert_eq!(popped, Some(HistoryRecord::new("http://svc", "r1", "a")));

    let partition = store.get().unwrap().partition("http://svc").cloned().unwrap();
    assert_eq!(partition.len(), 1);
    assert_eq!(partition["r2"], "b");

    // persisted, not just cached
    let mut reopened = fixture.open();
    assert!(reopened
        .find("http://svc", Lookup::Response("r1"))
        .unwrap()
        .is_none());
}

#[test]
fn pop_by_item_removes_from_partition_where_found() {
    let fixture = Fixture::new();
    let mut store = seeded(&fixture, &[("u1", "r1", "x"), ("u2", "r2", "y")]);

    let popped = store.pop("u1", Lookup::Item("y")).unwrap();
    assert_eq!(popped, Some(HistoryRecord::new("u2", "r2", "y")));

    let history = fixture.open().get().unwrap();
    assert_eq!(history.partition("u1").unwrap().len(), 1);
    assert_eq!(history.partition("u1").unwrap()["r1"], "x");
    assert!(history.partition("u2").unwrap().is_empty());
}

#[test]
fn pop_with_both_criteria_uses_response() {
    let fixture = Fixture::new();
    let mut store = seeded(&fixture, &[("u1", "r1", "x"), ("u1", "r2", "y")]);

    let popped = store.pop("u1", Lookup::new("y", "r1")).unwrap();

    assert_eq!(popped, Some(HistoryRecord::new("u1", "r1", "x")));
}

#[test]
fn pop_miss_leaves_store_unchanged() {
    let fixture = Fixture::new();
    let mut store = seeded(&fixture, &[("http://svc", "r1", "a")]);
    let before = store.get().unwrap();

    assert_eq!(
        store.pop("http://svc", Lookup::Response("nonexistent")).unwrap(),
        None
    );
    assert_eq!(store.pop("http://other", Lookup::Response("r1")).unwrap(), None);
    assert_eq!(store.pop("http://svc", Lookup::Item("missing")).unwrap(), None);

    assert_eq!(store.get().unwrap(), before);
}

#[test]
fn clear_single_partition() {
    let fixture = Fixture::new();
    let mut store = seeded(
        &fixture,
        &[("http://svc", "r1", "a"), ("http://other", "r2", "b")],
    );

    store.clear(Some("http://svc")).unwrap();

    let history = fixture.open().get().unwrap();
    assert!(history.partition("http://svc").unwrap().is_empty());
    assert_eq!(history.partition("http://other").unwrap()["r2"], "b");
}

#[test]
fn clear_unknown_partition_is_noop() {
    let fixture = Fixture::new();
    let mut store = seeded(&fixture, &[("http://svc", "r1", "a")]);
    let before = store.get().unwrap();

    store.clear(Some("http://never-used")).unwrap();

    assert_eq!(store.get().unwrap(), before);
}

#[test]
fn clear_all() {
    let fixture = Fixture::new();
    let mut store = seeded(&fixture, &[("u1", "r1", "x"), ("u2", "r2", "y")]);

    store.clear(None).unwrap();

    assert!(store.get().unwrap().is_empty());
    assert_eq!(fs::read_to_string(&fixture.path).unwrap(), "{}");
}

#[test]
fn empty_file_is_empty_history() {
    let fixture = Fixture::with_content("");

    let mut store = fixture.open();

    assert!(store.get().unwrap().is_empty());
}

#[test]
fn corrupt_file_is_empty_history() {
    for content in ["{not json", "[1, 2, 3]", "\u{0}\u{1}garbage", "null"] {
        let fixture = Fixture::with_content(content);

        let mut store = fixture.open();

        assert!(store.get().unwrap().is_empty(), "content: {content:?}");
    }
}

#[test]
fn invalid_utf8_is_empty_history() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.path.parent().unwrap()).unwrap();
    fs::write(&fixture.path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    let mut store = fixture.open();

    assert!(store.get().unwrap().is_empty());
}

#[test]
fn corrupt_file_is_replaced_on_first_write() {
    let fixture = Fixture::with_content("{not json");
    let mut store = fixture.open();

    store.append("a", "u1", "r1").unwrap();

    let raw = fs::read_to_string(&fixture.path).unwrap();
    let parsed: History = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.partition("u1").unwrap()["r1"], "a");
}

#[test]
fn open_fails_when_directory_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").unwrap();

    let err = JsonFileHistory::open(blocker.join("history")).unwrap_err();

    match err {
        HistoryError::Io { action, path, .. } => {
            assert_eq!(action, "create directory for");
            assert_eq!(path, blocker.join("history"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn operation_fails_when_file_becomes_unreadable() {
    let fixture = Fixture::new();
    let mut store = seeded(&fixture, &[("u1", "r1", "x")]);
    fs::remove_file(&fixture.path).unwrap();
    fs::create_dir(&fixture.path).unwrap();

    let err = store.append("y", "u1", "r2").unwrap_err();

    assert!(matches!(err, HistoryError::Io { action: "read", .. }));
    assert!(fixture.path.is_dir());
}
