use pollwatch_core::{ChangeEvent, ChangeKind, FileRecord, WatchConfig, WatchError};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

#[test]
fn test_file_record_creation_and_properties() {
    let now = SystemTime::now();
    let record = FileRecord::new("/watched/dir/file.txt", 2048, now, 0o100644, false);

    assert_eq!(record.path(), std::path::Path::new("/watched/dir/file.txt"));
    assert_eq!(record.size, 2048);
    assert_eq!(record.modified, now);
    assert_eq!(record.mode, 0o100644);
    assert!(!record.is_dir);

    let dir = FileRecord::new("/watched/dir", 4096, now, 0o040755, true);
    assert!(dir.is_dir);
}

#[test]
fn test_record_diff_is_per_field() {
    let now = SystemTime::now();
    let base = FileRecord::new("/w/a", 10, now, 0o100644, false);

    let mut touched = base.clone();
    touched.modified = now + Duration::from_secs(1);
    let changes = base.diff(&touched);
    assert!(changes.modified);
    assert!(!changes.size);
    assert!(!changes.mode);

    let mut chmodded = base.clone();
    chmodded.mode = 0o100600;
    let changes = base.diff(&chmodded);
    assert!(changes.mode);
    assert!(!changes.size);
    assert!(!changes.modified);
}

#[test]
fn test_record_is_fieldwise_equal_after_clone() {
    let record = FileRecord::new("/w/a", 1, SystemTime::UNIX_EPOCH, 0, false);
    assert_eq!(record, record.clone());
    assert!(record.diff(&record).is_empty());
}

#[test]
fn test_event_serializes_snake_case_kind() {
    let event = ChangeEvent::new(ChangeKind::AttributesChanged, "/w/a.txt");
    let json = serde_json::to_string(&event).unwrap();
    assert_eq!(json, r#"{"kind":"attributes_changed","path":"/w/a.txt"}"#);

    let back: ChangeEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_event_constructors() {
    assert_eq!(ChangeEvent::created("/w/a").kind, ChangeKind::Created);
    assert_eq!(ChangeEvent::deleted("/w/a").kind, ChangeKind::Deleted);
    assert_eq!(
        ChangeEvent::deleted("/w/a").to_string(),
        "File deleted: /w/a"
    );
}

#[test]
fn test_watch_config_builder() {
    let config = WatchConfig::builder()
        .roots(vec![PathBuf::from("/a"), PathBuf::from("/b")])
        .build()
        .unwrap();

    assert_eq!(config.roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    assert_eq!(config.interval, Duration::from_secs(1));
    assert!(!config.follow_symlinks);
}

#[test]
fn test_watch_config_deserialize_defaults() {
    let config: WatchConfig = serde_json::from_str(r#"{"roots":["/srv/data"]}"#).unwrap();
    assert_eq!(config.roots, vec![PathBuf::from("/srv/data")]);
    assert_eq!(config.interval, Duration::from_secs(1));
    assert!(config.validate().is_ok());

    let empty: WatchConfig = serde_json::from_str(r#"{"roots":[]}"#).unwrap();
    assert!(matches!(empty.validate(), Err(WatchError::NoDirectories)));
}
