use chrono::{TimeZone, Utc};
use kira_heartrisk::ctx::Ctx;
use kira_heartrisk::history::{
    HistoryEntry, HistoryStore, JsonlHistory, MemoryHistory, record_prediction,
};
use kira_heartrisk::pipeline::Pipeline;
use kira_heartrisk::record::HealthRecord;
use kira_heartrisk::scores::score;
use tempfile::TempDir;

fn entry_parts(age: u32) -> (HealthRecord, kira_heartrisk::PredictionResult) {
    let record = HealthRecord {
        age,
        ..HealthRecord::default()
    };
    let result = score(&record).unwrap();
    (record, result)
}

#[test]
fn entry_ids_are_stable_and_distinct() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    let (record, result) = entry_parts(45);
    let a = HistoryEntry::new(record, result.clone(), now, 0).unwrap();
    let b = HistoryEntry::new(record, result.clone(), now, 0).unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(a.id.len(), 16);

    let next = HistoryEntry::new(record, result.clone(), now, 1).unwrap();
    assert_ne!(a.id, next.id);

    let (other, other_result) = entry_parts(60);
    let c = HistoryEntry::new(other, other_result, now, 0).unwrap();
    assert_ne!(a.id, c.id);

    let later = Utc.with_ymd_and_hms(2024, 3, 1, 9, 31, 0).unwrap();
    let d = HistoryEntry::new(record, result, later, 0).unwrap();
    assert_ne!(a.id, d.id);
}

#[test]
fn identical_batch_rows_get_distinct_ids() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("history.jsonl");
    let record = HealthRecord::default();

    let mut ctx = Ctx::new(None, dir.path().join("out"), false, false, "0.0.0-test")
        .with_records(vec!["a".into(), "b".into()], vec![record, record]);
    ctx.history_path = Some(store.clone());
    Pipeline::standard().run(&mut ctx).unwrap();

    let entries = JsonlHistory::open(&store).list().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].record, entries[1].record);
    assert_eq!(entries[0].timestamp, entries[1].timestamp);
    assert_ne!(entries[0].id, entries[1].id);
}

#[test]
fn memory_store_keeps_insertion_order() {
    let mut store = MemoryHistory::new();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    for (seq, age) in [40, 55, 70].into_iter().enumerate() {
        let (record, result) = entry_parts(age);
        record_prediction(&mut store, record, result, now, seq as u64).unwrap();
    }
    let ages: Vec<u32> = store.list().unwrap().iter().map(|e| e.record.age).collect();
    assert_eq!(ages, vec![40, 55, 70]);

    store.clear().unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn jsonl_store_persists_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("history.jsonl");
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

    let mut store = JsonlHistory::open(&path);
    assert!(store.list().unwrap().is_empty());

    let (record, result) = entry_parts(62);
    let saved = record_prediction(&mut store, record, result, now, 0).unwrap();
    let (record, result) = entry_parts(41);
    record_prediction(&mut store, record, result, now, 1).unwrap();

    let reopened = JsonlHistory::open(&path);
    let entries = reopened.list().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, saved.id);
    assert_eq!(entries[0].record, saved.record);
    assert_eq!(entries[0].result.prediction, saved.result.prediction);
    assert_eq!(entries[1].record.age, 41);
    assert_eq!(entries[0].timestamp, now);

    store.clear().unwrap();
    assert!(reopened.list().unwrap().is_empty());
}

#[test]
fn jsonl_store_reports_malformed_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.jsonl");
    std::fs::write(&path, "{\"id\":\"x\"}\n").unwrap();
    let err = JsonlHistory::open(&path).list().unwrap_err();
    assert!(format!("{:#}", err).contains(":1 malformed history entry"));
}
