use chrono::{TimeZone, Utc};
use kira_heartrisk::ctx::Ctx;
use kira_heartrisk::history::HistoryEntry;
use kira_heartrisk::io::summary::{format_history, format_prediction, format_summary};
use kira_heartrisk::pipeline::Pipeline;
use kira_heartrisk::record::HealthRecord;
use kira_heartrisk::scores::{PredictionResult, score};

#[test]
fn summary_format() {
    let records = vec![
        HealthRecord::default(),
        HealthRecord {
            age: 70,
            chol: 300,
            exang: true,
            ..HealthRecord::default()
        },
    ];
    let mut ctx = Ctx::new(
        None,
        std::path::PathBuf::from("out"),
        false,
        false,
        "0.0.0-test",
    )
    .with_records(vec!["a".into(), "b".into()], records);
    ctx.targets = Some(vec![0, 0]);
    Pipeline::standard().run(&mut ctx).unwrap();

    let s = format_summary(&ctx).unwrap();
    assert!(s.contains("Input: 2 records, weights=heuristic"));
    assert!(s.contains("Elevated risk: 1 (50.0%), low risk: 1"));
    assert!(s.contains("Target agreement: 50.0%"));
    assert!(s.contains("Top factors: "));
    assert!(!s.contains("History:"));
}

#[test]
fn prediction_format() {
    let result = score(&HealthRecord::default()).unwrap();
    let s = format_prediction(&result).unwrap();
    assert!(s.starts_with("Low Risk of Heart Disease\n"));
    assert!(s.contains("Risk score: 42% (probability=0.4200)"));
    assert!(s.contains("Gender"));

    let empty = PredictionResult {
        prediction: 1,
        probability: 0.95,
        risk_factors: Vec::new(),
    };
    let s = format_prediction(&empty).unwrap();
    assert!(s.starts_with("Elevated Risk of Heart Disease\n"));
    assert!(s.contains("Risk factors: none"));
}

#[test]
fn history_format() {
    assert_eq!(format_history(&[]).unwrap(), "No saved predictions\n");

    let now = Utc.with_ymd_and_hms(2024, 5, 2, 14, 5, 0).unwrap();
    let record = HealthRecord {
        age: 66,
        chol: 280,
        ..HealthRecord::default()
    };
    let entry = HistoryEntry::new(record, score(&record).unwrap(), now, 0).unwrap();
    let s = format_history(&[entry.clone()]).unwrap();
    assert!(s.starts_with(&format!("{}\t2024-05-02 14:05\tHigh Risk\t", entry.id)));
    assert!(s.contains("entries: 1, high risk: 1, low risk: 0"));
}
