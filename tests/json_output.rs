use std::path::PathBuf;

use kira_heartrisk::ctx::Ctx;
use kira_heartrisk::io::json_writer::{build_report, write_json};
use kira_heartrisk::io::tsv_writer::write_tsv;
use kira_heartrisk::pipeline::Pipeline;
use kira_heartrisk::record::HealthRecord;
use serde_json::Value;
use tempfile::TempDir;

fn scored_ctx(out: PathBuf) -> Ctx {
    let records = vec![
        HealthRecord::default(),
        HealthRecord {
            age: 62,
            chol: 268,
            oldpeak: 3.6,
            ca: 2,
            ..HealthRecord::default()
        },
    ];
    let mut ctx = Ctx::new(None, out, true, true, "0.0.0-test")
        .with_records(vec!["a".to_string(), "b".to_string()], records);
    Pipeline::standard().run(&mut ctx).unwrap();
    ctx
}

#[test]
fn json_report_populated() {
    let dir = TempDir::new().unwrap();
    let ctx = scored_ctx(dir.path().join("out"));

    let report = build_report(&ctx).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tool"], "kira-heartrisk");
    assert_eq!(json["version"], "0.0.0-test");
    assert_eq!(json["schema_version"], "v1");
    assert_eq!(json["input_meta"]["records"], 2);
    assert_eq!(json["records"][0]["id"], "a");
    assert_eq!(json["records"][1]["result"]["prediction"], 1);
    assert_eq!(json["records"][1]["result"]["risk_factors"][0]["name"], "age");
    assert_eq!(json["summary"]["positive"], 1);
    assert_eq!(json["summary"]["negative"], 1);

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(&ctx.output.json_path).unwrap()).unwrap();
    assert_eq!(on_disk["records"].as_array().unwrap().len(), 2);
    assert_eq!(on_disk["summary"]["records"], 2);
}

#[test]
fn tsv_rows_match_results() {
    let dir = TempDir::new().unwrap();
    let ctx = scored_ctx(dir.path().join("out"));

    let text = std::fs::read_to_string(&ctx.output.tsv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "id\tprobability\tprediction\tfactor_1\tfactor_2\tfactor_3\tfactor_4\tfactor_5"
    );
    assert!(lines[2].starts_with("b\t0.950000\t1\tage:"));
    let cols: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(cols.len(), 8);
    assert_eq!(cols[0], "a");
    assert_eq!(cols[2], "0");
    assert_eq!(cols[3], "sex:45.4545");
}

#[test]
fn json_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let ctx = scored_ctx(dir.path().join("out"));
    let first = std::fs::read(&ctx.output.json_path).unwrap();
    write_json(&ctx.output.json_path, &ctx.report).unwrap();
    assert_eq!(std::fs::read(&ctx.output.json_path).unwrap(), first);

    let again = dir.path().join("again.tsv");
    write_tsv(&again, &ctx).unwrap();
    assert_eq!(
        std::fs::read(&again).unwrap(),
        std::fs::read(&ctx.output.tsv_path).unwrap()
    );
}
