use kira_heartrisk::ScoreError;
use kira_heartrisk::record::{
    ChestPain, Field, HealthRecord, RawRecord, RawValue, Sex, Thal, catalog, field_info,
};

fn raw_from(pairs: &[(Field, &str)]) -> RawRecord {
    let mut raw = RawRecord::from(HealthRecord::default());
    for (field, value) in pairs {
        raw.set(*field, *value);
    }
    raw
}

#[test]
fn field_order_and_names() {
    let names: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang",
            "oldpeak", "slope", "ca", "thal"
        ]
    );
    assert!(Field::Age < Field::Thal);
    assert_eq!("THALACH".parse::<Field>().unwrap(), Field::Thalach);
    assert_eq!(
        "pulse".parse::<Field>().unwrap_err(),
        ScoreError::UnknownField("pulse".to_string())
    );
}

#[test]
fn raw_text_values_convert() {
    let raw = raw_from(&[(Field::Age, "63"), (Field::Oldpeak, " 2.3 "), (Field::Cp, "3")]);
    let record = HealthRecord::try_from(raw).unwrap();
    assert_eq!(record.age, 63);
    assert_eq!(record.oldpeak, 2.3);
    assert_eq!(record.cp, ChestPain::Asymptomatic);
}

#[test]
fn non_numeric_value_is_rejected() {
    let raw = raw_from(&[(Field::Chol, "abc")]);
    let err = HealthRecord::try_from(raw).unwrap_err();
    match err {
        ScoreError::InvalidInput { field, reason } => {
            assert_eq!(field, "chol");
            assert!(reason.contains("not numeric"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn missing_field_is_rejected() {
    let mut raw = RawRecord::default();
    raw.set(Field::Age, 50.0);
    let err = HealthRecord::try_from(raw).unwrap_err();
    assert!(matches!(err, ScoreError::InvalidInput { ref field, ref reason }
        if field == "sex" && reason == "missing"));
}

#[test]
fn out_of_domain_codes_are_rejected() {
    for (field, value) in [
        (Field::Sex, "2"),
        (Field::Cp, "4"),
        (Field::Fbs, "3"),
        (Field::Restecg, "5"),
        (Field::Slope, "9"),
        (Field::Thal, "4"),
        (Field::Ca, "5"),
        (Field::Age, "-4"),
        (Field::Age, "45.5"),
        (Field::Trestbps, "0"),
        (Field::Oldpeak, "NaN"),
        (Field::Oldpeak, "11"),
    ] {
        let err = HealthRecord::try_from(raw_from(&[(field, value)])).unwrap_err();
        match err {
            ScoreError::InvalidInput { field: got, .. } => assert_eq!(got, field.as_str()),
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn record_json_accepts_numbers_and_strings() {
    let json = r#"{"age":"58","sex":0,"cp":"1","trestbps":130,"chol":"236","fbs":0,
        "restecg":"0","thalach":174,"exang":"0","oldpeak":0,"slope":1,"ca":"1","thal":"0"}"#;
    let record: HealthRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.age, 58);
    assert_eq!(record.sex, Sex::Female);
    assert_eq!(record.thal, Thal::Normal);
    assert_eq!(record.ca, 1);

    let encoded = serde_json::to_value(record).unwrap();
    assert_eq!(encoded["sex"], 0);
    assert_eq!(encoded["thal"], 0);
    assert_eq!(encoded["fbs"], 0);
}

#[test]
fn record_json_rejects_invalid_values() {
    let json = r#"{"age":58,"sex":0,"cp":1,"trestbps":130,"chol":236,"fbs":0,
        "restecg":0,"thalach":174,"exang":0,"oldpeak":0,"slope":1,"ca":9,"thal":0}"#;
    assert!(serde_json::from_str::<HealthRecord>(json).is_err());
}

#[test]
fn raw_value_accessors() {
    assert_eq!(RawValue::from("1.5").as_f64(), Some(1.5));
    assert_eq!(RawValue::from(2.0).as_f64(), Some(2.0));
    assert_eq!(RawValue::from("x").as_f64(), None);
    assert_eq!(RawValue::from("x").to_string(), "x");
}

#[test]
fn defaults_match_form() {
    let r = HealthRecord::default();
    assert_eq!(r.age, 45);
    assert_eq!(r.sex, Sex::Male);
    assert_eq!(r.trestbps, 120);
    assert_eq!(r.chol, 200);
    assert_eq!(r.thalach, 150);
    assert_eq!(r.oldpeak, 1.0);
    assert_eq!(r.thal, Thal::ReversibleDefect);
    assert!(r.validate().is_ok());
}

#[test]
fn catalog_covers_every_field() {
    let all = catalog();
    assert_eq!(all.len(), 13);
    for (info, field) in all.iter().zip(Field::ALL) {
        assert_eq!(info.field, field);
        assert!(!info.description.is_empty());
        assert!(!info.importance.is_empty());
    }
    assert_eq!(field_info(Field::Trestbps).label, "Blood Pressure");
    assert_eq!(field_info(Field::Cp).values.len(), 4);
    assert_eq!(Field::Sex.label(), "Gender");
}
