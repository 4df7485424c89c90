use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use kira_heartrisk::record::{Field, HealthRecord, Thal};
use kira_heartrisk::remote::{
    InferenceClient, extract_probability, prepare_model_input, reconcile_model_output,
};
use serde_json::{Value, json};

/// Serves one canned HTTP response; the handle yields the request body.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/model", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        let text = String::from_utf8_lossy(&buf).to_string();
        text.split("\r\n\r\n").nth(1).unwrap_or_default().to_string()
    });
    (url, handle)
}

#[test]
fn model_input_follows_field_order() {
    let record = HealthRecord {
        age: 63,
        fbs: true,
        oldpeak: 2.3,
        ca: 1,
        thal: Thal::FixedDefect,
        ..HealthRecord::default()
    };
    let input = prepare_model_input(&record);
    assert_eq!(input[0], 63.0);
    assert_eq!(input[1], 1.0);
    assert_eq!(input[5], 1.0);
    assert_eq!(input[9], 2.3);
    assert_eq!(input[11], 1.0);
    assert_eq!(input[12], 1.0);
}

#[test]
fn probability_extraction_variants() {
    assert_eq!(extract_probability(&json!([{"score": 0.8}])), 0.8);
    assert_eq!(extract_probability(&json!([{"probability": 0.3}])), 0.3);
    assert_eq!(extract_probability(&json!([0.7])), 0.7);
    assert_eq!(extract_probability(&json!([])), 0.5);
    assert_eq!(extract_probability(&json!({"score": 0.9})), 0.5);
    assert_eq!(extract_probability(&json!([{"label": "x"}])), 0.5);
}

#[test]
fn model_output_is_clamped_and_ranked() {
    let record = HealthRecord {
        thal: Thal::Normal,
        ..HealthRecord::default()
    };
    let result = reconcile_model_output(&json!([{"score": 0.99}]), &record).unwrap();
    assert_eq!(result.probability, 0.95);
    assert_eq!(result.prediction, 1);
    assert!(result.risk_factors.len() <= 5);
    assert!(result.risk_factors.iter().any(|f| f.name == Field::Thal));

    let low = reconcile_model_output(&json!([{"score": -0.2}]), &record).unwrap();
    assert_eq!(low.probability, 0.0);
    assert_eq!(low.prediction, 0);

    let mut bad = record;
    bad.ca = 6;
    assert!(reconcile_model_output(&json!([0.4]), &bad).is_err());
}

#[test]
fn client_posts_inputs_and_reads_score() {
    let (url, handle) = serve_once("200 OK", r#"[{"label":"disease","score":0.73}]"#);
    let client = InferenceClient::new(url, Some("token".to_string()), Duration::from_secs(5)).unwrap();
    let result = client.predict(&HealthRecord::default()).unwrap();
    assert_eq!(result.probability, 0.73);
    assert_eq!(result.prediction, 1);

    let body: Value = serde_json::from_str(&handle.join().unwrap()).unwrap();
    assert_eq!(body["inputs"].as_array().unwrap().len(), 13);
    assert_eq!(body["inputs"][0], 45.0);
}

#[test]
fn client_surfaces_http_errors() {
    let (url, handle) = serve_once("503 Service Unavailable", r#"{"error":"loading"}"#);
    let client = InferenceClient::new(url, None, Duration::from_secs(5)).unwrap();
    let err = client.predict(&HealthRecord::default()).unwrap_err();
    assert!(err.to_string().contains("model API error 503"));
    handle.join().unwrap();
}
