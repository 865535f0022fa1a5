use posty5_core::{Envelope, Paginated};
use serde::Deserialize;
use serde_json::Value;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Link {
    #[serde(rename = "_id")]
    id: String,
    shorter_link: String,
}

#[test]
fn deserialize_paginated_envelope() {
    let json = load_fixture("paginated.json");
    let envelope: Envelope<Paginated<Link>> = serde_json::from_str(&json).unwrap();
    assert_eq!(envelope.message, "Success");
    assert_eq!(envelope.is_success, Some(true));

    let page = envelope.require_result().unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, "65f0c1a2b3c4d5e6f7a8b9c0");
    assert_eq!(page.items[1].shorter_link, "https://posty5.com/s/def456");
}

#[test]
fn deserialize_envelope_with_misspelled_exception() {
    let json = load_fixture("error_envelope.json");
    let envelope: Envelope<Value> = serde_json::from_str(&json).unwrap();
    assert!(envelope.result.is_none());
    assert_eq!(envelope.is_success, Some(false));
    assert_eq!(
        envelope.exception.unwrap()["reason"].as_str(),
        Some("quota exceeded")
    );
}

#[test]
fn deserialize_envelope_with_data_alias() {
    let envelope: Envelope<Vec<i32>> =
        serde_json::from_str(r#"{"data": [1, 2, 3], "message": "ok"}"#).unwrap();
    assert_eq!(envelope.result(), Some(vec![1, 2, 3]));
}

#[test]
fn deserialize_envelope_without_message() {
    let envelope: Envelope<Value> = serde_json::from_str(r#"{"result": null}"#).unwrap();
    assert!(envelope.message.is_empty());
    assert!(envelope.result.is_none());
}
