use chrono::{FixedOffset, TimeZone};
use serde_json::json;

use super::*;
use crate::store;
use crate::types::Profile;

fn sample_dataset() -> Dataset {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    let first = jst.with_ymd_and_hms(2026, 1, 27, 21, 5, 0).unwrap();
    let second = jst.with_ymd_and_hms(2026, 1, 28, 12, 48, 0).unwrap();
    let profile = Profile {
        nickname: "はしゃも".to_string(),
        urlname: "hasyamo".to_string(),
        profile_image_url: Some("https://assets.st-note.com/avatar.png".to_string()),
    };
    let dataset = store::initialize("hasyamo", profile.clone(), 1200, first);
    store::refresh(dataset, profile, 1212, second)
}

/// A file exactly as the browser dashboard exported it.
fn legacy_export() -> serde_json::Value {
    json!({
        "creatorId": "hasyamo",
        "profile": {
            "nickname": "はしゃも",
            "profileImageUrl": "https://assets.st-note.com/avatar.png",
            "urlname": "hasyamo"
        },
        "records": [
            { "date": "2026-01-27", "followers": 1200, "change": 0,
              "timestamp": "2026-01-27T21:05:00.000+09:00" },
            { "date": "2026-01-28", "followers": 1212, "change": 12,
              "timestamp": "2026-01-28T12:48:00.000+09:00" }
        ],
        "lastUpdated": "2026-01-28T12:48:00.000+09:00"
    })
}

fn without(field: &str) -> Vec<u8> {
    let mut doc = legacy_export();
    doc.as_object_mut().unwrap().remove(field);
    serde_json::to_vec(&doc).unwrap()
}

#[test]
fn serialized_dataset_decodes_to_equal_value() {
    let dataset = sample_dataset();
    let bytes = serialize(&dataset).unwrap();
    assert_eq!(deserialize(&bytes).unwrap(), dataset);
}

#[test]
fn serialized_dataset_uses_camel_case_keys() {
    let bytes = serialize(&sample_dataset()).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("\"creatorId\": \"hasyamo\""));
    assert!(text.contains("\"profileImageUrl\""));
    assert!(text.contains("\"lastUpdated\""));
    assert!(text.contains("\"date\": \"2026-01-28\""));
}

#[test]
fn legacy_export_decodes() {
    let bytes = serde_json::to_vec(&legacy_export()).unwrap();
    let dataset = deserialize(&bytes).unwrap();

    assert_eq!(dataset, sample_dataset());
}

#[test]
fn missing_creator_id_is_malformed() {
    let err = deserialize(&without("creatorId")).unwrap_err();
    assert!(
        matches!(err, CoreError::MalformedData { ref reason } if reason.contains("creatorId")),
        "expected MalformedData(creatorId), got: {err:?}"
    );
}

#[test]
fn missing_profile_is_malformed() {
    let err = deserialize(&without("profile")).unwrap_err();
    assert!(matches!(err, CoreError::MalformedData { ref reason } if reason.contains("profile")));
}

#[test]
fn missing_records_is_malformed() {
    let err = deserialize(&without("records")).unwrap_err();
    assert!(matches!(err, CoreError::MalformedData { ref reason } if reason.contains("records")));
}

#[test]
fn empty_creator_id_is_malformed() {
    let mut doc = legacy_export();
    doc["creatorId"] = json!("");
    let err = deserialize(&serde_json::to_vec(&doc).unwrap()).unwrap_err();
    assert!(matches!(err, CoreError::MalformedData { .. }));
}

#[test]
fn non_json_input_is_malformed() {
    let err = deserialize(b"creatorId,followers\nhasyamo,10").unwrap_err();
    assert!(matches!(err, CoreError::MalformedData { .. }));
}

#[test]
fn missing_last_updated_is_tolerated() {
    let dataset = deserialize(&without("lastUpdated")).unwrap();
    assert!(dataset.last_updated.is_none());
}

#[test]
fn semantically_invalid_values_are_accepted() {
    let mut doc = legacy_export();
    doc["records"] = json!([
        { "date": "2026-01-28", "followers": -4, "change": 0,
          "timestamp": "2026-01-28T12:48:00.000+09:00" },
        { "date": "2026-01-20", "followers": 10, "change": 14,
          "timestamp": "2026-01-20T12:48:00.000+09:00" }
    ]);
    let dataset = deserialize(&serde_json::to_vec(&doc).unwrap()).unwrap();

    assert_eq!(dataset.records.len(), 2);
    assert_eq!(dataset.records[0].followers, -4);
}

#[test]
fn partial_profile_and_records_are_accepted() {
    let bytes = br#"{"creatorId":"x","profile":{"nickname":"n"},"records":[{"date":"2026-01-28","followers":1},{"date":"2026-01-29"}]}"#;
    let dataset = deserialize(bytes).unwrap();

    assert_eq!(dataset.profile.nickname, "n");
    assert_eq!(dataset.profile.urlname, "");
    assert_eq!(dataset.records.len(), 2);
    assert_eq!(dataset.records[0].followers, 1);
    assert!(dataset.records[0].timestamp.is_none());
    assert_eq!(dataset.records[1].followers, 0);
}

#[test]
fn record_without_timestamp_serializes_without_the_key() {
    let dataset = deserialize(
        br#"{"creatorId":"x","profile":{},"records":[{"date":"2026-01-28","followers":1}]}"#,
    )
    .unwrap();
    let text = String::from_utf8(serialize(&dataset).unwrap()).unwrap();

    assert!(!text.contains("timestamp"));
    assert_eq!(deserialize(text.as_bytes()).unwrap(), dataset);
}

#[test]
fn unparseable_record_date_is_malformed() {
    let err = deserialize(
        br#"{"creatorId":"x","profile":{},"records":[{"date":"1/28/2026","followers":1}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::MalformedData { .. }));
}

#[test]
fn inspect_reports_negative_duplicate_and_out_of_order_records() {
    let mut dataset = sample_dataset();
    let mut dup = dataset.records[1].clone();
    dup.followers = -1;
    dataset.records.push(dup);
    let mut early = dataset.records[0].clone();
    early.date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    dataset.records.push(early);

    let warnings = inspect(&dataset);
    let jan28 = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();

    assert_eq!(
        warnings,
        vec![
            DatasetWarning::NegativeFollowers {
                date: jan28,
                followers: -1
            },
            DatasetWarning::DuplicateDate { date: jan28 },
            DatasetWarning::OutOfOrder {
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                previous: jan28,
            },
        ]
    );
}

#[test]
fn inspect_is_silent_for_clean_data() {
    assert!(inspect(&sample_dataset()).is_empty());
}

#[test]
fn export_filename_encodes_creator_and_date() {
    let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
    assert_eq!(
        export_filename("hasyamo", today),
        "note-follower-hasyamo-2026-02-03.json"
    );
}
