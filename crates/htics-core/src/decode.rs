//! Document to [`EventRecord`] decoding.
//!
//! Each schedule document is read through a small set of dotted field paths:
//!
//! | Record field  | Document path   | When missing        |
//! |---------------|-----------------|---------------------|
//! | `uid`         | `type.id`       | empty string        |
//! | `title`       | `title`         | empty string        |
//! | `description` | `description`   | empty string        |
//! | `location`    | `location.name` | empty string        |
//! | `speakers`    | `speakers[].name` | `["unknown"]`     |
//! | `begin_time`  | `begin_tsz`     | error               |
//! | `end_time`    | `end_tsz`       | error               |
//!
//! Free text is escaped here rather than in the emitter, so the stored
//! strings are already safe to place in calendar content lines. Decoding is
//! all-or-nothing: the first bad field aborts the whole pass.

use tracing::{debug, trace};

use crate::document::Document;
use crate::error::{DecodeCause, DecodeError, DecodeResult};
use crate::event::EventRecord;
use crate::time::parse_utc_timestamp;
use crate::value::TypedValue;

const UID_FIELD: &str = "type.id";
const TITLE_FIELD: &str = "title";
const DESCRIPTION_FIELD: &str = "description";
const LOCATION_FIELD: &str = "location.name";
const SPEAKERS_FIELD: &str = "speakers";
const SPEAKER_NAME_FIELD: &str = "name";
const BEGIN_FIELD: &str = "begin_tsz";
const END_FIELD: &str = "end_tsz";

/// Decodes every document into an event record, preserving order.
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered; no partial result is
/// produced.
pub fn decode_documents(documents: &[Document]) -> DecodeResult<Vec<EventRecord>> {
    let records = documents
        .iter()
        .map(decode_document)
        .collect::<DecodeResult<Vec<_>>>()?;

    debug!(events = records.len(), "Decoded event records");
    Ok(records)
}

/// Decodes a single document into an event record.
///
/// # Errors
///
/// Returns a [`DecodeError`] if a timestamp is missing or malformed, if
/// `type.id` is not an integer, or if a map or array sits where a scalar is
/// expected.
pub fn decode_document(document: &Document) -> DecodeResult<EventRecord> {
    let reader = FieldReader { document };

    let record = EventRecord {
        uid: reader.integer_text(UID_FIELD)?,
        title: reader.text(TITLE_FIELD)?,
        description: escape_description(&reader.text(DESCRIPTION_FIELD)?),
        location: reader.text(LOCATION_FIELD)?,
        speakers: reader.speakers()?,
        begin_time: reader.timestamp(BEGIN_FIELD)?,
        end_time: reader.timestamp(END_FIELD)?,
        sequence: 0,
    };

    trace!(
        document = %document.name,
        uid = %record.uid,
        title = %record.title,
        begin = %record.begin_time,
        "Decoded event"
    );

    Ok(record)
}

/// Escapes newlines as the two characters `\n`.
pub fn escape_newlines(text: &str) -> String {
    text.replace('\n', "\\n")
}

/// Escapes a speaker name for the ORGANIZER common name.
///
/// Newlines become `\n` and double quotes become single quotes.
pub fn escape_speaker_name(name: &str) -> String {
    escape_newlines(name).replace('"', "'")
}

/// Escapes a description: newlines become `\n`, carriage returns are dropped.
pub fn escape_description(text: &str) -> String {
    escape_newlines(text).replace('\r', "")
}

/// Reads typed fields out of one document, attributing errors to it.
struct FieldReader<'a> {
    document: &'a Document,
}

impl FieldReader<'_> {
    fn error(&self, field: &str, raw_value: &str, cause: impl Into<DecodeCause>) -> DecodeError {
        DecodeError::new(&self.document.name, field, raw_value, cause)
    }

    /// Returns the scalar text at `value`, `None` for non-text scalars, or a
    /// shape error for containers.
    fn scalar<'v>(&self, field: &str, value: Option<&'v TypedValue>) -> DecodeResult<Option<&'v str>> {
        match value {
            Some(value) if value.is_container() => Err(self.error(
                field,
                &format!("{value:?}"),
                DecodeCause::ShapeMismatch {
                    expected: "scalar",
                    found: value.kind().to_string(),
                },
            )),
            Some(value) => Ok(value.as_text()),
            None => Ok(None),
        }
    }

    fn text(&self, path: &str) -> DecodeResult<String> {
        let text = self.scalar(path, self.document.field(path))?;
        Ok(text.unwrap_or_default().to_string())
    }

    fn integer_text(&self, path: &str) -> DecodeResult<String> {
        match self.scalar(path, self.document.field(path))? {
            Some(text) if !text.is_empty() => text
                .parse::<i64>()
                .map(|n| n.to_string())
                .map_err(|e| self.error(path, text, e)),
            _ => Ok(String::new()),
        }
    }

    fn timestamp(&self, path: &str) -> DecodeResult<chrono::DateTime<chrono::Utc>> {
        match self.scalar(path, self.document.field(path))? {
            Some(text) => parse_utc_timestamp(text).map_err(|e| self.error(path, text, e)),
            None => Err(self.error(path, "", DecodeCause::MissingTimestamp)),
        }
    }

    fn speakers(&self) -> DecodeResult<Vec<String>> {
        let elements = self
            .document
            .field(SPEAKERS_FIELD)
            .map(TypedValue::as_array)
            .unwrap_or_default();

        let mut names = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let field = format!("{SPEAKERS_FIELD}[{index}].{SPEAKER_NAME_FIELD}");
            let name = self.scalar(&field, element.get(SPEAKER_NAME_FIELD))?;
            match name {
                Some(name) if !name.is_empty() => names.push(escape_speaker_name(name)),
                _ => trace!(document = %self.document.name, %field, "Skipping unnamed speaker"),
            }
        }

        if names.is_empty() {
            names.push(crate::event::UNKNOWN_SPEAKER.to_string());
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_query_response;
    use crate::time::TimestampError;
    use chrono::{TimeZone, Utc};

    /// Builds a `runQuery` response body holding one event document.
    fn event_json(name: &str, fields: &str) -> String {
        format!(r#"{{"document": {{"name": "events/{name}", "fields": {{{fields}}}}}}}"#)
    }

    fn decode_body(items: &[String]) -> DecodeResult<Vec<EventRecord>> {
        let body = format!("[{}]", items.join(","));
        let documents = parse_query_response(body.as_bytes()).unwrap();
        decode_documents(&documents)
    }

    fn times() -> &'static str {
        r#""begin_tsz": {"stringValue": "2024-09-20T09:00:00Z"},
           "end_tsz": {"stringValue": "2024-09-20T10:00:00Z"}"#
    }

    fn opening_talk() -> String {
        event_json(
            "42",
            &format!(
                r#""title": {{"stringValue": "Opening Talk"}},
                   "description": {{"stringValue": "Line1\nLine2"}},
                   "speakers": {{"arrayValue": {{"values": [
                       {{"mapValue": {{"fields": {{"name": {{"stringValue": "Jane \"JD\" Doe"}}}}}}}}
                   ]}}}},
                   "type": {{"mapValue": {{"fields": {{"id": {{"integerValue": "42"}}}}}}}},
                   "location": {{"mapValue": {{"fields": {{"name": {{"stringValue": "Main Hall"}}}}}}}},
                   "conference": {{"stringValue": "MOCA2024"}},
                   "hidden": {{"booleanValue": false}},
                   "begin_timestamp": {{"timestampValue": "2024-09-20T09:00:00Z"}},
                   {}"#,
                times()
            ),
        )
    }

    #[test]
    fn decodes_full_event() {
        let records = decode_body(&[opening_talk()]).unwrap();
        assert_eq!(records.len(), 1);

        let event = &records[0];
        assert_eq!(event.uid, "42");
        assert_eq!(event.title, "Opening Talk");
        assert_eq!(event.description, "Line1\\nLine2");
        assert_eq!(event.location, "Main Hall");
        assert_eq!(event.speakers, vec!["Jane 'JD' Doe".to_string()]);
        assert_eq!(event.begin_time, Utc.with_ymd_and_hms(2024, 9, 20, 9, 0, 0).unwrap());
        assert_eq!(event.end_time, Utc.with_ymd_and_hms(2024, 9, 20, 10, 0, 0).unwrap());
        assert_eq!(event.sequence, 0);
    }

    #[test]
    fn decoded_record_snapshot() {
        let records = decode_body(&[opening_talk()]).unwrap();
        insta::assert_json_snapshot!(records[0], @r#"
        {
          "uid": "42",
          "title": "Opening Talk",
          "description": "Line1\\nLine2",
          "location": "Main Hall",
          "speakers": [
            "Jane 'JD' Doe"
          ],
          "begin_time": "2024-09-20T09:00:00Z",
          "end_time": "2024-09-20T10:00:00Z",
          "sequence": 0
        }
        "#);
    }

    #[test]
    fn missing_scalars_decode_to_empty_strings() {
        let records = decode_body(&[event_json("bare", times())]).unwrap();
        let event = &records[0];
        assert_eq!(event.uid, "");
        assert_eq!(event.title, "");
        assert_eq!(event.description, "");
        assert_eq!(event.location, "");
        assert_eq!(event.speakers, vec!["unknown".to_string()]);
    }

    #[test]
    fn empty_speaker_names_are_dropped() {
        let fields = format!(
            r#""speakers": {{"arrayValue": {{"values": [
                   {{"mapValue": {{"fields": {{"name": {{"stringValue": ""}}}}}}}},
                   {{"mapValue": {{"fields": {{"name": {{"stringValue": "Alice"}}}}}}}},
                   {{"mapValue": {{"fields": {{}}}}}},
                   {{"stringValue": "not a speaker map"}},
                   {{"mapValue": {{"fields": {{"name": {{"stringValue": "Bob\nSmith"}}}}}}}}
               ]}}}},
               {}"#,
            times()
        );
        let records = decode_body(&[event_json("1", &fields)]).unwrap();
        assert_eq!(
            records[0].speakers,
            vec!["Alice".to_string(), "Bob\\nSmith".to_string()]
        );
        assert_eq!(records[0].organizer_name(), "Alice, Bob\\nSmith");
    }

    #[test]
    fn all_empty_speakers_fall_back_to_unknown() {
        for speakers in [
            r#""speakers": {"arrayValue": {}}"#,
            r#""speakers": {"arrayValue": {"values": [{"mapValue": {"fields": {"name": {"stringValue": ""}}}}]}}"#,
        ] {
            let records = decode_body(&[event_json("1", &format!("{speakers}, {}", times()))]).unwrap();
            assert_eq!(records[0].organizer_name(), "unknown");
        }
    }

    #[test]
    fn description_carriage_returns_are_stripped() {
        let fields = format!(
            r#""description": {{"stringValue": "a\r\nb\rc"}}, {}"#,
            times()
        );
        let records = decode_body(&[event_json("1", &fields)]).unwrap();
        assert_eq!(records[0].description, "a\\nbc");
    }

    #[test]
    fn preserves_document_order() {
        let items: Vec<String> = ["3", "1", "2"]
            .iter()
            .map(|id| {
                event_json(
                    id,
                    &format!(
                        r#""type": {{"mapValue": {{"fields": {{"id": {{"integerValue": "{id}"}}}}}}}}, {}"#,
                        times()
                    ),
                )
            })
            .collect();

        let uids: Vec<String> = decode_body(&items)
            .unwrap()
            .into_iter()
            .map(|e| e.uid)
            .collect();
        assert_eq!(uids, vec!["3", "1", "2"]);
    }

    #[test]
    fn decoding_is_deterministic() {
        let items = [opening_talk(), event_json("bare", times())];
        assert_eq!(decode_body(&items).unwrap(), decode_body(&items).unwrap());
    }

    #[test]
    fn malformed_begin_timestamp_fails_whole_pass() {
        let bad = event_json(
            "bad",
            r#""begin_tsz": {"stringValue": "2024-09-20"},
               "end_tsz": {"stringValue": "2024-09-20T10:00:00Z"}"#,
        );
        let err = decode_body(&[opening_talk(), bad]).unwrap_err();
        assert_eq!(err.document, "events/bad");
        assert_eq!(err.field, "begin_tsz");
        assert_eq!(err.raw_value, "2024-09-20");
        assert_eq!(
            err.cause,
            DecodeCause::MalformedTimestamp(TimestampError::Layout)
        );
    }

    #[test]
    fn missing_end_timestamp_is_an_error() {
        let doc = event_json("1", r#""begin_tsz": {"stringValue": "2024-09-20T09:00:00Z"}"#);
        let err = decode_body(&[doc]).unwrap_err();
        assert_eq!(err.field, "end_tsz");
        assert_eq!(err.cause, DecodeCause::MissingTimestamp);
    }

    #[test]
    fn non_string_timestamp_is_missing() {
        let doc = event_json(
            "1",
            r#""begin_tsz": {"timestampValue": "2024-09-20T09:00:00Z"},
               "end_tsz": {"stringValue": "2024-09-20T10:00:00Z"}"#,
        );
        let err = decode_body(&[doc]).unwrap_err();
        assert_eq!(err.field, "begin_tsz");
        assert_eq!(err.cause, DecodeCause::MissingTimestamp);
    }

    #[test]
    fn container_where_scalar_expected_is_shape_mismatch() {
        let fields = format!(r#""title": {{"arrayValue": {{}}}}, {}"#, times());
        let err = decode_body(&[event_json("1", &fields)]).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(
            err.cause,
            DecodeCause::ShapeMismatch {
                expected: "scalar",
                found: "array".to_string()
            }
        );
    }

    #[test]
    fn container_speaker_name_is_shape_mismatch() {
        let fields = format!(
            r#""speakers": {{"arrayValue": {{"values": [
                   {{"mapValue": {{"fields": {{"name": {{"mapValue": {{}}}}}}}}}}
               ]}}}}, {}"#,
            times()
        );
        let err = decode_body(&[event_json("1", &fields)]).unwrap_err();
        assert_eq!(err.field, "speakers[0].name");
    }

    #[test]
    fn non_integer_uid_is_an_error() {
        let fields = format!(
            r#""type": {{"mapValue": {{"fields": {{"id": {{"integerValue": "4x2"}}}}}}}}, {}"#,
            times()
        );
        let err = decode_body(&[event_json("1", &fields)]).unwrap_err();
        assert_eq!(err.field, "type.id");
        assert_eq!(err.raw_value, "4x2");
        assert!(matches!(err.cause, DecodeCause::MalformedInteger(_)));
    }

    #[test]
    fn uid_is_normalized_integer_text() {
        let fields = format!(
            r#""type": {{"mapValue": {{"fields": {{"id": {{"integerValue": "007"}}}}}}}}, {}"#,
            times()
        );
        let records = decode_body(&[event_json("1", &fields)]).unwrap();
        assert_eq!(records[0].uid, "7");
    }

    #[test]
    fn leap_second_timestamp_fails_whole_pass() {
        let fields = r#""begin_tsz": {"stringValue": "2024-06-30T23:59:60Z"},
                        "end_tsz": {"stringValue": "2024-07-01T00:30:00Z"}"#;
        let err = decode_body(&[opening_talk(), event_json("leap", fields)]).unwrap_err();
        assert_eq!(err.document, "events/leap");
        assert_eq!(err.field, "begin_tsz");
        assert_eq!(
            err.cause,
            DecodeCause::MalformedTimestamp(TimestampError::LeapSecond)
        );
    }

    #[test]
    fn escaping_round_trips_through_unescape() {
        let original = "first line\nsecond \"quoted\" line\nthird";
        let escaped = escape_description(original);
        assert!(!escaped.contains('\n'));
        assert_eq!(escaped.replace("\\n", "\n"), original);

        let speaker = escape_speaker_name(original);
        assert!(!speaker.contains('\n'));
        assert!(!speaker.contains('"'));
        assert_eq!(
            speaker.replace("\\n", "\n"),
            original.replace('"', "'")
        );
    }
}
