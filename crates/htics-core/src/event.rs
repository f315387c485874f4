//! Decoded event records.
//!
//! An [`EventRecord`] is the flattened form of one schedule document, ready
//! for the calendar emitter. Free-text fields are stored already escaped for
//! calendar output; the emitter copies them verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organizer name used when an event has no named speaker.
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// One calendar-worthy event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event identifier, the stringified `type.id` integer.
    ///
    /// The value is normalized through `i64`, so `"007"` is stored as `"7"`.
    pub uid: String,
    /// The event title.
    pub title: String,
    /// Description with newlines escaped and carriage returns removed.
    pub description: String,
    /// Location name.
    pub location: String,
    /// Escaped speaker names; never empty.
    pub speakers: Vec<String>,
    /// When the event begins.
    pub begin_time: DateTime<Utc>,
    /// When the event ends.
    pub end_time: DateTime<Utc>,
    /// Revision number, always 0.
    pub sequence: u32,
}

impl EventRecord {
    /// Creates a record with the required fields and an unknown speaker.
    pub fn new(
        uid: impl Into<String>,
        title: impl Into<String>,
        begin_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            description: String::new(),
            location: String::new(),
            speakers: vec![UNKNOWN_SPEAKER.to_string()],
            begin_time,
            end_time,
            sequence: 0,
        }
    }

    /// Builder: set the (already escaped) description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set the location name.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder: set the (already escaped) speaker names.
    ///
    /// An empty list falls back to [`UNKNOWN_SPEAKER`].
    pub fn with_speakers<I, S>(mut self, speakers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let speakers: Vec<String> = speakers.into_iter().map(Into::into).collect();
        self.speakers = if speakers.is_empty() {
            vec![UNKNOWN_SPEAKER.to_string()]
        } else {
            speakers
        };
        self
    }

    /// Returns the organizer common name: speakers joined by `", "`.
    pub fn organizer_name(&self) -> String {
        self.speakers.join(", ")
    }
}
