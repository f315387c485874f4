//! iCalendar emission.
//!
//! [`CalendarEmitter`] renders decoded [`EventRecord`]s into a complete
//! calendar document: a fixed header, one `VEVENT` block per record in input
//! order, and a footer. Blocks are collected by a [`CalendarBuilder`] and
//! joined once; the joined text then has every LF expanded to CR LF.
//!
//! Records are expected to carry pre-escaped text (see [`crate::decode`]), so
//! emission never fails.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use htics_core::{CalendarEmitter, EventRecord};
//!
//! let event = EventRecord::new(
//!     "42",
//!     "Opening Talk",
//!     Utc.with_ymd_and_hms(2024, 9, 20, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 9, 20, 10, 0, 0).unwrap(),
//! );
//! let ics = CalendarEmitter::with_defaults().emit(&[event]);
//! assert!(ics.contains("DTSTART:20240920T090000Z\r\n"));
//! ```

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::EventRecord;
use crate::time::format_compact;

/// A fixed latitude/longitude pair rendered as the `GEO` property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.latitude, self.longitude)
    }
}

/// Values that are the same for every emitted calendar.
///
/// The defaults describe the MOCA camp venue and its schedule feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// `PRODID` of the calendar.
    pub product_id: String,
    /// `VERSION` of the calendar.
    pub version: String,
    /// Name of the single time zone the events are expressed in.
    pub time_zone: String,
    /// Mail address used in every `ORGANIZER` property.
    pub organizer_email: String,
    /// Value of every `DTSTAMP` property.
    ///
    /// This is a fixed stamp, not the generation time.
    pub dtstamp: DateTime<Utc>,
    /// Venue coordinates used in every `GEO` property.
    pub geo: GeoPoint,
}

impl CalendarConfig {
    /// Default `PRODID`.
    pub const DEFAULT_PRODUCT_ID: &'static str = "-//moca/camp/schedule v1.0//IT";

    /// Default `VERSION`.
    pub const DEFAULT_VERSION: &'static str = "2.0";

    /// Default time zone label.
    pub const DEFAULT_TIME_ZONE: &'static str = "Europe/Rome";

    /// Default organizer mail address.
    pub const DEFAULT_ORGANIZER_EMAIL: &'static str = "info@olografix.org";

    /// Builder: set the time zone label.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Builder: set the organizer mail address.
    pub fn with_organizer_email(mut self, email: impl Into<String>) -> Self {
        self.organizer_email = email.into();
        self
    }

    /// Builder: set the `DTSTAMP` value.
    pub fn with_dtstamp(mut self, dtstamp: DateTime<Utc>) -> Self {
        self.dtstamp = dtstamp;
        self
    }

    /// Builder: set the venue coordinates.
    pub fn with_geo(mut self, geo: GeoPoint) -> Self {
        self.geo = geo;
        self
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            product_id: Self::DEFAULT_PRODUCT_ID.to_string(),
            version: Self::DEFAULT_VERSION.to_string(),
            time_zone: Self::DEFAULT_TIME_ZONE.to_string(),
            organizer_email: Self::DEFAULT_ORGANIZER_EMAIL.to_string(),
            dtstamp: Utc
                .with_ymd_and_hms(2024, 9, 12, 14, 0, 0)
                .single()
                .expect("valid fixed DTSTAMP"),
            geo: GeoPoint::new(42.5816338, 14.0901461),
        }
    }
}

/// Collects discrete calendar blocks and joins them once.
#[derive(Debug, Default)]
pub struct CalendarBuilder {
    blocks: Vec<String>,
}

impl CalendarBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for `capacity` blocks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity),
        }
    }

    /// Appends a block of LF-terminated lines.
    pub fn push(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    /// Returns the number of blocks collected so far.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no block has been collected.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Joins all blocks and expands every LF to CR LF.
    pub fn finish(self) -> String {
        to_crlf(&self.blocks.concat())
    }
}

/// Replaces every LF with CR LF.
pub fn to_crlf(text: &str) -> String {
    text.replace('\n', "\r\n")
}

/// Renders event records as an iCalendar document.
#[derive(Debug, Clone, Default)]
pub struct CalendarEmitter {
    config: CalendarConfig,
}

impl CalendarEmitter {
    /// Creates an emitter with the given configuration.
    pub fn new(config: CalendarConfig) -> Self {
        Self { config }
    }

    /// Creates an emitter with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CalendarConfig::default())
    }

    /// Returns the emitter configuration.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Renders the complete calendar document with CR LF line endings.
    pub fn emit(&self, events: &[EventRecord]) -> String {
        let mut builder = CalendarBuilder::with_capacity(events.len() + 2);
        builder.push(self.header());
        for event in events {
            builder.push(self.event_block(event));
        }
        builder.push(self.footer());

        let calendar = builder.finish();
        debug!(
            events = events.len(),
            bytes = calendar.len(),
            "Emitted calendar"
        );
        calendar
    }

    /// Renders the calendar header (LF line endings).
    pub fn header(&self) -> String {
        format!(
            "BEGIN:VCALENDAR\n\
             VERSION:{version}\n\
             PRODID:{product_id}\n\
             VTIMEZONE: {time_zone}\n",
            version = self.config.version,
            product_id = self.config.product_id,
            time_zone = self.config.time_zone,
        )
    }

    /// Renders one `VEVENT` block (LF line endings).
    ///
    /// Every property is present even when its value is empty. Text fields
    /// are copied verbatim.
    pub fn event_block(&self, event: &EventRecord) -> String {
        format!(
            "BEGIN:VEVENT\n\
             UID:{uid}\n\
             SEQUENCE: {sequence}\n\
             ORGANIZER;CN={organizer}:MAILTO:{email}\n\
             DTSTAMP:{dtstamp}\n\
             DTSTART:{start}\n\
             DTEND:{end}\n\
             SUMMARY:{summary}\n\
             DESCRIPTION: {description}\n\
             GEO:{geo}\n\
             LOCATION: {location}\n\
             END:VEVENT\n",
            uid = event.uid,
            sequence = event.sequence,
            organizer = event.organizer_name(),
            email = self.config.organizer_email,
            dtstamp = format_compact(&self.config.dtstamp),
            start = format_compact(&event.begin_time),
            end = format_compact(&event.end_time),
            summary = event.title,
            description = event.description,
            geo = self.config.geo,
            location = event.location,
        )
    }

    /// Renders the calendar footer (LF line endings).
    pub fn footer(&self) -> String {
        "END:VCALENDAR\n".to_string()
    }
}
