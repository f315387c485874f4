//! Core types: typed document values, event decoding, calendar emission
//!
//! ```text
//! runQuery body ──parse_query_response──▶ Vec<Document>
//!                                              │
//!                                  decode_documents
//!                                              ▼
//!                                      Vec<EventRecord>
//!                                              │
//!                                  CalendarEmitter::emit
//!                                              ▼
//!                                     iCalendar text (CR LF)
//! ```

pub mod decode;
pub mod document;
pub mod emit;
pub mod error;
pub mod event;
pub mod time;
pub mod tracing;
pub mod value;

pub use decode::{decode_document, decode_documents};
pub use document::{Document, QueryResponseItem, parse_query_response};
pub use emit::{CalendarBuilder, CalendarConfig, CalendarEmitter, GeoPoint};
pub use error::{DecodeCause, DecodeError, DecodeResult};
pub use event::{EventRecord, UNKNOWN_SPEAKER};
pub use time::{TimestampError, format_compact, parse_utc_timestamp};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use value::TypedValue;
