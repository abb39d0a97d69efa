#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `textenc` renders structured log entries as human readable text lines of
//! the shape
//!
//! ```text
//! <time><level><message><key=value fields>\n
//! ```
//!
//! Each prefix column is produced by a pluggable renderer, and fields are
//! appended through typed `add_*` calls. Encoders are recycled through a
//! thread-safe [`EncoderPool`] so steady-state logging does not allocate.
//!
//! # Design
//!
//! - [`Buffer`] is the growable byte accumulator every renderer writes into.
//! - [`TimeRenderer`], [`LevelRenderer`] and [`MessageRenderer`] are the three
//!   strategy seams. Built-in implementations cover layout based, RFC 3339 and
//!   Unix timestamps, label maps for levels, and verbatim or fixed-width
//!   messages. Each has a "none" variant that writes nothing.
//! - [`EncoderOption`] values assign a renderer to a slot. Options apply in
//!   order, so the last one for a slot wins.
//! - [`Encoder`] owns the slots, the accumulated field tokens and a scratch
//!   line buffer. [`Encoder::write_entry`] emits one complete line per call.
//! - [`EncoderPool`] hands out [`PooledEncoder`] guards that return their
//!   encoder on drop or on [`PooledEncoder::free`]. Encoders are reset to the
//!   defaults on checkout, never on return.
//! - [`EncoderConfig`] selects the built-in renderers from `name=value`
//!   settings so hosts can configure the encoder from flags or files.
//!
//! # Invariants
//!
//! - Every written line ends with exactly one `\n`, even when all renderers are
//!   suppressed.
//! - Field tokens are separated by exactly one space with no leading or
//!   trailing separator, in insertion order. Keys and string values are
//!   emitted verbatim.
//! - A cloned encoder shares renderers with its source but owns an independent
//!   copy of the field bytes.
//!
//! # Errors
//!
//! [`Encoder::write_entry`] returns the [`std::io::Error`] produced by the
//! sink unchanged. Parsing a configuration reports [`ConfigError`]. Requests
//! for unsupported capabilities ([`Encoder::add_object`],
//! [`Encoder::add_marshaler`]), rendering a level that a custom
//! [`LevelMap`] does not cover, and a timestamp the configured time format
//! cannot express are programming errors and panic. No renderer substitutes
//! a different format.
//!
//! # Examples
//!
//! ```
//! use textenc::{Level, abbr_level, no_time};
//! use time::OffsetDateTime;
//!
//! let mut encoder = textenc::new(&[no_time(), abbr_level()]);
//! encoder.add_str("user", "alice");
//! encoder.add_i64("id", 42);
//!
//! let mut sink = Vec::new();
//! encoder.write_entry(&mut sink, "login", Level::Warn, OffsetDateTime::now_utc())?;
//! encoder.free();
//!
//! assert_eq!(sink, b"WRN login user=alice id=42\n");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Feature flags
//!
//! - `serde` derives `Serialize`/`Deserialize` for [`EncoderConfig`] and the
//!   enums it is built from.
//! - `tracing` enables `TextLayer`, a `tracing-subscriber` layer that writes
//!   events through pooled encoders.

use std::sync::Arc;

mod buffer;
mod config;
mod encoder;
mod error;
#[cfg(feature = "tracing")]
mod layer;
mod level;
mod option;
mod pool;
pub mod render;

pub use buffer::Buffer;
pub use config::{EncoderConfig, LevelFormat, MessageFormat, TimeFormat};
pub use encoder::{DEFAULT_BUFFER_CAPACITY, Encoder, FieldsPolicy};
pub use error::{ConfigError, Unsupported};
#[cfg(feature = "tracing")]
pub use layer::TextLayer;
pub use level::{LEVEL_COUNT, Level, LevelMap};
pub use option::{
    EncoderOption, abbr_level, color_level, fixed_width_message, layout_time, level_map,
    no_level, no_time, reset_fields_after_write, retain_fields, rfc3339_time, short_time,
    simple_level, simple_message, unix_nanos_time, unix_seconds_time,
};
pub use pool::{EncoderPool, PooledEncoder};
pub use render::{LevelRenderer, MessageRenderer, TimeRenderer};

/// Checks an encoder out of the process-wide pool and applies `options`.
///
/// The encoder starts from the defaults (short local time, padded upper-case
/// level labels, verbatim message) with no fields. Dropping the guard or
/// calling [`PooledEncoder::free`] returns it to the pool.
#[must_use]
pub fn new(options: &[EncoderOption]) -> PooledEncoder {
    EncoderPool::acquire_from(Arc::clone(EncoderPool::global()), options)
}
