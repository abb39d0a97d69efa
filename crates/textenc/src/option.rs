//! crates/textenc/src/option.rs
//! Encoder options: one value per renderer slot assignment.
//!
//! Options are applied in order and each overwrites its slot, so the last
//! option for a slot wins. The constructor functions build the strategy once
//! and hand out cheap [`Arc`] clones afterwards; applying an option to a pooled
//! encoder never allocates.

use std::sync::Arc;

use time::UtcOffset;

use crate::encoder::{Encoder, FieldsPolicy};
use crate::level::LevelMap;
use crate::render::{
    FixedWidthMessage, LayoutTime, LevelMapRenderer, LevelRenderer, MessageRenderer, NoLevel,
    NoTime, Rfc3339Time, SimpleMessage, TimeRenderer, UnixNanosTime, UnixSecondsTime,
    local_offset,
};

/// A single renderer or policy assignment for an [`Encoder`].
#[derive(Clone, Debug)]
pub enum EncoderOption {
    /// Replace the time renderer.
    Time(Arc<dyn TimeRenderer>),
    /// Replace the level renderer.
    Level(Arc<dyn LevelRenderer>),
    /// Replace the message renderer.
    Message(Arc<dyn MessageRenderer>),
    /// Choose whether fields survive [`Encoder::write_entry`].
    Fields(FieldsPolicy),
}

impl EncoderOption {
    /// Wraps a custom time renderer.
    pub fn time(renderer: impl TimeRenderer + 'static) -> Self {
        Self::Time(Arc::new(renderer))
    }

    /// Wraps a custom level renderer.
    pub fn level(renderer: impl LevelRenderer + 'static) -> Self {
        Self::Level(Arc::new(renderer))
    }

    /// Wraps a custom message renderer.
    pub fn message(renderer: impl MessageRenderer + 'static) -> Self {
        Self::Message(Arc::new(renderer))
    }

    /// Installs this option on `encoder`, replacing the previous slot value.
    pub fn apply(&self, encoder: &mut Encoder) {
        match self {
            Self::Time(renderer) => encoder.set_time_renderer(Arc::clone(renderer)),
            Self::Level(renderer) => encoder.set_level_renderer(Arc::clone(renderer)),
            Self::Message(renderer) => encoder.set_message_renderer(Arc::clone(renderer)),
            Self::Fields(policy) => encoder.set_fields_policy(*policy),
        }
    }
}

/// Wall-clock time with microseconds in the local offset.
#[must_use]
pub fn short_time() -> EncoderOption {
    EncoderOption::time(LayoutTime::short(local_offset()))
}

/// RFC 3339 timestamps in the local offset.
#[must_use]
pub fn rfc3339_time() -> EncoderOption {
    EncoderOption::time(Rfc3339Time::new(local_offset()))
}

/// Custom `time` format description rendered in `offset`.
pub fn layout_time(
    description: &str,
    offset: UtcOffset,
) -> Result<EncoderOption, time::error::InvalidFormatDescription> {
    LayoutTime::parse(description, offset).map(EncoderOption::time)
}

/// Seconds since the Unix epoch.
#[must_use]
pub fn unix_seconds_time() -> EncoderOption {
    EncoderOption::time(UnixSecondsTime)
}

/// Nanoseconds since the Unix epoch.
#[must_use]
pub fn unix_nanos_time() -> EncoderOption {
    EncoderOption::time(UnixNanosTime)
}

/// Suppresses the time column.
#[must_use]
pub fn no_time() -> EncoderOption {
    EncoderOption::time(NoTime)
}

/// Fixed-width upper-case level names.
#[must_use]
pub fn simple_level() -> EncoderOption {
    level_map(LevelMap::plain())
}

/// Three-letter level abbreviations.
#[must_use]
pub fn abbr_level() -> EncoderOption {
    level_map(LevelMap::abbreviated())
}

/// Fixed-width level names in ANSI colours.
#[must_use]
pub fn color_level() -> EncoderOption {
    level_map(LevelMap::colorized())
}

/// Labels taken from a caller supplied map.
#[must_use]
pub fn level_map(map: LevelMap) -> EncoderOption {
    EncoderOption::level(LevelMapRenderer::new(map))
}

/// Suppresses the level column.
#[must_use]
pub fn no_level() -> EncoderOption {
    EncoderOption::level(NoLevel)
}

/// Message verbatim followed by a space.
#[must_use]
pub fn simple_message() -> EncoderOption {
    EncoderOption::message(SimpleMessage)
}

/// Message truncated or space padded to `width` bytes.
#[must_use]
pub fn fixed_width_message(width: usize) -> EncoderOption {
    EncoderOption::message(FixedWidthMessage::new(width))
}

/// Keeps accumulated fields after each write (the default).
#[must_use]
pub const fn retain_fields() -> EncoderOption {
    EncoderOption::Fields(FieldsPolicy::Retain)
}

/// Clears accumulated fields after each write.
#[must_use]
pub const fn reset_fields_after_write() -> EncoderOption {
    EncoderOption::Fields(FieldsPolicy::ResetAfterWrite)
}
