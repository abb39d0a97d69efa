//! crates/textenc/src/render/timestamp.rs
//! Timestamp column strategies.
//!
//! Layout based renderers convert the entry timestamp into a UTC offset that
//! is fixed when the renderer is built. [`local_offset`] is consulted once
//! per option, never per entry.

use time::format_description::well_known::Rfc3339;
use time::format_description::{self, BorrowedFormatItem, OwnedFormatItem};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::TimeRenderer;
use crate::buffer::Buffer;

/// `15:04:05.000000` style wall-clock time with microseconds.
const SHORT_LAYOUT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:6]");

/// Returns the local UTC offset, or UTC when it cannot be determined.
///
/// On Unix the offset is unavailable once the process has spawned threads
/// unless the `time` crate is configured otherwise; the fallback keeps
/// rendering deterministic instead of failing.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or_else(|err| {
        tracing::debug!(%err, "local UTC offset unavailable, rendering times in UTC");
        UtcOffset::UTC
    })
}

#[cold]
#[track_caller]
fn unrenderable(timestamp: OffsetDateTime, err: &time::error::Format) -> ! {
    panic!("cannot render timestamp {timestamp}: {err}")
}

/// Formats timestamps with a `time` format description.
///
/// # Panics
///
/// Rendering panics when the timestamp cannot be expressed in the layout.
#[derive(Clone, Debug)]
pub struct LayoutTime {
    format: OwnedFormatItem,
    offset: UtcOffset,
}

impl LayoutTime {
    /// Creates a renderer from a prepared format description.
    #[must_use]
    pub fn new(format: impl Into<OwnedFormatItem>, offset: UtcOffset) -> Self {
        Self {
            format: format.into(),
            offset,
        }
    }

    /// Wall-clock time with microsecond precision (`14:03:09.123456`).
    #[must_use]
    pub fn short(offset: UtcOffset) -> Self {
        Self::new(SHORT_LAYOUT, offset)
    }

    /// Parses a version 1 format description such as
    /// `"[year]-[month]-[day] [hour]:[minute]"`.
    pub fn parse(
        description: &str,
        offset: UtcOffset,
    ) -> Result<Self, time::error::InvalidFormatDescription> {
        let format = format_description::parse_owned::<1>(description)?;
        Ok(Self::new(format, offset))
    }

    /// Returns the offset timestamps are converted to before formatting.
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl TimeRenderer for LayoutTime {
    fn render(&self, buffer: &mut Buffer, timestamp: OffsetDateTime) {
        let local = timestamp.to_offset(self.offset);
        if let Err(err) = local.format_into(buffer, &self.format) {
            unrenderable(timestamp, &err);
        }
        buffer.push(b' ');
    }
}

/// RFC 3339 timestamps with whole-second precision.
///
/// # Panics
///
/// Rendering panics for years outside `0..=9999`, which RFC 3339 cannot
/// express.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rfc3339Time {
    offset: UtcOffset,
}

impl Rfc3339Time {
    /// Creates a renderer converting timestamps to `offset`.
    #[must_use]
    pub const fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl TimeRenderer for Rfc3339Time {
    fn render(&self, buffer: &mut Buffer, timestamp: OffsetDateTime) {
        let local = timestamp.to_offset(self.offset);
        let whole = local.replace_nanosecond(0).unwrap_or(local);
        // RFC 3339 cannot express years outside 0..=9999.
        if let Err(err) = whole.format_into(buffer, &Rfc3339) {
            unrenderable(timestamp, &err);
        }
        buffer.push(b' ');
    }
}

/// Seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnixSecondsTime;

impl TimeRenderer for UnixSecondsTime {
    fn render(&self, buffer: &mut Buffer, timestamp: OffsetDateTime) {
        buffer.append_display(timestamp.unix_timestamp());
        buffer.push(b' ');
    }
}

/// Nanoseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnixNanosTime;

impl TimeRenderer for UnixNanosTime {
    fn render(&self, buffer: &mut Buffer, timestamp: OffsetDateTime) {
        buffer.append_display(timestamp.unix_timestamp_nanos());
        buffer.push(b' ');
    }
}

/// Omits the timestamp column.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTime;

impl TimeRenderer for NoTime {
    fn render(&self, _buffer: &mut Buffer, _timestamp: OffsetDateTime) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    const STAMP: OffsetDateTime = datetime!(2024-05-17 12:03:09.123456789 UTC);

    fn render(renderer: &dyn TimeRenderer) -> String {
        let mut buffer = Buffer::new();
        renderer.render(&mut buffer, STAMP);
        String::from_utf8(buffer.into_vec()).expect("utf-8")
    }

    #[test]
    fn short_layout_uses_configured_offset() {
        assert_eq!(render(&LayoutTime::short(UtcOffset::UTC)), "12:03:09.123456 ");
        assert_eq!(render(&LayoutTime::short(offset!(+2))), "14:03:09.123456 ");
    }

    #[test]
    fn parsed_layout_formats_date() {
        let renderer =
            LayoutTime::parse("[year]-[month]-[day]", UtcOffset::UTC).expect("valid layout");
        assert_eq!(render(&renderer), "2024-05-17 ");
    }

    #[test]
    fn parsed_layout_rejects_garbage() {
        assert!(LayoutTime::parse("[nonsense]", UtcOffset::UTC).is_err());
    }

    #[test]
    fn rfc3339_drops_fraction() {
        assert_eq!(
            render(&Rfc3339Time::new(offset!(+2))),
            "2024-05-17T14:03:09+02:00 "
        );
    }

    #[test]
    #[should_panic(expected = "cannot render timestamp")]
    fn rfc3339_rejects_negative_year() {
        let mut buffer = Buffer::new();
        Rfc3339Time::new(UtcOffset::UTC).render(&mut buffer, datetime!(-0001-01-01 00:00 UTC));
    }

    #[test]
    fn rfc3339_accepts_year_bounds() {
        let mut buffer = Buffer::new();
        let renderer = Rfc3339Time::new(UtcOffset::UTC);
        renderer.render(&mut buffer, datetime!(0000-01-01 00:00 UTC));
        renderer.render(&mut buffer, datetime!(9999-12-31 23:59:59 UTC));
        assert_eq!(
            buffer.bytes(),
            b"0000-01-01T00:00:00Z 9999-12-31T23:59:59Z "
        );
    }

    #[test]
    fn unix_renderers() {
        assert_eq!(render(&UnixSecondsTime), "1715947389 ");
        assert_eq!(render(&UnixNanosTime), "1715947389123456789 ");
    }

    #[test]
    fn no_time_renders_nothing() {
        assert_eq!(render(&NoTime), "");
    }
}
