//! Rendering strategies for the three prefix columns of a log line.
//!
//! Each column is produced by a single-method trait object held by the
//! [`Encoder`](crate::Encoder). Strategies are immutable once built and are
//! shared between clones through [`Arc`](std::sync::Arc), so swapping one in
//! is a pointer store rather than a copy of its configuration.
//!
//! Every strategy writes its own trailing separator. A suppressed column
//! writes nothing at all.

mod level;
mod message;
mod timestamp;

pub use level::{LevelMapRenderer, NoLevel};
pub use message::{FixedWidthMessage, SimpleMessage};
pub use timestamp::{
    LayoutTime, NoTime, Rfc3339Time, UnixNanosTime, UnixSecondsTime, local_offset,
};

use std::fmt;

use time::OffsetDateTime;

use crate::buffer::Buffer;
use crate::level::Level;

/// Renders the timestamp column.
pub trait TimeRenderer: fmt::Debug + Send + Sync {
    /// Appends `timestamp` and its trailing separator to `buffer`.
    fn render(&self, buffer: &mut Buffer, timestamp: OffsetDateTime);
}

/// Renders the level column.
pub trait LevelRenderer: fmt::Debug + Send + Sync {
    /// Appends the label for `level` to `buffer`.
    ///
    /// # Panics
    ///
    /// Implementations backed by a [`LevelMap`](crate::LevelMap) panic when
    /// the map has no label for `level`.
    fn render(&self, buffer: &mut Buffer, level: Level);
}

/// Renders the message column.
pub trait MessageRenderer: fmt::Debug + Send + Sync {
    /// Appends `message` and its trailing separator to `buffer`.
    fn render(&self, buffer: &mut Buffer, message: &str);
}
