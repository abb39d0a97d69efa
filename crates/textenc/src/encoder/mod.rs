//! crates/textenc/src/encoder/mod.rs
//! The stateful encoder: three renderer slots plus two reusable buffers.
//!
//! # Design
//!
//! An [`Encoder`] owns a `fields` buffer holding the space separated
//! `key=value` tokens added so far and an `output` buffer in which each line
//! is composed. [`write_entry`](Encoder::write_entry) renders the prefix
//! columns straight into `output`, appends the field bytes and a newline, and
//! hands the finished line to the sink in a single `write_all` call.
//!
//! # Invariants
//!
//! - `fields` is empty or a sequence of `key=value` tokens joined by exactly
//!   one space, with no leading or trailing separator.
//! - `output` is cleared at the start of every write, so stale prefixes never
//!   leak into a later line.
//! - Renderers are immutable and shared by [`Arc`]; cloning an encoder copies
//!   the field bytes and nothing else.

mod fields;

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use time::OffsetDateTime;

use crate::buffer::Buffer;
use crate::level::{Level, LevelMap};
use crate::option::EncoderOption;
use crate::render::{
    LayoutTime, LevelMapRenderer, LevelRenderer, MessageRenderer, SimpleMessage, TimeRenderer,
    local_offset,
};

/// Default pre-sized capacity of each encoder buffer, in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Whether accumulated fields survive [`Encoder::write_entry`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FieldsPolicy {
    /// Fields persist so several entries can share them.
    #[default]
    Retain,
    /// Fields are cleared once the line has been handed to the sink.
    ResetAfterWrite,
}

/// Plain-text encoder for one log entry (or a family of entries sharing base
/// fields).
///
/// Encoders are normally checked out of an
/// [`EncoderPool`](crate::EncoderPool) through [`crate::new`]; the pool hands
/// back a [`PooledEncoder`](crate::PooledEncoder) that dereferences to this
/// type.
///
/// # Examples
///
/// ```
/// use textenc::{Encoder, Level, no_level, no_time};
/// use time::OffsetDateTime;
///
/// let mut encoder = Encoder::with_options(&[no_time(), no_level()]);
/// encoder.add_str("user", "alice");
/// encoder.add_i64("id", 42);
///
/// let mut sink = Vec::new();
/// encoder.write_entry(&mut sink, "login", Level::Info, OffsetDateTime::UNIX_EPOCH)?;
/// assert_eq!(sink, b"login user=alice id=42\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Encoder {
    time: Arc<dyn TimeRenderer>,
    level: Arc<dyn LevelRenderer>,
    message: Arc<dyn MessageRenderer>,
    fields_policy: FieldsPolicy,
    fields: Buffer,
    output: Buffer,
}

impl Encoder {
    /// Creates an unpooled encoder with the default renderers followed by
    /// `options`.
    #[must_use]
    pub fn with_options(options: &[EncoderOption]) -> Self {
        let mut encoder = Self::from_defaults(&Defaults::new(), DEFAULT_BUFFER_CAPACITY);
        for option in options {
            option.apply(&mut encoder);
        }
        encoder
    }

    pub(crate) fn from_defaults(defaults: &Defaults, buffer_capacity: usize) -> Self {
        Self {
            time: Arc::clone(&defaults.time),
            level: Arc::clone(&defaults.level),
            message: Arc::clone(&defaults.message),
            fields_policy: FieldsPolicy::default(),
            fields: Buffer::with_capacity(buffer_capacity),
            output: Buffer::with_capacity(buffer_capacity),
        }
    }

    /// Returns the encoder to its freshly constructed state without
    /// releasing buffer capacity.
    pub(crate) fn restore(&mut self, defaults: &Defaults) {
        self.fields.reset();
        self.output.reset();
        defaults.apply(self);
    }

    /// Copies renderers, policy and field bytes into `target`.
    ///
    /// `target` keeps its own allocations; only its contents are replaced.
    pub(crate) fn copy_into(&self, target: &mut Self) {
        target.time = Arc::clone(&self.time);
        target.level = Arc::clone(&self.level);
        target.message = Arc::clone(&self.message);
        target.fields_policy = self.fields_policy;
        target.fields.reset();
        target.fields.append(self.fields.bytes());
        target.output.reset();
    }

    /// Applies a single option, overwriting the slot it targets.
    pub fn apply(&mut self, option: &EncoderOption) {
        option.apply(self);
    }

    pub(crate) fn set_time_renderer(&mut self, renderer: Arc<dyn TimeRenderer>) {
        self.time = renderer;
    }

    pub(crate) fn set_level_renderer(&mut self, renderer: Arc<dyn LevelRenderer>) {
        self.level = renderer;
    }

    pub(crate) fn set_message_renderer(&mut self, renderer: Arc<dyn MessageRenderer>) {
        self.message = renderer;
    }

    pub(crate) fn set_fields_policy(&mut self, policy: FieldsPolicy) {
        self.fields_policy = policy;
    }

    /// Returns the active fields policy.
    #[must_use]
    pub const fn fields_policy(&self) -> FieldsPolicy {
        self.fields_policy
    }

    /// Returns the accumulated `key=value` tokens.
    #[must_use]
    pub fn fields(&self) -> &[u8] {
        self.fields.bytes()
    }

    #[cfg(test)]
    pub(crate) fn fields_capacity(&self) -> usize {
        self.fields.capacity()
    }

    /// Discards every accumulated field.
    pub fn reset_fields(&mut self) {
        self.fields.reset();
    }

    /// Renders one line and writes it to `sink`.
    ///
    /// The line is `time`, `level` and `message` as produced by the configured
    /// renderers, then the accumulated fields, then `\n`. The whole line is
    /// passed to [`Write::write_all`] once; a failure is returned unchanged and
    /// is not retried, so a sink that fails part way may hold a partial line.
    ///
    /// Under [`FieldsPolicy::ResetAfterWrite`] the fields are cleared after
    /// the write whether or not it succeeded.
    ///
    /// # Panics
    ///
    /// Panics if a map based level renderer has no label for `level`, or if
    /// the time renderer cannot express `timestamp` (for example an RFC 3339
    /// renderer given a year before 0).
    pub fn write_entry<W>(
        &mut self,
        sink: &mut W,
        message: &str,
        level: Level,
        timestamp: OffsetDateTime,
    ) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        self.output.reset();
        self.time.render(&mut self.output, timestamp);
        self.level.render(&mut self.output, level);
        self.message.render(&mut self.output, message);
        self.output.append(self.fields.bytes());
        self.output.push(b'\n');

        let result = sink.write_all(self.output.bytes());
        if self.fields_policy == FieldsPolicy::ResetAfterWrite {
            self.fields.reset();
        }
        result
    }
}

impl Clone for Encoder {
    /// Forks the encoder: renderers are shared, field bytes are copied.
    fn clone(&self) -> Self {
        Self {
            time: Arc::clone(&self.time),
            level: Arc::clone(&self.level),
            message: Arc::clone(&self.message),
            fields_policy: self.fields_policy,
            fields: self.fields.clone(),
            output: Buffer::with_capacity(self.output.capacity()),
        }
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("time", &self.time)
            .field("level", &self.level)
            .field("message", &self.message)
            .field("fields_policy", &self.fields_policy)
            .field("fields", &String::from_utf8_lossy(self.fields.bytes()))
            .finish_non_exhaustive()
    }
}

/// Renderer set every checkout starts from.
///
/// Built once per pool so the local offset lookup and level table
/// construction stay off the per-entry path.
#[derive(Clone, Debug)]
pub(crate) struct Defaults {
    time: Arc<dyn TimeRenderer>,
    level: Arc<dyn LevelRenderer>,
    message: Arc<dyn MessageRenderer>,
}

impl Defaults {
    pub(crate) fn new() -> Self {
        Self {
            time: Arc::new(LayoutTime::short(local_offset())),
            level: Arc::new(LevelMapRenderer::new(LevelMap::plain())),
            message: Arc::new(SimpleMessage),
        }
    }

    fn apply(&self, encoder: &mut Encoder) {
        encoder.set_time_renderer(Arc::clone(&self.time));
        encoder.set_level_renderer(Arc::clone(&self.level));
        encoder.set_message_renderer(Arc::clone(&self.message));
        encoder.set_fields_policy(FieldsPolicy::default());
    }
}
