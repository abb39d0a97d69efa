//! crates/textenc/src/layer.rs
//! Bridge between the tracing crate and the text encoder.
//!
//! [`TextLayer`] is a tracing-subscriber layer that renders every event as one
//! text line. Span fields act as base fields: each span owns a pooled encoder
//! cloned from its parent's, and each event clones the encoder of the span it
//! occurs in before adding its own fields. Parents are never mutated by their
//! children.
//!
//! # Reentrancy
//!
//! The pool and the renderers emit their own `tracing` events. A global
//! dispatcher does not guard against reentry, so every callback marks the
//! current thread as busy and ignores spans and events raised while it is
//! still running.
//!
//! # Usage
//!
//! ```rust,ignore
//! use textenc::{TextLayer, no_time};
//! use tracing_subscriber::prelude::*;
//!
//! let layer = TextLayer::new(std::io::stderr()).with_options([no_time()]);
//! tracing_subscriber::registry().with(layer).init();
//!
//! let span = tracing::info_span!("request", id = 7);
//! let _guard = span.enter();
//! tracing::warn!(path = "/health", "slow response");
//! // WARN  slow response id=7 path=/health
//! ```

use std::cell::Cell;
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use time::OffsetDateTime;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::encoder::Encoder;
use crate::level::Level;
use crate::option::EncoderOption;
use crate::pool::{EncoderPool, PooledEncoder};

/// Name of the field tracing macros store the formatted message under.
const MESSAGE_FIELD: &str = "message";

thread_local! {
    static IN_CALLBACK: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside a layer callback until dropped.
struct CallbackGuard(());

impl CallbackGuard {
    /// Returns `None` when the thread is already inside a callback.
    fn enter() -> Option<Self> {
        if IN_CALLBACK.with(|busy| busy.replace(true)) {
            None
        } else {
            Some(Self(()))
        }
    }
}

impl Drop for CallbackGuard {
    fn drop(&mut self) {
        IN_CALLBACK.with(|busy| busy.set(false));
    }
}

/// A tracing layer writing events through pooled text encoders.
pub struct TextLayer<W> {
    writer: Mutex<W>,
    pool: Arc<EncoderPool>,
    options: Vec<EncoderOption>,
    last_error: Mutex<Option<io::Error>>,
}

/// Span extension holding the span's base fields.
struct SpanFields(PooledEncoder);

impl<W> TextLayer<W> {
    /// Creates a layer writing to `writer` with encoders from the global pool.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            pool: Arc::clone(EncoderPool::global()),
            options: Vec::new(),
            last_error: Mutex::new(None),
        }
    }

    /// Sets the options applied to every encoder the layer checks out.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = EncoderOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Draws encoders from `pool` instead of the global pool.
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<EncoderPool>) -> Self {
        self.pool = pool;
        self
    }

    /// Takes the most recent write failure, if any.
    ///
    /// Layers cannot return errors to the code emitting events, so the last
    /// failure is parked here for the host to collect.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn take_write_error(&self) -> Option<io::Error> {
        self.last_error
            .lock()
            .expect("text layer error mutex poisoned")
            .take()
    }

    /// Consumes the layer and returns the wrapped writer.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
            .into_inner()
            .expect("text layer writer mutex poisoned")
    }

    fn checkout(&self) -> PooledEncoder {
        EncoderPool::acquire_from(Arc::clone(&self.pool), &self.options)
    }
}

impl<W> fmt::Debug for TextLayer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLayer")
            .field("pool", &self.pool)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S, W> Layer<S> for TextLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + Send + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(_guard) = CallbackGuard::enter() else {
            return;
        };
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut encoder = span
            .parent()
            .and_then(|parent| {
                parent
                    .extensions()
                    .get::<SpanFields>()
                    .map(|fields| fields.0.clone())
            })
            .unwrap_or_else(|| self.checkout());
        attrs.record(&mut FieldVisitor::new(&mut encoder, None));
        span.extensions_mut().insert(SpanFields(encoder));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(_guard) = CallbackGuard::enter() else {
            return;
        };
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(SpanFields(encoder)) = extensions.get_mut::<SpanFields>() {
            values.record(&mut FieldVisitor::new(encoder, None));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(_guard) = CallbackGuard::enter() else {
            return;
        };
        let mut encoder = ctx
            .event_span(event)
            .and_then(|span| {
                span.extensions()
                    .get::<SpanFields>()
                    .map(|fields| fields.0.clone())
            })
            .unwrap_or_else(|| self.checkout());

        let mut message = String::new();
        event.record(&mut FieldVisitor::new(&mut encoder, Some(&mut message)));

        let level = entry_level(*event.metadata().level());
        let timestamp = OffsetDateTime::now_utc();
        let result = {
            let mut writer = self.writer.lock().expect("text layer writer mutex poisoned");
            encoder.write_entry(&mut *writer, &message, level, timestamp)
        };
        if let Err(err) = result {
            *self
                .last_error
                .lock()
                .expect("text layer error mutex poisoned") = Some(err);
        }
    }
}

fn entry_level(level: tracing::Level) -> Level {
    if level == tracing::Level::ERROR {
        Level::Error
    } else if level == tracing::Level::WARN {
        Level::Warn
    } else if level == tracing::Level::INFO {
        Level::Info
    } else {
        Level::Debug
    }
}

/// Routes tracing field values to the typed `add_*` operations.
struct FieldVisitor<'a> {
    encoder: &'a mut Encoder,
    message: Option<&'a mut String>,
}

impl<'a> FieldVisitor<'a> {
    fn new(encoder: &'a mut Encoder, message: Option<&'a mut String>) -> Self {
        Self { encoder, message }
    }

    fn message_sink(&mut self, field: &Field) -> Option<&mut String> {
        if field.name() == MESSAGE_FIELD {
            self.message.as_deref_mut()
        } else {
            None
        }
    }
}

impl Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.encoder.add_f64(field.name(), value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.encoder.add_i64(field.name(), value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.encoder.add_u64(field.name(), value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.encoder.add_bool(field.name(), value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let Some(message) = self.message_sink(field) {
            message.push_str(value);
        } else {
            self.encoder.add_str(field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if let Some(message) = self.message_sink(field) {
            // String::write_fmt never fails.
            let _ = write!(message, "{value:?}");
        } else {
            self.encoder.add_fmt(field.name(), format_args!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_levels_map_to_entry_levels() {
        assert_eq!(entry_level(tracing::Level::TRACE), Level::Debug);
        assert_eq!(entry_level(tracing::Level::DEBUG), Level::Debug);
        assert_eq!(entry_level(tracing::Level::INFO), Level::Info);
        assert_eq!(entry_level(tracing::Level::WARN), Level::Warn);
        assert_eq!(entry_level(tracing::Level::ERROR), Level::Error);
    }

    #[test]
    fn callback_guard_rejects_reentry() {
        let outer = CallbackGuard::enter().expect("first entry");
        assert!(CallbackGuard::enter().is_none());
        drop(outer);
        assert!(CallbackGuard::enter().is_some());
    }

    #[test]
    fn into_writer_returns_sink() {
        let layer = TextLayer::new(vec![1_u8, 2]);
        assert_eq!(layer.into_writer(), vec![1, 2]);
    }
}
