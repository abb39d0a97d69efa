//! Integration tests for the tracing-subscriber layer.
//!
//! These tests verify:
//! 1. Events become one text line each, message first, fields after
//! 2. Span fields are inherited by events and child spans
//! 3. Sibling spans never see each other's fields
//! 4. Sink failures are parked for the host

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use textenc::{EncoderPool, TextLayer, abbr_level, no_time};
use tracing_subscriber::prelude::*;

// ============================================================================
// Helper functions
// ============================================================================

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("sink mutex poisoned");
        String::from_utf8(bytes.clone())
            .expect("utf-8 output")
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("sink mutex poisoned").write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> Vec<String> {
    let sink = SharedSink::default();
    let layer = TextLayer::new(sink.clone())
        .with_pool(Arc::new(EncoderPool::new(4)))
        .with_options([no_time()]);
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    sink.lines()
}

// ============================================================================
// Event Tests
// ============================================================================

/// A plain event renders its message and fields.
#[test]
fn event_fields_follow_message() {
    let lines = capture(|| {
        tracing::info!(user = "alice", id = 42, "login");
    });
    assert_eq!(lines, ["INFO  login user=alice id=42"]);
}

/// Every tracing level maps onto an entry level.
#[test]
fn levels_are_mapped() {
    let lines = capture(|| {
        tracing::trace!("t");
        tracing::debug!("d");
        tracing::info!("i");
        tracing::warn!("w");
        tracing::error!("e");
    });
    assert_eq!(
        lines,
        ["DEBUG t ", "DEBUG d ", "INFO  i ", "WARN  w ", "ERROR e "]
    );
}

/// Typed values go through the matching typed operations.
#[test]
fn typed_values() {
    let lines = capture(|| {
        tracing::warn!(ok = false, n = -3_i64, big = 7_u64, ratio = 0.5, path = ?"/tmp", "mixed");
    });
    assert_eq!(
        lines,
        ["WARN  mixed ok=false n=-3 big=7 ratio=0.5 path=\"/tmp\""]
    );
}

/// Formatted messages are rendered before the fields.
#[test]
fn formatted_message() {
    let lines = capture(|| {
        let attempt = 3;
        tracing::error!(code = 500_u64, "attempt {attempt} failed");
    });
    assert_eq!(lines, ["ERROR attempt 3 failed code=500"]);
}

// ============================================================================
// Span Tests
// ============================================================================

/// Events inside a span carry the span's fields first.
#[test]
fn span_fields_prefix_event_fields() {
    let lines = capture(|| {
        let span = tracing::info_span!("request", req = 7_u64);
        let _guard = span.enter();
        tracing::warn!(path = "/x", "slow");
    });
    assert_eq!(lines, ["WARN  slow req=7 path=/x"]);
}

/// Child spans extend their parent's fields without changing them.
#[test]
fn nested_spans_inherit() {
    let lines = capture(|| {
        let outer = tracing::info_span!("svc", svc = "api");
        let _outer = outer.enter();
        {
            let inner = tracing::info_span!("req", req = 1_u64);
            let _inner = inner.enter();
            tracing::info!("inner");
        }
        tracing::info!("outer");
    });
    assert_eq!(lines, ["INFO  inner svc=api req=1", "INFO  outer svc=api"]);
}

/// Values recorded after span creation appear in later events.
#[test]
fn recorded_values_are_appended() {
    let lines = capture(|| {
        let span = tracing::info_span!("job", id = 1_u64, status = tracing::field::Empty);
        let _guard = span.enter();
        tracing::info!("before");
        span.record("status", "done");
        tracing::info!("after");
    });
    assert_eq!(lines, ["INFO  before id=1", "INFO  after id=1 status=done"]);
}

/// Sibling spans do not leak fields into each other.
#[test]
fn sibling_spans_are_isolated() {
    let lines = capture(|| {
        for req in 0..2_u64 {
            let span = tracing::info_span!("req", req);
            let _guard = span.enter();
            tracing::info!("hit");
        }
    });
    assert_eq!(lines, ["INFO  hit req=0", "INFO  hit req=1"]);
}

// ============================================================================
// Configuration and Error Tests
// ============================================================================

/// Layer options reach every encoder it checks out.
#[test]
fn options_apply_to_layer_encoders() {
    let sink = SharedSink::default();
    let layer = TextLayer::new(sink.clone())
        .with_pool(Arc::new(EncoderPool::new(1)))
        .with_options([no_time(), abbr_level()]);
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!("careful");
    });
    assert_eq!(sink.lines(), ["WRN careful "]);
}

struct Closed;

impl Write for Closed {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A failing sink does not disturb the caller; the error is kept.
#[test]
fn write_errors_are_parked() {
    let subscriber = tracing_subscriber::registry()
        .with(TextLayer::new(Closed).with_options([no_time()]));
    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("dropped");
    });

    let layer = dispatch
        .downcast_ref::<TextLayer<Closed>>()
        .expect("layer installed");
    let err = layer.take_write_error().expect("error recorded");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert!(layer.take_write_error().is_none());
}
