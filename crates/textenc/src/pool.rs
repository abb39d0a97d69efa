//! Thread-safe free list of encoders.
//!
//! This module provides an [`EncoderPool`] that removes per-entry allocation
//! from the logging hot path. Encoders are handed out wrapped in a
//! [`PooledEncoder`] guard and go back onto the free list when the guard is
//! dropped or [`free`](PooledEncoder::free)d.
//!
//! # Design
//!
//! The pool is a stack behind a [`Mutex`]: returned encoders are pushed and
//! checkouts pop, so the most recently used (and most likely cache-warm)
//! encoder is reused first. The lock is held only for the push or pop.
//!
//! # Reset on checkout
//!
//! Encoders are returned untouched and cleared when they are checked out
//! again. Clearing on return would race with a clone taken from the same
//! encoder just before it was freed; clearing on checkout ties the reset to the
//! new owner.
//!
//! # Ownership Model
//!
//! The guard owns its encoder outright, so two callers can never hold the
//! same instance, and [`free`](PooledEncoder::free) consumes the guard so a
//! freed encoder cannot be touched again. Guards hold an [`Arc`] to their pool
//! and may outlive the scope that created them.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, OnceLock};

use crate::encoder::{DEFAULT_BUFFER_CAPACITY, Defaults, Encoder};
use crate::option::EncoderOption;

static GLOBAL: OnceLock<Arc<EncoderPool>> = OnceLock::new();

/// A thread-safe pool of reusable encoders.
///
/// # Capacity
///
/// The pool retains at most `max_encoders` idle encoders. Returning an
/// encoder to a full pool drops it; checking out of an empty pool allocates a
/// new encoder with buffers pre-sized to `buffer_capacity` bytes.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use textenc::{EncoderPool, Level, no_time};
/// use time::OffsetDateTime;
///
/// let pool = Arc::new(EncoderPool::new(4));
/// let mut encoder = EncoderPool::acquire_from(Arc::clone(&pool), &[no_time()]);
/// encoder.add_u64("attempt", 3);
///
/// let mut sink = Vec::new();
/// encoder.write_entry(&mut sink, "retrying", Level::Warn, OffsetDateTime::now_utc())?;
/// encoder.free();
///
/// assert_eq!(pool.available(), 1);
/// assert_eq!(sink, b"WARN  retrying attempt=3\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct EncoderPool {
    /// Stack of idle encoders, protected by mutex.
    encoders: Mutex<Vec<Encoder>>,
    /// Maximum number of idle encoders to retain.
    max_encoders: usize,
    /// Initial capacity of each buffer in a newly allocated encoder.
    buffer_capacity: usize,
    /// Renderers installed on every checkout before caller options.
    defaults: Defaults,
}

impl EncoderPool {
    /// Creates a pool retaining up to `max_encoders` idle encoders.
    #[must_use]
    pub fn new(max_encoders: usize) -> Self {
        Self::with_buffer_capacity(max_encoders, DEFAULT_BUFFER_CAPACITY)
    }

    /// Creates a pool whose new encoders pre-size their buffers to
    /// `buffer_capacity` bytes.
    #[must_use]
    pub fn with_buffer_capacity(max_encoders: usize, buffer_capacity: usize) -> Self {
        Self {
            encoders: Mutex::new(Vec::with_capacity(max_encoders)),
            max_encoders,
            buffer_capacity,
            defaults: Defaults::new(),
        }
    }

    /// Returns the process-wide pool used by [`crate::new`].
    ///
    /// The pool is created on first use and sized from the available
    /// parallelism.
    pub fn global() -> &'static Arc<Self> {
        GLOBAL.get_or_init(|| Arc::new(Self::default()))
    }

    /// Checks an encoder out of `pool` and configures it.
    ///
    /// The encoder's buffers are cleared, the default renderers are installed
    /// and then every option in `options` is applied in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn acquire_from(pool: Arc<Self>, options: &[EncoderOption]) -> PooledEncoder {
        let mut encoder = pool.checkout();
        for option in options {
            option.apply(&mut encoder);
        }
        PooledEncoder {
            encoder: Some(encoder),
            pool,
        }
    }

    fn checkout(&self) -> Encoder {
        let encoder = {
            let mut encoders = self.encoders.lock().expect("encoder pool mutex poisoned");
            encoders.pop()
        };

        match encoder {
            Some(mut encoder) => {
                encoder.restore(&self.defaults);
                encoder
            }
            None => {
                tracing::trace!(
                    buffer_capacity = self.buffer_capacity,
                    "encoder pool empty, allocating"
                );
                Encoder::from_defaults(&self.defaults, self.buffer_capacity)
            }
        }
    }

    /// Returns an encoder to the pool.
    ///
    /// If the pool is at capacity, the encoder is dropped instead.
    fn release(&self, encoder: Encoder) {
        let mut encoders = self.encoders.lock().expect("encoder pool mutex poisoned");
        if encoders.len() < self.max_encoders {
            encoders.push(encoder);
        }
    }

    /// Drops every idle encoder and returns how many were released.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn shrink(&self) -> usize {
        let drained = {
            let mut encoders = self.encoders.lock().expect("encoder pool mutex poisoned");
            std::mem::take(&mut *encoders)
        };
        let released = drained.len();
        tracing::debug!(released, "encoder pool shrunk");
        released
    }

    /// Returns the number of idle encoders currently in the pool.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn available(&self) -> usize {
        self.encoders
            .lock()
            .expect("encoder pool mutex poisoned")
            .len()
    }

    /// Returns the maximum number of idle encoders the pool will retain.
    #[must_use]
    pub const fn max_encoders(&self) -> usize {
        self.max_encoders
    }

    /// Returns the initial buffer capacity of newly allocated encoders.
    #[must_use]
    pub const fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}

impl Default for EncoderPool {
    /// Creates a pool with capacity based on available parallelism.
    fn default() -> Self {
        let max_encoders = std::thread::available_parallelism()
            .map(|p| p.get() * 4)
            .unwrap_or(16);
        Self::new(max_encoders)
    }
}

/// RAII guard owning a checked-out [`Encoder`].
///
/// Dereferences to the encoder. Dropping the guard returns the encoder to
/// its pool; [`Clone`] forks it into a second guard from the same pool.
#[derive(Debug)]
pub struct PooledEncoder {
    /// The encoder, wrapped in Option for take-on-drop pattern.
    encoder: Option<Encoder>,
    /// Pool the encoder returns to.
    pool: Arc<EncoderPool>,
}

impl PooledEncoder {
    /// Returns the encoder to the pool.
    ///
    /// Equivalent to dropping the guard; spelled out for call sites that
    /// want the hand-back to be visible.
    pub fn free(self) {
        drop(self);
    }

    /// Detaches the encoder from the pool; it will not be recycled.
    #[must_use]
    pub fn into_inner(mut self) -> Encoder {
        self.encoder.take().expect("encoder already taken")
    }

    /// Returns the pool this encoder belongs to.
    #[must_use]
    pub fn pool(&self) -> &Arc<EncoderPool> {
        &self.pool
    }
}

impl Clone for PooledEncoder {
    /// Checks a second encoder out of the same pool carrying identical
    /// renderers and an independent copy of the accumulated fields.
    fn clone(&self) -> Self {
        let mut encoder = self.pool.checkout();
        self.deref().copy_into(&mut encoder);
        Self {
            encoder: Some(encoder),
            pool: Arc::clone(&self.pool),
        }
    }
}

impl Deref for PooledEncoder {
    type Target = Encoder;

    fn deref(&self) -> &Self::Target {
        self.encoder.as_ref().expect("encoder already taken")
    }
}

impl DerefMut for PooledEncoder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.encoder.as_mut().expect("encoder already taken")
    }
}

impl Drop for PooledEncoder {
    fn drop(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            self.pool.release(encoder);
        }
    }
}
