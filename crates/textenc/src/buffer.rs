//! crates/textenc/src/buffer.rs
//! Reusable byte accumulator backing every encoder slot.
//!
//! [`Buffer`] wraps a `Vec<u8>` and only ever truncates it, so an encoder that
//! has been through a few entries stops allocating entirely. The buffer also
//! implements [`io::Write`] and [`fmt::Write`], allowing `time` formatting and
//! `write!` based number formatting to land directly in the accumulated bytes
//! without intermediate `String`s.

use std::fmt;
use std::io;

/// Growable byte sequence with O(1) logical truncation.
///
/// # Examples
///
/// ```
/// use textenc::Buffer;
///
/// let mut buffer = Buffer::with_capacity(32);
/// buffer.append_str("user=");
/// buffer.append(b"alice");
/// assert_eq!(buffer.bytes(), b"user=alice");
///
/// let capacity = buffer.capacity();
/// buffer.reset();
/// assert!(buffer.is_empty());
/// assert_eq!(buffer.capacity(), capacity);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates an empty buffer with room for at least `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Appends raw bytes.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends the UTF-8 bytes of `text`.
    #[inline]
    pub fn append_str(&mut self, text: &str) {
        self.bytes.extend_from_slice(text.as_bytes());
    }

    /// Appends a single byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Appends `byte` repeated `count` times.
    pub fn append_repeated(&mut self, byte: u8, count: usize) {
        self.bytes.resize(self.bytes.len() + count, byte);
    }

    /// Appends the [`Display`](fmt::Display) rendering of `value`.
    ///
    /// Formatting goes straight into the buffer, so integers and floats never
    /// pass through a temporary `String`.
    pub fn append_display<T>(&mut self, value: T)
    where
        T: fmt::Display,
    {
        // Buffer::write_str never fails.
        let _ = fmt::write(self, format_args!("{value}"));
    }

    /// Returns the bytes appended since the last [`reset`](Self::reset).
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the logical length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Reports whether nothing has been appended since the last reset.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the allocated capacity retained across resets.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Sets the logical length to zero while keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Consumes the buffer and returns the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("bytes", &String::from_utf8_lossy(&self.bytes))
            .field("capacity", &self.bytes.capacity())
            .finish()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.append(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
