//! crates/textenc/src/render/message.rs
//! Message column strategies.

use super::MessageRenderer;
use crate::buffer::Buffer;

/// Writes the message verbatim followed by a space.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleMessage;

impl MessageRenderer for SimpleMessage {
    fn render(&self, buffer: &mut Buffer, message: &str) {
        buffer.append_str(message);
        buffer.push(b' ');
    }
}

/// Writes exactly `width` bytes of message followed by a space.
///
/// Longer messages are cut at `width` bytes; the cut may fall inside a
/// multi-byte character. Shorter messages are padded with spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWidthMessage {
    width: usize,
}

impl FixedWidthMessage {
    /// Creates a renderer producing a `width` byte message column.
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    /// Returns the column width in bytes, separator excluded.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }
}

impl MessageRenderer for FixedWidthMessage {
    fn render(&self, buffer: &mut Buffer, message: &str) {
        let bytes = message.as_bytes();
        if bytes.len() < self.width {
            buffer.append(bytes);
            buffer.append_repeated(b' ', self.width - bytes.len());
        } else {
            buffer.append(&bytes[..self.width]);
        }
        buffer.push(b' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(renderer: &dyn MessageRenderer, message: &str) -> String {
        let mut buffer = Buffer::new();
        renderer.render(&mut buffer, message);
        String::from_utf8(buffer.into_vec()).expect("utf-8")
    }

    #[test]
    fn simple_message_appends_separator() {
        assert_eq!(render(&SimpleMessage, "login"), "login ");
        assert_eq!(render(&SimpleMessage, ""), " ");
    }

    #[test]
    fn fixed_width_pads_short_messages() {
        assert_eq!(render(&FixedWidthMessage::new(5), "hi"), "hi    ");
    }

    #[test]
    fn fixed_width_truncates_long_messages() {
        assert_eq!(render(&FixedWidthMessage::new(5), "hello world"), "hello ");
    }

    #[test]
    fn fixed_width_keeps_exact_messages() {
        assert_eq!(render(&FixedWidthMessage::new(5), "exact"), "exact ");
    }

    #[test]
    fn zero_width_renders_separator_only() {
        assert_eq!(render(&FixedWidthMessage::new(0), "anything"), " ");
    }
}
