//! crates/textenc/src/encoder/fields.rs
//! Typed field accumulation.
//!
//! Each `add_*` call appends exactly one `key=value` token. Keys and string
//! values are copied verbatim: the line format is not self-describing and no
//! quoting or escaping is applied.

use std::fmt;

use super::Encoder;
use crate::error::Unsupported;

impl Encoder {
    fn write_key(&mut self, key: &str) {
        if !self.fields.is_empty() {
            self.fields.push(b' ');
        }
        self.fields.append_str(key);
        self.fields.push(b'=');
    }

    /// Adds a string field.
    pub fn add_str(&mut self, key: &str, value: &str) {
        self.write_key(key);
        self.fields.append_str(value);
    }

    /// Adds a boolean field rendered as `true` or `false`.
    pub fn add_bool(&mut self, key: &str, value: bool) {
        self.write_key(key);
        self.fields.append_str(if value { "true" } else { "false" });
    }

    /// Adds a signed integer field in base 10.
    pub fn add_i64(&mut self, key: &str, value: i64) {
        self.write_key(key);
        self.fields.append_display(value);
    }

    /// Adds a pointer-sized signed integer field.
    pub fn add_int(&mut self, key: &str, value: isize) {
        self.write_key(key);
        self.fields.append_display(value);
    }

    /// Adds an unsigned integer field in base 10.
    pub fn add_u64(&mut self, key: &str, value: u64) {
        self.write_key(key);
        self.fields.append_display(value);
    }

    /// Adds a pointer-sized unsigned integer field.
    pub fn add_uint(&mut self, key: &str, value: usize) {
        self.write_key(key);
        self.fields.append_display(value);
    }

    /// Adds a float field.
    ///
    /// Finite values use the shortest decimal that parses back to the same
    /// `f64`, never exponent notation. Non-finite values render as `NaN`,
    /// `+Inf` and `-Inf`.
    pub fn add_f64(&mut self, key: &str, value: f64) {
        self.write_key(key);
        if value.is_nan() {
            self.fields.append_str("NaN");
        } else if value.is_infinite() {
            self.fields
                .append_str(if value.is_sign_positive() { "+Inf" } else { "-Inf" });
        } else {
            self.fields.append_display(value);
        }
    }

    /// Adds a field whose value is produced by formatting `args`.
    ///
    /// ```
    /// use textenc::Encoder;
    ///
    /// let mut encoder = Encoder::with_options(&[]);
    /// encoder.add_fmt("elapsed", format_args!("{}ms", 12));
    /// assert_eq!(encoder.fields(), b"elapsed=12ms");
    /// ```
    pub fn add_fmt(&mut self, key: &str, args: fmt::Arguments<'_>) {
        self.write_key(key);
        // Buffer::write_str never fails.
        let _ = fmt::write(&mut self.fields, args);
    }

    /// Structured values have no representation in the line format.
    ///
    /// # Panics
    ///
    /// Always panics with [`Unsupported::Object`].
    #[track_caller]
    pub fn add_object<T>(&mut self, key: &str, _value: &T) -> !
    where
        T: ?Sized,
    {
        panic!("{}", Unsupported::Object { key: key.to_owned() })
    }

    /// Self-marshaling values have no representation in the line format.
    ///
    /// # Panics
    ///
    /// Always panics with [`Unsupported::Marshaler`].
    #[track_caller]
    pub fn add_marshaler<T>(&mut self, key: &str, _value: &T) -> !
    where
        T: ?Sized,
    {
        panic!("{}", Unsupported::Marshaler { key: key.to_owned() })
    }
}
