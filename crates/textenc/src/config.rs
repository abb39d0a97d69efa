//! crates/textenc/src/config.rs
//! Declarative encoder configuration.
//!
//! [`EncoderConfig`] names one selector per slot and turns into the ordered
//! option list understood by the pool. It parses from and displays as a
//! comma separated `name=value` list:
//!
//! ```
//! use textenc::{EncoderConfig, LevelFormat, MessageFormat, TimeFormat};
//!
//! let config: EncoderConfig = "time=unix,level=abbr,message=fixed:20".parse()?;
//! assert_eq!(config.time, TimeFormat::UnixSeconds);
//! assert_eq!(config.level, LevelFormat::Abbreviated);
//! assert_eq!(config.message, MessageFormat::FixedWidth(20));
//! assert_eq!(
//!     config.to_string(),
//!     "time=unix,level=abbr,message=fixed:20,fields=retain"
//! );
//! # Ok::<(), textenc::ConfigError>(())
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::encoder::FieldsPolicy;
use crate::error::ConfigError;
use crate::option::{
    EncoderOption, abbr_level, color_level, fixed_width_message, no_level, no_time,
    reset_fields_after_write, retain_fields, rfc3339_time, short_time, simple_level,
    simple_message, unix_nanos_time, unix_seconds_time,
};
use crate::pool::{EncoderPool, PooledEncoder};

/// Time column selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TimeFormat {
    /// `HH:MM:SS.ffffff` in the local offset.
    #[default]
    Short,
    /// RFC 3339 in the local offset.
    Rfc3339,
    /// Seconds since the Unix epoch.
    UnixSeconds,
    /// Nanoseconds since the Unix epoch.
    UnixNanos,
    /// No time column.
    None,
}

impl TimeFormat {
    /// Returns the configuration token for this selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Rfc3339 => "rfc3339",
            Self::UnixSeconds => "unix",
            Self::UnixNanos => "unix-nanos",
            Self::None => "none",
        }
    }

    /// Builds the option installing this selector.
    #[must_use]
    pub fn option(self) -> EncoderOption {
        match self {
            Self::Short => short_time(),
            Self::Rfc3339 => rfc3339_time(),
            Self::UnixSeconds => unix_seconds_time(),
            Self::UnixNanos => unix_nanos_time(),
            Self::None => no_time(),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "rfc3339" => Ok(Self::Rfc3339),
            "unix" | "unix-seconds" => Ok(Self::UnixSeconds),
            "unix-nanos" => Ok(Self::UnixNanos),
            "none" => Ok(Self::None),
            _ => Err(invalid("time", s)),
        }
    }
}

/// Level column selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LevelFormat {
    /// Fixed-width upper-case names.
    #[default]
    Full,
    /// Three-letter abbreviations.
    Abbreviated,
    /// Fixed-width names in ANSI colours.
    Colorized,
    /// No level column.
    None,
}

impl LevelFormat {
    /// Returns the configuration token for this selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Abbreviated => "abbr",
            Self::Colorized => "color",
            Self::None => "none",
        }
    }

    /// Builds the option installing this selector.
    #[must_use]
    pub fn option(self) -> EncoderOption {
        match self {
            Self::Full => simple_level(),
            Self::Abbreviated => abbr_level(),
            Self::Colorized => color_level(),
            Self::None => no_level(),
        }
    }
}

impl fmt::Display for LevelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "abbr" | "abbreviated" => Ok(Self::Abbreviated),
            "color" | "colorized" => Ok(Self::Colorized),
            "none" => Ok(Self::None),
            _ => Err(invalid("level", s)),
        }
    }
}

/// Message column selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MessageFormat {
    /// The message as given.
    #[default]
    Verbatim,
    /// The message truncated or padded to this many bytes.
    FixedWidth(usize),
}

impl MessageFormat {
    /// Builds the option installing this selector.
    #[must_use]
    pub fn option(self) -> EncoderOption {
        match self {
            Self::Verbatim => simple_message(),
            Self::FixedWidth(width) => fixed_width_message(width),
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbatim => f.write_str("verbatim"),
            Self::FixedWidth(width) => write!(f, "fixed:{width}"),
        }
    }
}

impl FromStr for MessageFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "verbatim" {
            return Ok(Self::Verbatim);
        }
        s.strip_prefix("fixed:")
            .and_then(|width| width.parse().ok())
            .map(Self::FixedWidth)
            .ok_or_else(|| invalid("message", s))
    }
}

impl FromStr for FieldsPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retain" => Ok(Self::Retain),
            "reset" => Ok(Self::ResetAfterWrite),
            _ => Err(invalid("fields", s)),
        }
    }
}

impl fmt::Display for FieldsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Retain => "retain",
            Self::ResetAfterWrite => "reset",
        })
    }
}

fn invalid(setting: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        setting,
        value: value.to_owned(),
    }
}

/// Complete encoder configuration, one selector per slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderConfig {
    /// Time column.
    pub time: TimeFormat,
    /// Level column.
    pub level: LevelFormat,
    /// Message column.
    pub message: MessageFormat,
    /// Whether fields survive a write.
    pub fields: FieldsPolicy,
}

impl EncoderConfig {
    /// Applies a single `name=value` token (e.g. `"level=abbr"`).
    pub fn apply_setting(&mut self, token: &str) -> Result<(), ConfigError> {
        let (name, value) = token
            .split_once('=')
            .ok_or_else(|| ConfigError::MissingValue(token.to_owned()))?;
        let value = value.trim();

        match name.trim() {
            "time" => self.time = value.parse()?,
            "level" => self.level = value.parse()?,
            "message" => self.message = value.parse()?,
            "fields" => self.fields = value.parse()?,
            other => return Err(ConfigError::UnknownSetting(other.to_owned())),
        }
        Ok(())
    }

    /// Returns the options for this configuration in slot order.
    #[must_use]
    pub fn options(&self) -> Vec<EncoderOption> {
        vec![
            self.time.option(),
            self.level.option(),
            self.message.option(),
            match self.fields {
                FieldsPolicy::Retain => retain_fields(),
                FieldsPolicy::ResetAfterWrite => reset_fields_after_write(),
            },
        ]
    }

    /// Checks a configured encoder out of `pool`.
    #[must_use]
    pub fn acquire_from(&self, pool: Arc<EncoderPool>) -> PooledEncoder {
        EncoderPool::acquire_from(pool, &self.options())
    }

    /// Checks a configured encoder out of the process-wide pool.
    #[must_use]
    pub fn acquire(&self) -> PooledEncoder {
        self.acquire_from(Arc::clone(EncoderPool::global()))
    }
}

impl FromStr for EncoderConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        for token in s.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            config.apply_setting(token)?;
        }
        tracing::debug!(%config, "parsed encoder configuration");
        Ok(config)
    }
}

impl fmt::Display for EncoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time={},level={},message={},fields={}",
            self.time, self.level, self.message, self.fields
        )
    }
}
