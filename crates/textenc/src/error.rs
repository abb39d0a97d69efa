//! crates/textenc/src/error.rs
//! Error types surfaced by configuration parsing and unsupported encoder calls.

/// Error returned when an encoder configuration string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The setting name is not one of `time`, `level`, `message`, `fields`.
    #[error("unknown encoder setting: {0}")]
    UnknownSetting(String),

    /// A `name=value` token was expected.
    #[error("expected name=value, found {0:?}")]
    MissingValue(String),

    /// The value is not valid for the named setting.
    #[error("invalid value {value:?} for encoder setting {setting}")]
    InvalidValue {
        /// Setting the value was given for.
        setting: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The level name is not part of the severity enumeration.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
}

/// Capability the text encoder deliberately does not provide.
///
/// Values of this type are never returned. They describe the panic raised
/// when a host asks the encoder to embed a structured value, which the
/// line format has no representation for.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Unsupported {
    /// A structured object field.
    #[error("capability not supported by this encoder: object field {key:?}")]
    Object {
        /// Field key the host attempted to add.
        key: String,
    },

    /// A value that marshals itself into nested fields.
    #[error("capability not supported by this encoder: marshaler field {key:?}")]
    Marshaler {
        /// Field key the host attempted to add.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::UnknownSetting("colour".into()).to_string(),
            "unknown encoder setting: colour"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                setting: "message",
                value: "fixed:x".into(),
            }
            .to_string(),
            "invalid value \"fixed:x\" for encoder setting message"
        );
    }

    #[test]
    fn unsupported_messages_name_the_key() {
        let message = Unsupported::Object { key: "req".into() }.to_string();
        assert!(message.starts_with("capability not supported by this encoder"));
        assert!(message.contains("\"req\""));
    }
}
