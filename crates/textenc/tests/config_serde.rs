//! Serde round-trips for encoder configuration.
#![cfg(feature = "serde")]

use textenc::{EncoderConfig, FieldsPolicy, Level, LevelFormat, MessageFormat, TimeFormat};

#[test]
fn config_serializes_with_kebab_case_selectors() {
    let config = EncoderConfig {
        time: TimeFormat::UnixNanos,
        level: LevelFormat::Abbreviated,
        message: MessageFormat::FixedWidth(10),
        fields: FieldsPolicy::ResetAfterWrite,
    };
    let json = serde_json::to_value(config).expect("serialize");
    assert_eq!(json["time"], "unix-nanos");
    assert_eq!(json["level"], "abbreviated");
    assert_eq!(json["fields"], "reset-after-write");

    let back: EncoderConfig = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let config: EncoderConfig =
        serde_json::from_str(r#"{ "level": "none" }"#).expect("deserialize");
    assert_eq!(config.level, LevelFormat::None);
    assert_eq!(config.time, TimeFormat::Short);
    assert_eq!(config.message, MessageFormat::Verbatim);
    assert_eq!(config.fields, FieldsPolicy::Retain);
}

#[test]
fn levels_serialize_lowercase() {
    let json = serde_json::to_string(&Level::Warn).expect("serialize");
    assert_eq!(json, "\"warn\"");
    let level: Level = serde_json::from_str("\"fatal\"").expect("deserialize");
    assert_eq!(level, Level::Fatal);
}
