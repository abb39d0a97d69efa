//! crates/textenc/src/level.rs
//! Severity levels and the label tables used to render them.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use anstyle::{AnsiColor, Color, Style};

use crate::error::ConfigError;

/// Number of severity levels.
pub const LEVEL_COUNT: usize = 6;

/// Severity of a log entry, ordered by increasing severity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Verbose diagnostics.
    Debug,
    /// Routine operational messages.
    Info,
    /// Something unexpected that did not stop the operation.
    Warn,
    /// A failed operation.
    Error,
    /// A failure after which the host is expected to unwind.
    Panic,
    /// A failure after which the host is expected to exit.
    Fatal,
}

impl Level {
    /// Every level in increasing severity.
    pub const ALL: [Self; LEVEL_COUNT] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Panic,
        Self::Fatal,
    ];

    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownLevel(s.to_owned()))
    }
}

/// Mapping from [`Level`] to the exact bytes rendered for it.
///
/// Labels carry their own trailing separator, so a map decides the width of
/// the level column. The built-in tables are total; a map assembled with
/// [`LevelMap::empty`] and [`LevelMap::with`] may leave levels undefined, and
/// rendering such a level is treated as a configuration bug.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelMap {
    labels: [Option<Cow<'static, str>>; LEVEL_COUNT],
}

impl LevelMap {
    /// Creates a map with no labels.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Full upper-case names padded to a fixed width (`"INFO  "`).
    #[must_use]
    pub fn plain() -> Self {
        Self::from_static([
            "DEBUG ", "INFO  ", "WARN  ", "ERROR ", "PANIC ", "FATAL ",
        ])
    }

    /// Three-letter abbreviations (`"INF "`).
    #[must_use]
    pub fn abbreviated() -> Self {
        Self::from_static(["DEB ", "INF ", "WRN ", "ERR ", "PAN ", "FAT "])
    }

    /// The [`plain`](Self::plain) labels wrapped in ANSI colour escapes.
    ///
    /// Escapes are rendered once here; the level renderer only copies bytes.
    #[must_use]
    pub fn colorized() -> Self {
        let plain = Self::plain();
        let mut map = Self::empty();
        for level in Level::ALL {
            let style = level_style(level);
            if let Some(label) = plain.get(level) {
                map.insert(
                    level,
                    format!("{}{label}{}", style.render(), style.render_reset()),
                );
            }
        }
        map
    }

    fn from_static(labels: [&'static str; LEVEL_COUNT]) -> Self {
        Self {
            labels: labels.map(|label| Some(Cow::Borrowed(label))),
        }
    }

    /// Returns the map with `label` assigned to `level`.
    #[must_use]
    pub fn with(mut self, level: Level, label: impl Into<Cow<'static, str>>) -> Self {
        self.insert(level, label);
        self
    }

    /// Assigns `label` to `level`, replacing any previous label.
    pub fn insert(&mut self, level: Level, label: impl Into<Cow<'static, str>>) {
        self.labels[level.index()] = Some(label.into());
    }

    /// Returns the label for `level`, if one is defined.
    #[must_use]
    pub fn get(&self, level: Level) -> Option<&str> {
        self.labels[level.index()].as_deref()
    }

    /// Reports whether every level has a label.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.labels.iter().all(Option::is_some)
    }
}

fn level_style(level: Level) -> Style {
    let color = match level {
        Level::Debug => AnsiColor::Blue,
        Level::Info => AnsiColor::White,
        Level::Warn => AnsiColor::Yellow,
        Level::Error => AnsiColor::Red,
        Level::Panic | Level::Fatal => AnsiColor::Magenta,
    };
    let style = Style::new().fg_color(Some(Color::Ansi(color)));
    if level >= Level::Panic {
        style.bold()
    } else {
        style
    }
}
