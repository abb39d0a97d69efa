//! crates/textenc/src/render/level.rs
//! Level column strategies.

use super::LevelRenderer;
use crate::buffer::Buffer;
use crate::level::{Level, LevelMap};

/// Copies the label a [`LevelMap`] assigns to each level.
#[derive(Clone, Debug)]
pub struct LevelMapRenderer {
    map: LevelMap,
}

impl LevelMapRenderer {
    /// Creates a renderer backed by `map`.
    #[must_use]
    pub const fn new(map: LevelMap) -> Self {
        Self { map }
    }

    /// Returns the backing map.
    #[must_use]
    pub const fn map(&self) -> &LevelMap {
        &self.map
    }
}

impl LevelRenderer for LevelMapRenderer {
    fn render(&self, buffer: &mut Buffer, level: Level) {
        match self.map.get(level) {
            Some(label) => buffer.append_str(label),
            None => panic!("unknown log level: {level}"),
        }
    }
}

/// Omits the level column.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLevel;

impl LevelRenderer for NoLevel {
    fn render(&self, _buffer: &mut Buffer, _level: Level) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(renderer: &dyn LevelRenderer, level: Level) -> Vec<u8> {
        let mut buffer = Buffer::new();
        renderer.render(&mut buffer, level);
        buffer.into_vec()
    }

    #[test]
    fn plain_map_renders_padded_label() {
        let renderer = LevelMapRenderer::new(LevelMap::plain());
        assert_eq!(render(&renderer, Level::Info), b"INFO  ");
        assert_eq!(render(&renderer, Level::Error), b"ERROR ");
    }

    #[test]
    fn abbreviated_map_renders_three_letters() {
        let renderer = LevelMapRenderer::new(LevelMap::abbreviated());
        assert_eq!(render(&renderer, Level::Panic), b"PAN ");
    }

    #[test]
    fn no_level_renders_nothing() {
        for level in Level::ALL {
            assert!(render(&NoLevel, level).is_empty());
        }
    }

    #[test]
    #[should_panic(expected = "unknown log level: warn")]
    fn missing_label_panics() {
        let renderer = LevelMapRenderer::new(LevelMap::empty().with(Level::Info, "I "));
        assert_eq!(render(&renderer, Level::Info), b"I ");
        render(&renderer, Level::Warn);
    }
}
