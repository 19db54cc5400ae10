//! Letters of a title appearing one after the other.

/// One element of an animated text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Glyph {
    /// A character revealed at `delay` seconds.
    Char { ch: char, delay: f32 },
    LineBreak,
}

/// Reveal timing of a text: the character at index `i` appears at
/// `delay + i * step` seconds. Line breaks keep their index.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedText {
    glyphs: Vec<Glyph>,
}

impl AnimatedText {
    pub const DEFAULT_DELAY: f32 = 0.1;
    pub const DEFAULT_STEP: f32 = 0.06;

    pub fn new(text: &str) -> Self {
        Self::with_timing(text, Self::DEFAULT_DELAY, Self::DEFAULT_STEP)
    }

    pub fn with_timing(text: &str, delay: f32, step: f32) -> Self {
        let glyphs = text
            .chars()
            .enumerate()
            .map(|(i, ch)| match ch {
                '\n' => Glyph::LineBreak,
                ch => Glyph::Char {
                    ch,
                    delay: delay + i as f32 * step,
                },
            })
            .collect();

        AnimatedText { glyphs }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// The text visible at `t` seconds. Line breaks show with the text
    /// before them.
    pub fn visible_at(&self, t: f32) -> String {
        let mut out = String::new();

        for glyph in &self.glyphs {
            match *glyph {
                Glyph::Char { ch, delay } if delay <= t => out.push(ch),
                Glyph::Char { .. } => break,
                Glyph::LineBreak => out.push('\n'),
            }
        }

        out
    }

    /// Time at which the whole text is visible.
    pub fn duration(&self) -> f32 {
        self.glyphs
            .iter()
            .filter_map(|g| match g {
                Glyph::Char { delay, .. } => Some(*delay),
                Glyph::LineBreak => None,
            })
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_keep_their_index() {
        let text = AnimatedText::with_timing("ab\ncd", 0.1, 0.05);

        assert_eq!(text.glyphs()[2], Glyph::LineBreak);
        assert_eq!(text.glyphs()[3], Glyph::Char { ch: 'c', delay: 0.1 + 3.0 * 0.05 });
        assert_eq!(text.visible_at(0.0), "");
        assert_eq!(text.visible_at(0.16), "ab\n");
        assert_eq!(text.visible_at(1.0), "ab\ncd");
        assert!((text.duration() - 0.3).abs() < 1.0e-6);
    }
}
