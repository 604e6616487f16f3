use crate::style::WordStyle;

/// Caller-defined font handle passed through to the width provider.
pub type FontId = u32;

/// Pixel-width measurement supplied by the renderer.
///
/// Results must be deterministic for identical inputs within one layout
/// pass; the engine caches them per word for the duration of a pass.
pub trait WidthProvider {
    /// Width of `text` in `font_id` rendered with `style`.
    fn measure_word(&self, font_id: FontId, text: &str, style: WordStyle) -> i32;

    /// Width of one inter-word space.
    fn measure_space(&self, font_id: FontId, style: WordStyle) -> i32;
}

impl<T: WidthProvider + ?Sized> WidthProvider for &T {
    fn measure_word(&self, font_id: FontId, text: &str, style: WordStyle) -> i32 {
        (**self).measure_word(font_id, text, style)
    }

    fn measure_space(&self, font_id: FontId, style: WordStyle) -> i32 {
        (**self).measure_space(font_id, style)
    }
}

/// Font-less width estimate from per-glyph em classes.
///
/// Useful for hosts without glyph metrics (previews, the CLI) and as a
/// stand-in in tests. `font_id` is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicWidthProvider {
    size_px: f32,
}

impl HeuristicWidthProvider {
    pub fn new(size_px: f32) -> Self {
        Self {
            size_px: size_px.max(1.0),
        }
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    fn style_scale(style: WordStyle) -> f32 {
        let mut scale = 1.0f32;
        if style.contains(WordStyle::BOLD) {
            scale += 0.06;
        }
        if style.contains(WordStyle::ITALIC) {
            scale += 0.01;
        }
        scale
    }
}

impl Default for HeuristicWidthProvider {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl WidthProvider for HeuristicWidthProvider {
    fn measure_word(&self, _font_id: FontId, text: &str, style: WordStyle) -> i32 {
        let em_sum: f32 = text.chars().map(glyph_em_width).sum();
        let width = em_sum * self.size_px * Self::style_scale(style);
        // Round up so estimates never undershoot real glyph runs.
        ceil_f32(width) as i32
    }

    fn measure_space(&self, _font_id: FontId, _style: WordStyle) -> i32 {
        ceil_f32(glyph_em_width(' ') * self.size_px) as i32
    }
}

fn glyph_em_width(ch: char) -> f32 {
    match ch {
        '\u{00AD}' => 0.0,
        ' ' | '\u{00A0}' => 0.32,
        '\u{2003}' => 1.0,
        'i' | 'l' | 'I' | '|' | '!' => 0.24,
        '.' | ',' | ':' | ';' | '\'' | '"' | '`' => 0.23,
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' => 0.34,
        '\u{2014}' => 0.9,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.30,
        'f' | 't' | 'j' | 'r' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.74,
        c if c.is_ascii_digit() => 0.52,
        c if c.is_ascii_uppercase() => 0.64,
        c if c.is_ascii_lowercase() => 0.52,
        c if c.is_whitespace() => 0.32,
        c if c.is_ascii_punctuation() => 0.42,
        _ => 0.56,
    }
}

// `f32::ceil` needs std.
fn ceil_f32(value: f32) -> f32 {
    let truncated = value as i32 as f32;
    if truncated < value {
        truncated + 1.0
    } else {
        truncated
    }
}
