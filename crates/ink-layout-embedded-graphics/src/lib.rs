//! embedded-graphics mono-font measurement and drawing for `ink-layout` lines.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

use std::borrow::Cow;

use embedded_graphics::{
    mono_font::{
        ascii::{
            FONT_10X20, FONT_6X13_BOLD, FONT_6X13_ITALIC, FONT_6X9, FONT_7X13_ITALIC, FONT_7X14,
            FONT_7X14_BOLD, FONT_8X13, FONT_8X13_BOLD, FONT_8X13_ITALIC, FONT_9X18,
            FONT_9X18_BOLD,
        },
        MonoFont, MonoTextStyle, MonoTextStyleBuilder,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use ink_layout::{FontId, Line, WidthProvider, WordStyle};

/// Width provider backed by the embedded-graphics ASCII mono fonts the
/// device renderer draws with.
///
/// The layout font id selects a size bucket (see
/// [`MonoFontMeasurer::font_id_for_size`]); the word style selects the face
/// within it.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoFontMeasurer;

impl MonoFontMeasurer {
    pub const SIZE_SMALL: FontId = 0;
    pub const SIZE_MEDIUM: FontId = 1;
    pub const SIZE_LARGE: FontId = 2;
    pub const SIZE_XL: FontId = 3;

    /// Size bucket for a nominal font size in px.
    pub fn font_id_for_size(size_px: f32) -> FontId {
        if size_px >= 24.0 {
            Self::SIZE_XL
        } else if size_px >= 20.0 {
            Self::SIZE_LARGE
        } else if size_px >= 16.0 {
            Self::SIZE_MEDIUM
        } else {
            Self::SIZE_SMALL
        }
    }

    /// Face for a size bucket and style. Bold italic uses the bold face;
    /// unknown ids fall back to the large regular face.
    pub fn font_for(font_id: FontId, style: WordStyle) -> &'static MonoFont<'static> {
        let bold = style.contains(WordStyle::BOLD);
        let italic = style.contains(WordStyle::ITALIC);
        match (font_id, bold, italic) {
            (Self::SIZE_SMALL, true, _) => &FONT_6X13_BOLD,
            (Self::SIZE_SMALL, false, true) => &FONT_6X13_ITALIC,
            (Self::SIZE_SMALL, false, false) => &FONT_6X9,
            (Self::SIZE_MEDIUM, true, _) => &FONT_7X14_BOLD,
            (Self::SIZE_MEDIUM, false, true) => &FONT_7X13_ITALIC,
            (Self::SIZE_MEDIUM, false, false) => &FONT_7X14,
            (Self::SIZE_LARGE, true, _) => &FONT_8X13_BOLD,
            (Self::SIZE_LARGE, false, true) => &FONT_8X13_ITALIC,
            (Self::SIZE_LARGE, false, false) => &FONT_8X13,
            (Self::SIZE_XL, true, _) => &FONT_9X18_BOLD,
            // No XL italic face; the upright 9x18 keeps the cell width.
            (Self::SIZE_XL, false, true) => &FONT_9X18,
            (Self::SIZE_XL, false, false) => &FONT_10X20,
            _ => {
                log::debug!("mono: unknown font id {}; using 8x13", font_id);
                &FONT_8X13
            }
        }
    }

    fn text_style(font_id: FontId, style: WordStyle) -> MonoTextStyle<'static, BinaryColor> {
        let builder = MonoTextStyleBuilder::new()
            .font(Self::font_for(font_id, style))
            .text_color(BinaryColor::On);
        if style.contains(WordStyle::UNDERLINE) {
            builder.underline().build()
        } else {
            builder.build()
        }
    }

    /// Draw every word of `line` with its top-left at `origin` plus the
    /// word's x offset.
    pub fn draw_line<D>(
        &self,
        display: &mut D,
        font_id: FontId,
        line: &Line,
        origin: Point,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for word in &line.words {
            let style = Self::text_style(font_id, word.style);
            let text = normalize_text_for_mono(&word.text);
            let at = origin + Point::new(word.x_px, 0);
            Text::with_baseline(text.as_ref(), at, style, Baseline::Top).draw(display)?;
        }
        Ok(())
    }
}

impl WidthProvider for MonoFontMeasurer {
    fn measure_word(&self, font_id: FontId, text: &str, style: WordStyle) -> i32 {
        let font = Self::font_for(font_id, style);
        let chars = normalize_text_for_mono(text).chars().count() as i32;
        if chars == 0 {
            return 0;
        }
        let advance = font.character_size.width as i32;
        let spacing = font.character_spacing as i32;
        chars * (advance + spacing) - spacing
    }

    fn measure_space(&self, font_id: FontId, style: WordStyle) -> i32 {
        let font = Self::font_for(font_id, style);
        (font.character_size.width + font.character_spacing) as i32
    }
}

/// Map typographic punctuation onto the ASCII glyphs the mono fonts carry.
fn normalize_text_for_mono(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| {
        matches!(
            ch,
            '\u{00A0}' // nbsp
                | '\u{00AD}' // soft hyphen
                | '\u{2003}' // em space
                | '\u{2010}' // hyphen
                | '\u{2013}' // en dash
                | '\u{2014}' // em dash
                | '\u{2018}' // left single quote
                | '\u{2019}' // right single quote
                | '\u{201C}' // left double quote
                | '\u{201D}' // right double quote
                | '\u{2026}' // ellipsis
        )
    }) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00AD}' => {}
            '\u{00A0}' => out.push(' '),
            '\u{2003}' => out.push_str("  "),
            '\u{2010}' | '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
