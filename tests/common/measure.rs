use ink_layout::{FontId, WidthProvider, WordStyle};

/// Proportional test metrics: each codepoint is 6..=10px depending on its
/// value, bold adds 1px per codepoint, spaces are 5px.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProportionalMeasurer;

impl WidthProvider for ProportionalMeasurer {
    fn measure_word(&self, _font_id: FontId, text: &str, style: WordStyle) -> i32 {
        let bold = i32::from(style.contains(WordStyle::BOLD));
        text.chars()
            .map(|ch| 6 + (ch as u32 % 5) as i32 + bold)
            .sum()
    }

    fn measure_space(&self, _font_id: FontId, _style: WordStyle) -> i32 {
        5
    }
}

/// Every codepoint is 10px, spaces 5px.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedMeasurer;

impl WidthProvider for FixedMeasurer {
    fn measure_word(&self, _font_id: FontId, text: &str, _style: WordStyle) -> i32 {
        text.chars().count() as i32 * 10
    }

    fn measure_space(&self, _font_id: FontId, _style: WordStyle) -> i32 {
        5
    }
}

/// Table widths for the scenario tests: listed words have fixed widths,
/// anything else is 10px per codepoint. Spaces are 5px.
#[derive(Clone, Debug, Default)]
pub struct TableMeasurer {
    pub widths: Vec<(&'static str, i32)>,
}

impl WidthProvider for TableMeasurer {
    fn measure_word(&self, _font_id: FontId, text: &str, _style: WordStyle) -> i32 {
        self.widths
            .iter()
            .find(|(word, _)| *word == text)
            .map(|(_, width)| *width)
            .unwrap_or_else(|| text.chars().count() as i32 * 10)
    }

    fn measure_space(&self, _font_id: FontId, _style: WordStyle) -> i32 {
        5
    }
}
