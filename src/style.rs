use bitflags::bitflags;

bitflags! {
    /// Per-word font style bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct WordStyle: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
    }
}

impl WordStyle {
    /// Upright, regular weight, no decoration.
    pub const REGULAR: Self = Self::empty();
    /// Bold italic.
    pub const BOLD_ITALIC: Self = Self::BOLD.union(Self::ITALIC);

    /// Style with the underline bit stripped, i.e. what selects the face.
    pub fn face(self) -> Self {
        self.difference(Self::UNDERLINE)
    }
}

/// Horizontal alignment of a paragraph's lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlign {
    /// Stretch inter-word gaps to fill every line but the last.
    Justify,
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
    /// Defer to the reader's configured alignment.
    #[default]
    UseDocumentDefault,
}

impl TextAlign {
    /// Resolve `UseDocumentDefault` against the reader default.
    ///
    /// A default that is itself `UseDocumentDefault` resolves to `Justify`.
    pub fn resolve(self, document_default: TextAlign) -> TextAlign {
        match self {
            TextAlign::UseDocumentDefault => match document_default {
                TextAlign::UseDocumentDefault => TextAlign::Justify,
                other => other,
            },
            other => other,
        }
    }

    /// Whether a first-line indent shifts and narrows the first line.
    pub fn honors_indent(self) -> bool {
        matches!(self, TextAlign::Justify | TextAlign::Left)
    }
}

/// Block formatting resolved from CSS for one paragraph.
///
/// Margins and padding are carried through to every emitted line for the
/// page builder; they do not change the width lines are broken against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParagraphStyle {
    pub alignment: TextAlign,
    pub margin_top_px: i16,
    pub margin_bottom_px: i16,
    pub margin_left_px: i16,
    pub margin_right_px: i16,
    pub padding_top_px: i16,
    pub padding_bottom_px: i16,
    pub padding_left_px: i16,
    pub padding_right_px: i16,
    /// First-line indent in px. Only meaningful when `text_indent_defined`.
    pub text_indent_px: i16,
    /// CSS `text-indent` was present, even if zero.
    pub text_indent_defined: bool,
    /// Paragraphs are separated by vertical space instead of an indent.
    pub extra_paragraph_spacing: bool,
}

impl ParagraphStyle {
    /// Style with the given alignment and everything else zeroed.
    pub fn aligned(alignment: TextAlign) -> Self {
        Self {
            alignment,
            ..Self::default()
        }
    }

    /// Builder-style setter for an explicit first-line indent.
    pub fn with_text_indent(mut self, px: i16) -> Self {
        self.text_indent_px = px;
        self.text_indent_defined = true;
        self
    }

    /// Builder-style setter for extra paragraph spacing.
    pub fn with_extra_paragraph_spacing(mut self, enabled: bool) -> Self {
        self.extra_paragraph_spacing = enabled;
        self
    }

    /// Indent applied to the paragraph's first line under `alignment`.
    ///
    /// Negative (hanging) indents are not supported and clamp to zero.
    pub(crate) fn first_line_indent_px(&self, alignment: TextAlign) -> i32 {
        if self.text_indent_defined && alignment.honors_indent() {
            i32::from(self.text_indent_px).max(0)
        } else {
            0
        }
    }
}
