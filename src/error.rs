use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Failure parsing a Liang pattern or exception list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Zero-based index of the offending whitespace-separated token.
    pub token_index: Option<usize>,
    /// The offending token, verbatim.
    pub token: Option<Box<str>>,
}

impl PatternError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            token_index: None,
            token: None,
        }
    }

    pub(crate) fn with_token(mut self, index: usize, token: &str) -> Self {
        self.token_index = Some(index);
        self.token = Some(token.into());
        self
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hyphenation:{}: {}", self.code, self.message)?;
        if let Some(index) = self.token_index {
            write!(f, " [token_index={}]", index)?;
        }
        if let Some(token) = self.token.as_deref() {
            write!(f, " [token={}]", token)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}
