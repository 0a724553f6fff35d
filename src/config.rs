// Parsing options

/// How ID3v2 UTF-16 text frames are turned into strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoding {
    /// Decode UTF-16 properly, honoring the byte order mark
    #[default]
    Unicode,
    /// Map every byte of a UTF-16 frame to one character, as older readers did
    Legacy,
}

/// What to do when a tag turns out to be truncated or corrupt partway through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsingMode {
    /// Every error is returned to the caller
    #[default]
    Strict,
    /// Stop at the first bad frame or comment and keep what was read before it
    BestEffort,
}

/// Options to control how tags are decoded
///
/// The defaults are as follows:
///
/// ```rust,ignore
/// ParseOptions {
///     text_decoding: TextDecoding::Unicode,
///     parsing_mode: ParsingMode::Strict,
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub(crate) text_decoding: TextDecoding,
    pub(crate) parsing_mode: ParsingMode,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            text_decoding: TextDecoding::Unicode,
            parsing_mode: ParsingMode::Strict,
        }
    }

    /// How UTF-16 text frames are decoded
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagsniff::config::{ParseOptions, TextDecoding};
    ///
    /// let options = ParseOptions::new().text_decoding(TextDecoding::Legacy);
    /// assert_eq!(options.get_text_decoding(), TextDecoding::Legacy);
    /// ```
    pub const fn text_decoding(mut self, text_decoding: TextDecoding) -> Self {
        self.text_decoding = text_decoding;
        self
    }

    /// Whether a truncated tag fails or yields the fields read so far
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagsniff::config::{ParseOptions, ParsingMode};
    ///
    /// let options = ParseOptions::new().parsing_mode(ParsingMode::BestEffort);
    /// assert_eq!(options.get_parsing_mode(), ParsingMode::BestEffort);
    /// ```
    pub const fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
        self.parsing_mode = parsing_mode;
        self
    }

    pub const fn get_text_decoding(&self) -> TextDecoding {
        self.text_decoding
    }

    pub const fn get_parsing_mode(&self) -> ParsingMode {
        self.parsing_mode
    }

    pub(crate) fn best_effort(&self) -> bool {
        self.parsing_mode == ParsingMode::BestEffort
    }
}
