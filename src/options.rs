use crate::error::CompactJsonError;

/// Line ending style for the formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolStyle {
    /// Windows-style line endings (`\r\n`).
    Crlf,
    /// Unix-style line endings (`\n`).
    Lf,
}

/// Configuration options for JSON formatting.
///
/// This struct contains all settings that control how JSON is formatted.
/// Use [`Default::default()`] or [`FormatterOptions::recommended()`]
/// to get sensible defaults, then modify individual fields as needed.
///
/// # Example
///
/// ```rust
/// use compact_json::{FormatterOptions, EolStyle};
///
/// let mut options = FormatterOptions::default();
/// options.max_inline_length = 100;
/// options.indent_spaces = 2;
/// options.json_eol_style = EolStyle::Lf;
/// ```
#[derive(Debug, Clone)]
pub struct FormatterOptions {
    /// Line ending style for the output. Default: [`EolStyle::Lf`].
    pub json_eol_style: EolStyle,

    /// Maximum width of a complex element rendered on a single line.
    /// Counts only the element's own text, not indentation or a leading
    /// property name. Default: 80.
    pub max_inline_length: usize,

    /// Maximum nesting depth that can be displayed on a single line.
    /// A primitive or an empty container has a complexity of 0; a list
    /// or dict is 1 greater than its most complex child.
    /// Set to -1 to disable inline formatting entirely.
    /// Default: 2.
    pub max_inline_complexity: isize,

    /// Maximum nesting depth that can be arranged spanning multiple
    /// lines with several items per line. Set to -1 to disable.
    /// Default: 1.
    pub max_compact_list_complexity: isize,

    /// Add spaces inside brackets when an inlined container holds other
    /// containers: `[ [1, 2] ]` vs `[[1, 2]]`. Default: true.
    pub nested_bracket_padding: bool,

    /// Add spaces inside brackets when an inlined container holds only
    /// primitives: `[ 1, 2 ]` vs `[1, 2]`. Default: false.
    pub simple_bracket_padding: bool,

    /// Add a space after property colons: `"key": value`. Default: true.
    pub colon_padding: bool,

    /// Add a space after commas: `[1, 2, 3]`. Default: true.
    pub comma_padding: bool,

    /// Depth at which containers are always fully expanded, regardless
    /// of other settings. -1 = never; 0 = root only; 1 = root and its
    /// children. Default: -1.
    pub always_expand_depth: isize,

    /// Number of spaces per indentation level. Ignored if
    /// `use_tab_to_indent` is true. Default: 4.
    pub indent_spaces: usize,

    /// Use a single tab per indentation level instead of spaces.
    /// Default: false.
    pub use_tab_to_indent: bool,

    /// Minimum structural similarity (0-100) for sibling dicts to be
    /// formatted as rows of a table. Dicts sharing no property names
    /// score 0; identical property sets score 100. Values above 100
    /// disable dict table formatting. Default: 75.
    pub table_dict_minimum_similarity: u32,

    /// Minimum similarity (0-100) for sibling lists to be formatted as
    /// rows of a table. Lists of equal length score 100. Values above
    /// 100 disable list table formatting. Default: 75.
    pub table_list_minimum_similarity: u32,

    /// Pad property names of expanded dicts to a common width.
    /// Default: false.
    pub align_expanded_property_names: bool,

    /// If true, numeric siblings are NOT right-aligned to a common
    /// precision and width. Default: false.
    pub dont_justify_numbers: bool,

    /// String prepended to every output line, before indentation.
    /// Default: empty.
    pub prefix_string: String,

    /// Escape all non-ASCII characters as `\uXXXX`. When false, such
    /// characters are emitted as-is. Default: true.
    pub ensure_ascii: bool,

    /// Measure strings by East-Asian display columns rather than
    /// character count. Only observable on non-ASCII output, so it
    /// usually pairs with `ensure_ascii = false`. Default: false.
    pub east_asian_string_widths: bool,

    /// Allow dicts to use the multiline-compact layout (several
    /// properties per line), like lists do. Default: false.
    pub multiline_compact_dict: bool,

    /// Strip trailing spaces and tabs from every emitted line.
    /// Default: false.
    pub omit_trailing_whitespace: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            json_eol_style: EolStyle::Lf,
            max_inline_length: 80,
            max_inline_complexity: 2,
            max_compact_list_complexity: 1,
            nested_bracket_padding: true,
            simple_bracket_padding: false,
            colon_padding: true,
            comma_padding: true,
            always_expand_depth: -1,
            indent_spaces: 4,
            use_tab_to_indent: false,
            table_dict_minimum_similarity: 75,
            table_list_minimum_similarity: 75,
            align_expanded_property_names: false,
            dont_justify_numbers: false,
            prefix_string: String::new(),
            ensure_ascii: true,
            east_asian_string_widths: false,
            multiline_compact_dict: false,
            omit_trailing_whitespace: false,
        }
    }
}

impl FormatterOptions {
    /// Creates a new `FormatterOptions` with recommended settings.
    ///
    /// Currently identical to [`Default::default()`], but may include
    /// improved defaults in future versions without breaking
    /// compatibility.
    pub fn recommended() -> Self {
        Self::default()
    }

    /// Checks for option values the engine cannot do anything sensible
    /// with. Called by the fallible entry points; [`crate::Formatter::serialize`]
    /// itself never fails and simply produces fully expanded output
    /// under degenerate settings.
    pub fn validate(&self) -> Result<(), CompactJsonError> {
        if self.max_inline_length == 0 {
            return Err(CompactJsonError::new("max_inline_length must be at least 1"));
        }
        if self.indent_spaces == 0 && !self.use_tab_to_indent {
            return Err(CompactJsonError::new(
                "indent_spaces must be at least 1 unless use_tab_to_indent is set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(FormatterOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_width_is_rejected() {
        let mut opts = FormatterOptions::default();
        opts.max_inline_length = 0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn zero_indent_is_allowed_with_tabs() {
        let mut opts = FormatterOptions::default();
        opts.indent_spaces = 0;
        assert!(opts.validate().is_err());
        opts.use_tab_to_indent = true;
        assert!(opts.validate().is_ok());
    }
}
