use crate::model::{BracketPaddingType, ValueKind};
use crate::options::{EolStyle, FormatterOptions};

/// Chainable accumulator for assembling one node's rendered text.
#[derive(Debug, Default)]
pub(crate) struct StringJoinBuffer {
    buf: String,
}

impl StringJoinBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) -> &mut Self {
        self.buf.push_str(value);
        self
    }

    pub fn spaces(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.buf.push(' ');
        }
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Separator and bracket strings precomputed once per serialization run
/// from the options, plus the per-depth indent cache. Owning these in a
/// run-scoped object keeps concurrent runs independent.
#[derive(Debug)]
pub(crate) struct PaddedTokens {
    comma: String,
    colon: String,
    eol: String,
    prefix: String,
    comma_len: usize,
    colon_len: usize,
    arr_start: [String; 3],
    arr_end: [String; 3],
    obj_start: [String; 3],
    obj_end: [String; 3],
    start_len: [usize; 3],
    end_len: [usize; 3],
    indent_strings: Vec<String>,
}

impl PaddedTokens {
    pub fn new(opts: &FormatterOptions, str_len_func: &dyn Fn(&str) -> usize) -> Self {
        let pad = |open: &str, padded: bool| {
            if padded { format!("{} ", open) } else { open.to_string() }
        };
        let pad_end = |close: &str, padded: bool| {
            if padded { format!(" {}", close) } else { close.to_string() }
        };

        let arr_start = [
            "[".to_string(),
            pad("[", opts.simple_bracket_padding),
            pad("[", opts.nested_bracket_padding),
        ];
        let arr_end = [
            "]".to_string(),
            pad_end("]", opts.simple_bracket_padding),
            pad_end("]", opts.nested_bracket_padding),
        ];
        let obj_start = [
            "{".to_string(),
            pad("{", opts.simple_bracket_padding),
            pad("{", opts.nested_bracket_padding),
        ];
        let obj_end = [
            "}".to_string(),
            pad_end("}", opts.simple_bracket_padding),
            pad_end("}", opts.nested_bracket_padding),
        ];

        // Bracket characters are ASCII, so array and object pads share widths.
        let start_len = [
            str_len_func(&arr_start[0]),
            str_len_func(&arr_start[1]),
            str_len_func(&arr_start[2]),
        ];
        let end_len = [
            str_len_func(&arr_end[0]),
            str_len_func(&arr_end[1]),
            str_len_func(&arr_end[2]),
        ];

        let comma = if opts.comma_padding { ", " } else { "," }.to_string();
        let colon = if opts.colon_padding { ": " } else { ":" }.to_string();
        let eol = if opts.json_eol_style == EolStyle::Crlf { "\r\n" } else { "\n" }.to_string();

        let comma_len = str_len_func(&comma);
        let colon_len = str_len_func(&colon);

        let indent_strings = vec![
            String::new(),
            if opts.use_tab_to_indent {
                "\t".to_string()
            } else {
                " ".repeat(opts.indent_spaces)
            },
        ];

        Self {
            comma,
            colon,
            eol,
            prefix: opts.prefix_string.clone(),
            comma_len,
            colon_len,
            arr_start,
            arr_end,
            obj_start,
            obj_end,
            start_len,
            end_len,
            indent_strings,
        }
    }

    pub fn comma(&self) -> &str {
        &self.comma
    }
    pub fn colon(&self) -> &str {
        &self.colon
    }
    pub fn eol(&self) -> &str {
        &self.eol
    }
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
    pub fn comma_len(&self) -> usize {
        self.comma_len
    }
    pub fn colon_len(&self) -> usize {
        self.colon_len
    }

    pub fn start(&self, kind: ValueKind, bracket_type: BracketPaddingType) -> &str {
        if kind == ValueKind::List {
            &self.arr_start[bracket_type as usize]
        } else {
            &self.obj_start[bracket_type as usize]
        }
    }

    pub fn end(&self, kind: ValueKind, bracket_type: BracketPaddingType) -> &str {
        if kind == ValueKind::List {
            &self.arr_end[bracket_type as usize]
        } else {
            &self.obj_end[bracket_type as usize]
        }
    }

    pub fn start_len(&self, bracket_type: BracketPaddingType) -> usize {
        self.start_len[bracket_type as usize]
    }

    pub fn end_len(&self, bracket_type: BracketPaddingType) -> usize {
        self.end_len[bracket_type as usize]
    }

    pub fn indent(&mut self, level: usize) -> String {
        if level >= self.indent_strings.len() {
            let base = self.indent_strings[1].clone();
            for i in self.indent_strings.len()..=level {
                let next = format!("{}{}", self.indent_strings[i - 1], base);
                self.indent_strings.push(next);
            }
        }
        self.indent_strings[level].clone()
    }
}

/// Final-pass trailing-whitespace removal, applied per physical line
/// when `omit_trailing_whitespace` is set.
pub(crate) fn trim_trailing_whitespace(doc: &str, eol: &str) -> String {
    doc.split(eol)
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join(eol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn bracket_padding_tables_follow_options() {
        let mut opts = FormatterOptions::default();
        opts.simple_bracket_padding = false;
        opts.nested_bracket_padding = true;
        let pads = PaddedTokens::new(&opts, &char_len);
        assert_eq!(pads.start(ValueKind::List, BracketPaddingType::Simple), "[");
        assert_eq!(pads.start(ValueKind::List, BracketPaddingType::Nested), "[ ");
        assert_eq!(pads.end(ValueKind::Dict, BracketPaddingType::Nested), " }");
        assert_eq!(pads.start_len(BracketPaddingType::Nested), 2);
        assert_eq!(pads.start_len(BracketPaddingType::Simple), 1);
    }

    #[test]
    fn indent_cache_grows_on_demand() {
        let opts = FormatterOptions::default();
        let mut pads = PaddedTokens::new(&opts, &char_len);
        assert_eq!(pads.indent(0), "");
        assert_eq!(pads.indent(3), "            ");
        assert_eq!(pads.indent(1), "    ");
    }

    #[test]
    fn trailing_whitespace_is_trimmed_per_line() {
        let doc = "{\n    \"a\": 1, \n    \"b\": 2\n}";
        assert_eq!(
            trim_trailing_whitespace(doc, "\n"),
            "{\n    \"a\": 1,\n    \"b\": 2\n}"
        );
    }

    #[test]
    fn crlf_lines_are_trimmed_without_losing_returns() {
        let doc = "[\r\n    1, \r\n    2\r\n]";
        assert_eq!(
            trim_trailing_whitespace(doc, "\r\n"),
            "[\r\n    1,\r\n    2\r\n]"
        );
    }
}
