use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::trace;

use crate::buffer::{trim_trailing_whitespace, PaddedTokens, StringJoinBuffer};
use crate::column::ColumnStats;
use crate::convert::{escape_json_string, float_literal};
use crate::error::CompactJsonError;
use crate::model::{BracketPaddingType, Format, FormattedNode, ValueKind, Warning};
use crate::options::{EolStyle, FormatterOptions};
use crate::value::{Key, Value};
use crate::width::str_width;

/// Formats JSON in a compact, human-readable way.
///
/// Any given container comes out in one of four layouts, tried in
/// order: on a single line if it is simple and short enough; as a row
/// of an aligned table when sibling containers are structurally
/// similar; spanning multiple lines with several items per line; or
/// fully expanded with one child per line.
///
/// # Example
///
/// ```rust
/// use compact_json::Formatter;
///
/// let mut formatter = Formatter::new();
/// let output = formatter
///     .reformat(r#"{"bools": {"true": true, "false": false}}"#)
///     .unwrap();
/// assert_eq!(output, r#"{ "bools": {"true": true, "false": false} }"#);
/// ```
#[derive(Debug, Default)]
pub struct Formatter {
    /// Formatting configuration, applied on the next call. Captured once
    /// at the start of each serialization run.
    pub options: FormatterOptions,
    warnings: Vec<Warning>,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatterOptions) -> Self {
        Self { options, warnings: Vec::new() }
    }

    /// Serializes a [`Value`] tree to formatted JSON text.
    ///
    /// Total over any well-formed value: this never fails, and problems
    /// like non-string or duplicate dict keys are resolved with
    /// [`Warning`] records instead of errors. The output carries no
    /// trailing newline.
    pub fn serialize(&mut self, value: &Value) -> String {
        let mut run = FormatRun::new(&self.options);
        let root = run.format_element(0, value);

        let mut doc =
            String::with_capacity(self.options.prefix_string.len() + root.value.len());
        doc.push_str(&self.options.prefix_string);
        doc.push_str(&root.value);

        if self.options.omit_trailing_whitespace {
            doc = trim_trailing_whitespace(&doc, run.pads.eol());
        }

        self.warnings = run.warnings;
        doc
    }

    /// Parses a JSON document and serializes it back in compact form.
    pub fn reformat(&mut self, input_json: &str) -> Result<String, CompactJsonError> {
        self.options.validate()?;
        let parsed: serde_json::Value = serde_json::from_str(input_json)
            .map_err(|e| CompactJsonError::new(format!("invalid JSON input: {}", e)))?;
        let value = Value::try_from(&parsed)?;
        Ok(self.serialize(&value))
    }

    /// Formats any [`serde::Serialize`] type.
    pub fn serialize_serde<T: Serialize>(&mut self, value: &T) -> Result<String, CompactJsonError> {
        self.options.validate()?;
        let parsed = serde_json::to_value(value)
            .map_err(|e| CompactJsonError::new(format!("value is not serializable to JSON: {}", e)))?;
        let converted = Value::try_from(&parsed)?;
        Ok(self.serialize(&converted))
    }

    /// Serializes `value` and writes it to `path`, creating or
    /// truncating the file. I/O failures are reported as a
    /// [`CompactJsonError`] carrying the underlying `std::io::Error`.
    pub fn dump(
        &mut self,
        value: &Value,
        path: impl AsRef<Path>,
        newline_at_eof: bool,
    ) -> Result<(), CompactJsonError> {
        self.options.validate()?;
        let mut doc = self.serialize(value);
        if newline_at_eof {
            doc.push_str(match self.options.json_eol_style {
                EolStyle::Crlf => "\r\n",
                EolStyle::Lf => "\n",
            });
        }
        let path = path.as_ref();
        fs::write(path, doc)
            .map_err(|e| CompactJsonError::io(format!("cannot write '{}'", path.display()), e))
    }

    /// Warnings collected by the most recent serialization run.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Drains the warnings collected by the most recent run.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

/// State for one serialization run: the option snapshot, precomputed
/// separators and indent cache, and the warning sink. Building this
/// per call keeps concurrent runs on distinct formatters independent.
struct FormatRun<'a> {
    opts: &'a FormatterOptions,
    pads: PaddedTokens,
    warnings: Vec<Warning>,
}

impl<'a> FormatRun<'a> {
    fn new(opts: &'a FormatterOptions) -> Self {
        let east_asian = opts.east_asian_string_widths;
        let pads = PaddedTokens::new(opts, &|s| str_width(s, east_asian));
        Self { opts, pads, warnings: Vec::new() }
    }

    fn str_len(&self, s: &str) -> usize {
        str_width(s, self.opts.east_asian_string_widths)
    }

    fn push_indent(&mut self, buf: &mut StringJoinBuffer, depth: usize) {
        let indent = self.pads.indent(depth);
        buf.add(self.pads.prefix()).add(&indent);
    }

    /// Base of the recursion. Nearly everything comes through here.
    fn format_element(&mut self, depth: usize, element: &Value) -> FormattedNode {
        let mut node = match element {
            Value::List(elements) => self.format_list(depth, elements),
            Value::Dict(entries) => self.format_dict(depth, entries),
            Value::Null => self.simple_node(depth, ValueKind::Null, "null".to_string()),
            Value::Bool(val) => {
                let literal = if *val { "true" } else { "false" };
                self.simple_node(depth, ValueKind::Bool, literal.to_string())
            }
            Value::Int(val) => self.simple_node(depth, ValueKind::Int, val.to_string()),
            Value::Float(val) => self.simple_node(depth, ValueKind::Float, float_literal(*val)),
            Value::Str(val) => {
                let literal = escape_json_string(val, self.opts.ensure_ascii);
                self.simple_node(depth, ValueKind::Str, literal)
            }
        };
        node.cleanup();
        node
    }

    fn simple_node(&self, depth: usize, kind: ValueKind, value: String) -> FormattedNode {
        let mut node = FormattedNode::new(depth, kind);
        node.value_length = self.str_len(&value);
        node.value = value;
        node
    }

    fn empty_container(&self, depth: usize, kind: ValueKind) -> FormattedNode {
        let mut node = FormattedNode::new(depth, kind);
        node.value = format!(
            "{}{}",
            self.pads.start(kind, BracketPaddingType::Empty),
            self.pads.end(kind, BracketPaddingType::Empty)
        );
        node.value_length = 2;
        node
    }

    fn format_list(&mut self, depth: usize, elements: &[Value]) -> FormattedNode {
        let items: Vec<FormattedNode> = elements
            .iter()
            .map(|child| self.format_element(depth + 1, child))
            .collect();
        if items.is_empty() {
            return self.empty_container(depth, ValueKind::List);
        }

        let mut item = FormattedNode::new(depth, ValueKind::List);
        item.complexity = items.iter().map(|c| c.complexity).max().unwrap_or(0) + 1;
        item.children = items;

        if self.format_list_inline(&mut item) {
            return item;
        }

        // Even when a later strategy wins, siblings keep their justified
        // widths; every layout below sees the aligned values.
        self.justify_parallel_numbers(&mut item.children);

        if self.format_table_list_dict(&mut item) {
            return item;
        }
        if self.format_table_list_list(&mut item) {
            return item;
        }
        if self.format_list_multiline_compact(&mut item) {
            return item;
        }
        self.format_list_expanded(&mut item);
        trace!(depth, complexity = item.complexity, "list fell through to expanded layout");
        item
    }

    fn format_dict(&mut self, depth: usize, entries: &[(Key, Value)]) -> FormattedNode {
        let mut items: Vec<FormattedNode> = Vec::new();
        let mut keys: HashMap<String, usize> = HashMap::new();
        for (key, value) in entries {
            let mut elem = self.format_element(depth + 1, value);
            let key_string = match key {
                Key::Str(s) => s.clone(),
                other => {
                    let coerced = other.to_key_string();
                    self.warnings.push(Warning::KeyCoerced { key: coerced.clone() });
                    coerced
                }
            };
            elem.name = escape_json_string(&key_string, self.opts.ensure_ascii);
            elem.name_length = self.str_len(&elem.name);
            match keys.get(&key_string) {
                Some(&index) => {
                    self.warnings.push(Warning::DuplicateKey { key: key_string });
                    items[index] = elem;
                }
                None => {
                    keys.insert(key_string, items.len());
                    items.push(elem);
                }
            }
        }

        if items.is_empty() {
            return self.empty_container(depth, ValueKind::Dict);
        }

        let mut item = FormattedNode::new(depth, ValueKind::Dict);
        item.complexity = items.iter().map(|c| c.complexity).max().unwrap_or(0) + 1;
        item.children = items;

        if self.format_dict_inline(&mut item) {
            return item;
        }
        if self.format_table_dict_dict(&mut item) {
            return item;
        }
        if self.format_table_dict_list(&mut item) {
            return item;
        }
        if self.format_dict_multiline_compact(&mut item, false) {
            return item;
        }
        self.format_dict_expanded(&mut item, false);
        item
    }

    /// Tries to format this list on a single line.
    fn format_list_inline(&mut self, item: &mut FormattedNode) -> bool {
        if (item.depth as isize) <= self.opts.always_expand_depth
            || (item.complexity as isize) > self.opts.max_inline_complexity
        {
            return false;
        }
        if item.children.iter().any(|c| c.format != Format::Inline) {
            return false;
        }

        let pad_type = if item.complexity >= 2 {
            BracketPaddingType::Nested
        } else {
            BracketPaddingType::Simple
        };
        let mut line_length = self.pads.start_len(pad_type) + self.pads.end_len(pad_type);
        line_length += (item.children.len() - 1) * self.pads.comma_len();
        line_length += item.children.iter().map(|c| c.value_length).sum::<usize>();
        if line_length > self.opts.max_inline_length {
            trace!(line_length, max = self.opts.max_inline_length, "list too wide to inline");
            return false;
        }

        let mut buf = StringJoinBuffer::new();
        buf.add(self.pads.start(ValueKind::List, pad_type));
        for (index, child) in item.children.iter().enumerate() {
            if index > 0 {
                buf.add(self.pads.comma());
            }
            buf.add(&child.value);
        }
        buf.add(self.pads.end(ValueKind::List, pad_type));

        item.value = buf.into_string();
        item.value_length = line_length;
        item.format = Format::Inline;
        true
    }

    /// Tries to format this dict on a single line.
    fn format_dict_inline(&mut self, item: &mut FormattedNode) -> bool {
        if (item.depth as isize) <= self.opts.always_expand_depth
            || (item.complexity as isize) > self.opts.max_inline_complexity
        {
            return false;
        }
        if item.children.iter().any(|c| c.format != Format::Inline) {
            return false;
        }

        let pad_type = if item.complexity >= 2 {
            BracketPaddingType::Nested
        } else {
            BracketPaddingType::Simple
        };
        let mut line_length = self.pads.start_len(pad_type) + self.pads.end_len(pad_type);
        line_length += item.children.len() * self.pads.colon_len();
        line_length += (item.children.len() - 1) * self.pads.comma_len();
        line_length += item.children.iter().map(|c| c.name_length).sum::<usize>();
        line_length += item.children.iter().map(|c| c.value_length).sum::<usize>();
        if line_length > self.opts.max_inline_length {
            trace!(line_length, max = self.opts.max_inline_length, "dict too wide to inline");
            return false;
        }

        let mut buf = StringJoinBuffer::new();
        buf.add(self.pads.start(ValueKind::Dict, pad_type));
        for (index, prop) in item.children.iter().enumerate() {
            if index > 0 {
                buf.add(self.pads.comma());
            }
            buf.add(&prop.name).add(self.pads.colon()).add(&prop.value);
        }
        buf.add(self.pads.end(ValueKind::Dict, pad_type));

        item.value = buf.into_string();
        item.value_length = line_length;
        item.format = Format::Inline;
        true
    }

    /// Tries to format this list over multiple lines, with several items
    /// packed per line. A new line starts when the next segment would
    /// overrun the width limit or when inline-ness changes between
    /// adjacent children.
    fn format_list_multiline_compact(&mut self, item: &mut FormattedNode) -> bool {
        if (item.depth as isize) <= self.opts.always_expand_depth
            || (item.complexity as isize) > self.opts.max_compact_list_complexity
        {
            return false;
        }

        let mut buf = StringJoinBuffer::new();
        buf.add("[").add(self.pads.eol());
        self.push_indent(&mut buf, item.depth + 1);

        let mut line_length_so_far = 0;
        for index in 0..item.children.len() {
            let not_last_item = index + 1 < item.children.len();
            let segment_length = item.children[index].value_length + self.pads.comma_len();

            if index != 0 {
                let wrap = self.compact_wrap_needed(
                    item.children[index].format,
                    item.children[index - 1].format,
                    line_length_so_far,
                    segment_length,
                );
                if wrap {
                    buf.add(self.pads.eol());
                    self.push_indent(&mut buf, item.depth + 1);
                    line_length_so_far = 0;
                }
            }

            buf.add(&item.children[index].value);
            if not_last_item {
                buf.add(self.pads.comma());
            }
            line_length_so_far += segment_length;
        }

        buf.add(self.pads.eol());
        self.push_indent(&mut buf, item.depth);
        buf.add("]");

        item.value = buf.into_string();
        item.format = Format::MultilineCompact;
        true
    }

    /// Tries to format this dict over multiple lines with several
    /// properties per line. Requires the `multiline_compact_dict`
    /// option; the table paths force property-name alignment here.
    fn format_dict_multiline_compact(
        &mut self,
        item: &mut FormattedNode,
        force_expand_prop_names: bool,
    ) -> bool {
        if !self.opts.multiline_compact_dict
            || (item.depth as isize) <= self.opts.always_expand_depth
            || (item.complexity as isize) > self.opts.max_compact_list_complexity
        {
            return false;
        }

        let max_prop_name_length =
            item.children.iter().map(|c| c.name_length).max().unwrap_or(0);

        let mut buf = StringJoinBuffer::new();
        buf.add("{").add(self.pads.eol());
        self.push_indent(&mut buf, item.depth + 1);

        let mut line_length_so_far = 0;
        for index in 0..item.children.len() {
            let not_last_item = index + 1 < item.children.len();

            let mut prop_text = String::new();
            {
                let prop = &item.children[index];
                prop_text.push_str(&prop.name);
                if force_expand_prop_names {
                    prop_text
                        .push_str(&" ".repeat(max_prop_name_length.saturating_sub(prop.name_length)));
                }
                prop_text.push_str(self.pads.colon());
                prop_text.push_str(&prop.value);
            }
            if force_expand_prop_names {
                item.children[index].name_length = max_prop_name_length;
            }
            let segment_length = item.children[index].name_length
                + self.pads.colon_len()
                + item.children[index].value_length
                + self.pads.comma_len();

            if index != 0 {
                let wrap = self.compact_wrap_needed(
                    item.children[index].format,
                    item.children[index - 1].format,
                    line_length_so_far,
                    segment_length,
                );
                if wrap {
                    buf.add(self.pads.eol());
                    self.push_indent(&mut buf, item.depth + 1);
                    line_length_so_far = 0;
                }
            }

            buf.add(&prop_text);
            if not_last_item {
                buf.add(self.pads.comma());
            }
            line_length_so_far += segment_length;
        }

        buf.add(self.pads.eol());
        self.push_indent(&mut buf, item.depth);
        buf.add("}");

        item.value = buf.into_string();
        item.format = Format::MultilineCompact;
        true
    }

    /// Whether the multiline-compact packer must start a new line before
    /// the current child. A single-line child following a multi-line one
    /// (or vice versa) always breaks; two single-line children break on
    /// width, with one comma width of slack.
    fn compact_wrap_needed(
        &self,
        current: Format,
        previous: Format,
        line_length_so_far: usize,
        segment_length: usize,
    ) -> bool {
        if !current.is_single_line() {
            previous.is_single_line()
        } else if !previous.is_single_line() {
            true
        } else {
            line_length_so_far + segment_length
                > self.opts.max_inline_length + self.pads.comma_len()
                && line_length_so_far > 0
        }
    }

    /// Formats this list with its dict children as aligned table rows.
    fn format_table_list_dict(&mut self, item: &mut FormattedNode) -> bool {
        if self.opts.table_dict_minimum_similarity > 100 {
            return false;
        }
        let col_stats = match self.get_property_stats(item) {
            Some(stats) => stats,
            None => return false,
        };

        let value_length = col_stats
            .iter()
            .map(|col| col.prop_name_length + col.max_value_size())
            .sum::<usize>()
            + self.pads.colon_len() * col_stats.len()
            + self.pads.comma_len() * (col_stats.len() - 1)
            + 4;

        // Reformat our immediate children using the widths we computed.
        // Their own children aren't touched; this isn't recursive.
        for index in 0..item.children.len() {
            self.format_dict_table_row(&mut item.children[index], &col_stats);
            item.children[index].value_length = value_length;
        }

        if !self.format_list_multiline_compact(item) {
            self.format_list_expanded(item);
        }
        true
    }

    /// Formats this list with its list children as aligned table rows.
    fn format_table_list_list(&mut self, item: &mut FormattedNode) -> bool {
        if self.opts.table_list_minimum_similarity > 100 {
            return false;
        }
        let col_stats = match self.get_list_stats(item) {
            Some(stats) => stats,
            None => return false,
        };

        let value_length = col_stats.iter().map(|col| col.max_value_size()).sum::<usize>()
            + self.pads.comma_len() * (col_stats.len() - 1)
            + 4;

        for index in 0..item.children.len() {
            self.format_list_table_row(&mut item.children[index], &col_stats);
            item.children[index].value_length = value_length;
        }

        if !self.format_list_multiline_compact(item) {
            self.format_list_expanded(item);
        }
        true
    }

    /// Formats this dict with its dict values as aligned table rows.
    fn format_table_dict_dict(&mut self, item: &mut FormattedNode) -> bool {
        if self.opts.table_dict_minimum_similarity > 100 {
            return false;
        }
        let prop_stats = match self.get_property_stats(item) {
            Some(stats) => stats,
            None => return false,
        };

        let value_length = prop_stats
            .iter()
            .map(|col| col.prop_name_length + col.max_value_size())
            .sum::<usize>()
            + self.pads.colon_len() * prop_stats.len()
            + self.pads.comma_len() * (prop_stats.len() - 1)
            + 4;

        for index in 0..item.children.len() {
            self.format_dict_table_row(&mut item.children[index], &prop_stats);
            item.children[index].value_length = value_length;
        }

        if !self.format_dict_multiline_compact(item, true) {
            self.format_dict_expanded(item, true);
        }
        true
    }

    /// Formats this dict with its list values as aligned table rows.
    fn format_table_dict_list(&mut self, item: &mut FormattedNode) -> bool {
        if self.opts.table_list_minimum_similarity > 100 {
            return false;
        }
        let col_stats = match self.get_list_stats(item) {
            Some(stats) => stats,
            None => return false,
        };

        let value_length = col_stats.iter().map(|col| col.max_value_size()).sum::<usize>()
            + self.pads.comma_len() * (col_stats.len() - 1)
            + 4;

        for index in 0..item.children.len() {
            self.format_list_table_row(&mut item.children[index], &col_stats);
            item.children[index].value_length = value_length;
        }

        if !self.format_dict_multiline_compact(item, true) {
            self.format_dict_expanded(item, true);
        }
        true
    }

    /// Renders one dict as a single padded table row. Table rows always
    /// carry inner bracket spaces, independent of the padding options.
    fn format_dict_table_row(&mut self, item: &mut FormattedNode, column_stats_list: &[ColumnStats]) {
        let mut highest_non_blank_index: Option<usize> = None;
        let mut segments: Vec<String> = Vec::with_capacity(column_stats_list.len());

        for (col_index, column_stats) in column_stats_list.iter().enumerate() {
            let mut seg = StringJoinBuffer::new();
            match item.children.iter().find(|p| p.name == column_stats.prop_name) {
                None => {
                    // This dict doesn't have this property; pad it out.
                    seg.spaces(
                        column_stats.prop_name_length
                            + self.pads.colon_len()
                            + column_stats.max_value_size(),
                    );
                }
                Some(prop_node) => {
                    seg.add(&column_stats.prop_name).add(self.pads.colon());
                    let cell = column_stats.format_value(
                        &prop_node.value,
                        prop_node.value_length,
                        &mut self.warnings,
                    );
                    seg.add(&cell);
                    highest_non_blank_index = Some(col_index);
                }
            }
            segments.push(seg.into_string());
        }

        let mut buf = StringJoinBuffer::new();
        buf.add("{ ");
        let mut needs_comma = false;
        for (segment_index, segment) in segments.iter().enumerate() {
            if needs_comma && Some(segment_index) <= highest_non_blank_index {
                buf.add(self.pads.comma());
            } else if segment_index > 0 {
                buf.spaces(self.pads.comma_len());
            }
            buf.add(segment);
            needs_comma = !segment.trim().is_empty();
        }
        buf.add(" }");

        item.value = buf.into_string();
        item.format = Format::InlineTabular;
    }

    /// Renders one list as a single padded table row. Positions beyond
    /// the list's own length become blank padding of full column width.
    fn format_list_table_row(&mut self, item: &mut FormattedNode, column_stats_list: &[ColumnStats]) {
        let mut buf = StringJoinBuffer::new();
        buf.add("[ ");

        for (index, child) in item.children.iter().enumerate() {
            if index > 0 {
                buf.add(self.pads.comma());
            }
            let cell = column_stats_list[index].format_value(
                &child.value,
                child.value_length,
                &mut self.warnings,
            );
            buf.add(&cell);
        }

        for index in item.children.len()..column_stats_list.len() {
            let mut pad_size = column_stats_list[index].max_value_size();
            if index != 0 {
                pad_size += self.pads.comma_len();
            }
            buf.spaces(pad_size);
        }

        buf.add(" ]");

        item.value = buf.into_string();
        item.value_length = column_stats_list.iter().map(|col| col.max_value_size()).sum::<usize>()
            + self.pads.comma_len() * (column_stats_list.len() - 1)
            + 4;
        item.format = Format::InlineTabular;
    }

    /// Writes this list with each element starting on its own line. The
    /// elements may span multiple lines themselves.
    fn format_list_expanded(&mut self, item: &mut FormattedNode) {
        let mut buf = StringJoinBuffer::new();
        buf.add("[").add(self.pads.eol());
        let mut first_elem = true;
        for index in 0..item.children.len() {
            if !first_elem {
                buf.add(self.pads.comma()).add(self.pads.eol());
            }
            self.push_indent(&mut buf, item.children[index].depth);
            buf.add(&item.children[index].value);
            first_elem = false;
        }

        buf.add(self.pads.eol());
        self.push_indent(&mut buf, item.depth);
        buf.add("]");

        item.value = buf.into_string();
        item.format = Format::Expanded;
    }

    /// Writes this dict with each property starting on its own line.
    fn format_dict_expanded(&mut self, item: &mut FormattedNode, force_expand_prop_names: bool) {
        let max_prop_name_length =
            item.children.iter().map(|c| c.name_length).max().unwrap_or(0);
        let align = self.opts.align_expanded_property_names || force_expand_prop_names;

        let mut buf = StringJoinBuffer::new();
        buf.add("{").add(self.pads.eol());
        let mut first_item = true;
        for index in 0..item.children.len() {
            if !first_item {
                buf.add(self.pads.comma()).add(self.pads.eol());
            }
            self.push_indent(&mut buf, item.children[index].depth);
            buf.add(&item.children[index].name);
            if align {
                buf.spaces(max_prop_name_length.saturating_sub(item.children[index].name_length));
            }
            buf.add(self.pads.colon()).add(&item.children[index].value);
            first_item = false;
        }

        buf.add(self.pads.eol());
        self.push_indent(&mut buf, item.depth);
        buf.add("}");

        item.value = buf.into_string();
        item.format = Format::Expanded;
    }

    /// If the given siblings are all numbers, rewrites them to a common
    /// precision and width so they line up in any layout.
    fn justify_parallel_numbers(&mut self, item_list: &mut [FormattedNode]) {
        if item_list.len() < 2 || self.opts.dont_justify_numbers {
            return;
        }

        let mut column_stats = ColumnStats::new(self.opts.dont_justify_numbers);
        for node in item_list.iter() {
            column_stats.update(node, 0);
        }
        if !column_stats.is_numeric() {
            return;
        }

        for node in item_list.iter_mut() {
            node.value = column_stats.format_value(&node.value, node.value_length, &mut self.warnings);
            node.value_length = column_stats.max_value_size();
        }
    }

    /// Checks whether this node's dict children can be formatted as a
    /// table, and if so returns per-property column stats in display
    /// order. `None` means ineligible.
    fn get_property_stats(&self, item: &FormattedNode) -> Option<Vec<ColumnStats>> {
        if item.children.len() < 2 {
            return None;
        }

        // Record every property across all the dicts: occurrence count,
        // appearance-order sum, and widths.
        let mut props: Vec<ColumnStats> = Vec::new();
        for child in &item.children {
            if child.kind != ValueKind::Dict || child.format != Format::Inline {
                return None;
            }
            for (index, prop_node) in child.children.iter().enumerate() {
                let slot = match props.iter().position(|cs| cs.prop_name == prop_node.name) {
                    Some(existing) => existing,
                    None => {
                        props.push(ColumnStats::named(
                            self.opts.dont_justify_numbers,
                            &prop_node.name,
                            prop_node.name_length,
                        ));
                        props.len() - 1
                    }
                };
                props[slot].update(prop_node, index);
            }
        }
        if props.is_empty() {
            return None;
        }

        // Order columns by average appearance index. A crude metric, but
        // it handles the occasional missing property well enough.
        props.sort_by(|a, b| a.average_order().total_cmp(&b.average_order()));

        // Score how many of all possible properties are actually present.
        // Too low means these dicts are too different to line up.
        let total_prop_count: usize = props.iter().map(|cs| cs.count).sum();
        let score = 100.0 * total_prop_count as f64 / (props.len() * item.children.len()) as f64;
        if score < f64::from(self.opts.table_dict_minimum_similarity) {
            trace!(score, "sibling dicts too dissimilar for a table");
            return None;
        }

        // Brackets and spaces, names, colons, values, commas.
        let mut line_length = 4;
        line_length += props.iter().map(|cs| cs.prop_name_length).sum::<usize>();
        line_length += self.pads.colon_len() * props.len();
        line_length += props.iter().map(|cs| cs.max_value_size()).sum::<usize>();
        line_length += self.pads.comma_len() * (props.len() - 1);
        if line_length > self.opts.max_inline_length {
            return None;
        }

        Some(props)
    }

    /// Checks whether this node's list children can be formatted as a
    /// table, and if so returns per-position column stats. `None` means
    /// ineligible.
    fn get_list_stats(&self, item: &FormattedNode) -> Option<Vec<ColumnStats>> {
        if item.children.len() < 2 {
            return None;
        }
        let valid = item
            .children
            .iter()
            .all(|c| c.kind == ValueKind::List && c.format == Format::Inline);
        if !valid {
            return None;
        }

        let number_of_columns = item.children.iter().map(|c| c.children.len()).max().unwrap_or(0);
        if number_of_columns == 0 {
            return None;
        }

        let mut col_stats_list: Vec<ColumnStats> = (0..number_of_columns)
            .map(|_| ColumnStats::new(self.opts.dont_justify_numbers))
            .collect();
        for row_node in &item.children {
            for (index, child) in row_node.children.iter().enumerate() {
                col_stats_list[index].update(child, index);
            }
        }

        // Score how rectangular the lists are. If the lengths differ too
        // much it doesn't make sense to format them together.
        let total_elem_count: usize = item.children.iter().map(|c| c.children.len()).sum();
        let similarity =
            100.0 * total_elem_count as f64 / (item.children.len() * number_of_columns) as f64;
        if similarity < f64::from(self.opts.table_list_minimum_similarity) {
            trace!(similarity, "sibling lists too dissimilar for a table");
            return None;
        }

        let mut line_length = 4;
        line_length += col_stats_list.iter().map(|cs| cs.max_value_size()).sum::<usize>();
        line_length += self.pads.comma_len() * (col_stats_list.len() - 1);
        if line_length > self.opts.max_inline_length {
            return None;
        }

        Some(col_stats_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_containers_render_as_bare_brackets() {
        let mut formatter = Formatter::new();
        assert_eq!(formatter.serialize(&Value::List(vec![])), "[]");
        assert_eq!(formatter.serialize(&Value::Dict(vec![])), "{}");
    }

    #[test]
    fn root_primitives_render_inline() {
        let mut formatter = Formatter::new();
        assert_eq!(formatter.serialize(&Value::Str("hello".into())), "\"hello\"");
        assert_eq!(formatter.serialize(&Value::Int(42)), "42");
        assert_eq!(formatter.serialize(&Value::Null), "null");
    }

    #[test]
    fn warnings_reset_between_runs() {
        let mut formatter = Formatter::new();
        let dirty = Value::Dict(vec![
            (Key::Int(100), Value::Str("a".into())),
            (Key::Str("100".into()), Value::Str("b".into())),
        ]);
        formatter.serialize(&dirty);
        assert_eq!(formatter.warnings().len(), 2);

        let clean = Value::Dict(vec![(Key::Str("k".into()), Value::Int(1))]);
        formatter.serialize(&clean);
        assert!(formatter.warnings().is_empty());
    }

    #[test]
    fn take_warnings_drains_the_sink() {
        let mut formatter = Formatter::new();
        let dirty = Value::Dict(vec![(Key::Int(1), Value::Null)]);
        formatter.serialize(&dirty);
        assert_eq!(formatter.take_warnings().len(), 1);
        assert!(formatter.warnings().is_empty());
    }

    #[test]
    fn serialize_is_deterministic() {
        let value = Value::Dict(vec![
            (Key::Str("b".into()), Value::from(vec![1i64, 2, 3])),
            (Key::Str("a".into()), Value::Float(2.5)),
        ]);
        let mut formatter = Formatter::new();
        let first = formatter.serialize(&value);
        let second = formatter.serialize(&value);
        assert_eq!(first, second);
    }

    #[test]
    fn inline_nodes_respect_the_width_bound() {
        let mut formatter = Formatter::new();
        formatter.options.max_inline_length = 30;
        let value = Value::List(vec![
            Value::from(vec!["alpha", "beta", "gamma"]),
            Value::from(vec!["delta", "epsilon"]),
            Value::from(vec!["zeta", "eta", "theta", "iota"]),
        ]);
        let output = formatter.serialize(&value);
        for line in output.lines() {
            // Indentation is excluded from the inline budget; an
            // expanded child at depth 1 adds one indent unit.
            assert!(
                line.trim_start().chars().count() <= 30 + 2,
                "line too wide: {:?}",
                line
            );
        }
    }
}
