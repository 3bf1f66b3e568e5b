use std::fmt::{self, Display};

/// The kind of a JSON value, tracked separately from its rendered text.
///
/// Integers and floats are distinct kinds: table columns mixing the two
/// degrade to float formatting, while a column of pure integers is
/// right-aligned without a decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Dict,
}

/// The layout chosen for a formatted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The element and all its descendants on one line.
    Inline,
    /// One line, padded to align with sibling rows in a table.
    InlineTabular,
    /// Multiple lines with several children packed per line.
    MultilineCompact,
    /// One child per line, indented one level deeper.
    Expanded,
}

impl Format {
    /// Inline and tabular elements occupy a single physical line and can
    /// share a line with their neighbors.
    pub fn is_single_line(self) -> bool {
        matches!(self, Format::Inline | Format::InlineTabular)
    }
}

/// Which bracket-padding variant applies to an inlined container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketPaddingType {
    Empty = 0,
    Simple = 1,
    Nested = 2,
}

/// A JSON element together with the text and measurements the layout
/// engine has produced for it so far.
///
/// Built bottom-up: a node's `value` always holds its rendering under
/// the currently chosen `format`, and `value_length` its display width
/// when that rendering is a single line.
#[derive(Debug, Clone)]
pub struct FormattedNode {
    /// Rendered property name (a quoted JSON string), set only when this
    /// node is a dict value.
    pub name: String,
    pub name_length: usize,
    /// Rendered text under the current format. May span multiple lines
    /// for non-inline formats.
    pub value: String,
    pub value_length: usize,
    /// 0 for primitives and empty containers, otherwise 1 + the maximum
    /// complexity among children.
    pub complexity: usize,
    /// Nesting level from the root (root = 0).
    pub depth: usize,
    pub kind: ValueKind,
    pub format: Format,
    pub children: Vec<FormattedNode>,
}

impl FormattedNode {
    pub fn new(depth: usize, kind: ValueKind) -> Self {
        Self {
            name: String::new(),
            name_length: 0,
            value: String::new(),
            value_length: 0,
            complexity: 0,
            depth,
            kind,
            format: Format::Inline,
            children: Vec::new(),
        }
    }

    /// Drops subtrees that can no longer influence an ancestor's layout.
    /// Non-inline nodes lose their children outright (their concatenated
    /// text is what persists); inline nodes keep direct children for a
    /// possible table pass in the parent, but not grandchildren.
    pub fn cleanup(&mut self) {
        if self.format != Format::Inline {
            self.children.clear();
        }
        for child in &mut self.children {
            child.children.clear();
        }
    }
}

/// A recoverable problem noticed while formatting. Warnings never halt
/// formatting; they are collected per run and exposed through
/// [`crate::Formatter::warnings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A dict key was not a string and was converted to its textual form.
    KeyCoerced { key: String },
    /// Two entries resolved to the same key; the later value replaced the
    /// earlier one in place.
    DuplicateKey { key: String },
    /// A value in a numeric table column could not be re-quantized to the
    /// column precision and was emitted unchanged. Usually indicates a
    /// non-numeric cell (such as `null`) slipping into a numeric column.
    NumberRequantizeFailed { value: String },
}

impl Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::KeyCoerced { key } => {
                write!(f, "converting key value {} to string", key)
            }
            Warning::DuplicateKey { key } => {
                write!(f, "duplicate key value {}", key)
            }
            Warning::NumberRequantizeFailed { value } => {
                write!(f, "could not requantize number {}; emitting it unchanged", value)
            }
        }
    }
}
