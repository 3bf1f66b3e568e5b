use crate::model::{FormattedNode, ValueKind, Warning};

/// Unified kind of the values in one table column. Starts at `Null`
/// until the first non-null value fixes it; integers and floats unify
/// to float; any other disagreement degrades the column to `Mixed`,
/// which is formatted like text (left-justified, no requantization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Value(ValueKind),
    Mixed,
}

/// Aggregate statistics for one column of a prospective table: a
/// property name shared across sibling dicts, or one index position
/// across sibling lists. Collected while scoring similarity, then used
/// to render each cell at the column's width and precision.
#[derive(Debug, Clone)]
pub(crate) struct ColumnStats {
    dont_justify: bool,
    pub prop_name: String,
    pub prop_name_length: usize,
    pub order_sum: usize,
    pub count: usize,
    max_raw_size: usize,
    kind: ColumnKind,
    chars_before_dec: usize,
    chars_after_dec: usize,
}

impl ColumnStats {
    pub fn new(dont_justify: bool) -> Self {
        Self {
            dont_justify,
            prop_name: String::new(),
            prop_name_length: 0,
            order_sum: 0,
            count: 0,
            max_raw_size: 0,
            kind: ColumnKind::Value(ValueKind::Null),
            chars_before_dec: 0,
            chars_after_dec: 0,
        }
    }

    pub fn named(dont_justify: bool, prop_name: &str, prop_name_length: usize) -> Self {
        let mut stats = Self::new(dont_justify);
        stats.prop_name = prop_name.to_string();
        stats.prop_name_length = prop_name_length;
        stats
    }

    /// Folds one cell into the column aggregates. `index` is the cell's
    /// position within its own row, used to derive the column order.
    pub fn update(&mut self, node: &FormattedNode, index: usize) {
        self.order_sum += index;
        self.count += 1;
        self.max_raw_size = self.max_raw_size.max(node.value_length);

        if self.kind == ColumnKind::Value(ValueKind::Null) {
            self.kind = ColumnKind::Value(node.kind);
        } else if self.kind == ColumnKind::Value(ValueKind::Float) && node.kind == ValueKind::Int {
            // Stays float; the int cell will be requantized to the
            // column precision.
        } else if self.kind == ColumnKind::Value(ValueKind::Int) && node.kind == ValueKind::Float {
            self.kind = ColumnKind::Value(ValueKind::Float);
        } else if self.kind != ColumnKind::Value(node.kind) {
            self.kind = ColumnKind::Mixed;
        }

        match node.kind {
            ValueKind::Float => {
                let (whole, frac) = match node.value.split_once('.') {
                    Some((whole, frac)) => (whole, frac),
                    None => (node.value.as_str(), ""),
                };
                self.chars_before_dec = self.chars_before_dec.max(whole.len());
                self.chars_after_dec = self.chars_after_dec.max(frac.len());
            }
            ValueKind::Int => {
                self.chars_before_dec = self.chars_before_dec.max(node.value.len());
            }
            _ => {}
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            ColumnKind::Value(ValueKind::Int) | ColumnKind::Value(ValueKind::Float)
        )
    }

    /// Mean appearance index, the sort key for column ordering. Tolerant
    /// of occasionally missing properties.
    pub fn average_order(&self) -> f64 {
        self.order_sum as f64 / self.count as f64
    }

    /// The width every cell of this column will occupy. Numeric columns
    /// use the common digit layout rather than the widest raw literal.
    pub fn max_value_size(&self) -> usize {
        if self.dont_justify {
            self.max_raw_size
        } else if self.kind == ColumnKind::Value(ValueKind::Float) {
            self.chars_before_dec + self.chars_after_dec + 1
        } else if self.kind == ColumnKind::Value(ValueKind::Int) {
            self.chars_before_dec
        } else {
            self.max_raw_size
        }
    }

    /// Renders one cell padded to the column width: numeric columns are
    /// right-justified at the column precision, everything else is
    /// left-justified. `value_length` is the cell's display width, which
    /// can differ from its char count in East-Asian mode.
    pub fn format_value(
        &self,
        value: &str,
        value_length: usize,
        warnings: &mut Vec<Warning>,
    ) -> String {
        if self.is_numeric() && !self.dont_justify {
            let adjusted = match fixed_value(value, self.chars_after_dec) {
                Some(requantized) => requantized,
                None => {
                    warnings.push(Warning::NumberRequantizeFailed { value: value.to_string() });
                    value.to_string()
                }
            };
            let total_length = self.chars_before_dec
                + self.chars_after_dec
                + usize::from(self.chars_after_dec > 0);
            let pad = total_length.saturating_sub(adjusted.chars().count());
            let mut out = " ".repeat(pad);
            out.push_str(&adjusted);
            return out;
        }

        let pad = self.max_value_size().saturating_sub(value_length);
        let mut out = value.to_string();
        out.push_str(&" ".repeat(pad));
        out
    }
}

/// Rewrites a plain decimal literal to exactly `num_decimals` fractional
/// digits. Exponent-form literals pass through untouched. Returns `None`
/// for anything that is not a number, such as a `null` cell in a numeric
/// column.
///
/// The rewrite is textual: integer digits never round-trip through
/// binary floating point, so precision is preserved at any magnitude.
pub(crate) fn fixed_value(value: &str, num_decimals: usize) -> Option<String> {
    if value.contains(['e', 'E']) {
        return Some(value.to_string());
    }

    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (value, ""),
    };
    let digits = int_part.strip_prefix('-').unwrap_or(int_part);
    let is_plain_decimal = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && frac_part.chars().all(|c| c.is_ascii_digit());
    if !is_plain_decimal {
        return None;
    }

    if frac_part.len() <= num_decimals {
        if num_decimals == 0 {
            return Some(int_part.to_string());
        }
        let mut out = String::with_capacity(int_part.len() + 1 + num_decimals);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
        for _ in frac_part.len()..num_decimals {
            out.push('0');
        }
        return Some(out);
    }

    // More fractional digits than the target. Unreachable from the
    // engine (the target is a column-wide maximum), kept for totality.
    let parsed: f64 = value.parse().ok()?;
    Some(format!("{:.*}", num_decimals, parsed))
}
