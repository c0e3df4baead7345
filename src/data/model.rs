use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A typed cell value. `Null` is the explicit "absent" marker for empty cells.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` (integers widen).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as an `i64`. Floats only qualify when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            CellValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ColumnType – inferred dtype of a whole column
// ---------------------------------------------------------------------------

/// Column type inferred from content, named after the usual dataframe dtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnType {
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Bool => "bool",
            ColumnType::Text => "object",
        }
    }

    /// Whether values of this column can be read as numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Infer the type of a column from its raw text cells.
    ///
    /// Empty cells do not vote, except that an integer column with gaps is
    /// promoted to `Float`. A column with no non-empty cell is `Float`.
    pub fn infer_raw<'a>(cells: impl IntoIterator<Item = &'a str>) -> ColumnType {
        let mut all_int = true;
        let mut all_float = true;
        let mut all_bool = true;
        let mut has_empty = false;
        for s in cells {
            if s.is_empty() {
                has_empty = true;
                continue;
            }
            all_int &= s.parse::<i64>().is_ok();
            all_float &= s.parse::<f64>().is_ok();
            all_bool &= s == "true" || s == "false";
            if !all_int && !all_float && !all_bool {
                return ColumnType::Text;
            }
        }
        if all_int && !all_bool && !has_empty {
            ColumnType::Integer
        } else if all_bool && !all_int {
            ColumnType::Bool
        } else if all_float {
            ColumnType::Float
        } else {
            ColumnType::Text
        }
    }

    /// Parse a raw text cell according to this column type.
    pub fn parse_cell(self, raw: &str) -> CellValue {
        if raw.is_empty() {
            return CellValue::Null;
        }
        let parsed = match self {
            ColumnType::Integer => raw.parse().ok().map(CellValue::Integer),
            ColumnType::Float => raw.parse().ok().map(CellValue::Float),
            ColumnType::Bool => Some(CellValue::Bool(raw == "true")),
            ColumnType::Text => None,
        };
        parsed.unwrap_or_else(|| CellValue::String(raw.to_string()))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Name and inferred type of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

/// An immutable, row-oriented table with a fixed schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from raw text cells, inferring each column's type.
    /// Short rows are padded with `Null`, extra cells are dropped.
    pub fn from_raw(headers: Vec<String>, raw_rows: Vec<Vec<String>>) -> Self {
        let columns: Vec<Column> = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let dtype = ColumnType::infer_raw(
                    raw_rows.iter().map(|r| r.get(idx).map_or("", String::as_str)),
                );
                Column { name, dtype }
            })
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|raw| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(idx, col)| {
                        raw.get(idx)
                            .map_or(CellValue::Null, |cell| col.dtype.parse_cell(cell))
                    })
                    .collect()
            })
            .collect();

        Table { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Iterate over rows in load order.
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
