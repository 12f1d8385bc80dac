//! Board snapshot parsed from the untyped storage column.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

/// Number of cells on a tic-tac-toe board.
pub const BOARD_SIZE: usize = 9;

/// A mark placed on the board, always exactly one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Mark(String);

impl Mark {
    /// Creates a mark from a string holding exactly one character.
    ///
    /// Returns `None` for empty or multi-character strings.
    pub fn new(symbol: impl Into<String>) -> Option<Self> {
        let symbol = symbol.into();
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => Some(Self(symbol)),
            _ => None,
        }
    }

    /// Returns the mark as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A board cell: either a mark or empty.
pub type Cell = Option<Mark>;

/// 3x3 board snapshot, serialized as a flat array of marks and nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: std::array::from_fn(|_| None),
        }
    }

    /// Parses a board from the raw storage value.
    ///
    /// A missing value is read as an empty sequence and therefore fails the
    /// length check. Nothing is coerced: every element must be a
    /// one-character string or `null`, and there must be exactly nine.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] describing the first mismatch found.
    #[instrument(skip(raw))]
    pub fn parse(raw: Option<&Value>) -> Result<Self, FieldError> {
        let items: &[Value] = match raw {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items,
            Some(other) => return Err(FieldError::NotAnArray(json_kind(other))),
        };

        let cells = items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Null => Ok(None),
                Value::String(symbol) => Mark::new(symbol.as_str())
                    .map(Some)
                    .ok_or_else(|| FieldError::InvalidMark {
                        index,
                        symbol: symbol.clone(),
                    }),
                other => Err(FieldError::InvalidCell {
                    index,
                    found: json_kind(other),
                }),
            })
            .collect::<Result<Vec<Cell>, FieldError>>()?;

        let len = cells.len();
        let cells: [Cell; BOARD_SIZE] = cells
            .try_into()
            .map_err(|_| FieldError::WrongLength(len))?;

        debug!(filled = cells.iter().flatten().count(), "Board parsed");
        Ok(Self { cells })
    }

    /// Parses a board from the column as storage returned it.
    ///
    /// Text is decoded as JSON first; text that is not JSON fails with
    /// [`FieldError::Malformed`]. The decoded value then goes through
    /// [`parse`](Self::parse).
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] describing the first mismatch found.
    pub fn parse_raw(raw: Option<&RawField>) -> Result<Self, FieldError> {
        match raw {
            None => Self::parse(None),
            Some(RawField::Json(value)) => Self::parse(Some(value)),
            Some(RawField::Text(text)) => {
                let value = serde_json::from_str::<Value>(text)
                    .map_err(|e| FieldError::Malformed(e.to_string()))?;
                Self::parse(Some(&value))
            }
        }
    }

    /// Gets the cell at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Formats the board as a three-line grid, `.` for empty cells.
    pub fn display(&self) -> String {
        self.cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map_or(".", Mark::as_str))
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// The board column before any check: decoded JSON or the stored text.
///
/// Text is only decoded when a status actually needs a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField {
    /// An already decoded JSON value.
    Json(Value),
    /// Column text exactly as stored.
    Text(String),
}

impl From<Value> for RawField {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RawField {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Why a stored board value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum FieldError {
    /// The stored text is not JSON at all.
    #[display("stored field is not valid JSON: {}", _0)]
    Malformed(String),

    /// The value is not an array.
    #[display("expected an array of cells, found {}", _0)]
    NotAnArray(&'static str),

    /// A cell is neither a string nor null.
    #[display("cell {} must be a string or null, found {}", index, found)]
    InvalidCell {
        /// Position of the offending cell.
        index: usize,
        /// JSON type found instead.
        found: &'static str,
    },

    /// A cell string is not a single character.
    #[display("cell {} must hold a single character, found '{}'", index, symbol)]
    InvalidMark {
        /// Position of the offending cell.
        index: usize,
        /// The rejected string.
        symbol: String,
    },

    /// The array does not have exactly nine cells.
    #[display("expected 9 cells, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for FieldError {}
