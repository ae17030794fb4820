//! # Order Spreadsheet Reader
//!
//! Reads order rows from an uploaded workbook. Any format calamine detects
//! (xlsx, xlsm, xlsb, xls, ods) is accepted; only the first sheet is read and
//! columns are taken by position, not by header name.

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::fmt;
use std::io::Cursor;
use std::path::Path;

use crate::error::LabelError;

/// Columns every order row must have.
pub const MIN_COLUMNS: usize = 3;

/// Third column of an order row: free text or a number (quantity, code...).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// One order, one label.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub primary: String,
    pub secondary: String,
    pub detail: CellValue,
}

impl OrderRow {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>, detail: CellValue) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            detail,
        }
    }

    /// First text line: primary and secondary labels separated by two spaces.
    pub fn title_line(&self) -> String {
        format!("{}  {}", self.primary, self.secondary)
    }

    /// Second text line.
    pub fn detail_line(&self) -> String {
        self.detail.to_string()
    }
}

/// Parse workbook bytes into order rows, in file order.
///
/// With `header_row` set the first row of the sheet is treated as column
/// names and skipped. Rows whose cells are all empty are ignored.
pub fn read_orders(bytes: &[u8], header_row: bool) -> Result<Vec<OrderRow>, LabelError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| LabelError::InputFormat(format!("cannot read workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LabelError::InputFormat("workbook has no sheets".to_string()))?
        .map_err(|e| LabelError::InputFormat(format!("cannot read first sheet: {}", e)))?;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let skip = usize::from(header_row);

    let mut orders = Vec::new();
    for (idx, cells) in range.rows().enumerate().skip(skip) {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        if cells.len() < MIN_COLUMNS {
            return Err(LabelError::InputFormat(format!(
                "row {} has {} column(s), expected at least {}",
                first_row + idx + 1,
                cells.len(),
                MIN_COLUMNS
            )));
        }
        orders.push(OrderRow {
            primary: cell_text(&cells[0]),
            secondary: cell_text(&cells[1]),
            detail: cell_value(&cells[2]),
        });
    }

    Ok(orders)
}

/// Read a workbook file from disk. A missing or unreadable file is an input
/// error that names the path.
pub fn read_workbook_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LabelError> {
    let path = path.as_ref();
    std::fs::read(path)
        .map_err(|e| LabelError::InputFormat(format!("cannot read orders file '{}': {}", path.display(), e)))
}

fn cell_text(cell: &Data) -> String {
    cell_value(cell).to_string()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Text(String::new()),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => CellValue::Text(match dt.as_datetime() {
            Some(datetime) => format_datetime(datetime),
            None => dt.to_string(),
        }),
        other => CellValue::Text(other.to_string()),
    }
}

fn format_datetime(datetime: chrono::NaiveDateTime) -> String {
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Whole numbers print without a fractional part (`3`, not `3.0`).
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
