// src/workbook.rs
//
// Spreadsheet renderer. One `WorkbookWriter` per run: sheets are built in
// memory as they are rendered and the .xlsx file is written once, by `save`.
//
// - Sheet names are cut to 31 characters (xlsx limit).
// - Rendering a name that already exists in this session (ignoring case)
//   replaces that sheet in place (it keeps its original position).
// - Column width = longest of header and cells, in characters, + 2.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};

use crate::config::consts::{COLUMN_PADDING, MAX_SHEET_NAME};
use crate::core::sanitize::truncate_chars;
use crate::data::DataSet;
use crate::error::{Error, Result};
use crate::file::ensure_parent;

pub fn sheet_name(name: &str) -> String {
    truncate_chars(name, MAX_SHEET_NAME)
}

/// Per column: max(header chars, every cell's chars) + padding.
pub fn column_widths(ds: &DataSet) -> Vec<usize> {
    ds.headers()
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest = ds
                .column(col)
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max);
            longest + COLUMN_PADDING
        })
        .collect()
}

pub struct WorkbookWriter {
    sheets: Vec<(String, Worksheet)>,
    header_format: Format,
}

impl Default for WorkbookWriter {
    fn default() -> Self { Self::new() }
}

impl WorkbookWriter {
    pub fn new() -> Self {
        Self { sheets: Vec::new(), header_format: Format::new().set_bold() }
    }

    /// Write `ds` (header row, then data rows) to the sheet called `name`.
    /// Returns the sheet name actually used.
    pub fn render(&mut self, name: &str, ds: &DataSet) -> Result<String> {
        let name = sheet_name(name);
        let mut ws = Worksheet::new();
        ws.set_name(&name)?;

        for (col, header) in ds.headers().iter().enumerate() {
            ws.write_string_with_format(0, col_num(col)?, header, &self.header_format)?;
        }
        for (r, row) in ds.rows().iter().enumerate() {
            let row_num = row_num(r + 1)?;
            for (col, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    ws.write_string(row_num, col_num(col)?, cell)?;
                }
            }
        }
        for (col, width) in column_widths(ds).into_iter().enumerate() {
            ws.set_column_width(col_num(col)?, width as f64)?;
        }

        // Sheet names clash case-insensitively in xlsx.
        let key = name.to_lowercase();
        match self.sheets.iter_mut().find(|(n, _)| n.to_lowercase() == key) {
            Some(slot) => {
                logd!("Sheet '{}' rendered again as '{name}'; replacing it", slot.0);
                *slot = (name.clone(), ws);
            }
            None => self.sheets.push((name.clone(), ws)),
        }
        Ok(name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sheets.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize { self.sheets.len() }
    pub fn is_empty(&self) -> bool { self.sheets.is_empty() }

    /// Write the workbook to `path` (parent directories created as needed).
    pub fn save(self, path: &Path) -> Result<PathBuf> {
        ensure_parent(path)?;
        let mut workbook = Workbook::new();
        for (_, ws) in self.sheets {
            workbook.push_worksheet(ws);
        }
        workbook.save(path)?;
        Ok(path.to_path_buf())
    }
}

fn col_num(col: usize) -> Result<ColNum> {
    ColNum::try_from(col).map_err(|_| Error::Config(format!("column {col} is beyond the sheet limit")))
}

fn row_num(row: usize) -> Result<RowNum> {
    RowNum::try_from(row).map_err(|_| Error::Config(format!("row {row} is beyond the sheet limit")))
}
