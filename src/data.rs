// src/data.rs
//
// Canonical in-memory table: ordered unique headers + rows of display strings.
//
// - Built once from parsed markup and read-only afterwards.
// - Every row is exactly as wide as the header (short rows padded with "").
// - Header names are unique; repeats get ".1", ".2", ... suffixes, blanks get
//   their column index.

use crate::core::sanitize::contains_ci;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(headers.len());

        let mut headers = headers;
        while headers.len() < width {
            headers.push(headers.len().to_string());
        }
        for row in &mut rows {
            row.resize(width, s!());
        }

        Self { headers: unique_headers(headers), rows }
    }

    pub fn headers(&self) -> &[String] { &self.headers }
    pub fn rows(&self) -> &[Vec<String>] { &self.rows }

    pub fn width(&self) -> usize { self.headers.len() }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First column whose name contains `hint`, ignoring case and outer whitespace.
    pub fn find_column(&self, hint: &str) -> Option<usize> {
        self.headers.iter().position(|h| contains_ci(h, hint))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Cell by column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        self.cell(row, self.column_index(column)?)
    }

    /// Iterate one column top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().filter_map(move |r| r.get(col).map(String::as_str))
    }
}

fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for (i, h) in headers.into_iter().enumerate() {
        let base = if h.trim().is_empty() { i.to_string() } else { h };
        let mut name = base.clone();
        let mut n = 0;
        while out.contains(&name) {
            n += 1;
            name = format!("{base}.{n}");
        }
        out.push(name);
    }
    out
}
