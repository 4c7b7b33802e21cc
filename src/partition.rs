// src/partition.rs
//
// Partition filter: the rows of a DataSet whose key column matches one code.
//
// Matching is exact after normalizing both sides (uppercase, then trim); no
// partial or fuzzy matches. A `Partition` is a zero-copy view (row indices
// into the source set); `to_dataset` materializes it for rendering.

use crate::core::sanitize::normalize_key;
use crate::data::DataSet;
use crate::error::{Error, Result};

/// Index of the key column: the first header containing `hint`, case-insensitive.
pub fn key_column(ds: &DataSet, hint: &str) -> Result<usize> {
    ds.find_column(hint)
        .ok_or_else(|| Error::ColumnNotFound(hint.trim().to_uppercase()))
}

#[derive(Clone, Debug)]
pub struct Partition<'a> {
    code: String,
    key_col: usize,
    /// Positions of kept rows in the source set, ascending.
    row_ix: Vec<usize>,
    raw: &'a DataSet,
}

impl<'a> Partition<'a> {
    pub fn select(ds: &'a DataSet, hint: &str, code: &str) -> Result<Self> {
        let key_col = key_column(ds, hint)?;
        Ok(Self::with_key_column(ds, key_col, code))
    }

    /// Same as `select` with the key column already resolved.
    pub fn with_key_column(ds: &'a DataSet, key_col: usize, code: &str) -> Self {
        let code = normalize_key(code);
        let row_ix = ds
            .column(key_col)
            .enumerate()
            .filter(|(_, v)| normalize_key(v) == code)
            .map(|(i, _)| i)
            .collect();
        Self { code, key_col, row_ix, raw: ds }
    }

    /// The normalized code this partition was selected by.
    pub fn code(&self) -> &str { &self.code }
    pub fn key_column(&self) -> usize { self.key_col }
    pub fn row_indices(&self) -> &[usize] { &self.row_ix }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow one kept row (no cloning).
    pub fn row(&self, i: usize) -> Option<&'a [String]> {
        let raw = self.raw;
        self.row_ix.get(i).and_then(|&ix| raw.rows().get(ix).map(Vec::as_slice))
    }

    /// Owned copy: all columns in original order, key cells in normalized form.
    pub fn to_dataset(&self) -> DataSet {
        let rows = self
            .row_ix
            .iter()
            .map(|&ix| {
                let mut row = self.raw.rows()[ix].clone();
                row[self.key_col] = normalize_key(&row[self.key_col]);
                row
            })
            .collect();
        DataSet::new(self.raw.headers().to_vec(), rows)
    }
}

/// Rows of `ds` whose key column (found by `hint`) equals `code` after normalization.
/// Zero matches is a valid, empty result.
pub fn filter(ds: &DataSet, hint: &str, code: &str) -> Result<DataSet> {
    let part = Partition::select(ds, hint, code)?;
    logf!("    [{}] rows: {}", part.code(), part.len());
    Ok(part.to_dataset())
}
