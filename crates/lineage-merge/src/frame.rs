//! Polars export of the merge table.
//!
//! Each column becomes a string column; list cells are joined with
//! [`CELL_SEPARATOR`] and blank cells become nulls.

use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, NamedFrom, PolarsError, SerWriter, Series};
use thiserror::Error;

use crate::table::{CONFIGURATION_COLUMN, Cell, MergeTable, RESULT_COLUMN, SOURCE_DATA_COLUMN};

/// Separator between the strings of one cell.
pub const CELL_SEPARATOR: &str = "; ";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame error: {0}")]
    Frame(#[from] PolarsError),
}

impl MergeTable {
    /// Convert the table into a DataFrame with one string column per table column.
    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let keys: Vec<String> = self.rows.iter().map(|row| row.attribute.clone()).collect();
        let mut columns: Vec<Column> = Vec::with_capacity(4);
        columns.push(Series::new(self.key_label.as_str().into(), keys).into());
        if self.has_configuration {
            columns.push(string_column(
                CONFIGURATION_COLUMN,
                self.rows.iter().map(|row| &row.configuration),
            ));
        }
        columns.push(string_column(
            SOURCE_DATA_COLUMN,
            self.rows.iter().map(|row| &row.source_data),
        ));
        columns.push(string_column(
            RESULT_COLUMN,
            self.rows.iter().map(|row| &row.result),
        ));
        DataFrame::new(columns)
    }

    /// Write the table as CSV with a header row.
    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        let mut frame = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)?;
        tracing::info!(path = %path.display(), rows = frame.height(), "exported merge table");
        Ok(())
    }
}

fn string_column<'a>(name: &str, cells: impl Iterator<Item = &'a Cell>) -> Column {
    let values: Vec<Option<String>> = cells
        .map(|cell| cell.as_ref().map(|items| items.join(CELL_SEPARATOR)))
        .collect();
    Series::new(name.into(), values).into()
}
