//! Read-only access to the loan dataset shown on the home page.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

pub const HOME_TITLE: &str = "LOAN PREDICTION:";
pub const PREVIEW_ROWS: usize = 5;
pub const CHART_ROWS: usize = 20;
pub const INCOME_COLUMN: &str = "ApplicantIncome";
pub const LOAN_AMOUNT_COLUMN: &str = "LoanAmount";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Dataset has no header row")]
    Empty,
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),
}

/// A comma-separated table kept as text. Quoted fields are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(&text)?;
        info!("Loaded dataset {:?}: {} rows, {} columns", path, dataset.len(), dataset.headers.len());
        Ok(dataset)
    }

    pub fn parse(text: &str) -> Result<Self, DatasetError> {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());

        let headers = split_row(lines.next().ok_or(DatasetError::Empty)?);
        let rows = lines.map(split_row).collect();
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    /// The first `limit` rows of two numeric columns. Blank or non-numeric
    /// cells come back as `None`.
    pub fn numeric_pairs(
        &self,
        x: &str,
        y: &str,
        limit: usize,
    ) -> Result<Vec<(Option<f64>, Option<f64>)>, DatasetError> {
        let x = self.column_index(x)?;
        let y = self.column_index(y)?;
        Ok(self
            .head(limit)
            .iter()
            .map(|row| (numeric_cell(row, x), numeric_cell(row, y)))
            .collect())
    }

    /// The first `n` rows as a left-aligned text table with a header line.
    pub fn render_head(&self, n: usize) -> String {
        let rows = self.head(n);
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|column| {
                rows.iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.len())
                    .chain(std::iter::once(self.headers[column].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_row = |cells: &[String]| {
            widths
                .iter()
                .enumerate()
                .map(|(column, width)| {
                    let cell = cells.get(column).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = width)
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![format_row(&self.headers)];
        lines.extend(rows.iter().map(|row| format_row(row)));
        lines.join("\n")
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

fn numeric_cell(row: &[String], column: usize) -> Option<f64> {
    row.get(column).and_then(|cell| cell.parse().ok())
}
