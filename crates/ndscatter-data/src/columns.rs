//! Column ingestion and validation.

use std::collections::BTreeMap;

use ndscatter_core::DataMatrix;
use thiserror::Error;

use crate::color::Color;

/// Data loading errors, surfaced at load time rather than during rendering.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DataError {
    #[error("at least one data column is required")]
    NoColumns,
    #[error("column '{name}' has {len} values, expected {expected}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },
    #[error("column '{name}' contains a non-finite value at row {row}")]
    NonFinite { name: String, row: usize },
    #[error("label column has {len} values, expected {expected}")]
    LabelLengthMismatch { len: usize, expected: usize },
    #[error("unparseable color '{value}' for label '{label}'")]
    BadColor { label: String, value: String },
}

/// Named numeric columns plus optional categorical labels and colors, as
/// supplied by the embedding host.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    labels: Option<Vec<String>>,
    colors: Option<BTreeMap<String, String>>,
}

impl ColumnSet {
    /// Start an empty column set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named dimension column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.names.push(name.into());
        self.columns.push(values);
        self
    }

    /// Attach the per-point categorical label column.
    #[must_use]
    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Attach a label-to-hex-color mapping.
    #[must_use]
    pub fn colors(mut self, colors: BTreeMap<String, String>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Validate the shape and pack everything into a [`Dataset`].
    pub fn load(self) -> Result<Dataset, DataError> {
        if self.columns.is_empty() {
            return Err(DataError::NoColumns);
        }

        let npoint = self.columns[0].len();
        let ndim = self.columns.len();
        for (name, col) in self.names.iter().zip(&self.columns) {
            if col.len() != npoint {
                return Err(DataError::LengthMismatch {
                    name: name.clone(),
                    len: col.len(),
                    expected: npoint,
                });
            }
            if let Some(row) = col.iter().position(|v| !v.is_finite()) {
                return Err(DataError::NonFinite {
                    name: name.clone(),
                    row,
                });
            }
        }

        // Row-major repack: point-major access dominates projection passes.
        let mut values = Vec::with_capacity(npoint * ndim);
        for row in 0..npoint {
            for col in &self.columns {
                values.push(col[row]);
            }
        }

        let (categories, point_category) = match &self.labels {
            Some(labels) => {
                if labels.len() != npoint {
                    return Err(DataError::LabelLengthMismatch {
                        len: labels.len(),
                        expected: npoint,
                    });
                }
                let mut categories: Vec<String> = Vec::new();
                let mut point_category = Vec::with_capacity(npoint);
                for label in labels {
                    let idx = match categories.iter().position(|c| c == label) {
                        Some(idx) => idx,
                        None => {
                            categories.push(label.clone());
                            categories.len() - 1
                        }
                    };
                    point_category.push(idx);
                }
                (categories, point_category)
            }
            None => (vec![String::new()], vec![0; npoint]),
        };

        let mut category_colors = Vec::with_capacity(categories.len());
        for (idx, label) in categories.iter().enumerate() {
            let color = match self.colors.as_ref().and_then(|m| m.get(label)) {
                Some(value) => Color::parse_hex(value).ok_or_else(|| DataError::BadColor {
                    label: label.clone(),
                    value: value.clone(),
                })?,
                None => Color::palette(idx),
            };
            category_colors.push(color);
        }

        log::debug!(
            "loaded {} points, {} dimensions, {} categories",
            npoint,
            ndim,
            categories.len()
        );

        Ok(Dataset {
            matrix: DataMatrix::new(values, npoint, ndim),
            dim_labels: self.names,
            categories,
            point_category,
            category_colors,
        })
    }
}

/// A validated, packed dataset ready for projection.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Row-major point coordinates.
    pub matrix: DataMatrix,
    /// One label per data dimension, in column order.
    pub dim_labels: Vec<String>,
    /// Distinct category labels in first-seen order.
    pub categories: Vec<String>,
    /// Category index per point.
    pub point_category: Vec<usize>,
    /// Display color per category.
    pub category_colors: Vec<Color>,
}
