#![forbid(unsafe_code)]

//! Column layout for rows and headers.
//!
//! Columns are laid out like CSS flex items: each column gets a share of
//! the total width proportional to its weight, and the first column starts
//! at the padding.
//!
//! - [`calc_column_x`] - start offset of every column
//! - [`ColumnLayout`] - reusable weights + padding
//!
//! ```
//! use rankbar_layout::ColumnLayout;
//!
//! let xs = ColumnLayout::ranked_row().offsets(700.0).unwrap();
//! assert_eq!(xs, vec![24.0, 524.0, 624.0]);
//! ```

use std::fmt;

/// Column weights shared by the header and every row: name, amount, percent.
pub const ROW_FLEX: [f64; 3] = [5.0, 1.0, 1.0];

/// Horizontal padding before the first column.
pub const ROW_PADDING: f64 = 24.0;

/// Errors from the column layout calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// The weights sum to zero (or there are none).
    ZeroFlexSum,
    /// A weight is negative or not finite.
    InvalidWeight { index: usize, weight: f64 },
    /// The total width or padding is not finite.
    InvalidWidth(f64),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFlexSum => write!(f, "flex weights must sum to a positive value"),
            Self::InvalidWeight { index, weight } => {
                write!(f, "flex weight {index} is invalid: {weight}")
            }
            Self::InvalidWidth(width) => write!(f, "layout width is not finite: {width}"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Start offset of every column.
///
/// `x[0] = padding` and `x[i + 1] = x[i] + flex[i] / sum(flex) * total_width`.
pub fn calc_column_x(
    flex: &[f64],
    total_width: f64,
    padding: f64,
) -> Result<Vec<f64>, LayoutError> {
    for value in [total_width, padding] {
        if !value.is_finite() {
            return Err(LayoutError::InvalidWidth(value));
        }
    }
    if let Some((index, &weight)) = flex
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(LayoutError::InvalidWeight { index, weight });
    }

    let sum: f64 = flex.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return Err(LayoutError::ZeroFlexSum);
    }

    let mut offset = 0.0;
    Ok(flex
        .iter()
        .map(|w| {
            let x = offset + padding;
            offset += w / sum * total_width;
            x
        })
        .collect())
}

/// Column weights plus padding, reusable across widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    flex: Vec<f64>,
    padding: f64,
}

impl ColumnLayout {
    /// Create a layout with the given weights and no padding.
    pub fn new(flex: impl IntoIterator<Item = f64>) -> Self {
        Self {
            flex: flex.into_iter().collect(),
            padding: 0.0,
        }
    }

    /// The `[5, 1, 1]` layout with 24 units of padding.
    pub fn ranked_row() -> Self {
        Self::new(ROW_FLEX).padding(ROW_PADDING)
    }

    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn flex(&self) -> &[f64] {
        &self.flex
    }

    pub fn padding_value(&self) -> f64 {
        self.padding
    }

    /// Column start offsets for `total_width`.
    pub fn offsets(&self, total_width: f64) -> Result<Vec<f64>, LayoutError> {
        calc_column_x(&self.flex, total_width, self.padding)
    }
}
