//! Human-readable rendering with printf-style element formats.
//!
//! Supported element formats are `%[flags][width][.precision]conv` where
//! `flags` is any of `+` (always show the sign) and `-` (left-align within
//! `width`), and `conv` is `e`, `E` or `f`. Exponents are printed C-style,
//! signed and at least two digits wide (`1.0000e+00`).

use crate::matrix::Matrix;
use crate::{MatrixError, Result, DEFAULT_COL_DELIMITER, DEFAULT_ROW_DELIMITER};
use std::fmt;
use std::str::FromStr;

/// Conversion applied to each element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// `%e`: `d.ddde±xx`
    Scientific,
    /// `%E`: `d.dddE±XX`
    ScientificUpper,
    /// `%f`: `ddd.ddd`
    Fixed,
}

/// A parsed element format such as `%.4e` or `%+10.2f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementFormat {
    pub kind: FormatKind,
    pub precision: usize,
    pub width: usize,
    pub plus_sign: bool,
    pub left_align: bool,
}

impl Default for ElementFormat {
    /// `%.4e`.
    fn default() -> Self {
        Self {
            kind: FormatKind::Scientific,
            precision: 4,
            width: 0,
            plus_sign: false,
            left_align: false,
        }
    }
}

fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

impl FromStr for ElementFormat {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MatrixError::InvalidFormat(s.to_string());
        let mut rest = s.strip_prefix('%').ok_or_else(invalid)?;

        let mut plus_sign = false;
        let mut left_align = false;
        loop {
            if let Some(r) = rest.strip_prefix('+') {
                plus_sign = true;
                rest = r;
            } else if let Some(r) = rest.strip_prefix('-') {
                left_align = true;
                rest = r;
            } else {
                break;
            }
        }

        let (width, r) = take_digits(rest);
        rest = r;
        let width = if width.is_empty() {
            0
        } else {
            width.parse().map_err(|_| invalid())?
        };

        // C defaults to six digits when no precision is given.
        let mut precision = 6;
        if let Some(r) = rest.strip_prefix('.') {
            let (digits, r) = take_digits(r);
            precision = if digits.is_empty() {
                0
            } else {
                digits.parse().map_err(|_| invalid())?
            };
            rest = r;
        }

        let kind = match rest {
            "e" => FormatKind::Scientific,
            "E" => FormatKind::ScientificUpper,
            "f" => FormatKind::Fixed,
            _ => return Err(invalid()),
        };

        Ok(Self {
            kind,
            precision,
            width,
            plus_sign,
            left_align,
        })
    }
}

/// Rewrite Rust's `1.5e3` exponent as C's `1.5e+03`.
fn c_exponent(s: String) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

impl ElementFormat {
    /// Format a single value.
    pub fn format(&self, x: f64) -> String {
        let body = if x.is_nan() {
            "nan".to_string()
        } else if x.is_infinite() {
            String::from(if x < 0.0 { "-inf" } else { "inf" })
        } else {
            match self.kind {
                FormatKind::Fixed => format!("{:.*}", self.precision, x),
                FormatKind::Scientific | FormatKind::ScientificUpper => {
                    c_exponent(format!("{:.*e}", self.precision, x))
                }
            }
        };

        let body = if self.plus_sign && !body.starts_with('-') && !x.is_nan() {
            format!("+{body}")
        } else {
            body
        };
        let body = if self.kind == FormatKind::ScientificUpper {
            body.to_uppercase()
        } else {
            body
        };

        if self.left_align {
            format!("{body:<width$}", width = self.width)
        } else {
            format!("{body:>width$}", width = self.width)
        }
    }
}

impl Matrix {
    /// Render with a printf-style element `format`, joining columns with
    /// `col_delimiter` and rows with `row_delimiter`, wrapped as `Matrix{...}`.
    ///
    /// # Errors
    /// [`MatrixError::InvalidFormat`] if `format` cannot be parsed.
    ///
    /// # Example
    /// ```
    /// use dense_matrix::Matrix;
    ///
    /// let m = Matrix::create(&[1.0, 2.5, -3.0, 4.0], 2, 2).unwrap();
    /// assert_eq!(m.render("%.1f", "; ", ",").unwrap(), "Matrix{1.0,2.5; -3.0,4.0}");
    /// ```
    pub fn render(&self, format: &str, row_delimiter: &str, col_delimiter: &str) -> Result<String> {
        let format: ElementFormat = format.parse()?;
        Ok(self.render_with(&format, row_delimiter, col_delimiter))
    }

    /// [`Matrix::render`] with an already parsed format.
    pub fn render_with(
        &self,
        format: &ElementFormat,
        row_delimiter: &str,
        col_delimiter: &str,
    ) -> String {
        let body = self
            .as_slice()
            .chunks_exact(self.cols())
            .map(|row| {
                row.iter()
                    .map(|&x| format.format(x))
                    .collect::<Vec<_>>()
                    .join(col_delimiter)
            })
            .collect::<Vec<_>>()
            .join(row_delimiter);
        format!("Matrix{{{body}}}")
    }
}

impl fmt::Display for Matrix {
    /// Renders with `%.4e`, a space between columns and an indented newline
    /// between rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.render_with(
            &ElementFormat::default(),
            DEFAULT_ROW_DELIMITER,
            DEFAULT_COL_DELIMITER,
        );
        f.write_str(&body)
    }
}
