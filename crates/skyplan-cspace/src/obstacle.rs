//! Axis-aligned obstacle boxes and the collider file format.
//!
//! A collider file starts with two header lines (map origin and column
//! names) followed by one obstacle per line:
//!
//! ```text
//! lat0 37.792480, lon0 -122.397450
//! posX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ
//! -310.2389,-439.2315,85.5,5,5,85.5
//! ```
//!
//! Columns are north, east and altitude of the box centre, then the half
//! extents along each axis, all in metres.

use std::fmt;

/// Number of header lines preceding the obstacle rows.
pub const HEADER_LINES: usize = 2;

/// An obstacle box: centre position plus half extents, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub north: f64,
    pub east: f64,
    pub alt: f64,
    pub d_north: f64,
    pub d_east: f64,
    pub d_alt: f64,
}

impl Obstacle {
    /// Altitude of the box's top face.
    #[inline]
    pub fn top(&self) -> f64 {
        self.alt + self.d_alt
    }

    fn fields(&self) -> [f64; 6] {
        [
            self.north,
            self.east,
            self.alt,
            self.d_north,
            self.d_east,
            self.d_alt,
        ]
    }

    /// Whether every field is finite.
    pub fn is_finite(&self) -> bool {
        self.fields().iter().all(|v| v.is_finite())
    }
}

/// Parse collider data, skipping the header lines. Blank lines are ignored.
pub fn parse_colliders(s: &str) -> Result<Vec<Obstacle>, ColliderError> {
    let mut out = Vec::new();
    for (i, line) in s.lines().enumerate().skip(HEADER_LINES) {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut vals = [0.0f64; 6];
        let mut n = 0;
        for field in line.split(',') {
            if n == vals.len() {
                return Err(ColliderError::FieldCount {
                    line: line_no,
                    found: line.split(',').count(),
                });
            }
            vals[n] = field
                .trim()
                .parse()
                .map_err(|_| ColliderError::InvalidNumber {
                    line: line_no,
                    field: field.trim().to_string(),
                })?;
            n += 1;
        }
        if n != vals.len() {
            return Err(ColliderError::FieldCount {
                line: line_no,
                found: n,
            });
        }
        let [north, east, alt, d_north, d_east, d_alt] = vals;
        out.push(Obstacle {
            north,
            east,
            alt,
            d_north,
            d_east,
            d_alt,
        });
    }
    log::debug!("parsed {} colliders", out.len());
    Ok(out)
}

/// Errors that can occur when parsing collider data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColliderError {
    /// A row does not have exactly six columns. `line` is 1-based.
    FieldCount { line: usize, found: usize },
    /// A column is not a number. `line` is 1-based.
    InvalidNumber { line: usize, field: String },
}

impl fmt::Display for ColliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { line, found } => {
                write!(f, "colliders line {line}: expected 6 columns, found {found}")
            }
            Self::InvalidNumber { line, field } => {
                write!(f, "colliders line {line}: \u{201c}{field}\u{201d} is not a number")
            }
        }
    }
}

impl std::error::Error for ColliderError {}
