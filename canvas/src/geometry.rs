//! Geometry model: points on the unit circle and the multiplication segments.
//!
//! Point `i` of `n` sits at angle `2π·i/n` on the unit circle centred at the
//! origin. Segment `i` runs from point `i` to point `floor(i·m) mod n`.
//!
//! Integral multipliers are reduced modulo `n` first and evaluated with exact
//! integer arithmetic. Non-integral multipliers floor the *product* `i·m`, so
//! a multiplier of `2.5` still yields a distinct pattern between 2 and 3.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::TAU;

use crate::camera::Point;
use crate::consts::{DEFAULT_MULTIPLIER, DEFAULT_POINTS, MAX_POINTS};
use crate::error::{CanvasError, Result};

/// A segment between two point indices. `start == end` is a degenerate
/// segment and renders as a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
}

impl Segment {
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }
}

impl From<Segment> for (u32, u32) {
    fn from(seg: Segment) -> Self {
        (seg.start, seg.end)
    }
}

/// Point set plus multiplier.
#[derive(Debug, Clone)]
pub struct Geometry {
    multiplier: f64,
    positions: Vec<Point>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            positions: circle_points(DEFAULT_POINTS),
        }
    }
}

impl Geometry {
    /// Build a geometry from already-validated values.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if either value is out of range.
    pub fn new(points: i64, multiplier: f64) -> Result<Self> {
        let mut geometry = Self::default();
        geometry.set_point_count(points)?;
        geometry.set_multiplier(multiplier)?;
        Ok(geometry)
    }

    /// Number of points (`N`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn point_count(&self) -> u32 {
        // Bounded by MAX_POINTS.
        self.positions.len() as u32
    }

    /// Current multiplier (`M`).
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Unit-circle positions, indexed by point.
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Replace the point set with `n` evenly spaced points.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if `n < 1` or `n > MAX_POINTS`.
    /// The current point set is left unchanged in that case.
    pub fn set_point_count(&mut self, n: i64) -> Result<()> {
        let n = validate_point_count(n)?;
        if n != self.point_count() {
            self.positions = circle_points(n);
        }
        Ok(())
    }

    /// Store a new multiplier. Segments are derived on demand.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for negative or non-finite values.
    pub fn set_multiplier(&mut self, m: f64) -> Result<()> {
        self.multiplier = validate_multiplier(m)?;
        Ok(())
    }

    /// End index of the segment starting at point `i`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn match_index(&self, i: u32) -> u32 {
        let n = self.point_count();
        let m = self.multiplier;
        if m.fract() == 0.0 {
            // Exact path. `m` is finite and non-negative, so `rem_euclid`
            // lands in [0, n) before the cast.
            let m_mod = m.rem_euclid(f64::from(n)) as u64;
            ((u64::from(i) * m_mod) % u64::from(n)) as u32
        } else {
            let end = (f64::from(i) * m).floor().rem_euclid(f64::from(n)) as u32;
            // Rounding in rem_euclid can return exactly n for huge products.
            end.min(n - 1)
        }
    }

    /// The ordered segment list, one per point.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        (0..self.point_count())
            .map(|i| Segment { start: i, end: self.match_index(i) })
            .collect()
    }
}

fn circle_points(n: u32) -> Vec<Point> {
    let step = TAU / f64::from(n);
    (0..n)
        .map(|i| {
            let (sin, cos) = (f64::from(i) * step).sin_cos();
            Point::new(cos, sin)
        })
        .collect()
}

fn validate_point_count(n: i64) -> Result<u32> {
    if n < 1 {
        return Err(CanvasError::invalid(format!("point count must be at least 1, got {n}")));
    }
    match u32::try_from(n) {
        Ok(n) if n <= MAX_POINTS => Ok(n),
        _ => Err(CanvasError::invalid(format!("point count must be at most {MAX_POINTS}, got {n}"))),
    }
}

fn validate_multiplier(m: f64) -> Result<f64> {
    if !m.is_finite() {
        return Err(CanvasError::invalid(format!("multiplier must be finite, got {m}")));
    }
    if m < 0.0 {
        return Err(CanvasError::invalid(format!("multiplier must be non-negative, got {m}")));
    }
    // Normalize -0.0.
    Ok(m + 0.0)
}

/// Parse a point count from raw input text.
///
/// # Errors
///
/// Returns [`CanvasError::InvalidArgument`] for empty, non-numeric,
/// fractional, or out-of-range text.
pub fn parse_point_count(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CanvasError::invalid("point count is empty"));
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        validate_point_count(n)?;
        return Ok(n);
    }
    // Number inputs may report "12.0" or "1e3".
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= f64::from(MAX_POINTS) + 1.0 => {
            #[allow(clippy::cast_possible_truncation)]
            let n = v as i64;
            validate_point_count(n)?;
            Ok(n)
        }
        Ok(v) if v.is_finite() && v.fract() == 0.0 => {
            Err(CanvasError::invalid(format!("point count must be at most {MAX_POINTS}, got {trimmed}")))
        }
        _ => Err(CanvasError::invalid(format!("point count must be a whole number, got {trimmed:?}"))),
    }
}

/// Parse a multiplier from raw input text.
///
/// # Errors
///
/// Returns [`CanvasError::InvalidArgument`] for empty, non-numeric,
/// negative, or non-finite text.
pub fn parse_multiplier(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CanvasError::invalid("multiplier is empty"));
    }
    let m = trimmed
        .parse::<f64>()
        .map_err(|_| CanvasError::invalid(format!("multiplier must be a number, got {trimmed:?}")))?;
    validate_multiplier(m)
}
