//! Layout parameters for ruled pages

use crate::error::{Result, SlidelinesError};

/// Numeric layout of a ruled page, validated once and read-only afterwards.
///
/// All distances are in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    num_lines: u32,
    horiz_margin: f64,
    vert_margin: f64,
    line_thickness: f64,
}

impl LayoutParams {
    /// Validate and build layout parameters
    ///
    /// `num_lines` is taken as a signed value so that zero and negative counts
    /// coming from the command line are rejected here rather than wrapped.
    pub fn new(
        num_lines: i64,
        horiz_margin: f64,
        vert_margin: f64,
        line_thickness: f64,
    ) -> Result<Self> {
        if num_lines <= 0 {
            return Err(SlidelinesError::InvalidParameter(format!(
                "number of lines must be positive, got {}",
                num_lines
            )));
        }
        let num_lines = u32::try_from(num_lines).map_err(|_| {
            SlidelinesError::InvalidParameter(format!("number of lines too large: {}", num_lines))
        })?;

        check_distance("horizontal margin", horiz_margin)?;
        check_distance("vertical margin", vert_margin)?;

        if !line_thickness.is_finite() || line_thickness <= 0.0 {
            return Err(SlidelinesError::InvalidParameter(format!(
                "line thickness must be positive, got {}",
                line_thickness
            )));
        }

        Ok(Self {
            num_lines,
            horiz_margin,
            vert_margin,
            line_thickness,
        })
    }

    pub fn num_lines(&self) -> u32 {
        self.num_lines
    }

    pub fn horiz_margin(&self) -> f64 {
        self.horiz_margin
    }

    pub fn vert_margin(&self) -> f64 {
        self.vert_margin
    }

    pub fn line_thickness(&self) -> f64 {
        self.line_thickness
    }
}

fn check_distance(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SlidelinesError::InvalidParameter(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}
