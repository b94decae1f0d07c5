use crate::color::Rgb;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Smallest galaxy radius accepted after sanitizing.
pub const MIN_RADIUS: f32 = 1e-3;

/// Generation inputs for one galaxy.
///
/// All fields are independent; no cross-field invariant is enforced
/// (more branches than stars is allowed and simply leaves sectors empty).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    /// Number of stars.
    pub count: usize,
    /// World-space point size before distance attenuation.
    pub size: f32,
    /// Maximum distance of a star from the centre.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: usize,
    /// Arm curvature; radians added per unit of distance from the centre.
    pub spin: f32,
    /// Width of the per-axis jitter window.
    pub randomness: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
    /// Angular speed about the vertical axis, radians per second.
    pub rotate: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            count: 1000,
            size: 0.02,
            radius: 4.0,
            branches: 3,
            spin: 0.2,
            randomness: 0.2,
            inside_color: Rgb::RED,
            outside_color: Rgb::BLUE,
            rotate: 0.0,
        }
    }
}

/// Reasons a [`Params`] value cannot be generated from as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("radius must be positive and finite, got {0}")]
    Radius(f32),
    #[error("branches must be at least 1")]
    NoBranches,
    #[error("randomness must be non-negative and finite, got {0}")]
    Randomness(f32),
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{0} colour has a non-finite channel")]
    Color(&'static str),
}

impl Params {
    /// Checks that every field is inside the domain the generator expects.
    ///
    /// ### Returns
    /// `Ok(())`, or the first violation found.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ParamsError::Radius(self.radius));
        }
        if self.branches == 0 {
            return Err(ParamsError::NoBranches);
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(ParamsError::Randomness(self.randomness));
        }
        for (field, value) in [
            ("size", self.size),
            ("spin", self.spin),
            ("rotate", self.rotate),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite { field, value });
            }
        }
        if !self.inside_color.is_finite() {
            return Err(ParamsError::Color("inside"));
        }
        if !self.outside_color.is_finite() {
            return Err(ParamsError::Color("outside"));
        }
        Ok(())
    }

    /// Returns a copy clamped into the valid domain.
    ///
    /// Radius is raised to at least [`MIN_RADIUS`], branches to at least 1
    /// and randomness to at least 0. Non-finite fields fall back to their
    /// defaults and colour channels are clamped to `[0, 1]`.
    pub fn sanitized(&self) -> Params {
        let d = Params::default();
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let clamp_color = |c: Rgb, fallback: Rgb| {
            if c.is_finite() {
                Rgb::new(
                    c.r.clamp(0.0, 1.0),
                    c.g.clamp(0.0, 1.0),
                    c.b.clamp(0.0, 1.0),
                )
            } else {
                fallback
            }
        };

        Params {
            count: self.count,
            size: finite_or(self.size, d.size).max(0.0),
            radius: finite_or(self.radius, d.radius).max(MIN_RADIUS),
            branches: self.branches.max(1),
            spin: finite_or(self.spin, d.spin),
            randomness: finite_or(self.randomness, d.randomness).max(0.0),
            inside_color: clamp_color(self.inside_color, d.inside_color),
            outside_color: clamp_color(self.outside_color, d.outside_color),
            rotate: finite_or(self.rotate, d.rotate),
        }
    }
}

/// Range and step of one panel control.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlRange<T> {
    pub label: &'static str,
    pub range: RangeInclusive<T>,
    pub step: f64,
}

pub const COUNT: ControlRange<usize> = ControlRange {
    label: "Total stars",
    range: 100..=100_000,
    step: 100.0,
};
pub const SIZE: ControlRange<f32> = ControlRange {
    label: "Star size",
    range: 0.001..=0.1,
    step: 0.001,
};
pub const RADIUS: ControlRange<f32> = ControlRange {
    label: "Branch distance",
    range: 1.0..=20.0,
    step: 1.0,
};
pub const BRANCHES: ControlRange<usize> = ControlRange {
    label: "Total branches",
    range: 3..=20,
    step: 1.0,
};
pub const SPIN: ControlRange<f32> = ControlRange {
    label: "Branch spin",
    range: -3.0..=3.0,
    step: 0.001,
};
pub const RANDOMNESS: ControlRange<f32> = ControlRange {
    label: "Branch thickness",
    range: 0.0..=2.0,
    step: 0.01,
};
pub const ROTATE: ControlRange<f32> = ControlRange {
    label: "Spin speed",
    range: -5.0..=5.0,
    step: 0.1,
};
pub const INSIDE_COLOR_LABEL: &str = "In-colour";
pub const OUTSIDE_COLOR_LABEL: &str = "Out-colour";
