//! Procedural spiral-galaxy point generation.
//!
//! Every star is placed independently:
//! 1. Draw a distance `r` from the centre, uniform in `[0, radius)`.
//! 2. Pick the arm with [`branch_index`]; arms are assigned round-robin
//!    so consecutive stars land on consecutive arms.
//! 3. Bend the arm by `spin * r` radians, so stars further out trail
//!    further behind.
//! 4. Add independent per-axis jitter of width `randomness`.
//! 5. Tint by distance, from `inside_color` at the centre to
//!    `outside_color` at the rim.
//!
//! [`generate`] draws the random values and [`place_star`] turns them into
//! a position and colour, so the formula can be checked without any
//! randomness at all.

use crate::{color::Rgb, config::Params, point_cloud::PointCloud};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Returns the arm a star belongs to.
///
/// Arms cycle with the index (`0, 1, .., branches - 1, 0, 1, ..`). A
/// `branches` of zero is treated as one.
#[inline]
pub fn branch_index(index: usize, branches: usize) -> usize {
    index % branches.max(1)
}

/// Returns the base angle of the arm a star belongs to, in radians.
#[inline]
pub fn branch_angle(index: usize, branches: usize) -> f32 {
    let branches = branches.max(1);
    branch_index(index, branches) as f32 / branches as f32 * TAU
}

/// Computes the position and colour of a single star.
///
/// ### Parameters
/// - `index` - Star index, used to choose its arm.
/// - `distance` - Distance from the centre, expected in `[0, params.radius]`.
/// - `jitter` - Offset added to the on-arm position.
/// - `params` - Galaxy shape and colours.
///
/// ### Returns
/// `(position, colour)`. The colour fraction is `distance / params.radius`;
/// a non-positive radius yields the inside colour instead of dividing by
/// zero.
pub fn place_star(index: usize, distance: f32, jitter: Vec3, params: &Params) -> (Vec3, Rgb) {
    let spin_angle = params.spin * distance;
    let angle = branch_angle(index, params.branches) + spin_angle;

    let position = Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance) + jitter;

    let t = if params.radius > 0.0 {
        distance / params.radius
    } else {
        0.0
    };
    let color = params.inside_color.lerp(params.outside_color, t);

    (position, color)
}

/// Generates a full galaxy from scratch.
///
/// For each star four values are drawn from `rng`, in order: the
/// distance fraction, then the x, y and z jitter. Feeding the same seeded
/// generator twice therefore reproduces the same cloud exactly.
///
/// ### Parameters
/// - `params` - Shape, size and colours of the galaxy.
/// - `rng` - Random source.
///
/// ### Returns
/// A [`PointCloud`] with exactly `params.count` points.
pub fn generate(params: &Params, rng: &mut impl Rng) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(params.count);
    let radius = params.radius.max(0.0);

    for i in 0..params.count {
        let distance = rng.random::<f32>() * radius;

        // Jitter window is centred on the arm.
        let jitter = Vec3::new(
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
        ) * params.randomness;

        let (position, color) = place_star(i, distance, jitter, params);
        cloud.push(position, color);
    }

    cloud
}
