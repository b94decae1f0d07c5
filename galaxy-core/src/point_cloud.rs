use crate::color::Rgb;
use glam::Vec3;

/// Index-aligned position and colour buffers for a set of points.
///
/// For each point index `i`, this set stores:
///
/// - `positions[i]` - the point's position in galaxy space.
/// - `colors[i]` - the point's RGB tint, each channel in `[0, 1]`.
///
/// The two buffers always have the same length. A [`PointCloud`] is
/// built once per generation and never edited in place afterwards; a
/// parameter change produces a new cloud that replaces the old one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    /// Position of each point.
    positions: Vec<Vec3>,
    /// Colour of each point.
    colors: Vec<Rgb>,
}

impl PointCloud {
    /// Creates an empty [`PointCloud`] with room for `len` points.
    ///
    /// ### Parameters
    /// - `len` - Number of points to reserve storage for.
    ///
    /// ### Returns
    /// An empty cloud whose buffers will not reallocate for the first
    /// `len` pushes.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            positions: Vec::with_capacity(len),
            colors: Vec::with_capacity(len),
        }
    }

    /// Appends one point.
    ///
    /// ### Parameters
    /// - `position` - Position of the new point.
    /// - `color` - Colour of the new point.
    #[inline]
    pub fn push(&mut self, position: Vec3, color: Rgb) {
        self.positions.push(position);
        self.colors.push(color);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Returns an iterator over `(position, colour)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Rgb)> + '_ {
        self.positions.iter().copied().zip(self.colors.iter().copied())
    }
}
