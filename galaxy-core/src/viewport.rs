/// Highest device pixel ratio the output is rendered at.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Size of the drawing area.
///
/// Width and height are in logical points; `pixel_ratio` is the number of
/// physical pixels per point, capped at [`MAX_PIXEL_RATIO`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0, 1.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let mut viewport = Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
        };
        viewport.resize(width, height, device_pixel_ratio);
        viewport
    }

    /// Updates the size after a window resize.
    ///
    /// ### Returns
    /// `true` if anything changed.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        let next = Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: capped_pixel_ratio(device_pixel_ratio),
        };
        let changed = next != *self;
        *self = next;
        changed
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Width over height; 1 for a degenerate (zero-height) area.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Output resolution in physical pixels.
    pub fn output_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

fn capped_pixel_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
