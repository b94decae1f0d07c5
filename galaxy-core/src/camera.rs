use crate::viewport::Viewport;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Keeps the polar angle away from the poles so `look_at` stays defined.
const POLAR_EPS: f32 = 1e-6;
/// Distance factor applied per scroll step.
const ZOOM_STEP: f32 = 0.95;

/// Perspective camera orbiting a target point, with inertial damping.
///
/// The camera position is kept in spherical coordinates around `target`:
/// `theta` is the azimuth about +Y measured from +Z, `phi` the polar
/// angle from +Y. Drags accumulate into pending deltas which
/// [`OrbitCamera::update`] feeds in gradually, so motion eases out after
/// the pointer is released.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub fov_y_rad: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of the pending rotation applied per update.
    pub damping: f32,

    distance: f32,
    theta: f32,
    phi: f32,

    pending_theta: f32,
    pending_phi: f32,
}

/// A world point mapped into viewport space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Position in viewport points, origin at the top-left corner.
    pub screen: Vec2,
    /// Distance in front of the camera along its view direction.
    pub depth: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Creates a camera at `position` looking at `target`.
    ///
    /// Uses a 75° vertical field of view, clip planes at 0.1 and 100,
    /// and a damping factor of 0.05.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let mut cam = Self {
            target,
            fov_y_rad: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            damping: 0.05,
            distance: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
        };
        cam.set_position(position);
        cam
    }

    /// Moves the camera to `position`, keeping the target.
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.distance = offset.length().max(self.min_distance());
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.distance)
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(POLAR_EPS, PI - POLAR_EPS);
    }

    pub fn position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + Vec3::new(
                sin_phi * self.theta.sin(),
                self.phi.cos(),
                sin_phi * self.theta.cos(),
            ) * self.distance
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn min_distance(&self) -> f32 {
        self.near * 2.0
    }

    fn max_distance(&self) -> f32 {
        (self.far * 0.9).max(self.min_distance())
    }

    /// Queues an orbit from a pointer drag.
    ///
    /// A drag across the full viewport height turns the camera one full
    /// revolution.
    ///
    /// ### Parameters
    /// - `delta` - Pointer movement in viewport points.
    /// - `viewport_height` - Height of the drawing area in points.
    pub fn orbit(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.pending_theta -= TAU * delta.x / viewport_height;
        self.pending_phi -= TAU * delta.y / viewport_height;
    }

    /// Dollies towards (positive `steps`) or away from the target.
    pub fn zoom(&mut self, steps: f32) {
        let scaled = self.distance * ZOOM_STEP.powf(steps);
        self.distance = scaled.clamp(self.min_distance(), self.max_distance());
    }

    /// Applies a damped share of the pending orbit.
    ///
    /// ### Returns
    /// `true` while there is still noticeable motion left, so the caller
    /// knows to keep repainting.
    pub fn update(&mut self) -> bool {
        self.theta += self.pending_theta * self.damping;
        self.phi = (self.phi + self.pending_phi * self.damping).clamp(POLAR_EPS, PI - POLAR_EPS);

        let decay = 1.0 - self.damping;
        self.pending_theta *= decay;
        self.pending_phi *= decay;

        self.pending_theta.abs() > 1e-5 || self.pending_phi.abs() > 1e-5
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_rad, aspect, self.near, self.far)
    }

    /// Combined projection and view for a viewport.
    pub fn view_projection(&self, viewport: &Viewport) -> Mat4 {
        self.projection_matrix(viewport.aspect()) * self.view_matrix()
    }

    /// Maps a world point to viewport coordinates.
    ///
    /// ### Parameters
    /// - `view_proj` - Matrix from [`OrbitCamera::view_projection`].
    /// - `world` - Point to project.
    /// - `viewport` - Drawing area the coordinates are relative to.
    ///
    /// ### Returns
    /// `None` if the point is behind the camera or outside the clip
    /// range, otherwise its screen position and view depth.
    pub fn project(&self, view_proj: &Mat4, world: Vec3, viewport: &Viewport) -> Option<Projected> {
        let clip = *view_proj * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width(),
            (1.0 - ndc.y) * 0.5 * viewport.height(),
        );

        Some(Projected {
            screen,
            // For a GL perspective matrix, clip.w is the view-space depth.
            depth: clip.w,
        })
    }

    /// On-screen diameter, in points, of a size-attenuated point.
    ///
    /// Never smaller than one physical pixel.
    pub fn point_diameter(&self, size: f32, depth: f32, viewport: &Viewport) -> f32 {
        let attenuated = size * (viewport.height() * 0.5) / depth.max(self.near);
        attenuated.max(1.0 / viewport.pixel_ratio())
    }
}
