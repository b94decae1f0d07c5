use crate::{config::Params, generator, point_cloud::PointCloud};
use glam::Mat4;
use rand::Rng;

/// The displayed galaxy: its current point cloud and orientation.
#[derive(Debug)]
pub struct Galaxy {
    cloud: PointCloud,
    /// Point size the cloud was generated with.
    size: f32,
    /// Rotation about +Y, radians.
    rotation_y: f32,
}

impl Galaxy {
    /// Generates an initial galaxy from `params`.
    pub fn new(params: &Params, rng: &mut impl Rng) -> Self {
        Self {
            cloud: generator::generate(params, rng),
            size: params.size,
            rotation_y: 0.0,
        }
    }

    /// Replaces the point cloud with a freshly generated one.
    ///
    /// The new cloud is fully built before the old one is dropped, so at
    /// most two generations are alive at once.
    ///
    /// ### Parameters
    /// - `params` - Settled parameters to generate from.
    /// - `rng` - Random source for the new cloud.
    pub fn regenerate(&mut self, params: &Params, rng: &mut impl Rng) {
        let next = generator::generate(params, rng);
        let previous = std::mem::replace(&mut self.cloud, next);
        self.size = params.size;
        log::debug!(
            "regenerated galaxy: {} -> {} stars",
            previous.len(),
            self.cloud.len()
        );
    }

    /// Sets the orientation for a frame.
    ///
    /// ### Parameters
    /// - `elapsed` - Seconds since the render loop started.
    /// - `rotate` - Angular speed, radians per second.
    pub fn tick(&mut self, elapsed: f32, rotate: f32) {
        self.rotation_y = rotation_at(elapsed, rotate);
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Model transform placing the cloud in the world.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

/// Orientation about +Y after `elapsed` seconds at speed `rotate`.
///
/// Positive speeds turn clockwise when seen from above.
#[inline]
pub fn rotation_at(elapsed: f32, rotate: f32) -> f32 {
    -(elapsed * rotate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn rotation_is_negative_elapsed_times_speed() {
        assert_eq!(rotation_at(0.0, 3.0), 0.0);
        assert_eq!(rotation_at(2.0, 1.5), -3.0);
        assert_eq!(rotation_at(2.0, -1.5), 3.0);
    }

    #[test]
    fn tick_only_changes_orientation() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = Params::default();
        let mut galaxy = Galaxy::new(&params, &mut rng);
        let before = galaxy.cloud().clone();

        galaxy.tick(4.0, 0.5);

        assert_eq!(galaxy.rotation_y(), -2.0);
        assert_eq!(galaxy.cloud(), &before);
    }

    #[test]
    fn regenerate_replaces_cloud_and_size() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut galaxy = Galaxy::new(&Params::default(), &mut rng);
        assert_eq!(galaxy.cloud().len(), 1000);

        let params = Params {
            count: 250,
            size: 0.05,
            ..Params::default()
        };
        galaxy.regenerate(&params, &mut rng);

        assert_eq!(galaxy.cloud().len(), 250);
        assert_eq!(galaxy.size(), 0.05);
    }

    #[test]
    fn model_matrix_rotates_about_vertical_axis() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut galaxy = Galaxy::new(&Params::default(), &mut rng);

        galaxy.tick(1.0, -std::f32::consts::FRAC_PI_2);
        let p = galaxy.model_matrix().transform_point3(Vec3::X);

        // +X turned a quarter turn counter-clockwise about +Y lands on -Z.
        assert!((p - Vec3::NEG_Z).length() < 1e-5, "{p:?}");
    }
}
