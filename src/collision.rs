use crate::camera::CameraProbe;
use nalgebra::{Point3, Vector3};
use ncollide3d::math::{Isometry, Point};
use ncollide3d::query::PointQuery;
use ncollide3d::shape::Ball;

/// Where the collision probe sits relative to the camera, and how generous the body spheres are.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Vertical distance the probe is lowered below the camera.
    pub drop: f64,
    /// Distance the probe is pushed along the camera's forward direction.
    pub lookahead: f64,
    /// Multiplier applied to a body's radius before testing.
    pub margin: f64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        ProbeSettings {
            drop: 1.0,
            lookahead: 3.0,
            margin: 1.1,
        }
    }
}

impl ProbeSettings {
    pub fn probe_point<P: CameraProbe + ?Sized>(&self, probe: &P) -> Point3<f64> {
        let forward = probe
            .forward()
            .try_normalize(std::f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        probe.position() - Vector3::y() * self.drop + forward * self.lookahead
    }
}

/// Anything that can be approximated by a bounding sphere for probe tests.
pub trait Collidable {
    fn center(&self) -> Point3<f64>;
    fn radius(&self) -> f64;

    fn contains(&self, point: &Point3<f64>, margin: f64) -> bool {
        sphere_contains(&self.center(), self.radius() * margin, point)
    }

    fn collides_with<P: CameraProbe + ?Sized>(&self, probe: &P, settings: &ProbeSettings) -> bool {
        self.contains(&settings.probe_point(probe), settings.margin)
    }

    /// Unit vector pointing from the center of this shape towards `point`, or straight up if the
    /// point sits on the center.
    fn push_away(&self, point: &Point3<f64>) -> Vector3<f64> {
        (point - self.center())
            .try_normalize(std::f64::EPSILON)
            .unwrap_or_else(Vector3::y)
    }
}

pub fn sphere_contains(center: &Point3<f64>, radius: f64, point: &Point3<f64>) -> bool {
    if !(radius > 0.0) {
        return false;
    }
    let ball = Ball::new(radius);
    let position = Isometry::translation(center.x, center.y, center.z);
    ball.contains_point(&position, &Point::new(point.x, point.y, point.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        position: Point3<f64>,
        forward: Vector3<f64>,
    }

    impl CameraProbe for Probe {
        fn position(&self) -> Point3<f64> {
            self.position
        }
        fn forward(&self) -> Vector3<f64> {
            self.forward
        }
    }

    struct Sphere(Point3<f64>, f64);

    impl Collidable for Sphere {
        fn center(&self) -> Point3<f64> {
            self.0
        }
        fn radius(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn probe_point_is_lowered_and_pushed_forward() {
        let settings = ProbeSettings::default();
        let probe = Probe {
            position: Point3::new(0.0, 10.0, 0.0),
            forward: Vector3::new(0.0, 0.0, -7.0),
        };
        let point = settings.probe_point(&probe);
        assert!((point - Point3::new(0.0, 9.0, -3.0)).norm() < 1.0e-12);
    }

    #[test]
    fn margin_extends_the_sphere() {
        let sphere = Sphere(Point3::new(5.0, 0.0, 0.0), 10.0);
        let point = Point3::new(5.0, 10.5, 0.0);
        assert!(!sphere.contains(&point, 1.0));
        assert!(sphere.contains(&point, 1.1));
    }

    #[test]
    fn push_away_points_at_the_probe() {
        let sphere = Sphere(Point3::new(0.0, 0.0, 0.0), 1.0);
        let push = sphere.push_away(&Point3::new(3.0, 0.0, 4.0));
        assert!((push - Vector3::new(0.6, 0.0, 0.8)).norm() < 1.0e-12);
        assert_eq!(sphere.push_away(&Point3::origin()), Vector3::y());
    }

    #[test]
    fn degenerate_spheres_contain_nothing() {
        assert!(!sphere_contains(&Point3::origin(), 0.0, &Point3::origin()));
    }
}
