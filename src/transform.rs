use nalgebra::{Matrix4, Point3, Translation3, Unit, UnitQuaternion, Vector3};

pub type Rotation = UnitQuaternion<f64>;

/// Uniform scale, rotation and translation of an entity. The model matrix applies them in that
/// order, so the world position is always the translation component.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub rotation: Rotation,
    pub translation: Translation3<f64>,
}

impl Transform {
    pub fn identity() -> Transform {
        Transform {
            scale: 1.0,
            rotation: Rotation::identity(),
            translation: Translation3::identity(),
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::from(self.translation.vector)
    }

    pub fn model_matrix(&self) -> Matrix4<f64> {
        self.translation.to_homogeneous()
            * self.rotation.to_homogeneous()
            * Matrix4::new_scaling(self.scale)
    }

    pub fn scale_by(&mut self, factor: f64) {
        self.scale *= factor;
    }

    /// Rotates in place about `axis` (in the entity's own frame). A zero axis is ignored.
    pub fn rotate(&mut self, angle: f64, axis: &Vector3<f64>) {
        if let Some(axis) = Unit::try_new(*axis, std::f64::EPSILON) {
            self.rotation *= UnitQuaternion::from_axis_angle(&axis, angle);
        }
    }

    /// Swings the position around `pivot` by `angle` about `axis`. Orientation is unaffected.
    pub fn revolve_around(&mut self, pivot: &Point3<f64>, angle: f64, axis: &Vector3<f64>) {
        if let Some(axis) = Unit::try_new(*axis, std::f64::EPSILON) {
            let relative = self.position() - pivot;
            let rotated = UnitQuaternion::from_axis_angle(&axis, angle) * relative;
            self.translation = Translation3::from(pivot.coords + rotated);
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

pub trait Transformable {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    fn translate_by(&mut self, translation: &Vector3<f64>) -> &mut Self
    where
        Self: Sized,
    {
        self.transform_mut().translation.vector += translation;
        self
    }

    fn position(&self) -> Point3<f64> {
        self.transform().position()
    }

    fn model_matrix(&self) -> Matrix4<f64> {
        self.transform().model_matrix()
    }
}
