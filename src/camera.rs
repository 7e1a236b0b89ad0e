use crate::frustum::Frustum;
use nalgebra::{Matrix4, Point3, Vector3};

/// Read-only view of where the camera is and where it looks.
pub trait CameraProbe {
    fn position(&self) -> Point3<f64>;
    fn forward(&self) -> Vector3<f64>;
}

pub struct Camera {
    position: Point3<f64>,
    front: Vector3<f64>,
    up: Vector3<f64>,

    fov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new() -> Camera {
        Camera {
            position: Point3::new(0.0, 0.0, 200.0),
            front: Vector3::new(0.0, 0.0, -5.0),
            up: Vector3::y(),
            fov: 1.2,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1.0e6,
        }
    }

    pub fn set_position(&mut self, position: Point3<f64>) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_front(&mut self, front: Vector3<f64>) -> &mut Self {
        self.front = front;
        self
    }

    pub fn set_up(&mut self, up: Vector3<f64>) -> &mut Self {
        self.up = up;
        self
    }

    pub fn set_near(&mut self, near: f32) -> &mut Self {
        self.near = near;
        self
    }

    pub fn set_far(&mut self, far: f32) -> &mut Self {
        self.far = far;
        self
    }

    pub fn set_field_of_view(&mut self, fov: f32) -> &mut Self {
        self.fov = fov;
        self
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> &mut Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn translate_by(&mut self, translation: &Vector3<f64>) -> &mut Self {
        self.position += translation;
        self
    }

    pub fn front(&self) -> &Vector3<f64> {
        &self.front
    }

    pub fn up(&self) -> &Vector3<f64> {
        &self.up
    }

    pub fn view(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &(self.position + self.front), &self.up)
    }

    pub fn projection(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect_ratio, self.fov, self.near, self.far)
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.view(), self.projection())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new()
    }
}

impl CameraProbe for Camera {
    fn position(&self) -> Point3<f64> {
        self.position
    }

    fn forward(&self) -> Vector3<f64> {
        self.front
    }
}
