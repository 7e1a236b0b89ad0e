use crate::camera::Camera;
use nalgebra::Vector3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// Flies a camera along its own axes and applies bounce impulses handed to it after collisions.
pub struct CameraController {
    movement_vector: Vector3<f64>,
    speed: f64,
    bounce_strength: f64,
    pending_bounce: Option<Vector3<f64>>,
}

impl CameraController {
    pub fn new(speed: f64) -> CameraController {
        CameraController {
            movement_vector: Vector3::new(0.0, 0.0, 0.0),
            speed,
            bounce_strength: 2.0,
            pending_bounce: None,
        }
    }

    pub fn set_bounce_strength(&mut self, strength: f64) -> &mut Self {
        self.bounce_strength = strength;
        self
    }

    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.movement_vector.z = 1.0,
            Direction::Backward => self.movement_vector.z = -1.0,
            Direction::Left => self.movement_vector.x = -1.0,
            Direction::Right => self.movement_vector.x = 1.0,
        }
    }

    pub fn release(&mut self, direction: Direction) {
        let movement = &mut self.movement_vector;
        match direction {
            Direction::Forward if movement.z > 0.0 => movement.z = 0.0,
            Direction::Backward if movement.z < 0.0 => movement.z = 0.0,
            Direction::Left if movement.x < 0.0 => movement.x = 0.0,
            Direction::Right if movement.x > 0.0 => movement.x = 0.0,
            _ => {}
        }
    }

    /// Queue a push along `direction`, scaled to the bounce strength.
    pub fn bounce(&mut self, direction: &Vector3<f64>) {
        if let Some(direction) = direction.try_normalize(std::f64::EPSILON) {
            self.pending_bounce = Some(direction * self.bounce_strength);
        }
    }

    pub fn is_bouncing(&self) -> bool {
        self.pending_bounce.is_some()
    }

    pub fn tick(&mut self, time_since_last_frame: f64, camera: &mut Camera) {
        let forward = camera
            .front()
            .try_normalize(std::f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        let right = forward
            .cross(camera.up())
            .try_normalize(std::f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);

        let translation = (forward * self.movement_vector.z + right * self.movement_vector.x)
            * self.speed
            * time_since_last_frame;
        camera.translate_by(&translation);

        if let Some(bounce) = self.pending_bounce.take() {
            camera.translate_by(&bounce);
        }
    }
}
