use nalgebra as na;

/// View and projection of a camera for a single frame. The view is kept in double precision so
/// that bodies thousands of units from the origin are composed with it before narrowing.
pub struct Frustum {
    pub view: na::Matrix4<f64>,
    pub projection: na::Matrix4<f32>,
    pub view_projection: na::Matrix4<f32>,
}

impl Frustum {
    pub fn new(view: na::Matrix4<f64>, projection: na::Matrix4<f32>) -> Frustum {
        Frustum {
            view,
            projection,
            view_projection: projection
                * na::convert::<na::Matrix4<f64>, na::Matrix4<f32>>(view),
        }
    }

    pub fn model_view_projection(&self, model: &na::Matrix4<f64>) -> na::Matrix4<f32> {
        self.projection * na::convert::<na::Matrix4<f64>, na::Matrix4<f32>>(self.view * model)
    }
}
