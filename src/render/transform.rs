use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation in degrees, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotate: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotate: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, rotate: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotate,
            scale,
        }
    }

    pub fn add_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.rotate += Vec3::new(x, y, z);
    }

    pub fn matrix(&self) -> Mat4 {
        compose_transform_matrix(self.position, self.rotate, self.scale)
    }
}

/// Rotation order: Z (roll) * Y (yaw) * X (pitch).
pub fn compose_transform_matrix(position: Vec3, rotation_deg: Vec3, scale: Vec3) -> Mat4 {
    let rotation = Quat::from_euler(
        EulerRot::ZYX,
        rotation_deg.z.to_radians(),
        rotation_deg.y.to_radians(),
        rotation_deg.x.to_radians(),
    );
    Mat4::from_scale_rotation_translation(scale, rotation, position)
}
