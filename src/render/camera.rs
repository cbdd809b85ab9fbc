use super::{RenderError, Transform};
use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(pub usize);

#[derive(Debug, Clone)]
pub struct Camera {
    pub name: String,
    pub transform: Transform,
}

/// Named cameras, one of which is active, sharing a single aspect ratio.
#[derive(Debug, Clone)]
pub struct CameraRegistry {
    cameras: Vec<Camera>,
    active: Option<CameraId>,
    aspect: f32,
}

impl Default for CameraRegistry {
    fn default() -> Self {
        Self {
            cameras: Vec::new(),
            active: None,
            aspect: 1.0,
        }
    }
}

impl CameraRegistry {
    pub fn create(&mut self, name: &str) -> CameraId {
        if let Some(index) = self.cameras.iter().position(|camera| camera.name == name) {
            log::warn!("Camera '{}' already exists; reusing it", name);
            return CameraId(index);
        }
        self.cameras.push(Camera {
            name: name.to_string(),
            transform: Transform::default(),
        });
        CameraId(self.cameras.len() - 1)
    }

    pub fn activate(&mut self, name: &str) -> Result<CameraId, RenderError> {
        let index = self
            .cameras
            .iter()
            .position(|camera| camera.name == name)
            .ok_or_else(|| RenderError::UnknownCamera(name.to_string()))?;
        self.active = Some(CameraId(index));
        Ok(CameraId(index))
    }

    pub fn active(&self) -> Option<&Camera> {
        self.active.and_then(|id| self.cameras.get(id.0))
    }

    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.get_mut(id.0)
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        } else {
            log::debug!("Ignoring degenerate aspect ratio {}", aspect);
        }
    }
}

/// Drag-to-orbit around the origin on the horizontal plane.
#[derive(Debug, Clone, Copy)]
pub struct OrbitController {
    /// Degrees of yaw per pixel of horizontal drag.
    pub sensitivity: f32,
    pub radius: f32,
}

impl OrbitController {
    pub fn new(sensitivity: f32, radius: f32) -> Self {
        Self {
            sensitivity,
            radius,
        }
    }

    pub fn apply_drag(&self, transform: &mut Transform, dx: f32) {
        transform.add_rotation(0.0, dx * self.sensitivity, 0.0);
        transform.position = orbit_position(transform.rotate.y, self.radius);
    }
}

pub fn orbit_position(yaw_deg: f32, radius: f32) -> Vec3 {
    let (sin, cos) = yaw_deg.to_radians().sin_cos();
    Vec3::new(radius * sin, 0.0, radius * cos)
}

/// View-projection for a camera that always faces the origin.
pub fn view_projection(camera: &Transform, aspect: f32, fov_y_deg: f32) -> Mat4 {
    let eye = camera.position;
    let target = if eye.length_squared() > 1e-6 {
        Vec3::ZERO
    } else {
        eye + Vec3::NEG_Z
    };
    let view = Mat4::look_at_rh(eye, target, Vec3::Y);
    let projection = Mat4::perspective_rh(fov_y_deg.to_radians(), aspect.max(1e-3), 0.1, 500.0);
    projection * view
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_adds_scaled_yaw_and_recomputes_position() {
        let orbit = OrbitController::new(0.5, 5.0);
        let mut transform = Transform::new(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 180.0, 0.0),
            Vec3::ONE,
        );
        orbit.apply_drag(&mut transform, 10.0);
        assert!((transform.rotate.y - 185.0).abs() < 1e-4);
        let rad = 185.0f32.to_radians();
        let expected = Vec3::new(5.0 * rad.sin(), 0.0, 5.0 * rad.cos());
        assert!((transform.position - expected).length() < 1e-4);
    }

    #[test]
    fn orbit_position_stays_on_circle() {
        for yaw in [-720.0, -45.0, 0.0, 90.0, 180.0, 361.5] {
            let position = orbit_position(yaw, 5.0);
            assert!((position.length() - 5.0).abs() < 1e-4);
            assert_eq!(position.y, 0.0);
        }
    }

    #[test]
    fn registry_activates_by_name() {
        let mut registry = CameraRegistry::default();
        let main = registry.create("MainCamera");
        assert!(registry.active().is_none());
        assert_eq!(registry.activate("MainCamera").unwrap(), main);
        assert_eq!(registry.active().unwrap().name, "MainCamera");
        assert!(matches!(
            registry.activate("Missing"),
            Err(RenderError::UnknownCamera(_))
        ));
        assert_eq!(registry.create("MainCamera"), main);
    }

    #[test]
    fn aspect_rejects_degenerate_values() {
        let mut registry = CameraRegistry::default();
        registry.set_aspect(16.0 / 9.0);
        registry.set_aspect(0.0);
        registry.set_aspect(f32::NAN);
        assert!((registry.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn view_projection_produces_finite_matrix() {
        let camera = Transform::new(orbit_position(30.0, 5.0), Vec3::ZERO, Vec3::ONE);
        let matrix = view_projection(&camera, 1.5, 45.0);
        assert!(matrix.is_finite());
        let origin = matrix.project_point3(Vec3::ZERO);
        assert!(origin.x.abs() < 1e-4 && origin.y.abs() < 1e-4);
    }
}
