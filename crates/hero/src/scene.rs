//! Scene description: camera, mesh, material and lighting rig.
//!
//! Everything here is plain data built once at mount. The per-frame updater
//! mutates the camera pose and mesh transform; the GPU backend reads the whole
//! description when packing uniforms.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::geometry::TorusKnot;

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.2, 4.2);

/// Fixed tilt about X applied to the knot before any animation.
pub const MESH_BASE_TILT: f32 = PI * 0.18;

/// Perspective camera that always looks at a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: CAMERA_START,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: CAMERA_FOV_DEGREES,
            aspect,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn look_at_origin(&mut self) {
        self.target = Vec3::ZERO;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Euler rotation of the knot, applied in X, Y, Z order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransform {
    pub rotation: Vec3,
}

impl MeshTransform {
    pub fn tilted() -> Self {
        Self {
            rotation: Vec3::new(MESH_BASE_TILT, 0.0, 0.0),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
    }
}

/// Metallic/roughness surface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear-space base colour.
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub env_intensity: f32,
}

impl Material {
    pub fn gold() -> Self {
        Self {
            base_color: srgb_hex_to_linear(0xd4af37),
            roughness: 0.25,
            metalness: 0.85,
            env_intensity: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: [f32; 3],
    pub ground: [f32; 3],
    pub intensity: f32,
}

/// Point light with a finite range; contribution fades to zero at `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub hemisphere: HemisphereLight,
    pub key: PointLight,
    pub rim: PointLight,
}

impl Lighting {
    /// Soft hemisphere fill plus a warm key and a darker gold rim.
    pub fn hero() -> Self {
        Self {
            hemisphere: HemisphereLight {
                sky: srgb_hex_to_linear(0xffffff),
                ground: srgb_hex_to_linear(0x101010),
                intensity: 0.8,
            },
            key: PointLight {
                position: Vec3::new(3.0, 2.0, 3.0),
                color: srgb_hex_to_linear(0xf2d479),
                intensity: 16.0,
                range: 12.0,
            },
            rim: PointLight {
                position: Vec3::new(-3.0, -1.0, -2.0),
                color: srgb_hex_to_linear(0xb38b00),
                intensity: 10.0,
                range: 10.0,
            },
        }
    }
}

/// Everything Scene Setup produces before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub camera: Camera,
    pub knot: TorusKnot,
    pub transform: MeshTransform,
    pub material: Material,
    pub lighting: Lighting,
}

impl SceneDescription {
    pub fn hero(aspect: f32) -> Self {
        Self {
            camera: Camera::new(aspect),
            knot: TorusKnot::hero(),
            transform: MeshTransform::tilted(),
            material: Material::gold(),
            lighting: Lighting::hero(),
        }
    }
}

/// Decodes a `0xRRGGBB` sRGB colour into linear components.
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_starts_in_front_of_the_knot() {
        let camera = Camera::new(16.0 / 9.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.2, 4.2));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.fovy, 45.0);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera {
            position: Vec3::new(0.0, 0.0, 4.2),
            ..Camera::new(1.0)
        };
        let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-6);
        assert!((clip.y / clip.w).abs() < 1e-6);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn base_tilt_is_applied_about_x() {
        let transform = MeshTransform::tilted();
        let rotated = transform.matrix().transform_vector3(Vec3::Y);
        assert!((rotated.y - MESH_BASE_TILT.cos()).abs() < 1e-6);
        assert!((rotated.z - MESH_BASE_TILT.sin()).abs() < 1e-6);
    }

    #[test]
    fn srgb_decoding_matches_reference_values() {
        for channel in srgb_hex_to_linear(0xffffff) {
            assert!((channel - 1.0).abs() < 1e-5);
        }
        assert_eq!(srgb_hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let gold = srgb_hex_to_linear(0xd4af37);
        assert!((gold[0] - 0.658).abs() < 1e-3);
        assert!((gold[1] - 0.429).abs() < 1e-3);
        assert!((gold[2] - 0.038).abs() < 1e-3);
    }

    #[test]
    fn hero_rig_has_three_lights_with_expected_placement() {
        let lighting = Lighting::hero();
        assert_eq!(lighting.hemisphere.intensity, 0.8);
        assert_eq!(lighting.key.position, Vec3::new(3.0, 2.0, 3.0));
        assert_eq!(lighting.rim.position, Vec3::new(-3.0, -1.0, -2.0));
        assert_eq!(lighting.key.range, 12.0);
        assert_eq!(lighting.rim.intensity, 10.0);
    }
}
