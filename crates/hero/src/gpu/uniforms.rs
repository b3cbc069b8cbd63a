use bytemuck::{Pod, Zeroable};

use crate::animation::HeroState;
use crate::scene::{Camera, MeshTransform, PointLight, SceneDescription};

/// Uniform block shared by the vertex and fragment stages of `hero.wgsl`.
///
/// Every member is a `vec4`/`mat4` so the Rust and WGSL layouts agree without
/// manual padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub base_color: [f32; 4],
    /// roughness, metalness, environment intensity, unused.
    pub material: [f32; 4],
    /// rgb + intensity.
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    /// xyz + range.
    pub key_position: [f32; 4],
    /// rgb + intensity.
    pub key_color: [f32; 4],
    pub rim_position: [f32; 4],
    pub rim_color: [f32; 4],
}

impl SceneUniforms {
    /// Packs the static rig; call [`update`](Self::update) for the per-frame parts.
    pub fn new(scene: &SceneDescription) -> Self {
        let material = &scene.material;
        let hemi = &scene.lighting.hemisphere;
        let (key_position, key_color) = pack_point_light(&scene.lighting.key);
        let (rim_position, rim_color) = pack_point_light(&scene.lighting.rim);

        let mut uniforms = Self {
            view_proj: [[0.0; 4]; 4],
            model: [[0.0; 4]; 4],
            camera_position: [0.0; 4],
            base_color: [
                material.base_color[0],
                material.base_color[1],
                material.base_color[2],
                1.0,
            ],
            material: [
                material.roughness,
                material.metalness,
                material.env_intensity,
                0.0,
            ],
            hemi_sky: [hemi.sky[0], hemi.sky[1], hemi.sky[2], hemi.intensity],
            hemi_ground: [hemi.ground[0], hemi.ground[1], hemi.ground[2], 0.0],
            key_position,
            key_color,
            rim_position,
            rim_color,
        };
        uniforms.set_pose(&scene.camera, &scene.transform);
        uniforms
    }

    pub fn update(&mut self, state: &HeroState) {
        self.set_pose(state.camera(), state.transform());
    }

    fn set_pose(&mut self, camera: &Camera, transform: &MeshTransform) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
        self.model = transform.matrix().to_cols_array_2d();
        self.camera_position = camera.position.extend(1.0).to_array();
    }
}

fn pack_point_light(light: &PointLight) -> ([f32; 4], [f32; 4]) {
    (
        light.position.extend(light.range).to_array(),
        [light.color[0], light.color[1], light.color[2], light.intensity],
    )
}
