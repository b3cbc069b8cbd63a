use std::borrow::Cow;

/// WGSL source for the hero mesh: vertex transform plus metallic/roughness shading.
pub(crate) const HERO_SHADER_WGSL: &str = include_str!("shaders/hero.wgsl");

pub(crate) const VERTEX_ENTRY: &str = "vs_main";
pub(crate) const FRAGMENT_ENTRY: &str = "fs_main";

/// Compiles the hero shader module. Both entry points live in one module.
pub(crate) fn compile_scene_shader(device: &wgpu::Device) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("hero scene shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(HERO_SHADER_WGSL)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::naga;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(HERO_SHADER_WGSL).expect("hero shader should parse")
    }

    #[test]
    fn hero_shader_validates() {
        let module = parse();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        validator
            .validate(&module)
            .expect("hero shader should validate");
    }

    #[test]
    fn hero_shader_exposes_both_entry_points() {
        let module = parse();
        let names: Vec<&str> = module
            .entry_points
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert!(names.contains(&VERTEX_ENTRY));
        assert!(names.contains(&FRAGMENT_ENTRY));
    }
}
