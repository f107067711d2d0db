//! Material descriptions handed to the GPU host.
//!
//! Shader sources are opaque here; materials only carry the program paths and
//! the uniform values the host uploads each frame.

use foundation::Rgb;
use foundation::math::Vec3;

use crate::config::{AtmosphereConfig, TextureConfig};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    Linear,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Wrap {
    Clamp,
    Repeat,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureAsset {
    pub path: String,
    pub color_space: ColorSpace,
    pub anisotropy: u8,
    pub wrap: Wrap,
}

impl TextureAsset {
    pub fn srgb(path: impl Into<String>, anisotropy: u8) -> Self {
        Self {
            path: path.into(),
            color_space: ColorSpace::Srgb,
            anisotropy,
            wrap: Wrap::Clamp,
        }
    }

    pub fn linear(path: impl Into<String>, anisotropy: u8) -> Self {
        Self {
            color_space: ColorSpace::Linear,
            ..Self::srgb(path, anisotropy)
        }
    }

    pub fn repeating(mut self) -> Self {
        self.wrap = Wrap::Repeat;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgram {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderProgram {
    fn named(name: &str) -> Self {
        Self {
            vertex: format!("shaders/{name}/vertex.glsl"),
            fragment: format!("shaders/{name}/fragment.glsl"),
        }
    }
}

/// Uniforms shared by the earth and atmosphere programs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightingUniforms {
    pub sun_direction: Vec3,
    pub atmosphere_day_color: Rgb,
    pub atmosphere_twilight_color: Rgb,
}

impl LightingUniforms {
    pub fn new(sun_direction: Vec3, atmosphere: &AtmosphereConfig) -> Self {
        Self {
            sun_direction,
            atmosphere_day_color: atmosphere.day_color,
            atmosphere_twilight_color: atmosphere.twilight_color,
        }
    }
}

/// Day/night blended surface with specular ocean and cloud masks.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthMaterial {
    pub program: ShaderProgram,
    pub day: TextureAsset,
    pub night: TextureAsset,
    pub specular_clouds: TextureAsset,
    pub lighting: LightingUniforms,
}

impl EarthMaterial {
    pub fn new(textures: &TextureConfig, lighting: LightingUniforms) -> Self {
        Self {
            program: ShaderProgram::named("earth"),
            day: TextureAsset::srgb(&textures.day, textures.anisotropy),
            night: TextureAsset::srgb(&textures.night, textures.anisotropy),
            specular_clouds: TextureAsset::linear(&textures.specular_clouds, textures.anisotropy),
            lighting,
        }
    }
}

/// Back-face glow shell around the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereMaterial {
    pub program: ShaderProgram,
    pub side: Side,
    pub transparent: bool,
    pub lighting: LightingUniforms,
}

impl AtmosphereMaterial {
    pub fn new(lighting: LightingUniforms) -> Self {
        Self {
            program: ShaderProgram::named("atmosphere"),
            side: Side::Back,
            transparent: true,
            lighting,
        }
    }
}

/// Lit, textured, translucent surface (clouds and storm markers).
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    pub map: TextureAsset,
    pub opacity: f64,
    pub depth_write: bool,
}

/// Unlit wireframe overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeMaterial {
    pub color: Rgb,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Earth(EarthMaterial),
    Atmosphere(AtmosphereMaterial),
    Surface(SurfaceMaterial),
    Wireframe(WireframeMaterial),
}

impl Material {
    /// Overwrite lighting uniforms on shader materials; others are untouched.
    pub fn sync_lighting(&mut self, lighting: LightingUniforms) {
        match self {
            Material::Earth(m) => m.lighting = lighting,
            Material::Atmosphere(m) => m.lighting = lighting,
            Material::Surface(_) | Material::Wireframe(_) => {}
        }
    }

    pub fn lighting(&self) -> Option<LightingUniforms> {
        match self {
            Material::Earth(m) => Some(m.lighting),
            Material::Atmosphere(m) => Some(m.lighting),
            Material::Surface(_) | Material::Wireframe(_) => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        match self {
            Material::Earth(_) => false,
            Material::Atmosphere(m) => m.transparent,
            Material::Surface(_) | Material::Wireframe(_) => true,
        }
    }
}
