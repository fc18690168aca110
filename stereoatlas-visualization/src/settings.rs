//! Render settings shared by every scene

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stereoatlas_core::{Color, Error, Result};
use stereoatlas_gpu::MaterialParams;

/// Surface shading preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderStyle {
    Default,
    Metallic,
    Plastic,
    Shiny,
    Glossy,
    #[default]
    Cartoon,
}

impl ShaderStyle {
    pub fn material(&self) -> MaterialParams {
        match self {
            ShaderStyle::Default => MaterialParams::default(),
            ShaderStyle::Metallic => MaterialParams {
                ambient: 0.1,
                diffuse: 0.3,
                specular: 1.0,
                shininess: 10.0,
                bands: 0.0,
            },
            ShaderStyle::Plastic => MaterialParams {
                ambient: 0.1,
                diffuse: 1.0,
                specular: 0.2,
                shininess: 10.0,
                bands: 0.0,
            },
            ShaderStyle::Shiny => MaterialParams {
                ambient: 0.2,
                diffuse: 0.6,
                specular: 0.8,
                shininess: 50.0,
                bands: 0.0,
            },
            ShaderStyle::Glossy => MaterialParams {
                ambient: 0.1,
                diffuse: 0.7,
                specular: 0.9,
                shininess: 30.0,
                bands: 0.0,
            },
            ShaderStyle::Cartoon => MaterialParams {
                ambient: 0.4,
                diffuse: 0.6,
                specular: 0.0,
                shininess: 1.0,
                bands: 3.0,
            },
        }
    }
}

impl FromStr for ShaderStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ShaderStyle::Default),
            "metallic" => Ok(ShaderStyle::Metallic),
            "plastic" => Ok(ShaderStyle::Plastic),
            "shiny" => Ok(ShaderStyle::Shiny),
            "glossy" => Ok(ShaderStyle::Glossy),
            "cartoon" => Ok(ShaderStyle::Cartoon),
            other => Err(Error::InvalidData(format!("Unknown shader style: {}", other))),
        }
    }
}

impl fmt::Display for ShaderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShaderStyle::Default => "default",
            ShaderStyle::Metallic => "metallic",
            ShaderStyle::Plastic => "plastic",
            ShaderStyle::Shiny => "shiny",
            ShaderStyle::Glossy => "glossy",
            ShaderStyle::Cartoon => "cartoon",
        };
        f.write_str(s)
    }
}

/// Global look of a rendered scene
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub shader_style: ShaderStyle,
    /// Transparency of the root outline added by the scene
    pub root_alpha: f32,
    /// Draw the atlas axes from the origin to the volume extent
    pub show_axes: bool,
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shader_style: ShaderStyle::Cartoon,
            root_alpha: 0.2,
            show_axes: false,
            background: Color::WHITE,
        }
    }
}
