//! Per-pixel shading for the rasterizer: normal mapping, Lambert diffuse and
//! Phong specular under a single directional light.

use std::f32::consts::PI;

use prism_core::{Texture, VertexOut};
use prism_math::{colors, reflect, Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::LightingData;

/// Which lighting term is written to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Cosine term only, as grayscale
    ObservedArea,
    Diffuse,
    Specular,
    /// `(diffuse + specular + ambient) * observed area`
    #[default]
    Combined,
}

impl ShadingMode {
    /// Cycle to the next shading mode.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }
}

/// Texture maps bound for a draw. Missing maps fall back to neutral values.
#[derive(Clone, Debug, Default)]
pub struct TextureSet {
    /// Albedo; falls back to the vertex color
    pub diffuse: Option<Texture>,
    /// Tangent-space normals; falls back to the interpolated normal
    pub normal: Option<Texture>,
    /// Specular color; falls back to white
    pub specular: Option<Texture>,
    /// Red channel scales the shininess; falls back to 1
    pub gloss: Option<Texture>,
}

impl TextureSet {
    /// Load whichever maps are given. A map that fails to load is logged and left unbound.
    pub fn load(
        diffuse: Option<&str>,
        normal: Option<&str>,
        specular: Option<&str>,
        gloss: Option<&str>,
    ) -> Self {
        fn load_one(path: Option<&str>) -> Option<Texture> {
            let path = path?;
            match Texture::load(path) {
                Ok(texture) => Some(texture),
                Err(err) => {
                    log::warn!("{}", err);
                    None
                }
            }
        }

        Self {
            diffuse: load_one(diffuse),
            normal: load_one(normal),
            specular: load_one(specular),
            gloss: load_one(gloss),
        }
    }
}

/// Shading normal, perturbed by the normal map when enabled and bound.
pub fn shading_normal(v: &VertexOut, textures: &TextureSet, use_normal_map: bool) -> Vec3 {
    match (&textures.normal, use_normal_map) {
        (Some(normal_map), true) => {
            let binormal = v.normal.cross(v.tangent);
            let sampled = 2.0 * normal_map.sample(v.uv) - Vec3::ONE;
            (v.tangent * sampled.x + binormal * sampled.y + v.normal * sampled.z).normalize_or_zero()
        }
        _ => v.normal,
    }
}

/// Shade one interpolated fragment.
///
/// Surfaces facing away from the light are black in every mode.
pub fn shade_pixel(
    v: &VertexOut,
    textures: &TextureSet,
    light: &LightingData,
    mode: ShadingMode,
    use_normal_map: bool,
) -> Color {
    let normal = shading_normal(v, textures, use_normal_map);
    let to_light = -light.direction.normalize_or_zero();

    let observed_area = normal.dot(to_light);
    if observed_area < 0.0 {
        return colors::BLACK;
    }

    let albedo = textures.diffuse.as_ref().map_or(v.color, |t| t.sample(v.uv));
    let diffuse = light.intensity * albedo / PI;

    let gloss = textures.gloss.as_ref().map_or(1.0, |t| t.sample(v.uv).x);
    let specular_color = textures.specular.as_ref().map_or(colors::WHITE, |t| t.sample(v.uv));
    let to_viewer = -v.view_direction.normalize_or_zero();
    let cos_alpha = reflect(-to_light, normal).dot(to_viewer).max(0.0);
    let specular = specular_color * cos_alpha.powf(gloss * light.shininess);

    match mode {
        ShadingMode::ObservedArea => Color::splat(observed_area),
        ShadingMode::Diffuse => diffuse * observed_area,
        ShadingMode::Specular => specular,
        ShadingMode::Combined => (diffuse + specular + light.ambient) * observed_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::Vec2;

    fn light() -> LightingData {
        LightingData {
            direction: Vec3::NEG_Z,
            ..Default::default()
        }
    }

    /// Fragment facing the light head on, viewed from straight in front.
    fn fragment() -> VertexOut {
        VertexOut {
            color: Color::new(0.5, 0.25, 1.0),
            normal: Vec3::Z,
            tangent: Vec3::X,
            view_direction: Vec3::new(0.0, 0.0, -5.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_mode_cycles_through_all() {
        let mut mode = ShadingMode::Combined;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![ShadingMode::ObservedArea, ShadingMode::Diffuse, ShadingMode::Specular, ShadingMode::Combined]
        );
    }

    #[test]
    fn test_back_facing_is_black() {
        let mut v = fragment();
        v.normal = Vec3::NEG_Z;

        for mode in [ShadingMode::ObservedArea, ShadingMode::Specular, ShadingMode::Combined] {
            assert_eq!(shade_pixel(&v, &TextureSet::default(), &light(), mode, true), colors::BLACK);
        }
    }

    #[test]
    fn test_observed_area_is_cosine() {
        let mut v = fragment();
        v.normal = Vec3::new(0.0, 1.0, 1.0).normalize();

        let c = shade_pixel(&v, &TextureSet::default(), &light(), ShadingMode::ObservedArea, false);
        assert!((c.x - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
        assert_eq!(c.x, c.y);
        assert_eq!(c.y, c.z);
    }

    #[test]
    fn test_diffuse_uses_vertex_color_without_texture() {
        let v = fragment();
        let c = shade_pixel(&v, &TextureSet::default(), &light(), ShadingMode::Diffuse, false);

        let expected = 7.0 * v.color / PI;
        assert!((c - expected).length() < 1e-5);
    }

    #[test]
    fn test_combined_head_on() {
        let v = fragment();
        let c = shade_pixel(&v, &TextureSet::default(), &light(), ShadingMode::Combined, false);

        // Mirror direction points straight at the viewer: full white specular
        let expected = 7.0 * v.color / PI + Color::ONE + Color::splat(0.025);
        assert!((c - expected).length() < 1e-4);
    }

    #[test]
    fn test_specular_falls_off_off_mirror() {
        let mut v = fragment();
        v.view_direction = Vec3::new(3.0, 0.0, -5.0);
        let c = shade_pixel(&v, &TextureSet::default(), &light(), ShadingMode::Specular, false);

        let cos = Vec3::new(-3.0, 0.0, 5.0).normalize().z;
        assert!((c.x - cos.powf(25.0)).abs() < 1e-5);
    }

    #[test]
    fn test_flat_normal_map_keeps_normal() {
        let textures = TextureSet {
            normal: Some(Texture::solid_color(Color::new(0.5, 0.5, 1.0))),
            ..Default::default()
        };
        let n = shading_normal(&fragment(), &textures, true);
        assert!((n - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_normal_map_tilts_normal() {
        let textures = TextureSet {
            normal: Some(Texture::solid_color(Color::new(1.0, 0.5, 0.5))),
            ..Default::default()
        };
        let v = fragment();

        assert!((shading_normal(&v, &textures, true) - Vec3::X).length() < 1e-5);
        assert_eq!(shading_normal(&v, &textures, false), Vec3::Z);
    }

    #[test]
    fn test_textures_override_fallbacks() {
        let textures = TextureSet {
            diffuse: Some(Texture::solid_color(Color::new(0.0, 1.0, 0.0))),
            gloss: Some(Texture::solid_color(Color::splat(0.0))),
            specular: Some(Texture::solid_color(Color::new(1.0, 0.0, 0.0))),
            ..Default::default()
        };
        let mut v = fragment();
        v.uv = Vec2::new(0.3, 0.7);

        let diffuse = shade_pixel(&v, &textures, &light(), ShadingMode::Diffuse, false);
        assert!((diffuse - Color::new(0.0, 7.0 / PI, 0.0)).length() < 1e-5);

        // Zero gloss → exponent 0 → specular is the specular map color
        let specular = shade_pixel(&v, &textures, &light(), ShadingMode::Specular, false);
        assert_eq!(specular, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_missing_texture_loads_as_unbound() {
        let set = TextureSet::load(Some("missing/diffuse.png"), None, None, None);
        assert!(set.diffuse.is_none());
    }
}
