//! Surface materials.
//!
//! A closed set dispatched by `match`. Materials are immutable once built
//! and shared read-only by every render thread.

use prism_math::{colors, Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::brdf;
use crate::hittable::HitRecord;

/// Metalness values below this are treated as a dielectric.
const DIELECTRIC_THRESHOLD: f32 = 1e-4;
/// Base reflectivity of dielectrics
const DIELECTRIC_F0: Color = Color::splat(0.04);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// Unlit flat color
    SolidColor { color: Color },
    Lambert { diffuse_color: Color, kd: f32 },
    LambertPhong {
        diffuse_color: Color,
        kd: f32,
        ks: f32,
        phong_exponent: f32,
    },
    CookTorrance {
        albedo: Color,
        metalness: f32,
        roughness: f32,
    },
}

impl Default for Material {
    fn default() -> Self {
        Material::solid_color(colors::RED)
    }
}

impl Material {
    pub fn solid_color(color: Color) -> Self {
        Material::SolidColor { color }
    }

    pub fn lambert(diffuse_color: Color, kd: f32) -> Self {
        Material::Lambert { diffuse_color, kd }
    }

    pub fn lambert_phong(diffuse_color: Color, kd: f32, ks: f32, phong_exponent: f32) -> Self {
        Material::LambertPhong {
            diffuse_color,
            kd,
            ks,
            phong_exponent,
        }
    }

    pub fn cook_torrance(albedo: Color, metalness: f32, roughness: f32) -> Self {
        Material::CookTorrance {
            albedo,
            metalness,
            roughness,
        }
    }

    /// Reflected color at `hit` for light arriving from `l`, seen from `v`.
    pub fn shade(&self, hit: &HitRecord, l: Vec3, v: Vec3) -> Color {
        match *self {
            Material::SolidColor { color } => color,
            Material::Lambert { diffuse_color, kd } => brdf::lambert(kd, diffuse_color),
            Material::LambertPhong {
                diffuse_color,
                kd,
                ks,
                phong_exponent,
            } => brdf::lambert(kd, diffuse_color) + brdf::phong(ks, phong_exponent, l, v, hit.normal),
            Material::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => cook_torrance(hit.normal, l, v, albedo, metalness, roughness),
        }
    }
}

fn cook_torrance(n: Vec3, l: Vec3, v: Vec3, albedo: Color, metalness: f32, roughness: f32) -> Color {
    let h = (l + v).normalize_or_zero();
    let f0 = if metalness < DIELECTRIC_THRESHOLD {
        DIELECTRIC_F0
    } else {
        albedo
    };

    let f = brdf::fresnel_schlick(h, v, f0);
    let d = brdf::normal_distribution_ggx(n, h, roughness);
    let g = brdf::geometry_smith(n, v, l, roughness);

    let n_dot_v = n.dot(v);
    let n_dot_l = n.dot(l);
    let specular = if n_dot_v > 0.0 && n_dot_l > 0.0 {
        f * (d * g / (4.0 * n_dot_v * n_dot_l))
    } else {
        Color::ZERO
    };

    let kd = (Color::ONE - f) * (1.0 - metalness);
    brdf::lambert_colored(kd, albedo) + specular
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn hit_with_normal(normal: Vec3) -> HitRecord {
        HitRecord {
            normal,
            did_hit: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_solid_color_ignores_directions() {
        let m = Material::solid_color(colors::BLUE);
        let hit = hit_with_normal(Vec3::Y);
        assert_eq!(m.shade(&hit, Vec3::Y, Vec3::X), colors::BLUE);
    }

    #[test]
    fn test_lambert_is_view_independent() {
        let m = Material::lambert(Color::new(0.49, 0.57, 0.57), 1.0);
        let hit = hit_with_normal(Vec3::Y);

        let a = m.shade(&hit, Vec3::Y, Vec3::Y);
        let b = m.shade(&hit, Vec3::Y, Vec3::new(1.0, 1.0, 0.0).normalize());
        assert_eq!(a, b);
        assert!((a - Color::new(0.49, 0.57, 0.57) / PI).length() < 1e-6);
    }

    #[test]
    fn test_lambert_phong_adds_highlight() {
        let m = Material::lambert_phong(colors::BLUE, 1.0, 1.0, 60.0);
        let hit = hit_with_normal(Vec3::Y);
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();

        let mirror = m.shade(&hit, l, Vec3::new(-1.0, 1.0, 0.0).normalize());
        let away = m.shade(&hit, l, Vec3::new(1.0, 1.0, 0.0).normalize());
        assert!((mirror.x - 1.0).abs() < 1e-4);
        assert_eq!(away, colors::BLUE / PI);
    }

    #[test]
    fn test_default_material_is_red() {
        assert_eq!(Material::default(), Material::solid_color(colors::RED));
    }

    #[test]
    fn test_cook_torrance_smooth_metal_is_sharper() {
        let hit = hit_with_normal(Vec3::Y);
        let l = Vec3::new(0.3, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-0.3, 1.0, 0.0).normalize();
        let off = Vec3::new(0.6, 1.0, 0.4).normalize();
        let silver = Color::new(0.972, 0.960, 0.915);

        let smooth = Material::cook_torrance(silver, 1.0, 0.1);
        let rough = Material::cook_torrance(silver, 1.0, 1.0);

        assert!(smooth.shade(&hit, l, mirror).x > rough.shade(&hit, l, mirror).x);
        assert!(smooth.shade(&hit, l, off).x < rough.shade(&hit, l, off).x);
    }

    #[test]
    fn test_cook_torrance_metal_has_no_diffuse() {
        let hit = hit_with_normal(Vec3::Y);
        // Light below the horizon: no specular, only the diffuse term is left
        let l = Vec3::new(1.0, -0.2, 0.0).normalize();
        let v = Vec3::Y;

        let metal = Material::cook_torrance(Color::ONE, 1.0, 0.5);
        assert_eq!(metal.shade(&hit, l, v), Color::ZERO);

        let plastic = Material::cook_torrance(Color::splat(0.75), 0.0, 0.5);
        assert!(plastic.shade(&hit, l, v).x > 0.0);
    }

    #[test]
    fn test_cook_torrance_grazing_highlight_stays_finite() {
        let hit = hit_with_normal(Vec3::Y);
        let l = Vec3::new(1.0, 0.01, 0.0).normalize();
        let v = Vec3::new(-1.0, 0.01, 0.0).normalize();

        let c = Material::cook_torrance(Color::splat(0.75), 0.0, 0.1).shade(&hit, l, v);
        assert!(c.is_finite());
        assert!(c.min_element() >= 0.0);
    }

    #[test]
    fn test_deserialize_tagged() {
        let m: Material = serde_json::from_str(
            r#"{"type": "cook_torrance", "albedo": [0.75, 0.75, 0.75], "metalness": 0.0, "roughness": 0.6}"#,
        )
        .unwrap();
        assert_eq!(m, Material::cook_torrance(Color::splat(0.75), 0.0, 0.6));
    }
}
