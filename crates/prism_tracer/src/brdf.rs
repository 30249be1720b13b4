//! Reflectance building blocks.
//!
//! Directions follow one convention throughout: `l` points from the surface
//! toward the light and `v` from the surface toward the viewer. All vectors
//! are unit length.

use std::f32::consts::PI;

use prism_math::{reflect, Color, Vec3};

/// Diffuse reflectance as a scalar scale on `color`.
#[inline]
pub fn lambert(kd: f32, color: Color) -> Color {
    color * kd / PI
}

/// Diffuse reflectance with a per-channel diffuse factor.
#[inline]
pub fn lambert_colored(kd: Color, color: Color) -> Color {
    color * kd / PI
}

/// Phong specular lobe around the mirror direction of `l`.
#[inline]
pub fn phong(ks: f32, exponent: f32, l: Vec3, v: Vec3, n: Vec3) -> Color {
    let cos_alpha = reflect(-l, n).dot(v).max(0.0);
    Color::splat(ks * cos_alpha.powf(exponent))
}

/// Schlick's approximation of the Fresnel term.
#[inline]
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Color) -> Color {
    let cos_theta = h.dot(v).max(0.0);
    f0 + (Color::ONE - f0) * (1.0 - cos_theta).powi(5)
}

/// Trowbridge-Reitz GGX normal distribution. `roughness` is squared before use.
#[inline]
pub fn normal_distribution_ggx(n: Vec3, h: Vec3, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let n_dot_h = n.dot(h).max(0.0);

    let denominator = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    a2 / (PI * denominator * denominator)
}

/// Schlick-GGX geometry term for one direction (direct lighting remap).
#[inline]
pub fn geometry_schlick_ggx(n: Vec3, dir: Vec3, roughness: f32) -> f32 {
    let k = (roughness + 1.0) * (roughness + 1.0) / 8.0;
    let n_dot = n.dot(dir).max(0.0);
    n_dot / (n_dot * (1.0 - k) + k)
}

/// Smith masking-shadowing: view and light terms multiplied.
#[inline]
pub fn geometry_smith(n: Vec3, v: Vec3, l: Vec3, roughness: f32) -> f32 {
    geometry_schlick_ggx(n, v, roughness) * geometry_schlick_ggx(n, l, roughness)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Color, b: Color) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_lambert() {
        assert_close(lambert(1.0, Color::ONE), Color::splat(1.0 / PI));
        assert_close(lambert_colored(Color::new(1.0, 0.5, 0.0), Color::ONE), Color::new(1.0, 0.5, 0.0) / PI);
    }

    #[test]
    fn test_phong_peaks_at_mirror_direction() {
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();

        assert_close(phong(0.5, 20.0, l, mirror, n), Color::splat(0.5));

        let off = Vec3::new(-0.2, 1.0, 0.3).normalize();
        assert!(phong(0.5, 20.0, l, off, n).x < 0.5);
    }

    #[test]
    fn test_phong_is_zero_facing_away() {
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let v = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_eq!(phong(1.0, 5.0, l, v, n), Color::ZERO);
    }

    #[test]
    fn test_fresnel_at_normal_incidence_is_f0() {
        let f0 = Color::new(0.972, 0.960, 0.915);
        assert_close(fresnel_schlick(Vec3::Y, Vec3::Y, f0), f0);
    }

    #[test]
    fn test_fresnel_at_grazing_is_white() {
        assert_close(fresnel_schlick(Vec3::Y, Vec3::X, Color::splat(0.04)), Color::ONE);
    }

    #[test]
    fn test_ggx_narrows_with_smoothness() {
        let n = Vec3::Y;
        let rough = normal_distribution_ggx(n, n, 1.0);
        let smooth = normal_distribution_ggx(n, n, 0.1);

        // Roughness 1 is the uniform distribution
        assert!((rough - 1.0 / PI).abs() < 1e-6);
        assert!(smooth > rough);

        let tilted = Vec3::new(0.5, 1.0, 0.0).normalize();
        assert!(normal_distribution_ggx(n, tilted, 0.1) < smooth);
    }

    #[test]
    fn test_geometry_terms() {
        let n = Vec3::Y;
        assert!((geometry_schlick_ggx(n, n, 0.6) - 1.0).abs() < 1e-6);
        assert_eq!(geometry_schlick_ggx(n, Vec3::NEG_Y, 0.6), 0.0);

        let grazing = Vec3::new(1.0, 0.1, 0.0).normalize();
        let g = geometry_smith(n, n, grazing, 0.6);
        assert!(g > 0.0 && g < 1.0);
    }
}
