//! Linear interpolation per value kind:
//! - lerp_f32 / lerp_vec2 (unclamped; t may leave [0,1] for pulse easings)
//! - lerp_u8 / lerp_color (rounded to nearest, clamped to the byte domain)

use crate::value::{Color, Vec2};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp_f32(a.x, b.x, t), lerp_f32(a.y, b.y, t))
}

#[inline]
pub fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    lerp_f32(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8
}

/// Each of the four channels independently, alpha included.
#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::rgba(
        lerp_u8(a.r, b.r, t),
        lerp_u8(a.g, b.g, t),
        lerp_u8(a.b, b.b, t),
        lerp_u8(a.a, b.a, t),
    )
}
