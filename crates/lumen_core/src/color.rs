use glam::Vec3;

/// Converts a packed `0xRRGGBB` colour into linear-scale components in `[0, 1]`.
pub fn from_hex(color: u32) -> Vec3 {
    Vec3::new(
        ((color & 0xFF0000) >> 16) as f32 / 255.0,
        ((color & 0x00FF00) >> 8) as f32 / 255.0,
        (color & 0x0000FF) as f32 / 255.0,
    )
}
