/// Largest value of an 8-bit colour channel.
pub const CHANNEL_MAX: u8 = 255;

/// Map an 8-bit channel onto `0.0..=1.0`.
pub fn normalize_channel(channel: u8) -> f32 {
    f32::from(channel) / f32::from(CHANNEL_MAX)
}

/// Background colour, normalized once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    /// Opaque colour from 8-bit RGB.
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self {
            r: normalize_channel(r),
            g: normalize_channel(g),
            b: normalize_channel(b),
            a: 1.0,
        }
    }
}
