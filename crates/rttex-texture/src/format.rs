//! Pixel format codes.

use std::fmt;

/// Pixel format stored in a texture header.
///
/// Codes mirror the OpenGL enums the engine hands straight to the driver,
/// plus a sentinel for textures that embed an encoded image file instead of
/// pixels. Only [`PixelFormat::Raw8`] can be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PixelFormat {
    /// 8 bits per channel, RGB or RGBA (`GL_UNSIGNED_BYTE`).
    Raw8,
    /// Packed 16-bit RGB (`GL_UNSIGNED_SHORT_5_6_5`).
    Rgb565,
    /// Packed 16-bit RGBA (`GL_UNSIGNED_SHORT_4_4_4_4`).
    Rgba4444,
    /// PVRTC 4bpp RGB.
    PvrtcRgb4,
    /// PVRTC 2bpp RGB.
    PvrtcRgb2,
    /// PVRTC 4bpp RGBA.
    PvrtcRgba4,
    /// PVRTC 2bpp RGBA.
    PvrtcRgba2,
    /// Payload is an encoded image file.
    EmbeddedFile,
    /// Any other code.
    Unknown(i32),
}

impl PixelFormat {
    pub const RAW8: i32 = 5121;
    pub const RGB565: i32 = 33635;
    pub const RGBA4444: i32 = 32819;
    pub const PVRTC_RGB4: i32 = 0x8C00;
    pub const PVRTC_RGB2: i32 = 0x8C01;
    pub const PVRTC_RGBA4: i32 = 0x8C02;
    pub const PVRTC_RGBA2: i32 = 0x8C03;
    pub const EMBEDDED_FILE: i32 = 20_000_000;

    /// Map a raw format code.
    pub fn from_raw(code: i32) -> Self {
        match code {
            Self::RAW8 => Self::Raw8,
            Self::RGB565 => Self::Rgb565,
            Self::RGBA4444 => Self::Rgba4444,
            Self::PVRTC_RGB4 => Self::PvrtcRgb4,
            Self::PVRTC_RGB2 => Self::PvrtcRgb2,
            Self::PVRTC_RGBA4 => Self::PvrtcRgba4,
            Self::PVRTC_RGBA2 => Self::PvrtcRgba2,
            Self::EMBEDDED_FILE => Self::EmbeddedFile,
            other => Self::Unknown(other),
        }
    }

    /// The raw format code.
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Raw8 => Self::RAW8,
            Self::Rgb565 => Self::RGB565,
            Self::Rgba4444 => Self::RGBA4444,
            Self::PvrtcRgb4 => Self::PVRTC_RGB4,
            Self::PvrtcRgb2 => Self::PVRTC_RGB2,
            Self::PvrtcRgba4 => Self::PVRTC_RGBA4,
            Self::PvrtcRgba2 => Self::PVRTC_RGBA2,
            Self::EmbeddedFile => Self::EMBEDDED_FILE,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw8 => write!(f, "raw 8-bit ({})", Self::RAW8),
            Self::Rgb565 => write!(f, "RGB565 ({})", Self::RGB565),
            Self::Rgba4444 => write!(f, "RGBA4444 ({})", Self::RGBA4444),
            Self::PvrtcRgb4 => write!(f, "PVRTC RGB 4bpp ({})", Self::PVRTC_RGB4),
            Self::PvrtcRgb2 => write!(f, "PVRTC RGB 2bpp ({})", Self::PVRTC_RGB2),
            Self::PvrtcRgba4 => write!(f, "PVRTC RGBA 4bpp ({})", Self::PVRTC_RGBA4),
            Self::PvrtcRgba2 => write!(f, "PVRTC RGBA 2bpp ({})", Self::PVRTC_RGBA2),
            Self::EmbeddedFile => write!(f, "embedded file ({})", Self::EMBEDDED_FILE),
            Self::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(PixelFormat::from_raw(5121), PixelFormat::Raw8);
        assert_eq!(PixelFormat::from_raw(20_000_000), PixelFormat::EmbeddedFile);
        assert_eq!(PixelFormat::from_raw(35842), PixelFormat::PvrtcRgba4);
        assert_eq!(PixelFormat::Raw8.to_raw(), 5121);
    }

    #[test]
    fn test_unknown_code_preserved() {
        let format = PixelFormat::from_raw(-7);
        assert_eq!(format, PixelFormat::Unknown(-7));
        assert_eq!(format.to_raw(), -7);
        assert_eq!(format.to_string(), "unknown (-7)");
    }
}
