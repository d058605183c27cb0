//! Decoded photos awaiting upload as display-referred (sRGB) textures.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::TinselError;

/// Width of the gold border as a fraction of the panel's shorter side.
pub const FRAME_BORDER: f32 = 0.06;

/// Longest side of a photo panel at unit scale.
pub const PANEL_EXTENT: f32 = 1.6;

/// Longest side kept by [`PhotoImage::decode`]. WebGL2 guarantees 2D
/// textures up to this size; larger photos are downscaled.
pub const MAX_PHOTO_SIDE: u32 = 2048;

/// An RGBA8 image whose bytes are sRGB-encoded, ready for an
/// `Rgba8UnormSrgb` texture.
///
/// The aspect ratio is that of the source image and survives downscaling,
/// so a panel framed before a resize keeps its shape.
#[derive(Clone, PartialEq)]
pub struct PhotoImage {
    buffer: RgbaImage,
    aspect: f32,
}

impl std::fmt::Debug for PhotoImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("aspect", &self.aspect)
            .finish_non_exhaustive()
    }
}

impl PhotoImage {
    /// Decode an encoded image file (PNG, JPEG, ...), downscaled so neither
    /// side exceeds [`MAX_PHOTO_SIDE`].
    pub fn decode(bytes: &[u8]) -> Result<Self, TinselError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| TinselError::PhotoDecode(e.to_string()))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
            .map(|photo| photo.fit_within(MAX_PHOTO_SIDE))
    }

    /// Wrap raw sRGB RGBA8 pixels, e.g. from a canvas `ImageData`.
    pub fn from_rgba(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, TinselError> {
        if width == 0 || height == 0 {
            return Err(TinselError::PhotoDecode(format!(
                "empty image ({width}x{height})"
            )));
        }
        let len = pixels.len();
        let buffer = RgbaImage::from_raw(width, height, pixels)
            .filter(|_| len == width as usize * height as usize * 4)
            .ok_or_else(|| {
                TinselError::PhotoDecode(format!(
                    "expected {} RGBA bytes for {width}x{height}, got {len}",
                    width as usize * height as usize * 4
                ))
            })?;
        Ok(Self {
            buffer,
            aspect: width as f32 / height as f32,
        })
    }

    /// Downscale so neither side exceeds `max_side`, keeping the aspect
    /// ratio. Images already within bounds are returned unchanged.
    #[must_use]
    pub fn fit_within(self, max_side: u32) -> Self {
        let max_side = max_side.max(1);
        let (width, height) = self.buffer.dimensions();
        if width <= max_side && height <= max_side {
            return self;
        }
        let scale = max_side as f32 / width.max(height) as f32;
        let side = |v: u32| ((v as f32 * scale).round() as u32).clamp(1, max_side);
        let (w, h) = (side(width), side(height));
        log::debug!("photo downscaled from {width}x{height} to {w}x{h}");
        Self {
            buffer: imageops::resize(&self.buffer, w, h, FilterType::Triangle),
            aspect: self.aspect,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Tightly packed RGBA8 rows.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Width over height of the source image.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }
}

/// Panel (image area) width and height at unit scale for a given aspect.
#[must_use]
pub fn panel_size(aspect: f32) -> (f32, f32) {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    if aspect >= 1.0 {
        (PANEL_EXTENT, PANEL_EXTENT / aspect)
    } else {
        (PANEL_EXTENT * aspect, PANEL_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 40, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decode_png_keeps_srgb_bytes() {
        let photo = PhotoImage::decode(&encoded_png(4, 2)).unwrap();
        assert_eq!((photo.width(), photo.height()), (4, 2));
        assert_eq!(photo.pixels().len(), 4 * 2 * 4);
        assert_eq!(&photo.pixels()[..4], &[200, 30, 40, 255]);
        assert!((photo.aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn decode_garbage_is_an_error() {
        let err = PhotoImage::decode(b"not an image").unwrap_err();
        assert!(matches!(err, TinselError::PhotoDecode(_)));
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(PhotoImage::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(PhotoImage::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(PhotoImage::from_rgba(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn oversized_decode_is_clamped() {
        let photo = PhotoImage::decode(&encoded_png(9000, 2)).unwrap();
        assert_eq!((photo.width(), photo.height()), (MAX_PHOTO_SIDE, 1));
        assert_eq!(photo.pixels().len(), MAX_PHOTO_SIDE as usize * 4);
        assert!((photo.aspect() - 4500.0).abs() < 1e-2);
    }

    #[test]
    fn fit_within_keeps_aspect() {
        let photo = PhotoImage::from_rgba(400, 300, vec![7; 400 * 300 * 4])
            .unwrap()
            .fit_within(100);
        assert_eq!((photo.width(), photo.height()), (100, 75));
        assert!((photo.aspect() - 4.0 / 3.0).abs() < 1e-6);

        let small = PhotoImage::from_rgba(2, 2, vec![1; 16]).unwrap();
        assert_eq!(small.clone().fit_within(8192), small);
    }

    #[test]
    fn panel_size_fits_longest_side() {
        assert_eq!(panel_size(2.0), (PANEL_EXTENT, PANEL_EXTENT / 2.0));
        assert_eq!(panel_size(0.5), (PANEL_EXTENT * 0.5, PANEL_EXTENT));
        assert_eq!(panel_size(f32::NAN), (PANEL_EXTENT, PANEL_EXTENT));
    }
}
