use rectpose_core::Point2;
use serde::{Deserialize, Serialize};

/// Size of the source image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ImageSize {
    /// Create an image size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel coordinates of the image center.
    pub fn center(&self) -> [f64; 2] {
        [self.width / 2.0, self.height / 2.0]
    }
}

/// Width of the image on the projective plane `z = 1`, for a field of view in degrees.
pub fn projective_width(fov_deg: f64) -> f64 {
    2.0 * (fov_deg / 2.0).to_radians().tan()
}

/// Mapping between pixel coordinates and the projective plane `z = 1`.
///
/// Pixels are scaled isotropically by `projective_width(fov) / width` around the image
/// center, so square pixels and a centered principal point are assumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapping {
    scale: f64,
    center: [f64; 2],
}

impl PixelMapping {
    /// Create the mapping for a field of view in degrees and an image size.
    pub fn new(fov_deg: f64, size: &ImageSize) -> Self {
        Self {
            scale: projective_width(fov_deg) / size.width,
            center: size.center(),
        }
    }

    /// Projective units per pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel point to the projective plane.
    pub fn to_projective(&self, p: &Point2) -> Point2 {
        Point2::new(
            self.scale * (p.x - self.center[0]),
            self.scale * (p.y - self.center[1]),
        )
    }

    /// Projective-plane point back to pixels.
    pub fn to_pixel(&self, p: &Point2) -> Point2 {
        Point2::new(
            self.center[0] + p.x / self.scale,
            self.center[1] + p.y / self.scale,
        )
    }
}
