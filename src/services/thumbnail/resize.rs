//! Aspect-preserving scale-to-fit resizing and JPEG re-encoding.

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use crate::errors::LoaderError;

/// Output canvas policy. Chosen per loader, not per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasMode {
    /// Canvas is exactly the scaled image.
    Borderless,
    /// Canvas is the full requested box, scaled image centered, remainder
    /// painted black.
    Bordered,
}

/// Scale `(width, height)` to fit inside `(box_width, box_height)`,
/// preserving aspect ratio. Never upscales: a source already inside the
/// box comes back unchanged.
pub fn fit_dimensions(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    let mut nw = width as f32;
    let mut nh = height as f32;
    if nw > box_width as f32 {
        nh = box_width as f32 * nh / nw;
        nw = box_width as f32;
    }
    if nh > box_height as f32 {
        nw = box_height as f32 * nw / nh;
        nh = box_height as f32;
    }
    // Extreme aspect ratios can truncate an edge to zero; keep 1px so the
    // encoder accepts the result.
    ((nw as u32).max(1), (nh as u32).max(1))
}

/// Resize `image` to fit the requested box and re-encode it as JPEG at
/// `quality`. Returns the output canvas dimensions with the encoded bytes.
pub fn scale_to_fit(
    image: &DynamicImage,
    box_width: u32,
    box_height: u32,
    mode: CanvasMode,
    quality: u8,
) -> Result<(u32, u32, Vec<u8>), LoaderError> {
    let (nw, nh) = fit_dimensions(image.width(), image.height(), box_width, box_height);
    // JPEG has no alpha channel; flatten before encoding.
    let scaled = if (nw, nh) == (image.width(), image.height()) {
        image.to_rgb8()
    } else {
        image.resize_exact(nw, nh, FilterType::Lanczos3).to_rgb8()
    };

    let (canvas_width, canvas_height, canvas) = match mode {
        CanvasMode::Borderless => (nw, nh, scaled),
        CanvasMode::Bordered => {
            let mut canvas = RgbImage::from_pixel(box_width, box_height, image::Rgb([0, 0, 0]));
            let x = i64::from((box_width - nw) / 2);
            let y = i64::from((box_height - nh) / 2);
            image::imageops::overlay(&mut canvas, &scaled, x, y);
            (box_width, box_height, canvas)
        }
    };

    let mut encoded = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, quality);
    canvas.write_with_encoder(encoder).map_err(LoaderError::Encode)?;
    Ok((canvas_width, canvas_height, encoded))
}
