//! Built-in thumbnail loaders.

use image::DynamicImage;

use super::loader::{LoaderRegistry, ThumbnailLoader, ThumbnailSource};
use super::resize::{self, CanvasMode};
use crate::config::ThumbnailConfig;
use crate::errors::LoaderError;
use crate::models::MediaKinds;

impl LoaderRegistry {
    /// Registry with the built-in loaders registered in their standard
    /// order: plain image files first, then cover art.
    pub fn with_defaults(config: &ThumbnailConfig) -> Self {
        Self::builder()
            .register(ImageFileLoader::new(config.jpeg_quality))
            .register(CoverArtLoader::new(config.jpeg_quality))
            .build()
    }
}

fn decode(source: &ThumbnailSource) -> Result<DynamicImage, LoaderError> {
    match source {
        ThumbnailSource::File(path) => {
            let data = std::fs::read(path)?;
            Ok(image::load_from_memory(&data)?)
        }
        ThumbnailSource::Memory(data) => Ok(image::load_from_memory(data)?),
    }
}

/// Thumbnails image files (or in-memory image bytes).
///
/// Borderless output: the canvas is exactly the scaled image, so photos
/// keep their aspect ratio without padding.
pub struct ImageFileLoader {
    quality: u8,
}

impl ImageFileLoader {
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }
}

impl ThumbnailLoader for ImageFileLoader {
    fn name(&self) -> &'static str {
        "image-file"
    }

    fn handles(&self) -> MediaKinds {
        MediaKinds::IMAGE
    }

    fn generate(
        &self,
        source: &ThumbnailSource,
        width: &mut u32,
        height: &mut u32,
    ) -> Result<Vec<u8>, LoaderError> {
        let image = decode(source)?;
        let (actual_width, actual_height, bytes) =
            resize::scale_to_fit(&image, *width, *height, CanvasMode::Borderless, self.quality)?;
        *width = actual_width;
        *height = actual_height;
        Ok(bytes)
    }
}

/// Thumbnails cover art already extracted from an audio or video
/// container.
///
/// Demuxing a container for its embedded art is the scanner's job; this
/// loader only works from extracted bytes, so a raw file path fails and
/// dispatch falls through. Covers get the bordered treatment: square boxes
/// stay square even for non-square art.
pub struct CoverArtLoader {
    quality: u8,
}

impl CoverArtLoader {
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }
}

impl ThumbnailLoader for CoverArtLoader {
    fn name(&self) -> &'static str {
        "cover-art"
    }

    fn handles(&self) -> MediaKinds {
        MediaKinds::AUDIO | MediaKinds::VIDEO
    }

    fn generate(
        &self,
        source: &ThumbnailSource,
        width: &mut u32,
        height: &mut u32,
    ) -> Result<Vec<u8>, LoaderError> {
        let ThumbnailSource::Memory(data) = source else {
            return Err(LoaderError::UnsupportedSource);
        };
        let image = image::load_from_memory(data)?;
        let (actual_width, actual_height, bytes) =
            resize::scale_to_fit(&image, *width, *height, CanvasMode::Bordered, self.quality)?;
        *width = actual_width;
        *height = actual_height;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([90, 120, 150]),
        ));
        let mut encoded = Vec::new();
        image
            .write_to(
                &mut std::io::Cursor::new(&mut encoded),
                image::ImageFormat::Png,
            )
            .unwrap();
        Bytes::from(encoded)
    }

    #[test]
    fn image_loader_reports_actual_dimensions() {
        let loader = ImageFileLoader::new(100);
        let source = ThumbnailSource::Memory(png_bytes(400, 200));
        let (mut width, mut height) = (100, 100);

        let bytes = loader.generate(&source, &mut width, &mut height).unwrap();

        assert_eq!((width, height), (100, 50));
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[test]
    fn image_loader_rejects_undecodable_bytes() {
        let loader = ImageFileLoader::new(100);
        let source = ThumbnailSource::Memory(Bytes::from_static(b"not an image"));
        let (mut width, mut height) = (100, 100);

        assert!(matches!(
            loader.generate(&source, &mut width, &mut height),
            Err(LoaderError::Decode(_))
        ));
    }

    #[test]
    fn cover_loader_fills_the_requested_box() {
        let loader = CoverArtLoader::new(100);
        let source = ThumbnailSource::Memory(png_bytes(100, 400));
        let (mut width, mut height) = (200, 200);

        let bytes = loader.generate(&source, &mut width, &mut height).unwrap();

        assert_eq!((width, height), (200, 200));
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 200));
    }

    #[test]
    fn cover_loader_refuses_raw_paths() {
        let loader = CoverArtLoader::new(100);
        let source = ThumbnailSource::File("/media/song.mp3".into());
        let (mut width, mut height) = (200, 200);

        assert!(matches!(
            loader.generate(&source, &mut width, &mut height),
            Err(LoaderError::UnsupportedSource)
        ));
    }
}
