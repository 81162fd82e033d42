//! Cover-art color sampling.
//!
//! Colors are read at four fixed points rather than clustered over the whole
//! image; [`SAMPLE_POINTS`] is the only place that decides where to look.

use std::{io::Cursor, sync::Arc};

use image::{DynamicImage, GenericImageView, ImageError, ImageReader, Limits, Rgba};
use tracing::debug;
use url::Url;

use crate::{color::Rgb, error::SampleError, infra::Fetcher};

const MAX_DIMENSION: u32 = 16_384;
const MAX_DECODE_ALLOC: u64 = 256 * 1024 * 1024;

/// A position expressed as `numerator / denominator` of each dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePoint {
    pub x: (u32, u32),
    pub y: (u32, u32),
}

impl SamplePoint {
    pub const fn new(x: (u32, u32), y: (u32, u32)) -> Self {
        Self { x, y }
    }

    /// Pixel coordinate, `floor(dimension * fraction)` on each axis.
    pub fn locate(self, width: u32, height: u32) -> (u32, u32) {
        (scale(width, self.x), scale(height, self.y))
    }
}

fn scale(dimension: u32, (numerator, denominator): (u32, u32)) -> u32 {
    let scaled =
        u64::from(dimension) * u64::from(numerator) / u64::from(denominator);
    // fraction < 1, so this never exceeds `dimension`
    scaled as u32
}

/// Center, upper-left third, lower-right third, upper-right third.
pub const SAMPLE_POINTS: [SamplePoint; 4] = [
    SamplePoint::new((1, 2), (1, 2)),
    SamplePoint::new((1, 3), (1, 3)),
    SamplePoint::new((2, 3), (2, 3)),
    SamplePoint::new((2, 3), (1, 3)),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Drop near-white pixels before adjustment.
    pub skip_near_white: bool,
}

/// Adjusted colors at [`SAMPLE_POINTS`], first-seen order, no duplicates.
///
/// A zero-sized image yields an empty sample.
pub fn sample_image(image: &DynamicImage, options: SamplerOptions) -> Vec<Rgb> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut colors: Vec<Rgb> = Vec::with_capacity(SAMPLE_POINTS.len());
    for point in SAMPLE_POINTS {
        let (x, y) = point.locate(width, height);
        let Rgba([r, g, b, a]) = image.get_pixel(x, y);

        // Fully transparent pixels read back as black from an RGBA canvas.
        let raw = if a == 0 { Rgb::new(0, 0, 0) } else { Rgb::new(r, g, b) };
        if options.skip_near_white && raw.is_near_white() {
            continue;
        }

        let adjusted = raw.adjusted();
        if !colors.contains(&adjusted) {
            colors.push(adjusted);
        }
    }

    colors
}

/// Decode with bounded dimensions and allocation.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DIMENSION);
    limits.max_image_height = Some(MAX_DIMENSION);
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    reader.limits(limits);

    reader.decode()
}

pub fn sample_bytes(
    bytes: &[u8],
    options: SamplerOptions,
) -> Result<Vec<Rgb>, SampleError> {
    let image = decode_image(bytes)?;
    Ok(sample_image(&image, options))
}

/// Fetches a cover once and samples it off the async runtime.
#[derive(Clone)]
pub struct ImageSampler {
    fetcher: Arc<dyn Fetcher>,
    options: SamplerOptions,
}

impl std::fmt::Debug for ImageSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSampler")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ImageSampler {
    pub fn new(fetcher: Arc<dyn Fetcher>, options: SamplerOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn options(&self) -> SamplerOptions {
        self.options
    }

    pub async fn sample_url(&self, url: &Url) -> Result<Vec<Rgb>, SampleError> {
        let bytes = self.fetcher.fetch_image(url).await?;
        let options = self.options;

        let colors =
            tokio::task::spawn_blocking(move || sample_bytes(&bytes, options))
                .await??;

        debug!(
            url = %url,
            colors = ?colors.iter().map(|c| c.to_hex()).collect::<Vec<_>>(),
            "sampled cover colors"
        );
        Ok(colors)
    }
}
