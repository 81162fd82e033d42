//! # Podline Core
//!
//! Turns a podcast episode link into the data a share card needs: title,
//! cover URL, description, the show name quoted in the description, and a
//! layered CSS gradient derived from the cover art.
//!
//! ## Architecture
//!
//! - [`metadata`]: Open Graph extraction and channel-title parsing
//! - [`sampler`]: fixed-point color sampling of cover images
//! - [`color`]: RGB/HSL conversions and perceptual adjustment
//! - [`gradient`]: two-layer gradient composition with a default fallback
//! - [`pipeline`]: the end-to-end [`CardGenerator`]
//! - [`infra`]: outbound HTTP behind the [`Fetcher`] trait
//!
//! ## Examples
//!
//! ```no_run
//! use podline_core::{CardGenerator, FetchConfig, SamplerOptions};
//!
//! async fn card() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator =
//!         CardGenerator::from_config(FetchConfig::default(), SamplerOptions::default())?;
//!     let card = generator.generate("https://podcasts.example.com/episode/42").await?;
//!     println!("{} on {}", card.title, card.background_color);
//!     Ok(())
//! }
//! ```

pub mod color;
pub mod error;
pub mod gradient;
pub mod infra;
pub mod metadata;
pub mod pipeline;
pub mod sampler;

pub use color::{Hsl, Rgb, adjust_color, hex_to_rgb, is_near_white, rgb_to_hex};
pub use error::{CardError, FetchError, Result, SampleError};
pub use gradient::{GradientDescriptor, compose};
pub use infra::{FetchConfig, Fetcher, HttpFetcher};
pub use metadata::{MetadataExtractor, PageMetadata, extract_channel_title, parse_page_metadata};
pub use pipeline::{CardGenerator, GenerationResult, parse_link};
pub use sampler::{ImageSampler, SAMPLE_POINTS, SamplePoint, SamplerOptions};
