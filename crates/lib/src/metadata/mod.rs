//! # Image Metadata
//!
//! Fetches an image, decodes its EXIF block and normalizes the camera fields.
//! [`extract_metadata`] is the boundary of this module: it never fails, and any
//! fetch or decode error becomes an empty [`ImageMetadata`].

pub mod decode;
pub mod fetch;
pub mod normalize;
pub mod raw;

pub use decode::{ExifTagDecoder, TagDecoder};
pub use fetch::{HttpImageFetcher, ImageFetcher};
pub use normalize::normalize;
pub use raw::RawTagTree;

use crate::{errors::MetadataError, types::ImageMetadata};
use tracing::{debug, warn};

/// Fetches `url`, decodes it and normalizes the result.
pub async fn extract_metadata(
    fetcher: &dyn ImageFetcher,
    decoder: &dyn TagDecoder,
    url: &str,
) -> ImageMetadata {
    match try_extract_metadata(fetcher, decoder, url).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Failed to extract metadata for {url}: {e}");
            ImageMetadata::default()
        }
    }
}

async fn try_extract_metadata(
    fetcher: &dyn ImageFetcher,
    decoder: &dyn TagDecoder,
    url: &str,
) -> Result<ImageMetadata, MetadataError> {
    let bytes = fetcher.fetch(url).await?;
    debug!("Fetched {} bytes from {url}", bytes.len());
    let tree = decoder.decode(&bytes)?;
    Ok(normalize(&tree))
}
