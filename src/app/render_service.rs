use reqwest::Client;

use crate::app::source::SkinSource;
use crate::domain::skin::composite::RenderKind;
use crate::domain::skin::normalizer::{self, NormalizeError};
use crate::domain::skin::pipeline;
use crate::infrastructure::cache::disk::DiskCache;
use crate::infrastructure::cache::key::derive_cache_key;
use crate::shared::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub slim: Option<bool>,
    pub overlay: bool,
    pub margin: u32,
    pub upscale: u32,
}

/// Runs one render request end to end: identify the source, check the disk
/// cache, and only on a miss fetch, normalize, composite and store. The
/// response is always a freshly encoded PNG, so hits and misses are
/// byte-identical.
pub async fn render_to_png(
    client: &Client,
    cache: &DiskCache,
    kind: RenderKind,
    source: SkinSource,
    options: RenderOptions,
) -> ApiResult<Vec<u8>> {
    let resolved = source.identify(client).await?;
    let key = derive_cache_key(
        resolved.cache_identifier(),
        options.overlay,
        options.margin,
        options.upscale,
    );
    let namespace = kind.cache_namespace();

    if let Some(cached) = cache.lookup(namespace, &key)? {
        return pipeline::encode_png(&cached);
    }

    let raw = resolved.load(client).await?;
    let skin = normalizer::normalize(&raw).map_err(|err| match err {
        NormalizeError::Decode(detail) => {
            log::info!("skin decode failed: {detail}");
            if resolved.is_inline() {
                ApiError::InvalidSkin
            } else {
                ApiError::InvalidUrl
            }
        }
        NormalizeError::WrongSize(width, height) => {
            log::info!("rejected skin with dimensions {width}x{height}");
            ApiError::InvalidSkinSize
        }
    })?;

    let slim = options.slim.or(resolved.slim_hint).unwrap_or(false);
    let rendered = pipeline::render(
        kind,
        &skin,
        slim,
        options.overlay,
        options.margin,
        options.upscale,
    )?;
    let png = pipeline::encode_png(&rendered)?;
    cache.store(namespace, &key, &png)?;

    Ok(png)
}
