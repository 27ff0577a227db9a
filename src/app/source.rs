use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;

use crate::domain::profile::mojang;
use crate::infrastructure::http::fetcher;
use crate::shared::error::{ApiError, ApiResult};

/// The three mutually exclusive ways a request can point at a skin,
/// checked in this order when several are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkinSource {
    Player(String),
    Url(String),
    Base64(String),
}

impl SkinSource {
    pub fn from_params(
        player_name: Option<&str>,
        skin_url: Option<&str>,
        skin_base64: Option<&str>,
    ) -> ApiResult<Self> {
        fn non_empty(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        if let Some(name) = non_empty(player_name) {
            return Ok(Self::Player(name.to_string()));
        }
        if let Some(url) = non_empty(skin_url) {
            return Ok(Self::Url(url.to_string()));
        }
        if let Some(payload) = non_empty(skin_base64) {
            return Ok(Self::Base64(payload.to_string()));
        }

        Err(ApiError::MissingSource)
    }

    /// First phase: find where the skin lives without downloading it, so a
    /// cache hit can skip the fetch entirely. Player names cost a Mojang
    /// round-trip here; the other sources resolve locally.
    pub async fn identify(&self, client: &Client) -> ApiResult<ResolvedSource> {
        match self {
            Self::Player(name) => {
                let descriptor = mojang::skin_descriptor_for_player(client, name).await?;
                Ok(ResolvedSource {
                    location: SkinLocation::Remote(descriptor.url),
                    slim_hint: Some(descriptor.slim),
                })
            }
            Self::Url(url) => Ok(ResolvedSource {
                location: SkinLocation::Remote(url.clone()),
                slim_hint: None,
            }),
            Self::Base64(payload) => Ok(ResolvedSource {
                location: SkinLocation::Inline(payload.clone()),
                slim_hint: None,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkinLocation {
    Remote(String),
    Inline(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub location: SkinLocation,
    pub slim_hint: Option<bool>,
}

impl ResolvedSource {
    /// Cache identifier: the URL basename for remote skins, the raw payload
    /// for inline ones.
    pub fn cache_identifier(&self) -> &str {
        match &self.location {
            SkinLocation::Remote(url) => url.rsplit('/').next().unwrap_or(url.as_str()),
            SkinLocation::Inline(payload) => payload.as_str(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.location, SkinLocation::Inline(_))
    }

    /// Second phase: materialize the raw skin bytes.
    pub async fn load(&self, client: &Client) -> ApiResult<Vec<u8>> {
        match &self.location {
            SkinLocation::Remote(url) => fetcher::fetch_bytes(client, url).await,
            SkinLocation::Inline(payload) => decode_inline_payload(payload),
        }
    }
}

// Skin uploads arrive both padded and unpadded; try with one pad character
// appended first, then the payload as given.
fn decode_inline_payload(payload: &str) -> ApiResult<Vec<u8>> {
    let padded = format!("{payload}=");
    STANDARD
        .decode(&padded)
        .or_else(|_| STANDARD.decode(payload))
        .map_err(|err| {
            log::info!("inline skin payload is not valid base64: {err}");
            ApiError::InvalidSkin
        })
}
