use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;

use crate::domain::profile::model::{PlayerIdentity, SessionProfile, TexturesPayload};
use crate::shared::error::{ApiError, ApiResult};

const PROFILE_LOOKUP_ENDPOINT: &str = "https://api.mojang.com/users/profiles/minecraft";
const SESSION_PROFILE_ENDPOINT: &str = "https://sessionserver.mojang.com/session/minecraft/profile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinDescriptor {
    pub url: String,
    pub slim: bool,
}

/// Resolves a player name to their skin URL and model hint through the
/// Mojang profile endpoints. Any malformed or empty answer along the way is
/// reported as an unknown player.
pub async fn skin_descriptor_for_player(
    client: &Client,
    player_name: &str,
) -> ApiResult<SkinDescriptor> {
    let identity = lookup_player_id(client, player_name).await?;
    let profile = fetch_session_profile(client, &identity.id).await?;

    let property = profile.properties.first().ok_or_else(|| {
        log::info!("session profile for {player_name} has no texture property");
        ApiError::UnknownPlayer
    })?;

    decode_texture_property(&property.value)
}

async fn lookup_player_id(client: &Client, player_name: &str) -> ApiResult<PlayerIdentity> {
    let response = client
        .get(format!("{PROFILE_LOOKUP_ENDPOINT}/{player_name}"))
        .send()
        .await
        .map_err(|err| {
            log::warn!("player id lookup failed for {player_name}: {err}");
            ApiError::UnknownPlayer
        })?;

    response.json::<PlayerIdentity>().await.map_err(|err| {
        log::info!("no profile found for player {player_name}: {err}");
        ApiError::UnknownPlayer
    })
}

async fn fetch_session_profile(client: &Client, player_id: &str) -> ApiResult<SessionProfile> {
    let response = client
        .get(format!("{SESSION_PROFILE_ENDPOINT}/{player_id}"))
        .send()
        .await
        .map_err(|err| {
            log::warn!("session profile fetch failed for {player_id}: {err}");
            ApiError::UnknownPlayer
        })?;

    response.json::<SessionProfile>().await.map_err(|err| {
        log::info!("invalid session profile for {player_id}: {err}");
        ApiError::UnknownPlayer
    })
}

fn decode_texture_property(value: &str) -> ApiResult<SkinDescriptor> {
    let decoded = STANDARD.decode(value).map_err(|err| {
        log::info!("texture property is not valid base64: {err}");
        ApiError::UnknownPlayer
    })?;

    let payload: TexturesPayload = serde_json::from_slice(&decoded).map_err(|err| {
        log::info!("texture property is not valid JSON: {err}");
        ApiError::UnknownPlayer
    })?;

    let skin = payload.textures.skin.ok_or(ApiError::UnknownPlayer)?;
    let slim = skin
        .metadata
        .as_ref()
        .and_then(|meta| meta.model.as_deref())
        == Some("slim");

    Ok(SkinDescriptor {
        url: skin.url,
        slim,
    })
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    use super::decode_texture_property;
    use crate::shared::error::ApiError;

    fn encode_textures(json: &str) -> String {
        STANDARD.encode(json)
    }

    #[test]
    fn extracts_skin_url_and_slim_model() {
        let property = encode_textures(
            r#"{"textures":{"SKIN":{"url":"http://textures.minecraft.net/texture/abc123","metadata":{"model":"slim"}}}}"#,
        );

        let descriptor = decode_texture_property(&property).expect("descriptor");
        assert_eq!(descriptor.url, "http://textures.minecraft.net/texture/abc123");
        assert!(descriptor.slim);
    }

    #[test]
    fn missing_metadata_means_classic_model() {
        let property = encode_textures(
            r#"{"textures":{"SKIN":{"url":"http://textures.minecraft.net/texture/abc123"}}}"#,
        );

        let descriptor = decode_texture_property(&property).expect("descriptor");
        assert!(!descriptor.slim);
    }

    #[test]
    fn profile_without_skin_texture_is_an_unknown_player() {
        let property = encode_textures(r#"{"textures":{}}"#);

        assert_eq!(
            decode_texture_property(&property),
            Err(ApiError::UnknownPlayer)
        );
    }

    #[test]
    fn garbage_property_is_an_unknown_player() {
        assert_eq!(
            decode_texture_property("not base64 at all!"),
            Err(ApiError::UnknownPlayer)
        );
    }
}
