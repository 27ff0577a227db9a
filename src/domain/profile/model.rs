use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerIdentity {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ProfileProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TexturesPayload {
    #[serde(default)]
    pub textures: TextureSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TextureSet {
    pub skin: Option<TextureRef>,
    pub cape: Option<TextureRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextureRef {
    pub url: String,
    pub metadata: Option<TextureMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextureMetadata {
    pub model: Option<String>,
}
