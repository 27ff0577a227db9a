use image::{imageops, RgbaImage};

pub const SKIN_WIDTH: u32 = 64;
pub const SKIN_HEIGHT: u32 = 64;
const LEGACY_HEIGHT: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    Decode(String),
    WrongSize(u32, u32),
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(detail) => write!(f, "not a recognizable image: {detail}"),
            Self::WrongSize(width, height) => {
                write!(f, "unsupported skin dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

// Legacy skins carry only the right limbs; the modern layout mirrors them
// into dedicated left-limb slots. Each face rect is copied flipped.
// (src_x, src_y, width, height, dst_x, dst_y)
const LEGACY_LIMB_FACES: [(u32, u32, u32, u32, u32, u32); 12] = [
    // right leg -> left leg slot at (16,48)
    (4, 16, 4, 4, 20, 48),   // top
    (8, 16, 4, 4, 24, 48),   // bottom
    (0, 20, 4, 12, 24, 52),  // outer
    (4, 20, 4, 12, 20, 52),  // front
    (8, 20, 4, 12, 16, 52),  // inner
    (12, 20, 4, 12, 28, 52), // back
    // right arm -> left arm slot at (32,48)
    (44, 16, 4, 4, 36, 48),
    (48, 16, 4, 4, 40, 48),
    (40, 20, 4, 12, 40, 52),
    (44, 20, 4, 12, 36, 52),
    (48, 20, 4, 12, 32, 52),
    (52, 20, 4, 12, 44, 52),
];

/// Decodes raw bytes into the canonical 64x64 RGBA skin layout, upgrading
/// legacy 64x32 skins on the way. Pixel content is not validated.
pub fn normalize(raw_bytes: &[u8]) -> Result<RgbaImage, NormalizeError> {
    let decoded = image::load_from_memory(raw_bytes)
        .map_err(|err| NormalizeError::Decode(err.to_string()))?;
    let mut skin = decoded.to_rgba8();

    if skin.dimensions() == (SKIN_WIDTH, LEGACY_HEIGHT) {
        skin = upgrade_legacy_layout(&skin);
    }

    let (width, height) = skin.dimensions();
    if (width, height) != (SKIN_WIDTH, SKIN_HEIGHT) {
        return Err(NormalizeError::WrongSize(width, height));
    }

    Ok(skin)
}

fn upgrade_legacy_layout(legacy: &RgbaImage) -> RgbaImage {
    let mut upgraded = RgbaImage::new(SKIN_WIDTH, SKIN_HEIGHT);
    imageops::replace(&mut upgraded, legacy, 0, 0);

    for (src_x, src_y, width, height, dst_x, dst_y) in LEGACY_LIMB_FACES {
        let face = imageops::crop_imm(legacy, src_x, src_y, width, height).to_image();
        let mirrored = imageops::flip_horizontal(&face);
        imageops::replace(&mut upgraded, &mirrored, i64::from(dst_x), i64::from(dst_y));
    }

    upgraded
}
