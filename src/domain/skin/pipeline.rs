use image::{codecs::png::PngEncoder, imageops, ColorType, ImageEncoder, RgbaImage};

use crate::domain::skin::composite::RenderKind;
use crate::shared::error::{ApiError, ApiResult};

pub const MAX_MARGIN: u32 = 8;
pub const MAX_UPSCALE: u32 = 8;

/// Composites the skin and applies the fixed post-processing chain:
/// transparent margin first, nearest-neighbor upscale second. Margin and
/// upscale ranges are enforced here, not only at the query layer.
pub fn render(
    kind: RenderKind,
    skin: &RgbaImage,
    slim: bool,
    overlay: bool,
    margin: u32,
    upscale: u32,
) -> ApiResult<RgbaImage> {
    if margin > MAX_MARGIN {
        return Err(ApiError::InvalidArgument(format!(
            "margin must be between 0 and {MAX_MARGIN}, got {margin}"
        )));
    }
    if upscale < 1 || upscale > MAX_UPSCALE {
        return Err(ApiError::InvalidArgument(format!(
            "upscale must be between 1 and {MAX_UPSCALE}, got {upscale}"
        )));
    }

    let mut rendered = kind.composite(skin, slim, overlay);

    if margin > 0 {
        rendered = add_margin(&rendered, margin);
    }

    if upscale > 1 {
        let (width, height) = rendered.dimensions();
        rendered = imageops::resize(
            &rendered,
            width * upscale,
            height * upscale,
            imageops::FilterType::Nearest,
        );
    }

    Ok(rendered)
}

fn add_margin(image: &RgbaImage, margin: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut padded = RgbaImage::new(width + 2 * margin, height + 2 * margin);
    imageops::replace(&mut padded, image, i64::from(margin), i64::from(margin));
    padded
}

pub fn encode_png(image: &RgbaImage) -> ApiResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut output = Vec::<u8>::new();
    let encoder = PngEncoder::new(&mut output);
    encoder
        .write_image(image, width, height, ColorType::Rgba8.into())
        .map_err(|err| ApiError::Internal(format!("failed encoding PNG: {err}")))?;
    Ok(output)
}
