use image::{imageops, RgbaImage};

/// The three render kinds served by the API, dispatched by route. Each is a
/// pure function of (skin, slim, overlay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Skin,
    Portrait,
    Face,
}

impl RenderKind {
    pub fn cache_namespace(self) -> &'static str {
        match self {
            Self::Skin => "skins",
            Self::Portrait => "portraits",
            Self::Face => "profiles",
        }
    }

    pub fn composite(self, skin: &RgbaImage, slim: bool, overlay: bool) -> RgbaImage {
        match self {
            Self::Skin => skin.clone(),
            Self::Portrait => portrait(skin, slim, overlay),
            Self::Face => face(skin, overlay),
        }
    }
}

const FACE_SIZE: u32 = 8;
pub const PORTRAIT_WIDTH: u32 = 16;
pub const PORTRAIT_HEIGHT: u32 = 20;

fn face(skin: &RgbaImage, overlay: bool) -> RgbaImage {
    let mut out = imageops::crop_imm(skin, 8, 8, FACE_SIZE, FACE_SIZE).to_image();
    if overlay {
        blend(&mut out, skin, (40, 8, FACE_SIZE, FACE_SIZE), (0, 0));
    }
    out
}

/// Front-facing bust: head over torso, arms flanking. Slim skins have
/// 3-wide arms pulled in against the torso.
fn portrait(skin: &RgbaImage, slim: bool, overlay: bool) -> RgbaImage {
    let arm_width = if slim { 3 } else { 4 };
    let mut out = RgbaImage::new(PORTRAIT_WIDTH, PORTRAIT_HEIGHT);

    paste(&mut out, skin, (20, 20, 8, 12), (4, 8)); // torso front
    paste(&mut out, skin, (44, 20, arm_width, 12), (4 - arm_width, 8)); // right arm front
    paste(&mut out, skin, (36, 52, arm_width, 12), (12, 8)); // left arm front
    paste(&mut out, skin, (8, 8, 8, 8), (4, 0)); // head front

    if overlay {
        blend(&mut out, skin, (20, 36, 8, 12), (4, 8)); // jacket
        blend(&mut out, skin, (44, 36, arm_width, 12), (4 - arm_width, 8)); // right sleeve
        blend(&mut out, skin, (52, 52, arm_width, 12), (12, 8)); // left sleeve
        blend(&mut out, skin, (40, 8, 8, 8), (4, 0)); // hat
    }

    out
}

fn paste(
    canvas: &mut RgbaImage,
    skin: &RgbaImage,
    (x, y, width, height): (u32, u32, u32, u32),
    (dst_x, dst_y): (u32, u32),
) {
    let part = imageops::crop_imm(skin, x, y, width, height).to_image();
    imageops::replace(canvas, &part, i64::from(dst_x), i64::from(dst_y));
}

fn blend(
    canvas: &mut RgbaImage,
    skin: &RgbaImage,
    (x, y, width, height): (u32, u32, u32, u32),
    (dst_x, dst_y): (u32, u32),
) {
    let part = imageops::crop_imm(skin, x, y, width, height).to_image();
    imageops::overlay(canvas, &part, i64::from(dst_x), i64::from(dst_y));
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::RenderKind;

    fn blank_skin() -> RgbaImage {
        RgbaImage::new(64, 64)
    }

    #[test]
    fn cache_namespaces_match_the_route_layout() {
        assert_eq!(RenderKind::Skin.cache_namespace(), "skins");
        assert_eq!(RenderKind::Portrait.cache_namespace(), "portraits");
        assert_eq!(RenderKind::Face.cache_namespace(), "profiles");
    }

    #[test]
    fn skin_kind_is_the_identity() {
        let mut skin = blank_skin();
        skin.put_pixel(0, 0, Rgba([1, 2, 3, 255]));

        let out = RenderKind::Skin.composite(&skin, false, false);
        assert_eq!(out, skin);
    }

    #[test]
    fn face_is_the_head_front_crop() {
        let mut skin = blank_skin();
        skin.put_pixel(8, 8, Rgba([10, 0, 0, 255]));
        skin.put_pixel(15, 15, Rgba([0, 10, 0, 255]));

        let out = RenderKind::Face.composite(&skin, false, false);
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(out.get_pixel(0, 0), &Rgba([10, 0, 0, 255]));
        assert_eq!(out.get_pixel(7, 7), &Rgba([0, 10, 0, 255]));
    }

    #[test]
    fn face_overlay_covers_the_base_where_opaque() {
        let mut skin = blank_skin();
        skin.put_pixel(8, 8, Rgba([10, 0, 0, 255]));
        // hat pixel over the same spot, plus one over a transparent spot
        skin.put_pixel(40, 8, Rgba([0, 20, 0, 255]));
        skin.put_pixel(41, 8, Rgba([0, 30, 0, 255]));

        let with_overlay = RenderKind::Face.composite(&skin, false, true);
        assert_eq!(with_overlay.get_pixel(0, 0), &Rgba([0, 20, 0, 255]));
        assert_eq!(with_overlay.get_pixel(1, 0), &Rgba([0, 30, 0, 255]));

        let without_overlay = RenderKind::Face.composite(&skin, false, false);
        assert_eq!(without_overlay.get_pixel(0, 0), &Rgba([10, 0, 0, 255]));
        assert_eq!(without_overlay.get_pixel(1, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn portrait_has_fixed_dimensions_for_both_models() {
        let skin = blank_skin();

        let classic = RenderKind::Portrait.composite(&skin, false, true);
        let slim = RenderKind::Portrait.composite(&skin, true, true);
        assert_eq!(classic.dimensions(), (16, 20));
        assert_eq!(slim.dimensions(), (16, 20));
    }

    #[test]
    fn portrait_places_head_torso_and_arms() {
        let mut skin = blank_skin();
        skin.put_pixel(8, 8, Rgba([1, 0, 0, 255])); // head front corner
        skin.put_pixel(20, 20, Rgba([2, 0, 0, 255])); // torso front corner
        skin.put_pixel(44, 20, Rgba([3, 0, 0, 255])); // right arm front corner
        skin.put_pixel(36, 52, Rgba([4, 0, 0, 255])); // left arm front corner

        let out = RenderKind::Portrait.composite(&skin, false, false);
        assert_eq!(out.get_pixel(4, 0), &Rgba([1, 0, 0, 255]));
        assert_eq!(out.get_pixel(4, 8), &Rgba([2, 0, 0, 255]));
        assert_eq!(out.get_pixel(0, 8), &Rgba([3, 0, 0, 255]));
        assert_eq!(out.get_pixel(12, 8), &Rgba([4, 0, 0, 255]));
    }

    #[test]
    fn slim_portrait_leaves_the_outer_arm_columns_empty() {
        let mut skin = blank_skin();
        skin.put_pixel(44, 20, Rgba([3, 0, 0, 255]));

        let out = RenderKind::Portrait.composite(&skin, true, false);
        // 3-wide arm starts one column in
        assert_eq!(out.get_pixel(1, 8), &Rgba([3, 0, 0, 255]));
        assert_eq!(out.get_pixel(0, 8), &Rgba([0, 0, 0, 0]));
    }
}
