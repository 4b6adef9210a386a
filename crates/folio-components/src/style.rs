//! Shared style constants.

/// Line height of the site's typography theme, in rem.
pub const BASE_LINE_HEIGHT: f64 = 1.75;

/// Edge length of the avatar image, in pixels.
pub const AVATAR_SIZE: u32 = 50;

/// Gap below the profile card, in rhythm units.
pub const CARD_MARGIN_BOTTOM: f64 = 2.5;

/// Gap between the avatar and the text, in rhythm units.
pub const AVATAR_MARGIN_RIGHT: f64 = 0.5;

/// Vertical rhythm: `lines` baseline heights as a CSS length.
pub fn rhythm(lines: f64) -> String {
    format!("{}rem", lines * BASE_LINE_HEIGHT)
}
