//! Fixed colors for frame elements the frontend draws itself

use crate::sim::Rgb;

/// Colors for game elements
pub mod colors {
    use crate::sim::Rgb;

    pub const SHIELD_P1: Rgb = [0, 255, 255];
    pub const SHIELD_P2: Rgb = [255, 0, 0];
    pub const MAGNET_RING: Rgb = [128, 0, 128];
    pub const HUD_TEXT: Rgb = [255, 255, 255];
    pub const HUD_SHADOW: Rgb = [0, 0, 0];
    pub const BUTTON: Rgb = [0, 128, 255];
    pub const DRAW: Rgb = [255, 255, 255];
}

/// Bucket tint per player
pub fn player_tint(player_id: u8) -> Rgb {
    if player_id == 1 {
        crate::sim::colors::P1
    } else {
        crate::sim::colors::P2
    }
}

/// Ring drawn around a shielded catcher (the other player's tint)
pub fn shield_ring(player_id: u8) -> Rgb {
    if player_id == 1 {
        colors::SHIELD_P1
    } else {
        colors::SHIELD_P2
    }
}
