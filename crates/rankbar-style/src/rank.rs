#![forbid(unsafe_code)]

//! Rank badge colors.

use rankbar_render::Rgba;

/// Badge colors for ranks 1, 2 and 3.
pub const PODIUM: [Rgba; 3] = [
    Rgba::rgb(0xe7, 0x4c, 0x3c),
    Rgba::rgb(0xff, 0xa6, 0x00),
    Rgba::rgb(0xff, 0xd7, 0x00),
];

/// Badge color for every rank below the podium.
pub const DEFAULT_RANK: Rgba = Rgba::rgb(0xca, 0xca, 0xca);

/// Badge color for a 1-based rank.
#[inline]
pub fn rank_color(rank: usize) -> Rgba {
    rank.checked_sub(1)
        .and_then(|i| PODIUM.get(i))
        .copied()
        .unwrap_or(DEFAULT_RANK)
}
