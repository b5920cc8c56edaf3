#![forbid(unsafe_code)]

//! Nearest-base selection: bind a brand color to the registry entry whose
//! base it most resembles.

use tracing::debug;

use crate::color::{ColorFormatError, Rgb, decode};
use crate::palette::PaletteRegistry;

/// Index used when no input color is supplied.
pub const DEFAULT_ENTRY: usize = 0;

/// Index of the entry whose base is closest to `input` in RGB space.
///
/// Ties go to the lower index: a later entry only wins on a strictly smaller
/// distance.
pub fn select_nearest(registry: &PaletteRegistry, input: Option<Rgb>) -> usize {
    let Some(color) = input else {
        return DEFAULT_ENTRY;
    };

    let mut best = DEFAULT_ENTRY;
    let mut best_distance = u32::MAX;
    for (index, entry) in registry.entries().iter().enumerate() {
        let distance = color.distance_squared(entry.base());
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }

    debug!(
        input = %color,
        entry = registry.entry(best).name(),
        index = best,
        distance_squared = best_distance,
        "selected nearest palette entry"
    );
    best
}

/// Decode `input` and select its nearest entry.
pub fn select_nearest_str(
    registry: &PaletteRegistry,
    input: Option<&str>,
) -> Result<usize, ColorFormatError> {
    let color = input.map(decode).transpose()?;
    Ok(select_nearest(registry, color))
}
