#![forbid(unsafe_code)]

//! Deviation transfer.
//!
//! A registry pairs a base color with a role target, e.g. a link color a
//! little darker than the brand blue. [`DeviationPattern`] captures, per
//! channel, how far the target moved from the base as a signed fraction of
//! the available headroom, then reproduces that same movement from any other
//! color.
//!
//! For a channel with base `b` and target `t`:
//!
//! | case | ratio |
//! |---|---|
//! | `t == b` | `0` |
//! | `t <= 0` | `-1` |
//! | `t >= 255` | `+1` |
//! | `b < t` | `(t - b) / (255 - b)` |
//! | otherwise | `(t - b) / b` |
//!
//! Applying a ratio to channel `c` yields `0` for `-1`, `c` for `0`, `255`
//! for `+1`, `c * (1 + ratio)` when darkening and `c + (255 - c) * ratio`
//! when lightening, floored.
//!
//! Ratios are kept as exact fractions so that flooring sees the true value:
//! applying the blue-to-link pattern to blue itself gives back the link
//! color exactly, where a float evaluation of `130 * (1 - 22/130)` floors to
//! `107` instead of `108`.

use crate::color::Rgb;

const MAX: i64 = 255;

/// Movement of one channel from a base value to a target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deviation {
    /// Base and target agree.
    Unchanged,
    /// Target is fully dark; always maps to `0`.
    ToBlack,
    /// Target is fully bright; always maps to `255`.
    ToWhite,
    /// Ratio `delta / base`, in `(-1, 0)`.
    Darken { delta: i64, base: i64 },
    /// Ratio `delta / (255 - base)`, in `(0, 1)`.
    Lighten { delta: i64, headroom: i64 },
}

impl Deviation {
    /// Classify the movement from `base` to `target`.
    pub fn between(base: u16, target: u16) -> Self {
        let (b, t) = (i64::from(base), i64::from(target));
        if b == t {
            Self::Unchanged
        } else if t <= 0 {
            Self::ToBlack
        } else if t >= MAX {
            Self::ToWhite
        } else if b < t {
            Self::Lighten {
                delta: t - b,
                headroom: MAX - b,
            }
        } else {
            Self::Darken { delta: t - b, base: b }
        }
    }

    /// Signed ratio in `[-1, 1]`.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Unchanged => 0.0,
            Self::ToBlack => -1.0,
            Self::ToWhite => 1.0,
            Self::Darken { delta, base } => delta as f64 / base as f64,
            Self::Lighten { delta, headroom } => delta as f64 / headroom as f64,
        }
    }

    /// Apply the movement to `custom`, flooring the result.
    pub fn apply(self, custom: u16) -> u16 {
        let c = i64::from(custom);
        let adjusted = match self {
            Self::Unchanged => c,
            Self::ToBlack => 0,
            Self::ToWhite => MAX,
            // c * (1 + delta / base)
            Self::Darken { delta, base } => (c * (base + delta)).div_euclid(base),
            // c + (255 - c) * delta / headroom
            Self::Lighten { delta, headroom } => {
                (c * headroom + (MAX - c) * delta).div_euclid(headroom)
            }
        };
        // Both arms stay within [0, max(custom, 255)].
        u16::try_from(adjusted.max(0)).unwrap_or(u16::MAX)
    }
}

/// Per-channel deviations from a base color to a target color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviationPattern {
    channels: [Deviation; 3],
}

impl DeviationPattern {
    pub fn between(base: Rgb, target: Rgb) -> Self {
        let [br, bg, bb] = base.channels();
        let [tr, tg, tb] = target.channels();
        Self {
            channels: [
                Deviation::between(br, tr),
                Deviation::between(bg, tg),
                Deviation::between(bb, tb),
            ],
        }
    }

    pub fn channels(&self) -> [Deviation; 3] {
        self.channels
    }

    pub fn ratios(&self) -> [f64; 3] {
        self.channels.map(Deviation::ratio)
    }

    /// `true` when every channel is [`Deviation::Unchanged`].
    pub fn is_identity(&self) -> bool {
        self.channels.iter().all(|d| *d == Deviation::Unchanged)
    }

    pub fn apply(&self, custom: Rgb) -> Rgb {
        let [r, g, b] = custom.channels();
        let [dr, dg, db] = self.channels;
        Rgb::new(dr.apply(r), dg.apply(g), db.apply(b))
    }
}

/// Move `custom` the way `base` moves to `target`.
pub fn adjust(custom: Rgb, target: Rgb, base: Rgb) -> Rgb {
    DeviationPattern::between(base, target).apply(custom)
}
