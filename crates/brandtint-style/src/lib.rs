#![forbid(unsafe_code)]

//! Brand-color palette derivation.
//!
//! # Role in brandtint
//! An operator picks one brand color; the product needs a dozen accent
//! colors for buttons, links, hover states and charts, in light and dark
//! themes. `brandtint-style` derives them by reusing the relationships the
//! default palette already has: each role's reference color deviates from a
//! reference base color in some per-channel way, and the same deviation is
//! applied to the brand color.
//!
//! # This crate provides
//! - [`color`]: hex and `rgb(...)` codec over [`Rgb`] triples.
//! - [`palette`]: the [`PaletteRegistry`] of reference bases and role targets.
//! - [`nearest`]: binding a brand color to its closest registry entry.
//! - [`deviation`]: the per-channel [`DeviationPattern`] transfer.
//! - [`resolver`]: [`Resolver`], which applies overrides and derivation per
//!   [`SemanticRole`].
//! - `config` (feature `serde`): JSON configuration documents.
//!
//! # How it fits in the system
//! The resolver is a pure function of a [`UserColorInput`] and the immutable
//! registry. It reads no environment and keeps no cache, so hosts build one
//! per request or share one across threads.

/// Hex and `rgb(...)` codec.
pub mod color;
/// JSON configuration documents.
#[cfg(feature = "serde")]
pub mod config;
/// Per-channel deviation transfer.
pub mod deviation;
/// Nearest registry entry selection.
pub mod nearest;
/// Reference palette registry and semantic roles.
pub mod palette;
/// Role resolution with overrides.
pub mod resolver;

pub use color::{ColorEncoding, ColorFormatError, Rgb, decode, encode_hex, encode_rgb};
#[cfg(feature = "serde")]
pub use config::{ColorConfig, ConfigError, parse_input};
pub use deviation::{Deviation, DeviationPattern, adjust};
pub use nearest::{DEFAULT_ENTRY, select_nearest, select_nearest_str};
pub use palette::{
    PaletteEntry, PaletteRegistry, RegistryError, SemanticRole, ThemeMode, UnknownRoleError,
};
pub use resolver::{
    ColorSource, IssueOrigin, ResolvedColor, ResolvedRole, Resolver, SlotIssue, UserColorInput,
    resolve,
};
