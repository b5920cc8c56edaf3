#![forbid(unsafe_code)]

//! Reference palette registry.
//!
//! Each [`PaletteEntry`] is anchored on a base color and lists, for every
//! [`SemanticRole`], the reference color the product uses for that role when
//! the brand color *is* the base. Some roles also carry a dark-theme target.
//! The built-in registry is hand-curated data; it is built once per process
//! and never mutated.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;

use crate::color::{ColorEncoding, Rgb};

/// UI slots whose colors are derived from the brand color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SemanticRole {
    /// Background of panel buttons.
    PanelButton,
    /// Link text.
    BasicLink,
    /// Stroke of the daily transactions chart.
    DailyTxsLine,
    /// Fill under the daily transactions chart.
    DailyTxsArea,
    /// Link text on hover.
    BasicHover,
}

impl SemanticRole {
    pub const ALL: [SemanticRole; 5] = [
        SemanticRole::PanelButton,
        SemanticRole::BasicLink,
        SemanticRole::DailyTxsLine,
        SemanticRole::DailyTxsArea,
        SemanticRole::BasicHover,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const fn index(self) -> usize {
        match self {
            Self::PanelButton => 0,
            Self::BasicLink => 1,
            Self::DailyTxsLine => 2,
            Self::DailyTxsArea => 3,
            Self::BasicHover => 4,
        }
    }

    /// Canonical camelCase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PanelButton => "panelButton",
            Self::BasicLink => "basicLink",
            Self::DailyTxsLine => "dailyTxsLine",
            Self::DailyTxsArea => "dailyTxsArea",
            Self::BasicHover => "basicHover",
        }
    }

    /// Encoding the consuming UI component expects.
    ///
    /// The chart area fill is handed to a gradient component that only
    /// understands hex; every other consumer takes `rgb(...)`.
    pub const fn output_encoding(self) -> ColorEncoding {
        match self {
            Self::DailyTxsArea => ColorEncoding::Hex,
            _ => ColorEncoding::Rgb,
        }
    }

    /// Parse a role name, accepting the legacy short names too.
    pub fn from_name(name: &str) -> Result<Self, UnknownRoleError> {
        match name {
            "panelButton" | "panelBtn" => Ok(Self::PanelButton),
            "basicLink" => Ok(Self::BasicLink),
            "dailyTxsLine" | "dailyTxs" => Ok(Self::DailyTxsLine),
            "dailyTxsArea" | "dailyTxs_area" => Ok(Self::DailyTxsArea),
            "basicHover" => Ok(Self::BasicHover),
            _ => Err(UnknownRoleError {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SemanticRole {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// A role name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color role `{name}`")]
pub struct UnknownRoleError {
    pub name: String,
}

/// Light or dark theme slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reference base color and its role targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    name: String,
    base: Rgb,
    light: [Rgb; SemanticRole::COUNT],
    dark: [Option<Rgb>; SemanticRole::COUNT],
}

impl PaletteEntry {
    /// Create an entry whose light targets are given in [`SemanticRole::ALL`]
    /// order. No role has a dark target until [`with_dark`](Self::with_dark).
    pub fn new(name: impl Into<String>, base: Rgb, light: [Rgb; SemanticRole::COUNT]) -> Self {
        Self {
            name: name.into(),
            base,
            light,
            dark: [None; SemanticRole::COUNT],
        }
    }

    /// Register a dark-theme target for `role`.
    #[must_use]
    pub fn with_dark(mut self, role: SemanticRole, target: Rgb) -> Self {
        self.dark[role.index()] = Some(target);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The anchor color the targets were designed against.
    pub fn base(&self) -> Rgb {
        self.base
    }

    pub fn light_target(&self, role: SemanticRole) -> Rgb {
        self.light[role.index()]
    }

    pub fn dark_target(&self, role: SemanticRole) -> Option<Rgb> {
        self.dark[role.index()]
    }

    /// Target for `role` in `mode`; `None` when the role has no dark target.
    pub fn target(&self, role: SemanticRole, mode: ThemeMode) -> Option<Rgb> {
        match mode {
            ThemeMode::Light => Some(self.light_target(role)),
            ThemeMode::Dark => self.dark_target(role),
        }
    }
}

/// Registry construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("palette registry must contain at least one entry")]
    Empty,
}

/// Ordered, non-empty, immutable list of palette entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRegistry {
    entries: Vec<PaletteEntry>,
}

static BUILTIN: OnceLock<PaletteRegistry> = OnceLock::new();

impl PaletteRegistry {
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, RegistryError> {
        if entries.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { entries })
    }

    /// The product's curated registry, shared by every caller.
    pub fn builtin() -> &'static PaletteRegistry {
        BUILTIN.get_or_init(|| Self {
            entries: builtin_entries(),
        })
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// Entry at `index`, falling back to the first entry when out of range.
    pub fn entry(&self, index: usize) -> &PaletteEntry {
        self.entries.get(index).unwrap_or(&self.entries[0])
    }

    pub fn find(&self, name: &str) -> Option<(usize, &PaletteEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.name == name)
    }

    /// Whether any entry registers a dark target for `role`.
    pub fn has_dark_target(&self, role: SemanticRole) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.dark_target(role).is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn hex(value: u32) -> Rgb {
    Rgb::new(
        ((value >> 16) & 0xff) as u16,
        ((value >> 8) & 0xff) as u16,
        (value & 0xff) as u16,
    )
}

fn builtin_entries() -> Vec<PaletteEntry> {
    vec![
        PaletteEntry::new(
            "blue",
            hex(0x3182CE),
            [
                hex(0xEBF8FF),
                hex(0x2B6CB0),
                hex(0x3182CE),
                hex(0x3182CE),
                hex(0x4299E1),
            ],
        )
        .with_dark(SemanticRole::PanelButton, hex(0x2A4365)),
        PaletteEntry::new(
            "purple",
            hex(0x805AD5),
            [
                hex(0xFAF5FF),
                hex(0x6B46C1),
                hex(0x805AD5),
                hex(0x805AD5),
                hex(0x9F7AEA),
            ],
        )
        .with_dark(SemanticRole::PanelButton, hex(0x322659)),
        PaletteEntry::new(
            "teal",
            hex(0x319795),
            [
                hex(0xE6FFFA),
                hex(0x2C7A7B),
                hex(0x319795),
                hex(0x319795),
                hex(0x38B2AC),
            ],
        )
        .with_dark(SemanticRole::PanelButton, hex(0x1D4044)),
    ]
}
