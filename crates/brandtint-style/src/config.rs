#![forbid(unsafe_code)]

//! JSON color configuration documents.
//!
//! Deployments hand the brand colors over as one JSON object, typically
//! through an environment variable:
//!
//! ```json
//! {
//!   "brightThemeColor": "#3182CE",
//!   "darkThemeColor": "rgb(66, 153, 225)",
//!   "textColor": "#2B6CB0"
//! }
//! ```
//!
//! Shells make double quotes awkward, so single quotes are accepted and
//! rewritten before parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::SemanticRole;
use crate::resolver::UserColorInput;

/// A configuration document that is not valid JSON for [`ColorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw configuration fields, named as deployments spell them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorConfig {
    pub bright_theme_color: Option<String>,
    #[serde(alias = "darkTheneColor")]
    pub dark_theme_color: Option<String>,
    pub button_color: Option<String>,
    pub dark_button_color: Option<String>,
    pub text_color: Option<String>,
    pub text_hover_color: Option<String>,
    pub line_of_curve_graph_color: Option<String>,
    pub shadow_of_curve_graph_color: Option<String>,
}

impl ColorConfig {
    /// Parse a document. Blank input and `null` yield an empty config.
    pub fn parse(document: &str) -> Result<Self, ConfigError> {
        let normalized = normalize_quotes(document);
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<Self> = serde_json::from_str(trimmed)?;
        Ok(parsed.unwrap_or_default())
    }

    /// Convert to resolver input.
    ///
    /// Empty strings count as absent. A missing dark brand color falls back
    /// to the light one.
    pub fn into_input(self) -> UserColorInput {
        let light = present(self.bright_theme_color);
        let dark = present(self.dark_theme_color).or_else(|| light.clone());

        let mut input = UserColorInput {
            light,
            dark,
            ..UserColorInput::default()
        };
        let shared = [
            (SemanticRole::PanelButton, self.button_color),
            (SemanticRole::BasicLink, self.text_color),
            (SemanticRole::BasicHover, self.text_hover_color),
            (SemanticRole::DailyTxsLine, self.line_of_curve_graph_color),
            (SemanticRole::DailyTxsArea, self.shadow_of_curve_graph_color),
        ];
        for (role, value) in shared {
            if let Some(color) = present(value) {
                input.overrides.insert(role, color);
            }
        }
        if let Some(color) = present(self.dark_button_color) {
            input.dark_overrides.insert(SemanticRole::PanelButton, color);
        }
        input
    }
}

/// Parse a document straight into resolver input.
pub fn parse_input(document: Option<&str>) -> Result<UserColorInput, ConfigError> {
    match document {
        Some(doc) => Ok(ColorConfig::parse(doc)?.into_input()),
        None => Ok(UserColorInput::default()),
    }
}

fn normalize_quotes(document: &str) -> String {
    document.replace('\'', "\"")
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
