#![forbid(unsafe_code)]

//! Role resolution: from operator-supplied brand colors to the light and dark
//! color of every [`SemanticRole`].
//!
//! # Rules
//!
//! 1. Without a light brand color nothing resolves; every slot of every role
//!    is absent, overrides included.
//! 2. The dark slot exists only for roles the registry gives a dark target.
//! 3. An override for the slot is used as-is. On the dark slot a
//!    dark-only override is consulted before the shared one.
//! 4. Otherwise the slot's brand color is decoded, bound to its nearest
//!    registry entry, and the entry's base → target deviation is applied.
//!
//! Format errors never abort resolution. A bad override or brand color is
//! reported and leaves only that slot absent. Each call is independent.
//!
//! # Example
//!
//! ```
//! use brandtint_style::{Resolver, SemanticRole, UserColorInput};
//!
//! let resolver = Resolver::new(UserColorInput::new().light("#3182CE"));
//! let link = resolver.resolve(SemanticRole::BasicLink);
//! assert_eq!(link.css_light().as_deref(), Some("rgb(43, 108, 176)"));
//! assert_eq!(link.css_dark(), None);
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::color::{ColorEncoding, ColorFormatError, Rgb, decode};
use crate::deviation::adjust;
use crate::nearest::select_nearest;
use crate::palette::{PaletteRegistry, SemanticRole, ThemeMode, UnknownRoleError};

/// Brand colors and overrides supplied by the hosting application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserColorInput {
    /// Brand color for the light theme. Required for any output.
    pub light: Option<String>,
    /// Brand color for the dark theme.
    pub dark: Option<String>,
    /// Overrides applied to both theme slots of a role.
    pub overrides: BTreeMap<SemanticRole, String>,
    /// Overrides applied to the dark slot only; these win over `overrides`.
    pub dark_overrides: BTreeMap<SemanticRole, String>,
}

impl UserColorInput {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn light(mut self, color: impl Into<String>) -> Self {
        self.light = Some(color.into());
        self
    }

    #[must_use]
    pub fn dark(mut self, color: impl Into<String>) -> Self {
        self.dark = Some(color.into());
        self
    }

    /// Override both slots of `role`.
    #[must_use]
    pub fn override_role(mut self, role: SemanticRole, color: impl Into<String>) -> Self {
        self.overrides.insert(role, color.into());
        self
    }

    /// Override the dark slot of `role`.
    #[must_use]
    pub fn override_dark(mut self, role: SemanticRole, color: impl Into<String>) -> Self {
        self.dark_overrides.insert(role, color.into());
        self
    }

    /// Brand color for `mode`, ignoring blank strings.
    pub fn brand(&self, mode: ThemeMode) -> Option<&str> {
        let raw = match mode {
            ThemeMode::Light => self.light.as_deref(),
            ThemeMode::Dark => self.dark.as_deref(),
        };
        non_blank(raw)
    }

    /// Override in effect for `role` in `mode`, ignoring blank strings.
    pub fn override_for(&self, role: SemanticRole, mode: ThemeMode) -> Option<&str> {
        let shared = non_blank(self.overrides.get(&role).map(String::as_str));
        match mode {
            ThemeMode::Light => shared,
            ThemeMode::Dark => {
                non_blank(self.dark_overrides.get(&role).map(String::as_str)).or(shared)
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Where a resolved color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// An explicit override.
    Override,
    /// Derived from the brand color through the registry entry at `entry`.
    Derived { entry: usize },
}

/// A color filling one theme slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColor {
    pub color: Rgb,
    pub source: ColorSource,
}

impl ResolvedColor {
    pub fn encode(&self, encoding: ColorEncoding) -> String {
        self.color.encode(encoding)
    }
}

/// Which input a format error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOrigin {
    BrandColor,
    Override,
}

/// A format error encountered while filling a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotIssue {
    pub mode: ThemeMode,
    pub origin: IssueOrigin,
    pub error: ColorFormatError,
}

/// Light and dark colors for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub role: SemanticRole,
    pub light: Option<ResolvedColor>,
    pub dark: Option<ResolvedColor>,
    pub issues: Vec<SlotIssue>,
}

impl ResolvedRole {
    fn absent(role: SemanticRole) -> Self {
        Self {
            role,
            light: None,
            dark: None,
            issues: Vec::new(),
        }
    }

    pub fn slot(&self, mode: ThemeMode) -> Option<&ResolvedColor> {
        match mode {
            ThemeMode::Light => self.light.as_ref(),
            ThemeMode::Dark => self.dark.as_ref(),
        }
    }

    /// Slot color in an explicit encoding.
    pub fn encoded(&self, mode: ThemeMode, encoding: ColorEncoding) -> Option<String> {
        self.slot(mode).map(|c| c.encode(encoding))
    }

    /// Light color in the encoding the role's consumer expects.
    pub fn css_light(&self) -> Option<String> {
        self.encoded(ThemeMode::Light, self.role.output_encoding())
    }

    /// Dark color in the encoding the role's consumer expects.
    pub fn css_dark(&self) -> Option<String> {
        self.encoded(ThemeMode::Dark, self.role.output_encoding())
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Resolves roles against a registry for one fixed input.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    registry: &'a PaletteRegistry,
    input: UserColorInput,
}

impl Resolver<'static> {
    /// Resolver over the built-in registry.
    pub fn new(input: UserColorInput) -> Self {
        Self::with_registry(PaletteRegistry::builtin(), input)
    }
}

impl<'a> Resolver<'a> {
    pub fn with_registry(registry: &'a PaletteRegistry, input: UserColorInput) -> Self {
        Self { registry, input }
    }

    pub fn registry(&self) -> &'a PaletteRegistry {
        self.registry
    }

    pub fn input(&self) -> &UserColorInput {
        &self.input
    }

    pub fn resolve(&self, role: SemanticRole) -> ResolvedRole {
        let mut resolved = ResolvedRole::absent(role);
        if self.input.brand(ThemeMode::Light).is_none() {
            return resolved;
        }

        resolved.light = self.resolve_slot(role, ThemeMode::Light, &mut resolved.issues);
        if self.registry.has_dark_target(role) {
            resolved.dark = self.resolve_slot(role, ThemeMode::Dark, &mut resolved.issues);
        }
        resolved
    }

    /// Resolve a role by name; unknown names resolve nothing.
    pub fn resolve_named(&self, name: &str) -> Result<ResolvedRole, UnknownRoleError> {
        let role = SemanticRole::from_name(name)?;
        Ok(self.resolve(role))
    }

    /// Resolve every role, in [`SemanticRole::ALL`] order.
    pub fn resolve_all(&self) -> Vec<ResolvedRole> {
        SemanticRole::ALL
            .into_iter()
            .map(|role| self.resolve(role))
            .collect()
    }

    fn resolve_slot(
        &self,
        role: SemanticRole,
        mode: ThemeMode,
        issues: &mut Vec<SlotIssue>,
    ) -> Option<ResolvedColor> {
        if let Some(raw) = self.input.override_for(role, mode) {
            match decode(raw) {
                Ok(color) => {
                    debug!(%role, %mode, %color, "using override");
                    return Some(ResolvedColor {
                        color,
                        source: ColorSource::Override,
                    });
                }
                Err(error) => {
                    warn!(%role, %mode, %error, "malformed override, slot left empty");
                    issues.push(SlotIssue {
                        mode,
                        origin: IssueOrigin::Override,
                        error,
                    });
                    return None;
                }
            }
        }

        let raw = self.input.brand(mode)?;
        let custom = match decode(raw) {
            Ok(color) => color,
            Err(error) => {
                warn!(%role, %mode, %error, "malformed brand color, slot left empty");
                issues.push(SlotIssue {
                    mode,
                    origin: IssueOrigin::BrandColor,
                    error,
                });
                return None;
            }
        };

        let index = select_nearest(self.registry, Some(custom));
        let entry = self.registry.entry(index);
        let target = entry.target(role, mode)?;
        let color = adjust(custom, target, entry.base());
        debug!(%role, %mode, entry = entry.name(), %color, "derived color");
        Some(ResolvedColor {
            color,
            source: ColorSource::Derived { entry: index },
        })
    }
}

/// Resolve `role` for `input` against the built-in registry.
pub fn resolve(role: SemanticRole, input: &UserColorInput) -> ResolvedRole {
    Resolver::new(input.clone()).resolve(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteEntry;

    fn brand() -> UserColorInput {
        UserColorInput::new().light("#3182CE").dark("#3182CE")
    }

    #[test]
    fn brand_equal_to_base_reproduces_reference_targets() {
        let resolver = Resolver::new(brand());
        let link = resolver.resolve(SemanticRole::BasicLink);
        assert_eq!(link.css_light().as_deref(), Some("rgb(43, 108, 176)"));
        assert_eq!(
            link.light.map(|c| c.source),
            Some(ColorSource::Derived { entry: 0 })
        );

        let panel = resolver.resolve(SemanticRole::PanelButton);
        assert_eq!(panel.css_light().as_deref(), Some("rgb(235, 248, 255)"));
        assert_eq!(panel.css_dark().as_deref(), Some("rgb(42, 67, 101)"));

        let hover = resolver.resolve(SemanticRole::BasicHover);
        assert_eq!(hover.css_light().as_deref(), Some("rgb(66, 153, 225)"));
    }

    #[test]
    fn area_fill_is_rendered_as_hex() {
        let area = Resolver::new(brand()).resolve(SemanticRole::DailyTxsArea);
        assert_eq!(area.css_light().as_deref(), Some("#3182ce"));
        assert_eq!(
            area.encoded(ThemeMode::Light, ColorEncoding::Rgb).as_deref(),
            Some("rgb(49, 130, 206)")
        );
    }

    #[test]
    fn out_of_range_area_override_still_renders_valid_hex() {
        let input = brand().override_role(SemanticRole::DailyTxsArea, "rgb(999, 0, 0)");
        let area = Resolver::new(input).resolve(SemanticRole::DailyTxsArea);
        assert_eq!(area.css_light().as_deref(), Some("#ff0000"));
    }

    #[test]
    fn missing_light_brand_leaves_everything_absent() {
        let input = UserColorInput::new()
            .dark("#3182CE")
            .override_role(SemanticRole::BasicLink, "#ff0000")
            .override_dark(SemanticRole::PanelButton, "#00ff00");
        for resolved in Resolver::new(input).resolve_all() {
            assert_eq!(resolved.light, None, "{}", resolved.role);
            assert_eq!(resolved.dark, None, "{}", resolved.role);
            assert!(!resolved.has_issues());
        }
    }

    #[test]
    fn blank_light_brand_counts_as_missing() {
        let resolved =
            Resolver::new(UserColorInput::new().light("  ")).resolve(SemanticRole::BasicLink);
        assert_eq!(resolved.light, None);
    }

    #[test]
    fn roles_without_dark_target_have_no_dark_slot() {
        let input = brand().override_role(SemanticRole::BasicLink, "#010203");
        let link = Resolver::new(input).resolve(SemanticRole::BasicLink);
        assert_eq!(link.dark, None);
        assert_eq!(link.light.map(|c| c.color), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn missing_dark_brand_leaves_dark_slot_absent() {
        let panel = Resolver::new(UserColorInput::new().light("#3182CE"))
            .resolve(SemanticRole::PanelButton);
        assert!(panel.light.is_some());
        assert_eq!(panel.dark, None);
    }

    #[test]
    fn override_wins_over_derivation() {
        let input = brand().override_role(SemanticRole::BasicLink, "#ABCDEF");
        let link = Resolver::new(input).resolve(SemanticRole::BasicLink);
        assert_eq!(link.css_light().as_deref(), Some("rgb(171, 205, 239)"));
        assert_eq!(link.light.map(|c| c.source), Some(ColorSource::Override));
    }

    #[test]
    fn shared_override_fills_both_slots_and_dark_override_wins() {
        let shared = brand().override_role(SemanticRole::PanelButton, "rgb(1,2,3)");
        let panel = Resolver::new(shared.clone()).resolve(SemanticRole::PanelButton);
        assert_eq!(panel.css_light().as_deref(), Some("rgb(1, 2, 3)"));
        assert_eq!(panel.css_dark().as_deref(), Some("rgb(1, 2, 3)"));

        let split = shared.override_dark(SemanticRole::PanelButton, "#040506");
        let panel = Resolver::new(split).resolve(SemanticRole::PanelButton);
        assert_eq!(panel.css_light().as_deref(), Some("rgb(1, 2, 3)"));
        assert_eq!(panel.css_dark().as_deref(), Some("rgb(4, 5, 6)"));
    }

    #[test]
    fn malformed_override_leaves_slot_empty() {
        let input = brand().override_role(SemanticRole::BasicLink, "not-a-color");
        let link = Resolver::new(input).resolve(SemanticRole::BasicLink);
        assert_eq!(link.light, None);
        assert_eq!(link.issues.len(), 1);
        assert_eq!(link.issues[0].origin, IssueOrigin::Override);
        assert_eq!(link.issues[0].error.input(), "not-a-color");
    }

    #[test]
    fn malformed_brand_drops_only_that_slot() {
        let input = UserColorInput::new().light("#3182CE").dark("oops");
        let panel = Resolver::new(input.clone()).resolve(SemanticRole::PanelButton);
        assert!(panel.light.is_some());
        assert_eq!(panel.dark, None);
        assert_eq!(
            panel.issues,
            vec![SlotIssue {
                mode: ThemeMode::Dark,
                origin: IssueOrigin::BrandColor,
                error: ColorFormatError::new("oops"),
            }]
        );

        let link = Resolver::new(input).resolve(SemanticRole::BasicLink);
        assert!(link.light.is_some());
        assert!(!link.has_issues());
    }

    #[test]
    fn overrides_still_apply_when_the_brand_is_malformed() {
        let input = UserColorInput::new()
            .light("#31")
            .override_role(SemanticRole::BasicHover, "#000");
        let resolver = Resolver::new(input);
        let hover = resolver.resolve(SemanticRole::BasicHover);
        assert_eq!(hover.light.map(|c| c.color), Some(Rgb::BLACK));
        let link = resolver.resolve(SemanticRole::BasicLink);
        assert_eq!(link.light, None);
        assert_eq!(link.issues[0].origin, IssueOrigin::BrandColor);
    }

    #[test]
    fn light_and_dark_bind_to_entries_independently() {
        let input = UserColorInput::new().light("#3182CE").dark("#805AD5");
        let panel = Resolver::new(input).resolve(SemanticRole::PanelButton);
        assert_eq!(
            panel.light.map(|c| c.source),
            Some(ColorSource::Derived { entry: 0 })
        );
        assert_eq!(
            panel.dark.map(|c| c.source),
            Some(ColorSource::Derived { entry: 1 })
        );
        assert_eq!(panel.css_dark().as_deref(), Some("rgb(50, 38, 89)"));
    }

    #[test]
    fn unknown_role_name_is_rejected() {
        let err = Resolver::new(brand()).resolve_named("navBar").unwrap_err();
        assert_eq!(err.name, "navBar");
        let ok = Resolver::new(brand()).resolve_named("panelBtn").unwrap();
        assert_eq!(ok.role, SemanticRole::PanelButton);
    }

    #[test]
    fn resolve_all_covers_every_role_in_order() {
        let roles: Vec<SemanticRole> = Resolver::new(brand())
            .resolve_all()
            .into_iter()
            .map(|r| r.role)
            .collect();
        assert_eq!(roles, SemanticRole::ALL.to_vec());
    }

    #[test]
    fn custom_registry_drives_derivation() {
        let registry = PaletteRegistry::new(vec![PaletteEntry::new(
            "gray",
            Rgb::new(100, 100, 100),
            [Rgb::new(50, 50, 50); SemanticRole::COUNT],
        )])
        .unwrap();
        let resolver =
            Resolver::with_registry(&registry, UserColorInput::new().light("rgb(200, 20, 0)"));
        let link = resolver.resolve(SemanticRole::BasicLink);
        assert_eq!(link.light.map(|c| c.color), Some(Rgb::new(100, 10, 0)));
        // No entry has a dark target, so no dark slot even with an override.
        let input = UserColorInput::new()
            .light("#000")
            .override_role(SemanticRole::PanelButton, "#fff");
        let panel = Resolver::with_registry(&registry, input).resolve(SemanticRole::PanelButton);
        assert_eq!(panel.dark, None);
    }

    #[test]
    fn free_function_uses_builtin_registry() {
        let link = resolve(SemanticRole::BasicLink, &brand());
        assert_eq!(link.css_light().as_deref(), Some("rgb(43, 108, 176)"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn format_errors_are_logged_as_warnings() {
        let input = brand().override_role(SemanticRole::BasicHover, "rgb(1, 2)");
        let _ = Resolver::new(input).resolve(SemanticRole::BasicHover);
        assert!(logs_contain("malformed override, slot left empty"));
        assert!(logs_contain("rgb(1, 2)"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn derivation_logs_the_selected_entry() {
        let input = UserColorInput::new().light("#319795");
        let _ = Resolver::new(input).resolve(SemanticRole::BasicLink);
        assert!(logs_contain("selected nearest palette entry"));
        assert!(logs_contain("teal"));
    }

    #[test]
    fn resolver_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver<'static>>();
    }
}
