use std::fmt::Write as _;
use std::path::PathBuf;

use brandtint_style::{
    ColorEncoding, ColorSource, IssueOrigin, ResolvedRole, Resolver, SemanticRole, ThemeMode,
    parse_input,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CliError, Result};
use crate::util::{config_from_env, or_absent, read_config_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Path to a JSON color configuration file.
    #[arg(long, conflicts_with = "json")]
    pub config: Option<PathBuf>,

    /// Inline JSON color configuration.
    #[arg(long)]
    pub json: Option<String>,

    /// Resolve a single role instead of all of them.
    #[arg(long)]
    pub role: Option<String>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

#[derive(Debug, Serialize)]
struct SlotReport {
    color: String,
    source: String,
}

#[derive(Debug, Serialize)]
struct RoleReport {
    role: SemanticRole,
    encoding: ColorEncoding,
    light: Option<SlotReport>,
    dark: Option<SlotReport>,
    issues: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Report {
    status: &'static str,
    roles: Vec<RoleReport>,
}

/// Configuration document selected by the arguments, then the environment.
pub fn load_document(args: &ResolveArgs, env: Option<String>) -> Result<Option<String>> {
    if let Some(path) = &args.config {
        return read_config_file(path).map(Some);
    }
    if let Some(json) = &args.json {
        return Ok(Some(json.clone()));
    }
    Ok(env)
}

pub fn resolve_roles(document: Option<&str>, role: Option<&str>) -> Result<Vec<ResolvedRole>> {
    let input = parse_input(document)?;
    if input.light.is_none() {
        info!("no brightThemeColor configured; every role resolves empty");
    }
    let resolver = Resolver::new(input);
    let resolved = match role {
        Some(name) => vec![resolver.resolve_named(name)?],
        None => resolver.resolve_all(),
    };
    for role in &resolved {
        for issue in &role.issues {
            warn!(
                role = %role.role,
                mode = %issue.mode,
                error = %issue.error,
                "color format issue"
            );
        }
    }
    Ok(resolved)
}

fn source_label(source: ColorSource, entry_names: &[&str]) -> String {
    match source {
        ColorSource::Override => "override".to_string(),
        ColorSource::Derived { entry } => format!(
            "derived:{}",
            entry_names.get(entry).copied().unwrap_or("?")
        ),
    }
}

fn issue_label(role: &ResolvedRole) -> Vec<String> {
    role.issues
        .iter()
        .map(|issue| {
            let origin = match issue.origin {
                IssueOrigin::BrandColor => "brand color",
                IssueOrigin::Override => "override",
            };
            format!("{} {origin}: {}", issue.mode, issue.error)
        })
        .collect()
}

pub fn render_report(resolved: &[ResolvedRole], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(resolved)),
        ReportFormat::Json => render_json(resolved),
    }
}

fn render_text(resolved: &[ResolvedRole]) -> String {
    let mut out = String::new();
    for role in resolved {
        let light = role.css_light();
        let dark = role.css_dark();
        let _ = writeln!(
            out,
            "{:<14} {:<20} {}",
            role.role.name(),
            or_absent(light.as_deref()),
            or_absent(dark.as_deref())
        );
    }
    out
}

fn render_json(resolved: &[ResolvedRole]) -> Result<String> {
    let names: Vec<&str> = brandtint_style::PaletteRegistry::builtin()
        .entries()
        .iter()
        .map(|entry| entry.name())
        .collect();
    let slot = |role: &ResolvedRole, mode: ThemeMode| {
        role.slot(mode).map(|color| SlotReport {
            color: color.encode(role.role.output_encoding()),
            source: source_label(color.source, &names),
        })
    };
    let report = Report {
        status: "ok",
        roles: resolved
            .iter()
            .map(|role| RoleReport {
                role: role.role,
                encoding: role.role.output_encoding(),
                light: slot(role, ThemeMode::Light),
                dark: slot(role, ThemeMode::Dark),
                issues: issue_label(role),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn run_resolve(args: ResolveArgs) -> Result<()> {
    if args.config.is_some() && args.json.is_some() {
        return Err(CliError::invalid("--config and --json are mutually exclusive"));
    }
    let document = load_document(&args, config_from_env())?;
    let resolved = resolve_roles(document.as_deref(), args.role.as_deref())?;
    print!("{}", render_report(&resolved, args.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn args() -> ResolveArgs {
        ResolveArgs {
            config: None,
            json: None,
            role: None,
            format: ReportFormat::Text,
        }
    }

    const REFERENCE: &str = r##"{"brightThemeColor": "#3182CE"}"##;

    #[test]
    fn inline_json_takes_precedence_over_env() {
        let args = ResolveArgs {
            json: Some("{}".to_string()),
            ..args()
        };
        let doc = load_document(&args, Some("ignored".to_string())).unwrap();
        assert_eq!(doc.as_deref(), Some("{}"));
    }

    #[test]
    fn env_is_the_fallback() {
        let doc = load_document(&args(), Some(REFERENCE.to_string())).unwrap();
        assert_eq!(doc.as_deref(), Some(REFERENCE));
        assert_eq!(load_document(&args(), None).unwrap(), None);
    }

    #[test]
    fn config_file_is_read() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("colors.json");
        std::fs::write(&path, REFERENCE).expect("write");
        let args = ResolveArgs {
            config: Some(path),
            ..args()
        };
        assert_eq!(load_document(&args, None).unwrap().as_deref(), Some(REFERENCE));
    }

    #[test]
    fn text_report_lists_every_role() {
        let resolved = resolve_roles(Some(REFERENCE), None).unwrap();
        let text = render_report(&resolved, ReportFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SemanticRole::COUNT);
        assert!(lines[0].starts_with("panelButton"));
        assert!(lines[0].contains("rgb(235, 248, 255)"));
        // Dark falls back to the light brand color.
        assert!(lines[0].ends_with("rgb(42, 67, 101)"));
        assert!(lines[1].contains("rgb(43, 108, 176)"));
        assert!(lines[1].ends_with('-'));
        assert!(lines[3].contains("#3182ce"));
    }

    #[test]
    fn single_role_and_unknown_role() {
        let one = resolve_roles(Some(REFERENCE), Some("basicHover")).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].css_light().as_deref(), Some("rgb(66, 153, 225)"));

        let error = resolve_roles(Some(REFERENCE), Some("navBar")).unwrap_err();
        assert!(matches!(error, CliError::UnknownRole(e) if e.name == "navBar"));
    }

    #[test]
    fn json_report_carries_sources_and_issues() {
        let doc = r##"{"brightThemeColor": "#3182CE", "textColor": "bad", "buttonColor": "#000"}"##;
        let resolved = resolve_roles(Some(doc), None).unwrap();
        let json = render_report(&resolved, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "ok");
        let roles = value["roles"].as_array().unwrap();
        assert_eq!(roles[0]["role"], "panelButton");
        assert_eq!(roles[0]["light"]["source"], "override");
        assert_eq!(roles[0]["dark"]["color"], "rgb(0, 0, 0)");
        assert!(roles[1]["light"].is_null());
        assert_eq!(roles[1]["issues"].as_array().unwrap().len(), 1);
        assert_eq!(roles[2]["light"]["source"], "derived:blue");
        assert_eq!(roles[3]["encoding"], "hex");
        assert!(roles[1]["dark"].is_null());
    }

    #[test]
    fn missing_document_resolves_empty() {
        let resolved = resolve_roles(None, None).unwrap();
        let text = render_report(&resolved, ReportFormat::Text).unwrap();
        assert!(text.lines().all(|line| line.split_whitespace().skip(1).all(|c| c == "-")));
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let error = resolve_roles(Some("{"), None).unwrap_err();
        assert!(matches!(error, CliError::Config(_)));
    }

    #[test]
    fn conflicting_sources_are_rejected() {
        let error = run_resolve(ResolveArgs {
            config: Some(PathBuf::from("/tmp/brandtint/colors.json")),
            json: Some("{}".to_string()),
            ..args()
        })
        .unwrap_err();
        assert!(matches!(error, CliError::InvalidArgument { .. }));
    }
}
