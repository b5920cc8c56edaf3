use brandtint_style::{
    ColorEncoding, DeviationPattern, PaletteRegistry, decode, select_nearest,
};
use clap::{Args, ValueEnum};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EncodingArg {
    #[default]
    Rgb,
    Hex,
}

impl From<EncodingArg> for ColorEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Rgb => ColorEncoding::Rgb,
            EncodingArg::Hex => ColorEncoding::Hex,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AdjustArgs {
    /// Reference base color.
    #[arg(long)]
    pub base: String,

    /// Reference target color paired with the base.
    #[arg(long)]
    pub target: String,

    /// Color to move the way base moves to target.
    #[arg(long)]
    pub custom: String,

    #[arg(long, value_enum, default_value_t = EncodingArg::Rgb)]
    pub format: EncodingArg,

    /// Also print the per-channel deviation ratios.
    #[arg(long)]
    pub ratios: bool,
}

#[derive(Debug, Clone, Args)]
pub struct NearestArgs {
    /// Color to bind to a registry entry.
    pub color: String,
}

pub fn adjust_color(args: &AdjustArgs) -> Result<String> {
    let base = decode(&args.base)?;
    let target = decode(&args.target)?;
    let custom = decode(&args.custom)?;
    let pattern = DeviationPattern::between(base, target);
    let mut out = pattern.apply(custom).encode(args.format.into());
    if args.ratios {
        let [r, g, b] = pattern.ratios();
        out.push_str(&format!(" ratios=({r:.4}, {g:.4}, {b:.4})"));
    }
    Ok(out)
}

pub fn nearest_entry(args: &NearestArgs) -> Result<String> {
    let registry = PaletteRegistry::builtin();
    let color = decode(&args.color)?;
    let index = select_nearest(registry, Some(color));
    let entry = registry.entry(index);
    Ok(format!(
        "{index} {} base={} distance={:.2}",
        entry.name(),
        entry.base().to_hex_string(),
        color.distance(entry.base())
    ))
}

pub fn run_adjust(args: AdjustArgs) -> Result<()> {
    println!("{}", adjust_color(&args)?);
    Ok(())
}

pub fn run_nearest(args: NearestArgs) -> Result<()> {
    println!("{}", nearest_entry(&args)?);
    Ok(())
}
