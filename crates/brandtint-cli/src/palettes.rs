use std::fmt::Write as _;

use brandtint_style::{PaletteRegistry, SemanticRole};

use crate::error::Result;
use crate::util::or_absent;

/// One block per registry entry: base color, then each role's light and
/// dark targets.
#[must_use]
pub fn render_palettes(registry: &PaletteRegistry) -> String {
    let mut out = String::new();
    for (index, entry) in registry.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "[{index}] {} base={}",
            entry.name(),
            entry.base().to_hex_string()
        );
        for role in SemanticRole::ALL {
            let dark = entry.dark_target(role).map(|c| c.to_hex_string());
            let _ = writeln!(
                out,
                "    {:<14} {} {}",
                role.name(),
                entry.light_target(role).to_hex_string(),
                or_absent(dark.as_deref())
            );
        }
    }
    out
}

pub fn run_palettes() -> Result<()> {
    print!("{}", render_palettes(PaletteRegistry::builtin()));
    Ok(())
}
