//! `anchors` command: inspect and edit the anchor constant overrides.

use anyhow::{Context, Result};
use clap::Subcommand;

use oven_transit_lib::{AnchorConstants, BeltId};

use super::CliContext;

#[derive(Subcommand, Debug, Clone)]
pub enum AnchorsAction {
    /// Show built-in, overridden and effective anchors per belt.
    Show,
    /// Override one belt's anchor constant (min·Hz).
    Set {
        /// Belt identifier (1, 2, 3 or belt1..belt3).
        belt: BeltId,
        /// New anchor constant; must be strictly positive.
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Drop one belt's override.
    Clear {
        /// Belt identifier (1, 2, 3 or belt1..belt3).
        belt: BeltId,
    },
    /// Drop every override.
    Reset,
}

pub fn handle_anchors(action: &AnchorsAction, ctx: &CliContext) -> Result<()> {
    let mut store = ctx.load_overrides()?;
    let path = store.path().to_path_buf();

    match action {
        AnchorsAction::Show => {
            let p = &ctx.palette;
            let builtin = AnchorConstants::builtin();
            let effective = store.apply(builtin);
            println!("{}Anchor overrides:{} {}", p.gray, p.reset, path.display());
            println!("{:<8} {:>10} {:>10} {:>10}", "", "built-in", "override", "effective");
            for belt in BeltId::ALL {
                println!(
                    "{:<8} {:>10} {:>10} {}{:>10}{}",
                    belt.to_string(),
                    format_anchor(builtin.get(belt)),
                    format_anchor(store.get(belt)),
                    p.white_bold,
                    format_anchor(effective.get(belt)),
                    p.reset
                );
            }
        }
        AnchorsAction::Set { belt, value } => {
            store
                .set(*belt, *value)
                .with_context(|| format!("refusing anchor {value} for {belt}"))?;
            store.save()?;
            println!("{belt} anchor set to {value} ({})", path.display());
        }
        AnchorsAction::Clear { belt } => {
            if store.clear(*belt) {
                store.save()?;
                println!("{belt} anchor override cleared");
            } else {
                println!("{belt} has no anchor override");
            }
        }
        AnchorsAction::Reset => {
            store.reset();
            store.save()?;
            println!("all anchor overrides cleared");
        }
    }
    Ok(())
}

fn format_anchor(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".into())
}
