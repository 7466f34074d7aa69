//! xtask - Build tasks for kubecolor
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man page, THEME.md)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use kubecolor::cli::Cli;
use kubecolor::theme::{KeyKind, Preset, ResolvedValues, KEYS};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for kubecolor")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from the CLI and theme definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate the man page
        #[arg(long)]
        man: bool,

        /// Generate THEME.md
        #[arg(long)]
        theme: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs { output, man, theme } => {
            // If no specific format is specified, generate all
            let gen_all = !man && !theme;

            if gen_all || man {
                generate_man_page(&output)?;
            }
            if gen_all || theme {
                generate_theme_reference(&output)?;
            }
        }
    }

    Ok(())
}

/// Generate kubecolor.1 using clap_mangen
fn generate_man_page(output: &Path) -> Result<()> {
    use clap_mangen::Man;

    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let man = Man::new(Cli::command());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("kubecolor.1"), buffer)?;
    println!("Generated: {}/kubecolor.1", man_dir.display());
    Ok(())
}

/// Generate THEME.md: every theme key with its fallback and preset values
fn generate_theme_reference(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let empty = BTreeMap::new();
    let dark = ResolvedValues::resolve(Preset::Dark, &empty)?;
    let light = ResolvedValues::resolve(Preset::Light, &empty)?;

    let mut markdown = String::new();
    markdown.push_str("# Theme Reference\n\n");
    markdown.push_str("This document is auto-generated from the theme definitions.\n\n");
    markdown.push_str(
        "Set keys in `~/.kube/color.toml` under `[theme]`, e.g. `[theme.base] danger = \"red\"`, \
         or with `KUBECOLOR_THEME_<GROUP>_<FIELD>` environment variables.\n\n",
    );

    markdown.push_str("## Presets\n\n");
    for preset in Preset::ALL {
        markdown.push_str(&format!("- `{}`\n", preset.name()));
    }
    markdown.push('\n');

    markdown.push_str("## Keys\n\n");
    markdown.push_str("| Key | Kind | Fallback | Dark | Light | Description |\n");
    markdown.push_str("|-----|------|----------|------|-------|-------------|\n");
    for key in KEYS {
        let kind = match key.kind {
            KeyKind::Color => "color",
            KeyKind::Slice => "color list",
        };
        let fallback = if key.fallback.is_empty() {
            String::new()
        } else {
            format!("`{}`", key.fallback.join(" / "))
        };
        markdown.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {} |\n",
            key.name,
            kind,
            fallback,
            cell(dark.get(key.name)),
            cell(light.get(key.name)),
            key.description,
        ));
    }

    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("THEME.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());
    Ok(())
}

fn cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!("`{}`", v),
        _ => "-".to_string(),
    }
}
