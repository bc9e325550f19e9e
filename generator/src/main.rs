//! OneOf Unity package generator.
//!
//! Renders the `OneOf<..>`/`OneOfBase<..>` C# types for every supported arity,
//! the package manifests, and copies the shared license/readme/notices into
//! each package under the output root.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use generator::core::types::{ArityConfig, TierName, VariantKind};
use generator::exit_codes;
use generator::generate::{CheckOutcome, GeneratorPaths, StaleReason, check, generate};
use generator::io::config::{GeneratorConfig, write_config};
use generator::logging;
use generator::render::arity::render_type;
use generator::render::manifest::render_manifest;

#[derive(Parser)]
#[command(
    name = "generator",
    version,
    about = "Regenerate the OneOf Unity discriminated-union packages"
)]
struct Cli {
    /// Root holding the static inputs and receiving the packages.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to `<root>/oneof-generator.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate every package file for all tiers.
    Generate,
    /// Verify generated files on disk match a fresh render (writes nothing).
    Check,
    /// Print one rendered union type to stdout.
    Render {
        /// Number of type parameters.
        #[arg(long)]
        arity: usize,
        /// `value` (OneOf struct) or `base` (OneOfBase class).
        #[arg(long, default_value = "value")]
        kind: VariantKind,
    },
    /// Print one tier's package manifest to stdout.
    Manifest {
        /// `base` or `extended`.
        #[arg(long, default_value = "base")]
        tier: TierName,
    },
    /// Write the default config file.
    InitConfig {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let paths = GeneratorPaths::new(cli.root, cli.config);
    match cli.command {
        Command::Generate => cmd_generate(&paths),
        Command::Check => cmd_check(&paths),
        Command::Render { arity, kind } => cmd_render(arity, kind),
        Command::Manifest { tier } => cmd_manifest(&paths, tier),
        Command::InitConfig { force } => cmd_init_config(&paths, force),
    }
}

fn cmd_generate(paths: &GeneratorPaths) -> Result<i32> {
    let cfg = paths.load_config()?;
    let summary = generate(&paths.root, &cfg)?;
    for tier in &summary.tiers {
        println!(
            "generate: tier={} arities={} type_files={}",
            tier.name, tier.arities, tier.type_files
        );
    }
    println!("generate: files_written={}", summary.files_written);
    Ok(exit_codes::OK)
}

fn cmd_check(paths: &GeneratorPaths) -> Result<i32> {
    let cfg = paths.load_config()?;
    match check(&paths.root, &cfg)? {
        CheckOutcome::UpToDate { files } => {
            println!("check: up to date files={}", files);
            Ok(exit_codes::OK)
        }
        CheckOutcome::Stale(stale) => {
            for file in &stale {
                let reason = match file.reason {
                    StaleReason::Missing => "missing",
                    StaleReason::Differs => "differs",
                };
                println!("check: {} {}", reason, file.relative_path);
            }
            println!("check: stale files={}", stale.len());
            Ok(exit_codes::STALE)
        }
    }
}

fn cmd_render(arity: usize, kind: VariantKind) -> Result<i32> {
    let rendered = render_type(ArityConfig::new(arity, kind)?)?;
    print!("{rendered}");
    Ok(exit_codes::OK)
}

fn cmd_manifest(paths: &GeneratorPaths, tier: TierName) -> Result<i32> {
    let cfg = paths.load_config()?;
    let tier = cfg.tier(tier);
    let rendered = render_manifest(
        &cfg.package,
        &tier,
        &cfg.version,
        Some(tier.description.as_str()),
    )?;
    print!("{rendered}");
    Ok(exit_codes::OK)
}

fn cmd_init_config(paths: &GeneratorPaths, force: bool) -> Result<i32> {
    if paths.config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            paths.config_path.display()
        );
    }
    write_config(&paths.config_path, &GeneratorConfig::default())?;
    println!("init-config: wrote {}", paths.config_path.display());
    Ok(exit_codes::OK)
}
