use anyhow::Result;
use clap::{Parser, Subcommand};
use console::{Term, style};
use fwpub_core::{BoardProfile, BuildContext, PublishOptions, publish};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// fwpub - Publish ESP32 build artifacts for web flashing
#[derive(Parser)]
#[command(name = "fwpub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy build artifacts into docs/firmware/<env>/ and write manifest.json
    Publish {
        /// Build output directory containing the .bin artifacts
        #[arg(long)]
        build_dir: PathBuf,

        /// Project root directory (destination tree is created under it)
        #[arg(long)]
        project_dir: PathBuf,

        /// Build environment name (selects the destination subdirectory)
        #[arg(long)]
        env: String,

        /// Board identifier the firmware was built for
        #[arg(long)]
        board: String,

        /// Framework packages root (default: ~/.platformio/packages)
        #[arg(long)]
        packages_dir: Option<PathBuf>,

        /// Display name for the manifest (default: project directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the flash offset policy resolved for a board
    Offsets {
        /// Board identifier
        #[arg(long)]
        board: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose lowers the default filter to debug
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .without_time()
        .init();

    match cli.command {
        Commands::Publish {
            build_dir,
            project_dir,
            env,
            board,
            packages_dir,
            name,
        } => cmd_publish(build_dir, project_dir, env, board, packages_dir, name),
        Commands::Offsets { board } => cmd_offsets(&board),
    }
}

fn cmd_publish(
    build_dir: PathBuf,
    project_dir: PathBuf,
    env: String,
    board: String,
    packages_dir: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let term = Term::stderr();

    term.write_line(&format!(
        "{} Publishing firmware for {} ({})",
        style("::").cyan().bold(),
        env,
        board
    ))?;

    let mut ctx = BuildContext::new(env, board, build_dir, project_dir);
    if let Some(dir) = packages_dir {
        ctx = ctx.with_packages_dir(dir);
    }

    let options = PublishOptions { display_name: name };

    // A post-build hook must not fail the build: report problems and exit 0
    let report = match publish(&ctx, &options) {
        Ok(report) => report,
        Err(e) => {
            term.write_line(&format!(
                "{} Publish failed: {}",
                style("error:").red().bold(),
                e
            ))?;
            return Ok(());
        }
    };

    for file in &report.copied {
        term.write_line(&format!("  {} {}", style("+").green().bold(), file))?;
    }
    for file in &report.skipped {
        term.write_line(&format!(
            "  {} {} {}",
            style("-").yellow().bold(),
            file,
            style("(skipped)").dim()
        ))?;
    }

    term.write_line(&format!(
        "{} Published {} file(s) to {}",
        style("::").green().bold(),
        report.copied.len(),
        report.dest_dir.display()
    ))?;
    info!(manifest = %report.manifest_path.display(), "manifest written");

    Ok(())
}

fn cmd_offsets(board: &str) -> Result<()> {
    let term = Term::stderr();
    let profile = BoardProfile::new(board);

    term.write_line(&format!(
        "{} Offsets for {}",
        style("::").cyan().bold(),
        profile
    ))?;
    term.write_line(&format!("  Chip family: {}", profile.chip_family()))?;

    for file in [
        "bootloader.bin",
        "partitions.bin",
        "boot_app0.bin",
        "firmware.bin",
    ] {
        match profile.offset_for(file) {
            Some(offset) => {
                term.write_line(&format!("  {:<16} {:#x}", file, offset))?;
            }
            None => {
                term.write_line(&format!(
                    "  {:<16} {}",
                    file,
                    style("not used").dim()
                ))?;
            }
        }
    }

    Ok(())
}
