use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use covergate::github::{Context, GitHubApi};
use covergate::verdict::Scorecard;
use covergate::{ingest, publish, report, verdict};

/// covergate — Coverage gating for pull requests with an idempotent report comment.
#[derive(Parser)]
#[command(name = "covergate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score coverage, publish the report to the pull request, and fail the
    /// step when the gate does not pass.
    Score {
        /// Path to the coverage summary JSON file.
        file: PathBuf,
    },

    /// Render the report to stdout without publishing anything.
    Render {
        /// Path to the coverage summary JSON file.
        file: PathBuf,

        /// Commit SHA to show in the attribution line.
        #[arg(long)]
        sha: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { file } => {
            let pass = cmd_score(&file)?;
            if !pass {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Render { file, sha } => cmd_render(&file, sha.as_deref()),
    }
}

fn cmd_score(file: &std::path::Path) -> Result<bool> {
    let context = Context::from_env()?;
    let summary = ingest::load(file)
        .with_context(|| format!("Failed to load coverage summary from {}", file.display()))?;

    let card = verdict::score(&summary);
    log_sections(&card);

    let body = report::compose(&card, context.sha.as_deref());

    publish::write_step_summary(&body)?;
    let api = GitHubApi::new(&context);
    publish::publish_report(&api, &body)?;

    Ok(card.pass)
}

fn cmd_render(file: &std::path::Path, sha: Option<&str>) -> Result<()> {
    let summary = ingest::load(file)
        .with_context(|| format!("Failed to load coverage summary from {}", file.display()))?;

    let card = verdict::score(&summary);
    let body = report::compose(&card, sha);
    println!("{body}");
    Ok(())
}

fn log_sections(card: &Scorecard) {
    for section in &card.sections {
        let glyph = if section.pass { "✅" } else { "❌" };
        eprintln!("{} {}", section.label, glyph);
    }
    if card.pass {
        eprintln!("Coverage gate passed ✅");
    } else {
        eprintln!("Coverage gate failed ❌");
    }
}
