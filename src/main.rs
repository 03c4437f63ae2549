use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use mastodon_unfollow::api::Client;
use mastodon_unfollow::cli::args::{Cli, OutputFormat};
use mastodon_unfollow::cli::output;
use mastodon_unfollow::cli::prompt::{AssumeYes, Prompt, StdinPrompt};
use mastodon_unfollow::common::config::{Session, Settings};
use mastodon_unfollow::common::logging;
use mastodon_unfollow::export::{self, ExportOutcome};
use mastodon_unfollow::finder::{self, FinderOptions};
use mastodon_unfollow::unfollow::{self, UnfollowOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    logging::init(cli.verbose, cli.log_file.as_deref())?;

    let settings = load_settings(&cli)?;

    // Validate before touching the network
    let inactive_months = cli.inactive_months.unwrap_or(settings.inactive_months);
    if inactive_months < 1 {
        anyhow::bail!(
            "--inactive-months must be at least 1 (got {})",
            inactive_months
        );
    }
    let session = Session::new(&cli.instance, &cli.token)?;

    let human = matches!(cli.format, OutputFormat::Human) && !cli.quiet;
    if human {
        output::print_banner();
    }

    let client = Client::new(&session, &settings)?;
    let rate_limits = settings.rate_limits();

    let options = FinderOptions {
        inactive_months,
        rate_limits,
        show_progress: human,
    };
    let results = finder::find_inactive_unfollowers(&client, &options, Utc::now())
        .with_context(|| format!("Failed to fetch your account on {}", session.instance))?;

    match cli.format {
        OutputFormat::Human if !cli.quiet => output::print_results(&results, &session.instance),
        OutputFormat::Human | OutputFormat::Quiet => output::print_quiet(&results),
        // Printed last, so the unfollow outcome lands in the same document
        OutputFormat::Json => {}
    }

    // ─── Export ───────────────────────────────────────────────────────────────

    if let Some(ref path) = cli.export {
        let outcome = export::export_csv(&results, &session.instance, path)?;
        if human {
            output::print_export_outcome(&outcome);
        } else if outcome == ExportOutcome::Empty {
            tracing::info!("nothing to export");
        }
    }

    // ─── Unfollow ─────────────────────────────────────────────────────────────

    let mut unfollow_report = None;
    if cli.unfollow {
        let mut prompt: Box<dyn Prompt> = if cli.yes {
            Box::new(AssumeYes)
        } else {
            Box::new(StdinPrompt::stdio())
        };
        let unfollow_options = UnfollowOptions {
            instance: session.instance.clone(),
            delay: rate_limits.unfollow_delay,
            show_progress: human,
        };

        let report = unfollow::unfollow_accounts(
            &client,
            prompt.as_mut(),
            &results.sorted_inactive(),
            &unfollow_options,
        )
        .context("Failed to read confirmation")?;

        if !matches!(cli.format, OutputFormat::Json) {
            output::print_unfollow_report(&report);
        }
        unfollow_report = Some(report);
    }

    if matches!(cli.format, OutputFormat::Json) {
        output::print_json(&results, &session.instance, unfollow_report.as_ref())?;
    }

    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    match cli.config {
        Some(ref path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Settings::load_from(path)
        }
        None => Settings::load(),
    }
}
