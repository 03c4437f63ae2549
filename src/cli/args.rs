use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// mastodon-unfollow — find inactive accounts that don't follow you back
#[derive(Parser, Debug)]
#[command(
    name = "mastodon-unfollow",
    version,
    about = "Find inactive Mastodon accounts that don't follow you back",
    long_about = "Compares the accounts you follow with your followers, checks when each\n\
                  non-mutual account last posted, and lists those inactive for longer than\n\
                  a threshold. Results can be exported as CSV or unfollowed in bulk.",
    after_help = "EXAMPLES:\n  \
        mastodon-unfollow --instance mastodon.social --token YOUR_TOKEN\n  \
        mastodon-unfollow -i chaos.social -t YOUR_TOKEN --inactive-months 24\n  \
        mastodon-unfollow -i mastodon.social -t YOUR_TOKEN --export inactive.csv\n  \
        mastodon-unfollow -i mastodon.social -t YOUR_TOKEN --unfollow\n\n\
        ACCESS TOKEN:\n  \
        1. Open https://YOUR-INSTANCE/settings/applications\n  \
        2. Create a new application\n  \
        3. Scopes: read:accounts, read:follows, write:follows (for --unfollow)\n  \
        4. Copy the access token"
)]
pub struct Cli {
    /// Your Mastodon instance (e.g. mastodon.social)
    #[arg(long, short = 'i', value_name = "HOST")]
    pub instance: String,

    /// Your access token
    #[arg(long, short = 't', env = "MASTODON_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Inactivity threshold in months (default: 36)
    #[arg(long, value_name = "MONTHS", allow_negative_numbers = true)]
    pub inactive_months: Option<i64>,

    /// Export the inactive accounts as CSV
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Unfollow the inactive accounts (asks for confirmation)
    #[arg(long)]
    pub unfollow: bool,

    /// Skip the unfollow confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Config file (default: ~/.mastodon-unfollow/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}
