mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "invite")]
#[command(about = "Create meeting invites (.ics) and email them to attendees")]
struct Cli {
    /// Log each step in detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an invite file without sending it
    Generate {
        #[command(flatten)]
        meeting: MeetingArgs,

        /// Where to save the invite (defaults to meeting_invite.ics in output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write an invite file and email it to every attendee
    Send {
        #[command(flatten)]
        meeting: MeetingArgs,

        /// Where to save the invite (defaults to meeting_invite.ics in output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Address to send from and log in as (defaults to smtp.sender, then the organizer)
        #[arg(long)]
        sender: Option<String>,

        /// SMTP relay host (defaults to smtp.host)
        #[arg(long)]
        smtp_host: Option<String>,

        /// SMTP relay port (defaults to smtp.port)
        #[arg(long)]
        smtp_port: Option<u16>,
    },
    /// Print the contents of a saved invite
    Show { path: PathBuf },
    /// Show the config file location and effective settings
    Config,
}

#[derive(Args)]
pub struct MeetingArgs {
    /// Organizer email address
    #[arg(long)]
    pub organizer: String,

    /// Organizer display name shown by calendar clients
    #[arg(long)]
    pub organizer_name: Option<String>,

    /// Attendee email address (repeat, or separate with commas)
    #[arg(short, long = "attendee", value_delimiter = ',')]
    pub attendees: Vec<String>,

    /// Start time (e.g., "2025-05-20T14:00:00"); no offset means UTC
    #[arg(short, long)]
    pub start: String,

    /// End time
    #[arg(short, long, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration (e.g., "30m", "1h", "1h 30m"); one hour if neither --end nor --duration is given
    #[arg(short, long, conflicts_with = "end")]
    pub duration: Option<String>,

    /// Meeting title
    #[arg(short = 't', long)]
    pub subject: String,

    #[arg(short, long, default_value = "")]
    pub location: String,

    #[arg(long, default_value = "")]
    pub description: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate { meeting, output } => commands::generate::run(meeting, output),
        Commands::Send {
            meeting,
            output,
            sender,
            smtp_host,
            smtp_port,
        } => commands::send::run(
            meeting,
            output,
            commands::send::RelayOverrides {
                sender,
                host: smtp_host,
                port: smtp_port,
            },
        ),
        Commands::Show { path } => commands::show::run(&path),
        Commands::Config => commands::config::run(),
    }
}

/// Log to stderr; RUST_LOG takes precedence over --verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
