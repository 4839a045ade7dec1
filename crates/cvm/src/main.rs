use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod output;

use commands::message::Overrides;
use output::Output;

#[derive(Parser)]
#[command(name = "cvm")]
#[command(version)]
#[command(about = "Inspect the derived display model of chat messages")]
#[command(long_about = "Classifies chat messages, ranks their reactions and replays hover/detail events.\n\nInput is a JSON message object or an array of them, read from a file or stdin (-).")]
struct Cli {
    /// Output in JSON format (for agents/scripts)
    #[arg(short, long, global = true)]
    json: bool,

    /// Data directory (default: platform data dir/cvm)
    #[arg(long, global = true, env = "CVM_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify messages into display variants
    Classify {
        /// Message JSON file, or - for stdin
        input: String,
        /// Local participant id (overrides config)
        #[arg(long)]
        local: Option<String>,
        /// Treat the local user as waiting in the lobby
        #[arg(long)]
        knocking: bool,
    },

    /// Rank and truncate message reactions
    Summarize {
        /// Message JSON file, or - for stdin
        input: String,
        /// Overflow counter policy: total-minus-cap or hidden-events
        #[arg(long)]
        policy: Option<String>,
    },

    /// Build the full message view
    View {
        /// Message JSON file, or - for stdin
        input: String,
        /// Disclosure events to replay, e.g. enter,open,leave
        #[arg(short, long, default_value = "")]
        events: String,
        /// Local participant id (overrides config)
        #[arg(long)]
        local: Option<String>,
        /// Treat the local user as waiting in the lobby
        #[arg(long)]
        knocking: bool,
        /// Overflow counter policy: total-minus-cap or hidden-events
        #[arg(long)]
        policy: Option<String>,
    },

    /// Show the moderation commands a quick-action button dispatches
    QuickAction {
        /// Button: mute, ask-to-unmute, allow-desktop, allow-video, stop-desktop, stop-video
        button: String,
        /// Target participant id
        participant_id: String,
        /// Participant display name for the accessibility label
        #[arg(long)]
        name: Option<String>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set the local participant id
    SetLocal {
        /// Participant id
        id: String,
    },

    /// Set the overflow counter policy
    SetPolicy {
        /// total-minus-cap or hidden-events
        policy: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = Output::new(cli.json);

    if let Err(e) = run(cli, &output) {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn parse_policy(policy: Option<&str>) -> anyhow::Result<Option<chat_view_model::OverflowPolicy>> {
    policy
        .map(|p| p.parse::<chat_view_model::OverflowPolicy>().context("Invalid --policy"))
        .transpose()
}

fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("Could not find data directory")?
            .join("cvm"),
    };

    let config = config::Config::load(&data_dir)?;

    match cli.command {
        Commands::Classify { input, local, knocking } => {
            let overrides = Overrides {
                local,
                knocking,
                policy: None,
            };
            commands::message::classify_messages(&input, &overrides, &config, output)
        }
        Commands::Summarize { input, policy } => {
            let overrides = Overrides {
                policy: parse_policy(policy.as_deref())?,
                ..Default::default()
            };
            commands::message::summarize_messages(&input, &overrides, &config, output)
        }
        Commands::View { input, events, local, knocking, policy } => {
            let overrides = Overrides {
                local,
                knocking,
                policy: parse_policy(policy.as_deref())?,
            };
            commands::message::view_messages(&input, &events, &overrides, &config, output)
        }
        Commands::QuickAction { button, participant_id, name } => {
            commands::quick_action::show(&button, &participant_id, name.as_deref(), output)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(&config, output),
            ConfigCommands::SetLocal { id } => commands::config::set_local(&id, &config, output),
            ConfigCommands::SetPolicy { policy } => {
                commands::config::set_policy(&policy, &config, output)
            }
        },
    }
}
