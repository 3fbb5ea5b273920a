use std::collections::HashMap;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use songpilot::{commands, config, coordinator::Coordinator, error, info};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search a track and play the best match
    Play(TitleOptions),

    /// Resume playback unless something is already playing
    Resume,

    /// Pause playback
    Pause,

    /// List tracks matching a query
    Search(QueryOptions),

    /// Search a track and add the best match to the queue
    Queue(TitleOptions),

    /// List available playback devices
    Devices,

    /// Run one assistant function call, e.g. `call PlayContent title=Imagine`
    Call(CallOptions),

    /// Print the function schema for the assistant as JSON
    Functions,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TitleOptions {
    /// Track title, words are joined with spaces
    #[clap(required = true)]
    title: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct QueryOptions {
    #[clap(required = true)]
    query: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CallOptions {
    /// Function name
    name: String,

    /// Arguments as key=value
    #[clap(value_parser = parse_key_value)]
    args: Vec<(String, String)>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("songpilot=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Functions => {
            match serde_json::to_string_pretty(&commands::functions()) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("Cannot serialize function schema. Err: {}", e),
            }
            return;
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            return;
        }
        _ => {}
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };
    let coordinator = Coordinator::from_settings(settings);

    let outcome = match cli.command {
        Command::Play(opt) => coordinator.play_track_by_name(&opt.title.join(" ")).await,
        Command::Resume => coordinator.resume().await,
        Command::Pause => coordinator.pause().await,
        Command::Search(opt) => coordinator.search_tracks(&opt.query.join(" ")).await,
        Command::Queue(opt) => coordinator.queue_track_by_name(&opt.title.join(" ")).await,
        Command::Devices => coordinator.devices().await,
        Command::Call(opt) => {
            let args: HashMap<String, String> = opt.args.into_iter().collect();
            coordinator.invoke(&opt.name, &args).await
        }
        Command::Functions | Command::Completions(_) => return,
    };

    info!("{}", outcome);
}
