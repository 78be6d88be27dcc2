//! hyprmsg
//!
//! Send commands and queries to a running Hyprland instance, run named
//! batches from the configuration file and watch the event stream.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use hypr_ipc::{
    Command, ControlClient, EventClient, EventDispatcher, NotifyIcon, OutputBackend, Request,
};
use hypr_ipc_config::{Config, DEFAULT_CONFIG_PATH};
use miette::IntoDiagnostic;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(name = "hyprmsg")]
#[command(about = "Talk to Hyprland over its IPC sockets")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration file
    Validate,

    /// Call a keybind dispatcher
    Dispatch {
        dispatcher: String,
        args: Vec<String>,
    },

    /// Set a config keyword at runtime
    Keyword {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Reload the Hyprland config
    Reload,

    /// Enter kill mode (click a window to close it)
    Kill,

    /// Set the cursor theme and size
    SetCursor { theme: String, size: u32 },

    /// Add or remove virtual outputs
    Output {
        #[command(subcommand)]
        action: OutputAction,
    },

    /// Change the active keyboard layout of a device
    SwitchLayout {
        /// Device name, or `current` / `all`
        device: String,
        /// `next`, `prev` or a layout index
        command: String,
    },

    /// Show the error bar
    SetError {
        /// e.g. `rgba(ff0000ff)`
        color: String,
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Hide the error bar
    DisableError,

    /// Show a notification
    Notify {
        /// none, warning, info, hint, error, confused, ok, or a numeric code
        #[arg(short, long, default_value = "none")]
        icon: NotifyIcon,
        /// Display time in milliseconds
        #[arg(short, long, default_value_t = 5000)]
        timeout: u32,
        #[arg(short, long)]
        color: Option<String>,
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Dismiss notifications (all when no count is given)
    DismissNotify { count: Option<i32> },

    /// Send wire-format commands; several are sent as one batch
    Raw {
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Run a named batch from the configuration file
    Batch { name: String },

    /// List the batches defined in the configuration file
    Batches,

    /// Print compositor state as JSON
    Query {
        #[arg(value_enum)]
        what: Query,
    },

    /// Print events until interrupted
    Listen {
        /// Only print events with this tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum OutputAction {
    /// Create a virtual output
    Create {
        #[arg(default_value = "auto")]
        backend: OutputBackend,
        name: Option<String>,
    },
    /// Remove an output by name
    Remove { name: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Query {
    Monitors,
    Workspaces,
    Clients,
    ActiveWindow,
    ActiveWorkspace,
    Devices,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Expand tilde in config path
    let config_path: PathBuf = shellexpand::tilde(&cli.config).into_owned().into();
    let config = hypr_ipc_config::load_config(&config_path)?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.global.log_level.as_filter())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate => cmd_validate(&config_path),
        Commands::Dispatch { dispatcher, args } => {
            execute(&config, Request::new().dispatch(dispatcher, args)).await
        }
        Commands::Keyword { text } => {
            execute(&config, Request::new().keyword(text.join(" "))).await
        }
        Commands::Reload => execute(&config, Request::new().reload()).await,
        Commands::Kill => execute(&config, Request::new().kill()).await,
        Commands::SetCursor { theme, size } => {
            execute(&config, Request::new().set_cursor(theme, size)).await
        }
        Commands::Output { action } => {
            let request = match action {
                OutputAction::Create { backend, name } => {
                    Request::new().create_output(backend, name)
                }
                OutputAction::Remove { name } => Request::new().remove_output(name),
            };
            execute(&config, request).await
        }
        Commands::SwitchLayout { device, command } => {
            execute(&config, Request::new().switch_xkb_layout(device, command)).await
        }
        Commands::SetError { color, message } => {
            execute(&config, Request::new().set_error(color, message.join(" "))).await
        }
        Commands::DisableError => execute(&config, Request::new().disable_error()).await,
        Commands::Notify {
            icon,
            timeout,
            color,
            message,
        } => {
            let request = Request::new().notify(icon, timeout, color, message.join(" "));
            execute(&config, request).await
        }
        Commands::DismissNotify { count } => {
            execute(&config, Request::new().dismiss_notify(count.unwrap_or(0))).await
        }
        Commands::Raw { commands } => cmd_raw(&config, &commands).await,
        Commands::Batch { name } => cmd_batch(&config, &config_path, &name).await,
        Commands::Batches => cmd_batches(&config, &config_path),
        Commands::Query { what } => cmd_query(&config, what).await,
        Commands::Listen { tags } => cmd_listen(&config, tags).await,
    }
}

fn control_client(config: &Config) -> miette::Result<ControlClient> {
    let socket = config.socket_config().into_diagnostic()?;
    Ok(ControlClient::new(socket))
}

async fn execute(config: &Config, request: Request) -> miette::Result<()> {
    let client = control_client(config)?;
    tracing::debug!(request = %request.encode(), "Executing request");

    client.execute(&request).await.into_diagnostic()?;
    println!("ok");
    Ok(())
}

fn cmd_validate(config_path: &Path) -> miette::Result<()> {
    println!("Validating configuration: {}", config_path.display());

    let config = hypr_ipc_config::parse_config(config_path)?;

    println!("Configuration is valid!");
    println!("  Log level: {}", config.global.log_level.as_filter());
    if let Some(dir) = &config.global.runtime_dir {
        println!("  Runtime dir: {}", dir.display());
    }
    if let Some(signature) = &config.global.instance_signature {
        println!("  Instance signature: {}", signature);
    }
    println!("  Batches: {}", config.batches.len());
    for batch in &config.batches {
        println!("    - {} ({} command(s))", batch.name, batch.commands().len());
    }
    Ok(())
}

async fn cmd_raw(config: &Config, commands: &[String]) -> miette::Result<()> {
    let request = commands
        .iter()
        .map(|wire| wire.parse::<Command>())
        .collect::<Result<Request, _>>()
        .into_diagnostic()?;

    execute(config, request).await
}

async fn cmd_batch(config: &Config, config_path: &Path, name: &str) -> miette::Result<()> {
    let batch = config.batch(name).ok_or_else(|| {
        miette::miette!("No batch named \"{}\" in {}", name, config_path.display())
    })?;

    execute(config, batch.request.clone()).await
}

fn cmd_batches(config: &Config, config_path: &Path) -> miette::Result<()> {
    if config.batches.is_empty() {
        println!("No batches defined in {}", config_path.display());
        return Ok(());
    }

    for batch in &config.batches {
        println!("{}:", batch.name);
        for command in batch.commands() {
            println!("    {}", command);
        }
    }
    Ok(())
}

async fn cmd_query(config: &Config, what: Query) -> miette::Result<()> {
    let client = control_client(config)?;

    match what {
        Query::Monitors => print_json(&client.monitors().await.into_diagnostic()?),
        Query::Workspaces => print_json(&client.workspaces().await.into_diagnostic()?),
        Query::Clients => print_json(&client.clients().await.into_diagnostic()?),
        Query::ActiveWindow => print_json(&client.active_window().await.into_diagnostic()?),
        Query::ActiveWorkspace => {
            print_json(&client.active_workspace().await.into_diagnostic()?)
        }
        Query::Devices => print_json(&client.devices().await.into_diagnostic()?),
    }
}

fn print_json<T: Serialize>(value: &T) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

async fn cmd_listen(config: &Config, tags: Vec<String>) -> miette::Result<()> {
    let socket = config.socket_config().into_diagnostic()?;
    let events = EventClient::connect(&socket).await.into_diagnostic()?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, stopping");
            interrupt.cancel();
        }
    });

    let (handle, mut rx) = EventDispatcher::spawn(events, &cancel);

    while let Some(event) = rx.recv().await {
        if tags.is_empty() || tags.iter().any(|tag| tag == event.tag()) {
            println!("{:?}", event);
        }
    }

    handle.await.into_diagnostic()?.into_diagnostic()
}
