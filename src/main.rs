use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use bondsim::artifact::{ArtifactOpener, SystemOpener, UnsupportedOpener};
use bondsim::client::http::HttpSimulator;
use bondsim::commands::{CommandContext, CommandRegistry, CommandResult};
use bondsim::config::{KNOWN_KEYS, Overrides, Settings, SettingsStore};
use bondsim::consts::default_db_path;
use bondsim::form::{Field, InputSet, parse_assignment};
use bondsim::layout::{BannerInfo, Shell, print_banner};
use bondsim::notify::{NoticeBus, drain};
use bondsim::screen::{Screen, SubmitOutcome};
use bondsim::spinner::BusyStyle;

/// How this target handles the "see full simulation" action.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OpenerKind {
    /// Open files with the system handler.
    System,
    /// This target cannot open files.
    Unsupported,
}

#[derive(Parser)]
#[command(name = "bondsim", version, about = "Bond investment simulator.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// SQLite database for stored settings (use :memory: for none)
    #[arg(short, long, global = true)]
    db: Option<String>,

    /// Simulation endpoint URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// ZMW per USD used for display conversions
    #[arg(short, long, global = true)]
    exchange_rate: Option<f64>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// How to open the generated simulation file
    #[arg(long, value_enum, default_value_t = OpenerKind::System, global = true)]
    opener: OpenerKind,
}

#[derive(Subcommand)]
enum Command {
    /// Run one simulation and print the summary
    Simulate {
        #[arg(long, default_value = "")]
        monthly_investment: String,
        #[arg(long, default_value = "")]
        investment_years: String,
        #[arg(long, default_value = "")]
        bond_tenor_years: String,
        #[arg(long, default_value = "")]
        start_year: String,
        #[arg(long, default_value = "")]
        start_month: String,
        /// Open the simulation file afterwards
        #[arg(long, default_value_t = false)]
        open: bool,
    },
    /// Manage stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print one stored value
    Get { key: String },
    /// Store a value
    Set { key: String, value: String },
    /// Remove a stored value
    Unset { key: String },
    /// Print every stored value
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => {
            let path = default_db_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            path.to_string_lossy().into_owned()
        }
    };
    let store = SettingsStore::open(&db_path)?;

    if let Some(Command::Config { action }) = &cli.command {
        return handle_config(&store, action);
    }

    let overrides = Overrides {
        api_url: cli.api_url.clone(),
        exchange_rate: cli.exchange_rate,
        timeout_secs: cli.timeout,
    };
    let settings = Settings::resolve(Some(&store), &overrides)?;

    let simulator = Arc::new(HttpSimulator::new(&settings.api_url, settings.timeout)?);
    let notices = Arc::new(NoticeBus::default());
    let mut rx = notices.subscribe();
    let busy_style = if io::stderr().is_terminal() {
        BusyStyle::Spinner
    } else {
        BusyStyle::Quiet
    };
    let screen = Screen::new(simulator, Arc::clone(&notices), settings.exchange_rate)
        .with_busy_style(busy_style);

    let opener: Box<dyn ArtifactOpener> = match cli.opener {
        OpenerKind::System => Box::new(SystemOpener),
        OpenerKind::Unsupported => Box::new(UnsupportedOpener),
    };

    if let Some(Command::Simulate {
        monthly_investment,
        investment_years,
        bond_tenor_years,
        start_year,
        start_month,
        open,
    }) = cli.command
    {
        let inputs = InputSet {
            monthly_investment,
            investment_years,
            bond_tenor_years,
            start_year,
            start_month,
        };
        for field in Field::ALL {
            screen.set_field(field, inputs.get(field));
        }
        let outcome = screen.submit().await;
        print_notices(&mut rx);
        match outcome {
            SubmitOutcome::Completed => {
                if let Some(text) = screen.render_result() {
                    print!("{text}");
                }
                if open && screen.open_artifact(opener.as_ref()).is_err() {
                    print_notices(&mut rx);
                }
                return Ok(());
            }
            SubmitOutcome::Failed(err) => bail!(err),
            SubmitOutcome::Superseded => bail!("simulation was cancelled"),
        }
    }

    let settings_label = if db_path == ":memory:" {
        "ephemeral".to_string()
    } else {
        db_path.clone()
    };
    let timeout_label = settings.timeout_label();
    let rate_label = settings.exchange_rate.to_string();
    print_banner(&BannerInfo {
        api_url: &settings.api_url,
        exchange_rate: &rate_label,
        timeout: &timeout_label,
        opener: match cli.opener {
            OpenerKind::System => "system handler",
            OpenerKind::Unsupported => "not supported",
        },
        settings: &settings_label,
    });

    let shell = Shell::new();
    let registry = CommandRegistry::new();
    let ctx = CommandContext {
        screen: &screen,
        opener: opener.as_ref(),
        settings: &settings,
        settings_path: &settings_label,
        shell: &shell,
    };

    print!("{}", shell.render(&screen.render_home()));

    // REPL: async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nbondsim> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        // Ctrl+C during a simulation cancels it, not the REPL
        let result = tokio::select! {
            result = registry.dispatch(input, &ctx) => result,
            _ = tokio::signal::ctrl_c() => {
                screen.cancel();
                println!("\n\ninterrupted");
                CommandResult::Handled
            }
        };

        print_notices(&mut rx);
        match result {
            CommandResult::Quit => break,
            CommandResult::Show(text) => print!("{text}"),
            CommandResult::Handled => {}
            CommandResult::NotACommand => match parse_assignment(input) {
                Ok((field, value)) => screen.set_field(field, value),
                Err(e) => {
                    println!("  ✗ {e}");
                    println!("  type /help for available commands");
                }
            },
        }
    }

    println!("goodbye.");
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("BONDSIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_notices(rx: &mut tokio::sync::broadcast::Receiver<bondsim::notify::Notice>) {
    for notice in drain(rx) {
        if notice.is_error() {
            eprintln!("  {notice}");
        } else {
            println!("  {notice}");
        }
    }
}

fn handle_config(store: &SettingsStore, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => match store.get(key)? {
            Some(value) => println!("{value}"),
            None => bail!("{key} is not set"),
        },
        ConfigAction::Set { key, value } => {
            store.set(key, value)?;
            println!("✓ {key} = {value}");
        }
        ConfigAction::Unset { key } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                bail!("unknown setting: {key} (known: {})", KNOWN_KEYS.join(", "));
            }
            store.remove(key)?;
            println!("✓ {key} unset");
        }
        ConfigAction::List => {
            for (key, value) in store.list()? {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}
