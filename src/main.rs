use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use coretop::app::App;
use coretop::config::{self, Config, load_config, load_config_from_path};
use coretop::event::{Event, EventHandler};
use coretop::logging;
use coretop::system::memory::StubFreeMemory;
use coretop::system::platform;
use coretop::system::sampler::{CpuTimeSource, Sampler};
use coretop::ui;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

#[derive(Parser)]
#[command(
    name = "coretop",
    about = "Per-core CPU load and memory on one refreshing line"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Show only the average load, not the per-core list
    #[arg(long, default_value_t = false)]
    no_per_core: bool,

    /// Print a single reading after one interval and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Append diagnostics to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path)
            .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    }

    if config.general.refresh_rate_ms < config::MIN_REFRESH_MS {
        tracing::warn!(
            requested_ms = config.general.refresh_rate_ms,
            floor_ms = config::MIN_REFRESH_MS,
            "refresh rate below the supported floor, clamping"
        );
    }

    // Everything queried here is fatal if unanswered; there is no point in a
    // monitor that cannot see its counters.
    let core_count = platform::core_count().wrap_err("failed to determine the core count")?;
    let total_memory =
        platform::total_memory_bytes().wrap_err("failed to determine total memory")?;
    let source = platform::CpuTimes::open()
        .wrap_err("failed to open the cpu time source (does this need root?)")?;

    let sampler = Sampler::new(source, core_count);
    let mut app = App::new(&config, sampler, total_memory, Box::new(StubFreeMemory));

    if cli.once {
        return run_once(&mut app, &config).await;
    }

    if config.display.show_banner {
        println!("{}", ui::banner(app.core_count(), &app.memory));
    }

    enable_raw_mode()?;
    execute!(stdout(), Hide)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), Show);
        let _ = disable_raw_mode();
        original_hook(panic_info);
    }));

    let result = run(&mut app, &config).await;

    execute!(stdout(), Show)?;
    disable_raw_mode()?;
    println!();

    result
}

async fn run<S: CpuTimeSource>(app: &mut App<S>, config: &Config) -> Result<()> {
    let tick_rate = config.general.refresh_interval();
    let mut events = EventHandler::new(tick_rate);
    let mut out = stdout();

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        should_draw = app.running;
                    }
                }
                Event::Tick => {
                    app.refresh_data();
                    should_draw = true;
                }
                Event::Resize => {
                    should_draw = true;
                }
            }
            if should_draw {
                ui::draw(&mut out, app)?;
            }
        }
    }

    Ok(())
}

async fn run_once<S: CpuTimeSource>(app: &mut App<S>, config: &Config) -> Result<()> {
    tokio::time::sleep(config.general.refresh_interval()).await;
    app.refresh_data();
    println!(
        "{}",
        ui::status_line(&app.utilization, &app.memory, app.show_per_core)
    );
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if cli.no_per_core {
        config.display.show_per_core = false;
    }

    config
}
