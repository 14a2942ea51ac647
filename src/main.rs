use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use nanoscope::app::{App, StatusLevel};
use nanoscope::config;
use nanoscope::core::Module;
use nanoscope::domain::account::Clipboard;
use nanoscope::infrastructure::nano::NanoRpc;
use nanoscope::infrastructure::runtime::{RuntimeBridge, RuntimeCommand};
use nanoscope::infrastructure::SystemClipboard;
use nanoscope::logging;
use nanoscope::store::KnownAccountStore;
use nanoscope::ui;

#[derive(Debug, Parser)]
#[command(
    name = "nanoscope",
    version,
    about = "Nanoscope: account viewer for Nano nodes"
)]
struct Args {
    /// Account to view (nano_... or legacy xrb_...)
    address: String,

    /// Node RPC endpoint (e.g. http://localhost:7076)
    #[arg(long)]
    rpc: Option<String>,

    /// URL of a JSON known-accounts registry
    #[arg(long)]
    known_accounts_url: Option<String>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = config::log_path() {
        if let Err(err) = logging::init_file_logger(&path, args.verbose) {
            eprintln!("logging disabled: {err:#}");
        }
    }

    let config = config::load();
    let rpc_url = args.rpc.clone().unwrap_or_else(|| config.rpc_url());
    let known_accounts_url = args
        .known_accounts_url
        .clone()
        .or_else(|| config.known_accounts_url.clone());
    let refresh_every = match config.refresh_secs() {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    info!(%rpc_url, address = %args.address, "starting");

    let source = Arc::new(NanoRpc::new(rpc_url.clone(), known_accounts_url)?);
    let runtime = RuntimeBridge::new(source, refresh_every);

    let mut app = App::new(&args.address);
    app.endpoint = rpc_url;
    app.set_config_aliases(config.known_accounts());
    open_store(&mut app);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn open_store(app: &mut App) {
    let Some(db_path) = config::known_accounts_db_path() else {
        return;
    };
    let result = KnownAccountStore::open(&db_path).and_then(|store| app.attach_store(store));
    if let Err(err) = result {
        warn!(error = %format!("{err:#}"), "known accounts store disabled");
        app.set_status(format!("Alias DB disabled: {err:#}"), StatusLevel::Warn);
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    let mut clipboard = match SystemClipboard::new() {
        Ok(clipboard) => Some(clipboard),
        Err(err) => {
            warn!(error = %err, "clipboard unavailable");
            None
        }
    };

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let action = app.handle_key(key);
                let clipboard = clipboard.as_mut().map(|c| c as &mut dyn Clipboard);
                if let Some(cmd) = app.dispatch(action, clipboard, Instant::now()) {
                    if let Err(err) = runtime.send(cmd) {
                        app.set_status(format!("{err:#}"), StatusLevel::Error);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_event(event);
    }
}
