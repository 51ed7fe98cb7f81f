mod app;
mod settings;
mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clausemark_config::Config;
use clausemark_engine::{PulldownRenderer, io, render_view};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{Stdout, Write, stdout},
    path::PathBuf,
};

use app::App;
use settings::{AssociationArg, Check, apply_checks, load_options, parse_check};

/// View an annotated markdown document clause by clause, filtered by its
/// metadata.
#[derive(Debug, Parser)]
#[command(name = "clausemark", version)]
struct Args {
    /// Markdown document to open. Falls back to `document_path` in the config file.
    document: Option<PathBuf>,

    /// Config file to use instead of ~/.config/clausemark/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the rendered clauses as HTML to stdout instead of opening the viewer
    #[arg(long)]
    html: bool,

    /// Which content a metadata comment governs
    #[arg(long, value_enum)]
    association: Option<AssociationArg>,

    /// Check a filter after loading, e.g. `--check applies_to=staff`
    #[arg(long = "check", value_name = "DIMENSION=VALUE", value_parser = parse_check)]
    checks: Vec<Check>,
}

fn init_logging(interactive: bool) {
    // The terminal viewer owns the screen, so it only logs when asked to
    let default_level = if interactive {
        log::LevelFilter::Off
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file '{}' not found", path.display()),
        },
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(!args.html);

    let config = load_config(&args)?;
    let Some(document_path) = args
        .document
        .clone()
        .or_else(|| config.document_path.clone())
    else {
        bail!(
            "No document provided and no document_path in {}",
            args.config
                .clone()
                .unwrap_or_else(Config::config_path)
                .display()
        );
    };
    let options = load_options(&config, args.association);

    if args.html {
        let mut view = io::load_view(&document_path, &options)
            .with_context(|| format!("Failed to load {}", document_path.display()))?;
        apply_checks(&mut view, &args.checks);
        let html = render_view(&view, &PulldownRenderer::new());
        let mut out = stdout().lock();
        out.write_all(html.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    // Load before taking over the terminal
    let mut app = App::new(document_path, options, args.checks);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_control(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_control(),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_control(),
                KeyCode::Tab => app.next_term(),
                KeyCode::BackTab => app.previous_term(),
                KeyCode::Esc => app.leave_term(),
                KeyCode::PageDown => app.scroll_down(),
                KeyCode::PageUp => app.scroll_up(),
                KeyCode::Char('r') => app.reload(),
                _ => {}
            }
        }
    }
}
