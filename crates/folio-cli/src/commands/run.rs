use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use folio_core::{AppConfig, Portfolio};
use folio_tui::{
    app::{Effect, StatusKind},
    clipboard::{spawn_copy, write_osc52},
    event::{AppEvent, CopyResult, EventHandler},
    input::handle_key_event,
    links::open_link,
    widgets::render_app,
    App,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(config: AppConfig, content: Option<PathBuf>) -> Result<()> {
    let started = Instant::now();
    let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
    let config = config.tuned_for_host(cpus);

    // Load content before touching the terminal so errors print normally
    let content_path = content.or_else(|| config.content_path());
    let portfolio = Portfolio::load_or_sample(content_path.as_deref())?;
    tracing::info!(
        "Content loaded in {} ms ({} sections)",
        started.elapsed().as_millis(),
        portfolio.sections.len()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = format!("{} · folio", portfolio.hero.name);
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle(title)
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config, portfolio, started).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(terminal: &mut Tui, config: AppConfig, portfolio: Portfolio, started: Instant) -> Result<()> {
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let mut app = App::new(config, portfolio, Instant::now());
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    // Channel for async clipboard results
    let (copy_tx, mut copy_rx) = mpsc::unbounded_channel::<CopyResult>();

    let mut first_frame = true;

    // Main loop
    loop {
        // Process finished clipboard writes (non-blocking)
        while let Ok(result) = copy_rx.try_recv() {
            if let CopyResult::Fallback { text, .. } = &result {
                if let Err(e) = write_osc52(terminal.backend_mut(), text) {
                    tracing::warn!("OSC 52 clipboard write failed: {}", e);
                }
            }
            app.on_copy_result(&result, Instant::now());
        }

        let now = Instant::now();
        app.tick(now);

        // Draw UI
        terminal.draw(|frame| render_app(frame, &app, now))?;
        if first_frame {
            tracing::info!("First frame in {} ms", started.elapsed().as_millis());
            first_frame = false;
        }

        // Poll at animation speed while anything is moving
        let event = if app.needs_animation(Instant::now()) {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            let now = Instant::now();
            let effect = match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    app.perform(action, now)
                }
                AppEvent::PointerMoved(column, row) => {
                    app.pointer_moved(column, row);
                    None
                }
                AppEvent::PointerLeft => {
                    app.pointer_left();
                    None
                }
                AppEvent::Click(column, row) => app.click(column, row, now),
                AppEvent::Wheel(lines) => {
                    app.scroll_lines(lines);
                    None
                }
                AppEvent::Resize(width, height) => {
                    app.resize(width, height);
                    None
                }
                AppEvent::Tick => None,
            };

            if let Some(effect) = effect {
                apply_effect(&mut app, effect, &copy_tx, now);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn apply_effect(app: &mut App, effect: Effect, copy_tx: &mpsc::UnboundedSender<CopyResult>, now: Instant) {
    match effect {
        Effect::Copy(text) => spawn_copy(text, copy_tx.clone()),
        Effect::Open(url) => {
            if let Err(e) = open_link(&url) {
                tracing::warn!("Failed to open {}: {}", url, e);
                app.set_status(format!("Could not open {}", url), StatusKind::Error, now);
            }
        }
    }
}
