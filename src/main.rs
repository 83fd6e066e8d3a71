//! Terminal entry point.
//!
//! Wires the library together and runs the event loop:
//!
//! ```text
//! ┌──────────────┐  keys   ┌──────────────┐ transitions ┌──────────────┐
//! │  crossterm   │────────▶│ handle_event │────────────▶│    Store     │
//! │ EventStream  │         └──────────────┘             └──────────────┘
//! └──────────────┘                ▲                      │ commits
//!                                 │ StoreChanged         ▼
//!                                 └──────────── orchestrator, bridge, loop
//! ```
//!
//! The runtime is single-threaded: the loop, the orchestrator routines, the
//! persistence bridge and the activation timer all share one tokio thread.
//!
//! # Keybindings
//!
//! Browse:
//! - Arrows: move focus between controls, cards and pagination
//! - `Enter`: activate the focused control, open a card, change page
//! - `Esc`: clear the search and return to Popular
//! - Printable characters and `Backspace`: edit the query (search box only)
//!
//! Details:
//! - `Up`/`Down`: scroll
//! - `Right`: switch between Back and Favorite
//! - `Enter`: activate, `Esc`/`Left`: back
//!
//! `Ctrl+C` quits from anywhere.

use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use futures_util::StreamExt;
use moviedeck::app::{handle_event, Action, AppState, Event};
use moviedeck::domain::Result;
use moviedeck::focus::Key;
use moviedeck::gateway::{MovieGateway, TmdbGateway};
use moviedeck::orchestrator::{Orchestrator, OrchestratorConfig, TimerKey, TimerTable};
use moviedeck::storage::{JsonFileStore, KeyValueStore, MemoryStore, PersistenceBridge};
use moviedeck::{observability, ui, Config, Store};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;

const FAVORITES_FILE: &str = "favorites.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("moviedeck: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir();
    observability::init_tracing(&config, &data_dir);
    tracing::info!(data_dir = %data_dir.display(), "starting moviedeck");

    let gateway: Arc<dyn MovieGateway> = Arc::new(TmdbGateway::new(&config)?);
    let store = Store::default();

    let mut bridge = PersistenceBridge::new(store.clone(), open_backend(&data_dir));
    bridge.hydrate();
    let bridge_task = tokio::spawn(bridge.run(store.subscribe()));
    let orchestrator = Orchestrator::spawn(&store, gateway, OrchestratorConfig::from(&config));

    let mut state = moviedeck::initialize(&config, store);

    let result = match TerminalGuard::enter() {
        Ok(guard) => {
            let result = event_loop(&mut state).await;
            drop(guard);
            result
        }
        Err(e) => Err(e.into()),
    };

    orchestrator.shutdown();
    bridge_task.abort();
    tracing::info!("moviedeck stopped");
    result
}

/// Favorites document in the data directory, or memory if it cannot be opened.
fn open_backend(data_dir: &Path) -> Box<dyn KeyValueStore> {
    match JsonFileStore::open(data_dir.join(FAVORITES_FILE)) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "favorites document unavailable, keeping favorites in memory");
            Box::new(MemoryStore::default())
        }
    }
}

async fn event_loop(state: &mut AppState) -> Result<()> {
    let mut terminal_events = EventStream::new();
    let mut commits = state.store.subscribe();
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut timers = TimerTable::default();

    let (cols, rows) = terminal::size()?;
    let mut pending = vec![
        Event::Resize { rows: usize::from(rows), cols: usize::from(cols) },
        Event::Mount,
    ];

    loop {
        let mut redraw = false;
        for event in pending.drain(..) {
            let (changed, actions) = handle_event(state, &event)?;
            redraw |= changed;

            for action in actions {
                match action {
                    Action::ScheduleActivation { category, delay } => {
                        let tx = timer_tx.clone();
                        timers.schedule(TimerKey::CategoryActivation, delay, async move {
                            let _ = tx.send(Event::ActivationElapsed(category));
                        });
                    }
                    Action::CancelActivation => {
                        timers.cancel(&TimerKey::CategoryActivation);
                    }
                    Action::Quit => return Ok(()),
                }
            }
        }

        if redraw {
            let frame = ui::render(state);
            let mut stdout = io::stdout().lock();
            stdout.write_all(frame.as_bytes())?;
            stdout.flush()?;
        }

        tokio::select! {
            maybe_event = terminal_events.next() => match maybe_event {
                Some(Ok(event)) => pending.extend(translate(&event)),
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            Some(_) = commits.recv() => {
                // Collapse a burst of commits into one redraw.
                while commits.try_recv().is_ok() {}
                pending.push(Event::StoreChanged);
            },
            Some(event) = timer_rx.recv() => pending.push(event),
        }
    }
}

/// Maps a terminal event to application events.
fn translate(event: &TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind != KeyEventKind::Release => translate_key(key),
        TermEvent::Resize(cols, rows) => Some(Event::Resize {
            rows: usize::from(*rows),
            cols: usize::from(*cols),
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Event::Quit);
    }

    let event = match key.code {
        KeyCode::Up => Event::Key(Key::Up),
        KeyCode::Down => Event::Key(Key::Down),
        KeyCode::Left => Event::Key(Key::Left),
        KeyCode::Right => Event::Key(Key::Right),
        KeyCode::Enter => Event::Key(Key::Enter),
        KeyCode::Esc => Event::Key(Key::Escape),
        KeyCode::Tab | KeyCode::BackTab => Event::Key(Key::Tab),
        KeyCode::Backspace => Event::Backspace,
        KeyCode::Char(c) => Event::Char(c),
        _ => return None,
    };
    Some(event)
}

/// Raw mode and the alternate screen for as long as the guard lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
