use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioBackend;
use crate::controller::PlaylistController;
use crate::mpris::ControlCmd;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

/// The controller as wired up for the terminal player.
pub type Deck = PlaylistController<AudioBackend, App>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    logging::init(&settings.logging);
    if let Some(problem) = &config_problem {
        warn!("{problem}");
    }

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    info!(dir = %dir.display(), "starting");

    let backend = AudioBackend::new(settings.audio.clone())?;
    let mut app = App::new();
    app.set_playback_handle(backend.playback_handle());
    app.set_current_dir(dir.display().to_string());
    if let Some(problem) = config_problem {
        app.set_status(problem);
    }

    let mut deck = PlaylistController::new(backend, app, settings.library.clone())?;
    startup::load_initial(&mut deck, &dir, &settings)?;

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &deck);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&deck);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut deck,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    deck.shutdown();
    info!("stopped");

    run_result
}
