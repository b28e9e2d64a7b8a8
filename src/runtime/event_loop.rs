use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::config;
use crate::controller::SessionState;
use crate::error::ControllerError;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::Deck;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known session state as emitted to MPRIS.
    pub last_mpris_playback: SessionState,
    pub last_mpris_repeat: bool,
}

impl EventLoopState {
    pub fn new(deck: &Deck) -> Self {
        Self {
            pending_gg: false,
            last_mpris_index: None,
            last_mpris_playback: deck.state(),
            last_mpris_repeat: deck.repeat(),
        }
    }
}

/// Log a failed controller call and show it in the status box.
fn report(deck: &mut Deck, what: &str, result: Result<(), ControllerError>) {
    if let Err(e) = result {
        warn!(error = %e, "{what} failed");
        deck.view_mut().set_status(format!("{what} failed: {e}"));
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    deck: &mut Deck,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Auto-advance and end of queue happen on the audio thread; pick them up here.
        let r = deck.sync_state();
        report(deck, "sync", r);
        let playing = deck.current_index();
        let base_dir = deck.base_dir().to_path_buf();
        deck.view_mut().sync_now_playing(playing, &base_dir);

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        if playing != state.last_mpris_index
            || deck.state() != state.last_mpris_playback
            || deck.repeat() != state.last_mpris_repeat
        {
            update_mpris(mpris, deck);
            state.last_mpris_index = playing;
            state.last_mpris_playback = deck.state();
            state.last_mpris_repeat = deck.repeat();
        }

        terminal.draw(|f| ui::draw(f, deck.view(), &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, deck) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, deck, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply a transport command. Returns `true` when the player should quit.
fn handle_control_cmd(cmd: ControlCmd, deck: &mut Deck) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            let r = deck.play();
            report(deck, "play", r);
        }
        ControlCmd::Pause => {
            let r = deck.pause();
            report(deck, "pause", r);
        }
        ControlCmd::PlayPause => {
            let r = deck.toggle_pause();
            report(deck, "play/pause", r);
        }
        ControlCmd::Stop => {
            let r = deck.stop();
            report(deck, "stop", r);
        }
        ControlCmd::Next => {
            let r = deck.next();
            report(deck, "next", r);
        }
        ControlCmd::Prev => {
            let r = deck.previous();
            report(deck, "previous", r);
        }
        ControlCmd::SetRepeat(repeat) => {
            let r = deck.set_repeat(repeat);
            if r.is_ok() {
                deck.view_mut().repeat = repeat;
            }
            report(deck, "repeat", r);
        }
    }
    false
}

/// Handle one key press. Returns `true` when the player should quit.
fn handle_key_event(
    key: KeyEvent,
    deck: &mut Deck,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                deck.view_mut().first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => deck.view_mut().last(),
        KeyCode::Char('j') | KeyCode::Down => deck.view_mut().next(),
        KeyCode::Char('k') | KeyCode::Up => deck.view_mut().prev(),
        KeyCode::Char('J') => {
            if let Some((source, target)) = deck.view().move_down_args() {
                move_selected(deck, source, target);
            }
        }
        KeyCode::Char('K') => {
            if let Some((source, target)) = deck.view().move_up_args() {
                move_selected(deck, source, target);
            }
        }
        KeyCode::Char('d') => {
            if let Some(sel) = deck.view().selected_index() {
                let r = deck.remove_at(sel).and_then(|_| deck.reload());
                report(deck, "remove", r);
            }
        }
        KeyCode::Char('x') => match deck.remove_current() {
            Ok(Some(name)) => deck.view_mut().set_status(format!("removed {name}")),
            Ok(None) => {}
            Err(e) => report(deck, "remove current", Err(e)),
        },
        KeyCode::Char('R') => {
            let r = deck.reload();
            report(deck, "reload", r);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('s') => {
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('r') => {
            let _ = control_tx.send(ControlCmd::SetRepeat(!deck.repeat()));
        }
        KeyCode::Esc => deck.view_mut().clear_status(),
        _ => {}
    }

    false
}

/// Move the selected row and keep the cursor on it.
fn move_selected(deck: &mut Deck, source: usize, target_position: usize) {
    match deck.move_to(source, target_position) {
        Ok(()) => deck.view_mut().set_selected(target_position - 1),
        Err(e) => report(deck, "move", Err(e)),
    }
}
