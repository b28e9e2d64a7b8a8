//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::controller::SessionState;

// Rendered in this order in the footer.
const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("J/K", "move track down/up"),
    ("gg/G", "top/bottom"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("h/l", "prev/next song"),
    ("r", "repeat"),
    ("d", "remove selected"),
    ("x", "remove playing"),
    ("R", "reload"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn state_text(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Idle",
        SessionState::Stopped => "Stopped",
        SessionState::Paused => "Paused",
        SessionState::Playing => "Playing",
    }
}

/// Build the status line: session state, repeat, now playing and directory.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(" PLAYBACK: {}", state_text(app.playback)));
    parts.push(format!("REPEAT: {}", if app.repeat { "On" } else { "Off" }));

    if let Some(np) = &app.now_playing {
        let elapsed = app.elapsed().unwrap_or_default();
        let time = match np.tags.duration {
            Some(total) => format!("{}/{}", format_mmss(elapsed), format_mmss(total)),
            None => format_mmss(elapsed),
        };
        parts.push(format!("Song: {} [{}]", np.label(), time));
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {dir}"));
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tapedeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let mut status = status_text(app);
    if let Some(msg) = &app.status {
        status.push_str("\n ! ");
        status.push_str(msg);
    }
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list
    {
        // Only build ListItems for the visible window, centred on the selection.
        let total = app.rows.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel = app.selected_index().unwrap_or(0);
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let mut start = sel.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height)
        };

        let playing = app.now_playing.as_ref().map(|np| np.index);
        let marker_on = if app.is_audible() { "♪ " } else { "‖ " };
        let visible_items: Vec<ListItem> = app.rows[start..end]
            .iter()
            .enumerate()
            .map(|(offset, name)| {
                let marker = if playing == Some(start + offset) { marker_on } else { "  " };
                ListItem::new(format!("{marker}{name}"))
            })
            .collect();

        let title = format!(" tracks ({total}) ");
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(sel - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
