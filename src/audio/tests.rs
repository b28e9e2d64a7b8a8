use std::path::{Path, PathBuf};

use super::engine::PlaybackEngine;
use super::player::RodioSession;
use super::queue::{next_position, prev_position};
use super::types::AudioCmd;
use crate::error::EngineError;

#[test]
fn next_position_stops_at_end_without_repeat() {
    assert_eq!(next_position(None, 3, false), Some(0));
    assert_eq!(next_position(Some(0), 3, false), Some(1));
    assert_eq!(next_position(Some(2), 3, false), None);
    assert_eq!(next_position(Some(2), 3, true), Some(0));
    assert_eq!(next_position(None, 0, true), None);
}

#[test]
fn prev_position_wraps_only_with_repeat() {
    assert_eq!(prev_position(Some(2), 3, false), Some(1));
    assert_eq!(prev_position(Some(0), 3, false), Some(0));
    assert_eq!(prev_position(Some(0), 3, true), Some(2));
    assert_eq!(prev_position(None, 3, false), Some(0));
    assert_eq!(prev_position(Some(0), 0, true), None);
}

#[test]
fn session_tags_every_command_with_its_generation() {
    let (mut session, rx) = RodioSession::detached(7);
    session.enqueue(Path::new("/music/a.mp3")).unwrap();
    session.play().unwrap();
    session.set_repeat(true).unwrap();

    let sent: Vec<_> = rx.try_iter().collect();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|e| e.generation == 7));
    assert!(matches!(&sent[0].cmd, AudioCmd::Enqueue(p) if p == &PathBuf::from("/music/a.mp3")));
    assert!(matches!(sent[1].cmd, AudioCmd::Play));
    assert!(matches!(sent[2].cmd, AudioCmd::SetRepeat(true)));
}

#[test]
fn session_paused_flag_follows_transport_calls() {
    let (mut session, _rx) = RodioSession::detached(1);
    // Pausing before anything plays is not a pause.
    session.pause().unwrap();
    assert!(!session.is_paused());

    session.play().unwrap();
    session.pause().unwrap();
    assert!(session.is_paused());

    session.skip_forward().unwrap();
    assert!(!session.is_paused());

    session.pause().unwrap();
    session.stop().unwrap();
    assert!(!session.is_paused());
}

#[test]
fn session_reports_disconnected_audio_thread() {
    let (mut session, rx) = RodioSession::detached(1);
    drop(rx);
    assert!(matches!(session.play(), Err(EngineError::Disconnected)));
    assert!(!session.is_paused());
}

#[test]
fn current_index_ignores_other_generations() {
    let (session, _rx) = RodioSession::detached(3);
    {
        let mut info = session.playback().lock().unwrap();
        info.generation = 2;
        info.index = Some(4);
    }
    assert_eq!(session.current_index(), None);

    session.playback().lock().unwrap().generation = 3;
    assert_eq!(session.current_index(), Some(4));
}

#[test]
fn session_numbers_commands_from_one() {
    let (mut session, rx) = RodioSession::detached(1);
    session.enqueue(Path::new("a.mp3")).unwrap();
    session.play().unwrap();
    let seqs: Vec<u64> = rx.try_iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![1, 2]);
}

#[test]
fn has_ended_waits_for_outstanding_commands() {
    let (mut session, _rx) = RodioSession::detached(5);
    session.play().unwrap();

    {
        let mut info = session.playback().lock().unwrap();
        info.generation = 5;
        info.seq = 1;
        info.ended = true;
    }
    assert!(session.has_ended());

    // A fresh Play has not reached the audio thread yet.
    session.play().unwrap();
    assert!(!session.has_ended());

    session.playback().lock().unwrap().seq = 2;
    assert!(session.has_ended());

    // Info from another session never counts.
    session.playback().lock().unwrap().generation = 4;
    assert!(!session.has_ended());
}
