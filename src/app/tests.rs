use super::*;
use crate::audio::PlaybackInfo;
use crate::controller::{PlaylistView, SessionState};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn app_with(rows: &[&str]) -> App {
    let mut app = App::new();
    app.clear_list();
    for r in rows {
        app.set_list(r);
    }
    app
}

#[test]
fn view_notifications_rebuild_rows() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    assert_eq!(app.rows, vec!["a.mp3", "b.mp3"]);

    app.clear_list();
    app.set_list("b.mp3");
    assert_eq!(app.rows, vec!["b.mp3"]);

    app.playback_changed(SessionState::Paused);
    assert_eq!(app.playback, SessionState::Paused);
}

#[test]
fn selection_wraps_in_both_directions() {
    let mut app = app_with(&["a", "b", "c"]);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.last();
    assert_eq!(app.selected_index(), Some(2));
    app.first();
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn selection_is_clamped_after_rows_shrink() {
    let mut app = app_with(&["a", "b", "c"]);
    app.set_selected(2);
    app.clear_list();
    app.set_list("a");
    assert_eq!(app.selected_index(), Some(0));

    app.clear_list();
    assert_eq!(app.selected_index(), None);
    app.next();
    assert_eq!(app.selected_index(), None);
}

#[test]
fn move_args_translate_selection_to_target_positions() {
    let mut app = app_with(&["a", "b", "c"]);
    app.set_selected(1);
    assert_eq!(app.move_down_args(), Some((1, 3)));
    assert_eq!(app.move_up_args(), Some((1, 1)));

    app.first();
    assert_eq!(app.move_up_args(), None);
    app.last();
    assert_eq!(app.move_down_args(), None);

    assert_eq!(App::new().move_down_args(), None);
}

#[test]
fn elapsed_and_audible_follow_the_handle() {
    let mut app = app_with(&["a", "b"]);

    let handle = Arc::new(Mutex::new(PlaybackInfo::default()));
    app.set_playback_handle(handle.clone());
    assert_eq!(app.elapsed(), None);
    assert!(!app.is_audible());

    {
        let mut info = handle.lock().unwrap();
        info.index = Some(1);
        info.elapsed = Duration::from_secs(7);
        info.playing = true;
    }
    assert!(app.is_audible());
    assert_eq!(app.elapsed(), Some(Duration::from_secs(7)));
}

#[test]
fn sync_now_playing_falls_back_to_file_stem_without_tags() {
    let mut app = app_with(&["first song.mp3", "second.mp3"]);

    app.sync_now_playing(Some(0), Path::new("/nonexistent"));
    let np = app.now_playing.clone().unwrap();
    assert_eq!(np.index, 0);
    assert_eq!(np.label(), "first song");

    app.sync_now_playing(Some(5), Path::new("/nonexistent"));
    assert!(app.now_playing.is_none());
}

#[test]
fn clearing_the_list_forgets_now_playing() {
    let mut app = app_with(&["a.mp3"]);
    app.sync_now_playing(Some(0), Path::new("/nonexistent"));
    assert!(app.now_playing.is_some());
    app.clear_list();
    assert!(app.now_playing.is_none());
}
