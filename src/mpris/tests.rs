use super::*;
use crate::library::TrackTags;
use std::sync::mpsc;
use std::time::Duration;

fn now_playing() -> NowPlaying {
    NowPlaying {
        index: 7,
        name: "test.mp3".to_string(),
        tags: TrackTags {
            title: Some("Test Title".to_string()),
            artist: Some("Test Artist".to_string()),
            album: Some("Test Album".to_string()),
            duration: Some(Duration::from_micros(1_234_567)),
        },
    }
}

fn player() -> (PlayerIface, Arc<Mutex<SharedState>>, mpsc::Receiver<ControlCmd>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    (iface, state, rx)
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_track_metadata(Some(&now_playing()), Path::new("/tmp/music"));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert_eq!(s.album.as_deref(), Some("Test Album"));
        assert_eq!(s.url.as_deref(), Some("file:///tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, Path::new("/tmp/music"));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn untagged_track_uses_file_stem_as_title() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };
    let mut np = now_playing();
    np.tags = TrackTags::default();

    handle.set_track_metadata(Some(&np), Path::new("/tmp"));

    let s = state.lock().unwrap();
    assert_eq!(s.title.as_deref(), Some("test"));
    assert!(s.artist.is_empty());
}

#[test]
fn playback_status_maps_session_state() {
    let (iface, state, _rx) = player();

    for (playback, expected) in [
        (SessionState::Idle, "Stopped"),
        (SessionState::Stopped, "Stopped"),
        (SessionState::Playing, "Playing"),
        (SessionState::Paused, "Paused"),
    ] {
        state.lock().unwrap().playback = playback;
        assert_eq!(iface.playback_status(), expected);
    }
}

#[test]
fn loop_status_reflects_and_requests_repeat() {
    let (mut iface, state, rx) = player();
    assert_eq!(iface.loop_status(), "None");

    state.lock().unwrap().repeat = true;
    assert_eq!(iface.loop_status(), "Playlist");

    iface.set_loop_status("None".to_string());
    iface.set_loop_status("Track".to_string());
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::SetRepeat(false));
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::SetRepeat(true));
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (iface, state, _rx) = player();
    let handle = MprisHandle {
        state: state.clone(),
    };
    handle.set_track_metadata(Some(&now_playing()), Path::new("/tmp"));

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn player_methods_forward_control_commands() {
    let (iface, _state, rx) = player();
    iface.play_pause();
    iface.next();
    iface.stop();
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::PlayPause);
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::Next);
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::Stop);
}
