/// Where a playback session stands, as tracked by the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Created but never started.
    #[default]
    Idle,
    Stopped,
    Paused,
    Playing,
}

/// Presentation layer fed by the controller.
///
/// The controller never reads from the view. A reload sends one
/// `clear_list` followed by one `set_list` per entry, in playlist order.
pub trait PlaylistView {
    fn clear_list(&mut self);
    fn set_list(&mut self, name: &str);
    fn playback_changed(&mut self, _state: SessionState) {}
}
