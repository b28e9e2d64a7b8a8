//! Queue navigation used by the audio thread for skips and auto-advance.

/// Position after `current` in a queue of `len` entries.
///
/// `None` means playback should stop: the queue is empty, or the end was
/// reached without repeat.
pub(crate) fn next_position(current: Option<usize>, len: usize, repeat: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(0),
        Some(p) if p + 1 < len => Some(p + 1),
        Some(_) if repeat => Some(0),
        Some(_) => None,
    }
}

/// Position before `current`. At the head of the queue this wraps with
/// repeat and restarts the first entry without it.
pub(crate) fn prev_position(current: Option<usize>, len: usize, repeat: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(0),
        Some(0) if repeat => Some(len - 1),
        Some(0) => Some(0),
        Some(p) => Some(p.min(len) - 1),
    }
}
