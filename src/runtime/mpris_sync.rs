use crate::mpris::MprisHandle;
use crate::runtime::Deck;

pub fn update_mpris(mpris: &MprisHandle, deck: &Deck) {
    mpris.set_track_metadata(deck.view().now_playing.as_ref(), deck.base_dir());
    mpris.set_playback(deck.state());
    mpris.set_repeat(deck.repeat());
}
