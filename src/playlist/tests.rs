use super::*;
use proptest::prelude::*;

fn list(names: &[&str]) -> TrackList {
    names.iter().copied().collect()
}

#[test]
fn move_to_later_position_shifts_between_entries_left() {
    let mut l = list(&["a", "b", "c", "d"]);
    l.move_to(0, 3).unwrap();
    assert_eq!(l, list(&["b", "c", "a", "d"]));
}

#[test]
fn move_to_earlier_position_shifts_between_entries_right() {
    let mut l = list(&["a", "b", "c", "d"]);
    l.move_to(3, 1).unwrap();
    assert_eq!(l, list(&["d", "a", "b", "c"]));
}

#[test]
fn move_to_own_position_is_a_no_op() {
    let mut l = list(&["a", "b", "c"]);
    l.move_to(1, 2).unwrap();
    assert_eq!(l, list(&["a", "b", "c"]));
}

#[test]
fn move_to_last_position_keeps_every_entry() {
    let mut l = list(&["a", "b", "c", "d"]);
    l.move_to(1, 4).unwrap();
    assert_eq!(l, list(&["a", "c", "d", "b"]));
}

#[test]
fn move_to_single_entry_list() {
    let mut l = list(&["only.mp3"]);
    l.move_to(0, 1).unwrap();
    assert_eq!(l, list(&["only.mp3"]));
    assert_eq!(
        l.move_to(0, 2),
        Err(PlaylistError::TargetOutOfRange { position: 2, len: 1 })
    );
}

#[test]
fn move_to_rejects_out_of_range_arguments_without_changing_the_list() {
    let mut l = list(&["a", "b", "c"]);
    assert_eq!(
        l.move_to(3, 1),
        Err(PlaylistError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        l.move_to(0, 0),
        Err(PlaylistError::TargetOutOfRange { position: 0, len: 3 })
    );
    assert_eq!(
        l.move_to(0, 4),
        Err(PlaylistError::TargetOutOfRange { position: 4, len: 3 })
    );
    assert_eq!(l, list(&["a", "b", "c"]));

    let mut empty = TrackList::new();
    assert!(empty.move_to(0, 1).is_err());
}

#[test]
fn get_and_remove_at_reject_out_of_range_for_every_size() {
    for size in 0..4 {
        let mut l: TrackList = (0..size).map(|i| format!("{i}.mp3")).collect();
        assert_eq!(
            l.get(size),
            Err(PlaylistError::IndexOutOfRange { index: size, len: size })
        );
        assert_eq!(
            l.remove_at(size),
            Err(PlaylistError::IndexOutOfRange { index: size, len: size })
        );
        assert_eq!(l.len(), size);
    }
}

#[test]
fn append_allows_duplicates() {
    let mut l = TrackList::new();
    l.append("a.mp3");
    l.append("a.mp3");
    assert_eq!(l.len(), 2);
    assert_eq!(l.get(1).unwrap(), "a.mp3");
}

#[test]
fn remove_at_shifts_later_entries_left() {
    let mut l = list(&["a", "b", "c"]);
    assert_eq!(l.remove_at(0).unwrap(), "a");
    assert_eq!(l.get(0).unwrap(), "b");
    assert_eq!(l.get(1).unwrap(), "c");
}

proptest! {
    #[test]
    fn move_to_places_entry_and_keeps_relative_order(
        names in proptest::collection::vec("[a-z]{1,3}", 1..12),
        source_seed in any::<usize>(),
        target_seed in any::<usize>(),
    ) {
        let len = names.len();
        let source = source_seed % len;
        let target_position = target_seed % len + 1;

        let mut l: TrackList = names.iter().cloned().collect();
        l.move_to(source, target_position).unwrap();

        prop_assert_eq!(l.len(), len);
        prop_assert_eq!(l.get(target_position - 1).unwrap(), names[source].as_str());

        let mut rest_before = names.clone();
        rest_before.remove(source);
        let mut rest_after: Vec<String> = l.as_slice().to_vec();
        rest_after.remove(target_position - 1);
        prop_assert_eq!(rest_before, rest_after);
    }

    #[test]
    fn append_then_remove_restores_list(
        names in proptest::collection::vec("[a-z]{1,3}", 0..8),
        extra in "[a-z]{1,3}",
    ) {
        let mut l: TrackList = names.iter().cloned().collect();
        let before = l.clone();
        l.append(extra.clone());
        let removed = l.remove_at(l.len() - 1).unwrap();
        prop_assert_eq!(removed, extra);
        prop_assert_eq!(l, before);
    }
}
