//! End-to-end scenarios through the facade.

use contig::prelude::*;
use contig::scan;
use contig_test_utils::VecManager;

#[test]
fn index_of_and_last_index_of_on_a_view() {
    let data = [5, 3, 9, 1, 3];
    let view = View::from_slice(&data);
    assert_eq!(view.index_of(3), Some(1));
    assert_eq!(view.last_index_of(3), Some(4));
    assert_eq!(view.index_of(7), None);
}

#[test]
fn binary_search_reports_insertion_point() {
    let data = [1, 3, 5, 9];
    let view = View::from_slice(&data);
    assert_eq!(view.binary_search(&3), 1);
    let absent = view.binary_search(&4);
    assert_eq!(absent, -3);
    assert_eq!(!absent, 2);
    assert_eq!(scan::decode_search_result(absent), Err(2));
}

#[test]
fn shorter_run_with_equal_prefix_compares_less() {
    let a = View::from_slice(&[1, 2, 3]);
    let b = [1, 2, 3, 4];
    assert!(a.sequence_compare_to(&b) < 0);
    assert!(scan::sequence_compare_to(&b, a.as_slice()) > 0);
}

#[test]
fn sliced_handle_view_starts_at_slice_offset() {
    let elements: Vec<i64> = (0..10).map(|i| i * 11).collect();
    let handle = Handle::from_vec(elements.clone());
    let window = handle.slice(3, 4).unwrap();
    let view = window.as_view().unwrap();
    assert_eq!(view.len(), 4);
    assert_eq!(view[0], elements[3]);
    assert_eq!(view.as_slice(), &elements[3..7]);
}

#[test]
fn mutation_through_pinned_address_reaches_handle() {
    let handle = Handle::from_vec(vec![0u16; 8]);
    let pin = handle.slice_from(2).unwrap().pin().unwrap();
    let address = pin.as_mut_ptr();
    {
        // SAFETY: the pin keeps six initialized elements fixed at
        // `address`; no handle view is live while the raw view writes.
        let mut raw: View<'_, u16> = unsafe { View::from_raw_parts(address, pin.len()) };
        assert!(raw.is_raw());
        raw.fill(7);
        raw[5] = 42;
    }
    pin.release();
    assert_eq!(handle.pin_count(), 0);
    let view = handle.as_read_only_view().unwrap();
    assert_eq!(view.as_slice(), &[0, 0, 7, 7, 7, 7, 7, 42]);
}

#[test]
fn manager_backed_handle_round_trip() {
    let manager = VecManager::new(vec![b'a', b'b', b'c', b'd']);
    let counters = manager.counters();
    let handle = Handle::from_manager(manager);
    assert_eq!(handle.backing_kind(), contig::handle::BackingKind::Manager);
    {
        let pin = handle.slice_from(1).unwrap().pin().unwrap();
        assert_eq!(counters.last_index(), 1);
        assert_eq!(pin.len(), 3);
    }
    assert_eq!(counters.outstanding(), 0);
    assert!(handle.as_read_only_view().unwrap().starts_with(b"ab"));
}

#[test]
fn read_only_views_reject_conflicting_writers() {
    let handle = Handle::from_vec(vec![1u8, 2, 3]);
    let reader = handle.as_read_only_view().unwrap();
    let err = handle.as_view().unwrap_err();
    assert_eq!(err, HandleError::Borrowed { exclusive: true });
    drop(reader);
    assert!(handle.as_view().is_ok());
}

#[test]
fn text_handles_are_searchable() {
    let text = Handle::from_text("hello, contig");
    let guard = text.as_view().unwrap();
    let view = guard.view();
    assert_eq!(view.index_of_seq(b"contig"), Some(7));
    assert_eq!(view.count(b'o'), 2);
}
