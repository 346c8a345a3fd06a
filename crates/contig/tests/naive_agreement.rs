//! Views and handles agree with naive linear scans at every vector width.

use contig::prelude::*;
use contig::scan;
use contig_test_utils::naive::{
    naive_compare_sign, naive_count, naive_index_of, naive_index_of_any, naive_index_of_seq,
    naive_insertion_point, naive_last_index_of, naive_last_index_of_any, naive_last_index_of_seq,
};
use proptest::prelude::*;

fn scanners() -> Vec<Scanner> {
    [VectorWidth::Scalar, VectorWidth::V128, VectorWidth::V256]
        .into_iter()
        .map(|w| Scanner::new(&ScanConfig::with_max_width(w)))
        .collect()
}

proptest! {
    #[test]
    fn handle_views_scan_like_naive(
        data in proptest::collection::vec(0u8..6, 0..160),
        start in 0usize..8,
        value in 0u8..6,
        values in proptest::collection::vec(0u8..6, 0..4),
    ) {
        let start = start.min(data.len());
        let handle = Handle::from_vec(data.clone());
        let window = handle.slice_from(start).unwrap();
        let guard = window.as_read_only_view().unwrap();
        let view = guard.view();
        let expected = &data[start..];

        prop_assert_eq!(view.index_of(value), naive_index_of(expected, &value));
        prop_assert_eq!(view.last_index_of(value), naive_last_index_of(expected, &value));
        prop_assert_eq!(view.index_of_any(&values), naive_index_of_any(expected, &values));
        prop_assert_eq!(view.last_index_of_any(&values), naive_last_index_of_any(expected, &values));
        prop_assert_eq!(view.count(value), naive_count(expected, &value));
    }

    #[test]
    fn scanners_search_sequences_like_naive(
        hay in proptest::collection::vec(0u16..3, 0..120),
        needle in proptest::collection::vec(0u16..3, 0..5),
    ) {
        for s in scanners() {
            prop_assert_eq!(s.index_of_seq(&hay, &needle), naive_index_of_seq(&hay, &needle));
            prop_assert_eq!(
                s.last_index_of_seq(&hay, &needle),
                naive_last_index_of_seq(&hay, &needle)
            );
        }
    }

    #[test]
    fn scanners_compare_like_naive(
        a in proptest::collection::vec(0u32..3, 0..90),
        b in proptest::collection::vec(0u32..3, 0..90),
    ) {
        for s in scanners() {
            prop_assert_eq!(s.sequence_compare_to(&a, &b).cmp(&0), naive_compare_sign(&a, &b));
        }
    }

    #[test]
    fn binary_search_encodes_naive_insertion_point(
        mut keys in proptest::collection::vec(any::<i32>(), 0..100),
        probe in any::<i32>(),
    ) {
        keys.sort_unstable();
        keys.dedup();
        let view = View::from_slice(&keys);
        let result = view.binary_search(&probe);
        match keys.binary_search(&probe) {
            Ok(i) => prop_assert_eq!(result, i as isize),
            Err(_) => {
                prop_assert!(result < 0);
                prop_assert_eq!(!result as usize, naive_insertion_point(&keys, &probe));
                prop_assert_eq!(scan::decode_search_result(result), Err(naive_insertion_point(&keys, &probe)));
            }
        }
    }
}
