use multiset_ans_rs::codecs::{Multiset, NestedMultiset, Uniform};
use multiset_ans_rs::{AnsState, Canonical, Codec, Tree};

/// A corpus of ten JSON-object-like records, each a multiset of up to
/// seventeen `(field, value)` pairs, stored as an outer multiset over
/// `Canonical<(String, u32)>` so record identity ignores field order.
#[test]
fn outer_multiset_of_canonical_inner_multisets_ignores_inner_build_order() {
    let record_a = Canonical::new(Tree::build_multiset([
        ("age".to_string(), 30u32),
        ("id".to_string(), 7),
        ("active".to_string(), 1),
    ]));
    let record_a_reordered = Canonical::new(Tree::build_multiset([
        ("id".to_string(), 7u32),
        ("active".to_string(), 1),
        ("age".to_string(), 30),
    ]));
    assert_eq!(record_a, record_a_reordered);

    let record_b = Canonical::new(Tree::build_multiset([("id".to_string(), 8u32)]));

    let outer_one_order = Tree::build_multiset([record_a.clone(), record_b.clone()]);
    let outer_other_order = Tree::build_multiset([record_b, record_a_reordered]);

    assert!(outer_one_order.check_multiset_equality(&outer_other_order));
}

#[test]
fn canonical_ordering_is_total_and_consistent_with_equality() {
    let records: Vec<Canonical<u32>> = vec![
        Canonical::new(Tree::build_multiset([1, 2, 2])),
        Canonical::new(Tree::build_multiset([1, 2])),
        Canonical::new(Tree::build_multiset([2, 2, 1])),
    ];
    let mut sorted = records.clone();
    sorted.sort();

    assert_eq!(sorted[1], sorted[2]);
    assert!(sorted[0] < sorted[1]);
}

/// The genuine two-level bits-back roundtrip named in §8: an outer multiset
/// of records, each record itself a multiset coded by [`NestedMultiset`],
/// goes through `encode`/`decode` and comes back equal as a multiset at
/// *both* levels — the inner records' element order and the outer records'
/// build order are both free to differ.
#[test]
fn outer_multiset_of_nested_multisets_round_trips_through_encode_and_decode() {
    let record_a = Tree::build_multiset([30u64, 7, 1]);
    let record_b = Tree::build_multiset([8u64]);
    let record_c = Tree::build_multiset([2u64, 2, 9, 9, 9]);
    let record_d: Tree<u64> = Tree::Empty;
    let outer = Tree::build_multiset([
        Canonical::new(record_a),
        Canonical::new(record_b),
        Canonical::new(record_c),
        Canonical::new(record_d),
    ]);

    let record_codec = NestedMultiset::new(Uniform::new(32), 16);
    let corpus_codec = Multiset::new(record_codec, outer.size() as usize);

    let mut state = AnsState::base_message(1);
    corpus_codec.encode(&mut state, &outer).unwrap();
    let decoded = corpus_codec.decode(&mut state).unwrap();

    assert!(decoded.check_multiset_equality(&outer));
}

#[test]
fn ten_record_corpus_round_trips_through_sequence_and_sort() {
    let corpus: Vec<Canonical<u32>> = (0u32..10)
        .map(|i| Canonical::new(Tree::build_multiset((0u32..(i % 17) + 1).collect::<Vec<_>>())))
        .collect();
    let outer = Tree::build_multiset(corpus.clone());

    let mut flattened = outer.to_sequence();
    let mut expected = corpus;
    flattened.sort();
    expected.sort();
    assert_eq!(flattened, expected);
}
