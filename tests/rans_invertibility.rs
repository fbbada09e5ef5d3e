use multiset_ans_rs::AnsState;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn thousand_random_symbols_roundtrip_across_56_lanes() {
    let mut rng = StdRng::seed_from_u64(42);
    let shape = 8 * 7;
    let precision = 1337u64;
    let n_data = 1000;

    let mut state = AnsState::base_message(shape);
    let mut history = Vec::with_capacity(n_data);
    for _ in 0..n_data {
        let mut starts = Vec::with_capacity(shape);
        let mut freqs = Vec::with_capacity(shape);
        for _ in 0..shape {
            let start = rng.gen_range(0..precision);
            let freq = 1 + rng.gen_range(0..(precision - start));
            starts.push(start);
            freqs.push(freq);
        }
        state.encode(0..shape, &starts, &freqs, precision).unwrap();
        history.push((starts, freqs));
    }

    for (starts, freqs) in history.into_iter().rev() {
        let cf = state.decode_cf(0..shape, precision).unwrap();
        for i in 0..shape {
            assert!(starts[i] <= cf[i] && cf[i] < starts[i] + freqs[i]);
        }
        state.decode_pop(0..shape, &starts, &freqs, precision).unwrap();
    }
    assert_eq!(state, AnsState::base_message(shape));
}

#[test]
fn randomized_base_message_is_a_valid_starting_point_for_encode_decode() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = AnsState::base_message_with_rng(3, &mut rng);
    let before = state.clone();

    state.encode(0..3, &[10, 200, 0], &[5, 50, 1], 256).unwrap();
    let cf = state.decode_cf(0..3, 256).unwrap();
    assert!((10..15).contains(&cf[0]));
    assert!((200..250).contains(&cf[1]));
    assert_eq!(cf[2], 0);
    state.decode_pop(0..3, &[10, 200, 0], &[5, 50, 1], 256).unwrap();

    assert_eq!(state, before);
}

#[test]
fn flatten_and_unflatten_preserve_state_across_many_lanes() {
    let mut state = AnsState::base_message(5);
    for lane in 0..5 {
        state.encode(lane..lane + 1, &[lane as u64 * 10], &[1], 50).unwrap();
    }
    let flat = state.flatten();
    let restored = AnsState::unflatten(&flat, 5).unwrap();
    assert_eq!(restored, state);
    assert_eq!(state.calculate_state_bits(), 32 * flat.len() as u64);
}
