mod common;

use common::FixedRandom;
use podsampler::utils::*;

/// Random source whose index draws ignore the requested bound.
struct OutOfRange(usize);

impl Randomness for OutOfRange {
    fn index(&mut self, _len: usize) -> usize {
        self.0
    }

    fn gaussian(&mut self) -> f64 {
        0.0
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_opaque_id() {
    let a = generate_opaque_id();
    let b = generate_opaque_id();
    assert_eq!(a.len(), 48);
    assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(a, b);
}

#[test]
fn test_preview_start_short_episode_starts_at_zero() {
    for length in 0..DEFAULT_MIN_TAIL_SECS {
        for draw in [-3.0, 0.0, 3.0] {
            let mut random = FixedRandom::new(0, draw);
            assert_eq!(
                compute_preview_start(length, DEFAULT_MIN_TAIL_SECS, &mut random),
                0,
                "length {} draw {}",
                length,
                draw
            );
        }
    }
}

#[test]
fn test_preview_start_at_mean_is_midpoint() {
    let mut random = FixedRandom::new(0, 0.0);
    assert_eq!(compute_preview_start(200, 45, &mut random), 100);
}

#[test]
fn test_preview_start_large_draw_is_clamped_to_tail() {
    let mut random = FixedRandom::new(0, 10.0);
    assert_eq!(compute_preview_start(200, 45, &mut random), 155);
}

#[test]
fn test_preview_start_large_negative_draw_is_clamped_to_zero() {
    let mut random = FixedRandom::new(0, -10.0);
    assert_eq!(compute_preview_start(200, 45, &mut random), 0);
}

#[test]
fn test_preview_start_uses_integer_third_and_rounds_half_up() {
    // 200 / 3 = 66, 0.75 * 66 = 49.5 -> 50
    let mut random = FixedRandom::new(0, 0.75);
    assert_eq!(compute_preview_start(200, 45, &mut random), 150);

    // -0.75 * 66 = -49.5 -> -49
    let mut random = FixedRandom::new(0, -0.75);
    assert_eq!(compute_preview_start(200, 45, &mut random), 51);
}

#[test]
fn test_preview_start_with_extreme_draws_stays_in_bounds() {
    for (draw, expected) in [
        (f64::INFINITY, 155),
        (1e300, 155),
        (f64::MAX, 155),
        (f64::NEG_INFINITY, 0),
        (-1e300, 0),
        (f64::NAN, 0),
    ] {
        let mut random = FixedRandom::new(0, draw);
        assert_eq!(
            compute_preview_start(200, 45, &mut random),
            expected,
            "draw {}",
            draw
        );
    }
}

#[test]
fn test_preview_start_on_longest_episode() {
    let mut random = FixedRandom::new(0, f64::INFINITY);
    assert_eq!(
        compute_preview_start(u32::MAX, 45, &mut random),
        u32::MAX - 45
    );

    let mut random = FixedRandom::new(0, 0.0);
    assert_eq!(
        compute_preview_start(u32::MAX, 45, &mut random),
        u32::MAX / 2
    );
}

#[test]
fn test_preview_start_at_exact_tail_length() {
    let mut random = FixedRandom::new(0, 1.0);
    assert_eq!(compute_preview_start(45, 45, &mut random), 0);
}

#[test]
fn test_preview_start_stays_in_bounds_for_random_draws() {
    let mut random = SeededRandom::from_seed(7);
    for length in [45, 46, 60, 200, 1800, 7200] {
        for _ in 0..500 {
            let start = compute_preview_start(length, DEFAULT_MIN_TAIL_SECS, &mut random);
            assert!(start <= length - DEFAULT_MIN_TAIL_SECS);
            assert!(start <= length);
        }
    }
}

#[test]
fn test_pick_random_empty() {
    let mut random = SeededRandom::from_seed(1);
    let items: Vec<u32> = Vec::new();
    assert_eq!(pick_random(&items, &mut random), None);
}

#[test]
fn test_pick_random_single() {
    let mut random = SeededRandom::from_seed(2);
    for _ in 0..100 {
        assert_eq!(pick_random(&["only"], &mut random), Some(&"only"));
    }
}

#[test]
fn test_pick_random_wraps_out_of_range_index() {
    let items = ['a', 'b', 'c'];
    assert_eq!(pick_random(&items, &mut OutOfRange(3)), Some(&'a'));
    assert_eq!(pick_random(&items, &mut OutOfRange(7)), Some(&'b'));
    assert_eq!(pick_random(&items, &mut OutOfRange(usize::MAX)), Some(&'a'));
}

#[test]
fn test_pick_random_is_roughly_uniform() {
    let mut random = SeededRandom::from_seed(3);
    let items = ['a', 'b', 'c'];
    let mut counts = [0usize; 3];
    let trials = 30_000;

    for _ in 0..trials {
        match pick_random(&items, &mut random) {
            Some('a') => counts[0] += 1,
            Some('b') => counts[1] += 1,
            Some('c') => counts[2] += 1,
            other => panic!("unexpected pick {:?}", other),
        }
    }

    let expected = trials / 3;
    for count in counts {
        let deviation = count.abs_diff(expected) as f64 / expected as f64;
        assert!(deviation < 0.05, "counts {:?}", counts);
    }
}

#[test]
fn test_seeded_gaussian_is_reproducible() {
    let mut a = SeededRandom::from_seed(42);
    let mut b = SeededRandom::from_seed(42);
    for _ in 0..10 {
        assert_eq!(a.gaussian(), b.gaussian());
    }
}
