use beamhash_pow::difficulty::{
    decode_target, target_reached, try_decode_target, Difficulty, DifficultyError,
};
use primitive_types::{U256, U512};

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_digest(&mut self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for chunk in out.chunks_mut(8) {
            chunk.copy_from_slice(&self.next_u64().to_be_bytes());
        }
        out
    }

    /// Packed difficulty biased toward the valid range so both halves get exercised.
    fn next_difficulty(&mut self) -> u32 {
        let packed = self.next_u32();
        if packed & 1 == 0 {
            packed % 0xe800_0000
        } else {
            packed
        }
    }
}

#[test]
fn decoding_is_monotonic() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..2_000 {
        let a = rng.next_difficulty();
        let b = rng.next_difficulty();
        let (easier, harder) = if a <= b { (a, b) } else { (b, a) };
        assert!(
            decode_target(easier) >= decode_target(harder),
            "{easier:#010x} vs {harder:#010x}"
        );
    }
}

#[test]
fn decoding_is_monotonic_across_order_boundaries() {
    for order in 0u32..232 {
        let last_of_order = (order << 24) | 0x00ff_ffff;
        let next = last_of_order.wrapping_add(1);
        assert!(decode_target(last_of_order) >= decode_target(next));
        assert!(decode_target(order << 24) > decode_target(last_of_order));
    }
}

#[test]
fn raising_difficulty_never_turns_a_miss_into_a_hit() {
    let mut rng = Lcg::new(42);
    for _ in 0..2_000 {
        let digest = rng.next_digest();
        let a = rng.next_difficulty();
        let b = rng.next_difficulty();
        let (easier, harder) = if a <= b { (a, b) } else { (b, a) };
        let hit_easier = target_reached(&digest, &decode_target(easier));
        let hit_harder = target_reached(&digest, &decode_target(harder));
        assert!(hit_easier || !hit_harder);
    }
}

#[test]
fn target_matches_product_rule() {
    // A digest reaches D exactly when digest * D < 2^280.
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let packed = rng.next_u32() % 0x2000_0000;
        let raw = Difficulty(packed).raw().expect("valid difficulty");
        let target = decode_target(packed);

        let limit = U512::one() << 280;
        let target = U512::from(target);
        let raw = U512::from(raw);
        assert!(target * raw < limit);
        assert!((target + U512::one()) * raw >= limit);
    }
}

#[test]
fn packing_roundtrips() {
    let mut rng = Lcg::new(99);
    for _ in 0..1_000 {
        let packed = rng.next_u32() % 0xe800_0000;
        let difficulty = Difficulty(packed);
        assert_eq!(
            Difficulty::from_raw(difficulty.raw().expect("valid")),
            difficulty
        );
    }
}

#[test]
fn malformed_encodings_report_and_fail_closed() {
    assert_eq!(
        try_decode_target(0xe800_0000),
        Err(DifficultyError::Malformed {
            packed: 0xe800_0000
        })
    );
    assert_eq!(decode_target(0xffff_ffff), U256::zero());
    assert!(!target_reached(&[0u8; 32], &U256::zero()));
}
