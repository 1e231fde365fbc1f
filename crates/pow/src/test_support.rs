//! Solution fixtures for unit tests. Equihash (150, 5) cannot be solved inside a test, so
//! fixtures use (60, 5): the same tree depth, and windows that are not byte aligned.

use beamhash_consensus::EquihashParams;

use crate::equihash_verify::{leaf_value, xor_trimmed};
use crate::minimal::minimal_from_indices;
use crate::seed::SeedState;

pub(crate) fn small_params() -> EquihashParams {
    EquihashParams::new(60, 5).expect("valid params")
}

pub(crate) fn small_seed(rounds: u32, header: &[u8; 32], nonce: &[u8; 8]) -> SeedState {
    SeedState::with_params(small_params(), rounds, header, nonce)
}

struct Row {
    value: Vec<u8>,
    indices: Vec<u32>,
}

/// Wagner's algorithm over every index, keeping only collisions with disjoint index sets.
pub(crate) fn solve(seed: &SeedState) -> Vec<Vec<u32>> {
    let params = seed.params();
    let trim = params.collision_byte_length();
    let mut rows: Vec<Row> = (0..params.index_limit() as u32)
        .map(|index| Row {
            value: leaf_value(seed, index),
            indices: vec![index],
        })
        .collect();

    for round in 1..=params.k {
        rows.sort_by(|a, b| a.value[..trim].cmp(&b.value[..trim]));
        let mut next = Vec::new();
        for bucket in rows.chunk_by(|a, b| a.value[..trim] == b.value[..trim]) {
            for (pos, a) in bucket.iter().enumerate() {
                for b in &bucket[pos + 1..] {
                    if a.indices.iter().any(|index| b.indices.contains(index)) {
                        continue;
                    }
                    let value = xor_trimmed(&a.value, &b.value, trim);
                    if round == params.k && value.iter().any(|byte| *byte != 0) {
                        continue;
                    }
                    let (left, right) = if a.indices < b.indices { (a, b) } else { (b, a) };
                    let mut indices = left.indices.clone();
                    indices.extend_from_slice(&right.indices);
                    next.push(Row { value, indices });
                }
            }
        }
        rows = next;
    }

    let mut solutions: Vec<Vec<u32>> = rows.into_iter().map(|row| row.indices).collect();
    solutions.sort();
    solutions.dedup();
    solutions
}

/// The first nonce, counting up from zero, whose seed has a solution.
pub(crate) fn find_solution(rounds: u32, header: &[u8; 32]) -> ([u8; 8], Vec<u32>) {
    for counter in 0u64..256 {
        let nonce = counter.to_le_bytes();
        let seed = small_seed(rounds, header, &nonce);
        if let Some(solution) = solve(&seed).into_iter().next() {
            return (nonce, solution);
        }
    }
    panic!("no solution within 256 nonces");
}

pub(crate) fn encode(indices: &[u32]) -> Vec<u8> {
    minimal_from_indices(small_params(), indices).expect("encodable solution")
}
