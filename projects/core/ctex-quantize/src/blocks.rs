//! Codebook quantization of 2x2 blocks for vector-quantized textures.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use ctex_common::layout::vq::VqBlock;
use ctex_common::{Color8888, TextureError, TextureResult};

/// Training rounds of the k-means refinement.
const ITERATIONS: usize = 8;

/// Distinct blocks used to train the codebook; larger inputs are sampled evenly.
const TRAINING_LIMIT: usize = 4096;

/// Blocks reduced to a codebook and one index per block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedBlocks {
    /// Codebook entries.
    pub codebook: Vec<VqBlock>,
    /// Codebook index of each input block, in input order.
    pub indices: Vec<u8>,
}

/// Reduces `blocks` to a codebook of at most `max_entries` entries.
///
/// When there are no more distinct blocks than entries, the codebook holds the distinct
/// blocks in first-occurrence order and the mapping is lossless. Otherwise a k-means
/// refinement seeded with evenly spaced distinct blocks picks the entries. The result is
/// deterministic.
///
/// # Errors
///
/// [`TextureError::InvalidDimensions`] if `blocks` is empty or `max_entries` is outside
/// `1..=256`.
pub fn quantize_blocks(blocks: &[VqBlock], max_entries: usize) -> TextureResult<QuantizedBlocks> {
    if blocks.is_empty() {
        return Err(TextureError::dimensions(0, 0, "cannot quantize an empty image"));
    }
    if max_entries == 0 || max_entries > 256 {
        return Err(TextureError::dimensions(
            max_entries as u32,
            1,
            "codebook size must be between 1 and 256",
        ));
    }

    let mut lookup: BTreeMap<VqBlock, usize> = BTreeMap::new();
    let mut distinct: Vec<VqBlock> = Vec::new();
    for block in blocks {
        if !lookup.contains_key(block) {
            lookup.insert(*block, distinct.len());
            distinct.push(*block);
        }
    }

    if distinct.len() <= max_entries {
        tracing::debug!(entries = distinct.len(), "codebook built from distinct blocks");
        let indices = blocks
            .iter()
            .map(|block| lookup.get(block).map_or(0, |&i| i as u8))
            .collect();
        return Ok(QuantizedBlocks {
            codebook: distinct,
            indices,
        });
    }

    let training: Vec<VqBlock> = if distinct.len() > TRAINING_LIMIT {
        (0..TRAINING_LIMIT)
            .map(|i| distinct[i * distinct.len() / TRAINING_LIMIT])
            .collect()
    } else {
        distinct.clone()
    };

    let mut codebook: Vec<VqBlock> = (0..max_entries)
        .map(|i| training[i * training.len() / max_entries])
        .collect();

    for _ in 0..ITERATIONS {
        let mut sums = alloc::vec![[0u64; 16]; codebook.len()];
        let mut counts = alloc::vec![0u64; codebook.len()];
        for block in &training {
            let index = nearest_entry(&codebook, block);
            counts[index] += 1;
            for (sum, value) in sums[index].iter_mut().zip(flatten(block)) {
                *sum += value as u64;
            }
        }
        for ((entry, sum), &count) in codebook.iter_mut().zip(&sums).zip(&counts) {
            if count == 0 {
                continue;
            }
            let mean: [u8; 16] = core::array::from_fn(|i| ((sum[i] + count / 2) / count) as u8);
            *entry = unflatten(&mean);
        }
    }

    tracing::debug!(
        distinct = distinct.len(),
        entries = codebook.len(),
        "codebook reduced with k-means"
    );
    let indices = blocks
        .iter()
        .map(|block| nearest_entry(&codebook, block) as u8)
        .collect();
    Ok(QuantizedBlocks { codebook, indices })
}

fn flatten(block: &VqBlock) -> [u8; 16] {
    core::array::from_fn(|i| block[i / 4].to_array()[i % 4])
}

fn unflatten(values: &[u8; 16]) -> VqBlock {
    core::array::from_fn(|p| {
        Color8888::new(
            values[p * 4],
            values[p * 4 + 1],
            values[p * 4 + 2],
            values[p * 4 + 3],
        )
    })
}

fn block_distance(a: &VqBlock, b: &VqBlock) -> u32 {
    a.iter().zip(b).map(|(x, y)| x.distance_squared(*y)).sum()
}

fn nearest_entry(codebook: &[VqBlock], block: &VqBlock) -> usize {
    codebook
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| block_distance(entry, block))
        .map_or(0, |(index, _)| index)
}
