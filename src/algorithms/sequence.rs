//! Ratcliff/Obershelp sequence-matching ratio
//!
//! `ratio = 2 * M / T`, where `T` is the total number of characters in both
//! strings and `M` the number of characters in the matching blocks. Matching
//! blocks are found by taking the longest common substring, then recursing on
//! the pieces to its left and right. This is the "gestalt pattern matching"
//! behind Python's `difflib.SequenceMatcher.ratio`, without its junk and
//! popularity heuristics.

use ahash::AHashMap;

use super::Similarity;

/// A run of equal characters: `a[a_start..a_start+size] == b[b_start..b_start+size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Sequence-matching ratio calculator
///
/// Stateless calculator - all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceRatio;

impl SequenceRatio {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for SequenceRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        sequence_ratio(a, b)
    }

    fn name(&self) -> &'static str {
        "sequence_ratio"
    }
}

/// Longest matching block within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn find_longest_match(
    a: &[char],
    b_index: &AHashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> MatchingBlock {
    let mut best = MatchingBlock {
        a_start: a_lo,
        b_start: b_lo,
        size: 0,
    };

    // j2len[j] = length of the match ending at a[i - 1] and b[j]
    let mut j2len: AHashMap<usize, usize> = AHashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_j2len: AHashMap<usize, usize> = AHashMap::new();

        if let Some(positions) = b_index.get(c) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }

                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_j2len.insert(j, k);

                if k > best.size {
                    best = MatchingBlock {
                        a_start: i + 1 - k,
                        b_start: j + 1 - k,
                        size: k,
                    };
                }
            }
        }

        j2len = next_j2len;
    }

    best
}

/// All matching blocks between `a` and `b`, ordered by position.
#[must_use]
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchingBlock> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut b_index: AHashMap<char, Vec<usize>> = AHashMap::new();
    for (j, &c) in b_chars.iter().enumerate() {
        b_index.entry(c).or_default().push(j);
    }

    let mut blocks = Vec::new();
    let mut queue = vec![(0, a_chars.len(), 0, b_chars.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
        let block = find_longest_match(&a_chars, &b_index, a_lo, a_hi, b_lo, b_hi);
        if block.size == 0 {
            continue;
        }

        if a_lo < block.a_start && b_lo < block.b_start {
            queue.push((a_lo, block.a_start, b_lo, block.b_start));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < a_hi && b_end < b_hi {
            queue.push((a_end, a_hi, b_end, b_hi));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|block| (block.a_start, block.b_start));
    blocks
}

/// Sequence-matching ratio in [0, 1]; 1.0 for two empty strings.
///
/// # Example
/// ```
/// use simblend::algorithms::sequence::sequence_ratio;
///
/// // blocks "itt" and "n": 2 * 4 / 13
/// assert!((sequence_ratio("kitten", "sitting") - 8.0 / 13.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    if a == b {
        return 1.0;
    }

    let matched: usize = matching_blocks(a, b).iter().map(|block| block.size).sum();
    2.0 * matched as f64 / total as f64
}
