//! Levenshtein (edit) distance implementation
//!
//! - Single-row DP for the plain distance
//! - Full distance matrix on request, for inspection and tracing
//! - Longest-alignment tracking for the `RatioLongest` normalization
//! - Optional SIMD backend (`fast-levenshtein` feature) for ASCII input
//!
//! Characters are compared as Unicode scalar values and case-sensitively.
//! Fold case before calling if that is wanted.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{ratio_from_distance, EditDistance};

/// How an edit distance is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditNormalization {
    /// The integer distance itself
    Raw,
    /// `1 - d / max(len_a, len_b)`: normalized by the shortest optimal alignment
    #[default]
    RatioShortest,
    /// `1 - d / L` where `L` is the length of the longest optimal alignment
    RatioLongest,
}

impl EditNormalization {
    /// Whether this mode yields a value in [0, 1]
    #[must_use]
    pub fn is_ratio(self) -> bool {
        !matches!(self, Self::Raw)
    }
}

/// Levenshtein distance calculator
///
/// # Complexity
/// - Time: O(m*n) where m and n are string lengths
/// - Space: O(min(m,n)) using single-row DP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    /// Normalization used by [`EditDistance::similarity`]. `Raw` falls back to
    /// `RatioShortest` there, since a similarity must lie in [0, 1].
    pub normalization: EditNormalization,
    /// Use the SIMD backend for ASCII pairs when it is compiled in
    pub accelerated: bool,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: EditNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn accelerated(mut self, accelerated: bool) -> Self {
        self.accelerated = accelerated;
        self
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        if self.accelerated {
            levenshtein_accelerated(a, b)
        } else {
            levenshtein(a, b)
        }
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        match self.normalization {
            EditNormalization::Raw | EditNormalization::RatioShortest => ratio_from_distance(
                EditDistance::distance(self, a, b),
                a.chars().count(),
                b.chars().count(),
            ),
            EditNormalization::RatioLongest => levenshtein_ratio_longest(a, b),
        }
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

// ============================================================================
// Plain distance
// ============================================================================

/// Standard DP distance over char slices
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Shorter string on the column axis keeps the row small
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Levenshtein distance between two strings.
///
/// # Example
/// ```
/// use simblend::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    dp_distance(&a_chars, &b_chars)
}

#[cfg(feature = "fast-levenshtein")]
#[inline]
fn simd_distance(a: &str, b: &str) -> Option<usize> {
    // triple_accel compares bytes, which equals char comparison only for ASCII
    if a.is_ascii() && b.is_ascii() {
        Some(triple_accel::levenshtein::levenshtein(a.as_bytes(), b.as_bytes()) as usize)
    } else {
        None
    }
}

#[cfg(not(feature = "fast-levenshtein"))]
#[inline]
fn simd_distance(_a: &str, _b: &str) -> Option<usize> {
    None
}

/// Levenshtein distance using the SIMD backend where possible.
///
/// Without the `fast-levenshtein` feature, or for non-ASCII input, this is
/// exactly [`levenshtein`].
#[inline]
#[must_use]
pub fn levenshtein_accelerated(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    simd_distance(a, b).unwrap_or_else(|| levenshtein(a, b))
}

// ============================================================================
// Normalized ratios
// ============================================================================

/// Distance together with the length of the longest optimal alignment.
///
/// Alongside each DP cell we keep the longest alignment that reaches it at
/// minimal cost; a match or substitution, insertion and deletion all add one
/// column to the alignment.
fn distance_and_longest_alignment(a: &[char], b: &[char]) -> (usize, usize) {
    let n = b.len();

    let mut dist: SmallVec<[usize; 64]> = (0..=n).collect();
    let mut span: SmallVec<[usize; 64]> = (0..=n).collect();

    for (i, &ac) in a.iter().enumerate() {
        let mut diag_dist = dist[0];
        let mut diag_span = span[0];
        dist[0] = i + 1;
        span[0] = i + 1;

        for j in 1..=n {
            let up_dist = dist[j];
            let up_span = span[j];

            let insertion = dist[j - 1] + 1;
            let deletion = up_dist + 1;
            let substitution = diag_dist + usize::from(ac != b[j - 1]);
            let best = insertion.min(deletion).min(substitution);

            let mut best_span = 0;
            if insertion == best {
                best_span = best_span.max(span[j - 1] + 1);
            }
            if deletion == best {
                best_span = best_span.max(up_span + 1);
            }
            if substitution == best {
                best_span = best_span.max(diag_span + 1);
            }

            dist[j] = best;
            span[j] = best_span;
            diag_dist = up_dist;
            diag_span = up_span;
        }
    }

    (dist[n], span[n])
}

/// `1 - d / max(len_a, len_b)`; 1.0 for two empty strings.
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    ratio_from_distance(levenshtein(a, b), a.chars().count(), b.chars().count())
}

/// `1 - d / L` with `L` the longest optimal alignment; 1.0 for two empty strings.
///
/// # Example
/// ```
/// use simblend::algorithms::levenshtein::levenshtein_ratio_longest;
///
/// // a-a, b deleted, c-c, d inserted: 2 edits over 4 columns
/// assert_eq!(levenshtein_ratio_longest("abc", "acd"), 0.5);
/// ```
#[must_use]
pub fn levenshtein_ratio_longest(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    let (dist, span) = distance_and_longest_alignment(&a_chars, &b_chars);
    if span == 0 {
        1.0
    } else {
        1.0 - (dist as f64 / span as f64)
    }
}

/// Edit distance between `a` and `b` under the given normalization.
///
/// `Raw` returns the integer distance as `f64`; the ratio modes return a
/// similarity in [0, 1].
///
/// # Example
/// ```
/// use simblend::{edit_distance, EditNormalization};
///
/// assert_eq!(edit_distance("flaw", "lawn", EditNormalization::Raw), 2.0);
/// assert_eq!(edit_distance("", "", EditNormalization::RatioShortest), 1.0);
/// ```
#[must_use]
pub fn edit_distance(a: &str, b: &str, normalization: EditNormalization) -> f64 {
    match normalization {
        EditNormalization::Raw => levenshtein(a, b) as f64,
        EditNormalization::RatioShortest => levenshtein_similarity(a, b),
        EditNormalization::RatioLongest => levenshtein_ratio_longest(a, b),
    }
}

// ============================================================================
// Distance matrix
// ============================================================================

/// One cell of a [`DistanceMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixCell {
    /// Distance between the prefixes ending at this cell
    pub distance: usize,
    /// Character of the second string on this row (`None` on row 0)
    pub row_char: Option<char>,
    /// Character of the first string on this column (`None` on column 0)
    pub col_char: Option<char>,
}

/// Full Levenshtein DP grid.
///
/// Row `y` corresponds to the length-`y` prefix of the second string and
/// column `x` to the length-`x` prefix of the first. Row 0 and column 0 hold
/// the base cases `0..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    width: usize,
    height: usize,
    cells: Vec<MatrixCell>,
}

impl DistanceMatrix {
    /// Number of rows, `len(str2) + 1`
    #[must_use]
    pub fn rows(&self) -> usize {
        self.height
    }

    /// Number of columns, `len(str1) + 1`
    #[must_use]
    pub fn cols(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn get(&self, y: usize, x: usize) -> Option<&MatrixCell> {
        if y < self.height && x < self.width {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// The edit distance (bottom-right cell)
    #[must_use]
    pub fn distance(&self) -> usize {
        self.cells.last().map_or(0, |cell| cell.distance)
    }

    /// Iterate over rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[MatrixCell]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "      ")?;
        for cell in self.iter_rows().next().into_iter().flatten().skip(1) {
            write!(f, "{:>3}", cell.col_char.unwrap_or(' '))?;
        }
        writeln!(f)?;

        for row in self.iter_rows() {
            let label = row.first().and_then(|cell| cell.row_char).unwrap_or(' ');
            write!(f, "{label:>3}")?;
            for cell in row {
                write!(f, "{:>3}", cell.distance)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build the full distance matrix between `str1` (columns) and `str2` (rows).
///
/// # Example
/// ```
/// use simblend::algorithms::levenshtein::levenshtein_matrix;
///
/// let matrix = levenshtein_matrix("kitten", "sitting");
/// assert_eq!(matrix.rows(), 8);
/// assert_eq!(matrix.cols(), 7);
/// assert_eq!(matrix.distance(), 3);
/// ```
#[must_use]
pub fn levenshtein_matrix(str1: &str, str2: &str) -> DistanceMatrix {
    let xs: Vec<char> = str1.chars().collect();
    let ys: Vec<char> = str2.chars().collect();
    let width = xs.len() + 1;
    let height = ys.len() + 1;

    let mut cells: Vec<MatrixCell> = Vec::with_capacity(width * height);
    for y in 0..height {
        let row_char = y.checked_sub(1).map(|i| ys[i]);
        for x in 0..width {
            let col_char = x.checked_sub(1).map(|i| xs[i]);
            let distance = if y == 0 {
                x
            } else if x == 0 {
                y
            } else {
                let left = cells[y * width + x - 1].distance + 1;
                let above = cells[(y - 1) * width + x].distance + 1;
                let diagonal = cells[(y - 1) * width + x - 1].distance + usize::from(xs[x - 1] != ys[y - 1]);
                left.min(above).min(diagonal)
            };
            cells.push(MatrixCell {
                distance,
                row_char,
                col_char,
            });
        }
    }

    let matrix = DistanceMatrix {
        width,
        height,
        cells,
    };
    tracing::trace!(distance = matrix.distance(), "levenshtein matrix\n{matrix}");
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("saturday", "sunday"), 3);
    }

    #[test]
    fn test_levenshtein_unicode() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本語", "日本"), 1);
    }

    #[test]
    fn test_levenshtein_case_sensitive() {
        assert_eq!(levenshtein("Kitten", "kitten"), 1);
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(levenshtein("algorithm", "altruistic"), 6);
        assert_eq!(levenshtein("intention", "execution"), 5);
        assert_eq!(levenshtein("ab", "ba"), 2);
    }

    #[test]
    fn test_empty_ratio_edge_cases() {
        assert_eq!(edit_distance("", "", EditNormalization::RatioShortest), 1.0);
        assert_eq!(edit_distance("", "", EditNormalization::RatioLongest), 1.0);
        assert_eq!(edit_distance("", "", EditNormalization::Raw), 0.0);
        assert_eq!(edit_distance("abc", "", EditNormalization::RatioShortest), 0.0);
        assert_eq!(edit_distance("", "abc", EditNormalization::RatioLongest), 0.0);
    }

    #[test]
    fn test_ratio_modes() {
        let shortest = edit_distance("abc", "acd", EditNormalization::RatioShortest);
        assert!((shortest - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(edit_distance("abc", "acd", EditNormalization::RatioLongest), 0.5);

        let kitten = edit_distance("kitten", "sitting", EditNormalization::RatioShortest);
        assert!((kitten - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_longest_alignment_never_shorter_than_longest_input() {
        let a: Vec<char> = "sunday".chars().collect();
        let b: Vec<char> = "saturday".chars().collect();
        let (dist, span) = distance_and_longest_alignment(&a, &b);
        assert_eq!(dist, 3);
        assert!(span >= 8);
    }

    #[test]
    fn test_matrix_base_cases_and_recurrence() {
        let m = levenshtein_matrix("abc", "ab");
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        for x in 0..4 {
            assert_eq!(m.get(0, x).unwrap().distance, x);
        }
        for y in 0..3 {
            assert_eq!(m.get(y, 0).unwrap().distance, y);
        }
        let cell = m.get(2, 3).unwrap();
        assert_eq!(cell.row_char, Some('b'));
        assert_eq!(cell.col_char, Some('c'));
        assert_eq!(m.distance(), 1);
        assert!(m.get(3, 0).is_none());
    }

    #[test]
    fn test_matrix_matches_plain_distance() {
        for (a, b) in [("kitten", "sitting"), ("flaw", "lawn"), ("", "xyz"), ("same", "same")] {
            assert_eq!(levenshtein_matrix(a, b).distance(), levenshtein(a, b));
        }
    }

    #[test]
    fn test_matrix_display() {
        let rendered = levenshtein_matrix("ab", "a").to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "        a  b");
        assert_eq!(lines[1], "     0  1  2");
        assert_eq!(lines[2], "  a  1  0  1");
    }

    #[test]
    fn test_struct_similarity() {
        let lev = Levenshtein::new();
        assert_eq!(EditDistance::distance(&lev, "flaw", "lawn"), 2);
        assert_eq!(EditDistance::similarity(&lev, "flaw", "lawn"), 0.5);

        let longest = Levenshtein::new().with_normalization(EditNormalization::RatioLongest);
        assert_eq!(EditDistance::similarity(&longest, "abc", "acd"), 0.5);
    }

    #[test]
    fn test_accelerated_agrees_with_dp() {
        for (a, b) in [("kitten", "sitting"), ("naïve", "naive"), ("", "abc"), ("flaw", "lawn")] {
            assert_eq!(levenshtein_accelerated(a, b), levenshtein(a, b));
        }
    }
}
