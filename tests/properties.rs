//! Property-based tests for the similarity metrics.
//!
//! Edit distance must be a metric:
//!
//! 1. **Identity**: d(x, x) = 0
//! 2. **Symmetry**: d(x, y) = d(y, x)
//! 3. **Triangle inequality**: d(x, z) <= d(x, y) + d(y, z)
//!
//! Every normalized similarity lies in [0, 1] and scores a string against
//! itself as exactly 1.0.

use proptest::prelude::*;
use simblend::algorithms::ngram::{jaccard_similarity, sorensen_similarity};
use simblend::algorithms::sequence::sequence_ratio;
use simblend::{
    edit_distance, graphemic_similarity, levenshtein, levenshtein_matrix, similarity, soundex,
    EditNormalization, NgramConfig, SimilarityConfig,
};

fn arb_string() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{0,20}").unwrap()
}

fn arb_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z]{1,12}").unwrap()
}

fn arb_unicode_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 1..20).prop_map(|chars| chars.into_iter().collect())
}

fn in_unit_range(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

// ============================================================================
// Edit distance
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn levenshtein_identity(a in arb_string()) {
        prop_assert_eq!(levenshtein(&a, &a), 0);
    }

    #[test]
    fn levenshtein_symmetric(a in arb_string(), b in arb_string()) {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn levenshtein_triangle_inequality(
        a in arb_string(),
        b in arb_string(),
        c in arb_string()
    ) {
        let d_ac = levenshtein(&a, &c);
        let d_ab = levenshtein(&a, &b);
        let d_bc = levenshtein(&b, &c);
        prop_assert!(
            d_ac <= d_ab + d_bc,
            "Triangle inequality violated: d({}, {}) = {} > {} + {}",
            a, c, d_ac, d_ab, d_bc
        );
    }

    #[test]
    fn levenshtein_base_cases(a in arb_unicode_string()) {
        let len = a.chars().count();
        prop_assert_eq!(levenshtein(&a, ""), len);
        prop_assert_eq!(levenshtein("", &a), len);
    }

    #[test]
    fn levenshtein_length_bounds(a in arb_string(), b in arb_string()) {
        let d = levenshtein(&a, &b);
        prop_assert!(d >= a.len().abs_diff(b.len()));
        prop_assert!(d <= a.len().max(b.len()));
    }

    #[test]
    fn matrix_agrees_with_distance(a in arb_string(), b in arb_string()) {
        prop_assert_eq!(levenshtein_matrix(&a, &b).distance(), levenshtein(&a, &b));
    }

    #[test]
    fn ratios_in_unit_range(a in arb_unicode_string(), b in arb_unicode_string()) {
        let shortest = edit_distance(&a, &b, EditNormalization::RatioShortest);
        let longest = edit_distance(&a, &b, EditNormalization::RatioLongest);
        prop_assert!(in_unit_range(shortest));
        prop_assert!(in_unit_range(longest));
        // the longest alignment is never shorter than the longer input
        prop_assert!(longest >= shortest - 1e-12);
    }
}

#[cfg(feature = "fast-levenshtein")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn accelerated_agrees_with_dp(a in arb_string(), b in arb_string()) {
        prop_assert_eq!(
            simblend::algorithms::levenshtein::levenshtein_accelerated(&a, &b),
            levenshtein(&a, &b)
        );
    }
}

// ============================================================================
// Graphemic ratios
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn sequence_ratio_bounds(a in arb_unicode_string(), b in arb_unicode_string()) {
        prop_assert!(in_unit_range(sequence_ratio(&a, &b)));
        prop_assert_eq!(sequence_ratio(&a, &a), 1.0);
    }

    #[test]
    fn set_ratios_symmetric(a in arb_string(), b in arb_string(), n in 1usize..4) {
        let config = NgramConfig::new(n);
        let dice = sorensen_similarity(&a, &b, &config);
        let jac = jaccard_similarity(&a, &b, &config);
        prop_assert!(in_unit_range(dice));
        prop_assert!(in_unit_range(jac));
        prop_assert_eq!(dice, sorensen_similarity(&b, &a, &config));
        prop_assert_eq!(jac, jaccard_similarity(&b, &a, &config));
        // Dice never falls below Jaccard
        prop_assert!(dice >= jac - 1e-12);
    }
}

// ============================================================================
// Phonetic codes and the blend
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn soundex_code_shape(word in arb_word()) {
        let code = soundex(&word).unwrap();
        prop_assert_eq!(code.len(), 4);
        let mut chars = code.chars();
        let first = chars.next().unwrap();
        prop_assert_eq!(first, word.chars().next().unwrap().to_ascii_uppercase());
        prop_assert!(chars.all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn blend_in_unit_range(a in arb_word(), b in arb_word()) {
        let score = similarity(&a, &b, &SimilarityConfig::default()).unwrap();
        prop_assert!(in_unit_range(score));
    }

    #[test]
    fn blend_self_similarity_is_one(a in arb_word()) {
        prop_assert_eq!(similarity(&a, &a, &SimilarityConfig::default()).unwrap(), 1.0);
    }

    #[test]
    fn graphemic_self_similarity_is_one(a in arb_unicode_string()) {
        prop_assert_eq!(graphemic_similarity(&a, &a).unwrap(), 1.0);
    }
}
