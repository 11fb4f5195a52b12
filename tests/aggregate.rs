//! End-to-end checks of the blended score against hand-computed components.

use simblend::algorithms::ngram::{jaccard_similarity, sorensen_similarity};
use simblend::algorithms::sequence::sequence_ratio;
use simblend::{
    edit_distance, graphemic_similarity, similarity, Aggregator, Capabilities, EditNormalization,
    Metric, MetricToggles, MetricWeights, NgramConfig, SimilarityConfig, SimilarityError,
    SkipReason,
};

const EPS: f64 = 1e-12;

#[test]
fn kitten_sitting_cross_check() {
    let (a, b) = ("kitten", "sitting");
    let ngram = NgramConfig::default();
    let components = [
        sequence_ratio(a, b),
        edit_distance(a, b, EditNormalization::RatioShortest),
        sorensen_similarity(a, b, &ngram),
        jaccard_similarity(a, b, &ngram),
    ];
    let expected = components.iter().sum::<f64>() / components.len() as f64;

    assert!((components[0] - 8.0 / 13.0).abs() < EPS);
    assert!((components[1] - 4.0 / 7.0).abs() < EPS);
    assert!((graphemic_similarity(a, b).unwrap() - expected).abs() < EPS);
    assert!((expected - 0.553_846).abs() < 1e-6);
}

#[test]
fn phonetic_metrics_raise_sound_alikes() {
    let graphemic = graphemic_similarity("Robert", "Rupert").unwrap();
    let blended = similarity("Robert", "Rupert", &SimilarityConfig::default()).unwrap();
    assert!((graphemic - 0.625).abs() < EPS);
    assert!(blended > graphemic);
}

#[test]
fn graceful_degradation_without_phonetic_backends() {
    let config = SimilarityConfig::with_metrics(MetricToggles {
        phonetic_soundex: true,
        phonetic_nysiis: true,
        ..MetricToggles::graphemic()
    });
    let aggregator = Aggregator::new(Capabilities::graphemic_only(), config).unwrap();
    let report = aggregator.report("Ashcraft", "Ashcroft").unwrap();

    assert_eq!(report.components.len(), 4);
    assert!(report
        .skipped
        .iter()
        .all(|(_, reason)| *reason == SkipReason::BackendUnavailable));
    assert!(
        (report.score - graphemic_similarity("Ashcraft", "Ashcroft").unwrap()).abs() < EPS
    );
}

#[test]
fn only_unavailable_metrics_requested() {
    let aggregator =
        Aggregator::new(Capabilities::graphemic_only(), SimilarityConfig::phonetic()).unwrap();
    assert_eq!(
        aggregator.similarity("Robert", "Rupert"),
        Err(SimilarityError::NoMetricAvailable)
    );
}

#[test]
fn single_metric_weight() {
    let weights = MetricWeights::uniform(0.0).with(Metric::LevenshteinRatio, 2.0);
    let config = SimilarityConfig::graphemic().with_weights(weights);
    let score = similarity("flaw", "lawn", &config).unwrap();
    assert!((score - 0.5).abs() < EPS);
}

#[test]
fn ratio_longest_changes_levenshtein_component() {
    let config = SimilarityConfig::with_metrics(MetricToggles::none())
        .toggle(Metric::LevenshteinRatio, true)
        .with_edit_normalization(EditNormalization::RatioLongest);
    assert!((similarity("abc", "acd", &config).unwrap() - 0.5).abs() < EPS);
}

#[test]
fn config_from_json_drives_blend() {
    let config = SimilarityConfig::from_json(
        r#"{
            "metrics": {
                "sequence_ratio": false,
                "levenshtein_ratio": true,
                "sorensen": false,
                "jaccard": false,
                "phonetic_soundex": true,
                "phonetic_nysiis": false
            },
            "weights": { "soundex": 3.0 }
        }"#,
    )
    .unwrap();
    // Robert/Rupert: Levenshtein 2/3, identical Soundex codes
    let score = similarity("Robert", "Rupert", &config).unwrap();
    let expected = (2.0 / 3.0 + 3.0) / 4.0;
    assert!((score - expected).abs() < EPS);
}

#[test]
fn empty_input_is_rejected() {
    for (a, b) in [("", "abc"), ("abc", ""), ("", "")] {
        assert!(matches!(
            similarity(a, b, &SimilarityConfig::default()),
            Err(SimilarityError::InvalidArgument(_))
        ));
    }
}
