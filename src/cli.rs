//! CLI argument definitions for simblend.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use simblend::{EditNormalization, SoundexVariant};

#[derive(Parser)]
#[command(
    name = "simblend",
    version,
    about = "Blended string similarity",
    long_about = "Score how alike two strings are.\n\n\
                  The score is a weighted mean of graphemic metrics (sequence ratio,\n\
                  Levenshtein ratio, Sorensen-Dice, Jaccard) and phonetic metrics\n\
                  (Soundex, NYSIIS). Metrics whose backend is unavailable are left\n\
                  out of the mean."
)]
pub struct Cli {
    /// First string.
    #[arg(value_name = "STR1")]
    pub str1: String,

    /// Second string.
    #[arg(value_name = "STR2")]
    pub str2: String,

    /// JSON configuration file. Flags below override its values.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Blend only the graphemic metrics.
    #[arg(long = "graphemic-only")]
    pub graphemic_only: bool,

    /// Leave Soundex out of the blend.
    #[arg(long = "no-soundex")]
    pub no_soundex: bool,

    /// Leave NYSIIS out of the blend.
    #[arg(long = "no-nysiis")]
    pub no_nysiis: bool,

    /// How edit distances are turned into ratios.
    #[arg(long = "normalization", value_enum)]
    pub normalization: Option<EditNormalizationArg>,

    /// Soundex rule set.
    #[arg(long = "soundex-variant", value_enum)]
    pub soundex_variant: Option<SoundexVariantArg>,

    /// N-gram size for Sorensen and Jaccard.
    #[arg(long = "ngram", value_name = "N", value_parser = clap::value_parser!(u16).range(1..=32))]
    pub ngram: Option<u16>,

    /// Lowercase both strings before comparing.
    #[arg(long = "lowercase")]
    pub lowercase: bool,

    /// Print every metric's value and weight.
    #[arg(long = "breakdown")]
    pub breakdown: bool,

    /// Print the full report (score, components, skipped metrics) as JSON.
    #[arg(long = "json", conflicts_with = "breakdown")]
    pub json: bool,

    /// Print the Levenshtein distance matrix.
    #[arg(long = "matrix")]
    pub matrix: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EditNormalizationArg {
    RatioShortest,
    RatioLongest,
}

impl From<EditNormalizationArg> for EditNormalization {
    fn from(arg: EditNormalizationArg) -> Self {
        match arg {
            EditNormalizationArg::RatioShortest => Self::RatioShortest,
            EditNormalizationArg::RatioLongest => Self::RatioLongest,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SoundexVariantArg {
    American,
    Simplified,
}

impl From<SoundexVariantArg> for SoundexVariant {
    fn from(arg: SoundexVariantArg) -> Self {
        match arg {
            SoundexVariantArg::American => Self::American,
            SoundexVariantArg::Simplified => Self::Simplified,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "simblend",
            "Robert",
            "Rupert",
            "--no-nysiis",
            "--normalization",
            "ratio-longest",
            "--ngram",
            "2",
            "--breakdown",
        ])
        .unwrap();
        assert_eq!(cli.str1, "Robert");
        assert!(cli.no_nysiis);
        assert!(matches!(cli.normalization, Some(EditNormalizationArg::RatioLongest)));
        assert_eq!(cli.ngram, Some(2));
        assert!(cli.breakdown);
    }

    #[test]
    fn test_json_conflicts_with_breakdown() {
        assert!(Cli::try_parse_from(["simblend", "a", "b", "--json"]).unwrap().json);
        assert!(Cli::try_parse_from(["simblend", "a", "b", "--json", "--breakdown"]).is_err());
    }

    #[test]
    fn test_rejects_zero_ngram() {
        assert!(Cli::try_parse_from(["simblend", "a", "b", "--ngram", "0"]).is_err());
    }
}
