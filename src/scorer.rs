// Scoring of a batch of detections against the expected language label.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Coarse expected-language label for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageLabel {
    Ara,
    Eng,
    Fra,
    Hin,
    Spa,
    Zho,
}

impl LanguageLabel {
    pub const ALL: [LanguageLabel; 6] = [
        LanguageLabel::Ara,
        LanguageLabel::Eng,
        LanguageLabel::Fra,
        LanguageLabel::Hin,
        LanguageLabel::Spa,
        LanguageLabel::Zho,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageLabel::Ara => "ara",
            LanguageLabel::Eng => "eng",
            LanguageLabel::Fra => "fra",
            LanguageLabel::Hin => "hin",
            LanguageLabel::Spa => "spa",
            LanguageLabel::Zho => "zho",
        }
    }

    /// Provider codes counted as a correct answer for this label.
    pub fn accepted_codes(&self) -> &'static [&'static str] {
        match self {
            LanguageLabel::Ara => &["ar"],
            LanguageLabel::Eng => &["en"],
            LanguageLabel::Fra => &["fr", "fr-ca"],
            LanguageLabel::Hin => &["hi"],
            LanguageLabel::Spa => &["es"],
            LanguageLabel::Zho => &["lzh", "zh-Hans", "zh-Hant"],
        }
    }

    pub fn accepts(&self, language: &str) -> bool {
        self.accepted_codes().contains(&language)
    }

    /// "'ara', 'eng', ..." for usage hints.
    pub fn supported_list() -> String {
        LanguageLabel::ALL
            .iter()
            .map(|l| format!("'{}'", l))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LanguageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        LanguageLabel::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unsupported language label: {}", s))
    }
}

/// One record of the provider's detect answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub language: String,
    pub score: f64,
    #[serde(default)]
    pub is_translation_supported: bool,
    #[serde(default)]
    pub is_transliteration_supported: bool,
}

/// Error envelope the provider returns instead of an array.
#[derive(Deserialize, Debug)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Deserialize, Debug)]
struct ProviderErrorBody {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    message: String,
}

/// Turn the raw provider answer into typed rows.
pub fn parse_results(raw: &Value) -> Result<Vec<DetectionResult>> {
    // Structs also deserialize from sequences, so only objects may be envelopes.
    if raw.is_object() {
        if let Ok(err) = ProviderError::deserialize(raw) {
            anyhow::bail!("Provider error {}: {}", err.error.code, err.error.message);
        }
    }
    Vec::<DetectionResult>::deserialize(raw).context("Parsing detect response json")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub language: String,
    pub score: f64,
    pub label: LanguageLabel,
    pub is_ok: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub label: LanguageLabel,
    pub rows: Vec<ScoredRow>,
    pub average_api_score: f64,
    pub average_local_score: f64,
    pub true_positives: usize,
    pub false_negatives: usize,
    pub recall: f64,
}

/// Join each result with the expected label and aggregate the metrics.
///
/// Every row carries the batch label, so there are no negative samples and
/// recall always equals the local score.
pub fn score(results: &[DetectionResult], label: LanguageLabel) -> Result<ScoreReport> {
    if results.is_empty() {
        anyhow::bail!("No detection results to score");
    }

    let rows: Vec<ScoredRow> = results
        .iter()
        .map(|r| ScoredRow {
            language: r.language.clone(),
            score: r.score,
            label,
            is_ok: label.accepts(&r.language),
        })
        .collect();

    let total = rows.len() as f64;
    let average_api_score = rows.iter().map(|r| r.score).sum::<f64>() / total;
    let true_positives = rows.iter().filter(|r| r.is_ok).count();
    let false_negatives = rows.len() - true_positives;
    let average_local_score = true_positives as f64 / total;
    let recall = true_positives as f64 / (true_positives + false_negatives) as f64;

    Ok(ScoreReport {
        label,
        rows,
        average_api_score,
        average_local_score,
        true_positives,
        false_negatives,
        recall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(language: &str, score: f64) -> DetectionResult {
        DetectionResult {
            language: language.to_string(),
            score,
            is_translation_supported: true,
            is_transliteration_supported: false,
        }
    }

    #[test]
    fn test_label_round_trip_from_str() {
        for label in LanguageLabel::ALL {
            assert_eq!(label.as_str().parse::<LanguageLabel>().unwrap(), label);
        }
        assert!("rus".parse::<LanguageLabel>().is_err());
        assert!("FRA".parse::<LanguageLabel>().is_err());
    }

    #[test]
    fn test_allow_list() {
        assert!(LanguageLabel::Zho.accepts("zh-Hant"));
        assert!(LanguageLabel::Zho.accepts("lzh"));
        assert!(!LanguageLabel::Zho.accepts("zh"));
        assert!(LanguageLabel::Fra.accepts("fr-ca"));
        assert!(!LanguageLabel::Eng.accepts("en-us"));
    }

    #[test]
    fn test_supported_list() {
        assert_eq!(
            LanguageLabel::supported_list(),
            "'ara', 'eng', 'fra', 'hin', 'spa', 'zho'"
        );
    }

    #[test]
    fn test_score_fra_batch() {
        let results = vec![result("fr", 1.0), result("fr-ca", 0.8), result("de", 0.6)];
        let report = score(&results, LanguageLabel::Fra).unwrap();

        let is_ok: Vec<bool> = report.rows.iter().map(|r| r.is_ok).collect();
        assert_eq!(is_ok, vec![true, true, false]);
        assert!((report.average_local_score - 2.0 / 3.0).abs() < 1e-9);
        assert!((report.average_api_score - 0.8).abs() < 1e-9);
        assert_eq!(report.true_positives, 2);
        assert_eq!(report.false_negatives, 1);
        assert!((report.recall - report.average_local_score).abs() < 1e-9);
    }

    #[test]
    fn test_score_all_correct() {
        let results = vec![result("en", 0.97), result("en", 0.98)];
        let report = score(&results, LanguageLabel::Eng).unwrap();
        assert_eq!(report.average_local_score, 1.0);
        assert_eq!(report.recall, 1.0);
        assert!(report.rows.iter().all(|r| r.label == LanguageLabel::Eng));
    }

    #[test]
    fn test_score_empty_is_error() {
        assert!(score(&[], LanguageLabel::Spa).is_err());
    }

    #[test]
    fn test_parse_results_camel_case() {
        let raw = json!([{
            "language": "es",
            "score": 0.99,
            "isTranslationSupported": true,
            "isTransliterationSupported": false
        }]);
        let parsed = parse_results(&raw).unwrap();
        assert_eq!(parsed, vec![DetectionResult {
            language: "es".into(),
            score: 0.99,
            is_translation_supported: true,
            is_transliteration_supported: false,
        }]);
    }

    #[test]
    fn test_parse_results_single_row() {
        let raw = json!([{
            "language": "en",
            "score": 0.97,
            "isTranslationSupported": true,
            "isTransliterationSupported": false
        }]);
        let parsed = parse_results(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].language, "en");
        assert!((parsed[0].score - 0.97).abs() < 1e-9);
    }

    #[test]
    fn test_parse_results_object_without_error_is_rejected() {
        assert!(parse_results(&json!({ "language": "en", "score": 1.0 })).is_err());
    }

    #[test]
    fn test_parse_results_provider_error() {
        let raw = json!({
            "error": { "code": 401000, "message": "The request is not authorized" }
        });
        let err = parse_results(&raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401000"));
        assert!(msg.contains("not authorized"));
    }
}
