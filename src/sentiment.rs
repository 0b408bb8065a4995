// sentiment.rs - Sentiment Scoring
// Lexicon-based polarity scores (VADER) for the analyze command.
//
// Used by: commands/analyze.rs, main.rs

/// Polarity of a text. `compound` is in [-1, 1], the others in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScores;
}

/// VADER scorer backed by the `vader_sentiment` lexicon.
/// The lexicon is static, so an analyzer is cheap to build per call.
pub struct VaderScorer;

impl VaderScorer {
    pub fn new() -> Self {
        VaderScorer
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> SentimentScores {
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        SentimentScores {
            negative: get("neg"),
            neutral: get("neu"),
            positive: get("pos"),
            compound: get("compound"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text_scores_positive() {
        let scorer = VaderScorer::new();
        let scores = scorer.score("i love this, it is great");
        assert!(scores.compound > 0.0);
        assert!(scores.positive > scores.negative);
    }

    #[test]
    fn test_negative_text_scores_negative() {
        let scorer = VaderScorer::new();
        let scores = scorer.score("this is terrible and i hate it");
        assert!(scores.compound < 0.0);
        assert!(scores.negative > scores.positive);
    }

    #[test]
    fn test_neutral_text_has_no_polarity() {
        let scorer = VaderScorer::new();
        let scores = scorer.score("the table");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.positive, 0.0);
        assert_eq!(scores.negative, 0.0);
    }
}
