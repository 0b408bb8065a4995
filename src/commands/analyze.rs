// analyze.rs - Sentiment Command
// Replies with the four polarity scores of the text after the keyword.
//
// Supports:
//   - analyze <text>

use crate::commands::format_float;
use crate::error::BotError;
use crate::messenger::{ChannelRef, Messenger};
use crate::sentiment::{SentimentScorer, SentimentScores};

pub async fn run(
    scorer: &dyn SentimentScorer,
    messenger: &dyn Messenger,
    channel: ChannelRef,
    text: &str,
) -> Result<(), BotError> {
    let (_, subject) = text.split_once(' ').ok_or(BotError::MissingText("analyze"))?;
    let scores = scorer.score(subject);
    log::debug!("[ANALYZE] {:?}", scores);
    messenger.send(channel, &format_scores(&scores)).await?;
    Ok(())
}

pub fn format_scores(scores: &SentimentScores) -> String {
    format!(
        "negative: {}\nneutral: {}\npositive: {}\ncompound: {}",
        format_float(scores.negative),
        format_float(scores.neutral),
        format_float(scores.positive),
        format_float(scores.compound)
    )
}
