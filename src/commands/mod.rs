// commands/mod.rs - Command Module Registry
// One module per keyword command, plus the number formatting they share.

pub mod ai;             // Single-line text generation (extended variant)
pub mod analyze;        // Sentiment polarity scores (extended variant)
pub mod compare;        // Similarity between two words
pub mod random_cat;     // Random cat picture URL ("random car")
pub mod random_word;    // Random word with definition and similarity to the reference word
pub mod sillify;        // Synonym substitution

/// Round to 3 decimal places, exact halves going to the even digit
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

/// Float formatting that always shows a fractional part: 1.0, 0.75, -0.4404
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
