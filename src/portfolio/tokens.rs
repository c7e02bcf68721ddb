//! Token estimation and budget-bounded truncation
//!
//! Providers bill and limit by tokens, but no exact tokenizer is shared
//! between the three backends. The estimator uses the standard word-count
//! approximation; the truncator keeps whole sections so the context never
//! ends mid-sentence.

/// Default token budget for provider context
pub const DEFAULT_CONTEXT_BUDGET: usize = 1500;

/// Approximate the token count of a text
///
/// Word count times 1.3, rounded. Close enough for budgeting across the
/// three backends without pulling in any single vendor's tokenizer.
pub fn estimate_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count();
    (words as f64 * 1.3).round() as usize
}

/// Trim a sectioned text to fit a token budget
///
/// Sections are the blank-line separated blocks of the input and are kept
/// whole, in original order. A section is included only if the running
/// estimate stays within budget; the first section that would exceed it
/// ends the output, and the remainder is dropped. The estimate of the
/// result never exceeds `max_tokens`.
pub fn truncate(text: &str, max_tokens: usize) -> String {
    if estimate_tokens(text) <= max_tokens {
        return text.to_string();
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut kept_words = 0usize;
    for section in text.split("\n\n") {
        let words = section.split_whitespace().count();
        // Project the estimate over the whole prefix so per-section rounding
        // cannot push the final estimate over budget
        let projected = ((kept_words + words) as f64 * 1.3).round() as usize;
        if projected > max_tokens {
            break;
        }
        kept_words += words;
        kept.push(section);
    }

    let result = kept.join("\n\n");
    tracing::debug!(
        original_tokens = estimate_tokens(text),
        truncated_tokens = estimate_tokens(&result),
        max_tokens,
        sections_kept = kept.len(),
        "Context truncated to token budget"
    );
    result
}
