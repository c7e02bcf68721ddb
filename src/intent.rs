//! Intent classification for fallback responses
//!
//! Maps a free-text message to one of a closed set of categories using
//! ordered pattern rules. Each category carries both English and Vietnamese
//! vocabulary; the site serves both audiences. Order is significant and
//! fixed - greeting is checked first and contact last - so a message that
//! matches several categories always resolves the same way.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Closed set of message topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Projects,
    Skills,
    Timeline,
    Contact,
    Default,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Projects => "projects",
            Intent::Skills => "skills",
            Intent::Timeline => "timeline",
            Intent::Contact => "contact",
            Intent::Default => "default",
        }
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("intent pattern must compile"))
        .collect()
}

/// Category rule-sets in evaluation order
static RULES: Lazy<Vec<(Intent, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            Intent::Greeting,
            compile(&[
                r"(?i)\b(hi|hello|hey|howdy)\b",
                r"(?i)\bgood (morning|afternoon|evening)\b",
                r"(?i)xin chào",
                r"(?i)\bchào\b",
            ]),
        ),
        (
            Intent::Projects,
            compile(&[
                r"(?i)\bprojects?\b",
                r"(?i)\b(built|build|portfolio|created|made)\b",
                r"(?i)dự án",
                r"(?i)sản phẩm",
            ]),
        ),
        (
            Intent::Skills,
            compile(&[
                r"(?i)\bskills?\b",
                r"(?i)\b(technolog|framework|programming language|stack)\w*",
                r"(?i)kỹ năng",
                r"(?i)công nghệ",
            ]),
        ),
        (
            Intent::Timeline,
            compile(&[
                r"(?i)\b(timeline|experience|career|journey|education|background|history)\b",
                r"(?i)kinh nghiệm",
                r"(?i)quá trình",
                r"(?i)học vấn",
            ]),
        ),
        (
            Intent::Contact,
            compile(&[
                r"(?i)\b(contact|email|reach|hire|hiring|linkedin|github)\b",
                r"(?i)liên hệ",
                r"(?i)liên lạc",
            ]),
        ),
    ]
});

/// Classifies messages against the fixed rule table
#[derive(Debug, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// First category with any matching pattern wins; no match is `Default`
    pub fn classify(&self, message: &str) -> Intent {
        for (intent, patterns) in RULES.iter() {
            if patterns.iter().any(|p| p.is_match(message)) {
                return *intent;
            }
        }
        Intent::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(message: &str) -> Intent {
        IntentClassifier::new().classify(message)
    }

    #[test]
    fn test_greeting_messages() {
        assert_eq!(classify("Hi there!"), Intent::Greeting);
        assert_eq!(classify("hello"), Intent::Greeting);
        assert_eq!(classify("Good morning to you"), Intent::Greeting);
        assert_eq!(classify("Xin chào bạn"), Intent::Greeting);
    }

    #[test]
    fn test_project_messages() {
        assert_eq!(classify("What projects have you built?"), Intent::Projects);
        assert_eq!(classify("Show me your portfolio"), Intent::Projects);
        assert_eq!(classify("Bạn có những dự án nào?"), Intent::Projects);
    }

    #[test]
    fn test_skill_messages() {
        assert_eq!(classify("What are your skills?"), Intent::Skills);
        assert_eq!(classify("Which technologies do you use?"), Intent::Skills);
        assert_eq!(classify("Kỹ năng của bạn là gì?"), Intent::Skills);
    }

    #[test]
    fn test_timeline_messages() {
        assert_eq!(classify("Tell me about your career"), Intent::Timeline);
        assert_eq!(classify("What is your work experience?"), Intent::Timeline);
        assert_eq!(classify("Kinh nghiệm làm việc của bạn?"), Intent::Timeline);
    }

    #[test]
    fn test_contact_messages() {
        assert_eq!(classify("How can I reach you?"), Intent::Contact);
        assert_eq!(classify("What is your email address?"), Intent::Contact);
        assert_eq!(classify("Làm sao để liên hệ với bạn?"), Intent::Contact);
    }

    #[test]
    fn test_unmatched_message_is_default() {
        assert_eq!(classify("xyz completely unrelated"), Intent::Default);
        assert_eq!(classify("the weather is nice today"), Intent::Default);
    }

    #[test]
    fn test_greeting_takes_precedence_over_contact() {
        // Matches both greeting and contact vocabulary; greeting is checked
        // first
        assert_eq!(classify("Hello, what is your email?"), Intent::Greeting);
    }

    #[test]
    fn test_projects_take_precedence_over_skills() {
        assert_eq!(
            classify("Which technologies did you use in your projects?"),
            Intent::Projects
        );
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(classify("WHAT ARE YOUR SKILLS?"), Intent::Skills);
    }

    #[test]
    fn test_word_boundaries_prevent_substring_matches() {
        // "history" inside "prehistoric" must not trigger the timeline rules
        assert_eq!(classify("prehistoric creatures are neat"), Intent::Default);
    }

    #[test]
    fn test_intent_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Intent::Greeting).unwrap(), r#""greeting""#);
        assert_eq!(serde_json::to_string(&Intent::Default).unwrap(), r#""default""#);
    }
}
