//! Local canned responses
//!
//! Produces deterministic intent-keyed answers from the portfolio document
//! when no generative backend is usable. The intro sentence is drawn from a
//! small per-intent pool; the random source is seedable so tests can pin
//! the choice. The randomness is cosmetic only.

use std::sync::Mutex;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chat::ResponseEnvelope;
use crate::intent::Intent;
use crate::portfolio::PortfolioDocument;

/// Follow-up suggestions attached to generated answers
const GENERIC_SUGGESTIONS: [&str; 4] = [
    "What projects have you built?",
    "What are your skills?",
    "Tell me about your career",
    "How can I contact you?",
];

/// Follow-up suggestions attached to the apology answer
const APOLOGY_SUGGESTIONS: [&str; 2] = ["What projects have you built?", "What are your skills?"];

const GREETING_INTROS: [&str; 3] = [
    "Hello! I'm the portfolio assistant. Ask me about projects, skills, or how to get in touch.",
    "Hi there! Happy to tell you about the work, skills, and background showcased here.",
    "Welcome! You can ask me about projects, skills, career history, or contact details.",
];

const PROJECTS_INTROS: [&str; 3] = [
    "Here are the projects featured in this portfolio:",
    "These are the highlighted projects:",
    "Here's an overview of the project work:",
];

const SKILLS_INTROS: [&str; 3] = [
    "Here's a summary of the skills in this portfolio:",
    "These are the main skill areas:",
    "Here's what the skill set looks like:",
];

const TIMELINE_INTROS: [&str; 3] = [
    "Here's the career timeline, newest first:",
    "This is the journey so far:",
    "Here are the milestones to date:",
];

const CONTACT_INTROS: [&str; 3] = [
    "You can get in touch through these channels:",
    "Here's how to make contact:",
    "These are the contact details:",
];

const DEFAULT_INTROS: [&str; 3] = [
    "I'm not sure about that one, but I can tell you about projects, skills, or career history.",
    "That's outside what I know. Try asking about projects, skills, or contact details.",
    "I can best help with questions about the portfolio: projects, skills, timeline, or contact.",
];

fn suggestions_for(intent: Intent) -> Vec<String> {
    let suggestions: &[&str] = match intent {
        Intent::Greeting | Intent::Default => &GENERIC_SUGGESTIONS,
        Intent::Projects => &[
            "What technologies do you use?",
            "Tell me about your career",
            "How can I contact you?",
        ],
        Intent::Skills => &[
            "What projects have you built?",
            "Tell me about your career",
            "How can I contact you?",
        ],
        Intent::Timeline => &[
            "What projects have you built?",
            "What are your skills?",
            "How can I contact you?",
        ],
        Intent::Contact => &[
            "What projects have you built?",
            "What are your skills?",
            "Tell me about your career",
        ],
    };
    suggestions.iter().map(|s| s.to_string()).collect()
}

/// Renders a 1-5 proficiency as filled and hollow stars
fn star_rating(level: u8) -> String {
    let filled = usize::from(level.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Builds canned response envelopes with a pluggable random source
pub struct LocalResponder {
    rng: Mutex<StdRng>,
}

impl LocalResponder {
    /// Responder seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Responder with a fixed seed, for deterministic tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self, pool: &[&'static str]) -> String {
        let mut rng = self.rng.lock().expect("responder rng lock poisoned");
        let index = rng.random_range(0..pool.len());
        pool[index].to_string()
    }

    /// Wrap a provider-generated answer in an envelope
    pub fn generated(&self, text: String, intent: Intent) -> ResponseEnvelope {
        ResponseEnvelope {
            text,
            data: None,
            suggestions: GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            timestamp: Utc::now(),
            intent,
        }
    }

    /// Fixed apology used when generation fails and fallback is disabled
    pub fn apology(&self) -> ResponseEnvelope {
        ResponseEnvelope {
            text: "Sorry, I'm having trouble answering right now. Please try again in a moment."
                .to_string(),
            data: None,
            suggestions: APOLOGY_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            timestamp: Utc::now(),
            intent: Intent::Default,
        }
    }

    /// Canned response for a classified intent
    pub fn respond(&self, intent: Intent, document: &PortfolioDocument) -> ResponseEnvelope {
        let (text, data) = match intent {
            Intent::Greeting => (self.pick(&GREETING_INTROS), None),
            Intent::Default => (self.pick(&DEFAULT_INTROS), None),
            Intent::Projects => (self.pick(&PROJECTS_INTROS), Some(project_lines(document))),
            Intent::Skills => (self.pick(&SKILLS_INTROS), Some(skill_lines(document))),
            Intent::Timeline => (self.pick(&TIMELINE_INTROS), Some(timeline_lines(document))),
            Intent::Contact => (self.pick(&CONTACT_INTROS), Some(contact_lines(document))),
        };

        // An intent with no backing data degrades to prose only
        let data = data.filter(|lines| !lines.is_empty());

        ResponseEnvelope {
            text,
            data,
            suggestions: suggestions_for(intent),
            timestamp: Utc::now(),
            intent,
        }
    }
}

impl Default for LocalResponder {
    fn default() -> Self {
        Self::new()
    }
}

fn project_lines(document: &PortfolioDocument) -> Vec<String> {
    document
        .projects
        .iter()
        .map(|project| {
            let mut line = format!("{} — {}", project.title, project.description);
            if !project.technologies.is_empty() {
                line.push_str(&format!(" ({})", project.technologies.join(", ")));
            }
            line
        })
        .collect()
}

/// One line per skill category
fn skill_lines(document: &PortfolioDocument) -> Vec<String> {
    document
        .skills
        .iter()
        .map(|category| {
            let items: Vec<String> = category
                .items
                .iter()
                .map(|skill| format!("{} {}", skill.name, star_rating(skill.level)))
                .collect();
            format!("{}: {}", category.category, items.join(", "))
        })
        .collect()
}

fn timeline_lines(document: &PortfolioDocument) -> Vec<String> {
    let mut events: Vec<_> = document.timeline.iter().collect();
    events.sort_by(|a, b| b.year.cmp_natural(&a.year));
    events
        .iter()
        .map(|event| format!("{} — {}: {}", event.year, event.title, event.description))
        .collect()
}

fn contact_lines(document: &PortfolioDocument) -> Vec<String> {
    document
        .contact
        .iter()
        .map(|entry| format!("{}: {}", entry.label, entry.value))
        .collect()
}
