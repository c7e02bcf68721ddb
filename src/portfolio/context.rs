//! Context snapshot for generative providers
//!
//! Renders the portfolio document into a deterministic, sectioned text
//! block. Sections are separated by blank lines so the token-budget
//! truncator can drop whole sections from the end.

use crate::portfolio::PortfolioDocument;

/// Build the textual context snapshot
///
/// Sections appear in fixed order: Projects, Skills, Career Timeline,
/// Contact Information. A section whose source collection is empty is
/// omitted entirely. Timeline events are ordered newest first.
pub fn build(document: &PortfolioDocument) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !document.projects.is_empty() {
        let mut lines = vec!["Projects:".to_string()];
        for project in &document.projects {
            let mut line = format!("- {}: {}", project.title, project.description);
            if !project.technologies.is_empty() {
                line.push_str(&format!(
                    " (Technologies: {})",
                    project.technologies.join(", ")
                ));
            }
            if let Some(link) = &project.link {
                line.push_str(&format!(" [Link: {}]", link));
            }
            if let Some(github) = &project.github {
                line.push_str(&format!(" [GitHub: {}]", github));
            }
            lines.push(line);
        }
        sections.push(lines.join("\n"));
    }

    if !document.skills.is_empty() {
        let mut lines = vec!["Skills:".to_string()];
        for category in &document.skills {
            let items: Vec<String> = category
                .items
                .iter()
                .map(|skill| format!("{} ({}/5)", skill.name, skill.level))
                .collect();
            lines.push(format!("- {}: {}", category.category, items.join(", ")));
        }
        sections.push(lines.join("\n"));
    }

    if !document.timeline.is_empty() {
        let mut events: Vec<_> = document.timeline.iter().collect();
        events.sort_by(|a, b| b.year.cmp_natural(&a.year));

        let mut lines = vec!["Career Timeline:".to_string()];
        for event in events {
            lines.push(format!(
                "- {}: {} - {}",
                event.year, event.title, event.description
            ));
        }
        sections.push(lines.join("\n"));
    }

    if !document.contact.is_empty() {
        let mut lines = vec!["Contact Information:".to_string()];
        for entry in &document.contact {
            lines.push(format!("- {}: {}", entry.label, entry.value));
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}
