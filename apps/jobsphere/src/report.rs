//! Plain-text rendering of an analysis result for the terminal.
//!
//! Each section is printed only when its field is present; an empty list
//! still prints its heading so the reader sees the server returned nothing.

use std::fmt;

use crate::models::analysis::AnalysisResult;
use crate::models::feature::Feature;

pub fn render(feature: Feature, result: &AnalysisResult) -> String {
    Report { feature, result }.to_string()
}

struct Report<'a> {
    feature: Feature,
    result: &'a AnalysisResult,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let title = result.title().unwrap_or_else(|| self.feature.title());
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;

        if let Some(score) = result.score() {
            writeln!(f, "\nScore: {:.0}/100", score)?;
        }

        if let Some(details) = result.details() {
            section(f, "Details", &details)?;
        }
        if let Some(skills) = result.skills() {
            section(f, "Missing skills", &skills)?;
        }

        if let Some(projects) = result.projects() {
            heading(f, "Projects", projects.is_empty())?;
            for (i, project) in projects.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, project.title)?;
                field(f, "Objective", &project.objective)?;
                field(f, "Tools", &project.tools)?;
                field(f, "Skills", &project.skills)?;
            }
        }

        if let Some(questions) = result.questions() {
            heading(f, "Questions", questions.is_empty())?;
            for (i, question) in questions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, question)?;
            }
        }

        if let Some(jobs) = result.jobs() {
            heading(f, "Jobs", jobs.is_empty())?;
            for job in &jobs {
                writeln!(f, "  - {} at {}", job.title, job.company)?;
                field(f, "Location", &job.location)?;
                field(f, "Apply", &job.link)?;
            }
        }

        Ok(())
    }
}

fn heading(f: &mut fmt::Formatter<'_>, name: &str, empty: bool) -> fmt::Result {
    writeln!(f, "\n{name}:")?;
    if empty {
        writeln!(f, "  (none)")?;
    }
    Ok(())
}

fn section(f: &mut fmt::Formatter<'_>, name: &str, items: &[&str]) -> fmt::Result {
    heading(f, name, items.is_empty())?;
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}

fn field(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    if !value.is_empty() {
        writeln!(f, "     {label}: {value}")?;
    }
    Ok(())
}
