use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of the process phase: the resume reduced to plain text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessedResume {
    pub resume_text: String,
    pub job_role: String,
}

/// JSON body sent to `/api/analyze/{feature}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_role: String,
    pub job_description: String,
    pub location: String,
}

/// A project suggestion from the project-ideas analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub objective: String,
    pub tools: String,
    pub skills: String,
}

/// A job opening from the live job search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
}

/// The analyze-phase response, kept exactly as the server sent it.
///
/// Which fields are present depends on the feature, but nothing enforces a
/// one-to-one mapping: every accessor is independently optional and returns
/// `None` when the field is missing or has an unexpected shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    #[cfg(test)]
    pub fn has_field(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Match score, nominally 0 to 100.
    pub fn score(&self) -> Option<f64> {
        self.0.get("score").and_then(Value::as_f64)
    }

    pub fn details(&self) -> Option<Vec<&str>> {
        self.string_list("details")
    }

    pub fn skills(&self) -> Option<Vec<&str>> {
        self.string_list("skills")
    }

    pub fn questions(&self) -> Option<Vec<&str>> {
        self.string_list("questions")
    }

    pub fn projects(&self) -> Option<Vec<Project>> {
        let items = self.0.get("projects")?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|obj| Project {
                    title: text_field(obj, "title"),
                    objective: text_field(obj, "objective"),
                    tools: text_field(obj, "tools"),
                    skills: text_field(obj, "skills"),
                })
                .collect(),
        )
    }

    pub fn jobs(&self) -> Option<Vec<JobListing>> {
        let items = self.0.get("jobs")?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|obj| JobListing {
                    title: text_field(obj, "title"),
                    company: text_field(obj, "company"),
                    location: text_field(obj, "location"),
                    link: text_field(obj, "link"),
                })
                .collect(),
        )
    }

    fn string_list(&self, key: &str) -> Option<Vec<&str>> {
        let items = self.0.get(key)?.as_array()?;
        Some(items.iter().filter_map(Value::as_str).collect())
    }
}

/// LLM-generated fields arrive as a string or as a list of strings.
fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
