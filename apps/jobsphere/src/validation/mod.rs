//! Client-side checks run before anything is sent to the service.

pub mod email;
pub mod form;

use std::collections::BTreeMap;
use std::fmt;

pub use email::is_allowed_email;
pub use form::{select_resume, validate};

/// Dashboard field a validation message is attached to.
/// Ordered the way the fields appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    JobRole,
    Location,
    Experience,
    Resume,
    JobDescription,
}

impl Field {
    /// Form field name, as used in the multipart upload.
    pub fn key(&self) -> &'static str {
        match self {
            Field::JobRole => "jobRole",
            Field::Location => "location",
            Field::Experience => "experience",
            Field::Resume => "resume",
            Field::JobDescription => "jobDescription",
        }
    }
}

/// Field → message. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field.key(), message)?;
            first = false;
        }
        Ok(())
    }
}
