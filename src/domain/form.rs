//! Contact form fields and validation rules

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

lazy_static! {
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^\S+@\S+\.\S+$").expect("valid email pattern");
}

/// Snapshot of the form's named fields, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Value of the first field called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` body
    pub fn to_urlencoded(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.iter() {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Inline error message per field name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record an error. A later error for the same field replaces the message,
    /// mirroring how the single error slot per field is overwritten.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Which fields are checked and what the user is told
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRules {
    pub required_fields: Vec<String>,
    pub email_field: String,
    pub required_message: String,
    pub invalid_email_message: String,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            required_fields: ["name", "email", "service", "message"]
                .into_iter()
                .map(String::from)
                .collect(),
            email_field: "email".to_string(),
            required_message: "This field is required.".to_string(),
            invalid_email_message: "Please enter a valid email address.".to_string(),
        }
    }
}

impl FormRules {
    /// Check required fields, then the email shape.
    ///
    /// A required field absent from `fields` is not reported: there is no
    /// element to attach the error to. The email check runs whenever the raw
    /// value is non-empty, independently of the required check.
    pub fn validate(&self, fields: &FormFields) -> FieldErrors {
        let mut errors = FieldErrors::default();

        for name in &self.required_fields {
            if let Some(value) = fields.get(name) {
                if value.trim().is_empty() {
                    errors.insert(name.as_str(), self.required_message.as_str());
                }
            }
        }

        if let Some(email) = fields.get(&self.email_field) {
            if !email.is_empty() && !is_email_shaped(email) {
                errors.insert(self.email_field.as_str(), self.invalid_email_message.as_str());
            }
        }

        errors
    }
}

/// Status line texts shown beside the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMessages {
    pub sending: String,
    pub success: String,
    pub failure: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            sending: "Sending...".to_string(),
            success: "Thanks! Your message has been sent.".to_string(),
            failure: "Sorry, there was an error. Please try again.".to_string(),
        }
    }
}

pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_fields() -> FormFields {
        FormFields::new()
            .with("name", "Ada")
            .with("email", "ada@example.com")
            .with("service", "design")
            .with("message", "Hello there")
    }

    #[test]
    fn test_valid_fields_pass() {
        assert!(FormRules::default().validate(&valid_fields()).is_empty());
    }

    #[test]
    fn test_all_blank_fields_are_required() {
        let fields = FormFields::new()
            .with("name", "")
            .with("email", "")
            .with("service", "   ")
            .with("message", "\n");
        let errors = FormRules::default().validate(&fields);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("service"), Some("This field is required."));
    }

    #[test]
    fn test_malformed_email() {
        let fields: FormFields = valid_fields()
            .iter()
            .map(|(k, v)| (k, if k == "email" { "not-an-email" } else { v }))
            .collect();
        let errors = FormRules::default().validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address."));
    }

    #[test]
    fn test_whitespace_email_reports_shape_last() {
        let fields: FormFields = valid_fields()
            .iter()
            .map(|(k, v)| (k, if k == "email" { "   " } else { v }))
            .collect();
        let errors = FormRules::default().validate(&fields);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address."));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email_shaped("a@b.c"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("a b@c.d"));
        assert!(!is_email_shaped("@b.c"));
    }

    #[test]
    fn test_urlencoded_body() {
        let fields = FormFields::new()
            .with("name", "Ada Lovelace")
            .with("message", "a&b=c");
        assert_eq!(fields.to_urlencoded(), "name=Ada+Lovelace&message=a%26b%3Dc");
    }
}
