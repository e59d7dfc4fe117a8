//! Host-supplied submission model
//!
//! The publishing host owns these records; the dispatch core only reads them.
//! A [`PublishEvent`] is the typed payload the host hands over when a
//! publication is published, replacing any string-keyed hook arguments.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Workflow status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Queued,
    Scheduled,
    Published,
    Declined,
}

/// A contributing author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub given_name: String,
    pub family_name: String,
}

impl Author {
    /// Full display name ("Given Family")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// A content file belonging to a submission
///
/// `path` points at the file on the host's filesystem; `name` is the
/// filename to use inside the deposit package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFile {
    pub name: String,
    pub path: PathBuf,
}

/// A published work as supplied by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub context_id: i64,
    pub title: String,
    pub authors: Vec<Author>,
    pub status: SubmissionStatus,
    pub files: Vec<SubmissionFile>,
}

impl Submission {
    /// Whether this submission is eligible for automatic deposit
    pub fn is_published(&self) -> bool {
        self.status == SubmissionStatus::Published
    }

    /// Comma-separated author display names, in submission order
    pub fn author_string(&self) -> String {
        self.authors
            .iter()
            .map(Author::full_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Typed payload for the host's publish event
#[derive(Debug, Clone)]
pub struct PublishEvent {
    pub submission: Submission,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(status: SubmissionStatus) -> Submission {
        Submission {
            id: 42,
            context_id: 1,
            title: "On the Shoulders of Giants".to_string(),
            authors: vec![
                Author {
                    given_name: "Ada".to_string(),
                    family_name: "Lovelace".to_string(),
                },
                Author {
                    given_name: "Charles".to_string(),
                    family_name: "Babbage".to_string(),
                },
            ],
            status,
            files: vec![],
        }
    }

    #[test]
    fn test_author_string_order_and_separator() {
        let submission = submission(SubmissionStatus::Published);
        assert_eq!(submission.author_string(), "Ada Lovelace, Charles Babbage");
    }

    #[test]
    fn test_author_string_empty() {
        let mut submission = submission(SubmissionStatus::Published);
        submission.authors.clear();
        assert_eq!(submission.author_string(), "");
    }

    #[test]
    fn test_is_published() {
        assert!(submission(SubmissionStatus::Published).is_published());
        assert!(!submission(SubmissionStatus::Queued).is_published());
        assert!(!submission(SubmissionStatus::Declined).is_published());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&SubmissionStatus::Published).unwrap();
        assert_eq!(json, r#""published""#);

        let deserialized: SubmissionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, SubmissionStatus::Published);
    }

    #[test]
    fn test_submission_deserialization() {
        let json = r#"{
            "id": 7,
            "contextId": 2,
            "title": "A Study",
            "authors": [{"givenName": "Grace", "familyName": "Hopper"}],
            "status": "published",
            "files": [{"name": "article.pdf", "path": "/tmp/article.pdf"}]
        }"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.id, 7);
        assert_eq!(submission.context_id, 2);
        assert_eq!(submission.files.len(), 1);
        assert!(submission.is_published());
    }
}
