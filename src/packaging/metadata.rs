//! Descriptive metadata document for a deposit package
//!
//! The package carries a small Dublin Core document describing the
//! submission. Output is deterministic for a given submission so repeated
//! packaging runs produce identical documents.

use crate::core::submission::Submission;

/// Descriptive metadata extracted from a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositMetadata {
    pub identifier: String,
    pub title: String,
    pub creators: Vec<String>,
    pub publisher: String,
}

impl DepositMetadata {
    /// Extract metadata from a submission
    pub fn from_submission(submission: &Submission, context_name: &str) -> Self {
        Self {
            identifier: format!("{}-{}", submission.context_id, submission.id),
            title: submission.title.clone(),
            creators: submission
                .authors
                .iter()
                .map(|author| author.full_name())
                .collect(),
            publisher: context_name.to_string(),
        }
    }

    /// Render the metadata as a Dublin Core XML document
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n");
        xml.push_str(&format!(
            "  <dc:identifier>{}</dc:identifier>\n",
            xml_escape(&self.identifier)
        ));
        xml.push_str(&format!("  <dc:title>{}</dc:title>\n", xml_escape(&self.title)));
        for creator in &self.creators {
            xml.push_str(&format!(
                "  <dc:creator>{}</dc:creator>\n",
                xml_escape(creator)
            ));
        }
        xml.push_str(&format!(
            "  <dc:publisher>{}</dc:publisher>\n",
            xml_escape(&self.publisher)
        ));
        xml.push_str("</metadata>\n");
        xml
    }
}

/// Escape the five XML-reserved characters
fn xml_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
