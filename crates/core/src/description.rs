//! Structured sections embedded in an order's stored description.
//!
//! The customer supplies a public body plus optional confidential notes and
//! contact details. All three are persisted in the single `description`
//! column, the private parts appended under marker lines:
//!
//! ```text
//! Kitchen sink drips constantly.
//!
//! --- Confidential ---
//! Door code 4512
//!
//! --- Contact ---
//! +1 555 0100
//! ```
//!
//! [`DescriptionSections::parse`] splits a stored description back apart so
//! the private sections can be redacted for viewers without full access.

use serde::Serialize;

use crate::error::CoreError;

pub const CONFIDENTIAL_MARKER: &str = "--- Confidential ---";
pub const CONTACT_MARKER: &str = "--- Contact ---";

/// Shown in place of the private sections to viewers without full details.
pub const REDACTED_NOTICE: &str =
    "Contact details are released only to the selected specialist.";

/// Maximum length of each private section (characters).
pub const MAX_SECTION_LENGTH: usize = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Body,
    Confidential,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionSections {
    pub body: String,
    pub confidential: Option<String>,
    pub contact: Option<String>,
}

impl DescriptionSections {
    /// Build sections from request input, dropping blank private parts.
    pub fn new(body: &str, confidential: Option<&str>, contact: Option<&str>) -> Self {
        Self {
            body: body.trim().to_string(),
            confidential: non_blank(confidential),
            contact: non_blank(contact),
        }
    }

    /// Reject input that would not survive a compose/parse cycle.
    pub fn validate(&self) -> Result<(), CoreError> {
        let parts = [
            ("Description", Some(self.body.as_str())),
            ("Confidential info", self.confidential.as_deref()),
            ("Contact info", self.contact.as_deref()),
        ];
        for (label, text) in parts {
            let Some(text) = text else { continue };
            if text.lines().any(|l| marker_section(l).is_some()) {
                return Err(CoreError::Validation(format!(
                    "{label} must not contain the reserved line '{CONFIDENTIAL_MARKER}' or '{CONTACT_MARKER}'"
                )));
            }
        }
        for (label, text) in [
            ("Confidential info", &self.confidential),
            ("Contact info", &self.contact),
        ] {
            if text
                .as_ref()
                .is_some_and(|t| t.chars().count() > MAX_SECTION_LENGTH)
            {
                return Err(CoreError::Validation(format!(
                    "{label} exceeds maximum length of {MAX_SECTION_LENGTH} characters"
                )));
            }
        }
        Ok(())
    }

    /// Render the sections into the stored description text.
    pub fn compose(&self) -> String {
        let mut out = self.body.trim_end().to_string();
        if let Some(confidential) = &self.confidential {
            out.push_str("\n\n");
            out.push_str(CONFIDENTIAL_MARKER);
            out.push('\n');
            out.push_str(confidential);
        }
        if let Some(contact) = &self.contact {
            out.push_str("\n\n");
            out.push_str(CONTACT_MARKER);
            out.push('\n');
            out.push_str(contact);
        }
        out
    }

    /// Split a stored description into its sections.
    ///
    /// Text without marker lines is returned entirely as the body.
    pub fn parse(stored: &str) -> Self {
        let mut body = Vec::new();
        let mut confidential = Vec::new();
        let mut contact = Vec::new();
        let mut current = Section::Body;

        for line in stored.lines() {
            if let Some(next) = marker_section(line) {
                current = next;
                continue;
            }
            match current {
                Section::Body => body.push(line),
                Section::Confidential => confidential.push(line),
                Section::Contact => contact.push(line),
            }
        }

        Self {
            body: body.join("\n").trim().to_string(),
            confidential: non_blank(Some(&confidential.join("\n"))),
            contact: non_blank(Some(&contact.join("\n"))),
        }
    }

    /// Replace the private sections with the generic release notice.
    pub fn redacted(self) -> Self {
        Self {
            body: self.body,
            confidential: Some(REDACTED_NOTICE.to_string()),
            contact: Some(REDACTED_NOTICE.to_string()),
        }
    }
}

fn marker_section(line: &str) -> Option<Section> {
    match line.trim() {
        CONFIDENTIAL_MARKER => Some(Section::Confidential),
        CONTACT_MARKER => Some(Section::Contact),
        _ => None,
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
