//! Simplification levels and their prompt templates.
//!
//! Each template carries exactly one `{text}` slot. Substitution is a
//! single left-to-right pass, so a document that itself contains the
//! literal `{text}` delimiter is never re-substituted.

use std::str::FromStr;

use crate::core::error::Error;

const PLACEHOLDER: &str = "{text}";

/// Prompt for the "Quick Summary (ELI5)" level
const ELI5_TEMPLATE: &str = "You are an expert legal analyst who can explain complex legal documents to a five-year-old. Your goal is to provide a super simple, easy-to-understand summary. Use short sentences, simple words, and analogies a child can grasp. Do not include any legal jargon. Focus on the main points: Who is involved? What is the main purpose of the document? What are the most important things someone needs to know?

Here is the legal text:
---
{text}
---

Provide the ELI5 summary below:";

/// Prompt for the "Standard View" level
const STANDARD_TEMPLATE: &str = "You are a professional legal assistant. Your task is to simplify a complex legal document into a clear and concise summary for a layperson. Your summary should be well-structured, using headings, bullet points, and bold text to highlight key information. Avoid legal jargon where possible, but if you must use a legal term, explain it simply. The goal is to make the document accessible and understandable without losing critical information.

Here is the legal text:
---
{text}
---

Provide the simplified 'Standard View' summary below:";

/// Prompt for the "Detailed Breakdown" level
const DETAILED_TEMPLATE: &str = "You are a meticulous legal analyst. Your job is to provide a detailed, section-by-section breakdown of a legal document. For each major clause or section, you must:
1.  Provide the original section title or a clear heading.
2.  Summarize the key points of that section in clear, easy-to-understand language.
3.  Identify and explain any potential risks, obligations, or important deadlines for the user.
4.  Use formatting (like nested bullet points and bold text) to create a highly organized and readable structure.

Here is the legal text:
---
{text}
---

Provide the 'Detailed Breakdown' below:";

/// One of the three fixed verbosity/structure presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimplificationLevel {
    Eli5,
    Standard,
    Detailed,
}

impl SimplificationLevel {
    pub const ALL: [SimplificationLevel; 3] = [
        SimplificationLevel::Eli5,
        SimplificationLevel::Standard,
        SimplificationLevel::Detailed,
    ];

    /// The label the level carries on the wire and in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            SimplificationLevel::Eli5 => "Quick Summary (ELI5)",
            SimplificationLevel::Standard => "Standard View",
            SimplificationLevel::Detailed => "Detailed Breakdown",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            SimplificationLevel::Eli5 => ELI5_TEMPLATE,
            SimplificationLevel::Standard => STANDARD_TEMPLATE,
            SimplificationLevel::Detailed => DETAILED_TEMPLATE,
        }
    }

    /// Substitute `text` into this level's template, exactly once.
    pub fn resolve(&self, text: &str) -> String {
        self.template().replacen(PLACEHOLDER, text, 1)
    }
}

impl std::fmt::Display for SimplificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SimplificationLevel {
    type Err = Error;

    /// Accepts both the full wire labels and short forms (`eli5`,
    /// `standard`, `detailed`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick summary (eli5)" | "eli5" | "quick" => Ok(SimplificationLevel::Eli5),
            "standard view" | "standard" => Ok(SimplificationLevel::Standard),
            "detailed breakdown" | "detailed" => Ok(SimplificationLevel::Detailed),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}
