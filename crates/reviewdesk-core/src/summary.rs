// ABOUTME: Structured summary of a 510(k) submission as produced by document analysis.
// ABOUTME: Includes the document input type accepted by the analyzer and the bundled sample submission.

use serde::{Deserialize, Serialize};

/// A predicate device cited for substantial-equivalence comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub name: String,
    pub manufacturer: String,
    pub similarities: String,
    pub differences: String,
}

/// A hazard identified in the risk analysis together with its mitigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub hazard: String,
    pub mitigation: String,
}

/// Number of performance tests reported in one testing category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingCategory {
    pub category: String,
    pub test_count: u32,
}

/// Key facts extracted from a 510(k) summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSummary {
    pub k_number: String,
    pub device_name: String,
    pub applicant: String,
    pub decision_date: String,
    pub indications: Vec<String>,
    pub predicates: Vec<Predicate>,
    pub risks: Vec<Risk>,
    pub testing: Vec<TestingCategory>,
}

impl StructuredSummary {
    /// Sum of tests across all categories.
    pub fn total_tests(&self) -> u32 {
        self.testing.iter().map(|t| t.test_count).sum()
    }

    /// Render the summary as plain text suitable as a document context.
    pub fn to_document_text(&self) -> String {
        let mut out = format!(
            "{} ({})\nApplicant: {}\nDecision date: {}\n",
            self.device_name, self.k_number, self.applicant, self.decision_date
        );
        out.push_str("\nIndications for use:\n");
        for indication in &self.indications {
            out.push_str(&format!("- {}\n", indication));
        }
        out.push_str("\nPredicate devices:\n");
        for p in &self.predicates {
            out.push_str(&format!(
                "- {} ({}): similar in {}; differs in {}\n",
                p.name, p.manufacturer, p.similarities, p.differences
            ));
        }
        out.push_str("\nRisks:\n");
        for r in &self.risks {
            out.push_str(&format!("- {}: {}\n", r.hazard, r.mitigation));
        }
        out.push_str("\nPerformance testing:\n");
        for t in &self.testing {
            out.push_str(&format!("- {}: {} tests\n", t.category, t.test_count));
        }
        out
    }
}

/// Input handed to document analysis and report generation: pasted text or
/// an uploaded file kept as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    Text(String),
    File { name: String, bytes: Vec<u8> },
}

impl DocumentInput {
    /// True if there is nothing to analyze (blank text or an empty file).
    pub fn is_empty(&self) -> bool {
        match self {
            DocumentInput::Text(text) => text.trim().is_empty(),
            DocumentInput::File { bytes, .. } => bytes.is_empty(),
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            DocumentInput::Text(text) => format!("pasted text ({} chars)", text.chars().count()),
            DocumentInput::File { name, bytes } => format!("file {} ({} bytes)", name, bytes.len()),
        }
    }

    /// Best-effort text view: pasted text as-is, files decoded lossily as UTF-8.
    pub fn text_lossy(&self) -> String {
        match self {
            DocumentInput::Text(text) => text.clone(),
            DocumentInput::File { bytes, .. } => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// The bundled sample submission returned by the simulated analyzer.
pub fn sample_submission() -> StructuredSummary {
    let predicate = |name: &str, manufacturer: &str, similarities: &str, differences: &str| Predicate {
        name: name.to_string(),
        manufacturer: manufacturer.to_string(),
        similarities: similarities.to_string(),
        differences: differences.to_string(),
    };
    let risk = |hazard: &str, mitigation: &str| Risk {
        hazard: hazard.to_string(),
        mitigation: mitigation.to_string(),
    };
    let testing = |category: &str, test_count: u32| TestingCategory {
        category: category.to_string(),
        test_count,
    };

    StructuredSummary {
        k_number: "K234567".to_string(),
        device_name: "NeuroPulse Stimulator".to_string(),
        applicant: "MediTech Innovations Inc.".to_string(),
        decision_date: "2024-03-15".to_string(),
        indications: vec![
            "Relief of chronic intractable pain".to_string(),
            "Post-surgical pain management".to_string(),
            "Traumatic injury pain relief".to_string(),
        ],
        predicates: vec![
            predicate(
                "Stimulator X1",
                "Global Neuro",
                "Same waveform, voltage",
                "Wireless charging vs Wired",
            ),
            predicate(
                "PainAway Pro",
                "Health Corp",
                "Identical lead placement",
                "Smaller IPG size",
            ),
        ],
        risks: vec![
            risk("Battery overheating", "Thermal cutoff circuit (IEC 60601-1)"),
            risk("Infection at implant site", "Sterile packaging, antibiotic coating"),
            risk("Software malfunction", "Watchdog timer, redundant processing"),
        ],
        testing: vec![
            testing("Biocompatibility", 5),
            testing("Electrical Safety", 8),
            testing("Software V&V", 12),
            testing("Animal Study", 1),
            testing("Usability", 3),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_submission_totals() {
        let summary = sample_submission();
        assert_eq!(summary.k_number, "K234567");
        assert_eq!(summary.predicates.len(), 2);
        assert_eq!(summary.risks.len(), 3);
        assert_eq!(summary.total_tests(), 29);
    }

    #[test]
    fn summary_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_submission()).expect("serialize");
        assert_eq!(json["kNumber"], "K234567");
        assert_eq!(json["testing"][2]["testCount"], 12);
    }

    #[test]
    fn document_text_mentions_key_facts() {
        let text = sample_submission().to_document_text();
        assert!(text.contains("NeuroPulse Stimulator (K234567)"));
        assert!(text.contains("Stimulator X1 (Global Neuro)"));
        assert!(text.contains("Software V&V: 12 tests"));
    }

    #[test]
    fn empty_inputs_are_detected() {
        assert!(DocumentInput::Text("   \n".to_string()).is_empty());
        assert!(
            DocumentInput::File {
                name: "summary.pdf".to_string(),
                bytes: Vec::new()
            }
            .is_empty()
        );
        assert!(!DocumentInput::Text("K234567".to_string()).is_empty());
    }
}
