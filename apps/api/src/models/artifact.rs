use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One interview question with its model answer.
///
/// `question_no` is positional (1-based) and assigned by the parser, never taken
/// from the model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question_no: u32,
    pub question: String,
    pub ideal_answer: String,
}

/// A persisted interview artifact derived from one résumé upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewArtifact {
    pub id: Uuid,
    pub owner_id: String,
    /// Declared name of the upload. Display only.
    pub source_filename: String,
    pub entries: Vec<QaEntry>,
    pub created_at: DateTime<Utc>,
}

/// An artifact that has not been persisted yet. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInterviewArtifact {
    pub owner_id: String,
    pub source_filename: String,
    pub entries: Vec<QaEntry>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ArtifactRow {
    pub id: Uuid,
    pub owner_id: String,
    pub source_filename: String,
    pub entries: Json<Vec<QaEntry>>,
    pub created_at: DateTime<Utc>,
}

impl From<ArtifactRow> for InterviewArtifact {
    fn from(row: ArtifactRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            source_filename: row.source_filename,
            entries: row.entries.0,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_entry_wire_shape() {
        let entry = QaEntry {
            question_no: 1,
            question: "What is REST?".to_string(),
            ideal_answer: "An architectural style.".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "question_no": 1,
                "question": "What is REST?",
                "ideal_answer": "An architectural style."
            })
        );
    }

    #[test]
    fn test_row_conversion_keeps_entry_order() {
        let entries: Vec<QaEntry> = (1..=3)
            .map(|n| QaEntry {
                question_no: n,
                question: format!("q{n}"),
                ideal_answer: format!("a{n}"),
            })
            .collect();
        let row = ArtifactRow {
            id: Uuid::new_v4(),
            owner_id: "user-1".to_string(),
            source_filename: "cv.pdf".to_string(),
            entries: Json(entries.clone()),
            created_at: Utc::now(),
        };
        let artifact = InterviewArtifact::from(row);
        assert_eq!(artifact.entries, entries);
    }
}
