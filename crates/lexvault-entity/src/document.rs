//! Document metadata and confidentiality classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Confidentiality label stamped into cross-firm watermarks.
///
/// When a document carries more than one flag, a single label is chosen
/// with precedence privileged > work product > confidential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidentialityLabel {
    /// Attorney-client privileged material.
    Privileged,
    /// Attorney work product.
    WorkProduct,
    /// Confidential (also the default when no flag is set).
    Confidential,
}

impl ConfidentialityLabel {
    /// Returns the label as a display string for watermarking.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Privileged => "PRIVILEGED",
            Self::WorkProduct => "ATTORNEY WORK PRODUCT",
            Self::Confidential => "CONFIDENTIAL",
        }
    }
}

/// Document metadata as read from the document store.
///
/// The file bytes themselves are served by an external collaborator; only
/// the metadata needed for cross-firm access mediation lives here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Matter this document belongs to.
    pub matter_id: Uuid,
    /// Owning firm.
    pub firm_id: Uuid,
    /// Original file name.
    pub file_name: String,
    /// MIME type, e.g. `application/pdf`.
    pub mime_type: String,
    /// Marked confidential.
    pub is_confidential: bool,
    /// Marked attorney-client privileged.
    pub is_privileged: bool,
    /// Marked attorney work product.
    pub is_work_product: bool,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Returns whether the document is a PDF.
    pub fn is_pdf(&self) -> bool {
        self.mime_type == "application/pdf"
    }

    /// Resolves the single confidentiality label for watermarking.
    pub fn confidentiality_label(&self) -> ConfidentialityLabel {
        if self.is_privileged {
            ConfidentialityLabel::Privileged
        } else if self.is_work_product {
            ConfidentialityLabel::WorkProduct
        } else {
            ConfidentialityLabel::Confidential
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(confidential: bool, privileged: bool, work_product: bool) -> Document {
        Document {
            id: Uuid::new_v4(),
            matter_id: Uuid::new_v4(),
            firm_id: Uuid::new_v4(),
            file_name: "brief.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            is_confidential: confidential,
            is_privileged: privileged,
            is_work_product: work_product,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_label_precedence() {
        assert_eq!(
            doc(true, true, true).confidentiality_label(),
            ConfidentialityLabel::Privileged
        );
        assert_eq!(
            doc(true, false, true).confidentiality_label(),
            ConfidentialityLabel::WorkProduct
        );
        assert_eq!(
            doc(true, false, false).confidentiality_label(),
            ConfidentialityLabel::Confidential
        );
    }

    #[test]
    fn test_label_defaults_to_confidential() {
        assert_eq!(
            doc(false, false, false).confidentiality_label(),
            ConfidentialityLabel::Confidential
        );
    }

    #[test]
    fn test_is_pdf() {
        let mut d = doc(false, false, false);
        assert!(d.is_pdf());
        d.mime_type = "text/plain".to_string();
        assert!(!d.is_pdf());
    }
}
