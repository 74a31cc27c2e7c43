//! Collaboration roles granted to recipient firms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::permissions::SharePermissions;

/// Role a recipient firm holds on a shared matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "collaboration_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollaborationRole {
    /// Read-only access; downloads disabled and watermarking required.
    Viewer,
    /// Full document collaboration without audit visibility.
    Editor,
    /// Editor plus audit-trail visibility.
    Collaborator,
    /// Lead counsel at the partner firm; same grants as collaborator.
    PartnerLead,
}

impl CollaborationRole {
    /// Default permission set for the role, applied at share creation.
    pub fn default_permissions(&self) -> SharePermissions {
        match self {
            Self::Viewer => SharePermissions {
                can_download: false,
                can_upload: false,
                can_comment: true,
                can_view_audit: false,
                watermark_required: true,
            },
            Self::Editor => SharePermissions {
                can_download: true,
                can_upload: true,
                can_comment: true,
                can_view_audit: false,
                watermark_required: false,
            },
            Self::Collaborator | Self::PartnerLead => SharePermissions {
                can_download: true,
                can_upload: true,
                can_comment: true,
                can_view_audit: true,
                watermark_required: false,
            },
        }
    }

    /// Returns the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Collaborator => "collaborator",
            Self::PartnerLead => "partner_lead",
        }
    }
}

impl fmt::Display for CollaborationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CollaborationRole {
    type Err = lexvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            "collaborator" => Ok(Self::Collaborator),
            "partner_lead" => Ok(Self::PartnerLead),
            _ => Err(lexvault_core::AppError::validation(format!(
                "Invalid collaboration role: '{s}'. Expected one of: viewer, editor, collaborator, partner_lead"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_defaults() {
        let p = CollaborationRole::Viewer.default_permissions();
        assert!(!p.can_download);
        assert!(!p.can_upload);
        assert!(p.can_comment);
        assert!(!p.can_view_audit);
        assert!(p.watermark_required);
    }

    #[test]
    fn test_editor_defaults() {
        let p = CollaborationRole::Editor.default_permissions();
        assert!(p.can_download);
        assert!(p.can_upload);
        assert!(p.can_comment);
        assert!(!p.can_view_audit);
        assert!(!p.watermark_required);
    }

    #[test]
    fn test_collaborator_and_partner_lead_add_audit() {
        for role in [CollaborationRole::Collaborator, CollaborationRole::PartnerLead] {
            let p = role.default_permissions();
            assert!(p.can_download);
            assert!(p.can_upload);
            assert!(p.can_view_audit);
            assert!(!p.watermark_required);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "partner_lead".parse::<CollaborationRole>().unwrap(),
            CollaborationRole::PartnerLead
        );
        assert!("owner".parse::<CollaborationRole>().is_err());
    }
}
