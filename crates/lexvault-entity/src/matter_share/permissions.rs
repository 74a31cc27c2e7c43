//! Share permission sets and override merging.

use serde::{Deserialize, Serialize};

/// Effective permissions granted by a matter share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SharePermissions {
    /// Recipient may download document bytes.
    pub can_download: bool,
    /// Recipient may upload documents into the matter.
    pub can_upload: bool,
    /// Recipient may comment.
    pub can_comment: bool,
    /// Recipient may view the matter audit trail.
    pub can_view_audit: bool,
    /// Documents released to the recipient must carry a watermark.
    pub watermark_required: bool,
}

impl SharePermissions {
    /// Merges caller-supplied overrides key-by-key; the caller wins.
    pub fn merged_with(mut self, overrides: &SharePermissionOverrides) -> Self {
        if let Some(v) = overrides.can_download {
            self.can_download = v;
        }
        if let Some(v) = overrides.can_upload {
            self.can_upload = v;
        }
        if let Some(v) = overrides.can_comment {
            self.can_comment = v;
        }
        if let Some(v) = overrides.can_view_audit {
            self.can_view_audit = v;
        }
        if let Some(v) = overrides.watermark_required {
            self.watermark_required = v;
        }
        self
    }
}

/// Per-key permission overrides supplied at share creation or update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePermissionOverrides {
    /// Override download permission.
    pub can_download: Option<bool>,
    /// Override upload permission.
    pub can_upload: Option<bool>,
    /// Override comment permission.
    pub can_comment: Option<bool>,
    /// Override audit-view permission.
    pub can_view_audit: Option<bool>,
    /// Override watermark requirement.
    pub watermark_required: Option<bool>,
}

impl SharePermissionOverrides {
    /// Returns whether no key is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter_share::CollaborationRole;

    #[test]
    fn test_merge_caller_wins_per_key() {
        let base = CollaborationRole::Viewer.default_permissions();
        let merged = base.merged_with(&SharePermissionOverrides {
            can_download: Some(true),
            watermark_required: Some(false),
            ..Default::default()
        });
        assert!(merged.can_download);
        assert!(!merged.watermark_required);
        // Untouched keys keep the role defaults.
        assert!(!merged.can_upload);
        assert!(merged.can_comment);
        assert!(!merged.can_view_audit);
    }

    #[test]
    fn test_empty_overrides_are_identity() {
        let base = CollaborationRole::Editor.default_permissions();
        assert_eq!(base.merged_with(&SharePermissionOverrides::default()), base);
    }
}
