//! Share status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a matter share.
///
/// Allowed transitions: pending → accepted | declined;
/// accepted → revoked | expired. Declined, revoked, and expired are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShareStatus {
    /// Invitation sent, awaiting the recipient firm's response.
    Pending,
    /// Invitation accepted; the share is live.
    Accepted,
    /// Invitation declined by the recipient firm.
    Declined,
    /// Share revoked by the owning firm.
    Revoked,
    /// Share lapsed past its expiry.
    Expired,
}

impl ShareStatus {
    /// Returns whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Declined | Self::Revoked | Self::Expired)
    }

    /// Returns whether a transition to `next` is allowed.
    pub fn can_transition_to(&self, next: ShareStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted)
                | (Self::Pending, Self::Declined)
                | (Self::Accepted, Self::Revoked)
                | (Self::Accepted, Self::Expired)
        )
    }

    /// Returns the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ShareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShareStatus {
    type Err = lexvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "revoked" => Ok(Self::Revoked),
            "expired" => Ok(Self::Expired),
            _ => Err(lexvault_core::AppError::validation(format!(
                "Invalid share status: '{s}'. Expected one of: pending, accepted, declined, revoked, expired"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(ShareStatus::Pending.can_transition_to(ShareStatus::Accepted));
        assert!(ShareStatus::Pending.can_transition_to(ShareStatus::Declined));
        assert!(ShareStatus::Accepted.can_transition_to(ShareStatus::Revoked));
        assert!(ShareStatus::Accepted.can_transition_to(ShareStatus::Expired));
    }

    #[test]
    fn test_forbidden_transitions() {
        assert!(!ShareStatus::Pending.can_transition_to(ShareStatus::Revoked));
        assert!(!ShareStatus::Pending.can_transition_to(ShareStatus::Expired));
        assert!(!ShareStatus::Accepted.can_transition_to(ShareStatus::Declined));
        assert!(!ShareStatus::Accepted.can_transition_to(ShareStatus::Pending));
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        for terminal in [
            ShareStatus::Declined,
            ShareStatus::Revoked,
            ShareStatus::Expired,
        ] {
            assert!(terminal.is_terminal());
            for next in [
                ShareStatus::Pending,
                ShareStatus::Accepted,
                ShareStatus::Declined,
                ShareStatus::Revoked,
                ShareStatus::Expired,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "accepted".parse::<ShareStatus>().unwrap(),
            ShareStatus::Accepted
        );
        assert_eq!(
            "REVOKED".parse::<ShareStatus>().unwrap(),
            ShareStatus::Revoked
        );
        assert!("cancelled".parse::<ShareStatus>().is_err());
    }
}
