use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application lifecycle state of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Registered,
    Confirmed,
    Withdrawn,
    Disqualified,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Confirmed => "confirmed",
            Self::Withdrawn => "withdrawn",
            Self::Disqualified => "disqualified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "registered" => Some(Self::Registered),
            "confirmed" => Some(Self::Confirmed),
            "withdrawn" => Some(Self::Withdrawn),
            "disqualified" => Some(Self::Disqualified),
            _ => None,
        }
    }

    /// Approval is valid only from `registered`.
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::Registered)
    }

    /// Rejection is valid from any state except `disqualified`. A confirmed
    /// application may still be rejected (retroactive disqualification);
    /// the only guard is against double-rejection.
    pub fn can_reject(&self) -> bool {
        !matches!(self, Self::Disqualified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "partial" => Some(Self::Partial),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PageantStatus {
    Draft,
    Published,
    InProgress,
    Completed,
}

impl PageantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Scores may only be recorded while the pageant is running or wrapped.
    pub fn accepts_scores(&self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_only_from_registered() {
        assert!(ParticipantStatus::Registered.can_approve());
        assert!(!ParticipantStatus::Confirmed.can_approve());
        assert!(!ParticipantStatus::Withdrawn.can_approve());
        assert!(!ParticipantStatus::Disqualified.can_approve());
    }

    #[test]
    fn reject_from_anything_but_disqualified() {
        assert!(ParticipantStatus::Registered.can_reject());
        assert!(ParticipantStatus::Confirmed.can_reject());
        assert!(ParticipantStatus::Withdrawn.can_reject());
        assert!(!ParticipantStatus::Disqualified.can_reject());
    }

    #[test]
    fn status_strings_round_trip() {
        for s in [
            ParticipantStatus::Registered,
            ParticipantStatus::Confirmed,
            ParticipantStatus::Withdrawn,
            ParticipantStatus::Disqualified,
        ] {
            assert_eq!(ParticipantStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ParticipantStatus::parse("approved"), None);
    }

    #[test]
    fn scoring_window() {
        assert!(!PageantStatus::Draft.accepts_scores());
        assert!(!PageantStatus::Published.accepts_scores());
        assert!(PageantStatus::InProgress.accepts_scores());
        assert!(PageantStatus::Completed.accepts_scores());
    }
}
