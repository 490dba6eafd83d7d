//! Approval workflow domain: statuses, the five fixed review stages, and
//! the embedded per-stage entry records.
//!
//! Every listing gets exactly one approval record; the record carries a
//! fixed-length, ordered list of five [`StageEntry`] values that is
//! initialized fully at creation and never grows, shrinks, or reorders.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Overall moderation status of an approval record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Returned,
}

impl ApprovalStatus {
    /// Whether this status represents a final decision that stamps the
    /// overall decision timestamp.
    pub fn is_decision(self) -> bool {
        matches!(self, ApprovalStatus::Approved | ApprovalStatus::Rejected)
    }
}

/// The five review checkpoints, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "approval_stage", rename_all = "snake_case")]
pub enum ApprovalStage {
    InitialCheck,
    ContentCheck,
    PhotoCheck,
    LocationCheck,
    FinalApproval,
}

impl ApprovalStage {
    /// All stages in workflow order.
    pub const ALL: [ApprovalStage; 5] = [
        ApprovalStage::InitialCheck,
        ApprovalStage::ContentCheck,
        ApprovalStage::PhotoCheck,
        ApprovalStage::LocationCheck,
        ApprovalStage::FinalApproval,
    ];
}

/// Status of a single stage entry, independent of the overall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Pending,
    Approved,
    Rejected,
}

impl StageStatus {
    /// Map an overall status onto the stage entry being stamped by the
    /// same decision. Anything other than an approval or rejection resets
    /// the entry to pending.
    pub fn from_overall(status: Option<ApprovalStatus>) -> StageStatus {
        match status {
            Some(ApprovalStatus::Approved) => StageStatus::Approved,
            Some(ApprovalStatus::Rejected) => StageStatus::Rejected,
            _ => StageStatus::Pending,
        }
    }
}

/// One entry in the fixed five-element stage history, stored as JSONB on
/// the approval row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEntry {
    pub stage: ApprovalStage,
    pub status: StageStatus,
    pub reviewer_id: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Stamp the entry for `target` in place: status follows the overall
/// decision being applied, reviewer and notes are recorded, and the
/// entry's decision timestamp is set. Entries for other stages are never
/// touched. Returns `false` if `target` has no entry in the list.
pub fn apply_stage_update(
    stages: &mut [StageEntry],
    target: ApprovalStage,
    overall: Option<ApprovalStatus>,
    reviewer_id: Option<DbId>,
    decided_at: Timestamp,
    notes: &str,
) -> bool {
    let Some(entry) = stages.iter_mut().find(|e| e.stage == target) else {
        return false;
    };
    entry.status = StageStatus::from_overall(overall);
    entry.reviewer_id = reviewer_id;
    entry.decided_at = Some(decided_at);
    entry.notes = Some(notes.to_string());
    true
}

/// Build the initial stage history: all five stages pending, untouched.
pub fn initial_stages() -> Vec<StageEntry> {
    ApprovalStage::ALL
        .into_iter()
        .map(|stage| StageEntry {
            stage,
            status: StageStatus::Pending,
            reviewer_id: None,
            decided_at: None,
            notes: None,
        })
        .collect()
}
