//! 审批请求实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tpa_common::{TenantId, UserId};
use uuid::Uuid;

/// 审批法定人数: 两名互不相同的非发起人审批者
pub const APPROVAL_QUORUM: usize = 2;

/// 审批请求 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalId(pub Uuid);

impl ApprovalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ApprovalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ApprovalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ApprovalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// 审批状态
///
/// PENDING 要么永远保持，要么在达到法定人数后变为 APPROVED
/// (终态)。当前设计没有驳回/取消转换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "PENDING"),
            ApprovalStatus::Approved => write!(f, "APPROVED"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(ApprovalStatus::Pending),
            "APPROVED" => Ok(ApprovalStatus::Approved),
            _ => Err(format!("Unknown approval status: {}", s)),
        }
    }
}

/// 单条审批决定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub user_id: UserId,
    pub at: DateTime<Utc>,
}

/// 审批请求
///
/// 不变式:
/// - initiator_user_id 不会出现在 approvals 中
/// - status == APPROVED 当且仅当 approvals.len() >= 法定人数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub id: ApprovalId,
    /// 待审批的操作标识
    pub op: String,
    pub tenant_id: TenantId,
    /// 操作目标 (可选)
    pub target_id: Option<String>,
    pub initiator_user_id: UserId,
    pub status: ApprovalStatus,
    /// 审批决定，按审批者唯一
    pub approvals: Vec<ApprovalDecision>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApprovalRequest {
    pub fn new(
        op: impl Into<String>,
        tenant_id: TenantId,
        target_id: Option<String>,
        initiator_user_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ApprovalId::new(),
            op: op.into(),
            tenant_id,
            target_id,
            initiator_user_id,
            status: ApprovalStatus::Pending,
            approvals: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 是否已达法定人数
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    /// 指定用户是否已审批过
    pub fn has_approval_from(&self, user_id: &UserId) -> bool {
        self.approvals.iter().any(|d| &d.user_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = ApprovalRequest::new(
            "company.delete",
            TenantId::from("t1"),
            Some("c42".to_string()),
            UserId::from("u1"),
        );

        assert_eq!(request.status, ApprovalStatus::Pending);
        assert!(!request.is_approved());
        assert!(request.approvals.is_empty());
        assert_eq!(request.created_at, request.updated_at);
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(
            "PENDING".parse::<ApprovalStatus>().unwrap(),
            ApprovalStatus::Pending
        );
        assert_eq!(
            "approved".parse::<ApprovalStatus>().unwrap(),
            ApprovalStatus::Approved
        );
        assert!("REJECTED".parse::<ApprovalStatus>().is_err());
        assert_eq!(ApprovalStatus::Approved.to_string(), "APPROVED");
    }

    #[test]
    fn test_has_approval_from() {
        let mut request = ApprovalRequest::new(
            "mandate.manage",
            TenantId::from("t1"),
            None,
            UserId::from("u1"),
        );
        request.approvals.push(ApprovalDecision {
            user_id: UserId::from("sa1"),
            at: Utc::now(),
        });

        assert!(request.has_approval_from(&UserId::from("sa1")));
        assert!(!request.has_approval_from(&UserId::from("sa2")));
    }
}
