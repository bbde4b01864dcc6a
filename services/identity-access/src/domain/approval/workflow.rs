//! 审批工作流
//!
//! 状态机: PENDING --(两名互不相同的非发起人 Superadmin 审批)-->
//! APPROVED (终态)。对同一请求的并发 apply 必须由调用方串行化，
//! 否则会丢失更新或漏掉重复审批检查。

use chrono::Utc;
use tpa_common::TenantId;
use tpa_errors::{AppError, AppResult};

use super::request::{APPROVAL_QUORUM, ApprovalDecision, ApprovalRequest, ApprovalStatus};
use crate::domain::user::User;

/// 审批工作流
pub struct ApprovalWorkflow;

impl ApprovalWorkflow {
    /// 创建审批请求
    ///
    /// 无任何角色的发起人不能发起任何操作。
    pub fn create_request(
        op: impl Into<String>,
        tenant_id: TenantId,
        target_id: Option<String>,
        initiator: &User,
    ) -> AppResult<ApprovalRequest> {
        if initiator.roles.is_empty() {
            return Err(AppError::validation(
                "initiator holds no roles and cannot create approval requests",
            ));
        }

        Ok(ApprovalRequest::new(
            op,
            tenant_id,
            target_id,
            initiator.id.clone(),
        ))
    }

    /// 应用一次审批
    ///
    /// - 发起人不能审批自己的请求 (Forbidden)
    /// - 只有 Superadmin 可以审批 (Forbidden)
    /// - 已 APPROVED 的请求原样返回 (幂等)
    /// - 同一审批者重复审批 PENDING 请求是错误 (DuplicateAction)
    /// - 追加决定后达到法定人数则翻转为 APPROVED
    pub fn apply(request: ApprovalRequest, approver: &User) -> AppResult<ApprovalRequest> {
        if approver.id == request.initiator_user_id {
            return Err(AppError::forbidden(
                "initiator cannot approve their own request",
            ));
        }

        if !approver.is_superadmin() {
            return Err(AppError::forbidden(
                "approver lacks approval authority",
            ));
        }

        if request.status != ApprovalStatus::Pending {
            return Ok(request);
        }

        if request.has_approval_from(&approver.id) {
            return Err(AppError::duplicate_action(
                "user has already approved this request",
            ));
        }

        let mut updated = request;
        updated.approvals.push(ApprovalDecision {
            user_id: approver.id.clone(),
            at: Utc::now(),
        });
        if updated.approvals.len() >= APPROVAL_QUORUM {
            updated.status = ApprovalStatus::Approved;
        }
        updated.updated_at = Utc::now();

        Ok(updated)
    }

    /// 纯谓词: 请求是否已获批
    pub fn is_approved(request: &ApprovalRequest) -> bool {
        request.is_approved()
    }
}
