//! 审批流服务

use std::sync::Arc;

use tpa_common::TenantId;
use tpa_errors::{AppError, AppResult};
use tracing::info;

use crate::domain::approval::{ApprovalId, ApprovalRepository, ApprovalRequest, ApprovalWorkflow};
use crate::domain::user::User;

/// 审批流服务
pub struct ApprovalFlowService<R>
where
    R: ApprovalRepository,
{
    approvals: Arc<R>,
}

impl<R> ApprovalFlowService<R>
where
    R: ApprovalRepository,
{
    pub fn new(approvals: Arc<R>) -> Self {
        Self { approvals }
    }

    /// 创建审批请求并持久化
    pub async fn create_request(
        &self,
        op: impl Into<String>,
        tenant_id: TenantId,
        target_id: Option<String>,
        initiator: &User,
    ) -> AppResult<ApprovalRequest> {
        use metrics::counter;

        let request = ApprovalWorkflow::create_request(op, tenant_id, target_id, initiator)?;
        let created = self.approvals.create(&request).await?;

        counter!("approval_requests_total").increment(1);
        info!(id = %created.id, op = %created.op, "approval request created");
        Ok(created)
    }

    /// 记录一次审批
    pub async fn approve(&self, id: &ApprovalId, approver: &User) -> AppResult<ApprovalRequest> {
        use metrics::counter;

        let request = self
            .approvals
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("approval request not found"))?;

        let updated = ApprovalWorkflow::apply(request, approver)?;
        let saved = self.approvals.update(&updated).await?;

        counter!("approval_decisions_total",
            "status" => if saved.is_approved() { "approved" } else { "pending" }
        )
        .increment(1);
        info!(id = %saved.id, status = %saved.status, "approval recorded");
        Ok(saved)
    }

    /// 列出全部审批请求
    pub async fn list(&self) -> AppResult<Vec<ApprovalRequest>> {
        self.approvals.list().await
    }
}
