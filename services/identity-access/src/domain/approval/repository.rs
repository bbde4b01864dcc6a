//! 审批仓储接口

use async_trait::async_trait;
use tpa_errors::AppResult;

use super::request::{ApprovalId, ApprovalRequest};

/// 审批仓储接口
///
/// `apply_approval` 是对单条记录的读-改-写，必须由调用方按
/// 请求串行化。
#[async_trait]
pub trait ApprovalRepository: Send + Sync {
    /// 根据 ID 查找审批请求
    async fn get(&self, id: &ApprovalId) -> AppResult<Option<ApprovalRequest>>;

    /// 创建审批请求
    async fn create(&self, request: &ApprovalRequest) -> AppResult<ApprovalRequest>;

    /// 更新审批请求
    async fn update(&self, request: &ApprovalRequest) -> AppResult<ApprovalRequest>;

    /// 列出全部审批请求
    async fn list(&self) -> AppResult<Vec<ApprovalRequest>>;
}
