//! 用户仓储接口

use async_trait::async_trait;
use tpa_common::UserId;
use tpa_errors::AppResult;

use super::user::User;

/// 用户仓储接口
///
/// 角色/会话/claims 的变更由调用方通过 `save` 持久化。
/// `assign_role` 这类读-改-写操作必须由调用方按用户串行化
/// (行级事务或乐观版本检查)。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据 ID 查找用户
    async fn get(&self, id: &UserId) -> AppResult<Option<User>>;

    /// 保存用户
    async fn save(&self, user: &User) -> AppResult<User>;
}
