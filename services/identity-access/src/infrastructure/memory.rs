//! 内存仓储
//!
//! 进程内 HashMap 实现，用于测试与冒烟运行。锁中毒按内部错误
//! 上报而不是 panic。

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tpa_common::UserId;
use tpa_errors::{AppError, AppResult};

use crate::domain::approval::{ApprovalId, ApprovalRepository, ApprovalRequest};
use crate::domain::user::{User, UserRepository};

fn poisoned() -> AppError {
    AppError::internal("repository lock poisoned")
}

/// 内存用户仓储
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入用户，绕过领域校验，仅供初始化
    pub fn seed(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id.clone(), user);
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(id).cloned())
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }
}

/// 内存审批仓储
#[derive(Default)]
pub struct InMemoryApprovalRepository {
    requests: RwLock<HashMap<ApprovalId, ApprovalRequest>>,
}

impl InMemoryApprovalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApprovalRepository for InMemoryApprovalRepository {
    async fn get(&self, id: &ApprovalId) -> AppResult<Option<ApprovalRequest>> {
        let requests = self.requests.read().map_err(|_| poisoned())?;
        Ok(requests.get(id).cloned())
    }

    async fn create(&self, request: &ApprovalRequest) -> AppResult<ApprovalRequest> {
        let mut requests = self.requests.write().map_err(|_| poisoned())?;
        if requests.contains_key(&request.id) {
            return Err(AppError::conflict(format!(
                "approval request '{}' already exists",
                request.id
            )));
        }
        requests.insert(request.id.clone(), request.clone());
        Ok(request.clone())
    }

    async fn update(&self, request: &ApprovalRequest) -> AppResult<ApprovalRequest> {
        let mut requests = self.requests.write().map_err(|_| poisoned())?;
        if !requests.contains_key(&request.id) {
            return Err(AppError::not_found("approval request not found"));
        }
        requests.insert(request.id.clone(), request.clone());
        Ok(request.clone())
    }

    async fn list(&self) -> AppResult<Vec<ApprovalRequest>> {
        let requests = self.requests.read().map_err(|_| poisoned())?;
        Ok(requests.values().cloned().collect())
    }
}
