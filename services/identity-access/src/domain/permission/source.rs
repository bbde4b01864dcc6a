//! 权限模板来源
//!
//! 静态配置查询接口 + 基于内存表的默认实现。

use std::collections::{BTreeSet, HashMap};

use tpa_common::RoleName;

use super::template::PermissionTemplate;
use crate::domain::user::User;

/// 权限模板来源
pub trait PermissionTemplateSource: Send + Sync {
    /// 查询角色模板；没有模板的角色不授予任何权限 (不是错误)
    fn get(&self, role: &RoleName) -> Option<&PermissionTemplate>;

    /// 用户的授予集合: 其全部角色生效权限的并集
    fn granted_for(&self, user: &User) -> BTreeSet<String> {
        let mut granted = BTreeSet::new();
        for role in &user.roles {
            if let Some(template) = self.get(role) {
                granted.extend(template.resolve_effective());
            }
        }
        granted
    }
}

/// 基于内存表的模板集合
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: HashMap<RoleName, PermissionTemplate>,
}

impl TemplateSet {
    /// 从种子数据构建
    pub fn from_seed(seed: crate::domain::policy::TemplateSeed) -> Self {
        Self {
            templates: seed
                .templates
                .into_iter()
                .map(|t| (t.role.clone(), t))
                .collect(),
        }
    }

    /// 内置模板目录
    pub fn builtin() -> Self {
        Self::from_seed(crate::domain::policy::builtin_templates())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl PermissionTemplateSource for TemplateSet {
    fn get(&self, role: &RoleName) -> Option<&PermissionTemplate> {
        self.templates.get(role)
    }
}
