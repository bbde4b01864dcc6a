//! 角色策略表: 互斥集合、冲突矩阵、policy tag 目录

mod condition;
mod seed;
mod tables;

pub use condition::*;
pub use seed::*;
pub use tables::*;
