//! 基础设施层: 仓储实现

mod memory;

pub use memory::*;
