//! 权限模板与评估

mod evaluator;
mod source;
mod template;

pub use evaluator::*;
pub use source::*;
pub use template::*;
