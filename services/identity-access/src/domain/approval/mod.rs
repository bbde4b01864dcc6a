//! 双人审批工作流

mod repository;
mod request;
mod workflow;

pub use repository::*;
pub use request::*;
pub use workflow::*;
