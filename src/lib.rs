#![allow(async_fn_in_trait)]
#![allow(private_interfaces)]
#![allow(private_bounds)]

pub mod apis;
pub mod builders;
pub mod providers;
pub mod storage;
#[cfg(test)]
pub mod test_utils;
pub mod types;
pub mod workflow;

pub use workflow::{Workflow, WorkflowReport};
