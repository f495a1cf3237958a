//! Programmatic entry points behind the command line

pub mod orchestration;

pub use orchestration::{
    plan_release, run_publish_workflow, PublishWorkflowArgs, ReleasePlan, WorkflowResult,
};
