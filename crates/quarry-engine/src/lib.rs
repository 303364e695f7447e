//! # quarry-engine
//!
//! The query pipeline of quarry: a [`SelectStatement`] is checked by the
//! [`validator`], turned into a logical [`plan`] tree by the [`planner`],
//! and executed by the pull-based iterators in [`exec`]. The [`Engine`]
//! driver ties the three together.
//!
//! Execution is single-threaded and demand-driven: the driver repeatedly
//! calls `next` on the root executor, and each operator pulls from its child.
//! Given the same input bytes the pipeline is fully deterministic — scans
//! preserve source order, aggregation emits groups in first-occurrence order
//! and sorting is stable.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod exec;
pub mod plan;
pub mod planner;
pub mod statement;
pub mod validator;

pub use aggregate::{Aggregate, AggregateDef, AggregateState, AggregationType};
pub use engine::Engine;
pub use error::EngineError;
pub use plan::ExecutionPlan;
pub use planner::QueryPlanner;
pub use statement::SelectStatement;
pub use validator::StatementValidator;
