//! The three pipeline stages.
//!
//! Each stage is an independently invocable orchestration that reads its
//! inputs from disk (or a URL), writes its outputs to disk, and shares no
//! in-memory state with the others. Stages run strictly sequentially,
//! ordered by an external orchestrator; any failure aborts the current
//! invocation.

pub mod featurize;
pub mod ingest;
pub mod train;
