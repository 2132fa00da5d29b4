//! Shared test utilities for seekbox integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Timing-sensitive helpers assume a paused tokio clock
//! (`#[tokio::test(start_paused = true)]`).

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fixtures;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use fixtures::*;
