//! Benchmark harness support.
//!
//! A benchmark case is one scheduling problem (`team` + `tasks`) that a
//! text generator is asked to plan. [`run_case`] scores one generator answer
//! against the deterministic baseline; [`CaseGenerator`] produces seeded
//! random cases in the same format.

mod case;
mod generator;

pub use case::{run_case, run_case_text, BenchmarkCase, CaseReport, PROMPT_NOTES};
pub use generator::CaseGenerator;
