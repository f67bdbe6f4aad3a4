#![forbid(unsafe_code)]
//! pretest - scaffold and pretest coding-problem solutions
//!
//! Turns a scraped problem description into a runnable solution skeleton and
//! checks a solution against the problem's sample test cases by injecting a
//! generated test driver, compiling/running it, and restoring the file:
//! frontend (literal-assignment parsing), backend (type mapping, rendering,
//! driver generation, injection), and tooling (store, external toolchains,
//! CLI).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: the backend emits C++/Python source as *string
//!   literals*; nothing in those strings is executed by this crate.

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod lang;
pub mod store;
pub mod toolchain;

pub use frontend::{parse_input, Literal, ParseError};

pub use backend::{build_driver, inject_driver, remove_driver, scaffold, ParsedCase, TargetType};

pub use lang::TargetLang;
pub use store::{Problem, TestCase};
pub use toolchain::{ProblemSource, Toolchain};
