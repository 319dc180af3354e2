//! Validate a question and hand it to an external chain.
//!
//! The chain itself lives outside this crate. [`chain::Chain`] is the seam:
//! plug in a [`chain::command::CommandChain`], a [`chain::http::HttpChain`],
//! or a [`chain::mock::MockChain`] for tests, and drive it with
//! [`flow::Flow`].

pub mod chain;
pub mod cli;
pub mod config;
pub mod consts;
pub mod error;
pub mod flow;
pub mod logging;
pub mod question;

pub use error::ValidationError;
pub use question::ValidatedQuestion;
