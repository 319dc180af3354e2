//! Validate → process once → print.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

use crate::chain::Chain;
use crate::question::ValidatedQuestion;

/// Runs a single question through an injected [`Chain`].
///
/// Holds no state between runs. Chain errors come back exactly as the chain
/// produced them; nothing is retried or printed on failure.
pub struct Flow<C> {
    chain: C,
}

impl<C: Chain> Flow<C> {
    pub fn new(chain: C) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Hand the question to the chain and return its output.
    pub async fn run(&self, question: ValidatedQuestion) -> Result<C::Output> {
        debug!(len = question.text().len(), "processing question");
        let output = self.chain.process(question).await?;
        info!("chain finished");
        Ok(output)
    }

    /// Run, then write the output's `Display` form and a newline to `out`.
    pub async fn run_to<W: Write>(&self, question: ValidatedQuestion, out: &mut W) -> Result<()> {
        let output = self.run(question).await?;
        writeln!(out, "{output}").context("failed to write chain output")?;
        out.flush().context("failed to flush chain output")?;
        Ok(())
    }
}
