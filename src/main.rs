use std::io;

use clap::Parser;

use askchain::cli::{self, Cli};
use askchain::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    cli::run(cli, &mut io::stdout()).await
}
