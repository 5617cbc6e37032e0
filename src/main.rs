//! This crate contains the source code for the binary of the level visualiser.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::io;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use levelviz::Args;

fn main() -> Result<()> {
    install()?;

    let args = Args::parse();
    levelviz::init_logging(args.verbose)?;

    let mut stdout = io::stdout().lock();
    levelviz::run(&args, &mut stdout)
}
