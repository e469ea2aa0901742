//! `billsplit` executable entry point.

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = billsplit_cli::Cli::parse();
    println!("{}", billsplit_cli::run(&cli)?);
    Ok(())
}
