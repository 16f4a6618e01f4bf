use clap::{Parser, Subcommand};

use self::{evaluate::EvaluateArg, generate_dataset::GenerateDatasetArg, sweep::SweepArg};

mod evaluate;
mod generate_dataset;
mod sweep;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank features by a weighted ensemble of measures, optionally filtering them
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Sweep measure weightings and report the stability front
    Sweep(#[clap(flatten)] SweepArg),
    /// Generate a synthetic labeled dataset
    GenerateDataset(#[clap(flatten)] GenerateDatasetArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::Sweep(arg) => sweep::run(&arg)?,
        Mode::GenerateDataset(arg) => generate_dataset::run(&arg)?,
    }
    Ok(())
}
