use std::process;

use clap::{Parser, Subcommand};

mod cmd;
mod output;
mod session;

#[derive(Parser)]
#[command(name = "armada", version, about = "Active demonstration learning over a partitioned task space")]
struct Cli {
    #[command(flatten)]
    global: session::GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one PAC round over every loaded demonstration
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Acquire demonstrations until every arm is reliable
    Learn(cmd::learn::LearnArgs),
    /// Collect k solved task instances per arm
    Collect(cmd::collect::CollectArgs),
    /// Count demonstrations needed across arm counts
    Sweep(cmd::sweep::SweepArgs),
}

fn main() {
    let cli = Cli::parse();
    if cli.global.json_logs {
        armada_core::tracing::init_tracing_json();
    } else {
        armada_core::tracing::init_tracing();
    }

    let result = match cli.command {
        Commands::Evaluate(args) => cmd::evaluate::run(&cli.global, args),
        Commands::Learn(args) => cmd::learn::run(&cli.global, args),
        Commands::Collect(args) => cmd::collect::run(&cli.global, args),
        Commands::Sweep(args) => cmd::sweep::run(&cli.global, args),
    };
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
