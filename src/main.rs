use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("fretboard=debug")
    } else {
        EnvFilter::new("fretboard=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Project(args) => cli::project::run(args, cli.format, cli.verbose)?,
        cli::Commands::Solve(args) => cli::solve::run(args, cli.format, cli.verbose)?,
        cli::Commands::Tunings => cli::tunings::run(cli.format)?,
    }

    Ok(())
}
