use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use resume_sections::cli::Cli;
use resume_sections::pipeline::{ingest, IngestReport};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match ingest(&cli.document, &cli.database) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &IngestReport) {
    println!("Sample Projects: {:?}", report.sample_projects);
    println!("Education: {:?}", report.education);
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,resume_sections=info",
        1 => "info,resume_sections=debug",
        _ => "debug,resume_sections=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
