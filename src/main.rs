use clap::Parser;
use node_audit::{
    AuditError, Cli, JsonReporter, OutputFormat, ReportBuilder, Reporter, TerminalReporter,
};
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> node_audit::Result<ExitCode> {
    let report = ReportBuilder::new()
        .with_audit(!cli.no_audit)
        .generate(&cli.path);

    let json = JsonReporter.report(&report);
    fs::write(&cli.output, &json).map_err(|source| AuditError::WriteError {
        path: cli.output.clone(),
        source,
    })?;

    match cli.format {
        OutputFormat::Terminal => print!("{}", TerminalReporter::new(cli.verbose).report(&report)),
        OutputFormat::Json => println!("{json}"),
    }

    if let Some(threshold) = cli.fail_under {
        if report.security_score < threshold {
            eprintln!(
                "security score {} is below the required {}",
                report.security_score, threshold
            );
            return Ok(ExitCode::from(2));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "node_audit=debug" } else { "node_audit=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
