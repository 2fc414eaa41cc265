use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "node-audit",
    version,
    about = "Security scanner for server-side JavaScript projects",
    long_about = "node-audit scans an Express/Node.js project for common security \
                  weaknesses: vulnerable dependencies, hardcoded secrets, missing \
                  middleware, injection patterns, and weak auth/CORS/cookie configs."
)]
pub struct Cli {
    /// Project root to scan
    #[arg(required = true)]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Where to write the JSON report artifact
    #[arg(short, long, default_value = "security-report.json")]
    pub output: PathBuf,

    /// Exit non-zero when the security score falls below this value
    #[arg(long, value_name = "SCORE")]
    pub fail_under: Option<u32>,

    /// Skip the external `npm audit` pass
    #[arg(long)]
    pub no_audit: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_basic_args() {
        let cli = Cli::try_parse_from(["node-audit", "./api/"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("./api/"));
        assert!(matches!(cli.format, OutputFormat::Terminal));
        assert_eq!(cli.output, PathBuf::from("security-report.json"));
        assert!(!cli.no_audit);
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["node-audit"]).is_err());
    }

    #[test]
    fn test_parse_format_json() {
        let cli = Cli::try_parse_from(["node-audit", "--format", "json", "./api/"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_parse_output_path() {
        let cli = Cli::try_parse_from(["node-audit", "-o", "out/report.json", "./api/"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("out/report.json"));
    }

    #[test]
    fn test_parse_fail_under() {
        let cli = Cli::try_parse_from(["node-audit", "--fail-under", "70", "./api/"]).unwrap();
        assert_eq!(cli.fail_under, Some(70));
    }

    #[test]
    fn test_fail_under_rejects_non_numeric() {
        assert!(Cli::try_parse_from(["node-audit", "--fail-under", "high", "./api/"]).is_err());
    }

    #[test]
    fn test_parse_no_audit() {
        let cli = Cli::try_parse_from(["node-audit", "--no-audit", "./api/"]).unwrap();
        assert!(cli.no_audit);
    }

    #[test]
    fn test_parse_verbose() {
        let cli = Cli::try_parse_from(["node-audit", "-v", "./api/"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::try_parse_from([
            "node-audit",
            "--format",
            "json",
            "--output",
            "report.json",
            "--fail-under",
            "80",
            "--no-audit",
            "--verbose",
            "./api/",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.fail_under, Some(80));
        assert!(cli.no_audit);
        assert!(cli.verbose);
    }
}
