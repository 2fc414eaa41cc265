use crate::report::SecurityReport;
use crate::reporter::Reporter;
use crate::rules::{Issue, Severity, SeverityCounts};
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn severity_label(&self, severity: Severity) -> colored::ColoredString {
        let label = format!("[{severity}]");
        match severity {
            Severity::Critical => label.red().bold(),
            Severity::High => label.yellow().bold(),
            Severity::Medium => label.cyan(),
            Severity::Low => label.white(),
            Severity::Info => label.dimmed(),
        }
    }

    fn score_label(&self, score: u32) -> colored::ColoredString {
        let label = format!("{score}/100");
        if score >= 80 {
            label.green().bold()
        } else if score >= 50 {
            label.yellow().bold()
        } else {
            label.red().bold()
        }
    }

    fn format_issue(&self, issue: &Issue) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "  {} {}: {}\n",
            self.severity_label(issue.severity),
            issue.kind,
            issue.name
        ));

        match issue.line {
            Some(line) => output.push_str(&format!("    Location: {}:{}\n", issue.file, line)),
            None => output.push_str(&format!("    Location: {}\n", issue.file)),
        }
        if let Some(ref snippet) = issue.snippet {
            output.push_str(&format!("    Code: {}\n", snippet.trim().dimmed()));
        }
        if self.verbose {
            output.push_str(&format!("    Fix: {}\n", issue.remediation.green()));
        }

        output
    }

    fn format_section(&self, title: &str, issues: &[Issue]) -> String {
        if issues.is_empty() {
            return String::new();
        }
        let mut output = format!("{}\n", title.bold());
        for issue in issues {
            output.push_str(&self.format_issue(issue));
        }
        output.push('\n');
        output
    }
}

fn total_counts(report: &SecurityReport) -> SeverityCounts {
    let sections = [
        &report.secrets.counts,
        &report.middlewares.counts,
        &report.cors.counts,
        &report.rate_limit.counts,
        &report.sql_injection.counts,
        &report.auth.counts,
        &report.input_validation.counts,
        &report.csrf.counts,
        &report.cookies.counts,
    ];
    let mut total = SeverityCounts::default();
    for counts in sections {
        total.critical += counts.critical;
        total.high += counts.high;
        total.medium += counts.medium;
        total.low += counts.low;
        total.info += counts.info;
    }
    total
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &SecurityReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("node-audit v{}", env!("CARGO_PKG_VERSION")).bold()
        ));
        output.push_str(&format!(
            "Security Score: {}\n\n",
            self.score_label(report.security_score)
        ));

        let audit = &report.dependencies.audit;
        if audit.success {
            let v = &audit.vulnerabilities;
            output.push_str(&format!(
                "{}\n  {} critical, {} high, {} moderate, {} low known vulnerabilities\n\n",
                "Dependencies".bold(),
                v.critical.to_string().red().bold(),
                v.high.to_string().yellow().bold(),
                v.moderate.to_string().cyan(),
                v.low
            ));
        } else if let Some(ref error) = audit.error {
            output.push_str(&format!(
                "{}\n  audit unavailable: {}\n\n",
                "Dependencies".bold(),
                error.dimmed()
            ));
        }
        if !report.dependencies.packages.missing.is_empty() {
            output.push_str(&format!(
                "  Recommended but not declared: {}\n\n",
                report.dependencies.packages.missing.join(", ").yellow()
            ));
        }

        output.push_str(&self.format_section("Secrets", &report.secrets.issues));
        if !report.secrets.env.missing.is_empty() {
            output.push_str(&format!(
                "{}\n  Used in code but defined in no env file: {}\n\n",
                "Environment".bold(),
                report.secrets.env.missing.join(", ").yellow()
            ));
        }

        if !report.middlewares.missing_high_priority.is_empty() {
            output.push_str(&format!(
                "{}\n  Missing high-priority middleware: {}\n\n",
                "Middleware".bold(),
                report
                    .middlewares
                    .missing_high_priority
                    .join(", ")
                    .yellow()
                    .bold()
            ));
        }
        output.push_str(&self.format_section("Middleware configuration", &report.middlewares.issues));
        output.push_str(&self.format_section("CORS", &report.cors.issues));
        output.push_str(&self.format_section("Rate limiting", &report.rate_limit.issues));

        if !report.rate_limit.unprotected_endpoints.is_empty() {
            output.push_str(&format!("{}\n", "Unprotected endpoints".bold()));
            for endpoint in &report.rate_limit.unprotected_endpoints {
                let line = endpoint
                    .line
                    .map(|l| format!(":{l}"))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  {} {} ({}{})\n",
                    self.severity_label(Severity::Medium),
                    endpoint.route,
                    endpoint.file,
                    line
                ));
            }
            output.push('\n');
        }

        output.push_str(&self.format_section("SQL injection", &report.sql_injection.issues));
        output.push_str(&self.format_section("Authentication", &report.auth.issues));
        output.push_str(&self.format_section("Input validation", &report.input_validation.issues));
        output.push_str(&self.format_section("CSRF", &report.csrf.issues));
        output.push_str(&self.format_section("Cookies", &report.cookies.issues));

        output.push_str(&format!("{}\n", "━".repeat(50)));
        let totals = total_counts(report);
        if report.stats.total_issues == 0 {
            output.push_str(&"No security issues found.\n".green().to_string());
        } else {
            output.push_str(&format!(
                "Summary: {} issue(s) ({} critical, {} high, {} medium, {} low)\n",
                report.stats.total_issues,
                totals.critical.to_string().red().bold(),
                totals.high.to_string().yellow().bold(),
                totals.medium.to_string().cyan(),
                totals.low
            ));
        }
        output.push_str(&format!(
            "Scanned in {}ms\n",
            report.stats.execution_time
        ));

        output
    }
}
