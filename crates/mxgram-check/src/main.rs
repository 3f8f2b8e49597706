//! Email domain checker.
//!
//! Runs three input variants in order: a built-in sample list, the
//! configured address file when present, then interactive input terminated
//! by an empty line.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use mxgram_core::{
    audit::{CheckRecord, ResultsLogger},
    config::CheckerConfig,
    logging,
    mx::MxResolver,
    report,
};
use mxgram_dns::HickoryMxResolver;

const SAMPLE_EMAILS: &[&str] = &[
    "test@gmail.com",
    "example@yahoo.com",
    "info@nonexistentdomain12345.com",
    "user@nodns-domain.test",
    "invalid-email",
    "support@outlook.com",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("mxgram_check")?;

    let cfg = CheckerConfig::load()?;
    let resolver = HickoryMxResolver::new(cfg.dns_timeout, cfg.dns_attempts);
    let results_log = cfg
        .results_log_path
        .as_ref()
        .map(|path| ResultsLogger::new(path, cfg.results_log_json));

    println!("\n🔍 Variant 1: built-in sample list");
    check_all(&resolver, results_log.as_ref(), SAMPLE_EMAILS.iter().copied()).await;

    println!("\n\n🔍 Variant 2: addresses from {}", cfg.emails_file.display());
    match tokio::fs::read_to_string(&cfg.emails_file).await {
        Ok(contents) => {
            check_all(&resolver, results_log.as_ref(), contents.lines()).await;
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!(
                "⚠️  {} not found. Create it with one address per line to use this variant.",
                cfg.emails_file.display()
            );
        }
        Err(e) => return Err(e.into()),
    }

    println!("\n\n🔍 Variant 3: manual input");
    println!("Enter addresses one per line; finish with an empty line:");
    let manual = read_manual_emails().await?;
    if !manual.is_empty() {
        check_all(&resolver, results_log.as_ref(), manual.iter().map(|s| s.as_str())).await;
    }

    Ok(())
}

/// Check every line sequentially, printing each status block as it resolves.
async fn check_all<'a>(
    resolver: &dyn MxResolver,
    results_log: Option<&ResultsLogger>,
    lines: impl Iterator<Item = &'a str>,
) {
    println!("{}", report::banner("EMAIL DOMAIN CHECK"));

    for raw in lines {
        let Some(line_report) = report::check_line(resolver, raw).await else {
            continue;
        };
        println!("\n{}", report::render_report(&line_report));

        if let Some(log) = results_log {
            if let Err(e) = log.write(&CheckRecord::from_report(&line_report)) {
                tracing::warn!("results log write failed: {e}");
            }
        }
    }

    println!("\n{}", report::closing_rule());
}

/// Prompted line-by-line input; an empty line or EOF ends the list.
async fn read_manual_emails() -> anyhow::Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut emails = Vec::new();

    loop {
        print!("Email: ");
        std::io::stdout().flush()?;

        match lines.next_line().await? {
            Some(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    break;
                }
                emails.push(trimmed.to_string());
            }
            None => break,
        }
    }

    Ok(emails)
}
