//! Per-address check pipeline and report rendering.

use crate::{
    email::{extract_domain, is_valid_format},
    mx::{classify, DomainCheck, MxResolver},
};

/// At most this many exchange hostnames are shown per valid domain.
pub const MX_DISPLAY_LIMIT: usize = 3;

const RULE_WIDTH: usize = 70;

/// Outcome for one input line. Lookup results only exist for addresses that
/// passed the format check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    InvalidFormat,
    Checked { domain: String, check: DomainCheck },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineReport {
    pub email: String,
    pub outcome: LineOutcome,
}

/// Run the full pipeline for one raw input line.
///
/// Returns `None` for lines that trim to empty. A malformed address is
/// reported without any DNS traffic.
pub async fn check_line(resolver: &dyn MxResolver, raw: &str) -> Option<LineReport> {
    let email = raw.trim();
    if email.is_empty() {
        return None;
    }

    if !is_valid_format(email) {
        return Some(LineReport {
            email: email.to_string(),
            outcome: LineOutcome::InvalidFormat,
        });
    }

    let domain = extract_domain(email).to_string();
    let check = classify(resolver.lookup_mx(&domain).await);

    Some(LineReport {
        email: email.to_string(),
        outcome: LineOutcome::Checked { domain, check },
    })
}

/// Check a batch of raw lines strictly in order. A failure on one line never
/// aborts the rest.
pub async fn check_batch<I, S>(resolver: &dyn MxResolver, lines: I) -> Vec<LineReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reports = Vec::new();
    for raw in lines {
        if let Some(report) = check_line(resolver, raw.as_ref()).await {
            reports.push(report);
        }
    }
    reports
}

/// Section header printed before a batch.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}")
}

/// Closing rule printed after a batch.
pub fn closing_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Multi-line status block for one checked address.
pub fn render_report(report: &LineReport) -> String {
    let mut lines = vec![format!("📧 Email: {}", report.email)];

    match &report.outcome {
        LineOutcome::InvalidFormat => {
            lines.push("   ❌ Status: invalid email format".to_string());
        }
        LineOutcome::Checked { domain, check } => {
            lines.push(format!("   🌐 Domain: {domain}"));
            match check {
                DomainCheck::Valid { mx_hosts } => {
                    let shown = mx_hosts
                        .iter()
                        .take(MX_DISPLAY_LIMIT)
                        .map(|h| h.exchange.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push("   ✅ Status: domain is valid".to_string());
                    lines.push(format!("   📊 MX records found: {}", mx_hosts.len()));
                    lines.push(format!("   🔧 MX servers: {shown}"));
                }
                DomainCheck::DomainNotFound => {
                    lines.push("   ❌ Status: domain does not exist".to_string());
                }
                DomainCheck::NoMx { detail } => {
                    lines.push(format!("   ⚠️  Status: MX records unavailable ({detail})"));
                }
                DomainCheck::Failed { message } => {
                    lines.push(format!("   ❌ Status: check failed - {message}"));
                }
            }
        }
    }

    lines.join("\n")
}
