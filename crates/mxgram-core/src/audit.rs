//! Optional append-only log of check outcomes.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::Serialize;

use crate::{
    errors::Error,
    mx::DomainCheck,
    report::{LineOutcome, LineReport},
    Result,
};

/// RFC3339 timestamp in UTC (for log records).
pub fn iso_timestamp_utc() -> String {
    Utc::now().to_rfc3339()
}

/// One per-address record appended to the results log.
#[derive(Clone, Debug, Serialize)]
pub struct CheckRecord {
    pub timestamp: String,
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckRecord {
    pub fn from_report(report: &LineReport) -> Self {
        match &report.outcome {
            LineOutcome::InvalidFormat => Self {
                timestamp: iso_timestamp_utc(),
                email: report.email.clone(),
                domain: None,
                status: "invalid_format".to_string(),
                mx_count: None,
                detail: None,
            },
            LineOutcome::Checked { domain, check } => {
                let (mx_count, detail) = match check {
                    DomainCheck::Valid { mx_hosts } => (Some(mx_hosts.len()), None),
                    DomainCheck::DomainNotFound => (None, None),
                    DomainCheck::NoMx { detail } => (None, Some(detail.to_string())),
                    DomainCheck::Failed { message } => (None, Some(message.clone())),
                };
                Self {
                    timestamp: iso_timestamp_utc(),
                    email: report.email.clone(),
                    domain: Some(domain.clone()),
                    status: check.status_tag().to_string(),
                    mx_count,
                    detail,
                }
            }
        }
    }
}

/// Append-only results log, JSON lines or plain text blocks.
#[derive(Clone, Debug)]
pub struct ResultsLogger {
    path: PathBuf,
    json: bool,
}

impl ResultsLogger {
    pub fn new(path: impl Into<PathBuf>, json: bool) -> Self {
        Self {
            path: path.into(),
            json,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, record: &CheckRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if self.json {
            let line = serde_json::to_string(record)?;
            writeln!(file, "{line}")?;
            return Ok(());
        }

        // Plain text format for readability.
        let value = serde_json::to_value(record)?;
        let Some(obj) = value.as_object() else {
            return Err(Error::External(
                "check record is not a JSON object".to_string(),
            ));
        };

        let mut out = String::new();
        out.push('\n');
        out.push_str(&"=".repeat(60));
        for (k, v) in obj {
            out.push('\n');
            out.push_str(k);
            out.push_str(": ");
            match v {
                serde_json::Value::String(s) => out.push_str(s),
                other => out.push_str(&other.to_string()),
            }
        }
        out.push('\n');

        file.write_all(out.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mx::MxHost;
    use std::time::Duration;

    fn tmp_file(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_nanos();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.log"))
    }

    fn valid_report() -> LineReport {
        LineReport {
            email: "a@b.com".to_string(),
            outcome: LineOutcome::Checked {
                domain: "b.com".to_string(),
                check: DomainCheck::Valid {
                    mx_hosts: vec![MxHost {
                        exchange: "mx.b.com.".to_string(),
                        preference: 10,
                    }],
                },
            },
        }
    }

    #[test]
    fn record_carries_status_tag_and_count() {
        let record = CheckRecord::from_report(&valid_report());
        assert_eq!(record.status, "valid");
        assert_eq!(record.domain.as_deref(), Some("b.com"));
        assert_eq!(record.mx_count, Some(1));
        assert!(record.detail.is_none());
    }

    #[test]
    fn malformed_addresses_log_without_a_domain() {
        let record = CheckRecord::from_report(&LineReport {
            email: "not-an-email".to_string(),
            outcome: LineOutcome::InvalidFormat,
        });
        assert_eq!(record.status, "invalid_format");
        assert!(record.domain.is_none());
    }

    #[test]
    fn json_mode_appends_one_line_per_record() {
        let log = ResultsLogger::new(tmp_file("mxgram-results-json"), true);
        log.write(&CheckRecord::from_report(&valid_report())).unwrap();
        log.write(&CheckRecord::from_report(&valid_report())).unwrap();

        let written = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["status"], "valid");
        }
    }

    #[test]
    fn text_mode_writes_readable_blocks() {
        let log = ResultsLogger::new(tmp_file("mxgram-results-text"), false);
        log.write(&CheckRecord::from_report(&valid_report())).unwrap();

        let written = std::fs::read_to_string(log.path()).unwrap();
        assert!(written.contains("email: a@b.com"));
        assert!(written.contains("status: valid"));
    }
}
