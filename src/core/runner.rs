use crate::config::resolve_default_helper_path;
use crate::core::report::{build_invocation, summarize, REPORT_PROTEIN_LOCATORS};
use crate::core::{ConfigProvider, ReportSource};
use crate::domain::model::{OutputFormat, ReportRequest, RunOutcome};
use crate::utils::error::Result;
use std::io::Write;

pub struct ReportRunner<S: ReportSource, C: ConfigProvider> {
    source: S,
    config: C,
}

impl<S: ReportSource, C: ConfigProvider> ReportRunner<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self { source, config }
    }

    pub fn request(&self) -> ReportRequest {
        match self.config.report_name() {
            Some(name) => ReportRequest::Named(name.to_string()),
            None => ReportRequest::Definition(REPORT_PROTEIN_LOCATORS.to_string()),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let helper = match self.config.helper_path() {
            Some(path) => path.to_path_buf(),
            None => resolve_default_helper_path()?,
        };
        let request = self.request();
        let invocation = build_invocation(helper, self.config.connection_name(), &request)
            .with_launcher(self.config.launcher());

        tracing::info!("Executing command {:?}", invocation.argv());
        let output = self
            .source
            .execute(&invocation, request.stdin_payload())
            .await?;

        // exit status and stderr never affect the summary
        tracing::debug!(
            exit_code = ?output.exit_code,
            stderr_bytes = output.stderr.len(),
            "Helper finished"
        );

        let summary = summarize(&output.stdout);
        if let Some(rows) = summary.parsed_rows {
            if rows as i64 != summary.protein_count {
                tracing::debug!(
                    "Naive count {} differs from {} parsed CSV rows",
                    summary.protein_count,
                    rows
                );
            }
        }

        Ok(RunOutcome {
            command: invocation.argv(),
            summary,
        })
    }
}

pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &RunOutcome,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Executing command  {}", python_list(&outcome.command))?;
            writeln!(
                out,
                "Result of command was {} characters long.",
                outcome.summary.length
            )?;
            writeln!(out, "There are {} proteins", outcome.summary.protein_count)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Formats `args` like Python 2 prints a list of byte strings: `['a', 'b']`.
fn python_list(args: &[String]) -> String {
    let items: Vec<String> = args.iter().map(|arg| python_repr(arg)).collect();
    format!("[{}]", items.join(", "))
}

fn python_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut repr = String::with_capacity(value.len() + 2);
    repr.push(quote);
    for c in value.chars() {
        match c {
            '\\' => repr.push_str("\\\\"),
            '\n' => repr.push_str("\\n"),
            '\r' => repr.push_str("\\r"),
            '\t' => repr.push_str("\\t"),
            c if c == quote => {
                repr.push('\\');
                repr.push(c);
            }
            c if c.is_ascii_control() => repr.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_ascii() => repr.push(c),
            c => {
                // non-ASCII text is a run of escaped UTF-8 bytes
                let mut buffer = [0u8; 4];
                for byte in c.encode_utf8(&mut buffer).bytes() {
                    repr.push_str(&format!("\\x{:02x}", byte));
                }
            }
        }
    }
    repr.push(quote);
    repr
}
