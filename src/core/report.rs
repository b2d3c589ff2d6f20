use crate::domain::model::{Invocation, ReportRequest, ReportSummary};
use std::path::PathBuf;

/// View over Skyline proteins listing only their names.
pub const REPORT_PROTEIN_LOCATORS: &str = r#"<?xml version="1.0"?>
<views>
  <view name="ProteinLocators" rowsource="pwiz.Skyline.Model.Databinding.Entities.Protein" sublist="Results!*">
    <column name="Name" />
  </view>
</views>"#;

pub const GET_REPORT_VERB: &str = "GetReport";

/// `[helper, "GetReport", "--connectionname", connection_name]`, plus
/// `--reportname` for saved reports.
pub fn build_invocation(
    helper: PathBuf,
    connection_name: &str,
    request: &ReportRequest,
) -> Invocation {
    let mut args = vec![
        GET_REPORT_VERB.to_string(),
        "--connectionname".to_string(),
        connection_name.to_string(),
    ];
    if let ReportRequest::Named(report_name) = request {
        args.push("--reportname".to_string());
        args.push(report_name.clone());
    }

    Invocation {
        launcher: None,
        helper,
        args,
    }
}

/// Assumes one header line followed by one line per protein. Empty output
/// yields -1; that value is reported as is.
pub fn count_proteins(report_text: &str) -> i64 {
    report_text.matches('\n').count() as i64 - 1
}

/// Number of data records when `report_text` is well-formed CSV with a header.
pub fn count_csv_rows(report_text: &str) -> Option<usize> {
    if report_text.is_empty() {
        return None;
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(report_text.as_bytes());

    let mut rows = 0;
    for record in reader.records() {
        match record {
            Ok(_) => rows += 1,
            Err(e) => {
                tracing::debug!("Report is not well-formed CSV: {}", e);
                return None;
            }
        }
    }
    Some(rows)
}

/// `length` is the raw byte count of the helper's stdout; the counts work on
/// its lossy UTF-8 decoding.
pub fn summarize(report: &[u8]) -> ReportSummary {
    let report_text = String::from_utf8_lossy(report);
    ReportSummary {
        length: report.len(),
        protein_count: count_proteins(&report_text),
        parsed_rows: count_csv_rows(&report_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_shape() {
        let invocation = build_invocation(
            PathBuf::from("/tools/bin/ToolServiceCmd.exe"),
            "Skyline-connection-42",
            &ReportRequest::Definition(REPORT_PROTEIN_LOCATORS.to_string()),
        );

        assert_eq!(
            invocation.argv(),
            vec![
                "/tools/bin/ToolServiceCmd.exe",
                "GetReport",
                "--connectionname",
                "Skyline-connection-42"
            ]
        );
        assert!(invocation.launcher.is_none());
    }

    #[test]
    fn test_connection_name_is_passed_through_verbatim() {
        let invocation = build_invocation(
            PathBuf::from("helper"),
            "  name with spaces; and $symbols ",
            &ReportRequest::Definition(String::new()),
        );
        assert_eq!(invocation.args[2], "  name with spaces; and $symbols ");
    }

    #[test]
    fn test_named_report_appends_reportname() {
        let invocation = build_invocation(
            PathBuf::from("helper"),
            "conn",
            &ReportRequest::Named("Protein Totals".to_string()),
        );
        assert_eq!(
            invocation.args,
            vec![
                "GetReport",
                "--connectionname",
                "conn",
                "--reportname",
                "Protein Totals"
            ]
        );
    }

    #[test]
    fn test_request_document_is_exact() {
        assert!(REPORT_PROTEIN_LOCATORS.starts_with("<?xml version=\"1.0\"?>\n<views>\n"));
        assert!(REPORT_PROTEIN_LOCATORS.contains(
            "  <view name=\"ProteinLocators\" rowsource=\"pwiz.Skyline.Model.Databinding.Entities.Protein\" sublist=\"Results!*\">\n"
        ));
        assert!(REPORT_PROTEIN_LOCATORS.contains("    <column name=\"Name\" />\n"));
        assert!(REPORT_PROTEIN_LOCATORS.ends_with("  </view>\n</views>"));
    }

    #[test]
    fn test_count_proteins_header_and_rows() {
        assert_eq!(count_proteins("Name\nAlbumin\nMyosin\n"), 2);
    }

    #[test]
    fn test_count_proteins_header_only() {
        assert_eq!(count_proteins("Name\n"), 0);
    }

    #[test]
    fn test_count_proteins_empty_output_is_negative() {
        assert_eq!(count_proteins(""), -1);
    }

    #[test]
    fn test_count_proteins_without_trailing_newline() {
        // last row is not counted
        assert_eq!(count_proteins("Name\nAlbumin\nMyosin"), 1);
    }

    #[test]
    fn test_length_counts_bytes_including_newlines() {
        assert_eq!(summarize(b"Name\nAlbumin\nMyosin\n").length, 20);
        // Å is two bytes in UTF-8
        assert_eq!(summarize("Name\nÅlbumin\n".as_bytes()).length, 14);
        assert_eq!(summarize(b"").length, 0);
    }

    #[test]
    fn test_invalid_utf8_keeps_raw_length_and_newlines() {
        let summary = summarize(b"Name\n\xffAlbumin\n");
        assert_eq!(summary.length, 14);
        assert_eq!(summary.protein_count, 1);
    }

    #[test]
    fn test_csv_rows_handle_quoted_newlines() {
        let report = "Name\n\"Albumin\nisoform 2\"\nMyosin\n";
        assert_eq!(count_csv_rows(report), Some(2));
        // the naive count still sees every newline
        assert_eq!(count_proteins(report), 3);
    }

    #[test]
    fn test_csv_rows_reject_ragged_rows() {
        assert_eq!(count_csv_rows("Name,Accession\nAlbumin\n"), None);
        assert_eq!(count_csv_rows(""), None);
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(b"Name\nAlbumin\nMyosin\n");
        assert_eq!(
            summary,
            ReportSummary {
                length: 20,
                protein_count: 2,
                parsed_rows: Some(2),
            }
        );
    }
}
