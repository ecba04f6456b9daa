//! JUnit XML output
//!
//! Renders a [`TestReport`] in the JUnit XML dialect understood by CI
//! servers. Failing cases carry an `<error>` element with the diagnostic. The
//! document contains no timestamps or durations, so identical reports always
//! render to identical bytes.

use emuci_core::domain::report::{TestCase, TestReport, TestSuite};
use std::fmt;
use std::path::Path;

use crate::error::{ReportError, Result};

/// Renders the report as a JUnit XML document
pub fn to_junit_xml(report: &TestReport) -> String {
    JunitXml(report).to_string()
}

/// Renders the report and writes it to `path`
pub fn write_junit(report: &TestReport, path: &Path) -> Result<()> {
    std::fs::write(path, to_junit_xml(report)).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

struct JunitXml<'a>(&'a TestReport);

impl fmt::Display for JunitXml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        writeln!(
            f,
            r#"<testsuites disabled="0" errors="{}" failures="0" tests="{}" time="0.0">"#,
            report.total_failures(),
            report.total_cases()
        )?;
        for suite in &report.suites {
            write_suite(f, suite)?;
        }
        writeln!(f, "</testsuites>")
    }
}

fn write_suite(f: &mut fmt::Formatter<'_>, suite: &TestSuite) -> fmt::Result {
    writeln!(
        f,
        "\t<testsuite disabled=\"0\" errors=\"{}\" failures=\"0\" name=\"{}\" \
         skipped=\"0\" tests=\"{}\" time=\"0\">",
        suite.failures(),
        escape(&suite.name),
        suite.cases.len()
    )?;
    for case in &suite.cases {
        write_case(f, case)?;
    }
    writeln!(f, "\t</testsuite>")
}

fn write_case(f: &mut fmt::Formatter<'_>, case: &TestCase) -> fmt::Result {
    let attributes = format!(
        "name=\"{}\" classname=\"{}\" file=\"{}\"",
        escape(&case.name),
        escape(&case.classname),
        escape(&case.file)
    );

    let Some(message) = case.failure_message() else {
        return writeln!(f, "\t\t<testcase {}/>", attributes);
    };
    let message = escape(message);
    writeln!(f, "\t\t<testcase {}>", attributes)?;
    writeln!(
        f,
        "\t\t\t<error type=\"error\" message=\"{}\">{}</error>",
        message, message
    )?;
    writeln!(f, "\t\t</testcase>")
}

/// Escapes text for use in XML attributes and content
///
/// Characters that are not allowed in XML 1.0 documents are dropped.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < ' ' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
