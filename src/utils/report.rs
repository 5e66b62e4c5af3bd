use crate::models::{Competition, ReportRow, ReportSection};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const PRO_HEADER_RULE: &str = "-------------------";
const COLLEGE_HEADER_RULE: &str = "-----------------";
const ENTRY_RULE: &str = "----------";

/// Render the NFL section. Entries are separated by a rule line and the
/// section ends with a blank line after its final entry.
pub fn render_pro_section(week: &str, rows: &[ReportRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Week {}", Competition::Pro.label(), week);
    let _ = writeln!(out, "{}", PRO_HEADER_RULE);

    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "{}", row.display_date);
        let _ = writeln!(out, "{}", row.short_name);
        let _ = writeln!(out, "{}", row.spread_text);
        if i == rows.len() - 1 {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{}", ENTRY_RULE);
        }
    }

    out
}

/// Render the college section. Each entry also carries the full game name
/// and is followed by a rule line.
pub fn render_college_section(week: &str, rows: &[ReportRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", COLLEGE_HEADER_RULE);
    let _ = writeln!(out, "{} Week {}", Competition::College.label(), week);
    let _ = writeln!(out, "{}", COLLEGE_HEADER_RULE);
    out.push('\n');

    for row in rows {
        let _ = writeln!(out, "{}", row.display_date);
        let _ = writeln!(out, "{}", row.short_name);
        let _ = writeln!(out, "{}", row.full_name);
        let _ = writeln!(out, "{}", row.spread_text);
        let _ = writeln!(out, "{}", ENTRY_RULE);
    }

    out
}

pub fn render_section(section: &ReportSection) -> String {
    match section.competition {
        Competition::Pro => render_pro_section(&section.week, &section.rows),
        Competition::College => render_college_section(&section.week, &section.rows),
    }
}

/// Full report: NFL first, then college
pub fn render_report(pro: &ReportSection, college: &ReportSection) -> String {
    let mut out = render_section(pro);
    out.push_str(&render_section(college));
    out
}

/// File name the report is saved under, keyed by the NFL week
pub fn report_file_name(nfl_week: &str) -> String {
    format!("NFL-Week-{}.txt", nfl_week)
}

/// Where a rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSink {
    Console,
    /// Directory the report file is written into
    File(PathBuf),
}

/// Write a rendered report verbatim
pub fn write_report<W: Write>(writer: &mut W, report: &str) -> std::io::Result<()> {
    writer.write_all(report.as_bytes())?;
    writer.flush()
}

/// Save the report into `dir`, creating it if needed
pub fn save_report_to_file(report: &str, dir: &Path, nfl_week: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(report_file_name(nfl_week));
    let mut file = File::create(&path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    write_report(&mut file, report)
        .with_context(|| format!("Failed to write report file {}", path.display()))?;

    Ok(path)
}

/// Send the report to every sink. Returns paths of any files written.
pub fn emit_report(report: &str, nfl_week: &str, sinks: &[ReportSink]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for sink in sinks {
        match sink {
            ReportSink::Console => {
                let stdout = std::io::stdout();
                write_report(&mut stdout.lock(), report)
                    .context("Failed to write report to stdout")?;
            }
            ReportSink::File(dir) => {
                written.push(save_report_to_file(report, dir, nfl_week)?);
            }
        }
    }

    Ok(written)
}
