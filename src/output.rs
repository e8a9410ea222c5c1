//! CLI output formatting for `check` and `generate`.
//!
//! # Information-First Display
//!
//! Output is organised by page and section, not by file. Each page gets a
//! header line (positional index + title), each section an indented line
//! naming its position and type, and each diagnostic a further-indented
//! line. The output file is secondary context on the page header.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! 001 Home (index)
//!     001 contentBanner: ok
//!     002 testimonialsSection: 1 warning
//!         title: required field missing
//!     003 heroCarousel: unknown type, skipped
//!
//! Checked 1 page, 3 sections: 1 warning, 1 skipped
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Home → index.html
//!     2 sections rendered, 1 empty, 1 skipped
//!
//! Generated 1 page (1 warning, run `check` for details)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{PageReport, SectionOutcome, SectionReport};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn section_line(section: &SectionReport) -> String {
    let name = section.type_name.as_deref().unwrap_or("(no _type)");
    let status = match (section.outcome, section.diagnostic_count()) {
        (SectionOutcome::Skipped, _) => "unknown type, skipped".to_string(),
        (_, 0) => "ok".to_string(),
        (_, n) => plural(n, "warning"),
    };
    format!(
        "{}{} {}: {}",
        indent(1),
        format_index(section.position),
        name,
        status
    )
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(pages: &[PageReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!("{} {} ({})", format_index(i + 1), page.title, page.slug));
        for section in &page.sections {
            lines.push(section_line(section));
            if let Some(result) = &section.validation {
                for d in &result.diagnostics {
                    lines.push(format!("{}{d}", indent(2)));
                }
            }
        }
    }

    let sections: usize = pages.iter().map(|p| p.sections.len()).sum();
    let warnings: usize = pages.iter().map(PageReport::diagnostic_count).sum();
    let skipped: usize = pages.iter().map(|p| p.count(SectionOutcome::Skipped)).sum();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {}, {}: {}, {} skipped",
        plural(pages.len(), "page"),
        plural(sections, "section"),
        plural(warnings, "warning"),
        skipped
    ));
    lines
}

pub fn print_check_output(pages: &[PageReport]) {
    for line in format_check_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(pages: &[PageReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.title,
            page.file.display()
        ));
        let mut counts = vec![format!(
            "{} rendered",
            plural(page.count(SectionOutcome::Rendered), "section")
        )];
        let empty = page.count(SectionOutcome::Empty);
        if empty > 0 {
            counts.push(format!("{empty} empty"));
        }
        let skipped = page.count(SectionOutcome::Skipped);
        if skipped > 0 {
            counts.push(format!("{skipped} skipped"));
        }
        lines.push(format!("{}{}", indent(1), counts.join(", ")));
    }

    let warnings: usize = pages.iter().map(PageReport::diagnostic_count).sum();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    let mut summary = format!("Generated {}", plural(pages.len(), "page"));
    if warnings > 0 {
        summary.push_str(&format!(" ({}, run `check` for details)", plural(warnings, "warning")));
    }
    lines.push(summary);
    lines
}

pub fn print_generate_output(pages: &[PageReport]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{Diagnostic, DiagnosticKind, ValidationResult};
    use std::path::PathBuf;

    fn section(position: usize, name: &str, outcome: SectionOutcome) -> SectionReport {
        SectionReport {
            position,
            type_name: Some(name.to_string()),
            validation: Some(ValidationResult {
                schema: "contentBanner",
                diagnostics: vec![],
            }),
            outcome,
        }
    }

    fn page() -> PageReport {
        let mut warned = section(2, "testimonialsSection", SectionOutcome::Empty);
        warned.validation = Some(ValidationResult {
            schema: "testimonialsSection",
            diagnostics: vec![Diagnostic {
                path: "title".to_string(),
                kind: DiagnosticKind::RequiredMissing,
            }],
        });
        let mut unknown = section(3, "heroCarousel", SectionOutcome::Skipped);
        unknown.validation = None;
        PageReport {
            slug: "index".to_string(),
            title: "Home".to_string(),
            file: PathBuf::from("index.html"),
            sections: vec![
                section(1, "contentBanner", SectionOutcome::Rendered),
                warned,
                unknown,
            ],
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn check_lists_sections_and_diagnostics() {
        let lines = format_check_output(&[page()]);
        assert_eq!(lines[0], "001 Home (index)");
        assert_eq!(lines[1], "    001 contentBanner: ok");
        assert_eq!(lines[2], "    002 testimonialsSection: 1 warning");
        assert!(lines[3].starts_with("        title"));
        assert_eq!(lines[4], "    003 heroCarousel: unknown type, skipped");
        assert_eq!(
            lines.last().unwrap(),
            "Checked 1 page, 3 sections: 1 warning, 1 skipped"
        );
    }

    #[test]
    fn check_with_no_pages() {
        assert_eq!(
            format_check_output(&[]),
            vec!["Checked 0 pages, 0 sections: 0 warnings, 0 skipped"]
        );
    }

    #[test]
    fn generate_summarises_pages() {
        let lines = format_generate_output(&[page()]);
        assert_eq!(lines[0], "001 Home → index.html");
        assert_eq!(lines[1], "    1 section rendered, 1 empty, 1 skipped");
        assert_eq!(
            lines.last().unwrap(),
            "Generated 1 page (1 warning, run `check` for details)"
        );
    }

    #[test]
    fn generate_without_warnings_has_plain_summary() {
        let mut p = page();
        p.sections.truncate(1);
        let lines = format_generate_output(&[p]);
        assert_eq!(lines[1], "    1 section rendered");
        assert_eq!(lines.last().unwrap(), "Generated 1 page");
    }
}
