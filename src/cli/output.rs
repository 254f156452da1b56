//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;

use crate::application::services::{CourseDetail, ResolvedPrerequisite};
use crate::domain::{DanglingPrerequisite, LoadSummary};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data lines)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

// ============================================================
// Plain-text renderings shared by commands and the menu
// ============================================================

/// `Warning: Course A has prerequisite B which does not exist in the course list.`
pub fn dangling_message(dangling: &DanglingPrerequisite) -> String {
    format!(
        "Course {} has prerequisite {} which does not exist in the course list.",
        dangling.course, dangling.prerequisite
    )
}

/// Summary block printed after a load.
pub fn summary_lines(summary: &LoadSummary) -> Vec<String> {
    vec![
        format!("Total Courses: {}", summary.total_courses),
        format!(
            "Courses with Prerequisites: {}",
            summary.courses_with_prerequisites
        ),
        format!("Total Prerequisites Listed: {}", summary.total_prerequisites),
    ]
}

fn prerequisite_line(prereq: &ResolvedPrerequisite) -> String {
    match &prereq.title {
        Some(title) => format!("  - {}: {}", prereq.number, title),
        None => format!("  - {}", prereq.number),
    }
}

/// A course with its prerequisites, one entry per line.
pub fn course_detail_lines(detail: &CourseDetail) -> Vec<String> {
    let mut lines = vec![detail.course.to_string()];
    if detail.prerequisites.is_empty() {
        lines.push("Prerequisites: None".to_string());
    } else {
        lines.push(format!(
            "Prerequisites: {}",
            detail.prerequisites.iter().map(|p| &p.number).join(", ")
        ));
        lines.extend(detail.prerequisites.iter().map(prerequisite_line));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Course;

    #[test]
    fn given_course_without_prerequisites_when_rendering_then_says_none() {
        let detail = CourseDetail {
            course: Course::new("CSCI100", "Intro", vec![]),
            prerequisites: vec![],
        };
        assert_eq!(
            course_detail_lines(&detail),
            vec!["CSCI100, Intro", "Prerequisites: None"]
        );
    }

    #[test]
    fn given_dangling_prerequisite_when_rendering_then_omits_title() {
        let detail = CourseDetail {
            course: Course::new("A", "Title A", vec!["B".into(), "C".into()]),
            prerequisites: vec![
                ResolvedPrerequisite {
                    number: "B".into(),
                    title: Some("Title B".into()),
                },
                ResolvedPrerequisite {
                    number: "C".into(),
                    title: None,
                },
            ],
        };
        assert_eq!(
            course_detail_lines(&detail),
            vec!["A, Title A", "Prerequisites: B, C", "  - B: Title B", "  - C"]
        );
    }
}
