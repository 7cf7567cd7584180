use crate::pagesize::Paper;
use crate::units::Pt;
use crate::ExamError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where everything goes on an exam page. Coordinates are PDF points measured
/// up from the bottom of the page; every field has a default, so a
/// configuration file only needs to name what it changes:
///
/// ```toml
/// paper = "a4"
/// page_top_start = 720.0
/// option_labels = ["A", "B", "C", "D"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub paper: Paper,

    /// x of question text, the title and the header lines
    pub left_margin: Pt,
    /// how far option text sits to the right of `left_margin`
    pub option_indent: Pt,
    /// how far the answer box sits to the right of `left_margin`
    pub checkbox_indent: Pt,
    pub checkbox_size: Pt,
    pub checkbox_line_width: Pt,
    /// wrap width of question statements
    pub question_width: Pt,
    /// wrap width of option text
    pub option_width: Pt,

    /// vertical step between wrapped lines
    pub line_height: Pt,
    /// extra space between a question statement and its first option
    pub question_gap: Pt,
    /// extra space after each option
    pub option_gap: Pt,
    /// extra space after each question
    pub block_gap: Pt,

    /// a new page is started before the next question once the cursor drops
    /// below this
    pub page_bottom_margin: Pt,
    /// where the cursor starts on every page after the first
    pub page_top_start: Pt,
    /// the first question starts this far below `page_top_start`, leaving
    /// room for the header
    pub body_offset: Pt,
    /// title baseline, above `page_top_start`
    pub title_offset: Pt,
    /// student details line baseline, above `page_top_start`
    pub student_line_offset: Pt,

    /// footer x, to the right of `left_margin`
    pub footer_indent: Pt,
    pub footer_y: Pt,

    pub body_size: Pt,
    /// size of the title and student details line
    pub title_size: Pt,

    /// labels printed before each option, in order. A question may not have
    /// more options than there are labels.
    pub option_labels: Vec<String>,
    /// drawn over the answer box of correct options in solved exams
    pub check_mark: String,
    pub student_line: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            paper: Paper::Letter,
            left_margin: Pt(50.0),
            option_indent: Pt(70.0),
            checkbox_indent: Pt(45.0),
            checkbox_size: Pt(10.0),
            checkbox_line_width: Pt(1.0),
            question_width: Pt(500.0),
            option_width: Pt(430.0),
            line_height: Pt(15.0),
            question_gap: Pt(5.0),
            option_gap: Pt(10.0),
            block_gap: Pt(25.0),
            page_bottom_margin: Pt(175.0),
            page_top_start: Pt(680.0),
            body_offset: Pt(40.0),
            title_offset: Pt(50.0),
            student_line_offset: Pt(10.0),
            footer_indent: Pt(375.0),
            footer_y: Pt(25.0),
            body_size: Pt(12.0),
            title_size: Pt(16.0),
            option_labels: ["a", "b", "c", "d", "e", "f"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            check_mark: "✓".to_string(),
            student_line: "Student name: ____________________    Student ID: _____________"
                .to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn from_toml(toml: &str) -> Result<LayoutConfig, ExamError> {
        Ok(toml::from_str(toml)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<LayoutConfig, ExamError> {
        let toml = std::fs::read_to_string(path)?;
        LayoutConfig::from_toml(&toml)
    }

    pub fn option_x(&self) -> Pt {
        self.left_margin + self.option_indent
    }

    pub fn checkbox_x(&self) -> Pt {
        self.left_margin + self.checkbox_indent
    }

    pub fn footer_x(&self) -> Pt {
        self.left_margin + self.footer_indent
    }

    /// y of the first question on the first page
    pub fn body_start(&self) -> Pt {
        self.page_top_start - self.body_offset
    }
}
