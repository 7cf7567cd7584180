#![allow(dead_code)]

use exam_gen::{AnswerOption, Canvas, Exam, ExamError, Points, Pt, Question};

/// Everything a layout asked the canvas to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Text { x: f32, y: f32, text: String, size: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32 },
    NewPage,
    Save,
}

/// A canvas where every character is `size / 2` wide, recording every call
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    /// measuring any text containing this fails
    pub poison: Option<char>,
}

impl RecordingCanvas {
    pub fn new() -> RecordingCanvas {
        RecordingCanvas::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn page_breaks(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::NewPage).count()
    }

    pub fn rects(&self) -> Vec<(f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn measure_width(&self, text: &str, size: Pt) -> Result<Pt, ExamError> {
        if let Some(ch) = self.poison.filter(|ch| text.contains(*ch)) {
            return Err(ExamError::MissingGlyph { ch });
        }
        Ok(Pt(text.chars().count() as f32 * *size / 2.0))
    }

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str, size: Pt) -> Result<(), ExamError> {
        self.ops.push(Op::Text {
            x: *x,
            y: *y,
            text: text.to_string(),
            size: *size,
        });
        Ok(())
    }

    fn draw_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) -> Result<(), ExamError> {
        self.ops.push(Op::Rect {
            x: *x,
            y: *y,
            w: *width,
            h: *height,
        });
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), ExamError> {
        self.ops.push(Op::NewPage);
        Ok(())
    }

    fn save(&mut self) -> Result<(), ExamError> {
        self.ops.push(Op::Save);
        Ok(())
    }
}

pub fn option(text: &str, is_correct: bool) -> AnswerOption {
    AnswerOption {
        text: text.to_string(),
        is_correct,
    }
}

pub fn question(text: &str, points: f64, options: Vec<AnswerOption>) -> Question {
    Question {
        text: text.to_string(),
        points: Points(points),
        options,
    }
}

/// Two questions with two options each
pub fn test_exam() -> Exam {
    Exam {
        title: "Test Exam".to_string(),
        questions: vec![
            question(
                "Which planet is closest to the sun?",
                2.0,
                vec![option("Mercury", true), option("Venus", false)],
            ),
            question(
                "Which number is even?",
                1.0,
                vec![option("3", false), option("4", true)],
            ),
        ],
    }
}

/// `n` one-line questions with two options each
pub fn long_exam(n: usize) -> Exam {
    Exam {
        title: "Long Exam".to_string(),
        questions: (1..=n)
            .map(|i| {
                question(
                    &format!("Question number {i}"),
                    1.0,
                    vec![option("yes", i % 2 == 0), option("no", i % 2 == 1)],
                )
            })
            .collect(),
    }
}
