use super::config::LayoutConfig;
use super::text::wrap_text;
use crate::canvas::Canvas;
use crate::model::{Exam, Question};
use crate::units::Pt;
use crate::ExamError;
use log::debug;

/// Where the next line goes. The cursor is created for one document, handed
/// to each layout step and returned updated; nothing else holds it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutCursor {
    /// baseline of the next line, in points from the bottom of the page
    pub y: Pt,
    /// 1-based number of the page being drawn
    pub page_number: usize,
}

impl LayoutCursor {
    /// Cursor for the first question on the first page, below the header
    pub fn first_page(config: &LayoutConfig) -> LayoutCursor {
        LayoutCursor {
            y: config.body_start(),
            page_number: 1,
        }
    }

    /// Whether the cursor has dropped below the low-water mark
    pub fn is_exhausted(&self, config: &LayoutConfig) -> bool {
        self.y < config.page_bottom_margin
    }
}

/// How one copy of an exam is printed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// printed in the footer of every page
    pub version: String,
    /// mark the correct option of every question
    pub solved: bool,
}

/// What [render_exam] produced
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutSummary {
    pub pages: usize,
    pub questions: usize,
}

/// Lay an exam out onto `canvas`, in the exam's current question order.
///
/// The exam is validated before anything is drawn. Questions are never split
/// across pages on purpose: once a question leaves the cursor below
/// `page_bottom_margin`, the page is closed (footer stamped) and the next
/// question starts at `page_top_start` on a fresh page. The last page gets
/// its footer too. The canvas is not saved; that is left to the caller.
pub fn render_exam<C: Canvas + ?Sized>(
    canvas: &mut C,
    exam: &Exam,
    config: &LayoutConfig,
    options: &RenderOptions,
) -> Result<LayoutSummary, ExamError> {
    exam.validate(&config.option_labels)?;

    let mut cursor = draw_header(canvas, config, &exam.title)?;
    for (i, question) in exam.questions.iter().enumerate() {
        cursor = break_page_if_needed(canvas, config, cursor, &options.version)?;
        cursor = layout_question(canvas, config, cursor, i + 1, question, options.solved)?;
    }
    stamp_footer(canvas, config, cursor, &options.version)?;

    Ok(LayoutSummary {
        pages: cursor.page_number,
        questions: exam.questions.len(),
    })
}

/// Title and student details at the top of the first page
pub fn draw_header<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &LayoutConfig,
    title: &str,
) -> Result<LayoutCursor, ExamError> {
    canvas.draw_text(
        config.left_margin,
        config.page_top_start + config.title_offset,
        title,
        config.title_size,
    )?;
    canvas.draw_text(
        config.left_margin,
        config.page_top_start + config.student_line_offset,
        &config.student_line,
        config.title_size,
    )?;
    Ok(LayoutCursor::first_page(config))
}

/// If the cursor is below the low-water mark, finish the current page and
/// return a cursor at the top of the next one. Otherwise return it unchanged.
pub fn break_page_if_needed<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &LayoutConfig,
    cursor: LayoutCursor,
    version: &str,
) -> Result<LayoutCursor, ExamError> {
    if !cursor.is_exhausted(config) {
        return Ok(cursor);
    }

    stamp_footer(canvas, config, cursor, version)?;
    canvas.new_page()?;
    debug!(
        "page {} full at y = {}, starting page {}",
        cursor.page_number,
        cursor.y,
        cursor.page_number + 1
    );

    Ok(LayoutCursor {
        y: config.page_top_start,
        page_number: cursor.page_number + 1,
    })
}

/// Version label and page number at the bottom of the current page
pub fn stamp_footer<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &LayoutConfig,
    cursor: LayoutCursor,
    version: &str,
) -> Result<(), ExamError> {
    canvas.draw_text(
        config.footer_x(),
        config.footer_y,
        &footer_text(version, cursor.page_number),
        config.body_size,
    )
}

pub fn footer_text(version: &str, page_number: usize) -> String {
    if version.is_empty() {
        format!("Page: {page_number}")
    } else {
        format!("Version: {version}    Page: {page_number}")
    }
}

/// Draw one numbered question with its options and answer boxes, returning
/// the cursor below it
pub fn layout_question<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &LayoutConfig,
    cursor: LayoutCursor,
    number: usize,
    question: &Question,
    solved: bool,
) -> Result<LayoutCursor, ExamError> {
    debug!("question {number} at y = {}", cursor.y);

    let statement = format!("{number}. [{}P] {}", question.points, question.text);
    let mut y = draw_wrapped(
        canvas,
        &statement,
        config.left_margin,
        cursor.y,
        config.question_width,
        config,
    )?;
    y -= config.question_gap;

    for (option, label) in question.options.iter().zip(config.option_labels.iter()) {
        let text = format!("{label}) {}", option.text);
        y = draw_wrapped(
            canvas,
            &text,
            config.option_x(),
            y,
            config.option_width,
            config,
        )?;

        // the box sits on the baseline of the option's last line
        let box_y = y + config.line_height;
        canvas.draw_rect(
            config.checkbox_x(),
            box_y,
            config.checkbox_size,
            config.checkbox_size,
        )?;
        if solved && option.is_correct {
            canvas.draw_text(config.checkbox_x(), box_y, &config.check_mark, config.body_size)?;
        }

        y -= config.option_gap;
    }

    y -= config.block_gap;
    Ok(LayoutCursor { y, ..cursor })
}

/// Wrap `text` to `max_width` and draw it line by line from `(x, y)`
/// downwards, returning the y below the last line
fn draw_wrapped<C: Canvas + ?Sized>(
    canvas: &mut C,
    text: &str,
    x: Pt,
    mut y: Pt,
    max_width: Pt,
    config: &LayoutConfig,
) -> Result<Pt, ExamError> {
    let lines = wrap_text(text, config.body_size, max_width, |line, size| {
        canvas.measure_width(line, size)
    })?;

    for line in lines.iter() {
        canvas.draw_text(x, y, line, config.body_size)?;
        y -= config.line_height;
    }
    Ok(y)
}
