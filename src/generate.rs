//! Producing finished exam PDFs: one loaded question bank, several printed
//! variants.

use crate::canvas::{Canvas, PdfCanvas};
use crate::font::Font;
use crate::info::Info;
use crate::layout::{render_exam, LayoutConfig, LayoutSummary, RenderOptions};
use crate::model::Exam;
use crate::shuffle::shuffled;
use crate::ExamError;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// DejaVu Sans, used when no other font is given. It covers the check mark.
pub const BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Where the font for a document comes from
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    Bundled,
    File(PathBuf),
}

impl FontSource {
    /// Every document gets its own parsed copy of the font
    pub fn load(&self) -> Result<Font, ExamError> {
        match self {
            FontSource::Bundled => Font::load(BUNDLED_FONT.to_vec()),
            FontSource::File(path) => Font::load_from_disk(path),
        }
    }
}

/// One printed copy of an exam
#[derive(Debug, Clone, PartialEq)]
pub struct ExamVariant {
    pub output: PathBuf,
    /// label printed in every page footer
    pub version: String,
    pub solved: bool,
    /// decides the question order
    pub seed: String,
}

/// How a variant's shuffle seed is chosen
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Seed from the output file name; every file gets its own order
    #[default]
    OutputName,
    /// Seed from the version label, so a solved copy has exactly the
    /// question order of the unsolved copy it is the key for
    Version,
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::OutputName => write!(f, "output-name"),
            SeedPolicy::Version => write!(f, "version"),
        }
    }
}

impl ExamVariant {
    pub fn new<P: Into<PathBuf>>(
        output: P,
        version: &str,
        solved: bool,
        policy: SeedPolicy,
    ) -> ExamVariant {
        let output = output.into();
        let seed = match policy {
            SeedPolicy::OutputName => output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| output.display().to_string()),
            SeedPolicy::Version => version.to_string(),
        };
        ExamVariant {
            output,
            version: version.to_string(),
            solved,
            seed,
        }
    }
}

/// The usual set of documents: every version unsolved, then every version
/// solved, named `exam_version_<V>.pdf` and `exam_version_<V>_solved.pdf`
pub fn standard_variants<S: AsRef<str>>(
    out_dir: &Path,
    versions: &[S],
    include_solved: bool,
    policy: SeedPolicy,
) -> Vec<ExamVariant> {
    let unsolved = versions.iter().map(|version| {
        let version = version.as_ref();
        ExamVariant::new(
            out_dir.join(format!("exam_version_{version}.pdf")),
            version,
            false,
            policy,
        )
    });
    let solved = versions
        .iter()
        .filter(|_| include_solved)
        .map(|version| {
            let version = version.as_ref();
            ExamVariant::new(
                out_dir.join(format!("exam_version_{version}_solved.pdf")),
                version,
                true,
                policy,
            )
        });
    unsolved.chain(solved).collect()
}

/// Shuffle `exam` for `variant` and lay it out onto `canvas`, then save it.
/// The loaded exam itself is left untouched.
pub fn render_variant<C: Canvas + ?Sized>(
    canvas: &mut C,
    exam: &Exam,
    variant: &ExamVariant,
    config: &LayoutConfig,
) -> Result<LayoutSummary, ExamError> {
    let exam = shuffled(exam, &variant.seed);
    let options = RenderOptions {
        version: variant.version.clone(),
        solved: variant.solved,
    };
    let summary = render_exam(canvas, &exam, config, &options)?;
    canvas.save()?;
    Ok(summary)
}

/// Write one variant of `exam` to `variant.output` as a PDF
pub fn generate_exam(
    exam: &Exam,
    font: &FontSource,
    variant: &ExamVariant,
    config: &LayoutConfig,
) -> Result<LayoutSummary, ExamError> {
    let mut canvas = PdfCanvas::new(font.load()?, config.paper.size(), &variant.output);
    canvas.set_line_width(config.checkbox_line_width);
    canvas.set_info(Info::for_exam(&exam.title, &variant.version, variant.solved));

    let summary = render_variant(&mut canvas, exam, variant, config)?;
    info!(
        "PDF generated: {} ({} questions, {} pages)",
        canvas.output().display(),
        summary.questions,
        summary.pages
    );
    Ok(summary)
}

/// Load the question bank at `bank` and generate every variant from it. Each
/// variant succeeds or fails on its own; the results come back in order. If
/// the bank can't be loaded, every variant fails with that error.
pub fn generate_all(
    bank: &Path,
    font: &FontSource,
    variants: &[ExamVariant],
    config: &LayoutConfig,
) -> Vec<(ExamVariant, Result<LayoutSummary, ExamError>)> {
    variants
        .iter()
        .map(|variant| {
            // reload per variant so an unreadable bank is reported against each document
            let result =
                Exam::load(bank).and_then(|exam| generate_exam(&exam, font, variant, config));
            (variant.clone(), result)
        })
        .collect()
}
