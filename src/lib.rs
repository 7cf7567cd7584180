//! Randomized, paginated multiple-choice exam PDFs from a JSON question bank.
//!
//! A question bank is loaded into an [Exam], its questions are shuffled by a
//! seed string ([shuffle]), and the result is laid out onto a [Canvas]
//! ([layout]) that produces the PDF.

mod canvas;
pub use canvas::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

pub mod generate;

mod info;
pub use info::*;

/// Wrapping text and laying exams out on pages
pub mod layout;

mod model;
pub use model::*;

mod page;
pub use page::*;

/// Paper sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

pub mod shuffle;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
