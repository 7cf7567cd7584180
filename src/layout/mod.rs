//! Laying exams out on pages.
//!
//! - [`wrap_text`](crate::layout::wrap_text) breaks a string into lines that
//!   fit a width, using any measuring function
//! - [`LayoutConfig`](crate::layout::LayoutConfig) says where everything goes
//! - [`render_exam`](crate::layout::render_exam) walks the questions, moving a
//!   [`LayoutCursor`](crate::layout::LayoutCursor) down the page and starting
//!   new pages as it runs out of room
//!
//! # Example
//!
//! ```
//! use exam_gen::layout::wrap_text;
//! use exam_gen::Pt;
//!
//! // pretend every character is 6 points wide
//! let measure = |text: &str, _size: Pt| Ok::<_, ()>(Pt(6.0 * text.len() as f32));
//! let lines = wrap_text("the quick brown fox", Pt(12.0), Pt(60.0), measure).unwrap();
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

mod config;
mod exam;
mod text;

pub use config::*;
pub use exam::*;
pub use text::*;
