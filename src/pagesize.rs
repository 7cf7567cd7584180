//! Paper sizes an exam can be printed on.
//!
//! All sizes are portrait (width ≤ height), in points.

use crate::units::*;
use serde::{Deserialize, Serialize};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

/// Named paper size, as written in a layout configuration file
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paper {
    #[default]
    Letter,
    Legal,
    A4,
}

impl Paper {
    pub fn size(self) -> PageSize {
        match self {
            Paper::Letter => LETTER,
            Paper::Legal => LEGAL,
            Paper::A4 => A4,
        }
    }
}
