use crate::refs::{ObjectReferences, RefType};
use chrono::prelude::*;
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata written into the PDF information dictionary
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    /// The title of the document, usually the exam title
    pub title: Option<String>,
    /// The subject of the document, e.g. "Version A (solved)"
    pub subject: Option<String>,
}

impl Info {
    /// Metadata describing one printed variant of an exam
    pub fn for_exam(title: &str, version: &str, solved: bool) -> Info {
        let subject = match (version.is_empty(), solved) {
            (true, false) => None,
            (true, true) => Some("Answer key".to_string()),
            (false, false) => Some(format!("Version {version}")),
            (false, true) => Some(format!("Version {version} (solved)")),
        };
        Info {
            title: Some(title.to_string()),
            subject,
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(Local::now()));
    }
}

fn pdf_date(now: DateTime<Local>) -> PDate {
    let offset = now.offset().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - offset_hours * 60 * 60) / 60).abs();
    PDate::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}
