use crate::element::PageElement;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime, UtcOffset,
};

const ISO_MILLIS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterStamp {
    pub year: i32,
    pub iso_timestamp: String,
}

impl FooterStamp {
    /// The year follows the visitor's local offset (minutes east of UTC);
    /// the deploy stamp is always UTC.
    pub fn from_unix_millis(millis: i64, local_offset_minutes: i32) -> Option<Self> {
        let instant = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()?;
        let iso_timestamp = instant.format(ISO_MILLIS).ok()?;
        let offset = UtcOffset::from_whole_seconds(local_offset_minutes.checked_mul(60)?).ok()?;

        Some(Self {
            year: instant.to_offset(offset).year(),
            iso_timestamp,
        })
    }

    pub fn apply<E: PageElement>(&self, year: Option<&E>, last_deploy: Option<&E>) {
        if let Some(year_el) = year {
            year_el.set_text(&self.year.to_string());
        }
        if let Some(deploy_el) = last_deploy {
            deploy_el.set_text(&self.iso_timestamp);
        }
    }
}
