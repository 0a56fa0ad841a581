use std::path::Path;

use zip::DateTime;

/// Non-payload attributes of one archive entry: its name and the
/// last-modified timestamp decomposed into calendar fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub name: String,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl EntryMetadata {
    pub fn new(name: impl Into<String>, date_time: (u16, u8, u8, u8, u8, u8)) -> Self {
        let (year, month, day, hour, minute, second) = date_time;
        Self {
            name: name.into(),
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub(crate) fn from_zip(name: &str, dt: DateTime) -> Self {
        Self {
            name: name.to_owned(),
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// Fields out of the DOS date range (years 1980-2107) fall back to the
    /// zip crate's default timestamp.
    pub(crate) fn to_zip_datetime(&self) -> DateTime {
        DateTime::from_date_and_time(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
        .unwrap_or_default()
    }

    /// Canonical `YYYY-MM-DD HH:MM:SS` rendering of the timestamp fields
    pub fn timestamp(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// How the name of an entry being written is determined
#[derive(Debug, Clone, Copy)]
pub enum EntryName<'a> {
    /// Use this name verbatim
    Explicit(&'a str),
    /// Use the name (and timestamp) embedded in a metadata record
    FromMetadata(&'a EntryMetadata),
    /// Derive the name from the source path's base filename. Only valid for
    /// path content; raw bytes have no name to derive.
    Derived,
}

/// What gets written into an entry
#[derive(Debug, Clone, Copy)]
pub enum EntryContent<'a> {
    /// Stream the bytes of this file
    FromPath(&'a Path),
    /// Write this payload directly
    Bytes(&'a [u8]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_zero_padded() {
        let meta = EntryMetadata::new("a.txt", (2021, 6, 5, 4, 3, 2));
        assert_eq!(meta.timestamp(), "2021-06-05 04:03:02");
    }

    #[test]
    fn zip_datetime_round_trips_fields() {
        let meta = EntryMetadata::new("a.txt", (2020, 12, 31, 23, 59, 58));
        let dt = meta.to_zip_datetime();
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute(), dt.second()),
            (2020, 12, 31, 23, 59, 58)
        );
    }

    #[test]
    fn out_of_range_date_falls_back_to_default() {
        // 1900 predates the DOS epoch
        let dt = EntryMetadata::new("a.txt", (1900, 1, 1, 0, 0, 0)).to_zip_datetime();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1980, 1, 1));
    }
}
