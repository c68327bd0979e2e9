//! Date helper functions
//!
//! Display dates follow the `d MMM yyyy` shape used across the site
//! (e.g. "15 mar 2021" in pt-BR, "15 Mar 2021" in English).

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Locale used for display-date formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLocale {
    En,
    PtBr,
}

impl DateLocale {
    /// Resolve a locale from a BCP 47-ish language tag ("pt-br", "en", ...)
    pub fn from_tag(tag: &str) -> Self {
        if tag.to_ascii_lowercase().starts_with("pt") {
            Self::PtBr
        } else {
            Self::En
        }
    }

    fn month_abbrev(&self, month: u32) -> &'static str {
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        const PT: [&str; 12] = [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ];
        let idx = (month.saturating_sub(1) as usize).min(11);
        match self {
            Self::En => EN[idx],
            Self::PtBr => PT[idx],
        }
    }

    fn at_word(&self) -> &'static str {
        match self {
            Self::En => "at",
            Self::PtBr => "às",
        }
    }
}

/// Format a date for display as "d MMM yyyy"
pub fn display_date<Tz: TimeZone>(date: &DateTime<Tz>, locale: DateLocale) -> String {
    format!(
        "{} {} {}",
        date.day(),
        locale.month_abbrev(date.month()),
        date.year()
    )
}

/// Format an edit timestamp as "d MMM yyyy, at H:m"
///
/// Hour and minute are intentionally unpadded, matching the display
/// convention of the rest of the site.
pub fn edited_stamp<Tz: TimeZone>(date: &DateTime<Tz>, locale: DateLocale) -> String {
    format!(
        "{}, {} {}:{}",
        display_date(date, locale),
        locale.at_word(),
        date.hour(),
        date.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(DateLocale::from_tag("pt-br"), DateLocale::PtBr);
        assert_eq!(DateLocale::from_tag("pt"), DateLocale::PtBr);
        assert_eq!(DateLocale::from_tag("en"), DateLocale::En);
        assert_eq!(DateLocale::from_tag("fr"), DateLocale::En);
    }

    #[test]
    fn test_display_date() {
        let date = Utc.with_ymd_and_hms(2021, 3, 15, 19, 25, 28).unwrap();
        assert_eq!(display_date(&date, DateLocale::PtBr), "15 mar 2021");
        assert_eq!(display_date(&date, DateLocale::En), "15 Mar 2021");
    }

    #[test]
    fn test_display_date_no_zero_padding() {
        let date = Utc.with_ymd_and_hms(2022, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(display_date(&date, DateLocale::En), "3 Jan 2022");
    }

    #[test]
    fn test_edited_stamp() {
        let date = Utc.with_ymd_and_hms(2021, 3, 16, 19, 5, 0).unwrap();
        assert_eq!(
            edited_stamp(&date, DateLocale::PtBr),
            "16 mar 2021, às 19:5"
        );
        assert_eq!(edited_stamp(&date, DateLocale::En), "16 Mar 2021, at 19:5");
    }
}
