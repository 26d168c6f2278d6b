//! Display formatting of stored values.
//!
//! Stored values stay machine-friendly (ISO dates, JSON locations); what the
//! preview shows and the document receives is produced here:
//!
//! - **Dates**: an ISO `YYYY-MM-DD` value, optionally followed by a time
//!   part, rendered through the field's `dateFormat`. Recognised tokens are
//!   `DD D MM M MMM MMMM YYYY YY BBBB BB`, where `BBBB`/`BB` is the
//!   Buddhist-era year and `MMM`/`MMMM` use the Thai month names. Every
//!   other character is copied. A value that is not an ISO date, or a field
//!   without a format, is shown unchanged.
//! - **Locations**: a JSON [`LocationValue`] joined per the field's
//!   [`LocationOutputFormat`]. Values that are not such JSON pass through.

use chrono::{Datelike, NaiveDate};
use common::model::field::{FieldDefinition, FieldKind};
use common::model::location::{LocationOutputFormat, LocationValue};
use log::debug;

const BUDDHIST_ERA_OFFSET: i32 = 543;

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

const THAI_MONTHS_SHORT: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.",
    "ธ.ค.",
];

/// Longest tokens first so `MMMM` is not read as two `MM`.
const DATE_TOKENS: [&str; 10] = ["MMMM", "MMM", "MM", "M", "DD", "D", "YYYY", "YY", "BBBB", "BB"];

/// Value of a plain, date or location field as it should be displayed.
/// Other field kinds, and values without a definition, are returned as-is.
pub fn display_value(field: Option<&FieldDefinition>, raw: &str) -> String {
    let Some(field) = field else {
        return raw.to_string();
    };
    match field.kind() {
        FieldKind::Date => match field.date_format.as_deref() {
            Some(format) if !format.is_empty() => format_date(raw, format),
            _ => raw.to_string(),
        },
        FieldKind::Location => {
            format_location(raw, field.location_output_format.unwrap_or_default())
        }
        _ => raw.to_string(),
    }
}

/// Formats an ISO date with the token format described in the module docs.
pub fn format_date(raw: &str, format: &str) -> String {
    let Some(date) = parse_iso_date(raw) else {
        if !raw.is_empty() {
            debug!("date value {raw:?} is not ISO, shown unchanged");
        }
        return raw.to_string();
    };

    let month = date.month0() as usize;
    let mut out = String::new();
    let mut rest = format;
    'scan: while !rest.is_empty() {
        for token in DATE_TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                let rendered = match token {
                    "DD" => format!("{:02}", date.day()),
                    "D" => date.day().to_string(),
                    "MMMM" => THAI_MONTHS[month].to_string(),
                    "MMM" => THAI_MONTHS_SHORT[month].to_string(),
                    "MM" => format!("{:02}", date.month()),
                    "M" => date.month().to_string(),
                    "YYYY" => date.year().to_string(),
                    "YY" => format!("{:02}", date.year().rem_euclid(100)),
                    "BBBB" => (date.year() + BUDDHIST_ERA_OFFSET).to_string(),
                    _ => format!("{:02}", (date.year() + BUDDHIST_ERA_OFFSET).rem_euclid(100)),
                };
                out.push_str(&rendered);
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }
    out
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Joins the parts of a JSON location value selected by `format`.
pub fn format_location(raw: &str, format: LocationOutputFormat) -> String {
    let Ok(location) = serde_json::from_str::<LocationValue>(raw) else {
        return raw.to_string();
    };
    let parts: Vec<&str> = match format {
        LocationOutputFormat::Full => vec![
            &location.subdistrict,
            &location.district,
            &location.province,
            &location.postal_code,
        ],
        LocationOutputFormat::SubdistrictDistrictProvince => {
            vec![&location.subdistrict, &location.district, &location.province]
        }
        LocationOutputFormat::DistrictProvince => vec![&location.district, &location.province],
        LocationOutputFormat::Province => vec![&location.province],
        LocationOutputFormat::Subdistrict => vec![&location.subdistrict],
        LocationOutputFormat::District => vec![&location.district],
    }
    .into_iter()
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .collect();
    parts.join(" ")
}
