//! Parsers for the composite answers: dates, names, yes/no flags and
//! the JSON metadata embedded in file-upload answers.

use chrono::NaiveDate;
use serde::Deserialize;

use super::error::IntakeError;
use super::fields;
use super::payload::{RawRequest, Section};

/// Build a date from a `{month, day, year}` answer.
///
/// Every part must be an integer and the triple must name a real
/// calendar day; nothing is clamped or truncated.
pub fn parse_date(section: &Section<'_>) -> Result<NaiveDate, IntakeError> {
    let month = date_part(section, fields::MONTH)?;
    let day = date_part(section, fields::DAY)?;
    let year = date_part(section, fields::YEAR)?;

    let year = i32::try_from(year)
        .map_err(|_| IntakeError::invalid(&section.path(fields::YEAR), "year out of range"))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        IntakeError::invalid(
            section.key(),
            format!("{month}/{day}/{year} is not a valid date"),
        )
    })
}

/// Date answer that is required to be present.
pub fn required_date(req: &RawRequest, key: &str) -> Result<NaiveDate, IntakeError> {
    parse_date(&req.required_section(key)?)
}

/// Date answer that may be left blank. A partially filled date is an error.
pub fn optional_date(req: &RawRequest, key: &str) -> Result<Option<NaiveDate>, IntakeError> {
    let Some(section) = req.section(key)? else {
        return Ok(None);
    };
    let blank = [fields::MONTH, fields::DAY, fields::YEAR]
        .iter()
        .map(|part| section.text(part))
        .collect::<Result<Vec<_>, _>>()?
        .iter()
        .all(Option::is_none);
    if blank {
        return Ok(None);
    }
    parse_date(&section).map(Some)
}

fn date_part(section: &Section<'_>, part: &str) -> Result<u32, IntakeError> {
    let text = section.required_text(part)?;
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntakeError::invalid(
            &section.path(part),
            format!("'{text}' is not a number"),
        ));
    }
    text.parse::<u32>().map_err(|_| {
        IntakeError::invalid(&section.path(part), format!("'{text}' is out of range"))
    })
}

/// A `{prefix, first, last}` name answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub prefix: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
}

impl NameParts {
    pub fn from_section(section: &Section<'_>) -> Result<Self, IntakeError> {
        Ok(Self {
            prefix: section.text(fields::PREFIX)?,
            first: section.text(fields::FIRST)?,
            last: section.text(fields::LAST)?,
        })
    }

    /// Name answer that may be left blank entirely.
    pub fn optional(req: &RawRequest, key: &str) -> Result<Self, IntakeError> {
        match req.section(key)? {
            Some(section) => Self::from_section(&section),
            None => Ok(Self::default()),
        }
    }
}

/// `true` only for the literal "Yes".
pub fn is_yes(answer: Option<&str>) -> bool {
    answer == Some(fields::YES)
}

/// Age answer, sent as text or number. `12.0` counts as a whole number.
pub fn parse_age(req: &RawRequest) -> Result<i64, IntakeError> {
    let text = req.required_text(fields::AGE)?;
    let age = text
        .parse::<i64>()
        .ok()
        .or_else(|| whole_number(&text))
        .ok_or_else(|| IntakeError::invalid(fields::AGE, format!("'{text}' is not a whole number")))?;
    if !(0..=150).contains(&age) {
        return Err(IntakeError::invalid(fields::AGE, format!("{age} is out of range")));
    }
    Ok(age)
}

fn whole_number(text: &str) -> Option<i64> {
    let value = text.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15).then_some(value as i64)
}

/// File name and link embedded in an upload answer's `value`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadMetadata {
    pub name: String,
    pub url: String,
}

/// Decode the JSON string held in an upload answer's `value`.
///
/// An empty answer yields `None`; malformed JSON is an error.
pub fn parse_upload(req: &RawRequest, key: &str) -> Result<Option<UploadMetadata>, IntakeError> {
    let Some(section) = req.section(key)? else {
        return Ok(None);
    };
    let Some(raw) = section.text(fields::VALUE)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| IntakeError::InvalidJson {
            context: section.path(fields::VALUE),
            reason: e.to_string(),
        })
}
