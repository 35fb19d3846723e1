//! Wire Schema
//!
//! The remote API returns loosely shaped JSON. Everything passes through
//! [`decode`] before it reaches the filter, so the rest of the crate only
//! ever sees validated [`PromotionRecord`]s.

use jiff::{
    Timestamp,
    civil::{Date, Time},
    tz::TimeZone,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::promotions::{PromotionId, PromotionRecord, Slot};

/// Errors that reject the whole payload.
#[derive(Debug, Error)]
pub enum WireError {
    /// The body is not JSON, or not one of the accepted envelopes.
    #[error("malformed promotions payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that reject a single record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record has no identifier.
    #[error("record has no id")]
    MissingId,

    /// The record has no slot.
    #[error("record has no slot")]
    MissingSlot,

    /// A field has the wrong JSON type.
    #[error("record has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),

    /// A date field could not be parsed.
    #[error("invalid {field} {value:?}")]
    InvalidDate {
        /// Field name as sent by the API.
        field: &'static str,

        /// Raw value.
        value: String,

        /// Parser error.
        #[source]
        source: jiff::Error,
    },

    /// `startDate` is after `endDate`.
    #[error("startDate is after endDate")]
    InvertedWindow,
}

/// Record dropped during validation.
#[derive(Debug)]
pub struct RejectedRecord {
    /// Position in the payload.
    pub position: usize,

    /// Identifier, when one could be read.
    pub id: Option<String>,

    /// Why the record was dropped.
    pub error: RecordError,
}

/// Outcome of decoding a payload.
#[derive(Debug, Default)]
pub struct Decoded {
    /// Valid records, in payload order.
    pub records: Vec<PromotionRecord>,

    /// Records that failed validation.
    pub rejected: Vec<RejectedRecord>,
}

/// Accepted top-level payload shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PromotionsEnvelope {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(alias = "data")]
        banners: Vec<Value>,
    },
}

impl PromotionsEnvelope {
    fn into_values(self) -> Vec<Value> {
        match self {
            Self::Bare(values) | Self::Wrapped { banners: values } => values,
        }
    }
}

/// Image references sent either as one string or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageList {
    One(String),
    Many(Vec<String>),
}

impl ImageList {
    fn into_vec(self) -> Vec<String> {
        let images = match self {
            Self::One(image) => vec![image],
            Self::Many(images) => images,
        };

        images
            .into_iter()
            .map(|image| image.trim().to_string())
            .filter(|image| !image.is_empty())
            .collect()
    }
}

/// Promotion record exactly as the API sends it. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPromotion {
    #[serde(default, alias = "_id")]
    id: Option<String>,

    #[serde(default, alias = "position")]
    slot: Option<String>,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    is_active: Option<bool>,

    #[serde(default)]
    start_date: Option<String>,

    #[serde(default)]
    end_date: Option<String>,

    #[serde(default)]
    priority: Option<i64>,

    #[serde(default, alias = "desktopImage")]
    desktop_images: Option<ImageList>,

    #[serde(default, alias = "mobileImage")]
    mobile_images: Option<ImageList>,

    #[serde(default)]
    image_url: Option<String>,

    #[serde(default, alias = "link")]
    navigate_link: Option<String>,

    #[serde(default)]
    background_color: Option<String>,
}

impl TryFrom<RawPromotion> for PromotionRecord {
    type Error = RecordError;

    fn try_from(raw: RawPromotion) -> Result<Self, Self::Error> {
        let id = non_blank(raw.id).ok_or(RecordError::MissingId)?;
        let slot = non_blank(raw.slot).ok_or(RecordError::MissingSlot)?;

        let start_date = parse_date("startDate", raw.start_date)?;
        let end_date = parse_date("endDate", raw.end_date)?;

        if start_date
            .zip(end_date)
            .is_some_and(|(start, end)| start > end)
        {
            return Err(RecordError::InvertedWindow);
        }

        Ok(Self {
            id: PromotionId::new(id),
            slot: Slot::new(slot),
            title: non_blank(raw.title),
            is_active: raw.is_active.unwrap_or(false),
            start_date,
            end_date,
            priority: raw.priority.unwrap_or_default(),
            desktop_images: raw.desktop_images.map(ImageList::into_vec).unwrap_or_default(),
            mobile_images: raw.mobile_images.map(ImageList::into_vec).unwrap_or_default(),
            image_url: non_blank(raw.image_url),
            navigate_link: non_blank(raw.navigate_link),
            background_color: non_blank(raw.background_color),
        })
    }
}

/// Decode a response body into validated records.
///
/// # Errors
///
/// Returns an error when the body is not one of the accepted envelopes.
/// Individual invalid records do not fail the payload; they are reported in
/// [`Decoded::rejected`].
pub fn decode(body: &[u8]) -> Result<Decoded, WireError> {
    let envelope: PromotionsEnvelope = serde_json::from_slice(body)?;

    let mut decoded = Decoded::default();

    for (position, value) in envelope.into_values().into_iter().enumerate() {
        let id = value
            .get("id")
            .or_else(|| value.get("_id"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let record = serde_json::from_value::<RawPromotion>(value)
            .map_err(RecordError::Shape)
            .and_then(PromotionRecord::try_from);

        match record {
            Ok(record) => decoded.records.push(record),
            Err(error) => decoded.rejected.push(RejectedRecord {
                position,
                id,
                error,
            }),
        }
    }

    Ok(decoded)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse an RFC 3339 instant, or a bare `YYYY-MM-DD` date at midnight UTC.
fn parse_date(field: &'static str, value: Option<String>) -> Result<Option<Timestamp>, RecordError> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };

    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(Some(timestamp));
    }

    value
        .parse::<Date>()
        .and_then(|date| date.to_datetime(Time::midnight()).to_zoned(TimeZone::UTC))
        .map(|zoned| Some(zoned.timestamp()))
        .map_err(|source| RecordError::InvalidDate {
            field,
            value,
            source,
        })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_bare_arrays_with_api_aliases() -> TestResult {
        let body = br##"[{
            "_id": "65f0",
            "position": "homepage_hero_banner",
            "isActive": true,
            "priority": 3,
            "desktopImage": "wide.png",
            "mobileImages": ["narrow.png", " "],
            "link": "https://shop.example/sale",
            "backgroundColor": "#112233",
            "createdAt": "2026-01-01T00:00:00Z"
        }]"##;

        let decoded = decode(body)?;
        let record = decoded.records.first().ok_or("no record decoded")?;

        assert!(decoded.rejected.is_empty());
        assert_eq!(record.id.as_str(), "65f0");
        assert_eq!(record.slot.as_str(), "homepage_hero_banner");
        assert_eq!(record.desktop_images, ["wide.png"]);
        assert_eq!(record.mobile_images, ["narrow.png"]);
        assert_eq!(record.navigate_link.as_deref(), Some("https://shop.example/sale"));

        Ok(())
    }

    #[test]
    fn accepts_wrapped_envelopes() -> TestResult {
        let banners = br#"{"success": true, "banners": [{"id": "a", "slot": "s"}]}"#;
        let data = br#"{"data": [{"id": "b", "slot": "s"}]}"#;

        assert_eq!(decode(banners)?.records.len(), 1);
        assert_eq!(decode(data)?.records.len(), 1);

        Ok(())
    }

    #[test]
    fn rejects_non_list_payloads() {
        assert!(decode(br#"{"message": "nope"}"#).is_err());
        assert!(decode(b"<html>").is_err());
    }

    #[test]
    fn invalid_records_are_rejected_individually() -> TestResult {
        let body = br#"[
            {"id": "ok", "slot": "s", "isActive": true},
            {"slot": "s"},
            {"id": "no-slot"},
            {"id": "bad-date", "slot": "s", "startDate": "soon"},
            {"id": "inverted", "slot": "s", "startDate": "2026-02-01", "endDate": "2026-01-01"},
            {"id": "bad-type", "slot": "s", "priority": "high"}
        ]"#;

        let decoded = decode(body)?;
        let positions: Vec<usize> = decoded.rejected.iter().map(|r| r.position).collect();

        assert_eq!(decoded.records.len(), 1);
        assert_eq!(positions, [1, 2, 3, 4, 5]);
        assert!(matches!(
            decoded.rejected.get(2).map(|r| &r.error),
            Some(RecordError::InvalidDate { field: "startDate", .. })
        ));
        assert_eq!(
            decoded.rejected.get(4).and_then(|r| r.id.as_deref()),
            Some("bad-type")
        );

        Ok(())
    }

    #[test]
    fn bare_dates_are_midnight_utc() -> TestResult {
        let decoded = decode(br#"[{"id": "a", "slot": "s", "endDate": "2026-03-15"}]"#)?;
        let record = decoded.records.first().ok_or("no record decoded")?;
        let expected: Timestamp = "2026-03-15T00:00:00Z".parse()?;

        assert_eq!(record.end_date, Some(expected));

        Ok(())
    }

    #[test]
    fn missing_active_flag_means_inactive() -> TestResult {
        let decoded = decode(br#"[{"id": "a", "slot": "s"}]"#)?;

        assert!(decoded.records.iter().all(|record| !record.is_active));

        Ok(())
    }
}
