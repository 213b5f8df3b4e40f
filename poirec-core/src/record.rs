//! Raw business records and their validated form.
//!
//! A [`RawRecord`] holds the textual fields exactly as the ingestion layer
//! found them. Converting it into a [`BusinessRecord`] applies the presence
//! gate first and numeric parsing second, so a record is either fully usable
//! or rejected with a single [`RecordError`].

use std::fmt;

use geo::Coord;
use thiserror::Error;

use crate::wire::is_blank_identifier;

/// Fields a business record must provide before it can be vectorised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// Unique business identifier.
    BusinessId,
    /// WGS84 latitude.
    Latitude,
    /// WGS84 longitude.
    Longitude,
    /// `", "`-separated category labels.
    Categories,
    /// Average star rating.
    Stars,
}

impl RecordField {
    /// Every required field, in the order the presence gate checks them.
    pub const ALL: [Self; 5] = [
        Self::BusinessId,
        Self::Latitude,
        Self::Longitude,
        Self::Categories,
        Self::Stars,
    ];

    /// Field name as it appears in source records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BusinessId => "business_id",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Categories => "categories",
            Self::Stars => "stars",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while validating a [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field was absent, or the identifier was blank.
    #[error("record is missing required field `{field}`")]
    MissingField {
        /// The absent field.
        field: RecordField,
    },
    /// A numeric field could not be parsed as a finite number.
    #[error("field `{field}` holds {value:?}, which is not a finite number")]
    MalformedNumber {
        /// The field that failed to parse.
        field: RecordField,
        /// Raw text found in the record.
        value: String,
    },
}

/// Business record fields as delivered by the ingestion layer.
///
/// Every field is optional text; numbers are kept in their source form until
/// [`BusinessRecord::try_from`] parses them.
///
/// # Examples
/// ```
/// use poirec_core::{BusinessRecord, RawRecord, RecordField};
///
/// let raw = RawRecord::new()
///     .with_field(RecordField::BusinessId, "b-1")
///     .with_field(RecordField::Latitude, "34.42")
///     .with_field(RecordField::Longitude, "-119.71")
///     .with_field(RecordField::Categories, "Food, Italian")
///     .with_field(RecordField::Stars, "4.5");
/// let record = BusinessRecord::try_from(&raw).unwrap();
/// assert_eq!(record.latitude(), 34.42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawRecord {
    /// Unique business identifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub business_id: Option<String>,
    /// Latitude in decimal degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<String>,
    /// Longitude in decimal degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<String>,
    /// Category labels joined with `", "`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Option<String>,
    /// Star rating.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stars: Option<String>,
}

impl RawRecord {
    /// Construct a record with every field absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the text stored for `field`, if any.
    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Store `value` for `field`, replacing any previous value.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Set a field while returning `self` for chaining.
    #[must_use]
    pub fn with_field(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove a field while returning `self` for chaining.
    #[must_use]
    pub fn without_field(mut self, field: RecordField) -> Self {
        *self.slot_mut(field) = None;
        self
    }

    const fn slot(&self, field: RecordField) -> &Option<String> {
        match field {
            RecordField::BusinessId => &self.business_id,
            RecordField::Latitude => &self.latitude,
            RecordField::Longitude => &self.longitude,
            RecordField::Categories => &self.categories,
            RecordField::Stars => &self.stars,
        }
    }

    const fn slot_mut(&mut self, field: RecordField) -> &mut Option<String> {
        match field {
            RecordField::BusinessId => &mut self.business_id,
            RecordField::Latitude => &mut self.latitude,
            RecordField::Longitude => &mut self.longitude,
            RecordField::Categories => &mut self.categories,
            RecordField::Stars => &mut self.stars,
        }
    }

    fn require(&self, field: RecordField) -> Result<&str, RecordError> {
        self.get(field)
            .ok_or(RecordError::MissingField { field })
    }
}

/// A business whose required fields are present and numeric fields parsed.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusinessRecord {
    /// Unique business identifier.
    pub id: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Category labels joined with `", "`.
    pub categories: String,
    /// Star rating.
    pub stars: f64,
}

impl BusinessRecord {
    /// Construct a record from already-validated parts.
    pub fn new(
        id: impl Into<String>,
        location: Coord<f64>,
        categories: impl Into<String>,
        stars: f64,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            categories: categories.into(),
            stars,
        }
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

impl TryFrom<&RawRecord> for BusinessRecord {
    type Error = RecordError;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        let id = raw
            .require(RecordField::BusinessId)
            .ok()
            .filter(|id| !is_blank_identifier(id))
            .ok_or(RecordError::MissingField {
                field: RecordField::BusinessId,
            })?;
        let latitude = raw.require(RecordField::Latitude)?;
        let longitude = raw.require(RecordField::Longitude)?;
        let categories = raw.require(RecordField::Categories)?;
        let stars = raw.require(RecordField::Stars)?;

        let lat = parse_number(RecordField::Latitude, latitude)?;
        let lon = parse_number(RecordField::Longitude, longitude)?;
        let rating = parse_number(RecordField::Stars, stars)?;
        Ok(Self::new(id, Coord { x: lon, y: lat }, categories, rating))
    }
}

fn parse_number(field: RecordField, text: &str) -> Result<f64, RecordError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RecordError::MalformedNumber {
            field,
            value: text.to_owned(),
        })
}
