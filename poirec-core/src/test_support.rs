//! Builders shared by unit, behaviour, and property tests.

use crate::{CategorySchema, RawRecord, RecordField};

/// Labels of the three-dimension schema used throughout the test suites.
pub const SMALL_SCHEMA_LABELS: [&str; 3] = ["Food", "Italian", "Shopping"];

/// Build the small `Food`/`Italian`/`Shopping` schema.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "the fixed labels are unique and non-blank"
)]
pub fn small_schema() -> CategorySchema {
    CategorySchema::new(SMALL_SCHEMA_LABELS).expect("small schema labels are valid")
}

/// Build a raw record with every required field present.
#[must_use]
pub fn raw_business(
    id: &str,
    latitude: f64,
    longitude: f64,
    categories: &str,
    stars: f64,
) -> RawRecord {
    RawRecord::new()
        .with_field(RecordField::BusinessId, id)
        .with_field(RecordField::Latitude, latitude.to_string())
        .with_field(RecordField::Longitude, longitude.to_string())
        .with_field(RecordField::Categories, categories)
        .with_field(RecordField::Stars, stars.to_string())
}
