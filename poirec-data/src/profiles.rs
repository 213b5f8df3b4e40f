//! Reference profiles and category schemas loaded from JSON files.
//!
//! A profiles file holds an array of `{"label": ..., "features": [...]}`
//! objects. A category file holds an array of label strings.

use std::io::{self, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use poirec_core::{CategorySchema, GEO_DIMENSIONS, RATING_DIMENSIONS, ReferenceVector};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::fs::open_utf8_file;

/// Label of the built-in Santa Barbara food profile.
pub const SANTA_BARBARA_FOOD: &str = "santa-barbara-food";

/// Label of the built-in printing services profile.
pub const PRINTING_SERVICES: &str = "printing-services";

/// Errors raised while loading profiles or category schemas.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    /// The file could not be opened.
    #[error("failed to open {path}")]
    Open {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// The file content did not match the expected shape.
    #[error("failed to parse {path}")]
    Parse {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The profiles file listed no profiles.
    #[error("{path} does not define any profiles")]
    NoProfiles {
        /// Requested path.
        path: Utf8PathBuf,
    },
}

/// The two user-history profiles ranked when no profiles file is given.
///
/// Both are shaped for [`CategorySchema::shared`]: a Santa Barbara profile
/// tagged `Food` and `Italian`, and a profile at `(10, 10)` tagged
/// `Printing Services`. Both carry a five-star rating.
///
/// # Examples
/// ```
/// use poirec_core::{CategorySchema, FeatureBuilder};
/// use poirec_data::builtin_profiles;
///
/// let dimension = FeatureBuilder::new(CategorySchema::shared()).dimension();
/// assert!(builtin_profiles().iter().all(|p| p.dimension() == dimension));
/// ```
#[must_use]
pub fn builtin_profiles() -> Vec<ReferenceVector> {
    vec![
        history_profile(SANTA_BARBARA_FOOD, 34.426_678_7, -119.711_196_8, &[0, 1]),
        history_profile(PRINTING_SERVICES, 10.0, 10.0, &[4]),
    ]
}

fn history_profile(label: &str, latitude: f64, longitude: f64, slots: &[usize]) -> ReferenceVector {
    let categories = CategorySchema::shared().len();
    let mut values = Vec::with_capacity(GEO_DIMENSIONS + categories + RATING_DIMENSIONS);
    values.extend([latitude, longitude]);
    values.extend((0..categories).map(|slot| if slots.contains(&slot) { 1.0 } else { 0.0 }));
    values.push(5.0);
    ReferenceVector::new(label, values)
}

/// Load reference profiles from a JSON file.
///
/// # Errors
/// Returns [`ProfileLoadError`] when the file cannot be read or parsed, or
/// lists no profiles.
pub fn load_profiles(path: &Utf8Path) -> Result<Vec<ReferenceVector>, ProfileLoadError> {
    let profiles: Vec<ReferenceVector> = load_json(path)?;
    if profiles.is_empty() {
        return Err(ProfileLoadError::NoProfiles {
            path: path.to_path_buf(),
        });
    }
    Ok(profiles)
}

/// Load a category schema from a JSON array of labels.
///
/// # Errors
/// Returns [`ProfileLoadError`] when the file cannot be read, is not an
/// array of strings, or contains blank or duplicate labels.
pub fn load_category_schema(path: &Utf8Path) -> Result<CategorySchema, ProfileLoadError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, ProfileLoadError> {
    let file = open_utf8_file(path).map_err(|source| ProfileLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ProfileLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
