//! Category schema and one-hot encoding of free-text category lists.
//!
//! Business records carry their categories as a single string joined with
//! `", "`. A [`CategorySchema`] fixes the recognised labels and the dimension
//! each one occupies; labels outside the schema are dropped without error.
//!
//! # Examples
//! ```
//! use poirec_core::CategorySchema;
//!
//! let schema = CategorySchema::new(["Food", "Italian", "Shopping"]).unwrap();
//! assert_eq!(schema.encode("Food, Shopping"), vec![1.0, 0.0, 1.0]);
//! assert_eq!(schema.encode("Laundromats"), vec![0.0, 0.0, 0.0]);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

/// Separator between labels in a record's category text.
pub const CATEGORY_SEPARATOR: &str = ", ";

/// Labels recognised by the default schema, in dimension order.
pub const DEFAULT_CATEGORY_LABELS: [&str; 25] = [
    "Food",
    "Italian",
    "Shopping",
    "Pets",
    "Printing Services",
    "Local Services",
    "Electronics",
    "Furniture Stores",
    "Restaurants",
    "Bubble Tea",
    "Bakeries",
    "Fast Food",
    "Sports Wear",
    "Religious Organizations",
    "Fashion",
    "Breakfast & Brunch",
    "Dentists",
    "Health & Medical",
    "Japanese",
    "Automotive",
    "Hotels & Travel",
    "Korean",
    "Bookstores",
    "Bars",
    "IT Services & Computer Repair",
];

static DEFAULT_SCHEMA: LazyLock<CategorySchema> = LazyLock::new(CategorySchema::default);

/// Errors returned by [`CategorySchema::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategorySchemaError {
    /// A label was empty or whitespace.
    #[error("category label at position {position} is blank")]
    BlankLabel {
        /// Zero-based position of the offending label.
        position: usize,
    },
    /// The same label appeared more than once.
    #[error("category label {label:?} appears more than once")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}

/// Ordered set of category labels defining the one-hot dimensions.
///
/// The schema is immutable once built. Lookups go through a label-to-index
/// map, so extending the vocabulary only means supplying more labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<String>", into = "Vec<String>")
)]
pub struct CategorySchema {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl CategorySchema {
    /// Validate and build a schema from labels in dimension order.
    ///
    /// # Errors
    /// Returns [`CategorySchemaError::BlankLabel`] for empty or whitespace
    /// labels and [`CategorySchemaError::DuplicateLabel`] when a label is
    /// repeated.
    pub fn new<I, S>(labels: I) -> Result<Self, CategorySchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut positions = HashMap::new();
        for (position, raw) in labels.into_iter().enumerate() {
            let label: String = raw.into();
            if label.trim().is_empty() {
                return Err(CategorySchemaError::BlankLabel { position });
            }
            if positions.insert(label.clone(), position).is_some() {
                return Err(CategorySchemaError::DuplicateLabel { label });
            }
            ordered.push(label);
        }
        Ok(Self {
            labels: ordered,
            positions,
        })
    }

    /// Return the process-wide default schema.
    ///
    /// The schema is built on first use and never mutated afterwards.
    #[must_use]
    pub fn shared() -> &'static Self {
        &DEFAULT_SCHEMA
    }

    /// Number of one-hot dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Report whether the schema has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in dimension order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Dimension assigned to `label`, if the schema knows it.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// One-hot encode a `", "`-separated category list.
    ///
    /// Unknown labels are ignored, so empty or unrecognised text yields the
    /// all-zero vector. The result always has [`len`](Self::len) entries and
    /// its order never depends on the order of labels in `categories`.
    #[must_use]
    pub fn encode(&self, categories: &str) -> Vec<f64> {
        let mut encoding = vec![0.0_f64; self.labels.len()];
        for position in categories
            .split(CATEGORY_SEPARATOR)
            .filter_map(|label| self.position(label))
        {
            if let Some(slot) = encoding.get_mut(position) {
                *slot = 1.0_f64;
            }
        }
        encoding
    }
}

impl Default for CategorySchema {
    fn default() -> Self {
        let labels: Vec<String> = DEFAULT_CATEGORY_LABELS
            .iter()
            .map(|label| (*label).to_owned())
            .collect();
        let positions = labels
            .iter()
            .enumerate()
            .map(|(position, label)| (label.clone(), position))
            .collect();
        Self { labels, positions }
    }
}

impl TryFrom<Vec<String>> for CategorySchema {
    type Error = CategorySchemaError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<CategorySchema> for Vec<String> {
    fn from(schema: CategorySchema) -> Self {
        schema.labels
    }
}
