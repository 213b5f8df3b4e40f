//! Text encoding for the grouped ranking pipeline.
//!
//! The first stage emits one `(key, value)` pair per reference vector and
//! candidate. Keys are the reference vector's values joined with `,`; values
//! are the candidate identifier followed by its values, also joined with
//! `,`. Identifiers therefore must not contain a comma.

use thiserror::Error;

use crate::{Candidate, FeatureVector};

/// Separator between encoded fields.
pub const FIELD_DELIMITER: char = ',';

/// Errors raised while encoding or decoding pipeline text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// An identifier contained the field delimiter.
    #[error("identifier {id:?} contains the field delimiter")]
    DelimiterInIdentifier {
        /// Offending identifier.
        id: String,
    },
    /// A value carried no identifier.
    #[error("encoded candidate has an empty identifier")]
    MissingIdentifier,
    /// A vector had no components.
    #[error("encoded vector is empty")]
    EmptyVector,
    /// A component was not a finite number.
    #[error("component {position} ({token:?}) is not a finite number")]
    MalformedNumber {
        /// Zero-based component index.
        position: usize,
        /// Raw component text.
        token: String,
    },
}

/// Encode a reference vector as a grouping key.
#[must_use]
pub fn encode_key(features: &FeatureVector) -> String {
    features.to_string()
}

/// Decode a grouping key back into a reference vector.
///
/// # Errors
/// Returns [`WireError::EmptyVector`] for blank keys and
/// [`WireError::MalformedNumber`] for non-numeric components.
pub fn decode_key(key: &str) -> Result<FeatureVector, WireError> {
    parse_components(key)
}

/// Encode a candidate as a pipeline value.
///
/// # Errors
/// Returns [`WireError::DelimiterInIdentifier`] when the identifier contains
/// a comma and [`WireError::MissingIdentifier`] when it is blank.
pub fn encode_value(candidate: &Candidate) -> Result<String, WireError> {
    if is_blank_identifier(&candidate.id) {
        return Err(WireError::MissingIdentifier);
    }
    if candidate.id.contains(FIELD_DELIMITER) {
        return Err(WireError::DelimiterInIdentifier {
            id: candidate.id.clone(),
        });
    }
    Ok(format!(
        "{}{FIELD_DELIMITER}{}",
        candidate.id, candidate.features
    ))
}

/// Decode a pipeline value into a candidate.
///
/// # Errors
/// Returns [`WireError::MissingIdentifier`] when no identifier precedes the
/// first delimiter, and the vector errors of [`decode_key`] otherwise.
///
/// # Examples
/// ```
/// use poirec_core::wire::decode_value;
///
/// let candidate = decode_value("b-7,34.5,-119.7,1,0,4").unwrap();
/// assert_eq!(candidate.id, "b-7");
/// assert_eq!(candidate.features.len(), 5);
/// ```
pub fn decode_value(value: &str) -> Result<Candidate, WireError> {
    let (id, payload) = value
        .split_once(FIELD_DELIMITER)
        .ok_or(WireError::EmptyVector)?;
    if is_blank_identifier(id) {
        return Err(WireError::MissingIdentifier);
    }
    Ok(Candidate::new(id, parse_components(payload)?))
}

/// Whether `id` is empty or whitespace only.
#[must_use]
pub fn is_blank_identifier(id: &str) -> bool {
    id.trim().is_empty()
}

fn parse_components(text: &str) -> Result<FeatureVector, WireError> {
    if text.trim().is_empty() {
        return Err(WireError::EmptyVector);
    }
    text.split(FIELD_DELIMITER)
        .enumerate()
        .map(|(position, token)| {
            token
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|component| component.is_finite())
                .ok_or_else(|| WireError::MalformedNumber {
                    position,
                    token: token.to_owned(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn key_round_trips_reference_vector() {
        let features = FeatureVector::new(vec![34.426_678_7, -119.711_196_8, 1.0, 0.0, 5.0]);
        let key = encode_key(&features);
        assert_eq!(key, "34.4266787,-119.7111968,1,0,5");
        assert_eq!(decode_key(&key), Ok(features));
    }

    #[rstest]
    fn value_keeps_identifier_apart_from_payload() {
        let candidate = Candidate::new("QZ9", vec![1.5, 0.0, 2.0]);
        let value = encode_value(&candidate).expect("encodable");
        assert_eq!(value, "QZ9,1.5,0,2");
        assert_eq!(decode_value(&value), Ok(candidate));
    }

    #[rstest]
    fn rejects_identifier_with_delimiter() {
        let candidate = Candidate::new("a,b", vec![1.0]);
        assert_eq!(
            encode_value(&candidate),
            Err(WireError::DelimiterInIdentifier {
                id: "a,b".to_owned()
            })
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t")]
    fn rejects_blank_identifiers_in_both_directions(#[case] id: &str) {
        let candidate = Candidate::new(id, vec![1.0, 2.0]);
        assert_eq!(encode_value(&candidate), Err(WireError::MissingIdentifier));
        assert_eq!(
            decode_value(&format!("{id},1,2")),
            Err(WireError::MissingIdentifier)
        );
    }

    #[rstest]
    #[case("", WireError::EmptyVector)]
    #[case("lonely-id", WireError::EmptyVector)]
    #[case("id,", WireError::EmptyVector)]
    #[case(",1,2", WireError::MissingIdentifier)]
    #[case("id,1,x", WireError::MalformedNumber { position: 1, token: "x".to_owned() })]
    #[case("id,1,,2", WireError::MalformedNumber { position: 1, token: String::new() })]
    fn rejects_malformed_values(#[case] value: &str, #[case] expected: WireError) {
        assert_eq!(decode_value(value), Err(expected));
    }
}
