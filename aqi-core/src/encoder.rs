//! Label encoders shipped alongside a trained model.
//!
//! Both encoders are a plain list of class names; a class's code is its
//! position in the list. The JSON form is `{"classes": ["...", ...]}`.

use crate::category::CategoryLabel;
use crate::error::{AqiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw on-disk form of either encoder.
#[derive(Debug, Deserialize)]
pub struct EncoderClasses {
    pub classes: Vec<String>,
}

fn check_unique(classes: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for c in classes {
        if !seen.insert(c.as_str()) {
            return Err(AqiError::DuplicateClass(c.clone()));
        }
    }
    Ok(())
}

/// Maps location (city) names to the integer code used as a model feature.
///
/// The class list is also the closed set of known locations, enumerated in
/// code order.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "EncoderClasses")]
pub struct LocationEncoder {
    classes: Vec<String>,
}

impl TryFrom<EncoderClasses> for LocationEncoder {
    type Error = AqiError;

    fn try_from(value: EncoderClasses) -> Result<Self> {
        LocationEncoder::new(value.classes)
    }
}

impl LocationEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        check_unique(&classes)?;
        Ok(LocationEncoder { classes })
    }

    pub fn encode(&self, location: &str) -> Result<usize> {
        self.classes
            .iter()
            .position(|c| c == location)
            .ok_or_else(|| AqiError::UnknownLocation(location.to_string()))
    }

    pub fn decode(&self, code: usize) -> Result<&str> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(AqiError::UnknownLocationCode(code))
    }

    /// Known locations in code order.
    pub fn locations(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Decodes the model's integer output into a [`CategoryLabel`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "EncoderClasses")]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl TryFrom<EncoderClasses> for LabelEncoder {
    type Error = AqiError;

    fn try_from(value: EncoderClasses) -> Result<Self> {
        LabelEncoder::new(value.classes)
    }
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        check_unique(&classes)?;
        Ok(LabelEncoder { classes })
    }

    /// Decode a class index.
    ///
    /// Fails with a configuration error when the index is out of range or
    /// the class name has no entry in the category table.
    pub fn decode(&self, index: usize) -> Result<CategoryLabel> {
        let name = self.classes.get(index).ok_or(AqiError::UnknownClassIndex {
            index,
            classes: self.classes.len(),
        })?;
        CategoryLabel::from_name(name)
    }

    /// Class names that do not map to a [`CategoryLabel`].
    pub fn unmapped_classes(&self) -> Vec<&str> {
        self.classes
            .iter()
            .filter(|c| CategoryLabel::from_name(c).is_err())
            .map(String::as_str)
            .collect()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
