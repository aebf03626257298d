use crate::category::CategoryLabel;
use crate::error::Result;
use crate::feature::FeatureRecord;

/// A deterministic mapping from a feature row to an air quality category.
///
/// The forecast and ranking engines only see this trait, so a trained model
/// and a test stub are interchangeable. Closures of the right shape
/// implement it directly.
pub trait Classify {
    fn classify(&self, record: &FeatureRecord) -> Result<CategoryLabel>;
}

impl<F> Classify for F
where
    F: Fn(&FeatureRecord) -> Result<CategoryLabel>,
{
    fn classify(&self, record: &FeatureRecord) -> Result<CategoryLabel> {
        self(record)
    }
}
