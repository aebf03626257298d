//! The loaded model bundle shared by every forecast and ranking run.

use crate::error::{ModelError, Result};
use crate::forest::RandomForest;
use crate::scaler::StandardScaler;
use crate::{Model, LABEL_ENCODER_FILE, LOCATION_ENCODER_FILE, MODEL_FILE, SCALER_FILE};
use aqi_core::{CategoryLabel, Classify, FeatureRecord, LabelEncoder, LocationEncoder, FEATURE_COUNT};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Demo forest for eight Pakistani cities, embedded at compile time.
pub static DEMO_MODEL: &str = include_str!("../../fixtures/demo-model/model.json");
pub static DEMO_CITY_ENCODER: &str = include_str!("../../fixtures/demo-model/city_encoder.json");
pub static DEMO_AQI_ENCODER: &str = include_str!("../../fixtures/demo-model/aqi_encoder.json");

/// Classifier, encoders and optional scaler, loaded once and read-only
/// afterwards.
///
/// Implements [`Classify`]: a feature row is scaled (when a scaler was
/// shipped), run through the model, and the class index decoded into a
/// [`CategoryLabel`].
#[derive(Debug)]
pub struct ModelContext {
    model: Box<dyn Model>,
    locations: LocationEncoder,
    labels: LabelEncoder,
    scaler: Option<StandardScaler>,
}

fn parse_encoder<T: DeserializeOwned>(json: &str, artifact: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|source| ModelError::Json {
        artifact: artifact.to_string(),
        source,
    })
}

fn read_artifact(dir: &Path, file: &str) -> Result<String> {
    let path = dir.join(file);
    std::fs::read_to_string(&path).map_err(|source| ModelError::Io { path, source })
}

impl ModelContext {
    pub fn new(
        model: Box<dyn Model>,
        locations: LocationEncoder,
        labels: LabelEncoder,
        scaler: Option<StandardScaler>,
    ) -> Result<Self> {
        if model.n_features() != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact(format!(
                "model expects {} features, feature records have {}",
                model.n_features(),
                FEATURE_COUNT
            )));
        }
        if model.n_classes() != labels.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "model has {} classes but the label encoder has {}",
                model.n_classes(),
                labels.len()
            )));
        }
        if locations.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "location encoder has no classes".to_string(),
            ));
        }
        let unmapped = labels.unmapped_classes();
        if !unmapped.is_empty() {
            warn!(
                "[AQI Debug] model: label encoder classes without a category mapping: {:?}",
                unmapped
            );
        }
        Ok(Self {
            model,
            locations,
            labels,
            scaler,
        })
    }

    /// Build a context from artifact JSON strings.
    pub fn from_json_parts(
        model_json: &str,
        location_json: &str,
        label_json: &str,
        scaler_json: Option<&str>,
    ) -> Result<Self> {
        let model = RandomForest::from_json(model_json)?;
        let locations: LocationEncoder = parse_encoder(location_json, LOCATION_ENCODER_FILE)?;
        let labels: LabelEncoder = parse_encoder(label_json, LABEL_ENCODER_FILE)?;
        let scaler = scaler_json.map(StandardScaler::from_json).transpose()?;
        info!(
            "[AQI Debug] model: loaded forest of {} trees, {} locations, {} labels, scaler: {}",
            model.n_trees(),
            locations.len(),
            labels.len(),
            scaler.is_some()
        );
        ModelContext::new(Box::new(model), locations, labels, scaler)
    }

    /// Load the artifacts from a model directory.
    ///
    /// The scaler file is optional: when it does not exist the context runs
    /// unscaled. A scaler file that exists but cannot be parsed is an error.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let model_json = read_artifact(dir, MODEL_FILE)?;
        let location_json = read_artifact(dir, LOCATION_ENCODER_FILE)?;
        let label_json = read_artifact(dir, LABEL_ENCODER_FILE)?;
        let scaler_path = dir.join(SCALER_FILE);
        let scaler_json = if scaler_path.exists() {
            Some(read_artifact(dir, SCALER_FILE)?)
        } else {
            debug!(
                "[AQI Debug] model: no {} in {}, using unscaled features",
                SCALER_FILE,
                dir.display()
            );
            None
        };
        ModelContext::from_json_parts(
            &model_json,
            &location_json,
            &label_json,
            scaler_json.as_deref(),
        )
    }

    /// The embedded demo model.
    pub fn demo() -> Result<Self> {
        ModelContext::from_json_parts(DEMO_MODEL, DEMO_CITY_ENCODER, DEMO_AQI_ENCODER, None)
    }

    pub fn locations(&self) -> &LocationEncoder {
        &self.locations
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    pub fn is_scaled(&self) -> bool {
        self.scaler.is_some()
    }

    /// Per-feature importances in `FEATURE_NAMES` order, if the model has them.
    pub fn feature_importances(&self) -> Option<&[f64]> {
        self.model.feature_importances()
    }
}

impl Classify for ModelContext {
    fn classify(&self, record: &FeatureRecord) -> aqi_core::Result<CategoryLabel> {
        let row = match &self.scaler {
            Some(scaler) => scaler.transform(record),
            None => record.to_array(),
        };
        let class = self.model.predict(&row)?;
        self.labels.decode(class)
    }
}
