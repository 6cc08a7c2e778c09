//! Configuration parameters for cross-similarity computation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SimilarityError;

/// Value assigned to a frame pair whose optimal shift is 0 or 1 semitone
pub const MATCH_COEF: f32 = 1.0;

/// Value assigned to every other frame pair in the binary OTI scheme
pub const MISMATCH_COEF: f32 = 0.0;

/// How the two thresholded axes of the Euclidean scheme are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combination {
    /// Matrix product of the X-axis and transposed Y-axis similarities.
    /// Requires as many query frames as reference frames after embedding,
    /// so it is batch only.
    MatrixProduct,

    /// Element-wise product (mutual nearest neighbours), any shape
    #[default]
    CrossRecurrence,
}

/// Cross-similarity configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSimilarityConfig {
    /// Time-delay embedding stride in frames (default: 1)
    /// Also the number of frames released per streaming step
    pub tau: usize,

    /// Number of stacked frames per embedded vector (default: 9)
    /// 1 disables embedding
    pub embed_dimension: usize,

    /// Percentile fraction used for the adaptive distance threshold (default: 0.095)
    pub kappa: f32,

    /// Highest circular shift tried when searching transpositions (default: 12)
    pub noti: usize,

    /// Rotate the reference to the query key before embedding (default: true)
    pub oti: bool,

    /// Stack frames before OTI-binary scoring (default: true)
    pub to_blocked: bool,

    /// Use the binary OTI scheme instead of Euclidean thresholding (default: false)
    pub oti_binary: bool,

    /// Treat the query-axis threshold as all ones instead of computing it (default: false)
    pub optimise_threshold: bool,

    /// Combination of the thresholded axes (default: CrossRecurrence)
    pub combination: Combination,
}

impl Default for CrossSimilarityConfig {
    fn default() -> Self {
        Self {
            tau: 1,
            embed_dimension: 9,
            kappa: 0.095,
            noti: 12,
            oti: true,
            to_blocked: true,
            oti_binary: false,
            optimise_threshold: false,
            combination: Combination::CrossRecurrence,
        }
    }
}

impl CrossSimilarityConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::Configuration` if `tau` or `embed_dimension`
    /// is zero, or `kappa` is outside `[0, 1]`
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.tau == 0 {
            return Err(SimilarityError::Configuration(
                "tau must be >= 1".to_string(),
            ));
        }
        if self.embed_dimension == 0 {
            return Err(SimilarityError::Configuration(
                "embedDimension must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.kappa) {
            return Err(SimilarityError::Configuration(format!(
                "kappa must be in [0.0, 1.0], got {}",
                self.kappa
            )));
        }
        Ok(())
    }

    /// Minimum number of query frames a streaming step works on
    pub fn min_frames(&self) -> usize {
        self.embed_dimension.saturating_add(1)
    }

    /// Parse a JSON parameter map keyed by the camelCase option names
    ///
    /// See [`CrossSimilarityConfig::from_parameters`].
    pub fn from_json_str(json: &str) -> Result<Self, SimilarityError> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            SimilarityError::Configuration(format!("Malformed parameter map: {}", e))
        })?;
        Self::from_parameters(&value)
    }

    /// Build a configuration from an untyped parameter map
    ///
    /// Recognised keys: `tau`, `embedDimension`, `kappa`, `noti`, `oti`,
    /// `toBlocked`, `otiBinary`, `optimiseThreshold`, `combination`
    /// (`"matrixProduct"` or `"crossRecurrence"`). Missing keys keep their
    /// defaults; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::Configuration` if the map is not an object,
    /// a key is unknown, a value has the wrong type, or the result fails
    /// [`CrossSimilarityConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_csm::CrossSimilarityConfig;
    ///
    /// let config = CrossSimilarityConfig::from_json_str(r#"{"otiBinary": true, "noti": 11}"#)?;
    /// assert!(config.oti_binary);
    /// assert_eq!(config.noti, 11);
    ///
    /// let err = CrossSimilarityConfig::from_json_str(r#"{"optimiseThreshold": "yes"}"#);
    /// assert!(err.is_err());
    /// # Ok::<(), stratum_csm::SimilarityError>(())
    /// ```
    pub fn from_parameters(params: &Value) -> Result<Self, SimilarityError> {
        let map = params.as_object().ok_or_else(|| {
            SimilarityError::Configuration("Parameters must be a JSON object".to_string())
        })?;

        for key in map.keys() {
            if !KNOWN_PARAMETERS.contains(&key.as_str()) {
                return Err(SimilarityError::Configuration(format!(
                    "Unknown parameter '{}'",
                    key
                )));
            }
        }

        let defaults = Self::default();
        let config = Self {
            tau: read_count(map, "tau", defaults.tau)?,
            embed_dimension: read_count(map, "embedDimension", defaults.embed_dimension)?,
            kappa: read_real(map, "kappa", defaults.kappa)?,
            noti: read_count(map, "noti", defaults.noti)?,
            oti: read_bool(map, "oti", defaults.oti)?,
            to_blocked: read_bool(map, "toBlocked", defaults.to_blocked)?,
            oti_binary: read_bool(map, "otiBinary", defaults.oti_binary)?,
            optimise_threshold: read_bool(map, "optimiseThreshold", defaults.optimise_threshold)?,
            combination: read_combination(map, defaults.combination)?,
        };
        config.validate()?;

        log::debug!("Loaded cross-similarity parameters: {:?}", config);
        Ok(config)
    }
}

const KNOWN_PARAMETERS: [&str; 9] = [
    "tau",
    "embedDimension",
    "kappa",
    "noti",
    "oti",
    "toBlocked",
    "otiBinary",
    "optimiseThreshold",
    "combination",
];

fn read_bool(map: &Map<String, Value>, key: &str, default: bool) -> Result<bool, SimilarityError> {
    match map.get(key) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(SimilarityError::Configuration(format!(
            "Invalid type for parameter '{}', expects Boolean type, got {}",
            key, other
        ))),
    }
}

fn read_count(map: &Map<String, Value>, key: &str, default: usize) -> Result<usize, SimilarityError> {
    match map.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                SimilarityError::Configuration(format!(
                    "Invalid value for parameter '{}', expects non-negative integer, got {}",
                    key, value
                ))
            }),
    }
}

fn read_real(map: &Map<String, Value>, key: &str, default: f32) -> Result<f32, SimilarityError> {
    match map.get(key) {
        None => Ok(default),
        Some(value) => value.as_f64().map(|x| x as f32).ok_or_else(|| {
            SimilarityError::Configuration(format!(
                "Invalid value for parameter '{}', expects real number, got {}",
                key, value
            ))
        }),
    }
}

fn read_combination(
    map: &Map<String, Value>,
    default: Combination,
) -> Result<Combination, SimilarityError> {
    match map.get("combination") {
        None => Ok(default),
        Some(Value::String(s)) if s == "matrixProduct" => Ok(Combination::MatrixProduct),
        Some(Value::String(s)) if s == "crossRecurrence" => Ok(Combination::CrossRecurrence),
        Some(other) => Err(SimilarityError::Configuration(format!(
            "Invalid value for parameter 'combination', expects \"matrixProduct\" or \"crossRecurrence\", got {}",
            other
        ))),
    }
}
