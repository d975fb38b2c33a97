use serde::{Deserialize, Serialize};

use crate::coerce;

/// Current sea and wind readings. Either reading may be missing upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarineConditions {
    /// Significant wave height in metres.
    #[serde(default)]
    pub wave_height: Option<f64>,
    /// Wind speed in knots.
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

impl MarineConditions {
    /// Wave heights at or below this are treated as a calm sea.
    pub const CALM_SEA_MAX_WAVE_M: f64 = 1.5;
    /// Wind speeds at or above this are treated as windy.
    pub const WINDY_MIN_SPEED: f64 = 12.0;

    /// Missing readings count as zero.
    #[must_use]
    pub fn sea_calm(&self) -> bool {
        self.wave_height.unwrap_or(0.0) <= Self::CALM_SEA_MAX_WAVE_M
    }

    #[must_use]
    pub fn windy(&self) -> bool {
        self.wind_speed.unwrap_or(0.0) >= Self::WINDY_MIN_SPEED
    }

    /// Coerces a marine payload. Readings may be numbers or numeric
    /// strings; anything else is treated as missing.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        let reading = |key: &str| value.get(key).and_then(coerce::number);
        Self {
            wave_height: reading("wave_height"),
            wind_speed: reading("wind_speed"),
        }
    }
}
