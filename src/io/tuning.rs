use thiserror::Error;

use crate::gnc::ControllerParameters;

// ---------------------------------------------------------------------------
// Live-tuning text fields
// ---------------------------------------------------------------------------

/// Parameters editable as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tunable {
    Target,
    LandingMultiplier,
    CompensationMultiplier,
    CompensationPower,
}

impl Tunable {
    pub const ALL: [Tunable; 4] = [
        Tunable::Target,
        Tunable::LandingMultiplier,
        Tunable::CompensationMultiplier,
        Tunable::CompensationPower,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tunable::Target => "target",
            Tunable::LandingMultiplier => "landingMul",
            Tunable::CompensationMultiplier => "compensationMultiplier",
            Tunable::CompensationPower => "compensationPower",
        }
    }

    pub fn get(self, params: &ControllerParameters) -> f64 {
        match self {
            Tunable::Target => params.target_vertical_speed,
            Tunable::LandingMultiplier => params.landing_multiplier,
            Tunable::CompensationMultiplier => params.compensation_multiplier,
            Tunable::CompensationPower => params.compensation_power,
        }
    }

    fn slot(self, params: &mut ControllerParameters) -> &mut f64 {
        match self {
            Tunable::Target => &mut params.target_vertical_speed,
            Tunable::LandingMultiplier => &mut params.landing_multiplier,
            Tunable::CompensationMultiplier => &mut params.compensation_multiplier,
            Tunable::CompensationPower => &mut params.compensation_power,
        }
    }

    fn requires_positive(self) -> bool {
        matches!(self, Tunable::CompensationMultiplier | Tunable::CompensationPower)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuneError {
    #[error("{field}: '{text}' is not a number")]
    Parse { field: &'static str, text: String },
    #[error("{field}: value must be finite")]
    NotFinite { field: &'static str },
    #[error("{field}: value must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Parse `text` into `tunable`. On error the parameter keeps its value.
pub fn apply_text(
    params: &mut ControllerParameters,
    tunable: Tunable,
    text: &str,
) -> Result<f64, TuneError> {
    let field = tunable.label();
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| TuneError::Parse { field, text: text.to_owned() })?;
    if !value.is_finite() {
        return Err(TuneError::NotFinite { field });
    }
    if tunable.requires_positive() && value <= 0.0 {
        return Err(TuneError::NonPositive { field, value });
    }
    *tunable.slot(params) = value;
    Ok(value)
}

/// Text shown in an edit field: three decimals.
pub fn format_value(value: f64) -> String {
    format!("{value:.3}")
}
