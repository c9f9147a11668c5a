use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Throttle law: nonlinear correction on acceleration error
// ---------------------------------------------------------------------------

/// How the compensation power is applied to the scaled acceleration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationLaw {
    /// `x.powf(power)`. Even powers lose the sign of the error, and a
    /// negative error with a fractional power is NaN (throttle falls to 0).
    #[default]
    Literal,
    /// `sign(x) * |x|^power`.
    SignPreserving,
}

impl CompensationLaw {
    pub fn apply(self, x: f64, power: f64) -> f64 {
        match self {
            CompensationLaw::Literal => x.powf(power),
            CompensationLaw::SignPreserving => x.signum() * x.abs().powf(power),
        }
    }
}

/// Gains of the throttle law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleGains {
    pub multiplier: f64,
    pub power: f64,
    pub law: CompensationLaw,
}

/// Intermediate terms of one evaluation, kept for display.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrottleSolution {
    pub desired_acceleration: f64,
    pub acceleration_error: f64,
    pub compensated_acceleration: f64,
    pub throttle: f64,
}

/// One evaluation of the vertical-speed throttle law.
///
/// `desired = gravity - (vertical_speed - target)` treats the speed error as
/// an acceleration demand with unit gain.
pub fn solve_throttle(
    gravity: f64,
    vertical_speed: f64,
    target: f64,
    current_acceleration: f64,
    max_acceleration: f64,
    gains: &ThrottleGains,
) -> ThrottleSolution {
    let speed_error = vertical_speed - target;
    let desired_acceleration = gravity - speed_error;
    let acceleration_error = current_acceleration - desired_acceleration;
    let compensated_acceleration =
        desired_acceleration - gains.law.apply(acceleration_error * gains.multiplier, gains.power);

    ThrottleSolution {
        desired_acceleration,
        acceleration_error,
        compensated_acceleration,
        throttle: throttle_fraction(compensated_acceleration, max_acceleration),
    }
}

/// `clamp(accel / max_accel, 0, 1)`; zero when there is no upward authority
/// or the ratio is NaN. Infinite ratios saturate.
pub fn throttle_fraction(acceleration: f64, max_acceleration: f64) -> f64 {
    if !(max_acceleration > 0.0) {
        return 0.0;
    }
    let ratio = acceleration / max_acceleration;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_GAINS: ThrottleGains = ThrottleGains {
        multiplier: 10.0,
        power: 3.0,
        law: CompensationLaw::Literal,
    };

    #[test]
    fn overthrusting_vehicle_cuts_throttle() {
        // 1000 kN engine at half throttle on a 10 t vehicle, holding zero.
        let s = solve_throttle(9.81, 0.0, 0.0, 50.0, 100.0, &DEFAULT_GAINS);
        assert!((s.desired_acceleration - 9.81).abs() < 1e-12);
        assert!((s.acceleration_error - 40.19).abs() < 1e-9);
        let expected = 9.81 - (40.19_f64 * 10.0).powi(3);
        assert!((s.compensated_acceleration - expected).abs() < 1e-3);
        assert_eq!(s.throttle, 0.0);
    }

    #[test]
    fn underthrusting_vehicle_saturates() {
        let s = solve_throttle(9.81, -5.0, 0.0, 0.0, 20.0, &DEFAULT_GAINS);
        assert!(s.compensated_acceleration > 20.0);
        assert_eq!(s.throttle, 1.0);
    }

    #[test]
    fn balanced_hover_holds_gravity_share() {
        let s = solve_throttle(9.81, 0.0, 0.0, 9.81, 19.62, &DEFAULT_GAINS);
        assert!(s.acceleration_error.abs() < 1e-12);
        assert!((s.throttle - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_or_negative_authority_gives_zero_throttle() {
        assert_eq!(throttle_fraction(5.0, 0.0), 0.0);
        assert_eq!(throttle_fraction(-5.0, 0.0), 0.0);
        assert_eq!(throttle_fraction(5.0, -3.0), 0.0);
        assert_eq!(throttle_fraction(f64::NAN, 10.0), 0.0);
        assert_eq!(throttle_fraction(f64::INFINITY, 10.0), 1.0);
    }

    #[test]
    fn literal_even_power_loses_sign() {
        let a = CompensationLaw::Literal.apply(-2.0, 2.0);
        let b = CompensationLaw::Literal.apply(2.0, 2.0);
        assert_eq!(a, b);
        assert!(CompensationLaw::Literal.apply(-2.0, 2.5).is_nan());
    }

    #[test]
    fn sign_preserving_keeps_sign() {
        assert_eq!(CompensationLaw::SignPreserving.apply(-2.0, 2.0), -4.0);
        assert_eq!(CompensationLaw::SignPreserving.apply(2.0, 2.0), 4.0);
        assert!((CompensationLaw::SignPreserving.apply(-4.0, 0.5) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn throttle_always_in_unit_range() {
        for law in [CompensationLaw::Literal, CompensationLaw::SignPreserving] {
            let gains = ThrottleGains { law, power: 2.5, ..DEFAULT_GAINS };
            for vs in [-100.0, -3.0, 0.0, 4.0, 80.0] {
                for cur in [-20.0, 0.0, 9.0, 40.0] {
                    for max in [-10.0, 0.0, 1.0, 30.0] {
                        let t = solve_throttle(9.81, vs, 0.0, cur, max, &gains).throttle;
                        assert!((0.0..=1.0).contains(&t), "throttle {t} out of range");
                    }
                }
            }
        }
    }
}
