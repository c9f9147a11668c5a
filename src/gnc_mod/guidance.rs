// ---------------------------------------------------------------------------
// Guidance: target vertical speed for this tick
// ---------------------------------------------------------------------------

/// Effective target vertical speed (m/s).
///
/// - Manual hold: the setpoint itself.
/// - Autoland: descend at `landing_multiplier` m/s per metre of radar
///   altitude, offset by the setpoint. The setpoint then acts as the
///   touchdown speed as radar altitude goes to zero.
pub fn resolve_target(
    target_vertical_speed: f64,
    auto_land: bool,
    landing_multiplier: f64,
    radar_altitude: f64,
) -> f64 {
    if auto_land {
        -radar_altitude * landing_multiplier + target_vertical_speed
    } else {
        target_vertical_speed
    }
}
