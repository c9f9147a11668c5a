// ---------------------------------------------------------------------------
// Point-mass gravity about the reference body
// ---------------------------------------------------------------------------

/// Local gravitational acceleration magnitude, m/s^2.
///
/// `altitude` is measured from the body's mean surface, so the distance from
/// the body centre is `altitude + body_radius`. Returns `None` when that
/// distance is not positive or the result is not finite.
pub fn local_gravity(grav_parameter: f64, body_radius: f64, altitude: f64) -> Option<f64> {
    let r = altitude + body_radius;
    if !(r > 0.0) {
        return None;
    }
    let g = grav_parameter / (r * r);
    g.is_finite().then_some(g)
}

/// Gravity at the mean surface (altitude zero).
pub fn surface_gravity(grav_parameter: f64, body_radius: f64) -> Option<f64> {
    local_gravity(grav_parameter, body_radius, 0.0)
}

// Reference bodies used by presets and tests
pub const KERBIN_MU: f64 = 3.531_6e12; // m^3/s^2
pub const KERBIN_RADIUS: f64 = 600_000.0; // m
pub const MUN_MU: f64 = 6.514_713_8e10;
pub const MUN_RADIUS: f64 = 200_000.0;
