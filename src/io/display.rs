use std::fmt::Write as _;

use crate::gnc::{ControllerOutputs, ControllerParameters};
use super::tuning::format_value;

/// One line of the autopilot readout.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub label: &'static str,
    pub value: String,
}

fn row(label: &'static str, value: f64, unit: &str) -> DisplayRow {
    DisplayRow { label, value: format!("{value:.3} {unit}") }
}

/// Readout rows, top to bottom.
pub fn display_rows(params: &ControllerParameters, out: &ControllerOutputs) -> Vec<DisplayRow> {
    vec![
        row("actual", out.effective_target, "m/s"),
        DisplayRow { label: "landingMul", value: format_value(params.landing_multiplier) },
        DisplayRow { label: "compensationMultiplier", value: format_value(params.compensation_multiplier) },
        DisplayRow { label: "compensationPower", value: format_value(params.compensation_power) },
        row("verticalSpeed", out.vertical_speed, "m/s"),
        row("vesselMass", out.vessel_mass, "t"),
        row("maxThrust", out.max_thrust, "kN"),
        row("currentThrust", out.current_thrust, "kN"),
        row("maxAcceleration", out.max_acceleration, "m/s/s"),
        row("currentAcceleration", out.current_acceleration, "m/s/s"),
        row("gravity", out.gravity, "m/s/s"),
        row("desiredAcceleration", out.desired_acceleration, "m/s/s"),
        row("error", out.acceleration_error, "m/s/s"),
        row("compensatedAcceleration", out.compensated_acceleration, "m/s/s"),
        DisplayRow { label: "throttle", value: format!("{:.3}%", out.throttle * 100.0) },
        DisplayRow { label: "Engaged", value: if params.engaged { "Yes" } else { "No" }.into() },
        DisplayRow { label: "Target", value: format!("{:.2} m/s", params.target_vertical_speed) },
    ]
}

/// Caption of a speed button: explicit sign on climbs, one decimal.
pub fn preset_label(speed: f64) -> String {
    if speed > 0.0 {
        format!("+{speed:.1}")
    } else {
        format!("{speed:.1}")
    }
}

/// Rows as an aligned two-column table.
pub fn render_table(rows: &[DisplayRow]) -> String {
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    let mut s = String::new();
    for r in rows {
        let _ = writeln!(s, "  {:<width$}  {:>20}", r.label, r.value);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnc::SPEED_PRESETS;

    #[test]
    fn preset_captions() {
        let labels: Vec<String> = SPEED_PRESETS.iter().map(|&s| preset_label(s)).collect();
        assert_eq!(labels, ["+30.0", "+2.5", "0.0", "-2.5", "-30.0"]);
    }

    #[test]
    fn readout_formats_units() {
        let params = ControllerParameters { engaged: true, target_vertical_speed: -2.5, ..Default::default() };
        let out = ControllerOutputs { throttle: 0.5, gravity: 9.81, max_thrust: 60.0, ..Default::default() };
        let rows = display_rows(&params, &out);
        let find = |label: &str| rows.iter().find(|r| r.label == label).map(|r| r.value.clone());
        assert_eq!(find("throttle").as_deref(), Some("50.000%"));
        assert_eq!(find("gravity").as_deref(), Some("9.810 m/s/s"));
        assert_eq!(find("maxThrust").as_deref(), Some("60.000 kN"));
        assert_eq!(find("Engaged").as_deref(), Some("Yes"));
        assert_eq!(find("Target").as_deref(), Some("-2.50 m/s"));
        assert_eq!(find("landingMul").as_deref(), Some("0.100"));
    }

    #[test]
    fn table_has_one_line_per_row() {
        let rows = display_rows(&ControllerParameters::default(), &ControllerOutputs::default());
        let table = render_table(&rows);
        assert_eq!(table.lines().count(), rows.len());
        assert!(table.contains("Engaged"));
    }
}
