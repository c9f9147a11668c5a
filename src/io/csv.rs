use std::io::{self, Write};

use crate::gnc::ControllerOutputs;

/// One logged tick: simulation time, engagement flag, and outputs.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryRow {
    pub time: f64,
    pub engaged: bool,
    pub outputs: ControllerOutputs,
}

/// Write autopilot telemetry in CSV format.
///
/// Columns: time, engaged, vessel_mass, vertical_speed, max_thrust,
///          current_thrust, max_accel, current_accel, gravity, target,
///          desired_accel, accel_error, compensated_accel, throttle
pub fn write_telemetry<W: Write>(writer: &mut W, rows: &[TelemetryRow]) -> io::Result<()> {
    writeln!(
        writer,
        "time,engaged,vessel_mass,vertical_speed,max_thrust,current_thrust,\
         max_accel,current_accel,gravity,target,\
         desired_accel,accel_error,compensated_accel,throttle"
    )?;

    for r in rows {
        let o = &r.outputs;
        writeln!(
            writer,
            "{:.4},{},{:.4},{:.4},{:.4},{:.4},\
             {:.4},{:.4},{:.4},{:.4},\
             {:.4},{:.4},{:.4},{:.6}",
            r.time,
            u8::from(r.engaged),
            o.vessel_mass, o.vertical_speed, o.max_thrust, o.current_thrust,
            o.max_acceleration, o.current_acceleration, o.gravity, o.effective_target,
            o.desired_acceleration, o.acceleration_error, o.compensated_acceleration,
            o.throttle,
        )?;
    }

    Ok(())
}

/// Write telemetry to a CSV file at the given path.
pub fn write_telemetry_file(path: &str, rows: &[TelemetryRow]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_telemetry(&mut file, rows)
}
