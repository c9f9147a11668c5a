use std::error::Error;

use thrust_master::config::{AutopilotConfig, Button, Press, Scenario, ScenarioTick};
use thrust_master::gnc::{FlightCtrlState, VerticalSpeedAutopilot, SPEED_PRESETS};
use thrust_master::io::csv::{write_telemetry_file, TelemetryRow};
use thrust_master::io::{display_rows, preset_label, render_table};
use thrust_master::sim::{FlyByWireBus, Frame, Session};
use thrust_master::vehicle::{as_sources, presets};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Stand-in for the host's callback registry: tracks the subscribed vessel.
#[derive(Default)]
struct HostBus {
    subscribed: Option<String>,
}

impl FlyByWireBus<String> for HostBus {
    fn attach(&mut self, vessel: &String) {
        self.subscribed = Some(vessel.clone());
    }

    fn detach(&mut self, vessel: &String) {
        if self.subscribed.as_ref() == Some(vessel) {
            self.subscribed = None;
        }
    }
}

struct Args {
    scenario: Option<String>,
    config: Option<String>,
    csv: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args { scenario: None, config: None, csv: None };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().ok_or("--config needs a path")?),
            "--csv" => args.csv = Some(it.next().ok_or("--csv needs a path")?),
            _ if args.scenario.is_none() && !arg.starts_with("--") => args.scenario = Some(arg),
            _ => return Err(format!("unexpected argument '{arg}'")),
        }
    }
    Ok(args)
}

/// Twenty ticks of the Hopper descending on the Mun with autoland engaged.
fn builtin_scenario() -> Scenario {
    let mut ticks = Vec::new();
    let mut vehicle = presets::hopper_on_mun();
    for i in 0..20 {
        ticks.push(ScenarioTick {
            vessel: Some("Hopper".into()),
            vehicle: vehicle.clone(),
            engines: presets::hopper_engines(0.0),
            press: (i == 0).then_some(Press::Button(Button::Auto)),
        });
        vehicle.altitude += vehicle.vertical_speed * 0.02;
    }
    Scenario { ticks }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => AutopilotConfig::load(path)?,
        None => AutopilotConfig::default(),
    };
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => builtin_scenario(),
    };

    let mut session: Session<String> =
        Session::new(VerticalSpeedAutopilot::new(config.parameters.clone()));
    let mut bus = HostBus::default();
    let mut fcs = FlightCtrlState::default();
    let mut telemetry = Vec::with_capacity(scenario.ticks.len());

    for (i, tick) in scenario.ticks.iter().enumerate() {
        if let Some(press) = tick.press {
            let ap = session.controller_mut();
            match press {
                Press::Speed(v) => ap.select_speed(v),
                Press::Button(Button::Auto) => ap.toggle_auto(),
                Press::Button(Button::Off) => ap.disengage(),
            }
        }

        let sources = as_sources(&tick.engines);
        let frame = tick.vessel.clone().map(|vessel| Frame {
            vessel,
            vehicle: &tick.vehicle,
            engines: &sources,
        });
        if let Err(reason) = session.fixed_update(&mut bus, true, frame) {
            tracing::debug!(tick = i, %reason, "holding previous outputs");
        }
        // The host fires the callback every frame for the subscribed vessel,
        // so a skipped tick re-applies the last committed throttle.
        if let Some(vessel) = &bus.subscribed {
            session.fly_by_wire(vessel, &mut fcs);
        }

        let ap = session.controller();
        telemetry.push(TelemetryRow {
            time: i as f64 * config.tick_seconds(),
            engaged: ap.params.engaged,
            outputs: *ap.outputs(),
        });
    }

    let ap = session.controller();
    println!();
    println!("====================================================================");
    println!("  VERTICAL SPEED AUTOPILOT — {} ticks", scenario.ticks.len());
    println!("====================================================================");
    println!();
    let buttons: Vec<String> = SPEED_PRESETS.iter().map(|&s| preset_label(s)).collect();
    println!("  Presets: {}  |  Mode: {:?}", buttons.join("  "), ap.mode());
    println!("  ──────────────────────────────────────────────────────────────────");
    print!("{}", render_table(&display_rows(&ap.params, ap.outputs())));
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Main throttle (flight controls): {:.1}%", fcs.main_throttle * 100.0);
    println!();

    if let Some(path) = &args.csv {
        write_telemetry_file(path, &telemetry)?;
        tracing::info!(%path, rows = telemetry.len(), "telemetry written");
    }

    session.shutdown(&mut bus);
    Ok(())
}
