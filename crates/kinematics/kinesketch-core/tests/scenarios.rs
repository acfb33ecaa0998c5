use kinesketch_core::{ControlPointSequence, CurveKind, Session, SimulationConfig};
use kinesketch_test_fixtures::scenarios;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Scenario {
    #[allow(dead_code)]
    description: String,
    config: serde_json::Value,
    acceleration: ControlPointSequence,
    expect: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    acceleration: Vec<f64>,
    velocity: Vec<f64>,
    position: Vec<f64>,
}

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn load(name: &str) -> (Scenario, Session) {
    let scenario: Scenario = scenarios::load(name).expect("scenario fixture");
    let mut cfg: SimulationConfig =
        serde_json::from_value(scenario.config.clone()).expect("scenario config");
    cfg.default_acceleration = scenario.acceleration.clone();
    let session = Session::new(cfg).expect("scenario session");
    (scenario, session)
}

fn assert_values(name: &str, kind: CurveKind, got: &ControlPointSequence, want: &[f64]) {
    assert_eq!(got.len(), want.len(), "{name}: {kind} point count");
    for (p, w) in got.iter().zip(want) {
        approx(p.value, *w, 1e-9);
    }
}

#[test]
fn control_points_match_expectations() {
    for name in scenarios::keys() {
        let (scenario, session) = load(&name);
        let e = &scenario.expect;
        assert_values(&name, CurveKind::Acceleration, session.acceleration_points(), &e.acceleration);
        assert_values(&name, CurveKind::Velocity, session.velocity_points(), &e.velocity);
        assert_values(&name, CurveKind::Position, session.position_points(), &e.position);
        let times: Vec<f64> = session.acceleration_points().iter().map(|p| p.t).collect();
        assert!(times.windows(2).all(|w| w[1] > w[0]), "{name}: sorted");
    }
}

#[test]
fn default_scenario_shape() {
    let (_, session) = load("default");
    let series = session.series();
    assert_eq!(series.len(), 501);

    let v_end = *series.velocity.last().unwrap();
    assert!(v_end.abs() < 1e-6, "terminal velocity {v_end}");

    // Acceleration flips sign once, a little after the launch peak.
    let flip = series
        .acceleration
        .iter()
        .position(|&a| a < 0.0)
        .expect("braking phase");
    let t_flip = series.time[flip];
    assert!((2.1..=2.4).contains(&t_flip), "sign change at {t_flip}");
    assert!(series.acceleration[flip..].iter().take(70).all(|&a| a < 0.0));

    // Position climbs throughout; the Hermite braking segment overshoots
    // by about 0.1 m just before the end.
    let mut peak = f64::NEG_INFINITY;
    for (i, &x) in series.position.iter().enumerate() {
        if series.time[i] <= 4.5 {
            assert!(x >= peak, "position fell at t = {}", series.time[i]);
        } else {
            assert!(x >= peak - 0.15, "position dipped at t = {}", series.time[i]);
        }
        peak = peak.max(x);
    }
}

#[test]
fn ease_in_out_is_symmetric() {
    let (_, session) = load("ease-in-out");
    let series = session.series();
    let n = series.len();
    for i in 0..n {
        approx(series.velocity[i], series.velocity[n - 1 - i], 1e-6);
    }
}

#[test]
fn unlocked_launch_keeps_accelerating() {
    let (_, session) = load("unlocked-launch");
    assert!(!session.lock_end_velocity());
    let series = session.series();
    assert_eq!(series.len(), 201);
    approx(*series.velocity.last().unwrap(), 16.0, 1e-9);
    approx(*series.position.last().unwrap(), 32.0, 1e-9);
}
