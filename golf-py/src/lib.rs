//! Python bindings for the golf-core shot simulators.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from golf_physics import simulate_putt, recommend_aim, simulate_flight
//!
//! rec = recommend_aim(distance_ft=12.0, slope=1.5, green_speed=9.0)
//! putt = simulate_putt(distance_ft=12.0, slope=1.5, green_speed=9.0,
//!                      aim_angle=rec.aim_angle, power=rec.power)
//! print(putt.holed, putt.hole_accuracy)
//!
//! shot = simulate_flight("7iron", power=90.0, face_angle=2.0)
//! print(f"Carry {shot.carry:.1f} yd, apex {shot.apex:.1f} ft")
//! ```

use pyo3::exceptions::PyKeyError;
use pyo3::prelude::*;

use golf_core::clubs::{ClubSpec, ClubTable};
use golf_core::constants::units;
use golf_core::flight::FlightSimulator;
use golf_core::putting::RollSimulator;
use golf_core::types::{
    AimRecommendation as CoreAimRecommendation, FlightResult as CoreFlightResult,
    PuttParameters, PuttResult as CorePuttResult, SwingParameters, Vec3 as CoreVec3,
};

/// 3D vector for positions and trajectory samples.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        CoreVec3::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

/// Outcome of a putt. Positions are in meters.
#[pyclass]
pub struct PuttResult {
    #[pyo3(get)]
    holed: bool,
    #[pyo3(get)]
    final_position: Vec3,
    #[pyo3(get)]
    trajectory: Vec<Vec3>,
    #[pyo3(get)]
    roll_distance_ft: f64,
    #[pyo3(get)]
    time_to_stop: f64,
    #[pyo3(get)]
    max_height: f64,
    #[pyo3(get)]
    hole_accuracy: f64,
}

#[pymethods]
impl PuttResult {
    fn __repr__(&self) -> String {
        format!(
            "PuttResult(holed={}, accuracy={:.1}, rolled={:.2} ft)",
            self.holed, self.hole_accuracy, self.roll_distance_ft
        )
    }
}

impl From<CorePuttResult> for PuttResult {
    fn from(r: CorePuttResult) -> Self {
        Self {
            holed: r.holed,
            final_position: r.final_position.into(),
            trajectory: r.trajectory.into_iter().map(Vec3::from).collect(),
            roll_distance_ft: r.roll_distance_ft,
            time_to_stop: r.time_to_stop,
            max_height: r.max_height,
            hole_accuracy: r.hole_accuracy,
        }
    }
}

/// Suggested aim and power for a putt.
#[pyclass]
#[derive(Clone, Copy)]
pub struct AimRecommendation {
    #[pyo3(get)]
    aim_angle: f64,
    #[pyo3(get)]
    power: f64,
    #[pyo3(get)]
    confidence: f64,
}

#[pymethods]
impl AimRecommendation {
    fn __repr__(&self) -> String {
        format!(
            "AimRecommendation(aim={:.2}°, power={:.1}, confidence={:.0})",
            self.aim_angle, self.power, self.confidence
        )
    }
}

impl From<CoreAimRecommendation> for AimRecommendation {
    fn from(r: CoreAimRecommendation) -> Self {
        Self {
            aim_angle: r.aim_angle,
            power: r.power,
            confidence: r.confidence,
        }
    }
}

/// Outcome of a full swing. Trajectory x/z are yards, y is feet.
#[pyclass]
pub struct FlightResult {
    #[pyo3(get)]
    trajectory: Vec<Vec3>,
    #[pyo3(get)]
    carry: f64,
    #[pyo3(get)]
    total_distance: f64,
    #[pyo3(get)]
    roll_out: f64,
    #[pyo3(get)]
    apex: f64,
    #[pyo3(get)]
    flight_time: f64,
    #[pyo3(get)]
    ball_speed: f64,
    #[pyo3(get)]
    launch_angle: f64,
    #[pyo3(get)]
    backspin: f64,
    #[pyo3(get)]
    spin_axis: f64,
    #[pyo3(get)]
    landing_angle: f64,
    #[pyo3(get)]
    on_target: bool,
    #[pyo3(get)]
    distance_control: f64,
}

#[pymethods]
impl FlightResult {
    fn __repr__(&self) -> String {
        format!(
            "FlightResult(carry={:.1} yd, total={:.1} yd, apex={:.1} ft)",
            self.carry, self.total_distance, self.apex
        )
    }
}

impl From<CoreFlightResult> for FlightResult {
    fn from(r: CoreFlightResult) -> Self {
        Self {
            trajectory: r.trajectory.into_iter().map(Vec3::from).collect(),
            carry: r.carry,
            total_distance: r.total_distance,
            roll_out: r.roll_out,
            apex: r.apex,
            flight_time: r.flight_time,
            ball_speed: r.ball_speed,
            launch_angle: r.launch_angle,
            backspin: r.backspin,
            spin_axis: r.spin_axis,
            landing_angle: r.landing_angle,
            on_target: r.on_target,
            distance_control: r.distance_control,
        }
    }
}

/// One club from the standard bag.
#[pyclass]
pub struct Club {
    #[pyo3(get)]
    id: String,
    #[pyo3(get)]
    name: String,
    #[pyo3(get)]
    color: String,
    #[pyo3(get)]
    loft: f64,
    #[pyo3(get)]
    typical_distance: f64,
    #[pyo3(get)]
    max_club_speed: f64,
    #[pyo3(get)]
    smash_factor: f64,
    #[pyo3(get)]
    default_spin_rate: f64,
    #[pyo3(get)]
    optimal_attack_angle: f64,
    #[pyo3(get)]
    base_roll: f64,
}

#[pymethods]
impl Club {
    fn __repr__(&self) -> String {
        format!("Club({}, loft={}°)", self.id, self.loft)
    }
}

impl From<&ClubSpec> for Club {
    fn from(c: &ClubSpec) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            color: c.color.clone(),
            loft: c.loft,
            typical_distance: c.typical_distance,
            max_club_speed: c.max_club_speed,
            smash_factor: c.smash_factor,
            default_spin_rate: c.default_spin_rate,
            optimal_attack_angle: c.optimal_attack_angle,
            base_roll: c.base_roll,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn putt_parameters(
    distance_ft: f64,
    power: f64,
    aim_angle: f64,
    slope: f64,
    green_speed: f64,
    ball_position: Option<Vec3>,
    hole_position: Option<Vec3>,
    wind_speed: f64,
    wind_direction: f64,
    grain_angle: f64,
) -> PuttParameters {
    let ball_position = ball_position.map_or(CoreVec3::ZERO, CoreVec3::from);
    // Without an explicit hole, put it straight down the line at the nominal distance
    let hole_position = hole_position.map_or_else(
        || ball_position + CoreVec3::new(0.0, 0.0, -distance_ft * units::FEET_TO_METERS),
        CoreVec3::from,
    );

    PuttParameters {
        distance_ft,
        power,
        aim_angle,
        slope,
        green_speed,
        ball_position,
        hole_position,
        wind_speed,
        wind_direction,
        grain_angle,
    }
}

/// Simulate a putt.
///
/// Angles are degrees (positive = right), slope is percent grade (positive
/// = uphill), green speed is a stimpmeter reading.
#[pyfunction]
#[pyo3(signature = (
    distance_ft = 10.0,
    power = 100.0,
    aim_angle = 0.0,
    slope = 0.0,
    green_speed = 10.0,
    ball_position = None,
    hole_position = None,
    wind_speed = 0.0,
    wind_direction = 0.0,
    grain_angle = 0.0,
))]
#[allow(clippy::too_many_arguments)]
fn simulate_putt(
    distance_ft: f64,
    power: f64,
    aim_angle: f64,
    slope: f64,
    green_speed: f64,
    ball_position: Option<Vec3>,
    hole_position: Option<Vec3>,
    wind_speed: f64,
    wind_direction: f64,
    grain_angle: f64,
) -> PuttResult {
    let params = putt_parameters(
        distance_ft,
        power,
        aim_angle,
        slope,
        green_speed,
        ball_position,
        hole_position,
        wind_speed,
        wind_direction,
        grain_angle,
    );
    RollSimulator::default().simulate(&params).into()
}

/// Suggest aim and power for a putt without simulating it.
#[pyfunction]
#[pyo3(signature = (
    distance_ft = 10.0,
    slope = 0.0,
    green_speed = 10.0,
    ball_position = None,
    hole_position = None,
    wind_speed = 0.0,
    wind_direction = 0.0,
    grain_angle = 0.0,
))]
#[allow(clippy::too_many_arguments)]
fn recommend_aim(
    distance_ft: f64,
    slope: f64,
    green_speed: f64,
    ball_position: Option<Vec3>,
    hole_position: Option<Vec3>,
    wind_speed: f64,
    wind_direction: f64,
    grain_angle: f64,
) -> AimRecommendation {
    let params = putt_parameters(
        distance_ft,
        100.0,
        0.0,
        slope,
        green_speed,
        ball_position,
        hole_position,
        wind_speed,
        wind_direction,
        grain_angle,
    );
    RollSimulator::default().recommend_aim(&params).into()
}

/// Fly a full swing with a club from the standard bag.
///
/// Raises `KeyError` for an unknown club id.
#[pyfunction]
#[pyo3(signature = (
    club = "driver".to_string(),
    power = 100.0,
    attack_angle = 0.0,
    face_angle = 0.0,
    club_path = 0.0,
    strike_quality = 1.0,
))]
fn simulate_flight(
    club: String,
    power: f64,
    attack_angle: f64,
    face_angle: f64,
    club_path: f64,
    strike_quality: f64,
) -> PyResult<FlightResult> {
    let swing = SwingParameters {
        club,
        power,
        attack_angle,
        face_angle,
        club_path,
        strike_quality,
    };
    FlightSimulator::default()
        .simulate_club(&swing, &ClubTable::standard())
        .map(FlightResult::from)
        .map_err(|e| PyKeyError::new_err(e.to_string()))
}

/// Club ids of the standard bag, longest first.
#[pyfunction]
fn club_ids() -> Vec<String> {
    ClubTable::standard()
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Specification of one club. Raises `KeyError` for an unknown id.
#[pyfunction]
fn club_spec(id: &str) -> PyResult<Club> {
    ClubTable::standard()
        .get(id)
        .map(Club::from)
        .map_err(|e| PyKeyError::new_err(e.to_string()))
}

/// Python module definition.
#[pymodule]
fn golf_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<PuttResult>()?;
    m.add_class::<AimRecommendation>()?;
    m.add_class::<FlightResult>()?;
    m.add_class::<Club>()?;
    m.add_function(wrap_pyfunction!(simulate_putt, m)?)?;
    m.add_function(wrap_pyfunction!(recommend_aim, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_flight, m)?)?;
    m.add_function(wrap_pyfunction!(club_ids, m)?)?;
    m.add_function(wrap_pyfunction!(club_spec, m)?)?;
    Ok(())
}
