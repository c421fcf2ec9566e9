//! Physical constants and unit conversions shared by both simulators.
//!
//! The simulators never read globals: each one owns a [`PhysicalConstants`]
//! value, so tests and alternate venues can swap in their own set.

use serde::{Deserialize, Serialize};

/// Unit conversion factors.
pub mod units {
    pub const FEET_TO_METERS: f64 = 0.3048;
    pub const METERS_TO_FEET: f64 = 1.0 / FEET_TO_METERS;
    pub const METERS_TO_YARDS: f64 = 1.0 / 0.9144;
    pub const YARDS_TO_FEET: f64 = 3.0;
    pub const MPH_TO_MPS: f64 = 0.44704;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

/// Sea-level standard temperature (K)
const STANDARD_TEMPERATURE_K: f64 = 288.15;

/// Density scale height of the lower atmosphere (m)
const DENSITY_SCALE_HEIGHT_M: f64 = 8434.5;

/// Air temperatures accepted by the density correction (°C), roughly the
/// recorded extremes at the Earth's surface
const MIN_AIR_TEMPERATURE_C: f64 = -90.0;
const MAX_AIR_TEMPERATURE_C: f64 = 60.0;

/// Fixed physical parameters for a simulation run.
///
/// Every field can be overridden from YAML; missing fields fall back to
/// the sea-level defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Air density (kg/m³), 15°C at sea level
    pub air_density: f64,

    // Ball
    /// kg, regulation maximum 45.93 g
    pub ball_mass: f64,
    /// m, regulation minimum diameter 42.67 mm
    pub ball_radius: f64,

    // Aerodynamics
    pub drag_coefficient: f64,
    /// Lift per 500 rpm of backspin
    pub lift_coefficient: f64,
    /// Side force per 500 rpm of tilted spin
    pub magnus_coefficient: f64,
    /// Saturation of the spin-dependent coefficients
    pub max_lift_coefficient: f64,
    /// Fraction of spin lost per second of flight
    pub spin_decay_rate: f64,

    // Flight integration
    /// s
    pub flight_time_step: f64,
    /// s
    pub max_flight_time: f64,

    // Green
    /// Friction used to size the stroke from the target distance
    pub green_friction: f64,
    /// Rolling resistance applied each step, before green-speed scaling
    pub rolling_friction: f64,
    /// Horizontal speed below which the ball is at rest (m/s)
    pub stop_speed: f64,
    /// Fraction of downward speed returned on ground contact
    pub bounce_damping: f64,
    /// Vertical launch off the putter face, as a fraction of ball speed
    pub hop_factor: f64,
    /// Share of the along-slope gravity component felt by the rolling ball
    pub slope_bias: f64,
    /// m, regulation cup is 108 mm across
    pub hole_radius: f64,
    /// Putt ends once the ball is this many target distances from its start
    pub runaway_factor: f64,

    // Putt integration
    /// s
    pub putt_time_step: f64,
    pub max_putt_steps: usize,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            air_density: 1.225,
            ball_mass: 0.04593,
            ball_radius: 0.02135,
            drag_coefficient: 0.25,
            lift_coefficient: 0.03,
            magnus_coefficient: 0.03,
            max_lift_coefficient: 0.2,
            spin_decay_rate: 0.05,
            flight_time_step: 0.01,
            max_flight_time: 12.0,
            green_friction: 0.056,
            rolling_friction: 0.0656,
            stop_speed: 0.01,
            bounce_damping: 0.3,
            hop_factor: 0.1,
            slope_bias: 0.5,
            hole_radius: 0.054,
            runaway_factor: 3.0,
            putt_time_step: 1.0 / 60.0,
            max_putt_steps: 300,
        }
    }
}

impl PhysicalConstants {
    /// Cross-sectional area of the ball (m²)
    pub fn ball_area(&self) -> f64 {
        std::f64::consts::PI * self.ball_radius * self.ball_radius
    }

    /// `0.5 * ρ * A / m`: multiply by a coefficient and a speed² to get an
    /// aerodynamic acceleration.
    pub fn aero_factor(&self) -> f64 {
        0.5 * self.air_density * self.ball_area() / self.ball_mass
    }

    /// Spin remaining after `elapsed` seconds of flight.
    ///
    /// `spin(t) = spin₀ · (1 - decay)^t`
    pub fn spin_decay(&self, initial_rpm: f64, elapsed: f64) -> f64 {
        initial_rpm * (1.0 - self.spin_decay_rate).powf(elapsed)
    }

    /// Air density for a given temperature (°C) and altitude (m).
    ///
    /// Ideal-gas temperature correction on top of an exponential
    /// atmosphere, anchored at this set's sea-level density. Temperature is
    /// clamped to -90..60 °C, so the result stays finite and positive.
    pub fn adjust_air_density(&self, temperature_c: f64, altitude_m: f64) -> f64 {
        let temperature_k =
            temperature_c.clamp(MIN_AIR_TEMPERATURE_C, MAX_AIR_TEMPERATURE_C) + 273.15;
        self.air_density * (STANDARD_TEMPERATURE_K / temperature_k)
            * (-altitude_m / DENSITY_SCALE_HEIGHT_M).exp()
    }

    /// Same constants with air density recomputed for the given conditions.
    pub fn at_conditions(&self, temperature_c: f64, altitude_m: f64) -> Self {
        Self {
            air_density: self.adjust_air_density(temperature_c, altitude_m),
            ..self.clone()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
