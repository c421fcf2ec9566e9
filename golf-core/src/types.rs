//! Core types for the shot simulators.
//!
//! Internal state is SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Spin: revolutions per minute (rpm)
//!
//! Parameter and result records use golf units (feet, yards, mph, degrees)
//! and say so on each field.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions and velocities.
///
/// Coordinate system (right-handed):
/// - X: lateral, positive to the right of the target line
/// - Y: vertical (positive upward)
/// - Z: depth, shots travel toward negative Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Length of the ground-plane (x, z) part of the vector
    pub fn horizontal_magnitude(&self) -> f64 {
        self.x.hypot(self.z)
    }

    /// The vector with its vertical component removed
    pub fn horizontal(&self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*other - *self).magnitude()
    }

    /// Distance measured on the ground plane, ignoring height
    pub fn horizontal_distance_to(&self, other: &Self) -> f64 {
        (*other - *self).horizontal_magnitude()
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Ball State
// =============================================================================

/// State of the ball at a given instant.
///
/// Spin is a scalar backspin rate. Its tilt (for curve) is a property of
/// the shot, not of the state, and lives in the force model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
    pub spin_rpm: f64,
}

impl BallState {
    pub fn new(pos: Vec3, vel: Vec3, spin_rpm: f64) -> Self {
        Self { pos, vel, spin_rpm }
    }

    /// Ball at rest at a given position
    pub fn at_rest(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            spin_rpm: 0.0,
        }
    }
}

impl Default for BallState {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO)
    }
}

// =============================================================================
// Putting
// =============================================================================

/// Inputs for a single putt.
///
/// Power and slope are not clamped here; range checks belong to whoever
/// collects the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuttParameters {
    /// Nominal distance to the hole (ft)
    pub distance_ft: f64,
    /// Stroke strength, 0-100 (% of a full-distance stroke)
    pub power: f64,
    /// Aim relative to straight (degrees, positive = right)
    pub aim_angle: f64,
    /// Grade along the target line (%, positive = uphill)
    pub slope: f64,
    /// Stimpmeter rating, 6-14
    pub green_speed: f64,
    /// Ball start position (m)
    pub ball_position: Vec3,
    /// Hole position (m)
    pub hole_position: Vec3,
    /// Wind speed (mph); only the aim estimator reads it
    pub wind_speed: f64,
    /// Wind direction (degrees); carried for callers, unused by the roll model
    pub wind_direction: f64,
    /// Grain direction (degrees); carried for callers, unused by the roll model
    pub grain_angle: f64,
}

impl Default for PuttParameters {
    /// Flat ten-footer on a medium-fast green.
    fn default() -> Self {
        Self {
            distance_ft: 10.0,
            power: 100.0,
            aim_angle: 0.0,
            slope: 0.0,
            green_speed: 10.0,
            ball_position: Vec3::ZERO,
            hole_position: Vec3::new(0.0, 0.0, -3.048),
            wind_speed: 0.0,
            wind_direction: 0.0,
            grain_angle: 0.0,
        }
    }
}

/// Outcome of a simulated putt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuttResult {
    /// Ball finished within the hole radius
    pub holed: bool,
    pub final_position: Vec3,
    /// One position per simulated step (m)
    pub trajectory: Vec<Vec3>,
    /// Path length actually rolled (ft)
    pub roll_distance_ft: f64,
    /// Seconds until the ball stopped or the simulation ended
    pub time_to_stop: f64,
    /// Highest point of the ball center (m)
    pub max_height: f64,
    /// 0-100, proximity to the hole relative to its radius
    pub hole_accuracy: f64,
}

/// Closed-form suggestion for a putt, independent of the roll simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimRecommendation {
    /// Degrees, positive = right
    pub aim_angle: f64,
    /// 0-100
    pub power: f64,
    /// 0-100
    pub confidence: f64,
}

// =============================================================================
// Full swing
// =============================================================================

/// Inputs for a full swing with a given club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingParameters {
    /// Key into the club table
    pub club: String,
    /// 50-100, % of the club's maximum head speed
    pub power: f64,
    /// Vertical clubhead path at impact, -5..5 degrees
    pub attack_angle: f64,
    /// Face relative to target, -10..10 degrees
    pub face_angle: f64,
    /// Horizontal swing direction relative to target, -10..10 degrees
    pub club_path: f64,
    /// Contact quality multiplier, 0.7-1.0
    pub strike_quality: f64,
}

impl Default for SwingParameters {
    fn default() -> Self {
        Self {
            club: "driver".to_string(),
            power: 100.0,
            attack_angle: 0.0,
            face_angle: 0.0,
            club_path: 0.0,
            strike_quality: 1.0,
        }
    }
}

/// Ball launch derived from club and swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    /// mph
    pub club_head_speed: f64,
    /// mph
    pub ball_speed: f64,
    /// degrees
    pub dynamic_loft: f64,
    /// degrees above horizontal
    pub launch_angle: f64,
    /// rpm
    pub spin_rate: f64,
    /// degrees, positive curves right
    pub spin_axis: f64,
    /// degrees, positive = right of target
    pub start_direction: f64,
}

/// Outcome of a simulated full swing.
///
/// Trajectory points are in display units: x and z in yards, y in feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    pub trajectory: Vec<Vec3>,
    /// yards
    pub carry: f64,
    /// yards, carry plus roll-out
    pub total_distance: f64,
    /// yards
    pub roll_out: f64,
    /// feet
    pub apex: f64,
    /// seconds
    pub flight_time: f64,
    /// mph
    pub ball_speed: f64,
    /// degrees
    pub launch_angle: f64,
    /// rpm
    pub backspin: f64,
    /// degrees, signed
    pub spin_axis: f64,
    /// degrees from horizontal
    pub landing_angle: f64,
    /// Carry landed within 10% of the club's power-scaled typical distance
    pub on_target: bool,
    /// 0-100, consistency of carry against the expected distance
    pub distance_control: f64,
}

impl FlightResult {
    /// Well-formed result for a flight that produced no samples.
    pub fn empty(launch: &LaunchConditions) -> Self {
        Self {
            trajectory: Vec::new(),
            carry: 0.0,
            total_distance: 0.0,
            roll_out: 0.0,
            apex: 0.0,
            flight_time: 0.0,
            ball_speed: launch.ball_speed,
            launch_angle: launch.launch_angle,
            backspin: launch.spin_rate,
            spin_axis: launch.spin_axis,
            landing_angle: 0.0,
            on_target: false,
            distance_control: 0.0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
