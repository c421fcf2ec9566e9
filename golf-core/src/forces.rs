//! Forces acting on the ball.
//!
//! Two `ForceModel` implementations, one per simulator:
//!
//! - [`FlightForces`]: gravity, aerodynamic drag, and the Magnus effect
//!   (backspin lift plus side force from a tilted spin axis)
//! - [`GreenForces`]: gravity, rolling friction, and slope bias
//!
//! ## Lift and curve
//!
//! A golf ball in flight carries backspin about an axis that is horizontal
//! when the face is square to the path. Backspin lifts the ball; tilting the
//! axis turns part of that lift sideways:
//!
//! ```text
//! Spin axis tilted right (positive):
//!     ball curves right (fade/slice)
//!
//! Spin axis tilted left (negative):
//!     ball curves left (draw/hook)
//! ```
//!
//! Both coefficients scale with the current spin rate and saturate at
//! `max_lift_coefficient`.

use crate::constants::{units, PhysicalConstants};
use crate::integrator::ForceModel;
use crate::types::{BallState, Vec3};

/// Spin rate that maps to one unit of lift/Magnus coefficient scaling (rpm)
const SPIN_REFERENCE_RPM: f64 = 500.0;

/// Force model for a ball in the air.
pub struct FlightForces {
    /// Tilt of the spin axis (degrees), positive curves right
    pub spin_axis: f64,
    /// Step length, so air resistance can slow the ball without reversing
    /// it. Zero leaves the aerodynamic forces uncapped.
    pub dt: f64,

    /// Enable/disable individual forces (useful for testing)
    pub enable_gravity: bool,
    pub enable_drag: bool,
    pub enable_magnus: bool,
}

impl FlightForces {
    pub fn new(spin_axis: f64, dt: f64) -> Self {
        Self {
            spin_axis,
            dt,
            enable_gravity: true,
            enable_drag: true,
            enable_magnus: true,
        }
    }

    /// Create a force model with only gravity (for testing).
    pub fn gravity_only() -> Self {
        Self {
            enable_drag: false,
            enable_magnus: false,
            ..Self::new(0.0, 0.0)
        }
    }

    /// Spin-dependent coefficient, capped at the saturation value.
    fn spin_coefficient(coefficient: f64, spin_rpm: f64, constants: &PhysicalConstants) -> f64 {
        (coefficient * spin_rpm / SPIN_REFERENCE_RPM).min(constants.max_lift_coefficient)
    }

    /// Drag: a = -0.5 * ρ * Cd * A * |v|² / m, opposite to the velocity.
    fn drag_acceleration(&self, state: &BallState, constants: &PhysicalConstants) -> Vec3 {
        let speed = state.vel.magnitude();
        if speed < units::EPSILON {
            return Vec3::ZERO;
        }

        // |v| * v carries both the v² magnitude and the direction
        state.vel * (-constants.aero_factor() * constants.drag_coefficient * speed)
    }

    /// Magnus lift and side force.
    ///
    /// Lift is the vertical component of a force perpendicular to the
    /// velocity, so it scales with `|v| * |v_h|` and always points up.
    /// Side force acts along the horizontal normal to the flight line.
    fn magnus_acceleration(&self, state: &BallState, constants: &PhysicalConstants) -> Vec3 {
        let speed = state.vel.magnitude();
        let horizontal_speed = state.vel.horizontal_magnitude();
        if horizontal_speed < units::EPSILON || state.spin_rpm.abs() < units::EPSILON {
            return Vec3::ZERO;
        }

        let aero = constants.aero_factor();

        let lift_cl = Self::spin_coefficient(constants.lift_coefficient, state.spin_rpm, constants);
        let lift = aero * speed * horizontal_speed * lift_cl;

        let side_cl = Self::spin_coefficient(constants.magnus_coefficient, state.spin_rpm, constants)
            * self.spin_axis.to_radians().sin();
        let side = aero * speed * speed * side_cl;

        // Right of the flight line: (-vz, 0, vx) / |v_h|
        let right = Vec3::new(-state.vel.z, 0.0, state.vel.x) / horizontal_speed;

        Vec3::new(0.0, lift, 0.0) + right * side
    }
}

impl ForceModel for FlightForces {
    fn linear_acceleration(&self, state: &BallState, constants: &PhysicalConstants) -> Vec3 {
        let mut aero = Vec3::ZERO;

        if self.enable_drag {
            aero += self.drag_acceleration(state, constants);
        }

        if self.enable_magnus {
            aero += self.magnus_acceleration(state, constants);
        }

        // Drag dominates the sum, so capped at speed/dt one step can only
        // slow the ball, never flip or speed it up
        let speed = state.vel.magnitude();
        let magnitude = aero.magnitude();
        if self.dt > 0.0 && magnitude * self.dt > speed {
            aero = aero * (speed / (magnitude * self.dt));
        }

        if self.enable_gravity {
            aero += Vec3::new(0.0, -constants.gravity, 0.0);
        }

        aero
    }
}

/// Force model for a ball rolling on the green.
pub struct GreenForces {
    /// Green-speed scaling of rolling friction (faster greens, less friction)
    pub speed_factor: f64,
    /// Incline along the target line (radians), positive uphill toward -Z
    pub slope_angle: f64,
    /// Step length, so friction can stop the ball without reversing it
    pub dt: f64,
}

impl GreenForces {
    pub fn new(speed_factor: f64, slope_angle: f64, dt: f64) -> Self {
        Self {
            speed_factor,
            slope_angle,
            dt,
        }
    }

    /// Coulomb rolling resistance opposing horizontal motion.
    fn friction_acceleration(&self, state: &BallState, constants: &PhysicalConstants) -> Vec3 {
        let horizontal = state.vel.horizontal();
        let speed = horizontal.magnitude();
        if speed < units::EPSILON {
            return Vec3::ZERO;
        }

        let decel = (constants.rolling_friction * constants.gravity * self.speed_factor)
            .min(speed / self.dt);

        horizontal * (-decel / speed)
    }

    /// The slope rises toward the hole (-Z), so uphill pulls toward +Z.
    fn slope_acceleration(&self, constants: &PhysicalConstants) -> Vec3 {
        Vec3::new(
            0.0,
            0.0,
            constants.gravity * self.slope_angle.sin() * constants.slope_bias,
        )
    }
}

impl ForceModel for GreenForces {
    fn linear_acceleration(&self, state: &BallState, constants: &PhysicalConstants) -> Vec3 {
        Vec3::new(0.0, -constants.gravity, 0.0)
            + self.friction_acceleration(state, constants)
            + self.slope_acceleration(constants)
    }
}

// =============================================================================
// Tests
// =============================================================================
