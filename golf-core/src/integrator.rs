//! Fixed-step integration shared by the putting and flight simulators.
//!
//! Both simulators advance the ball with semi-implicit (symplectic) Euler:
//!
//! ```text
//! 1. a     = a(x, v)
//! 2. v_new = v + a*dt
//! 3. x_new = x + v_new*dt
//! ```
//!
//! Updating position with the new velocity keeps friction from pushing a
//! ball past rest within a step, and is stable at the coarse 1/60 s frame
//! rate the putting model runs at.

use crate::constants::PhysicalConstants;
use crate::types::{BallState, Vec3};

/// Trait for computing accelerations on the ball.
///
/// Implementations provide the physics model (gravity, drag, Magnus,
/// rolling friction, ...).
pub trait ForceModel {
    /// Compute linear acceleration given current state.
    fn linear_acceleration(&self, state: &BallState, constants: &PhysicalConstants) -> Vec3;
}

/// Semi-implicit Euler integrator.
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Advance the ball state by one time step.
    ///
    /// Spin is carried through unchanged; callers that model spin decay
    /// set it on the state before stepping.
    pub fn step<F: ForceModel>(
        state: &BallState,
        constants: &PhysicalConstants,
        forces: &F,
        dt: f64,
    ) -> BallState {
        let acceleration = forces.linear_acceleration(state, constants);

        let vel = state.vel + acceleration * dt;
        let pos = state.pos + vel * dt;

        BallState {
            pos,
            vel,
            spin_rpm: state.spin_rpm,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Simple gravity-only force model for testing
    struct GravityOnly;

    impl ForceModel for GravityOnly {
        fn linear_acceleration(&self, _state: &BallState, constants: &PhysicalConstants) -> Vec3 {
            Vec3::new(0.0, -constants.gravity, 0.0)
        }
    }

    #[test]
    fn test_free_fall() {
        let constants = PhysicalConstants::default();
        let mut state = BallState::at_rest(Vec3::new(0.0, 1.0, 0.0));

        let dt = 0.001;
        for _ in 0..451 {
            state = SemiImplicitEuler::step(&state, &constants, &GravityOnly, dt);
        }

        // t = sqrt(2h/g) ≈ 0.4515s, first-order error stays well under 5 cm
        assert!(
            state.pos.y.abs() < 0.05,
            "Ball should be near ground, got y={}",
            state.pos.y
        );
        assert!((state.vel.y + constants.gravity * 0.451).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_motion() {
        // No forces - ball should move in straight line
        struct NoForces;
        impl ForceModel for NoForces {
            fn linear_acceleration(&self, _: &BallState, _: &PhysicalConstants) -> Vec3 {
                Vec3::ZERO
            }
        }

        let constants = PhysicalConstants::default();
        let initial = BallState::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), 2500.0);

        let result = SemiImplicitEuler::step(&initial, &constants, &NoForces, 1.0);

        assert!(
            (result.pos.z + 10.0).abs() < 1e-10,
            "Expected z=-10, got z={}",
            result.pos.z
        );
        assert!((result.vel.z + 10.0).abs() < 1e-10, "Velocity should be unchanged");
        assert_eq!(result.spin_rpm, 2500.0, "Spin is carried through");
    }

    #[test]
    fn test_position_uses_updated_velocity() {
        let constants = PhysicalConstants::default();
        let initial = BallState::at_rest(Vec3::new(0.0, 1.0, 0.0));

        let result = SemiImplicitEuler::step(&initial, &constants, &GravityOnly, 0.1);

        // v = -0.981, x = 1 - 0.0981
        assert!((result.vel.y + 0.981).abs() < 1e-12);
        assert!((result.pos.y - (1.0 - 0.0981)).abs() < 1e-12);
    }
}
