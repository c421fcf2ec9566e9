//! Putting roll simulator.
//!
//! Turns a putt (aim, power, slope, green speed) into a stepped ball path
//! across the green and a holed/accuracy verdict.
//!
//! ## Model
//!
//! - The stroke is sized so that a full-power putt on a reference green
//!   just reaches the nominal distance: `v₀ = sqrt(2 g d μ)`
//! - Faster greens need less stroke: `v₀` is scaled by a green-speed
//!   multiplier, and rolling friction by a green-speed factor
//! - The ball leaves the face with a small hop and settles after damped
//!   bounces
//! - The slope biases the ball along the target line
//!
//! The loop always terminates: the ball stops, runs away past a multiple of
//! the target distance, or hits the step ceiling.

use tracing::debug;

use crate::constants::{units, PhysicalConstants};
use crate::forces::GreenForces;
use crate::integrator::SemiImplicitEuler;
use crate::types::{AimRecommendation, BallState, PuttParameters, PuttResult, Vec3};

/// Stimpmeter rating the green-speed scaling is anchored at
const SLOWEST_GREEN: f64 = 6.0;
/// Stimpmeter span over which the scaling runs (6 → 14)
const GREEN_SPEED_SPAN: f64 = 8.0;

/// Stroke multiplier: faster greens need proportionally less power.
pub fn power_multiplier(green_speed: f64) -> f64 {
    (1.3 - ((green_speed - SLOWEST_GREEN) / GREEN_SPEED_SPAN) * 0.6).max(0.7)
}

/// Rolling-friction scale: faster greens slow the ball less.
pub fn friction_speed_factor(green_speed: f64) -> f64 {
    (1.0 - ((green_speed - SLOWEST_GREEN) / GREEN_SPEED_SPAN) * 0.3).max(0.5)
}

/// Why the roll loop ended.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RollEnd {
    Stopped,
    Runaway,
    StepLimit,
}

/// Stateless putting simulator over a fixed set of constants.
#[derive(Debug, Clone, Default)]
pub struct RollSimulator {
    constants: PhysicalConstants,
}

impl RollSimulator {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Simulate a putt from `ball_position` toward `hole_position`.
    ///
    /// Power and slope are used as given. Zero or negative power leaves the
    /// ball where it is.
    pub fn simulate(&self, params: &PuttParameters) -> PuttResult {
        let c = &self.constants;
        let dt = c.putt_time_step;

        let target_distance = params.distance_ft.max(0.0) * units::FEET_TO_METERS;
        let base_speed = (2.0 * c.gravity * target_distance * c.green_friction).sqrt();
        let initial_speed =
            (base_speed * (params.power / 100.0) * power_multiplier(params.green_speed)).max(0.0);

        let aim = params.aim_angle.to_radians();
        let start = params.ball_position;
        let mut state = BallState::new(
            start,
            Vec3::new(
                aim.sin() * initial_speed,
                c.hop_factor * initial_speed,
                -aim.cos() * initial_speed,
            ),
            0.0,
        );

        let forces = GreenForces::new(
            friction_speed_factor(params.green_speed),
            (params.slope / 100.0).atan(),
            dt,
        );
        let runaway_distance = c.runaway_factor * target_distance;

        let mut trajectory = vec![state.pos];
        let mut steps = 0usize;
        let mut end = RollEnd::StepLimit;

        while steps < c.max_putt_steps {
            if state.vel.horizontal_magnitude() < c.stop_speed {
                end = RollEnd::Stopped;
                break;
            }

            state = SemiImplicitEuler::step(&state, c, &forces, dt);
            steps += 1;

            if state.pos.y <= c.ball_radius {
                state.pos.y = c.ball_radius;
                state.vel.y = (-state.vel.y * c.bounce_damping).max(0.0);
            }

            trajectory.push(state.pos);

            if state.pos.horizontal_distance_to(&start) > runaway_distance {
                end = RollEnd::Runaway;
                break;
            }
        }

        let final_position = state.pos;
        let (holed, hole_accuracy) = self.score(&final_position, &params.hole_position);

        let roll_distance_m: f64 = trajectory
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum();
        let max_height = trajectory
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);

        debug!(
            ?end,
            steps,
            holed,
            miss_m = final_position.horizontal_distance_to(&params.hole_position),
            "putt simulated"
        );

        PuttResult {
            holed,
            final_position,
            trajectory,
            roll_distance_ft: roll_distance_m * units::METERS_TO_FEET,
            time_to_stop: steps as f64 * dt,
            max_height,
            hole_accuracy,
        }
    }

    /// Holed flag and 0-100 accuracy for a ball finishing at `final_position`.
    ///
    /// Distance is measured on the green surface, so ball-center height does
    /// not count against the putt.
    pub fn score(&self, final_position: &Vec3, hole_position: &Vec3) -> (bool, f64) {
        let hole_radius = self.constants.hole_radius;
        let distance = final_position.horizontal_distance_to(hole_position);
        let holed = distance <= hole_radius;
        let accuracy = (100.0 - (distance / hole_radius) * 100.0).max(0.0);
        (holed, accuracy)
    }

    /// Closed-form aim and power suggestion.
    ///
    /// Power is whatever makes `v₀² / 2a` equal the straight-line distance,
    /// where `a` is rolling friction plus the slope bias. Confidence drops
    /// with slope, wind, and disagreement between the straight-line and
    /// nominal distances. Runs no simulation.
    pub fn recommend_aim(&self, params: &PuttParameters) -> AimRecommendation {
        let c = &self.constants;

        let offset = params.hole_position - params.ball_position;
        let straight = offset.horizontal_magnitude();
        let aim_angle = if straight < units::EPSILON {
            0.0
        } else {
            offset.x.atan2(-offset.z).to_degrees()
        };

        let nominal = params.distance_ft.max(0.0) * units::FEET_TO_METERS;
        let slope_angle = (params.slope / 100.0).atan();
        // Decelerations in units of g
        let required = c.rolling_friction * friction_speed_factor(params.green_speed)
            + c.slope_bias * slope_angle.sin();
        let available = nominal * c.green_friction;

        let power = if required <= 0.0 {
            // Downhill steeper than friction: the ball never stops on its own
            0.0
        } else if available < units::EPSILON {
            if straight < units::EPSILON {
                0.0
            } else {
                100.0
            }
        } else {
            100.0 * (straight * required / available).sqrt() / power_multiplier(params.green_speed)
        };

        let deviation = if nominal < units::EPSILON {
            if straight < units::EPSILON {
                0.0
            } else {
                1.0
            }
        } else {
            (straight - nominal).abs() / nominal
        };
        let confidence =
            100.0 - params.slope.abs() * 5.0 - params.wind_speed.abs() * 3.0 - deviation * 20.0;

        AimRecommendation {
            aim_angle,
            power: power.clamp(0.0, 100.0),
            confidence: confidence.clamp(0.0, 100.0),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
