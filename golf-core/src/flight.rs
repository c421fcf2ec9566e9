//! Full-swing flight simulator.
//!
//! ## Pipeline
//!
//! 1. Derive [`LaunchConditions`] from the club and the swing
//! 2. Integrate the ball through the air until it comes back to the ground
//!    or the flight-time ceiling is reached
//! 3. Summarize: carry, apex, landing angle, roll-out, distance control
//!
//! Integration runs in SI; the returned trajectory is in display units
//! (x and z in yards, y in feet).

use tracing::{debug, trace, warn};

use crate::clubs::{ClubSpec, ClubTable};
use crate::config::ConfigError;
use crate::constants::{units, PhysicalConstants};
use crate::forces::FlightForces;
use crate::integrator::SemiImplicitEuler;
use crate::types::{BallState, FlightResult, LaunchConditions, SwingParameters, Vec3};

/// Backspin clamp (rpm)
const MIN_BACKSPIN: f64 = 1500.0;
const MAX_BACKSPIN: f64 = 12000.0;

/// Carry deviation still counted as on target
const ON_TARGET_RATIO: f64 = 0.10;

/// Stateless flight simulator over a fixed set of constants.
#[derive(Debug, Clone, Default)]
pub struct FlightSimulator {
    constants: PhysicalConstants,
}

impl FlightSimulator {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Ball launch for a swing with `club`.
    ///
    /// Strike quality does not touch ball speed or spin; it only scales
    /// roll-out and distance control afterwards.
    pub fn launch_conditions(&self, swing: &SwingParameters, club: &ClubSpec) -> LaunchConditions {
        let club_head_speed = club.max_club_speed * (swing.power / 100.0);
        let ball_speed = club_head_speed * club.smash_factor;

        let dynamic_loft = club.loft + swing.face_angle * 0.3 + swing.attack_angle * 0.2;
        let launch_angle = dynamic_loft * 0.85 + swing.attack_angle * 0.75;

        let spin_loft = dynamic_loft - swing.attack_angle;
        let spin_rate =
            (club.default_spin_rate * (1.0 + spin_loft / 30.0)).clamp(MIN_BACKSPIN, MAX_BACKSPIN);

        // Doubled so the curve reads clearly on screen
        let spin_axis = (swing.face_angle - swing.club_path) * 2.0;
        let start_direction = swing.face_angle * 0.85 + swing.club_path * 0.15;

        LaunchConditions {
            club_head_speed,
            ball_speed,
            dynamic_loft,
            launch_angle,
            spin_rate,
            spin_axis,
            start_direction,
        }
    }

    /// Fly a swing with an already-resolved club.
    pub fn simulate(&self, swing: &SwingParameters, club: &ClubSpec) -> FlightResult {
        let c = &self.constants;
        let dt = c.flight_time_step;
        let launch = self.launch_conditions(swing, club);
        trace!(club = %club.id, ?launch, "launch conditions");

        if !dt.is_finite() || dt <= 0.0 {
            warn!(dt, "flight time step must be positive");
            return FlightResult::empty(&launch);
        }

        let speed = launch.ball_speed * units::MPH_TO_MPS;
        let elevation = launch.launch_angle.to_radians();
        let direction = launch.start_direction.to_radians();
        let mut state = BallState::new(
            Vec3::ZERO,
            Vec3::new(
                speed * elevation.cos() * direction.sin(),
                speed * elevation.sin(),
                -speed * elevation.cos() * direction.cos(),
            ),
            launch.spin_rate,
        );

        let forces = FlightForces::new(launch.spin_axis, dt);
        let mut trajectory = Vec::new();
        let mut steps = 0usize;
        let mut flight_time = 0.0;
        let mut landed = false;

        while flight_time < c.max_flight_time {
            state.spin_rpm = c.spin_decay(launch.spin_rate, flight_time);
            state = SemiImplicitEuler::step(&state, c, &forces, dt);
            steps += 1;
            flight_time = steps as f64 * dt;

            if state.pos.y < 0.0 {
                // Back up to where the step crossed the ground
                let drop = state.vel.y * dt;
                let fraction = if drop.abs() < units::EPSILON {
                    0.0
                } else {
                    state.pos.y / drop
                };
                state.pos = state.pos - state.vel * (dt * fraction);
                state.pos.y = 0.0;
                flight_time -= fraction * dt;
                trajectory.push(to_display(&state.pos));
                landed = true;
                break;
            }

            trajectory.push(to_display(&state.pos));
        }

        let Some(last) = trajectory.last().copied() else {
            debug!(club = %club.id, "flight produced no samples");
            return FlightResult::empty(&launch);
        };

        let carry = last.horizontal_magnitude();
        let apex = trajectory.iter().map(|p| p.y).fold(0.0, f64::max);
        let landing_angle = landing_angle(&trajectory);
        let roll_out =
            self.estimate_roll_out(club, landing_angle, launch.spin_rate, swing.strike_quality);
        let (on_target, distance_control) = self.score(carry, swing, club);

        debug!(
            club = %club.id,
            steps,
            landed,
            carry,
            apex,
            lateral = last.x,
            "flight simulated"
        );

        FlightResult {
            trajectory,
            carry,
            total_distance: carry + roll_out,
            roll_out,
            apex,
            flight_time,
            ball_speed: launch.ball_speed,
            launch_angle: launch.launch_angle,
            backspin: launch.spin_rate,
            spin_axis: launch.spin_axis,
            landing_angle,
            on_target,
            distance_control,
        }
    }

    /// Look the swing's club up in `clubs` and fly it.
    pub fn simulate_club(
        &self,
        swing: &SwingParameters,
        clubs: &ClubTable,
    ) -> Result<FlightResult, ConfigError> {
        let club = clubs.get(&swing.club)?;
        Ok(self.simulate(swing, club))
    }

    /// Roll after landing (yards).
    ///
    /// Shallow landings and low spin roll further; a poor strike rolls less.
    pub fn estimate_roll_out(
        &self,
        club: &ClubSpec,
        landing_angle: f64,
        backspin: f64,
        strike_quality: f64,
    ) -> f64 {
        let angle_factor = (1.5 - landing_angle / 60.0).clamp(0.25, 1.5);
        let spin_factor = if backspin <= 0.0 {
            1.5
        } else {
            (3000.0 / backspin).clamp(0.3, 1.5)
        };
        club.base_roll * angle_factor * spin_factor * strike_quality
    }

    /// On-target flag and 0-100 distance control for a carry.
    ///
    /// Measured against the club's typical carry scaled by power, not
    /// against any target on the course.
    pub fn score(&self, carry: f64, swing: &SwingParameters, club: &ClubSpec) -> (bool, f64) {
        let expected = club.typical_distance * (swing.power / 100.0);
        if expected <= 0.0 {
            return (false, 0.0);
        }

        let ratio = (carry - expected).abs() / expected;
        let distance_control = (100.0 - ratio * 200.0).max(0.0) * swing.strike_quality;
        (ratio <= ON_TARGET_RATIO, distance_control)
    }
}

/// SI position to display units: yards across the ground, feet up.
fn to_display(pos: &Vec3) -> Vec3 {
    Vec3::new(
        pos.x * units::METERS_TO_YARDS,
        (pos.y * units::METERS_TO_FEET).max(0.0),
        pos.z * units::METERS_TO_YARDS,
    )
}

/// Descent angle from the last two display samples (degrees).
fn landing_angle(trajectory: &[Vec3]) -> f64 {
    match trajectory {
        [.., before, last] => {
            let horizontal_ft = last.horizontal_distance_to(before) * units::YARDS_TO_FEET;
            let vertical_ft = (last.y - before.y).abs();
            vertical_ft.atan2(horizontal_ft).to_degrees()
        }
        _ => 0.0,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn club(id: &str) -> ClubSpec {
        ClubTable::standard()
            .get(id)
            .cloned()
            .expect("club is in the standard set")
    }

    fn fly(swing: &SwingParameters) -> FlightResult {
        FlightSimulator::default().simulate(swing, &club(&swing.club))
    }

    fn swing(club: &str) -> SwingParameters {
        SwingParameters {
            club: club.to_string(),
            ..SwingParameters::default()
        }
    }

    #[test]
    fn test_launch_conditions_square_driver() {
        let launch = FlightSimulator::default().launch_conditions(&swing("driver"), &club("driver"));

        assert!((launch.club_head_speed - 108.0).abs() < 1e-9);
        assert!((launch.ball_speed - 159.84).abs() < 1e-9);
        assert!((launch.dynamic_loft - 10.5).abs() < 1e-9);
        assert!((launch.launch_angle - 8.925).abs() < 1e-9);
        assert!((launch.spin_rate - 2700.0).abs() < 1e-9);
        assert_eq!(launch.spin_axis, 0.0);
        assert_eq!(launch.start_direction, 0.0);
    }

    #[test]
    fn test_backspin_is_clamped() {
        let sim = FlightSimulator::default();
        let lob = sim.launch_conditions(&swing("lw"), &club("lw"));
        assert_eq!(lob.spin_rate, MAX_BACKSPIN);

        let low_spin = ClubSpec {
            default_spin_rate: 500.0,
            ..club("driver")
        };
        let launch = sim.launch_conditions(&swing("driver"), &low_spin);
        assert_eq!(launch.spin_rate, MIN_BACKSPIN);
    }

    #[test]
    fn test_driver_full_power() {
        let driver = club("driver");
        let result = fly(&swing("driver"));

        let error = (result.carry - driver.typical_distance).abs() / driver.typical_distance;
        assert!(error < 0.15, "Driver carry {} too far from {}", result.carry, driver.typical_distance);
        assert!(result.apex > 0.0);
        assert!(
            result.landing_angle > 20.0 && result.landing_angle < 60.0,
            "Landing angle {}",
            result.landing_angle
        );
        assert!(result.on_target);
        assert!(result.distance_control > 90.0, "control {}", result.distance_control);
        assert!((result.total_distance - (result.carry + result.roll_out)).abs() < 1e-9);
    }

    #[test]
    fn test_trajectory_ends_on_the_ground() {
        let result = fly(&swing("7iron"));
        let last = result.trajectory.last().expect("flight has samples");

        assert_eq!(last.y, 0.0);
        assert!(result.trajectory.iter().all(|p| p.y >= 0.0));
        assert!((result.carry - last.horizontal_magnitude()).abs() < 1e-12);

        let dt = FlightSimulator::default().constants().flight_time_step;
        let bound = result.trajectory.len() as f64 * dt;
        assert!(result.flight_time <= bound + 1e-9 && result.flight_time > bound - dt);
    }

    #[test]
    fn test_carry_grows_with_power() {
        for id in ["driver", "lw"] {
            let mut previous = 0.0;
            for power in [50.0, 60.0, 70.0, 80.0, 90.0, 100.0] {
                let result = fly(&SwingParameters {
                    power,
                    ..swing(id)
                });
                assert!(
                    result.carry >= previous,
                    "{} carry dropped at power {}: {} < {}",
                    id,
                    power,
                    result.carry,
                    previous
                );
                previous = result.carry;
            }
        }
    }

    #[test]
    fn test_driver_rolls_further_than_wedge() {
        let driver = fly(&swing("driver"));
        let wedge = fly(&swing("lw"));
        assert!(
            driver.roll_out > wedge.roll_out,
            "driver {} vs wedge {}",
            driver.roll_out,
            wedge.roll_out
        );
    }

    #[test]
    fn test_slice_curves_right() {
        let square = fly(&swing("driver"));
        let slice = fly(&SwingParameters {
            face_angle: 8.0,
            club_path: -8.0,
            ..swing("driver")
        });

        assert_eq!(slice.spin_axis, 32.0);
        let square_x = square.trajectory.last().map_or(0.0, |p| p.x);
        let slice_x = slice.trajectory.last().map_or(0.0, |p| p.x);
        assert!(square_x.abs() < 1e-9, "Square strike should finish on line");
        assert!(slice_x > 30.0, "Slice should finish well right, got {}", slice_x);
    }

    #[test]
    fn test_curve_mirrors_with_path() {
        // Square face, so only the path differs between the two swings
        let out_to_in = fly(&SwingParameters {
            club_path: -5.0,
            ..swing("6iron")
        });
        let in_to_out = fly(&SwingParameters {
            club_path: 5.0,
            ..swing("6iron")
        });

        let fade_x = out_to_in.trajectory.last().map_or(0.0, |p| p.x);
        let draw_x = in_to_out.trajectory.last().map_or(0.0, |p| p.x);
        assert!(fade_x > 0.0 && draw_x < 0.0, "{} vs {}", fade_x, draw_x);
        assert!((fade_x + draw_x).abs() < 1e-6, "{} vs {}", fade_x, draw_x);
        assert!((out_to_in.carry - in_to_out.carry).abs() < 1e-6);
    }

    #[test]
    fn test_strike_quality_scales_roll_and_control_only() {
        let clean = fly(&swing("driver"));
        let thin = fly(&SwingParameters {
            strike_quality: 0.8,
            ..swing("driver")
        });

        assert_eq!(clean.carry, thin.carry);
        assert_eq!(clean.ball_speed, thin.ball_speed);
        assert!((thin.roll_out - clean.roll_out * 0.8).abs() < 1e-9);
        assert!((thin.distance_control - clean.distance_control * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let params = SwingParameters {
            power: 85.0,
            attack_angle: -2.0,
            face_angle: 2.0,
            club_path: -1.0,
            strike_quality: 0.9,
            club: "5iron".to_string(),
        };
        assert_eq!(fly(&params), fly(&params));
    }

    #[test]
    fn test_no_flight_time_gives_empty_result() {
        let sim = FlightSimulator::new(PhysicalConstants {
            max_flight_time: 0.0,
            ..PhysicalConstants::default()
        });
        let result = sim.simulate(&swing("driver"), &club("driver"));

        assert!(result.trajectory.is_empty());
        assert_eq!(result.carry, 0.0);
        assert_eq!(result.total_distance, 0.0);
        assert_eq!(result.landing_angle, 0.0);
        assert!(!result.on_target);
        assert!((result.ball_speed - 159.84).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_power_stays_finite() {
        for power in [1.0e4, 1.0e5, 1.0e6, -1.0e6] {
            for (face_angle, club_path) in [(0.0, 0.0), (45.0, -45.0), (-10.0, 10.0)] {
                for id in ["driver", "lw"] {
                    let result = fly(&SwingParameters {
                        power,
                        face_angle,
                        club_path,
                        ..swing(id)
                    });
                    assert!(
                        result.carry.is_finite()
                            && result.total_distance.is_finite()
                            && result.landing_angle.is_finite()
                            && result.apex.is_finite(),
                        "{} at power {} face {} path {}: {:?}",
                        id,
                        power,
                        face_angle,
                        club_path,
                        (result.carry, result.total_distance, result.landing_angle)
                    );
                    assert!(result.trajectory.iter().all(|p| p.x.is_finite() && p.z.is_finite()));
                }
            }
        }
    }

    #[test]
    fn test_non_positive_time_step_returns_empty() {
        for flight_time_step in [0.0, -0.01] {
            let sim = FlightSimulator::new(PhysicalConstants {
                flight_time_step,
                ..PhysicalConstants::default()
            });
            let result = sim.simulate(&swing("driver"), &club("driver"));
            assert!(result.trajectory.is_empty());
            assert_eq!(result.carry, 0.0);
        }
    }

    #[test]
    fn test_simulate_club_rejects_unknown_id() {
        let sim = FlightSimulator::default();
        let table = ClubTable::standard();

        match sim.simulate_club(&swing("putter"), &table) {
            Err(ConfigError::UnknownClub(id)) => assert_eq!(id, "putter"),
            other => panic!("Expected UnknownClub, got {:?}", other),
        }
        assert!(sim.simulate_club(&swing("pw"), &table).is_ok());
    }

    #[test]
    fn test_roll_out_factors() {
        let sim = FlightSimulator::default();
        let driver = club("driver");

        // 30° landing at 3000 rpm is the neutral case
        assert!((sim.estimate_roll_out(&driver, 30.0, 3000.0, 1.0) - 20.0).abs() < 1e-9);
        assert!(sim.estimate_roll_out(&driver, 10.0, 3000.0, 1.0) > 20.0);
        assert!(sim.estimate_roll_out(&driver, 30.0, 9000.0, 1.0) < 20.0);
        // Both factors saturate
        assert!((sim.estimate_roll_out(&driver, 0.0, 100.0, 1.0) - 45.0).abs() < 1e-9);
        assert!((sim.estimate_roll_out(&driver, 90.0, 20000.0, 1.0) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_against_expected_carry() {
        let sim = FlightSimulator::default();
        let seven = club("7iron");
        let half = SwingParameters {
            power: 50.0,
            ..swing("7iron")
        };

        let (on_target, control) = sim.score(72.5, &half, &seven);
        assert!(on_target);
        assert_eq!(control, 100.0);

        // 20% long: off target, control 60
        let (on_target, control) = sim.score(87.0, &half, &seven);
        assert!(!on_target);
        assert!((control - 60.0).abs() < 1e-9);

        let (_, control) = sim.score(0.0, &half, &seven);
        assert_eq!(control, 0.0);
    }

    #[test]
    fn test_landing_angle_needs_two_samples() {
        assert_eq!(landing_angle(&[]), 0.0);
        assert_eq!(landing_angle(&[Vec3::new(1.0, 2.0, 3.0)]), 0.0);

        // 1 yard across, 3 feet down: 45°
        let angle = landing_angle(&[Vec3::new(0.0, 3.0, -10.0), Vec3::new(0.0, 0.0, -11.0)]);
        assert!((angle - 45.0).abs() < 1e-9);
    }
}
