//! # Golf Core
//!
//! Shot physics for a golf simulator: a putting roll model and a full-swing
//! flight model.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, ball state, shot parameters and results)
//! - `constants`: Physical constants and unit conversions
//! - `clubs`: Club specifications and the standard bag
//! - `config`: YAML loader for alternate constants and club sets
//! - `integrator`: Numerical integration (semi-implicit Euler)
//! - `forces`: Physical forces (gravity, drag, Magnus effect, rolling friction)
//! - `putting`: Roll simulation and aim recommendation
//! - `flight`: Launch conditions, flight integration, and shot statistics
//!
//! The free functions below run with the built-in constants and the
//! standard club set.

pub mod clubs;
pub mod config;
pub mod constants;
pub mod flight;
pub mod forces;
pub mod integrator;
pub mod putting;
pub mod types;

pub use clubs::{ClubSpec, ClubTable};
pub use config::{ConfigError, ConfigLoader};
pub use constants::PhysicalConstants;
pub use flight::FlightSimulator;
pub use putting::RollSimulator;
pub use types::{
    AimRecommendation, FlightResult, LaunchConditions, PuttParameters, PuttResult,
    SwingParameters, Vec3,
};

/// Simulate a putt on a green with the default constants.
pub fn simulate_putt(params: &PuttParameters) -> PuttResult {
    RollSimulator::default().simulate(params)
}

/// Closed-form aim and power for a putt.
pub fn recommend_aim(params: &PuttParameters) -> AimRecommendation {
    RollSimulator::default().recommend_aim(params)
}

/// Fly a swing with a club from the standard set.
///
/// Fails with [`ConfigError::UnknownClub`] if `swing.club` is not in the set.
pub fn simulate_flight(swing: &SwingParameters) -> Result<FlightResult, ConfigError> {
    FlightSimulator::default().simulate_club(swing, &ClubTable::standard())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_match_simulators() {
        let putt = PuttParameters::default();
        assert_eq!(simulate_putt(&putt), RollSimulator::default().simulate(&putt));
        assert_eq!(recommend_aim(&putt), RollSimulator::default().recommend_aim(&putt));

        let swing = SwingParameters::default();
        let driver = ClubTable::standard()
            .get("driver")
            .cloned()
            .expect("driver is in the standard set");
        let flight = simulate_flight(&swing).expect("driver is in the standard set");
        assert_eq!(flight, FlightSimulator::default().simulate(&swing, &driver));
    }

    #[test]
    fn test_simulate_flight_unknown_club() {
        let swing = SwingParameters {
            club: "1iron".to_string(),
            ..SwingParameters::default()
        };
        assert!(matches!(
            simulate_flight(&swing),
            Err(ConfigError::UnknownClub(_))
        ));
    }

    #[test]
    fn test_every_standard_club_flies() {
        let table = ClubTable::standard();
        for id in table.ids() {
            let result = simulate_flight(&SwingParameters {
                club: id.to_string(),
                ..SwingParameters::default()
            })
            .expect("standard club");
            assert!(result.carry > 0.0, "{} carry", id);
            assert!(result.apex > 0.0, "{} apex", id);
            assert!(result.flight_time > 0.0, "{} time", id);
        }
    }
}
