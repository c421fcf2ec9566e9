//! Club specifications.
//!
//! A [`ClubTable`] is a curated, read-only list of clubs. Looking up an id
//! that is not in the table is a configuration error and is reported as
//! such, never replaced by a default club.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ConfigError;

/// Physical characteristics of one club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubSpec {
    pub id: String,
    pub name: String,
    /// Display color, `#rrggbb`
    pub color: String,

    /// Static loft (degrees)
    pub loft: f64,
    /// Carry at full power (yards)
    pub typical_distance: f64,
    /// Head speed at full power (mph)
    pub max_club_speed: f64,
    /// Ball speed / club speed
    pub smash_factor: f64,
    /// Backspin before loft scaling (rpm)
    pub default_spin_rate: f64,
    /// Degrees; shown to the player, not used by the flight model
    pub optimal_attack_angle: f64,
    /// Roll-out on a flat landing before angle/spin scaling (yards)
    pub base_roll: f64,
}

impl ClubSpec {
    #[allow(clippy::too_many_arguments)]
    fn row(
        id: &str,
        name: &str,
        color: &str,
        loft: f64,
        typical_distance: f64,
        max_club_speed: f64,
        smash_factor: f64,
        default_spin_rate: f64,
        optimal_attack_angle: f64,
        base_roll: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            loft,
            typical_distance,
            max_club_speed,
            smash_factor,
            default_spin_rate,
            optimal_attack_angle,
            base_roll,
        }
    }
}

/// Lookup table of clubs keyed by id, in bag order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClubTable {
    clubs: Vec<ClubSpec>,
}

impl ClubTable {
    pub fn from_specs(clubs: Vec<ClubSpec>) -> Self {
        Self { clubs }
    }

    /// The standard 13-club set.
    ///
    /// Head speeds are those of a mid-handicap player; carries are what the
    /// flight model produces for a square, centered strike at full power.
    pub fn standard() -> Self {
        Self::from_specs(vec![
            ClubSpec::row("driver", "Driver", "#1f2937", 10.5, 230.0, 108.0, 1.48, 2000.0, 3.0, 20.0),
            ClubSpec::row("3wood", "3 Wood", "#374151", 15.0, 210.0, 90.0, 1.46, 2500.0, -1.0, 15.0),
            ClubSpec::row("5wood", "5 Wood", "#4b5563", 18.0, 195.0, 85.0, 1.44, 2800.0, -1.5, 12.0),
            ClubSpec::row("4hybrid", "4 Hybrid", "#7c3aed", 22.0, 180.0, 79.0, 1.42, 3000.0, -2.0, 10.0),
            ClubSpec::row("5iron", "5 Iron", "#1d4ed8", 27.0, 165.0, 75.0, 1.38, 3200.0, -2.5, 8.0),
            ClubSpec::row("6iron", "6 Iron", "#2563eb", 30.0, 155.0, 72.0, 1.36, 3300.0, -3.0, 7.0),
            ClubSpec::row("7iron", "7 Iron", "#3b82f6", 34.0, 145.0, 70.0, 1.33, 3400.0, -3.5, 6.0),
            ClubSpec::row("8iron", "8 Iron", "#60a5fa", 38.0, 135.0, 67.0, 1.31, 3600.0, -4.0, 5.0),
            ClubSpec::row("9iron", "9 Iron", "#93c5fd", 42.0, 125.0, 65.0, 1.29, 3800.0, -4.5, 4.0),
            ClubSpec::row("pw", "Pitching Wedge", "#15803d", 46.0, 115.0, 63.0, 1.26, 4000.0, -5.0, 3.0),
            ClubSpec::row("gw", "Gap Wedge", "#16a34a", 50.0, 102.0, 61.0, 1.23, 4100.0, -5.0, 2.5),
            ClubSpec::row("sw", "Sand Wedge", "#22c55e", 56.0, 90.0, 59.0, 1.20, 4200.0, -5.0, 2.0),
            ClubSpec::row("lw", "Lob Wedge", "#4ade80", 60.0, 78.0, 56.0, 1.18, 4400.0, -5.0, 1.5),
        ])
    }

    /// Look up a club by id.
    pub fn get(&self, id: &str) -> Result<&ClubSpec, ConfigError> {
        self.clubs.iter().find(|c| c.id == id).ok_or_else(|| {
            warn!(club = id, "unknown club id");
            ConfigError::UnknownClub(id.to_string())
        })
    }

    /// All club ids, in bag order.
    pub fn ids(&self) -> Vec<&str> {
        self.clubs.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClubSpec> {
        self.clubs.iter()
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }
}

impl Default for ClubTable {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// Tests
// =============================================================================
