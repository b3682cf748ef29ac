//! Centralized constants for the cooperation game.
//!
//! All tunable numbers are defined here with the `ALIFE_` prefix and feed the defaults of
//! [crate::rules::Rules].

// ============================================================================
// Energy Parameters
// ============================================================================

/// Energy an organism holds when it is created, either at start up or as offspring
pub const ALIFE_INITIAL_ENERGY: u32 = 0;

/// Energy every organism gains passively once per tick
pub const ALIFE_PASSIVE_GAIN: u32 = 1;

/// Energy at or above which an organism reproduces
pub const ALIFE_REPRODUCTION_THRESHOLD: u32 = 10;

// ============================================================================
// Cooperation Parameters
// ============================================================================

/// Energy paid by an organism each time it cooperates
pub const ALIFE_COOPERATION_COST: u32 = 1;

/// Maximum number of distinct counterparts that receive energy from one cooperation
pub const ALIFE_COOPERATION_FAN_OUT: usize = 8;

/// Cooperation probability of a [crate::Variant::Cooperator]
pub const ALIFE_COOPERATOR_PROBABILITY: f64 = 1.0;

/// Cooperation probability of a [crate::Variant::Defector]
pub const ALIFE_DEFECTOR_PROBABILITY: f64 = 0.0;

/// Cooperation probability of a [crate::Variant::PartialCooperator]
pub const ALIFE_PARTIAL_COOPERATOR_PROBABILITY: f64 = 0.5;
