//! Organisms and the fixed strategies they play in the cooperation game.

use crate::{
    constants::{
        ALIFE_COOPERATOR_PROBABILITY, ALIFE_DEFECTOR_PROBABILITY, ALIFE_INITIAL_ENERGY,
        ALIFE_PARTIAL_COOPERATOR_PROBABILITY,
    },
    error::Error,
};
use core::{fmt, str::FromStr};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The strategy an [Organism] plays. Fixed at creation and inherited unchanged by offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    Cooperator,
    Defector,
    PartialCooperator,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::Cooperator,
        Variant::Defector,
        Variant::PartialCooperator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cooperator => "Cooperator",
            Self::Defector => "Defector",
            Self::PartialCooperator => "PartialCooperator",
        }
    }

    pub fn cooperation_probability(&self) -> f64 {
        match self {
            Self::Cooperator => ALIFE_COOPERATOR_PROBABILITY,
            Self::Defector => ALIFE_DEFECTOR_PROBABILITY,
            Self::PartialCooperator => ALIFE_PARTIAL_COOPERATOR_PROBABILITY,
        }
    }

    /// Decide whether to cooperate this tick. Partial cooperators draw a fresh coin every call.
    pub fn cooperates<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        match self {
            Self::Cooperator => true,
            Self::Defector => false,
            Self::PartialCooperator => rng.random_bool(ALIFE_PARTIAL_COOPERATOR_PROBABILITY),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == s)
            .ok_or_else(|| Error::UnknownVariant(s.to_owned()))
    }
}

impl TryFrom<&str> for Variant {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Variant {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single member of a [crate::Population]: a strategy and an energy level that never drops
/// below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organism {
    variant: Variant,
    energy: u32,
}

impl Organism {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            energy: ALIFE_INITIAL_ENERGY,
        }
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn energy(&self) -> u32 {
        self.energy
    }

    #[inline]
    pub fn increment_energy(&mut self) {
        self.energy += 1;
    }

    /// Floors at zero
    #[inline]
    pub fn decrement_energy(&mut self) {
        self.energy = self.energy.saturating_sub(1);
    }

    /// Passive energy gain, applied once per tick
    pub fn update(&mut self) {
        self.increment_energy();
    }

    #[inline]
    pub fn cooperation_probability(&self) -> f64 {
        self.variant.cooperation_probability()
    }

    #[inline]
    pub fn cooperates<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.variant.cooperates(rng)
    }

    /// Spend all accumulated energy on a single offspring of the same variant
    pub fn reproduce(&mut self) -> Organism {
        self.energy = 0;
        Organism::new(self.variant)
    }
}

impl From<Variant> for Organism {
    fn from(variant: Variant) -> Self {
        Self::new(variant)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_f64_approx, random::rng_from_seed, test_variant};
    use rand::rngs::ThreadRng;

    test_variant!(new_has_no_energy[V: Cooperator | Defector | PartialCooperator]() {
        let organism = Organism::new(V);
        assert_eq!(0, organism.energy());
        assert_eq!(V, organism.variant());
    });

    test_variant!(energy_floor[V: Cooperator | Defector | PartialCooperator]() {
        let mut organism = Organism::new(V);
        organism.decrement_energy();
        assert_eq!(0, organism.energy());

        organism.increment_energy();
        organism.increment_energy();
        organism.decrement_energy();
        assert_eq!(1, organism.energy());
        organism.decrement_energy();
        organism.decrement_energy();
        assert_eq!(0, organism.energy());
    });

    test_variant!(update_gains_one[V: Cooperator | Defector | PartialCooperator]() {
        let mut organism = Organism::new(V);
        for expected in 1..=5 {
            organism.update();
            assert_eq!(expected, organism.energy());
        }
    });

    test_variant!(reproduce_drains_energy[V: Cooperator | Defector | PartialCooperator]() {
        let mut parent = Organism::new(V);
        for _ in 0..12 {
            parent.update();
        }

        let child = parent.reproduce();
        assert_eq!(0, parent.energy());
        assert_eq!(0, child.energy());
        assert_eq!(V, child.variant());
        assert_eq!(V, parent.variant());
    });

    test_variant!(label_round_trip[V: Cooperator | Defector | PartialCooperator]() {
        assert_eq!(V, V.label().parse::<Variant>().unwrap());
        assert_eq!(V.label(), V.to_string());
    });

    #[test]
    fn test_cooperation_probability() {
        assert_f64_approx!(1., Organism::new(Variant::Cooperator).cooperation_probability());
        assert_f64_approx!(0., Organism::new(Variant::Defector).cooperation_probability());
        assert_f64_approx!(
            0.5,
            Organism::new(Variant::PartialCooperator).cooperation_probability()
        );
    }

    #[test]
    fn test_cooperates_fixed() {
        let mut rng = rng_from_seed(1);
        let cooperator = Organism::new(Variant::Cooperator);
        let defector = Organism::new(Variant::Defector);
        for _ in 0..1_000 {
            assert!(cooperator.cooperates(&mut rng));
            assert!(!defector.cooperates(&mut rng));
        }
    }

    #[test]
    fn test_cooperates_partial_deviation() {
        let mut rng = ThreadRng::default();
        let partial = Organism::new(Variant::PartialCooperator);
        let samples = 10_000.;
        let expected = samples * 0.5;
        let max_deviation = 3. * (samples * 0.25_f64).sqrt();

        let strays = (0..10)
            .map(|_| {
                (0..samples as usize)
                    .filter(|_| partial.cooperates(&mut rng))
                    .count() as f64
            })
            .filter(|incidence| (expected - incidence).abs() >= max_deviation)
            .count();
        assert!(strays <= 1, "{strays} batches outside {expected} ± {max_deviation}");
    }

    #[test]
    fn test_unknown_variant() {
        for label in ["Mutant", "cooperator", "", "Partial"] {
            match label.parse::<Variant>() {
                Err(Error::UnknownVariant(l)) => assert_eq!(label, l),
                other => panic!("{label:?} parsed as {other:?}"),
            }
            assert!(Variant::try_from(label.to_string()).is_err());
        }

        for variant in Variant::ALL {
            assert_eq!(variant, Variant::try_from(variant.label().to_string()).unwrap());
            assert_eq!(variant, Variant::try_from(variant.label()).unwrap());
        }
    }
}
