//! Tunable rules of the game. Defaults come from [crate::constants].

use crate::{
    constants::{
        ALIFE_COOPERATION_COST, ALIFE_COOPERATION_FAN_OUT, ALIFE_PASSIVE_GAIN,
        ALIFE_REPRODUCTION_THRESHOLD,
    },
    error::{Error, Result},
    serde_traits::Deserialize as _,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Energy every organism gains at the start of its turn, in unit steps
    pub passive_gain: u32,
    /// Energy at or above which an organism reproduces
    pub reproduction_threshold: u32,
    /// Most distinct counterparts one cooperation can benefit
    pub fan_out: usize,
    /// Energy the cooperating organism pays, in unit steps floored at zero
    pub cooperation_cost: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            passive_gain: ALIFE_PASSIVE_GAIN,
            reproduction_threshold: ALIFE_REPRODUCTION_THRESHOLD,
            fan_out: ALIFE_COOPERATION_FAN_OUT,
            cooperation_cost: ALIFE_COOPERATION_COST,
        }
    }
}

impl Rules {
    pub fn validate(self) -> Result<Self> {
        if self.reproduction_threshold == 0 {
            return Err(Error::InvalidRules("reproduction_threshold must be at least 1"));
        }
        if self.fan_out == 0 {
            return Err(Error::InvalidRules("fan_out must be at least 1"));
        }
        if self.passive_gain > self.reproduction_threshold {
            return Err(Error::InvalidRules(
                "passive_gain must not exceed reproduction_threshold",
            ));
        }
        Ok(self)
    }

    /// Load rules from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file(path)?.validate()
    }

    /// Number of counterparts a cooperating organism benefits in a population of `size`
    #[inline]
    pub fn counterparts(&self, size: usize) -> usize {
        size.saturating_sub(1).min(self.fan_out)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        new_t,
        serde_traits::{Deserialize as _, Serialize as _},
    };

    #[test]
    fn test_defaults() {
        let rules = Rules::default();
        assert_eq!(10, rules.reproduction_threshold);
        assert_eq!(8, rules.fan_out);
        assert_eq!(1, rules.cooperation_cost);
        assert_eq!(1, rules.passive_gain);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_counterparts() {
        let rules = Rules::default();
        assert_eq!(0, rules.counterparts(1));
        assert_eq!(1, rules.counterparts(2));
        assert_eq!(7, rules.counterparts(8));
        assert_eq!(8, rules.counterparts(9));
        assert_eq!(8, rules.counterparts(10));
        assert_eq!(8, rules.counterparts(10_000));

        let rules = new_t!(Rules, fan_out = 3);
        assert_eq!(2, rules.counterparts(3));
        assert_eq!(3, rules.counterparts(9));
    }

    #[test]
    fn test_partial_json() {
        let rules = Rules::from_json(r#"{"fan_out": 4}"#).unwrap();
        assert_eq!(new_t!(Rules, fan_out = 4), rules);

        let rules = Rules::from_json(r#"{"passive_gain": 2}"#).unwrap();
        assert_eq!(new_t!(Rules, passive_gain = 2), rules);

        assert!(Rules::from_json(r#"{"fan_out": 4, "mutation": 1}"#).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            new_t!(Rules, reproduction_threshold = 0).validate(),
            Err(Error::InvalidRules(_))
        ));
        assert!(matches!(
            new_t!(Rules, fan_out = 0).validate(),
            Err(Error::InvalidRules(_))
        ));
        assert!(matches!(
            new_t!(Rules, passive_gain = 11).validate(),
            Err(Error::InvalidRules(_))
        ));
        assert!(new_t!(Rules, passive_gain = 10).validate().is_ok());
        assert!(new_t!(Rules, passive_gain = 0).validate().is_ok());
    }

    #[test]
    fn test_load() {
        let path = std::env::temp_dir().join(format!("alife-rules-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"reproduction_threshold": 4, "cooperation_cost": 2, "passive_gain": 3}"#).unwrap();
        let rules = Rules::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            new_t!(
                Rules,
                reproduction_threshold = 4,
                cooperation_cost = 2,
                passive_gain = 3
            ),
            rules
        );
        assert!(matches!(Rules::load(&path), Err(Error::Io(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("alife-saved-{}.json", std::process::id()));
        let rules = new_t!(Rules, fan_out = 3, passive_gain = 2);
        rules.to_file(&path).unwrap();
        let loaded = Rules::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rules, loaded.unwrap());
    }
}
