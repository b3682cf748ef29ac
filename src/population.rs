//! A fixed-size population of [Organism]s and the tick that drives it.

use crate::{
    error::{Error, Result},
    organism::{Organism, Variant},
    rules::Rules,
};
use core::{iter::repeat_n, mem};
use fxhash::FxHashMap;
use rand::{
    seq::{index::sample, SliceRandom},
    Rng,
};
use serde::{ser::SerializeMap, Serialize, Serializer};
use tracing::{debug, trace};

/// Running count of members per [Variant]. Only variants present at construction are keys, a
/// variant that dies out stays with a count of 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census(FxHashMap<Variant, usize>);

impl Census {
    /// Count for `variant`, 0 when it was never part of the population
    #[inline]
    pub fn get(&self, variant: Variant) -> usize {
        self.0.get(&variant).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, variant: Variant) -> bool {
        self.0.contains_key(&variant)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Entries in [Variant::ALL] order
    pub fn iter(&self) -> impl Iterator<Item = (Variant, usize)> + '_ {
        Variant::ALL
            .into_iter()
            .filter_map(|v| self.0.get(&v).map(|n| (v, *n)))
    }

    fn add(&mut self, variant: Variant, count: usize) {
        *self.0.entry(variant).or_insert(0) += count;
    }

    /// One member of `displaced` became one member of `parent`
    fn replace(&mut self, displaced: Variant, parent: Variant) {
        if let Some(n) = self.0.get_mut(&displaced) {
            *n -= 1;
        }
        self.add(parent, 1);
    }
}

impl Serialize for Census {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (variant, count) in self.iter() {
            map.serialize_entry(variant.label(), &count)?;
        }
        map.end()
    }
}

/// Something that happened to the population during [Population::update_with]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// `donor` paid to give one unit of energy to each of `recipients`
    Cooperation {
        donor: usize,
        recipients: &'a [usize],
    },
    /// The organism at `parent` reproduced, overwriting the member at `target`
    Reproduction {
        parent: usize,
        target: usize,
        variant: Variant,
        displaced: Variant,
    },
}

/// Uniform draw from `0..size` that never lands on `skip`, `size` must be at least 2
#[inline]
fn index_excluding<R: Rng + ?Sized>(rng: &mut R, size: usize, skip: usize) -> usize {
    let idx = rng.random_range(0..size - 1);
    if idx >= skip {
        idx + 1
    } else {
        idx
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Organism>,
    census: Census,
    rules: Rules,
}

impl Population {
    /// Build a population from `(variant, count)` pairs under the default [Rules]. Labels may be
    /// given as strings, and every label is checked before any organism is created.
    pub fn new<K, R>(composition: impl IntoIterator<Item = (K, usize)>, rng: &mut R) -> Result<Self>
    where
        K: TryInto<Variant>,
        Error: From<K::Error>,
        R: Rng + ?Sized,
    {
        Self::with_rules(composition, Rules::default(), rng)
    }

    pub fn with_rules<K, R>(
        composition: impl IntoIterator<Item = (K, usize)>,
        rules: Rules,
        rng: &mut R,
    ) -> Result<Self>
    where
        K: TryInto<Variant>,
        Error: From<K::Error>,
        R: Rng + ?Sized,
    {
        let rules = rules.validate()?;
        let composition = composition
            .into_iter()
            .map(|(k, count)| -> Result<(Variant, usize)> { Ok((k.try_into()?, count)) })
            .collect::<Result<Vec<_>>>()?;

        let mut census = Census::default();
        let mut members = Vec::with_capacity(composition.iter().map(|(_, n)| n).sum());
        for (variant, count) in composition.into_iter().filter(|(_, n)| *n > 0) {
            census.add(variant, count);
            members.extend(repeat_n(Organism::new(variant), count));
        }

        if members.is_empty() {
            return Err(Error::EmptyPopulation);
        }

        // construction groups variants together, which would hand the first variant first
        // pick every tick
        members.shuffle(rng);

        debug!(size = members.len(), ?census, ?rules, "population initialised");
        Ok(Self {
            members,
            census,
            rules,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn members(&self) -> &[Organism] {
        &self.members
    }

    #[inline]
    pub fn census(&self) -> &Census {
        &self.census
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Run one tick
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.update_with(rng, |_| ());
    }

    /// Run one tick, reporting each cooperation and reproduction to `hook` as it happens.
    ///
    /// Members are visited in index order. An offspring written to an index that has not been
    /// visited yet is the organism that gets visited there, in this same tick.
    pub fn update_with<R, H>(&mut self, rng: &mut R, mut hook: H)
    where
        R: Rng + ?Sized,
        H: FnMut(Event<'_>),
    {
        let size = self.members.len();
        let counterparts = self.rules.counterparts(size);
        let mut recipients = Vec::with_capacity(counterparts);

        for idx in 0..size {
            for _ in 0..self.rules.passive_gain {
                self.members[idx].update();
            }

            if size > 1 && self.members[idx].cooperates(rng) {
                // floored at zero, so stop once drained
                for _ in 0..self.rules.cooperation_cost {
                    if self.members[idx].energy() == 0 {
                        break;
                    }
                    self.members[idx].decrement_energy();
                }

                recipients.clear();
                recipients.extend(
                    sample(rng, size - 1, counterparts)
                        .into_iter()
                        .map(|r| if r >= idx { r + 1 } else { r }),
                );
                for &r in recipients.iter() {
                    self.members[r].increment_energy();
                }

                hook(Event::Cooperation {
                    donor: idx,
                    recipients: &recipients,
                });
            }

            if self.members[idx].energy() >= self.rules.reproduction_threshold {
                let target = if size == 1 {
                    idx
                } else {
                    index_excluding(rng, size, idx)
                };

                let variant = self.members[idx].variant();
                let offspring = self.members[idx].reproduce();
                let displaced = mem::replace(&mut self.members[target], offspring).variant();
                self.census.replace(displaced, variant);

                trace!(parent = idx, target, %variant, %displaced, "reproduced");
                hook(Event::Reproduction {
                    parent: idx,
                    target,
                    variant,
                    displaced,
                });
            }
        }
    }

    /// Mean cooperation probability over the census
    pub fn cooperation_mean(&self) -> f64 {
        let sum = self.census.iter().fold(0., |acc, (variant, count)| {
            acc + count as f64 * variant.cooperation_probability()
        });
        sum / self.len() as f64
    }

    #[cfg(test)]
    fn from_members(members: Vec<Organism>, rules: Rules) -> Self {
        let mut census = Census::default();
        for member in members.iter() {
            census.add(member.variant(), 1);
        }
        Self {
            members,
            census,
            rules,
        }
    }
}
