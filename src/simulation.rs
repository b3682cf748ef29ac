//! Driving a [Population] over many ticks and summarising the outcome.

use crate::{
    organism::Variant,
    population::{Census, Event, Population},
};
use core::fmt;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// When a run should stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// After exactly this many ticks
    Ticks(usize),
    /// Once a single variant makes up the whole population, or after this many ticks
    Fixation(usize),
}

impl Target {
    fn satisfied(&self, population: &Population, tick: usize) -> bool {
        match self {
            Self::Ticks(t) => *t <= tick,
            Self::Fixation(t) => {
                *t <= tick
                    || population
                        .census()
                        .iter()
                        .any(|(_, count)| count == population.len())
            }
        }
    }
}

/// What happened during a single tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickStats {
    pub tick: usize,
    /// Organisms that paid to cooperate
    pub cooperations: usize,
    /// Energy units handed to counterparts
    pub transfers: usize,
    pub reproductions: usize,
    /// Reproductions that displaced an organism of another variant
    pub takeovers: usize,
    pub census: Census,
    pub cooperation_mean: f64,
}

/// Observer called once after every tick
pub trait Hook {
    fn on_tick(&mut self, stats: &TickStats);
}

impl<F: FnMut(&TickStats)> Hook for F {
    fn on_tick(&mut self, stats: &TickStats) {
        self(stats)
    }
}

/// Final census and cooperation mean of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub ticks: usize,
    pub cooperators: usize,
    pub defectors: usize,
    pub partial_cooperators: usize,
    pub reproductions: usize,
    pub cooperation_mean: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "After {} ticks", self.ticks)?;
        writeln!(f, "{:<11} = {}", "Cooperators", self.cooperators)?;
        writeln!(f, "{:<11} = {}", "Defectors", self.defectors)?;
        writeln!(f, "{:<11} = {}", "Partial", self.partial_cooperators)?;
        writeln!(f)?;
        write!(f, "Mean Cooperation Probability = {:?}", self.cooperation_mean)
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    population: Population,
    tick: usize,
    reproductions: usize,
}

impl Simulation {
    pub fn new(population: Population) -> Self {
        Self {
            population,
            tick: 0,
            reproductions: 0,
        }
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Ticks completed so far
    #[inline]
    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickStats {
        let (mut cooperations, mut transfers, mut reproductions, mut takeovers) = (0, 0, 0, 0);
        self.population.update_with(rng, |event| match event {
            Event::Cooperation { recipients, .. } => {
                cooperations += 1;
                transfers += recipients.len();
            }
            Event::Reproduction {
                variant, displaced, ..
            } => {
                reproductions += 1;
                if variant != displaced {
                    takeovers += 1;
                }
            }
        });

        self.tick += 1;
        self.reproductions += reproductions;

        let stats = TickStats {
            tick: self.tick,
            cooperations,
            transfers,
            reproductions,
            takeovers,
            census: self.population.census().clone(),
            cooperation_mean: self.population.cooperation_mean(),
        };
        debug!(
            tick = stats.tick,
            cooperations,
            reproductions,
            takeovers,
            mean = stats.cooperation_mean,
            "tick complete"
        );
        stats
    }

    pub fn run<R: Rng + ?Sized>(&mut self, ticks: usize, rng: &mut R) -> Summary {
        self.run_until(Target::Ticks(self.tick + ticks), rng, |_: &TickStats| ())
    }

    pub fn run_with<R: Rng + ?Sized>(
        &mut self,
        ticks: usize,
        rng: &mut R,
        hook: impl Hook,
    ) -> Summary {
        self.run_until(Target::Ticks(self.tick + ticks), rng, hook)
    }

    /// Step until `target` holds, counting ticks from the creation of this simulation
    pub fn run_until<R: Rng + ?Sized>(
        &mut self,
        target: Target,
        rng: &mut R,
        mut hook: impl Hook,
    ) -> Summary {
        while !target.satisfied(&self.population, self.tick) {
            let stats = self.step(rng);
            hook.on_tick(&stats);
        }
        self.summary()
    }

    pub fn summary(&self) -> Summary {
        let census = self.population.census();
        Summary {
            ticks: self.tick,
            cooperators: census.get(Variant::Cooperator),
            defectors: census.get(Variant::Defector),
            partial_cooperators: census.get(Variant::PartialCooperator),
            reproductions: self.reproductions,
            cooperation_mean: self.population.cooperation_mean(),
        }
    }
}
