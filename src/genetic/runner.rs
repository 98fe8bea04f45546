use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use super::{Candidate, GeneticConfig, Offspring, Population};
use crate::errors::PathPlannerError;
use crate::graph::{ConnectionId, LocationId, MapGraph};


/// One reweighting of a connection in the middle of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RandomEvent {
    pub generation: usize,
    pub connection: ConnectionId,
    pub old_weight: f64,
    pub new_weight: f64,
    /// Candidates whose cost was adjusted
    pub affected: usize,
}

/// Outcome of an evolutionary run
#[derive(Debug, Clone)]
pub struct GeneticResult {
    /// Best route found, from start to goal
    pub path: Vec<LocationId>,

    /// Tracked cost of `path`, penalties included.
    pub cost: f64,

    /// Generations actually executed.
    pub generations: usize,

    /// Whether the run was stopped through the cancel flag.
    pub cancelled: bool,

    /// Random events in the order they happened.
    pub events: Vec<RandomEvent>,

    /// Best cost at the end of each generation.
    pub cost_history: Vec<f64>,
}


/// Population based route search
///
/// The graph is borrowed mutably: random events rewrite connection weights
/// and those changes outlive the run.
#[derive(Debug, Clone, Default)]
pub struct GeneticSearch {
    config: GeneticConfig,
}

impl GeneticSearch {

    pub fn new(config: GeneticConfig) -> Result<Self, PathPlannerError> {
        config.validate().map_err(PathPlannerError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Best route found after all generations
    pub fn find(&self, graph: &mut MapGraph, start: LocationId, goal: LocationId) -> Result<Vec<LocationId>, PathPlannerError> {
        self.run(graph, start, goal).map(|result| result.path)
    }

    pub fn run(&self, graph: &mut MapGraph, start: LocationId, goal: LocationId) -> Result<GeneticResult, PathPlannerError> {
        self.run_with_cancel(graph, start, goal, None)
    }

    /// Runs with an optional cancellation flag
    ///
    /// The flag is checked before each generation, a cancelled run returns the
    /// best candidate found so far.
    pub fn run_with_cancel(
        &self,
        graph: &mut MapGraph,
        start: LocationId,
        goal: LocationId,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GeneticResult, PathPlannerError> {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(graph, start, goal, rng, cancel)
    }

    /// Runs with a caller supplied generator, every random draw of the run comes from it
    #[instrument(level = "debug", skip(self, graph, rng, cancel))]
    pub fn run_with_rng<R: Rng>(
        &self,
        graph: &mut MapGraph,
        start: LocationId,
        goal: LocationId,
        rng: R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GeneticResult, PathPlannerError> {
        let mut evolution = Evolution::new(graph, start, goal, &self.config, rng)?;
        let mut cost_history = Vec::with_capacity(self.config.generations);
        let mut cancelled = false;

        for generation in 0..self.config.generations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }

            evolution.step(generation)?;

            let best_cost = evolution.best().map_or(f64::INFINITY, Candidate::cost);
            cost_history.push(best_cost);
            debug!(generation, best_cost, population = evolution.population().len(), "generation done");
        }

        let events = evolution.events().to_vec();
        let target_size = evolution.target_size();
        let best = evolution
            .into_best()
            .ok_or(PathPlannerError::PopulationTooSmall { size: target_size })?;

        info!(
            cost = best.cost(),
            generations = cost_history.len(),
            events = events.len(),
            cancelled,
            "evolutionary search finished"
        );

        Ok(GeneticResult {
            cost: best.cost(),
            path: best.into_path(),
            generations: cost_history.len(),
            cancelled,
            events,
            cost_history,
        })
    }
}


/// State of one evolutionary run
pub struct Evolution<'a, R: Rng> {
    graph: &'a mut MapGraph,
    config: &'a GeneticConfig,
    rng: R,
    start: LocationId,
    goal: LocationId,
    target_size: usize,
    population: Population,
    events: Vec<RandomEvent>,
}

impl<'a, R: Rng> Evolution<'a, R> {

    /// Validate the config and endpoints, then fill the initial population with random walks
    pub fn new(
        graph: &'a mut MapGraph,
        start: LocationId,
        goal: LocationId,
        config: &'a GeneticConfig,
        rng: R,
    ) -> Result<Self, PathPlannerError> {
        config.validate().map_err(PathPlannerError::InvalidConfig)?;
        for id in [start, goal] {
            if graph.location(id).is_none() {
                return Err(PathPlannerError::UnknownLocation(format!("{id:?}")));
            }
        }
        let target_size = config.population_size(graph.location_count());
        if target_size < 2 {
            return Err(PathPlannerError::PopulationTooSmall { size: target_size });
        }

        let mut evolution = Self {
            graph,
            config,
            rng,
            start,
            goal,
            target_size,
            population: Population::new(),
            events: Vec::new(),
        };
        evolution.refill();
        Ok(evolution)
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn graph(&self) -> &MapGraph {
        &*self.graph
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn events(&self) -> &[RandomEvent] {
        &self.events
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.population.peek()
    }

    pub fn into_best(mut self) -> Option<Candidate> {
        self.population.pop()
    }

    /// One generation: a random event when due, then a single evolve pass
    pub fn step(&mut self, generation: usize) -> Result<(), PathPlannerError> {
        let interval = self.config.event_interval;
        if interval > 0 && generation > 0 && generation % interval == 0 {
            self.random_event(generation)?;
        }
        self.evolve();
        Ok(())
    }

    /// Selection and crossover, then mutation, then regeneration
    pub fn evolve(&mut self) {
        self.crossover();
        self.mutate_population();
        self.regenerate_population();
    }

    /// Reweight one random connection and carry the change over to every
    /// candidate that walks it
    pub fn random_event(&mut self, generation: usize) -> Result<Option<RandomEvent>, PathPlannerError> {
        let count = self.graph.connection_count();
        if count == 0 {
            warn!(generation, "random event skipped, graph has no connections");
            return Ok(None);
        }

        let pick = self.rng.random_range(0..count);
        let Some((connection, (u, v))) = self
            .graph
            .connections()
            .nth(pick)
            .map(|(id, c)| (id, c.endpoints()))
        else {
            return Ok(None);
        };

        let new_weight = self.rng.random_range(0.0..self.config.event_max_weight);
        let old_weight = self.graph.set_weight(connection, new_weight)?;
        let affected = self
            .population
            .adjust_costs(|c| c.contains_connection(u, v), new_weight - old_weight);

        info!(generation, connection = connection.index(), old_weight, new_weight, affected, "random event");

        let event = RandomEvent {
            generation,
            connection,
            old_weight,
            new_weight,
            affected,
        };
        self.events.push(event.clone());
        Ok(Some(event))
    }

    /// Breed the two best candidates and two random leftovers
    ///
    /// The cheapest `tournament_size` of the four children and the first
    /// leftovers join the population next to every parent and leftover,
    /// so the population grows past its target until regeneration.
    pub fn crossover(&mut self) {
        let Some(best1) = self.population.pop() else {
            return;
        };
        let Some(best2) = self.population.pop() else {
            self.population.push(best1);
            return;
        };
        let mut leftovers = self.population.drain_sorted();

        let randoms = if leftovers.len() >= 2 {
            let picks = index::sample(&mut self.rng, leftovers.len(), 2);
            let (first, second) = (picks.index(0), picks.index(1));
            // remove the higher index first so the lower one stays valid
            let (high, low) = if first > second { (first, second) } else { (second, first) };
            let high_pick = leftovers.remove(high);
            let low_pick = leftovers.remove(low);
            Some(if first > second { (high_pick, low_pick) } else { (low_pick, high_pick) })
        } else {
            None
        };

        let seam = self.config.seam_penalty;
        let tournament = self.config.tournament_size;

        let mut pool: Population = Offspring::breed(&best1, &best2, &*self.graph, seam, &mut self.rng)
            .into_children()
            .into_iter()
            .collect();
        if let Some((rand1, rand2)) = &randoms {
            pool.extend(Offspring::breed(rand1, rand2, &*self.graph, seam, &mut self.rng).into_children());
        }
        pool.extend(leftovers.iter().take(tournament).cloned());

        self.population.extend(pool.take_best(tournament));
        self.population.push(best1);
        self.population.push(best2);
        if let Some((rand1, rand2)) = randoms {
            self.population.push(rand1);
            self.population.push(rand2);
        }
        self.population.extend(leftovers);
    }

    /// Mutate a few of the `target_size` best candidates, never the very best one
    pub fn mutate_population(&mut self) {
        let mut ranked = self.population.take_best(self.target_size);
        if ranked.is_empty() {
            return;
        }
        self.population.push(ranked.remove(0));

        let count = (self.target_size - 1) / self.config.mutation_divisor;
        for _ in 0..count {
            if ranked.is_empty() {
                break;
            }
            let pick = self.rng.random_range(0..ranked.len());
            let mut candidate = ranked.swap_remove(pick);
            let delta = candidate.mutate(&*self.graph, &mut self.rng);
            if delta != 0.0 {
                candidate.add_cost(delta);
            }
            self.population.push(candidate);
        }
        self.population.extend(ranked);
    }

    /// Keep the elite, replace everyone else with fresh random walks
    pub fn regenerate_population(&mut self) {
        let elite_count = (self.population.len() / self.config.elite_divisor).min(self.target_size);
        let elite = self.population.take_best(elite_count);
        self.population.clear();
        self.population.extend(elite);
        self.refill();
    }

    fn refill(&mut self) {
        while self.population.len() < self.target_size {
            let candidate = Candidate::random(
                &*self.graph,
                self.start,
                self.goal,
                self.config.dead_end_penalty,
                &mut self.rng,
            );
            self.population.push(candidate);
        }
    }
}
