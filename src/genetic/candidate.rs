use rand::Rng;
use rand::seq::IteratorRandom;
use rustc_hash::FxHashSet;

use crate::graph::{LocationId, MapGraph};


/// One concrete route from start to goal (both inclusive) and its cost
///
/// Unless penalized, every consecutive pair of the path is a connection of the graph.
/// The cost is tracked incrementally, so it only equals the sum of the path's weights
/// as long as callers propagate weight changes to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    path: Vec<LocationId>,
    cost: f64,
}

impl Candidate {

    pub fn new(path: Vec<LocationId>, cost: f64) -> Self {
        Self { path, cost }
    }

    /// Random walk from `start` to `goal`
    ///
    /// Each step picks uniformly among the neighbors not visited yet by this walk.
    /// When the walk is stuck it jumps straight to the goal and `dead_end_penalty`
    /// is added to the cost.
    pub fn random<R: Rng>(
        graph: &MapGraph,
        start: LocationId,
        goal: LocationId,
        dead_end_penalty: f64,
        rng: &mut R,
    ) -> Self {
        let mut path = vec![start];
        let mut visited: FxHashSet<LocationId> = FxHashSet::default();
        visited.insert(start);
        let mut cost = 0.0;
        let mut current = start;

        while current != goal {
            let next = graph
                .weighted_neighbors(current)
                .filter(|(neighbor, _)| !visited.contains(neighbor))
                .choose(rng);

            match next {
                Some((neighbor, weight)) => {
                    cost += weight;
                    current = neighbor;
                }
                None => {
                    cost += dead_end_penalty;
                    current = goal;
                }
            }
            visited.insert(current);
            path.push(current);
        }

        Self { path, cost }
    }

    pub fn path(&self) -> &[LocationId] {
        &self.path
    }

    pub fn into_path(self) -> Vec<LocationId> {
        self.path
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn add_cost(&mut self, delta: f64) {
        self.cost += delta;
    }

    pub fn start(&self) -> Option<LocationId> {
        self.path.first().copied()
    }

    pub fn goal(&self) -> Option<LocationId> {
        self.path.last().copied()
    }

    /// True if `u` and `v` follow each other somewhere on the path, in either order
    pub fn contains_connection(&self, u: LocationId, v: LocationId) -> bool {
        self.path
            .windows(2)
            .any(|pair| (pair[0] == u && pair[1] == v) || (pair[0] == v && pair[1] == u))
    }

    /// Swap one interior location for another one joining the same neighbors
    ///
    /// Picks a random interior position `i` and replaces `path[i]` with the first
    /// neighbor of `path[i-1]` (other than `path[i]`) that is also a neighbor of `path[i+1]`.
    /// Returns the cost delta and leaves the cost itself untouched, applying it is up to the caller.
    /// The old `path[i] -> path[i+1]` weight is only subtracted when `path[i+1]` is not the goal.
    /// Weights of missing connections count as zero.
    pub fn mutate<R: Rng>(&mut self, graph: &MapGraph, rng: &mut R) -> f64 {
        let len = self.path.len();
        if len <= 2 {
            return 0.0;
        }

        let i = rng.random_range(1..len - 1);
        let parent = self.path[i - 1];
        let mutated = self.path[i];
        let child = self.path[i + 1];
        let goal = self.path[len - 1];

        let Some(replacement) = graph
            .neighbors_of(parent)
            .find(|n| *n != mutated && graph.are_connected(*n, child))
        else {
            return 0.0;
        };

        let weight = |a: LocationId, b: LocationId| graph.weight_between(a, b).unwrap_or(0.0);
        let mut delta = weight(parent, replacement) + weight(replacement, child) - weight(parent, mutated);
        if child != goal {
            delta -= weight(mutated, child);
        }

        self.path[i] = replacement;
        delta
    }
}
