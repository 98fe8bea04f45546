use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::Candidate;


/// Heap entry ordering candidates so the lowest cost pops first
#[derive(Debug)]
struct Ranked(Candidate);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cost().total_cmp(&self.0.cost())
    }
}
impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Ranked {}


/// Priority collection of candidates, cheapest first
#[derive(Debug, Default)]
pub struct Population {
    heap: BinaryHeap<Ranked>,
}

impl Population {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.heap.push(Ranked(candidate));
    }

    /// Remove and return the cheapest candidate
    pub fn pop(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|Ranked(c)| c)
    }

    pub fn peek(&self) -> Option<&Candidate> {
        self.heap.peek().map(|Ranked(c)| c)
    }

    /// Pop up to `n` candidates, cheapest first
    pub fn take_best(&mut self, n: usize) -> Vec<Candidate> {
        let mut best = Vec::with_capacity(n.min(self.len()));
        while best.len() < n {
            match self.pop() {
                Some(candidate) => best.push(candidate),
                None => break,
            }
        }
        best
    }

    /// Empty the population, cheapest first
    pub fn drain_sorted(&mut self) -> Vec<Candidate> {
        let n = self.len();
        self.take_best(n)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Add `delta` to the cost of every candidate matching `pred`, returning how many changed
    pub fn adjust_costs<P>(&mut self, pred: P, delta: f64) -> usize
    where
        P: Fn(&Candidate) -> bool,
    {
        let mut entries = std::mem::take(&mut self.heap).into_vec();
        let mut changed = 0;
        for Ranked(candidate) in entries.iter_mut() {
            if pred(&*candidate) {
                candidate.add_cost(delta);
                changed += 1;
            }
        }
        self.heap = BinaryHeap::from(entries);
        changed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.heap.iter().map(|Ranked(c)| c)
    }
}

impl Extend<Candidate> for Population {
    fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
        self.heap.extend(iter.into_iter().map(Ranked));
    }
}

impl FromIterator<Candidate> for Population {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut population = Population::new();
        population.extend(iter);
        population
    }
}
