use rand::Rng;

use super::Candidate;
use crate::graph::{LocationId, MapGraph};


/// Children of one single-point crossover between two routes
#[derive(Clone, Debug, PartialEq)]
pub struct Offspring {
    pub first: Candidate,
    pub second: Candidate,
}

impl Offspring {

    /// Splice two parents at a location they share
    ///
    /// Shared locations are looked up strictly inside both paths (never the endpoints).
    /// With pivot positions `i` in `mother` and `j` in `father`:
    /// - first  = mother[..i] + father[j..]
    /// - second = father[..j] + mother[i..]
    ///
    /// Child costs are recomputed from the graph, any consecutive pair without a
    /// connection costs `seam_penalty`. Parents without a shared location are
    /// returned unchanged.
    pub fn breed<R: Rng>(
        mother: &Candidate,
        father: &Candidate,
        graph: &MapGraph,
        seam_penalty: f64,
        rng: &mut R,
    ) -> Self {
        let common = common_positions(mother.path(), father.path());
        if common.is_empty() {
            return Self {
                first: mother.clone(),
                second: father.clone(),
            };
        }

        let (i, j) = common[rng.random_range(0..common.len())];
        Self::splice_at(mother, father, i, j, graph, seam_penalty)
    }

    /// Splice at known pivot positions, both must be within their parent's path
    pub(crate) fn splice_at(
        mother: &Candidate,
        father: &Candidate,
        i: usize,
        j: usize,
        graph: &MapGraph,
        seam_penalty: f64,
    ) -> Self {
        let (m, f) = (mother.path(), father.path());
        let first: Vec<LocationId> = m[..i].iter().chain(&f[j..]).copied().collect();
        let second: Vec<LocationId> = f[..j].iter().chain(&m[i..]).copied().collect();

        Self {
            first: priced(first, graph, seam_penalty),
            second: priced(second, graph, seam_penalty),
        }
    }

    pub fn into_children(self) -> [Candidate; 2] {
        [self.first, self.second]
    }
}

/// Every (i, j) with `mother[i] == father[j]`, both strictly interior
fn common_positions(mother: &[LocationId], father: &[LocationId]) -> Vec<(usize, usize)> {
    if mother.len() < 3 || father.len() < 3 {
        return Vec::new();
    }
    let mut common = Vec::new();
    for (i, location) in mother.iter().enumerate().take(mother.len() - 1).skip(1) {
        for (j, other) in father.iter().enumerate().take(father.len() - 1).skip(1) {
            if location == other {
                common.push((i, j));
            }
        }
    }
    common
}

fn priced(path: Vec<LocationId>, graph: &MapGraph, seam_penalty: f64) -> Candidate {
    let cost = path
        .windows(2)
        .map(|pair| graph.weight_between(pair[0], pair[1]).unwrap_or(seam_penalty))
        .sum();
    Candidate::new(path, cost)
}
