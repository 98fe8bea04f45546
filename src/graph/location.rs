use std::fmt;
use std::hash::{Hash, Hasher};

use crate::geometry::Point;


/// Named point on the map
/// Identity is (name, x, y) and never changes once created.
/// Search bookkeeping is kept by the searches themselves, not here.
#[derive(Clone, Debug)]
pub struct Location {
    name: String,
    position: Point,
}

impl Location {

    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            position: Point::new(unsigned_zero(x), unsigned_zero(y)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Straight line distance to the goal, used as the A* heuristic
    pub fn heuristic(&self, goal: &Location) -> f64 {
        self.position.distance_to(&goal.position)
    }
}

// -0.0 and 0.0 are the same coordinate, keep one bit pattern for them
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

// Coordinates compare bitwise so Eq and Hash agree
impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.position.x.to_bits() == other.position.x.to_bits()
            && self.position.y.to_bits() == other.position.y.to_bits()
    }
}
impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.position.x.to_bits().hash(state);
        self.position.y.to_bits().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.position.x, self.position.y)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_identity_is_name_and_coordinates() {
        let a = Location::new("A", 1.0, 2.0);
        assert_eq!(a, Location::new("A", 1.0, 2.0));
        assert_ne!(a, Location::new("A", 1.0, 2.5));
        assert_ne!(a, Location::new("B", 1.0, 2.0));

        let mut set = FxHashSet::default();
        set.insert(a.clone());
        assert!(set.contains(&Location::new("A", 1.0, 2.0)));
        assert!(!set.insert(a));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let a = Location::new("A", -0.0, 0.0);
        assert_eq!(a, Location::new("A", 0.0, -0.0));
        assert!(a.x().is_sign_positive());

        let mut set = FxHashSet::default();
        set.insert(a);
        assert!(set.contains(&Location::new("A", 0.0, 0.0)));
    }

    #[test]
    fn test_heuristic_is_euclidean() {
        let a = Location::new("A", 0.0, 0.0);
        let goal = Location::new("G", 6.0, 8.0);
        assert_eq!(a.heuristic(&goal), 10.0);
        assert_eq!(goal.heuristic(&goal), 0.0);
    }
}
