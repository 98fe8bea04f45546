mod loader;
mod location;

pub use location::Location;

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::GraphError;


/// Dense index of a location inside its MapGraph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(usize);

impl LocationId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dense index of a connection inside its MapGraph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(usize);

impl ConnectionId {
    pub fn index(self) -> usize {
        self.0
    }
}


/// Undirected weighted edge between two distinct locations
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    a: LocationId,
    b: LocationId,
    weight: f64,
}

impl Connection {

    pub fn endpoints(&self) -> (LocationId, LocationId) {
        (self.a, self.b)
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// True if this connection joins `u` and `v`, in either order
    pub fn joins(&self, u: LocationId, v: LocationId) -> bool {
        (self.a == u && self.b == v) || (self.a == v && self.b == u)
    }
}


/// Undirected weighted graph of map locations
/// Locations and connections are append only, only weights may change afterwards.
#[derive(Clone, Debug, Default)]
pub struct MapGraph {
    locations: FxIndexSet<Location>,
    names: FxIndexMap<String, LocationId>,
    connections: Vec<Connection>,
    // neighbor -> connection, one map per location
    adjacency: Vec<FxIndexMap<LocationId, ConnectionId>>,
}

impl MapGraph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location, names must be unique within the graph
    pub fn add_location(&mut self, location: Location) -> Result<LocationId, GraphError> {
        if self.names.contains_key(location.name()) {
            return Err(GraphError::DuplicateLocation(location.name().to_string()));
        }
        let id = LocationId(self.locations.len());
        self.names.insert(location.name().to_string(), id);
        self.locations.insert(location);
        self.adjacency.push(FxIndexMap::default());
        Ok(id)
    }

    /// Connect two existing locations
    /// Self loops, parallel connections and negative or non-finite weights are rejected.
    pub fn add_connection(&mut self, a: LocationId, b: LocationId, weight: f64) -> Result<ConnectionId, GraphError> {
        let name_a = self.location(a).ok_or(GraphError::UnknownLocation(a.0))?.name();
        let name_b = self.location(b).ok_or(GraphError::UnknownLocation(b.0))?.name();
        if a == b {
            return Err(GraphError::SelfLoop(name_a.to_string()));
        }
        if self.adjacency[a.0].contains_key(&b) {
            return Err(GraphError::DuplicateConnection(name_a.to_string(), name_b.to_string()));
        }
        check_weight(weight)?;

        let id = ConnectionId(self.connections.len());
        self.connections.push(Connection { a, b, weight });
        self.adjacency[a.0].insert(b, id);
        self.adjacency[b.0].insert(a, id);
        Ok(id)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get_index(id.0)
    }

    /// Look up the id of a location by identity
    pub fn location_id(&self, location: &Location) -> Option<LocationId> {
        self.locations.get_index_of(location).map(LocationId)
    }

    pub fn location_by_name(&self, name: &str) -> Option<LocationId> {
        self.names.get(name).copied()
    }

    pub fn locations(&self) -> impl Iterator<Item = (LocationId, &Location)> + '_ {
        self.locations.iter().enumerate().map(|(i, l)| (LocationId(i), l))
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0)
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> + '_ {
        self.connections.iter().enumerate().map(|(i, c)| (ConnectionId(i), c))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Neighbors of a location in insertion order, empty for unknown ids
    pub fn neighbors_of(&self, id: LocationId) -> impl Iterator<Item = LocationId> + '_ {
        self.adjacency.get(id.0).into_iter().flat_map(|m| m.keys().copied())
    }

    /// Neighbors along with the weight of the connection leading to each of them
    pub fn weighted_neighbors(&self, id: LocationId) -> impl Iterator<Item = (LocationId, f64)> + '_ {
        self.adjacency
            .get(id.0)
            .into_iter()
            .flat_map(move |m| m.iter().map(move |(n, c)| (*n, self.connections[c.0].weight)))
    }

    pub fn are_connected(&self, a: LocationId, b: LocationId) -> bool {
        self.connection_between(a, b).is_some()
    }

    pub fn connection_between(&self, a: LocationId, b: LocationId) -> Option<ConnectionId> {
        self.adjacency.get(a.0)?.get(&b).copied()
    }

    pub fn weight_of(&self, id: ConnectionId) -> Result<f64, GraphError> {
        self.connection(id)
            .map(Connection::weight)
            .ok_or(GraphError::UnknownConnection(id.0))
    }

    /// Weight of the connection between `a` and `b`, if there is one
    pub fn weight_between(&self, a: LocationId, b: LocationId) -> Option<f64> {
        self.connection_between(a, b).map(|c| self.connections[c.0].weight)
    }

    /// Replace a connection weight, returning the previous one
    /// Nothing derived from the old weight is recomputed here.
    pub fn set_weight(&mut self, id: ConnectionId, weight: f64) -> Result<f64, GraphError> {
        check_weight(weight)?;
        let connection = self
            .connections
            .get_mut(id.0)
            .ok_or(GraphError::UnknownConnection(id.0))?;
        Ok(std::mem::replace(&mut connection.weight, weight))
    }

    /// Sum of the weights along a path
    /// Returns None if two consecutive locations are not connected.
    pub fn path_cost(&self, path: &[LocationId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.weight_between(pair[0], pair[1]))
            .sum()
    }

    /// Map ids back to locations, unknown ids are an error
    pub fn resolve(&self, path: &[LocationId]) -> Result<Vec<Location>, GraphError> {
        path.iter()
            .map(|id| self.location(*id).cloned().ok_or(GraphError::UnknownLocation(id.0)))
            .collect()
    }
}

fn check_weight(weight: f64) -> Result<(), GraphError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidWeight(weight))
    }
}
