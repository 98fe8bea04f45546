use mapnav::genetic::{Candidate, Offspring};
use mapnav::{
    a_star, evolutionary_search, load_graph, AStar, GeneticConfig, GraphError, Location, MapGraph,
    PathPlannerError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const DIAMOND: &str = "\
VERTICES
A;0;0
B;1;0
C;0;1
D;1;1
E;8;8

EDGES
A;B;1
B;D;1
A;C;5
C;D;1
";

fn location(graph: &MapGraph, name: &str) -> Location {
    let id = graph.location_by_name(name).unwrap();
    graph.location(id).unwrap().clone()
}

fn names(route: &[Location]) -> Vec<&str> {
    route.iter().map(Location::name).collect()
}

#[test]
fn a_star_takes_the_cheap_side_of_the_diamond() {
    let graph = load_graph(DIAMOND).unwrap();
    let route = a_star(&location(&graph, "A"), &location(&graph, "D"), &graph).unwrap();
    assert_eq!(names(&route), ["A", "B", "D"]);

    let ids: Vec<_> = route.iter().map(|l| graph.location_id(l).unwrap()).collect();
    assert_eq!(graph.path_cost(&ids), Some(2.0));
}

#[test]
fn a_star_to_isolated_location_returns_only_the_goal() {
    let graph = load_graph(DIAMOND).unwrap();
    let start = location(&graph, "A");
    let route = a_star(&start, &location(&graph, "E"), &graph).unwrap();
    assert_eq!(names(&route), ["E"]);
    assert_ne!(route.first(), Some(&start));
}

#[test]
fn a_star_rejects_locations_outside_the_graph() {
    let graph = load_graph(DIAMOND).unwrap();
    let stranger = Location::new("A", 0.5, 0.0);
    let result = a_star(&stranger, &location(&graph, "D"), &graph);
    assert!(matches!(result, Err(PathPlannerError::UnknownLocation(_))));
}

#[test]
fn crossover_on_shared_interior_location() {
    let mut graph = MapGraph::new();
    let s = graph.add_location(Location::new("S", 0.0, 0.0)).unwrap();
    let x = graph.add_location(Location::new("X", 1.0, 1.0)).unwrap();
    let z = graph.add_location(Location::new("Z", 1.0, -1.0)).unwrap();
    let y = graph.add_location(Location::new("Y", 2.0, 0.0)).unwrap();
    let g = graph.add_location(Location::new("G", 3.0, 0.0)).unwrap();
    graph.add_connection(s, x, 2.0).unwrap();
    graph.add_connection(x, y, 2.0).unwrap();
    graph.add_connection(s, z, 1.0).unwrap();
    graph.add_connection(z, y, 1.0).unwrap();
    graph.add_connection(y, g, 3.0).unwrap();

    let mother = Candidate::new(vec![s, x, y, g], 100.0);
    let father = Candidate::new(vec![s, z, y, g], 200.0);
    let mut rng = StdRng::seed_from_u64(0);
    let offspring = Offspring::breed(&mother, &father, &graph, 1000.0, &mut rng);

    assert_eq!(offspring.first.path(), &[s, x, y, g]);
    assert_eq!(offspring.second.path(), &[s, z, y, g]);
    assert_eq!(offspring.first.cost(), 7.0);
    assert_eq!(offspring.second.cost(), 5.0);
}

/// Ring of 12 locations with a few chords, enough for a 9 candidate population
const RING: &str = "\
VERTICES
L0;0;0
L1;1;0
L2;2;0
L3;3;0
L4;4;0
L5;5;0
L6;5;1
L7;4;1
L8;3;1
L9;2;1
L10;1;1
L11;0;1

EDGES
L0;L1;1
L1;L2;1
L2;L3;1
L3;L4;1
L4;L5;1
L5;L6;1
L6;L7;1
L7;L8;1
L8;L9;1
L9;L10;1
L10;L11;1
L11;L0;1
L1;L10;3
L3;L8;3
";

#[test]
fn evolutionary_search_returns_a_route_and_reweights_the_graph() {
    let mut graph = load_graph(RING).unwrap();
    let original = graph.clone();
    let start = location(&graph, "L0");
    let goal = location(&graph, "L5");

    let config = GeneticConfig::default().with_seed(3);
    let route = evolutionary_search(&start, &goal, &mut graph, config).unwrap();
    assert_eq!(route.first(), Some(&start));
    assert_eq!(route.last(), Some(&goal));

    // five random events touched the weights
    let changed = graph
        .connections()
        .zip(original.connections())
        .filter(|((_, now), (_, before))| now.weight() != before.weight())
        .count();
    assert!(changed >= 1);
}

#[test]
fn evolutionary_search_never_beats_the_optimum_on_the_ring() {
    let mut graph = load_graph(RING).unwrap();
    let start = graph.location_by_name("L0").unwrap();
    let goal = graph.location_by_name("L4").unwrap();

    let config = GeneticConfig::default().with_event_interval(0).with_seed(11);
    let search = mapnav::GeneticSearch::new(config).unwrap();
    let result = search.run(&mut graph, start, goal).unwrap();
    assert!(result.events.is_empty());

    // the evolved cost is a real route cost, never better than the optimum
    let best = AStar::default().find(&graph, start, goal).unwrap();
    let optimum = graph.path_cost(&best).unwrap();
    assert_eq!(optimum, 4.0);
    assert!(result.cost >= optimum);
    // below the seam penalty the route is fully connected and its cost exact
    if result.cost < 1000.0 {
        let real = graph.path_cost(&result.path).unwrap();
        assert!((real - result.cost).abs() < 1e-9);
    }
}

#[test]
fn load_failures_are_reported() {
    assert!(matches!(load_graph("VERTICES\nA;0;x\n"), Err(GraphError::Parse { line: 2, .. })));
    assert!(matches!(
        mapnav::load_graph_from_path("/no/such/dir/map.txt"),
        Err(GraphError::Io(_))
    ));
}
