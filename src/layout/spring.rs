//! Force-directed ("spring") layout engine.
//!
//! Positions nodes by simulating a physical system: every pair of nodes
//! repels with a Coulomb-like force, every edge pulls its endpoints together
//! with a Hookean spring, and a damping factor bleeds energy out of the
//! system until it settles. The simulation stops when total displacement per
//! iteration drops below a threshold or the iteration budget runs out;
//! running out of budget is not an error.

use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Size},
    graph::Graph,
    layout::{Layout, LayoutError, Positions, State},
};

/// Spring stiffness applied along edges. Parallel edges each contribute a
/// full spring, so duplicated edges pull twice as hard.
const SPRING_STIFFNESS: f32 = 0.1;

/// Largest per-iteration displacement of a single node. Caps runaway steps
/// when nodes start far from equilibrium.
const MAX_STEP: f32 = 10.0;

/// Distances are clamped to this floor before dividing, so coincident nodes
/// never produce infinite forces.
const MIN_DISTANCE: f32 = 1.0;

/// The run counts as converged once total displacement falls below this
/// value per node.
const CONVERGENCE_PER_NODE: f32 = 0.05;

/// Simulation parameters for the spring layout engine.
///
/// `seed` chooses between the two documented determinism modes: `Some(seed)`
/// makes the layout fully reproducible, `None` draws initial positions from
/// OS entropy so every run differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of simulation iterations.
    pub iterations: usize,
    /// Ideal edge length; springs are relaxed at this distance.
    pub spring_length: f32,
    /// Coefficient of the inverse-square repulsion between node pairs.
    pub repulsion_strength: f32,
    /// Velocity decay factor, in `(0, 1]`.
    pub damping: f32,
    /// Optional RNG seed for reproducible layouts.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: 500,
            spring_length: 50.0,
            repulsion_strength: 1000.0,
            damping: 0.85,
            seed: None,
        }
    }
}

impl Config {
    /// Checks the configuration against a target surface.
    fn validate(&self, surface: Size) -> Result<(), LayoutError> {
        if self.iterations == 0 {
            return Err(LayoutError::InvalidConfig(
                "iterations must be positive".to_string(),
            ));
        }
        if !self.spring_length.is_finite() || self.spring_length <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "spring length must be positive, got {}",
                self.spring_length
            )));
        }
        if !self.repulsion_strength.is_finite() || self.repulsion_strength <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "repulsion strength must be positive, got {}",
                self.repulsion_strength
            )));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping > 1.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !surface.is_positive() {
            return Err(LayoutError::InvalidConfig(format!(
                "surface dimensions must be positive, got {}x{}",
                surface.width(),
                surface.height()
            )));
        }
        Ok(())
    }
}

/// Spring layout engine.
///
/// The engine never fails on a valid graph. Each call to
/// [`Engine::calculate`] is an independent run; once it returns, the
/// produced positions are frozen and the engine state is
/// [`State::Converged`].
pub struct Engine {
    config: Config,
    state: State,
}

impl Engine {
    /// Creates an engine with the given simulation parameters.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: State::Uninitialized,
        }
    }

    /// Returns the current lifecycle state of the engine
    pub fn state(&self) -> State {
        self.state
    }

    /// Runs the simulation and returns one position per node.
    ///
    /// Every returned coordinate is finite and inside the surface bounds.
    /// With the same seed, config, and graph, the result is bit-identical
    /// across runs.
    pub fn calculate(&mut self, graph: &Graph, surface: Size) -> Result<Layout, LayoutError> {
        self.config.validate(surface)?;

        if graph.node_count() == 0 {
            self.state = State::Converged;
            return Ok(Layout::new(Positions::new(), 0, true));
        }

        self.state = State::Simulating;
        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            iterations = self.config.iterations;
            "Starting spring simulation"
        );

        // Node slots are petgraph indices, which are assigned densely in
        // insertion order and never invalidated. Simulating over Vecs keyed
        // by slot keeps iteration order, and therefore output, deterministic.
        let node_count = graph.node_count();
        let edges: Vec<(usize, usize)> = graph
            .edges()
            .map(|(source, target, _)| (source.index(), target.index()))
            .collect();

        let mut positions = self.initial_positions(node_count, surface);
        let mut velocities = vec![Point::default(); node_count];

        let threshold = CONVERGENCE_PER_NODE * node_count as f32;
        let mut iterations_run = 0;
        let mut converged = false;

        for _ in 0..self.config.iterations {
            let forces = self.accumulate_forces(&positions, &edges);

            let mut total_displacement = 0.0;
            for (slot, force) in forces.iter().enumerate() {
                let mut velocity = velocities[slot]
                    .add_point(*force)
                    .scale(self.config.damping);

                // Clamp the step so far-from-equilibrium starts cannot diverge
                let speed = velocity.hypot();
                if speed > MAX_STEP {
                    velocity = velocity.scale(MAX_STEP / speed);
                }
                velocities[slot] = velocity;

                let moved = positions[slot].add_point(velocity).clamp_to(surface);
                total_displacement += moved.distance_to(positions[slot]);
                positions[slot] = moved;
            }

            iterations_run += 1;
            trace!(iteration = iterations_run, total_displacement; "Simulation step");

            if total_displacement < threshold {
                converged = true;
                break;
            }
        }

        self.state = State::Converged;
        debug!(iterations_run, converged; "Spring simulation finished");

        let positions: Positions = graph
            .nodes_with_indices()
            .map(|(idx, node)| (node.id().to_string(), positions[idx.index()]))
            .collect();

        Ok(Layout::new(positions, iterations_run, converged))
    }

    /// Scatters initial positions pseudo-randomly across the surface.
    fn initial_positions(&self, node_count: usize, surface: Size) -> Vec<Point> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        (0..node_count)
            .map(|_| {
                Point::new(
                    rng.random_range(0.0..surface.width()),
                    rng.random_range(0.0..surface.height()),
                )
            })
            .collect()
    }

    /// Sums the repulsive and attractive force acting on every node.
    fn accumulate_forces(&self, positions: &[Point], edges: &[(usize, usize)]) -> Vec<Point> {
        let mut forces = vec![Point::default(); positions.len()];

        // Coulomb-like repulsion between every unordered pair
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let mut delta = positions[i].sub_point(positions[j]);
                if delta.is_zero() {
                    // Coincident nodes get a fixed nudge so they separate
                    delta = Point::new(MIN_DISTANCE, MIN_DISTANCE);
                }

                let distance = delta.hypot().max(MIN_DISTANCE);
                let magnitude = self.config.repulsion_strength / (distance * distance);
                let force = delta.scale(magnitude / distance);

                forces[i] = forces[i].add_point(force);
                forces[j] = forces[j].sub_point(force);
            }
        }

        // Hookean attraction along every edge; parallel edges accumulate.
        // Self-loops are skipped: their endpoints coincide, so they carry no
        // spring force.
        for &(source, target) in edges {
            if source == target {
                continue;
            }

            let delta = positions[source].sub_point(positions[target]);
            let distance = delta.hypot().max(MIN_DISTANCE);
            let magnitude = SPRING_STIFFNESS * (distance - self.config.spring_length);
            let force = delta.scale(magnitude / distance);

            forces[source] = forces[source].sub_point(force);
            forces[target] = forces[target].add_point(force);
        }

        forces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NodeStyle;
    use proptest::prelude::*;

    fn graph_with_nodes(count: usize) -> Graph {
        let mut graph = Graph::new();
        for i in 0..count {
            graph.add_node(format!("n{i}"), NodeStyle::default()).unwrap();
        }
        graph
    }

    fn seeded_config(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            ..Config::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let surface = Size::new(800.0, 600.0);
        let graph = graph_with_nodes(2);

        let cases = [
            Config {
                iterations: 0,
                ..Config::default()
            },
            Config {
                spring_length: 0.0,
                ..Config::default()
            },
            Config {
                repulsion_strength: -1.0,
                ..Config::default()
            },
            Config {
                damping: 1.5,
                ..Config::default()
            },
        ];

        for config in cases {
            let result = Engine::new(config).calculate(&graph, surface);
            assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_invalid_surface_rejected() {
        let graph = graph_with_nodes(2);
        let result = Engine::new(Config::default()).calculate(&graph, Size::new(0.0, 600.0));
        assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_graph_converges_immediately() {
        let mut engine = Engine::new(Config::default());
        let layout = engine
            .calculate(&Graph::new(), Size::new(100.0, 100.0))
            .unwrap();

        assert!(layout.positions().is_empty());
        assert!(layout.converged());
        assert_eq!(layout.iterations_run(), 0);
        assert_eq!(engine.state(), State::Converged);
    }

    #[test]
    fn test_single_node_keeps_initial_position() {
        let surface = Size::new(200.0, 200.0);
        let graph = graph_with_nodes(1);

        let mut engine = Engine::new(seeded_config(7));
        let first = engine.calculate(&graph, surface).unwrap();
        assert!(first.converged());

        // A lone node experiences no force, so a re-run from the same seed
        // ends exactly where it started.
        let second = Engine::new(seeded_config(7))
            .calculate(&graph, surface)
            .unwrap();
        assert_eq!(first.position_of("n0"), second.position_of("n0"));
        assert_eq!(second.iterations_run(), 1);
    }

    #[test]
    fn test_engine_state_transitions() {
        let mut engine = Engine::new(seeded_config(1));
        assert_eq!(engine.state(), State::Uninitialized);

        engine
            .calculate(&graph_with_nodes(3), Size::new(400.0, 400.0))
            .unwrap();
        assert_eq!(engine.state(), State::Converged);
    }

    proptest! {
        #[test]
        fn prop_positions_are_finite_and_in_bounds(
            node_count in 1usize..8,
            edge_pairs in proptest::collection::vec((0usize..8, 0usize..8), 0..16),
            seed in any::<u64>(),
        ) {
            let mut graph = graph_with_nodes(node_count);
            for (a, b) in edge_pairs {
                let source = format!("n{}", a % node_count);
                let target = format!("n{}", b % node_count);
                graph.add_edge(&source, &target, Default::default()).unwrap();
            }

            let surface = Size::new(800.0, 600.0);
            let config = Config {
                iterations: 200,
                seed: Some(seed),
                ..Config::default()
            };
            let layout = Engine::new(config).calculate(&graph, surface).unwrap();

            prop_assert_eq!(layout.positions().len(), node_count);
            for position in layout.positions().values() {
                prop_assert!(!position.is_degenerate());
                prop_assert!((0.0..=surface.width()).contains(&position.x()));
                prop_assert!((0.0..=surface.height()).contains(&position.y()));
            }
        }
    }
}
