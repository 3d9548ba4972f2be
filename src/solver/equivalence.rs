use std::convert::Infallible;
use std::hash::{Hash, Hasher};

use fnv::FnvHasher;
use log::{debug, info};

use crate::board::Board;
use crate::config::Method;
use crate::moves::Moves;
use crate::solver::graph::{SearchGraph, VertexId};
use crate::solver::layers::Layers;
use crate::solver::stats::Stats;
use crate::solver::{verify, Solver, SolverErr, SolverOk};

/// All boards reachable from a seed board.
///
/// Moves are reversible so reachability is symmetric and every member
/// generates the same class. The whole component is expanded up front,
/// then every member is labeled with its distance to the nearest solved member.
#[derive(Debug)]
pub struct EquivalenceClass {
    graph: SearchGraph,
    seed: VertexId,
    members: Vec<VertexId>,
    solutions: Vec<VertexId>,
    // distances to the nearest solution, None for unsolvable classes
    to_solution: Option<Layers<VertexId>>,
    hash: u64,
    stats: Stats,
}

impl EquivalenceClass {
    pub fn new(board: &Board) -> Result<Self, SolverErr> {
        let mut graph = SearchGraph::new();
        let seed = graph.add_vertex(board.clone());

        let mut discovery = Layers::new(vec![seed]);
        discovery.run_to_end(|id| {
            graph
                .expand(id)
                .map(|edges| edges.iter().map(|edge| edge.target).collect::<Vec<_>>())
        })?;
        let members = discovery.order().to_vec();
        debug!("Class discovered, {} boards", members.len());

        let stats = discovery_stats(&graph, &discovery);

        let solutions: Vec<_> = members
            .iter()
            .cloned()
            .filter(|&id| graph[id].is_solved())
            .collect();

        let to_solution = if solutions.is_empty() {
            None
        } else {
            let mut layers = Layers::new(solutions.iter().cloned());
            let incoming = |id| {
                Ok::<_, Infallible>(graph.edges(id).iter().map(|edge| edge.target).collect::<Vec<_>>())
            };
            match layers.run_to_end(incoming) {
                Ok(()) => Some(layers),
                Err(never) => match never {},
            }
        };

        let hash = {
            let mut hasher = FnvHasher::default();
            members
                .iter()
                .map(|&id| graph[id].canonical_key())
                .min()
                .hash(&mut hasher);
            hasher.finish()
        };

        Ok(Self {
            graph,
            seed,
            members,
            solutions,
            to_solution,
            hash,
            stats,
        })
    }

    /// The board the class was computed from.
    pub fn seed(&self) -> &Board {
        &self.graph[self.seed]
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn solutions(&self) -> impl Iterator<Item = &Board> + '_ {
        self.solutions.iter().map(move |&id| &self.graph[id])
    }

    pub fn num_solutions(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_solvable(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// Members in discovery order, starting with the seed.
    pub fn boards(&self) -> impl Iterator<Item = &Board> + '_ {
        self.members.iter().map(move |&id| &self.graph[id])
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.graph.id_of(board).is_some()
    }

    /// Largest distance from a member to its nearest solution.
    pub fn max_depth(&self) -> Option<usize> {
        self.to_solution.as_ref().map(|layers| layers.depth())
    }

    pub fn depth_of_board(&self, board: &Board) -> Result<Option<usize>, SolverErr> {
        let id = self.graph.id_of(board).ok_or(SolverErr::NotInClass)?;
        Ok(self.depth_of(id))
    }

    fn depth_of(&self, id: VertexId) -> Option<usize> {
        self.to_solution.as_ref().and_then(|layers| layers.depth_of(id))
    }

    /// A shortest path to the nearest solution and the solved board it ends in.
    pub fn path_to_solution(&self, board: &Board) -> Result<Option<(Moves, Board)>, SolverErr> {
        let mut cur = self.graph.id_of(board).ok_or(SolverErr::NotInClass)?;
        let mut depth = match self.depth_of(cur) {
            Some(depth) => depth,
            None => return Ok(None),
        };

        let mut moves = Moves::default();
        while depth > 0 {
            // every member except solutions has a neighbor one step closer
            let next = self
                .graph
                .edges(cur)
                .iter()
                .find(|edge| self.depth_of(edge.target) == Some(depth - 1));
            let next = match next {
                Some(edge) => edge,
                None => return Ok(None),
            };
            moves.add(next.mov);
            cur = next.target;
            depth -= 1;
        }
        Ok(Some((moves, self.graph[cur].clone())))
    }

    /// Identical for all members of the class and for classes
    /// that only differ by the labels of non-VIP cars.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn graph(&self) -> &SearchGraph {
        &self.graph
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

/// Every member was created and expanded once, the remaining edges
/// between layers reached boards that were already known.
fn discovery_stats(graph: &SearchGraph, discovery: &Layers<VertexId>) -> Stats {
    let mut stats = Stats::new();
    let mut edges_from = Vec::new();
    for &id in discovery.order() {
        let depth = discovery.depth_of(id).unwrap_or(0);
        stats.add_created(depth);
        stats.add_unique_visited(depth);
        if edges_from.len() <= depth {
            edges_from.resize(depth + 1, 0);
        }
        edges_from[depth] += graph.edges(id).len();
    }

    let created = stats.clone();
    let layer_size = |depth: usize| {
        created
            .visited_by_depth()
            .get(depth)
            .cloned()
            .unwrap_or(0)
    };
    for (depth, &edges) in edges_from.iter().enumerate() {
        for _ in layer_size(depth + 1)..edges {
            stats.add_reached_duplicate(depth + 1);
        }
    }
    stats
}

/// Answers queries from whole equivalence classes, reusing them for boards of the same class.
#[derive(Debug, Default)]
pub struct EquivalenceClassSolver {
    classes: Vec<EquivalenceClass>,
}

impl EquivalenceClassSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    /// The class of the board, computed on first use.
    pub fn class_of(&mut self, board: &Board) -> Result<&EquivalenceClass, SolverErr> {
        let index = match self.classes.iter().position(|class| class.contains(board)) {
            Some(index) => index,
            None => {
                let class = EquivalenceClass::new(board)?;
                info!(
                    "New class: {} boards, {} solutions",
                    class.size(),
                    class.num_solutions()
                );
                self.classes.push(class);
                self.classes.len() - 1
            }
        };
        Ok(&self.classes[index])
    }
}

impl Solver for EquivalenceClassSolver {
    fn method(&self) -> Method {
        Method::Equivalence
    }

    fn search(&mut self, board: &Board, print_status: bool) -> Result<SolverOk, SolverErr> {
        let class = self.class_of(board)?;
        if print_status {
            println!("{:?}", class.stats());
        }

        let stats = class.stats().clone();
        match class.path_to_solution(board)? {
            Some((moves, solved_board)) => {
                verify(board, &moves, &solved_board)?;
                Ok(SolverOk::solved(moves, solved_board, stats, Method::Equivalence))
            }
            None => Ok(SolverOk::unsolved(stats, Method::Equivalence)),
        }
    }
}
