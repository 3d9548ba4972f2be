use fnv::FnvHashMap;
use log::debug;

use crate::board::Board;
use crate::config::Method;
use crate::moves::{Move, Moves};
use crate::solver::graph::{SearchGraph, VertexId};
use crate::solver::stats::Stats;
use crate::solver::{verify, Solver, SolverErr, SolverOk};

/// Depth-limited DFS repeated with limits 0, 1, 2, ... up to `max_limit`.
#[derive(Debug)]
pub struct IterativeDeepeningSolver {
    max_limit: usize,
    graph: SearchGraph,
}

impl Default for IterativeDeepeningSolver {
    fn default() -> Self {
        Self::new(256)
    }
}

/// State of one round with a fixed depth limit.
struct Round<'a> {
    graph: &'a mut SearchGraph,
    stats: &'a mut Stats,
    limit: usize,
    // smallest depth at which each vertex was reached in this round
    reached: FnvHashMap<VertexId, usize>,
    path: Vec<Move>,
    cutoff: bool,
}

impl IterativeDeepeningSolver {
    pub fn new(max_limit: usize) -> Self {
        Self {
            max_limit,
            graph: SearchGraph::new(),
        }
    }

    pub fn max_limit(&self) -> usize {
        self.max_limit
    }
}

impl<'a> Round<'a> {
    fn dfs(&mut self, id: VertexId, depth: usize) -> Result<Option<VertexId>, SolverErr> {
        self.stats.add_unique_visited(depth);

        if self.graph[id].is_solved() {
            return Ok(Some(id));
        }
        if depth == self.limit {
            self.cutoff = true;
            return Ok(None);
        }

        let edges = self.graph.expand(id)?.to_vec();
        for edge in edges {
            match self.reached.get(&edge.target) {
                Some(&prev_depth) if prev_depth <= depth + 1 => {
                    self.stats.add_reached_duplicate(depth + 1);
                    continue;
                }
                _ => {}
            }
            self.reached.insert(edge.target, depth + 1);
            self.stats.add_created(depth + 1);

            self.path.push(edge.mov);
            if let Some(found) = self.dfs(edge.target, depth + 1)? {
                return Ok(Some(found));
            }
            self.path.pop();
        }
        Ok(None)
    }
}

impl Solver for IterativeDeepeningSolver {
    fn method(&self) -> Method {
        Method::Ids
    }

    fn search(&mut self, board: &Board, print_status: bool) -> Result<SolverOk, SolverErr> {
        self.graph = SearchGraph::new();
        let root = self.graph.add_vertex(board.clone());

        let mut stats = Stats::new();
        stats.add_created(0);

        for limit in 0..=self.max_limit {
            if print_status {
                println!("Depth limit: {}", limit);
            }

            let mut round = Round {
                graph: &mut self.graph,
                stats: &mut stats,
                limit,
                reached: FnvHashMap::default(),
                path: Vec::new(),
                cutoff: false,
            };
            round.reached.insert(root, 0);

            if let Some(solved) = round.dfs(root, 0)? {
                let moves = Moves::new(round.path);
                let solved_board = self.graph[solved].clone();
                verify(board, &moves, &solved_board)?;
                debug!("Solved with depth limit {}", limit);
                return Ok(SolverOk::solved(moves, solved_board, stats, Method::Ids));
            }

            if !round.cutoff {
                debug!("Every reachable board is within depth {}, no solution", limit);
                return Ok(SolverOk::unsolved(stats, Method::Ids));
            }
        }

        debug!("Reached depth limit {} without a solution", self.max_limit);
        Ok(SolverOk::unsolved(stats, Method::Ids))
    }
}
