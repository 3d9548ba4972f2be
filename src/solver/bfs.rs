use log::debug;

use crate::board::Board;
use crate::config::Method;
use crate::solver::graph::SearchGraph;
use crate::solver::stats::Stats;
use crate::solver::{verify, Solver, SolverErr, SolverOk};

/// Uninformed breadth-first search over a fresh search graph.
/// Finds a solution with the smallest number of moves.
#[derive(Debug, Default)]
pub struct BreadthFirstSolver {
    graph: SearchGraph,
}

impl BreadthFirstSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph built by the last search.
    pub fn graph(&self) -> &SearchGraph {
        &self.graph
    }
}

impl Solver for BreadthFirstSolver {
    fn method(&self) -> Method {
        Method::Bfs
    }

    fn search(&mut self, board: &Board, print_status: bool) -> Result<SolverOk, SolverErr> {
        self.graph = SearchGraph::new();
        let root = self.graph.add_vertex(board.clone());

        let mut stats = Stats::new();
        let found = self.graph.shortest_path(root, &mut stats, print_status)?;
        debug!("Search graph has {} vertices", self.graph.len());

        match found {
            Some((moves, solved)) => {
                let solved_board = self.graph[solved].clone();
                verify(board, &moves, &solved_board)?;
                Ok(SolverOk::solved(moves, solved_board, stats, Method::Bfs))
            }
            None => Ok(SolverOk::unsolved(stats, Method::Bfs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_is_rebuilt_for_each_search() {
        let board: Board = "AA..B.\n....B.\n......\n".parse().unwrap();
        let mut solver = BreadthFirstSolver::new();

        let first = solver.search(&board, false).unwrap();
        let len = solver.graph().len();
        let second = solver.search(&board, false).unwrap();
        assert_eq!(solver.graph().len(), len);
        assert!(first.solution.is_some());
        assert_eq!(first.solution, second.solution);
        assert_eq!(first.stats, second.stats);
    }
}
