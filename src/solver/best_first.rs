use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::debug;

use crate::board::Board;
use crate::config::Method;
use crate::heuristic::Heuristic;
use crate::moves::Move;
use crate::solver::graph::{backtrack_moves, Prevs, SearchGraph, VertexId};
use crate::solver::stats::Stats;
use crate::solver::{verify, Solver, SolverErr, SolverOk};

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    id: VertexId,
    prev: Option<(VertexId, Move)>,
    dist: usize,
    cost: f64,
    // insertion order, breaks ties between equal costs
    seq: usize,
}

impl SearchNode {
    fn new(id: VertexId, prev: Option<(VertexId, Move)>, dist: usize, h: f64, seq: usize) -> Self {
        Self {
            id,
            prev,
            dist,
            cost: dist as f64 + h,
            seq,
        }
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

/// Expands boards in order of moves so far plus the heuristic estimate.
#[derive(Debug)]
pub struct BestFirstSolver {
    heuristic: Heuristic,
    graph: SearchGraph,
}

impl BestFirstSolver {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            graph: SearchGraph::new(),
        }
    }

    pub fn heuristic(&self) -> &Heuristic {
        &self.heuristic
    }
}

impl Solver for BestFirstSolver {
    fn method(&self) -> Method {
        Method::BestFirst
    }

    fn search(&mut self, board: &Board, print_status: bool) -> Result<SolverOk, SolverErr> {
        debug!("Best-first search with {:?}", self.heuristic);

        self.graph = SearchGraph::new();
        let root = self.graph.add_vertex(board.clone());

        let mut stats = Stats::new();
        let mut to_visit = BinaryHeap::new();
        let mut prevs = Prevs::default();
        let mut seq = 0;

        let start = SearchNode::new(root, None, 0, self.heuristic.value(board), seq);
        stats.add_created(start.dist);
        to_visit.push(Reverse(start));

        while let Some(Reverse(cur_node)) = to_visit.pop() {
            if prevs.contains_key(&cur_node.id) {
                stats.add_reached_duplicate(cur_node.dist);
                continue;
            }
            if stats.add_unique_visited(cur_node.dist) && print_status {
                println!("Visited new depth: {}", cur_node.dist);
                println!("{:?}", stats);
            }

            // insert here and not as soon as we discover it
            // otherwise we overwrite the shortest path with longer ones
            prevs.insert(cur_node.id, cur_node.prev);

            if self.graph[cur_node.id].is_solved() {
                debug!("Solved, backtracking path");
                let moves = backtrack_moves(&prevs, cur_node.id);
                let solved_board = self.graph[cur_node.id].clone();
                verify(board, &moves, &solved_board)?;
                return Ok(SolverOk::solved(moves, solved_board, stats, Method::BestFirst));
            }

            let edges = self.graph.expand(cur_node.id)?.to_vec();
            for edge in edges {
                // insert and then ignore duplicates
                seq += 1;
                let h = self.heuristic.value(&self.graph[edge.target]);
                let next_node = SearchNode::new(
                    edge.target,
                    Some((cur_node.id, edge.mov)),
                    cur_node.dist + 1,
                    h,
                    seq,
                );
                stats.add_created(next_node.dist);
                to_visit.push(Reverse(next_node));
            }
        }

        Ok(SolverOk::unsolved(stats, Method::BestFirst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::heuristic::feature_by_name;

    #[test]
    fn node_ordering() {
        let id = VertexId(0);
        let cheap = SearchNode::new(id, None, 1, 0.5, 7);
        let expensive = SearchNode::new(id, None, 1, 2.0, 1);
        let first_tie = SearchNode::new(id, None, 2, 0.5, 3);
        let second_tie = SearchNode::new(id, None, 2, 0.5, 4);
        assert!(cheap < expensive);
        assert!(first_tie < second_tie);

        let mut heap = BinaryHeap::new();
        for &node in &[expensive, second_tie, cheap, first_tie] {
            heap.push(Reverse(node));
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|Reverse(n)| n.seq)).collect();
        assert_eq!(order, vec![7, 3, 4, 1]);
    }

    #[test]
    fn combined_features() {
        let board: Board = r"
B.CCC.
B..D..
AA.D..
E..D..
E.FF.G
HH...G
"
        .parse()
        .unwrap();
        let features = vec![
            feature_by_name("blocking").unwrap(),
            feature_by_name("exit-distance").unwrap(),
        ];
        let heuristic = Heuristic::new(features, vec![2.0, 1.0]).unwrap();
        let mut solver = BestFirstSolver::new(heuristic);
        assert_eq!(solver.method(), Method::BestFirst);
        assert_eq!(solver.heuristic().num_features(), 2);

        let solution = solver.search(&board, false).unwrap().solution.unwrap();
        assert!(solution.solved_board.is_solved());
        assert!(solution.visited_states <= solver.graph.len());
    }
}
