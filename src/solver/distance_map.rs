use log::debug;

use crate::board::Board;
use crate::solver::equivalence::EquivalenceClass;
use crate::solver::graph::{SearchGraph, VertexId};
use crate::solver::layers::Layers;
use crate::solver::SolverErr;

/// Distances to the nearest of a set of solved boards, grown one layer at a time.
///
/// Moves are reversible, so the boards one move away from a layer are exactly
/// the boards that can reach it in one move.
#[derive(Debug)]
pub struct DistanceMap {
    graph: SearchGraph,
    solutions: Vec<VertexId>,
    layers: Layers<VertexId>,
}

impl DistanceMap {
    /// `None` if there are no boards or some of them are not solved.
    pub fn from_solved_boards<I: IntoIterator<Item = Board>>(boards: I) -> Option<Self> {
        let mut graph = SearchGraph::new();
        let mut solutions = Vec::new();
        for board in boards {
            if !board.is_solved() {
                return None;
            }
            solutions.push(graph.add_vertex(board));
        }
        if solutions.is_empty() {
            return None;
        }

        let layers = Layers::new(solutions.iter().cloned());
        Some(Self {
            graph,
            solutions,
            layers,
        })
    }

    pub fn from_board(board: &Board) -> Option<Self> {
        Self::from_solved_boards(Some(board.clone()))
    }

    /// Seeded with every solution of the class, so the distances are exact.
    pub fn from_class(class: &EquivalenceClass) -> Option<Self> {
        Self::from_solved_boards(class.solutions().cloned())
    }

    /// Labels new boards until `to_depth` is reached or nothing new is found.
    pub fn propagate_depths(&mut self, to_depth: usize) -> Result<(), SolverErr> {
        let graph = &mut self.graph;
        self.layers.run_to(to_depth, |id| {
            graph
                .expand(id)
                .map(|edges| edges.iter().map(|edge| edge.target).collect::<Vec<_>>())
        })?;
        debug!(
            "Propagated to depth {}, {} boards",
            self.layers.depth(),
            self.size()
        );
        Ok(())
    }

    pub fn max_depth(&self) -> usize {
        self.layers.depth()
    }

    pub fn size(&self) -> usize {
        self.layers.order().len()
    }

    pub fn solutions(&self) -> impl Iterator<Item = &Board> + '_ {
        self.solutions.iter().map(move |&id| &self.graph[id])
    }

    /// `None` if the board wasn't reached yet.
    pub fn depth_of_board(&self, board: &Board) -> Option<usize> {
        self.graph
            .id_of(board)
            .and_then(|id| self.layers.depth_of(id))
    }

    /// The first board found at the current max depth.
    pub fn farthest(&self) -> &Board {
        &self.graph[self.layers.frontier()[0]]
    }

    pub fn frontier(&self) -> impl Iterator<Item = &Board> + '_ {
        self.layers.frontier().iter().map(move |&id| &self.graph[id])
    }

    /// True once propagation stopped finding new boards.
    pub fn is_exhausted(&self) -> bool {
        self.layers.is_exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_blocker() -> Board {
        "......\n......\nAA..B.\n....B.\n......\n......\n".parse().unwrap()
    }

    fn vip_only() -> Board {
        "......\n......\n....AA\n......\n......\n......\n".parse().unwrap()
    }

    #[test]
    fn only_solved_seeds() {
        assert!(DistanceMap::from_board(&one_blocker()).is_none());
        assert!(DistanceMap::from_solved_boards(vec![]).is_none());
        assert!(DistanceMap::from_solved_boards(vec![vip_only(), one_blocker()]).is_none());

        let unsolvable: Board = "......\n......\nAA.BBB\n......\n......\n......\n".parse().unwrap();
        let class = EquivalenceClass::new(&unsolvable).unwrap();
        assert!(DistanceMap::from_class(&class).is_none());
    }

    #[test]
    fn single_solution() {
        let mut map = DistanceMap::from_board(&vip_only()).unwrap();
        assert_eq!(map.max_depth(), 0);
        assert_eq!(map.size(), 1);
        assert_eq!(map.farthest(), &vip_only());
        assert!(!map.is_exhausted());

        map.propagate_depths(5).unwrap();
        assert!(map.is_exhausted());
        assert_eq!(map.max_depth(), 1);
        assert_eq!(map.size(), 5);
        assert_eq!(map.frontier().count(), 4);
        // the longest slide is generated first
        assert_eq!(map.farthest().to_string(), "......\n......\nAA....\n......\n......\n......\n");
    }

    #[test]
    fn incremental_propagation() {
        let class = EquivalenceClass::new(&one_blocker()).unwrap();
        let mut map = DistanceMap::from_class(&class).unwrap();
        assert_eq!(map.solutions().count(), 3);
        assert_eq!(map.depth_of_board(&one_blocker()), None);

        map.propagate_depths(1).unwrap();
        assert_eq!(map.max_depth(), 1);
        assert_eq!(map.size(), 15);
        assert_eq!(map.depth_of_board(&one_blocker()), None);

        // going back doesn't change anything
        map.propagate_depths(0).unwrap();
        assert_eq!(map.size(), 15);

        map.propagate_depths(100).unwrap();
        assert_eq!(map.max_depth(), 2);
        assert_eq!(map.size(), class.size());
        assert_eq!(map.frontier().count(), 6);
        assert_eq!(map.depth_of_board(&one_blocker()), Some(2));
        for board in class.boards() {
            assert_eq!(map.depth_of_board(board), class.depth_of_board(board).unwrap());
        }
    }
}
