use std::collections::VecDeque;
use std::convert::Infallible;
use std::ops::Index;

use fnv::FnvHashMap;
use log::debug;

use crate::board::Board;
use crate::moves::{Move, Moves};
use crate::solver::layers::Layers;
use crate::solver::stats::Stats;
use crate::solver::SolverErr;

/// Index of a vertex in the arena of a `SearchGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub mov: Move,
    pub target: VertexId,
}

#[derive(Debug)]
struct Vertex {
    board: Board,
    // None until expanded, never recomputed
    edges: Option<Vec<Edge>>,
}

/// A value that may have been computed from a partially expanded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explored<T> {
    pub value: T,
    /// True if every vertex was expanded when the value was computed.
    pub complete: bool,
}

/// Boards reached so far, each stored once, with their moves expanded on demand.
#[derive(Debug, Default)]
pub struct SearchGraph {
    vertices: Vec<Vertex>,
    ids: FnvHashMap<Board, VertexId>,
}

/// For every reached vertex, the vertex and move it was reached from (`None` for roots).
pub(crate) type Prevs = FnvHashMap<VertexId, Option<(VertexId, Move)>>;

impl SearchGraph {
    pub fn new() -> Self {
        SearchGraph::default()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Inserts the board unless it's already present. Doesn't expand it.
    pub fn add_vertex(&mut self, board: Board) -> VertexId {
        if let Some(&id) = self.ids.get(&board) {
            return id;
        }
        let id = VertexId(self.vertices.len());
        self.ids.insert(board.clone(), id);
        self.vertices.push(Vertex { board, edges: None });
        id
    }

    pub fn id_of(&self, board: &Board) -> Option<VertexId> {
        self.ids.get(board).cloned()
    }

    pub fn ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn is_expanded(&self, id: VertexId) -> bool {
        self.vertices
            .get(id.0)
            .map_or(false, |vertex| vertex.edges.is_some())
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.vertices.iter().all(|vertex| vertex.edges.is_some())
    }

    /// Edges computed so far, empty if the vertex was never expanded.
    pub fn edges(&self, id: VertexId) -> &[Edge] {
        self.vertices
            .get(id.0)
            .and_then(|vertex| vertex.edges.as_ref())
            .map_or(&[][..], |edges| edges.as_slice())
    }

    /// Computes the outgoing edges on the first call, later calls return the same edges.
    pub fn expand(&mut self, id: VertexId) -> Result<&[Edge], SolverErr> {
        if id.0 >= self.vertices.len() {
            return Err(SolverErr::UnknownVertex);
        }

        if self.vertices[id.0].edges.is_none() {
            let next_boards: Vec<_> = {
                let board = &self.vertices[id.0].board;
                board
                    .legal_moves()
                    .into_iter()
                    .map(|mov| (mov, board.moved(&mov)))
                    .collect()
            };
            let edges = next_boards
                .into_iter()
                .map(|(mov, next)| Edge {
                    mov,
                    target: self.add_vertex(next),
                })
                .collect();
            self.vertices[id.0].edges = Some(edges);
        }

        Ok(self.edges(id))
    }

    pub fn expand_board(&mut self, board: &Board) -> Result<&[Edge], SolverErr> {
        let id = self.id_of(board).ok_or(SolverErr::UnknownVertex)?;
        self.expand(id)
    }

    /// Breadth-first search from an already added board to the closest solved board.
    pub fn moves_to_nearest_solution(&mut self, root: &Board) -> Result<Option<Moves>, SolverErr> {
        let root = self.id_of(root).ok_or(SolverErr::UnknownVertex)?;
        let found = self.shortest_path(root, &mut Stats::new(), false)?;
        Ok(found.map(|(moves, _)| moves))
    }

    /// Breadth-first search expanding vertices as they're dequeued.
    /// The search ends when a solved vertex is dequeued.
    pub fn shortest_path(
        &mut self,
        root: VertexId,
        stats: &mut Stats,
        print_status: bool,
    ) -> Result<Option<(Moves, VertexId)>, SolverErr> {
        if root.0 >= self.vertices.len() {
            return Err(SolverErr::UnknownVertex);
        }

        let mut prevs = Prevs::default();
        let mut to_visit = VecDeque::new();

        prevs.insert(root, None);
        stats.add_created(0);
        to_visit.push_back((root, 0));

        while let Some((cur, dist)) = to_visit.pop_front() {
            if stats.add_unique_visited(dist) && print_status {
                println!("Visited new depth: {}", dist);
                println!("{:?}", stats);
            }

            if self[cur].is_solved() {
                debug!("Solved, backtracking path");
                return Ok(Some((backtrack_moves(&prevs, cur), cur)));
            }

            let edges = self.expand(cur)?.to_vec();
            for edge in edges {
                // mark when discovered, the first path to a vertex is a shortest one
                if prevs.contains_key(&edge.target) {
                    stats.add_reached_duplicate(dist + 1);
                    continue;
                }
                prevs.insert(edge.target, Some((cur, edge.mov)));
                stats.add_created(dist + 1);
                to_visit.push_back((edge.target, dist + 1));
            }
        }

        Ok(None)
    }

    /// Number of solved boards among the vertices reached so far.
    pub fn num_solutions(&self) -> Explored<usize> {
        Explored {
            value: self.vertices.iter().filter(|v| v.board.is_solved()).count(),
            complete: self.is_fully_expanded(),
        }
    }

    /// Largest distance from a known vertex to the closest known solved vertex,
    /// using only the edges expanded so far. `None` if no solved vertex is known.
    /// Until the graph is fully expanded the value is a distance in a subgraph
    /// and can be smaller or larger than the final one.
    pub fn max_depth(&self) -> Explored<Option<usize>> {
        let solved: Vec<_> = self.ids().filter(|&id| self[id].is_solved()).collect();
        let value = if solved.is_empty() {
            None
        } else {
            // moves are reversible so every known edge is walked both ways,
            // unexpanded vertices still get their incoming edges
            let mut neighbors = vec![Vec::new(); self.len()];
            for id in self.ids() {
                for edge in self.edges(id) {
                    neighbors[id.0].push(edge.target);
                    neighbors[edge.target.0].push(id);
                }
            }
            let mut layers = Layers::new(solved);
            match layers.run_to_end(|id: VertexId| Ok::<_, Infallible>(neighbors[id.0].clone())) {
                Ok(()) => Some(layers.depth()),
                Err(never) => match never {},
            }
        };
        Explored {
            value,
            complete: self.is_fully_expanded(),
        }
    }
}

impl Index<VertexId> for SearchGraph {
    type Output = Board;

    fn index(&self, id: VertexId) -> &Board {
        &self.vertices[id.0].board
    }
}

pub(crate) fn backtrack_moves(prevs: &Prevs, final_vertex: VertexId) -> Moves {
    let mut moves = Vec::new();
    let mut cur = final_vertex;
    while let Some(&Some((prev, mov))) = prevs.get(&cur) {
        moves.push(mov);
        cur = prev;
    }
    moves.reverse();
    Moves::new(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::board::Car;

    fn one_blocker() -> Board {
        r"
......
......
AA..B.
....B.
......
......
"
        .parse()
        .unwrap()
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph = SearchGraph::new();
        let a = graph.add_vertex(one_blocker());
        let b = graph.add_vertex(one_blocker());
        assert_eq!(a, b);
        assert_eq!(graph.len(), 1);
        assert!(!graph.is_expanded(a));
        assert!(graph.edges(a).is_empty());
    }

    #[test]
    fn expansion_is_memoized() {
        let mut graph = SearchGraph::new();
        let root = graph.add_vertex(one_blocker());
        let first = graph.expand(root).unwrap().to_vec();
        let len = graph.len();
        let second = graph.expand(root).unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(graph.len(), len);
        assert_eq!(len, 7);

        // neighbors link back to the root instead of creating a copy of it
        let child = first[0].target;
        let back = graph.expand(child).unwrap().to_vec();
        assert!(back.iter().any(|edge| edge.target == root));
        for edge in &back {
            assert_eq!(graph[child].apply(&edge.mov).unwrap(), graph[edge.target]);
        }
    }

    #[test]
    fn unknown_vertex() {
        let mut graph = SearchGraph::new();
        assert_eq!(graph.expand(VertexId(0)).unwrap_err(), SolverErr::UnknownVertex);
        assert_eq!(
            graph.expand_board(&one_blocker()).unwrap_err(),
            SolverErr::UnknownVertex
        );
        assert_eq!(
            graph.moves_to_nearest_solution(&one_blocker()).unwrap_err(),
            SolverErr::UnknownVertex
        );
    }

    #[test]
    fn nearest_solution() {
        let mut graph = SearchGraph::new();
        let board = one_blocker();
        graph.add_vertex(board.clone());
        let moves = graph.moves_to_nearest_solution(&board).unwrap().unwrap();
        assert_eq!(moves.to_string(), "Bu2 Ar4");

        let mut solved = board;
        for mov in &moves {
            solved = solved.apply(mov).unwrap();
        }
        assert!(solved.is_solved());
    }

    #[test]
    fn no_solution() {
        // the blocker can't leave the exit row
        let board = Board::new(6, 6, vec![Car::horizontal(0, 2, 2), Car::horizontal(3, 2, 3)]).unwrap();
        let mut graph = SearchGraph::new();
        graph.add_vertex(board.clone());
        assert_eq!(graph.moves_to_nearest_solution(&board).unwrap(), None);
        assert!(graph.is_fully_expanded());
        assert_eq!(graph.num_solutions(), Explored { value: 0, complete: true });
        assert_eq!(graph.max_depth(), Explored { value: None, complete: true });
    }

    #[test]
    fn partial_results_are_flagged() {
        let mut graph = SearchGraph::new();
        let root = graph.add_vertex(one_blocker());
        graph.expand(root).unwrap();
        assert!(!graph.num_solutions().complete);
        assert_eq!(graph.num_solutions().value, 0);

        let board = one_blocker();
        graph.moves_to_nearest_solution(&board).unwrap();
        // the search stops at the first solution, leaving the rest unexpanded
        assert!(!graph.is_fully_expanded());
        assert!(graph.num_solutions().value >= 1);
        assert!(!graph.max_depth().complete);
    }

    #[test]
    fn partial_depth_sees_incoming_edges() {
        let mut graph = SearchGraph::new();
        let root = graph.add_vertex("......\n......\nAA....\n......\n......\n......\n".parse().unwrap());
        graph.expand(root).unwrap();
        // only the root is expanded, the solved board is reached through its edge
        // and the other VIP positions through the root
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.max_depth(), Explored { value: Some(2), complete: false });

        let ids: Vec<_> = graph.ids().collect();
        for id in ids {
            graph.expand(id).unwrap();
        }
        assert_eq!(graph.max_depth(), Explored { value: Some(1), complete: true });
    }
}
