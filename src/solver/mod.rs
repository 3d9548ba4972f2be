pub mod best_first;
pub mod bfs;
pub mod distance_map;
pub mod equivalence;
pub mod graph;
pub mod iterative_deepening;
pub mod stats;

#[cfg(feature = "graph")]
pub mod dot_graph;
mod layers;

use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use log::debug;

use crate::board::Board;
use crate::config::Method;
use crate::data::car_letter;
use crate::heuristic::Heuristic;
use crate::moves::{Move, Moves};
use crate::Solve;

use self::best_first::BestFirstSolver;
use self::bfs::BreadthFirstSolver;
use self::equivalence::EquivalenceClassSolver;
use self::iterative_deepening::IterativeDeepeningSolver;
use self::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    IllegalMove(Move),
    UnknownVertex,
    NotInClass,
    InvalidSolution,
    DimensionMismatch { features: usize, weights: usize },
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::IllegalMove(mov) => write!(
                f,
                "Illegal move {} - car {} can't travel there",
                mov,
                car_letter(mov.car())
            ),
            SolverErr::UnknownVertex => write!(f, "Board is not in the search graph"),
            SolverErr::NotInClass => write!(f, "Board is not in the equivalence class"),
            SolverErr::InvalidSolution => write!(f, "Moves don't lead to the solved board"),
            SolverErr::DimensionMismatch { features, weights } => write!(
                f,
                "Lengths of feature vector ({}) and weight vector ({}) do not match",
                features, weights
            ),
        }
    }
}

impl Error for SolverErr {}

/// A complete, verified path to a solved board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: Moves,
    pub solved_board: Board,
    pub visited_states: usize,
}

pub struct SolverOk {
    /// `None` if no solved board is reachable.
    pub solution: Option<Solution>,
    pub stats: Stats,
    pub(crate) method: Method,
}

impl SolverOk {
    fn new(solution: Option<Solution>, stats: Stats, method: Method) -> Self {
        Self {
            solution,
            stats,
            method,
        }
    }

    /// Builds the result of a search that ended in `solved_board`.
    fn solved(moves: Moves, solved_board: Board, stats: Stats, method: Method) -> Self {
        let solution = Solution {
            moves,
            solved_board,
            visited_states: stats.total_visited(),
        };
        Self::new(Some(solution), stats, method)
    }

    fn unsolved(stats: Stats, method: Method) -> Self {
        Self::new(None, stats, method)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn visited_states(&self) -> usize {
        self.solution
            .as_ref()
            .map_or_else(|| self.stats.total_visited(), |s| s.visited_states)
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.solution {
            None => writeln!(f, "No solution")?,
            Some(ref solution) => writeln!(f, "{}: {}", self.method, solution.moves.move_cnt())?,
        }
        write!(f, "{}", self.stats)
    }
}

/// One search strategy. All of them report moves to a solved board
/// and the number of states they expanded on the way.
pub trait Solver: Debug {
    fn method(&self) -> Method;

    fn search(&mut self, board: &Board, print_status: bool) -> Result<SolverOk, SolverErr>;
}

/// The default solver for each method.
pub fn create_solver(method: Method) -> Box<dyn Solver> {
    match method {
        Method::Bfs => Box::new(BreadthFirstSolver::new()),
        Method::Ids => Box::new(IterativeDeepeningSolver::default()),
        Method::Equivalence => Box::new(EquivalenceClassSolver::new()),
        Method::BestFirst => Box::new(BestFirstSolver::new(Heuristic::blocking())),
    }
}

impl Solve for Board {
    fn solve(&self, method: Method, print_status: bool) -> Result<SolverOk, SolverErr> {
        debug!("Solving using {}", method);
        create_solver(method).search(self, print_status)
    }
}

/// Replays the moves to make sure they really lead to the solved board.
fn verify(start: &Board, moves: &Moves, solved_board: &Board) -> Result<(), SolverErr> {
    let mut board = start.clone();
    for mov in moves {
        board = board.apply(mov)?;
    }
    if board != *solved_board || !board.is_solved() {
        return Err(SolverErr::InvalidSolution);
    }
    Ok(())
}
