// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

pub mod board;
pub mod config;
pub mod data;
pub mod fs;
pub mod heuristic;
pub mod moves;
pub mod parser;
pub mod solver;

mod vec2d;

use std::error::Error;
use std::path::Path;

use crate::board::Board;
use crate::config::Method;
use crate::solver::{SolverErr, SolverOk};

pub trait LoadBoard {
    fn load_board(&self) -> Result<Board, Box<dyn Error>>;
}

impl<P: AsRef<Path> + ?Sized> LoadBoard for P {
    fn load_board(&self) -> Result<Board, Box<dyn Error>> {
        let text = fs::read_file(self)?;
        Ok(text.parse()?)
    }
}

pub trait Solve {
    fn solve(&self, method: Method, print_status: bool) -> Result<SolverOk, SolverErr>;
}

#[cfg(test)]
mod tests {
    use crate::config::Method::{self, BestFirst, Bfs, Equivalence, Ids};
    use crate::solver::equivalence::EquivalenceClass;

    use super::*;

    const METHODS: [Method; 4] = [Bfs, Ids, Equivalence, BestFirst];

    #[test]
    fn test_boards() {
        // expected length of the shortest solution
        let boards = [
            ("00-solved.txt", Some(0)),
            ("01-one-blocker.txt", Some(2)),
            ("02-three-moves.txt", Some(3)),
            ("03-seven-moves.txt", Some(7)),
            ("04-unsolvable.txt", None),
        ];

        for &(name, expected) in &boards {
            let board = format!("boards/{}", name).load_board().unwrap();
            for &method in &METHODS {
                let solver_ok = board.solve(method, false).unwrap();
                let len = solver_ok.solution.as_ref().map(|s| s.moves.move_cnt());
                println!("{} using {}: {:?}", name, method, len);

                // best-first isn't guaranteed to be optimal
                if method == BestFirst {
                    assert_eq!(len.is_some(), expected.is_some(), "{}", name);
                    assert!(len >= expected);
                } else {
                    assert_eq!(len, expected, "{} using {}", name, method);
                }
            }

            let class = EquivalenceClass::new(&board).unwrap();
            assert_eq!(class.depth_of_board(&board).unwrap(), expected);
        }
    }

    #[test]
    fn missing_file() {
        let err = "boards/does-not-exist.txt".load_board().unwrap_err();
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn invalid_file() {
        let err = "Cargo.toml".load_board().unwrap_err();
        assert!(err.to_string().starts_with("Invalid cell at pos: [0, 0]"));
    }
}
