use std::fmt::{self, Debug, Formatter};

use log::warn;

use crate::board::Board;
use crate::data::Pos;
use crate::solver::SolverErr;

/// A scalar property of a board.
pub trait Feature {
    fn name(&self) -> &str;

    fn value(&self, board: &Board) -> f64;
}

/// Ids of the cars in the exit row between the VIP and the exit, in order.
fn blockers(board: &Board) -> Vec<u8> {
    let vip = board.vip();
    let mut ids: Vec<u8> = Vec::new();
    for x in vip.x + vip.len..board.width() {
        if let Some(id) = board.car_at(Pos::new(x, vip.y)) {
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Number of cars between the VIP and the exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingCars;

impl Feature for BlockingCars {
    fn name(&self) -> &str {
        "blocking"
    }

    fn value(&self, board: &Board) -> f64 {
        blockers(board).len() as f64
    }
}

/// Number of cells the VIP still has to travel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitDistance;

impl Feature for ExitDistance {
    fn name(&self) -> &str {
        "exit-distance"
    }

    fn value(&self, board: &Board) -> f64 {
        let vip = board.vip();
        f64::from(board.width() - vip.x - vip.len)
    }
}

/// Number of blocking cars that can't move at all right now.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockedBlockers;

impl Feature for BlockedBlockers {
    fn name(&self) -> &str {
        "blocked-blockers"
    }

    fn value(&self, board: &Board) -> f64 {
        blockers(board)
            .into_iter()
            .filter(|&id| !board.can_move(id))
            .count() as f64
    }
}

pub fn feature_by_name(name: &str) -> Option<Box<dyn Feature>> {
    match name {
        "blocking" => Some(Box::new(BlockingCars)),
        "exit-distance" => Some(Box::new(ExitDistance)),
        "blocked-blockers" => Some(Box::new(BlockedBlockers)),
        _ => None,
    }
}

/// Weighted sum of features. The weights are normalized to sum to 1.
pub struct Heuristic {
    features: Vec<Box<dyn Feature>>,
    weights: Vec<f64>,
}

impl Heuristic {
    pub fn new(features: Vec<Box<dyn Feature>>, weights: Vec<f64>) -> Result<Self, SolverErr> {
        if features.len() != weights.len() {
            return Err(SolverErr::DimensionMismatch {
                features: features.len(),
                weights: weights.len(),
            });
        }

        let mut heuristic = Heuristic { features, weights };
        heuristic.normalize();
        Ok(heuristic)
    }

    /// Only the number of blocking cars.
    pub fn blocking() -> Self {
        Heuristic {
            features: vec![Box::new(BlockingCars)],
            weights: vec![1.0],
        }
    }

    fn normalize(&mut self) {
        let total: f64 = self.weights.iter().sum();
        if total == 0.0 {
            warn!("Weights {:?} sum to 0, keeping them as they are", self.weights);
            return;
        }
        for weight in &mut self.weights {
            *weight /= total;
        }
    }

    pub fn value(&self, board: &Board) -> f64 {
        self.features
            .iter()
            .zip(&self.weights)
            .map(|(feature, weight)| feature.value(board) * weight)
            .sum()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter().map(|feature| feature.name()).collect()
    }
}

impl Debug for Heuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Heuristic(")?;
        for (i, (name, weight)) in self.feature_names().iter().zip(&self.weights).enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} * {}", weight, name)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_features() -> Vec<Box<dyn Feature>> {
        ["blocking", "exit-distance", "blocked-blockers"]
            .iter()
            .map(|name| feature_by_name(name).unwrap())
            .collect()
    }

    #[test]
    fn feature_values() {
        let board: Board = r"
..F.GG
..F..C
AAB..C
..B..C
..DD..
......
"
        .parse()
        .unwrap();
        let values: Vec<_> = all_features().iter().map(|f| f.value(&board)).collect();
        // B is boxed in, C can go down
        assert_eq!(values, vec![2.0, 4.0, 1.0]);

        let solved: Board = "......\n......\n....AA\n".parse().unwrap();
        let values: Vec<_> = all_features().iter().map(|f| f.value(&solved)).collect();
        assert_eq!(values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_feature() {
        assert!(feature_by_name("manhattan").is_none());
    }

    #[test]
    fn weights_sum_to_one() {
        for weights in &[vec![1.0, 1.0, 2.0], vec![0.5, 0.0, 0.0], vec![3.0, -1.0, 7.5]] {
            let heuristic = Heuristic::new(all_features(), weights.clone()).unwrap();
            let sum: f64 = heuristic.weights().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{:?}", heuristic);
        }
        assert_eq!(Heuristic::blocking().weights(), &[1.0]);
    }

    #[test]
    fn zero_weights_are_kept() {
        let heuristic = Heuristic::new(all_features(), vec![1.0, -1.0, 0.0]).unwrap();
        assert_eq!(heuristic.weights(), &[1.0, -1.0, 0.0]);
    }

    #[test]
    fn dimension_mismatch() {
        let err = Heuristic::new(all_features(), vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            SolverErr::DimensionMismatch {
                features: 3,
                weights: 1
            }
        );
    }

    #[test]
    fn weighted_sum() {
        let board: Board = "AA.B..\n...B..\n".parse().unwrap();
        let heuristic = Heuristic::new(all_features(), vec![1.0, 1.0, 2.0]).unwrap();
        assert_eq!(heuristic.num_features(), 3);
        assert_eq!(
            heuristic.feature_names(),
            vec!["blocking", "exit-distance", "blocked-blockers"]
        );
        // 1 blocker, 4 cells to go, the blocker is stuck
        assert!((heuristic.value(&board) - (0.25 + 1.0 + 0.5)).abs() < 1e-9);
        assert_eq!(
            format!("{:?}", heuristic),
            "Heuristic(0.25 * blocking + 0.25 * exit-distance + 0.5 * blocked-blockers)"
        );
    }
}
