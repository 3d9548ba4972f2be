use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{car_letter, Dir, Orientation};

/// A single slide of one car by any number of cells along its orientation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub(crate) car: u8,
    pub(crate) dist: i8,
    pub(crate) orientation: Orientation,
}

impl Move {
    pub(crate) fn new(car: u8, dist: i8, orientation: Orientation) -> Self {
        Move {
            car,
            dist,
            orientation,
        }
    }

    pub fn car(&self) -> u8 {
        self.car
    }

    pub fn dist(&self) -> i8 {
        self.dist
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn dir(&self) -> Dir {
        Dir::along(self.orientation, self.dist)
    }

    /// The move that undoes this one.
    pub fn inverse(&self) -> Move {
        Move::new(self.car, -self.dist, self.orientation)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            car_letter(self.car),
            self.dir(),
            i32::from(self.dist).abs()
        )
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub(crate) fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = ::std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, mov) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Orientation::{Horizontal, Vertical};

    #[test]
    fn formatting_moves() {
        let moves = Moves::new(vec![
            Move::new(1, -2, Vertical),
            Move::new(0, 4, Horizontal),
            Move::new(2, 1, Vertical),
            Move::new(3, -3, Horizontal),
        ]);
        assert_eq!(moves.to_string(), "Bu2 Ar4 Cd1 Dl3");
        assert_eq!(format!("{:?}", moves), "Bu2 Ar4 Cd1 Dl3");
        assert_eq!(Moves::default().to_string(), "");
    }

    #[test]
    fn inverse() {
        let mov = Move::new(2, -3, Vertical);
        assert_eq!(mov.inverse(), Move::new(2, 3, Vertical));
        assert_eq!(mov.inverse().inverse(), mov);
        assert_eq!(mov.dir(), Dir::Up);
        assert_eq!(mov.inverse().dir(), Dir::Down);
    }

    #[test]
    fn counting() {
        let mut moves = Moves::default();
        assert!(moves.is_empty());
        moves.add(Move::new(1, -2, Vertical));
        moves.add(Move::new(0, 4, Horizontal));
        assert_eq!(moves.move_cnt(), 2);

        let v: Vec<_> = moves.iter().cloned().collect();
        let v2: Vec<_> = moves.into_iter().collect();
        assert_eq!(v, v2);
    }
}
