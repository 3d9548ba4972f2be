use std::fmt::{self, Display, Formatter};

/// Largest board side, move distances have to fit in `i8`.
pub(crate) const MAX_SIZE: usize = 100;

/// Cars are labeled `A`..=`Z` in the text representation.
pub const MAX_CARS: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    pub fn new(x: u8, y: u8) -> Pos {
        Pos { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    /// Direction of travel for a signed distance along an orientation.
    pub fn along(orientation: Orientation, dist: i8) -> Dir {
        match (orientation, dist < 0) {
            (Orientation::Horizontal, true) => Dir::Left,
            (Orientation::Horizontal, false) => Dir::Right,
            (Orientation::Vertical, true) => Dir::Up,
            (Orientation::Vertical, false) => Dir::Down,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

pub(crate) fn car_letter(id: u8) -> char {
    (b'A' + id) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions() {
        assert_eq!(Dir::along(Orientation::Horizontal, -2), Dir::Left);
        assert_eq!(Dir::along(Orientation::Horizontal, 1), Dir::Right);
        assert_eq!(Dir::along(Orientation::Vertical, -1), Dir::Up);
        assert_eq!(Dir::along(Orientation::Vertical, 3), Dir::Down);
        assert_eq!(format!("{}{}{}{}", Dir::Up, Dir::Right, Dir::Down, Dir::Left), "urdl");
    }
}
