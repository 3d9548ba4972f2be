use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::board::{Board, BoardErr, Car};
use crate::data::{Orientation, Pos, MAX_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Empty,
    Pos(usize, usize),
    TooLarge,
    Ragged(usize),
    NoVip,
    NotStraight(char),
    Board(BoardErr),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Empty => write!(f, "Empty board"),
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Board larger than {} rows/columns", MAX_SIZE),
            ParserErr::Ragged(r) => write!(f, "Row {} has a different length than the first row", r),
            ParserErr::NoVip => write!(f, "No VIP car (A)"),
            ParserErr::NotStraight(c) => {
                write!(f, "Car {} doesn't occupy a straight line of adjacent cells", c)
            }
            ParserErr::Board(ref err) => write!(f, "{}", err),
        }
    }
}

impl Error for ParserErr {}

impl From<BoardErr> for ParserErr {
    fn from(err: BoardErr) -> Self {
        ParserErr::Board(err)
    }
}

impl FromStr for Board {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses the text grid: `.` is an empty cell, uppercase letters are cars.
/// `A` is the VIP car, the other letters are numbered in alphabetical order.
pub(crate) fn parse(board: &str) -> Result<Board, ParserErr> {
    // trim so we can specify boards using raw strings more easily
    let board = board.trim_matches('\n').trim_end();
    if board.is_empty() {
        return Err(ParserErr::Empty);
    }

    let mut width = None;
    let mut height = 0;
    let mut letters: BTreeMap<char, Vec<Pos>> = BTreeMap::new();

    for (r, line) in board.lines().enumerate() {
        let line = line.trim_end();
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut line_len = 0;
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            match cur_char {
                '.' => {}
                'A'..='Z' => letters
                    .entry(cur_char)
                    .or_insert_with(Vec::new)
                    .push(Pos::new(c as u8, r as u8)),
                _ => return Err(ParserErr::Pos(r, c)),
            }
            line_len += 1;
        }
        match width {
            None => width = Some(line_len),
            Some(w) if w != line_len => return Err(ParserErr::Ragged(r)),
            Some(_) => {}
        }
        height += 1;
    }

    if !letters.contains_key(&'A') {
        return Err(ParserErr::NoVip);
    }

    let mut cars = Vec::with_capacity(letters.len());
    for (&letter, cells) in &letters {
        cars.push(parse_car(letter, cells)?);
    }

    let width = width.unwrap_or(0);
    Ok(Board::new(width as u8, height as u8, cars)?)
}

/// `cells` are in reading order.
fn parse_car(letter: char, cells: &[Pos]) -> Result<Car, ParserErr> {
    let first = cells[0];
    let orientation = if cells.len() == 1 || cells.iter().all(|pos| pos.y == first.y) {
        Orientation::Horizontal
    } else if cells.iter().all(|pos| pos.x == first.x) {
        Orientation::Vertical
    } else {
        return Err(ParserErr::NotStraight(letter));
    };

    let car = Car::new(first.x, first.y, cells.len() as u8, orientation);
    let adjacent = cells.iter().zip(car.cells()).all(|(&cell, expected)| cell == expected);
    if adjacent {
        Ok(car)
    } else {
        Err(ParserErr::NotStraight(letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_failure("", ParserErr::Empty);
        assert_failure("\n\n", ParserErr::Empty);
    }

    #[test]
    fn fail_no_vip() {
        let board = r"
......
..B...
..B...
";
        assert_failure(board, ParserErr::NoVip);
    }

    #[test]
    fn fail_pos() {
        let board = r"
......
AA.x..
";
        assert_failure(board, ParserErr::Pos(1, 3));
    }

    #[test]
    fn fail_ragged() {
        let board = r"
......
AA...
";
        assert_failure(board, ParserErr::Ragged(1));
    }

    #[test]
    fn fail_not_straight() {
        let board = r"
..B...
AA.B..
";
        assert_failure(board, ParserErr::NotStraight('B'));

        let gap = r"
......
AA.B.B
";
        assert_failure(gap, ParserErr::NotStraight('B'));

        let bent = r"
.BB...
AAB...
";
        assert_failure(bent, ParserErr::NotStraight('B'));
    }

    #[test]
    fn fail_board() {
        let single = r"
......
AA..B.
";
        assert_failure(single, ParserErr::Board(BoardErr::BadLength(1)));

        let vertical_vip = r"
A.....
A.....
";
        assert_failure(vertical_vip, ParserErr::Board(BoardErr::VipVertical));
    }

    #[test]
    fn cars_are_numbered_alphabetically() {
        let board: Board = r"
..C...
..C...
AA..B.
....B.
......
......
"
        .parse()
        .unwrap();
        assert_eq!(board.width(), 6);
        assert_eq!(board.height(), 6);
        assert_eq!(
            board.cars(),
            &[
                Car::horizontal(0, 2, 2),
                Car::vertical(4, 2, 2),
                Car::vertical(2, 0, 2),
            ]
        );
    }

    #[test]
    fn round_trip() {
        assert_success(
            r"
..BBB.
..C...
AAC..D
.....D
EEE..F
.....F
",
        );
        assert_success(
            r"
....AA
",
        );
    }

    #[test]
    fn skipped_letters_are_compacted() {
        let board: Board = "AA.Q\n...Q\n".parse().unwrap();
        assert_eq!(board.to_string(), "AA.B\n...B\n");
    }

    fn assert_failure(input_board: &str, expected_err: ParserErr) {
        let err = input_board.parse::<Board>().unwrap_err();
        let boxed: Box<dyn Error> = Box::new(err);
        assert_eq!(err, expected_err);
        assert_eq!(boxed.to_string(), expected_err.to_string());
    }

    fn assert_success(input_board: &str) {
        let board: Board = input_board.parse().unwrap();
        assert_eq!(board.to_string(), input_board.trim_start_matches('\n'));
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }
}
