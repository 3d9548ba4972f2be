use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::data::{car_letter, Orientation, Pos, MAX_CARS, MAX_SIZE};
use crate::moves::Move;
use crate::solver::SolverErr;
use crate::vec2d::Vec2d;

/// Marks an empty cell in the grid, any other value is a car id.
const EMPTY: u8 = 255;

/// Id of the car that has to reach the exit.
pub const VIP: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Car {
    pub x: u8,
    pub y: u8,
    pub len: u8,
    pub orientation: Orientation,
}

impl Car {
    pub fn new(x: u8, y: u8, len: u8, orientation: Orientation) -> Self {
        Car {
            x,
            y,
            len,
            orientation,
        }
    }

    pub fn horizontal(x: u8, y: u8, len: u8) -> Self {
        Car::new(x, y, len, Orientation::Horizontal)
    }

    pub fn vertical(x: u8, y: u8, len: u8) -> Self {
        Car::new(x, y, len, Orientation::Vertical)
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> {
        let car = *self;
        (0..car.len).map(move |i| match car.orientation {
            Orientation::Horizontal => Pos::new(car.x + i, car.y),
            Orientation::Vertical => Pos::new(car.x, car.y + i),
        })
    }

    /// Anchor coordinate along the direction of travel.
    fn lead(&self) -> u8 {
        match self.orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    fn slid(&self, dist: i8) -> Car {
        let lead = (i32::from(self.lead()) + i32::from(dist)) as u8;
        match self.orientation {
            Orientation::Horizontal => Car { x: lead, ..*self },
            Orientation::Vertical => Car { y: lead, ..*self },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardErr {
    NoVip,
    VipVertical,
    TooLarge,
    TooManyCars,
    BadLength(u8),
    OutOfBounds(u8),
    Overlap(u8, u8),
}

impl Display for BoardErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            BoardErr::NoVip => write!(f, "No VIP car"),
            BoardErr::VipVertical => write!(f, "The VIP car must be horizontal"),
            BoardErr::TooLarge => write!(f, "Board larger than {} rows/columns", MAX_SIZE),
            BoardErr::TooManyCars => write!(f, "More than {} cars", MAX_CARS),
            BoardErr::BadLength(id) => {
                write!(f, "Car {} must be 2 or 3 cells long", car_letter(id))
            }
            BoardErr::OutOfBounds(id) => write!(f, "Car {} is outside the board", car_letter(id)),
            BoardErr::Overlap(a, b) => {
                write!(f, "Cars {} and {} overlap", car_letter(a), car_letter(b))
            }
        }
    }
}

impl Error for BoardErr {}

/// Immutable puzzle state. Equality and hashing only look at the dimensions and the
/// ordered car list, the grid is derived from them.
#[derive(Clone)]
pub struct Board {
    cars: Vec<Car>,
    grid: Vec2d<u8>,
}

impl Board {
    pub fn new(width: u8, height: u8, cars: Vec<Car>) -> Result<Board, BoardErr> {
        if usize::from(width) > MAX_SIZE || usize::from(height) > MAX_SIZE {
            return Err(BoardErr::TooLarge);
        }
        if cars.is_empty() {
            return Err(BoardErr::NoVip);
        }
        if cars.len() > MAX_CARS {
            return Err(BoardErr::TooManyCars);
        }
        if !cars[usize::from(VIP)].is_horizontal() {
            return Err(BoardErr::VipVertical);
        }

        let mut grid = Vec2d::new(width, height, EMPTY);
        for (id, car) in cars.iter().enumerate() {
            let id = id as u8;
            if car.len < 2 || car.len > 3 {
                return Err(BoardErr::BadLength(id));
            }
            let (end_x, end_y) = match car.orientation {
                Orientation::Horizontal => (i32::from(car.x) + i32::from(car.len) - 1, i32::from(car.y)),
                Orientation::Vertical => (i32::from(car.x), i32::from(car.y) + i32::from(car.len) - 1),
            };
            if !grid.contains(end_x, end_y) {
                return Err(BoardErr::OutOfBounds(id));
            }
            for pos in car.cells() {
                if grid[pos] != EMPTY {
                    return Err(BoardErr::Overlap(grid[pos], id));
                }
                grid[pos] = id;
            }
        }

        Ok(Board { cars, grid })
    }

    pub fn width(&self) -> u8 {
        self.grid.cols()
    }

    pub fn height(&self) -> u8 {
        self.grid.rows()
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn vip(&self) -> Car {
        self.cars[usize::from(VIP)]
    }

    /// Id of the car covering `pos`, `None` for empty cells.
    pub fn car_at(&self, pos: Pos) -> Option<u8> {
        match self.grid[pos] {
            EMPTY => None,
            id => Some(id),
        }
    }

    pub fn is_solved(&self) -> bool {
        let vip = self.vip();
        vip.x + vip.len == self.width()
    }

    /// Every legal move ordered by car id and then by signed distance,
    /// so all moves backwards come before the moves forwards.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (id, car) in self.cars.iter().enumerate() {
            let (back, forward) = self.free_run(car);
            for dist in (1..=back).rev() {
                moves.push(Move::new(id as u8, -dist, car.orientation));
            }
            for dist in 1..=forward {
                moves.push(Move::new(id as u8, dist, car.orientation));
            }
        }
        moves
    }

    /// False for unknown cars and cars boxed in on both ends.
    pub fn can_move(&self, id: u8) -> bool {
        match self.cars.get(usize::from(id)) {
            Some(car) => self.free_run(car) != (0, 0),
            None => false,
        }
    }

    pub fn is_legal(&self, mov: &Move) -> bool {
        let car = match self.cars.get(usize::from(mov.car)) {
            Some(car) => car,
            None => return false,
        };
        if car.orientation != mov.orientation || mov.dist == 0 {
            return false;
        }
        let (back, forward) = self.free_run(car);
        -back <= mov.dist && mov.dist <= forward
    }

    pub fn apply(&self, mov: &Move) -> Result<Board, SolverErr> {
        if self.is_legal(mov) {
            Ok(self.moved(mov))
        } else {
            Err(SolverErr::IllegalMove(*mov))
        }
    }

    /// Applies a move without checking it, `mov` must come from `legal_moves`.
    pub(crate) fn moved(&self, mov: &Move) -> Board {
        let id = mov.car;
        let old = self.cars[usize::from(id)];
        let new = old.slid(mov.dist);

        let mut board = self.clone();
        for pos in old.cells() {
            board.grid[pos] = EMPTY;
        }
        for pos in new.cells() {
            board.grid[pos] = id;
        }
        board.cars[usize::from(id)] = new;
        board
    }

    /// Number of empty cells behind and in front of the car along its orientation.
    fn free_run(&self, car: &Car) -> (i8, i8) {
        let lead = i32::from(car.lead());
        let is_free = |i: i32| {
            let (x, y) = match car.orientation {
                Orientation::Horizontal => (i, i32::from(car.y)),
                Orientation::Vertical => (i32::from(car.x), i),
            };
            self.grid.contains(x, y) && self.grid[Pos::new(x as u8, y as u8)] == EMPTY
        };

        let mut back = 0;
        while is_free(lead - back - 1) {
            back += 1;
        }

        let tail = lead + i32::from(car.len);
        let mut forward = 0;
        while is_free(tail + forward) {
            forward += 1;
        }

        (back as i8, forward as i8)
    }

    /// Key shared by boards that differ only in how the non-VIP cars are numbered.
    pub fn canonical_key(&self) -> (u8, u8, Vec<Car>) {
        let mut others = self.cars[1..].to_vec();
        others.sort();
        let mut cars = Vec::with_capacity(self.cars.len());
        cars.push(self.vip());
        cars.extend(others);
        (self.width(), self.height(), cars)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height() && self.cars == other.cars
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width().hash(state);
        self.height().hash(state);
        self.cars.hash(state);
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                match self.car_at(Pos::new(x, y)) {
                    None => write!(f, ".")?,
                    Some(id) => write!(f, "{}", car_letter(id))?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
