use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    cols: u8,
    rows: u8,
}

impl<T: Copy> Vec2d<T> {
    pub(crate) fn new(cols: u8, rows: u8, default: T) -> Self {
        Vec2d {
            data: vec![default; usize::from(cols) * usize::from(rows)],
            cols,
            rows,
        }
    }
}

impl<T> Vec2d<T> {
    pub(crate) fn cols(&self) -> u8 {
        self.cols
    }

    pub(crate) fn rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.cols) && y < i32::from(self.rows)
    }
}

impl<T: Debug> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.into()) {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        let index = usize::from(index.y) * usize::from(self.cols) + usize::from(index.x);
        &self.data[index]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = usize::from(index.y) * usize::from(self.cols) + usize::from(index.x);
        &mut self.data[index]
    }
}
