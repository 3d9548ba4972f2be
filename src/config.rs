use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Bfs,
    Ids,
    Equivalence,
    BestFirst,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::Bfs => write!(f, "bfs"),
            Method::Ids => write!(f, "ids"),
            Method::Equivalence => write!(f, "equivalence"),
            Method::BestFirst => write!(f, "best-first"),
        }
    }
}
