use std::borrow::Cow;
use std::error::Error;
use std::path::Path;

use dot::{self, Edges, GraphWalk, Id, LabelText, Labeller, Nodes, Style};

use crate::fs;
use crate::moves::Move;
use crate::solver::equivalence::EquivalenceClass;
use crate::solver::graph::VertexId;

type Nd = VertexId;
type Ed = (VertexId, Move, VertexId);

/// The state space of a class, each pair of opposite moves drawn as one edge.
#[derive(Debug)]
struct ClassGraph<'a> {
    class: &'a EquivalenceClass,
    edges: Vec<Ed>,
}

impl<'a> ClassGraph<'a> {
    fn new(class: &'a EquivalenceClass) -> Self {
        let graph = class.graph();
        let mut edges = Vec::new();
        for source in graph.ids() {
            for edge in graph.edges(source) {
                if source < edge.target {
                    edges.push((source, edge.mov, edge.target));
                }
            }
        }
        Self { class, edges }
    }
}

impl<'a> GraphWalk<'a, Nd, Ed> for ClassGraph<'a> {
    fn nodes(&'a self) -> Nodes<'a, Nd> {
        self.class.graph().ids().collect()
    }

    fn edges(&'a self) -> Edges<'a, Ed> {
        Cow::from(&self.edges)
    }

    fn source(&'a self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&'a self, e: &Ed) -> Nd {
        e.2
    }
}

impl<'a> Labeller<'a, Nd, Ed> for ClassGraph<'a> {
    fn graph_id(&'a self) -> Id<'a> {
        Id::new("G").unwrap()
    }

    fn node_id(&'a self, n: &Nd) -> Id<'a> {
        Id::new(format!("N{}", n.index())).unwrap()
    }

    fn node_label(&'a self, n: &Nd) -> LabelText<'a> {
        let board = &self.class.graph()[*n];
        let depth = match self.class.depth_of_board(board) {
            Ok(Some(depth)) => depth.to_string(),
            _ => "-".to_string(),
        };
        LabelText::EscStr(format!("d: {}\n{}", depth, board).into())
    }

    fn edge_label(&'a self, e: &Ed) -> LabelText<'a> {
        LabelText::LabelStr(e.1.to_string().into())
    }

    fn node_style(&'a self, n: &Nd) -> Style {
        if self.class.graph()[*n].is_solved() {
            Style::Filled
        } else {
            Style::Solid
        }
    }

    fn node_color(&'a self, n: &Nd) -> Option<LabelText<'a>> {
        if *n == self.class.graph().ids().next()? {
            Some(LabelText::LabelStr("red".into()))
        } else {
            None
        }
    }
}

/// Graphviz source of the whole class, the seed is red and solutions are filled.
pub fn render_class(class: &EquivalenceClass) -> Result<String, Box<dyn Error>> {
    let mut writer = Vec::new();
    dot::render(&ClassGraph::new(class), &mut writer)?;
    let s = String::from_utf8(writer)?;
    Ok(s.replace(
        "digraph G {",
        "digraph G {\n    graph [fontname = \"hack\"];\n    node [fontname = \"hack\"];\n    edge [fontname = \"hack\", dir = none];",
    ))
}

pub fn write_class<P: AsRef<Path>>(class: &EquivalenceClass, path: P) -> Result<(), Box<dyn Error>> {
    fs::write_file(path, &render_class(class)?)
}
