use std::hash::Hash;

use fnv::FnvHashMap;

/// Breadth-first layering of an implicit graph given by a neighbor function.
///
/// Starts from a set of seeds at depth 0 and adds one layer per `advance`.
/// The frontier is the last non-empty layer, so it stays valid after the
/// traversal runs out of new nodes.
#[derive(Debug, Clone)]
pub(crate) struct Layers<N> {
    depths: FnvHashMap<N, usize>,
    order: Vec<N>,
    frontier: Vec<N>,
    depth: usize,
    exhausted: bool,
}

impl<N: Copy + Eq + Hash> Layers<N> {
    pub(crate) fn new<I: IntoIterator<Item = N>>(seeds: I) -> Self {
        let mut layers = Layers {
            depths: FnvHashMap::default(),
            order: Vec::new(),
            frontier: Vec::new(),
            depth: 0,
            exhausted: false,
        };
        for seed in seeds {
            if layers.depths.insert(seed, 0).is_none() {
                layers.order.push(seed);
                layers.frontier.push(seed);
            }
        }
        layers.exhausted = layers.frontier.is_empty();
        layers
    }

    /// Depth of the frontier.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn depth_of(&self, node: N) -> Option<usize> {
        self.depths.get(&node).cloned()
    }

    /// All discovered nodes, layer by layer.
    pub(crate) fn order(&self) -> &[N] {
        &self.order
    }

    pub(crate) fn frontier(&self) -> &[N] {
        &self.frontier
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Discovers the next layer. Returns false if it would be empty.
    pub(crate) fn advance<F, I, E>(&mut self, mut neighbors: F) -> Result<bool, E>
    where
        F: FnMut(N) -> Result<I, E>,
        I: IntoIterator<Item = N>,
    {
        if self.exhausted {
            return Ok(false);
        }

        let mut next = Vec::new();
        for &node in &self.frontier {
            for neighbor in neighbors(node)? {
                if !self.depths.contains_key(&neighbor) {
                    self.depths.insert(neighbor, self.depth + 1);
                    self.order.push(neighbor);
                    next.push(neighbor);
                }
            }
        }

        if next.is_empty() {
            self.exhausted = true;
            return Ok(false);
        }
        self.frontier = next;
        self.depth += 1;
        Ok(true)
    }

    /// Advances until the frontier is at `depth` or nothing new is found.
    pub(crate) fn run_to<F, I, E>(&mut self, depth: usize, mut neighbors: F) -> Result<(), E>
    where
        F: FnMut(N) -> Result<I, E>,
        I: IntoIterator<Item = N>,
    {
        while self.depth < depth && self.advance(&mut neighbors)? {}
        Ok(())
    }

    pub(crate) fn run_to_end<F, I, E>(&mut self, mut neighbors: F) -> Result<(), E>
    where
        F: FnMut(N) -> Result<I, E>,
        I: IntoIterator<Item = N>,
    {
        while self.advance(&mut neighbors)? {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    // a path 0 - 1 - 2 - ... - 9
    fn line(n: u32) -> Result<Vec<u32>, Infallible> {
        let mut neighbors = Vec::new();
        if n > 0 {
            neighbors.push(n - 1);
        }
        if n < 9 {
            neighbors.push(n + 1);
        }
        Ok(neighbors)
    }

    #[test]
    fn layers_of_a_line() {
        let mut layers = Layers::new(vec![0]);
        assert_eq!(layers.advance(line), Ok(true));
        assert_eq!(layers.frontier(), &[1]);

        layers.run_to(4, line).unwrap();
        assert_eq!(layers.depth(), 4);
        assert_eq!(layers.frontier(), &[4]);
        assert_eq!(layers.depth_of(3), Some(3));
        assert_eq!(layers.depth_of(5), None);

        // going back is a no-op
        layers.run_to(2, line).unwrap();
        assert_eq!(layers.depth(), 4);

        layers.run_to_end(line).unwrap();
        assert!(layers.is_exhausted());
        assert_eq!(layers.depth(), 9);
        assert_eq!(layers.frontier(), &[9]);
        assert_eq!(layers.order(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn multiple_seeds() {
        let mut layers = Layers::new(vec![0, 9, 0]);
        assert_eq!(layers.order(), &[0, 9]);
        layers.run_to_end(line).unwrap();
        assert_eq!(layers.depth(), 4);
        assert_eq!(layers.depth_of(4), Some(4));
        assert_eq!(layers.depth_of(5), Some(4));
        assert_eq!(layers.frontier(), &[4, 5]);
    }

    #[test]
    fn errors_are_propagated() {
        let mut layers = Layers::new(vec![0u32]);
        let failing = |_: u32| -> Result<Vec<u32>, &'static str> { Err("broken") };
        assert_eq!(layers.advance(failing), Err("broken"));
    }

    #[test]
    fn no_seeds() {
        let mut layers: Layers<u32> = Layers::new(vec![]);
        assert!(layers.is_exhausted());
        assert_eq!(layers.advance(line), Ok(false));
    }
}
