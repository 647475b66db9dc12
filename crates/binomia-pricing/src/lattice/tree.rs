//! Lattice storage and node addressing.

use std::fmt;

/// Identity of a lattice node: time index, number of up moves, number of
/// down moves.
///
/// `up + down == time` always holds. The down count is redundant for a
/// recombining binomial tree but is kept so the key keeps its shape for
/// trinomial lattices, where it is not derivable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    time: usize,
    up: usize,
    down: usize,
}

impl NodeKey {
    /// The root node `(0, 0, 0)`.
    pub const ROOT: Self = Self {
        time: 0,
        up: 0,
        down: 0,
    };

    /// Creates a key from the full triple.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `up + down != time`.
    #[must_use]
    pub fn new(time: usize, up: usize, down: usize) -> Self {
        debug_assert_eq!(up + down, time, "node key must satisfy up + down == time");
        Self { time, up, down }
    }

    /// Creates the key at `time` with `up` up moves.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `up > time`.
    #[must_use]
    pub fn at(time: usize, up: usize) -> Self {
        debug_assert!(up <= time, "up count {up} exceeds time index {time}");
        Self {
            time,
            up,
            down: time - up,
        }
    }

    /// Time index.
    #[must_use]
    pub fn time(&self) -> usize {
        self.time
    }

    /// Number of up moves.
    #[must_use]
    pub fn up(&self) -> usize {
        self.up
    }

    /// Number of down moves.
    #[must_use]
    pub fn down(&self) -> usize {
        self.down
    }

    /// Child reached by an up move.
    #[must_use]
    pub fn up_child(&self) -> Self {
        Self {
            time: self.time + 1,
            up: self.up + 1,
            down: self.down,
        }
    }

    /// Child reached by a down move.
    #[must_use]
    pub fn down_child(&self) -> Self {
        Self {
            time: self.time + 1,
            up: self.up,
            down: self.down + 1,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.time, self.up, self.down)
    }
}

/// Option values at every node of a recombining binomial tree.
///
/// # Structure
///
/// At time step `i` there are `i + 1` nodes. The node with `j` up moves is
/// stored at `values[i][j]`; the logical key is `(i, j, i - j)`.
///
/// ```text
///                    (0,0,0)
///                   /       \
///            (1,1,0)         (1,0,1)
///           /      \        /       \
///     (2,2,0)       (2,1,1)          (2,0,2)
/// ```
///
/// Every node is retained after backward induction so callers can inspect
/// the full tree, not just the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    /// `values[i][j]` = value at time step `i` after `j` up moves.
    values: Vec<Vec<f64>>,
}

impl Lattice {
    /// Creates a zero-filled lattice with `steps` time steps.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        let values = (0..=steps).map(|i| vec![0.0; i + 1]).collect();
        Self { values }
    }

    /// Number of time steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.values.len() - 1
    }

    /// Total number of nodes, `(n + 1)(n + 2) / 2`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let n = self.steps();
        (n + 1) * (n + 2) / 2
    }

    /// Value stored at `key`, or `None` if the key is outside the tree.
    #[must_use]
    pub fn value(&self, key: NodeKey) -> Option<f64> {
        self.values
            .get(key.time())
            .and_then(|layer| layer.get(key.up()))
            .copied()
    }

    /// Value at the root, i.e. the option price.
    #[must_use]
    pub fn root(&self) -> f64 {
        self.values[0][0]
    }

    /// All values at one time step, ordered by up count.
    #[must_use]
    pub fn layer(&self, time_step: usize) -> Option<&[f64]> {
        self.values.get(time_step).map(Vec::as_slice)
    }

    /// Iterates over `(key, value)` for every node, root first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, f64)> + '_ {
        self.values.iter().enumerate().flat_map(|(i, layer)| {
            layer
                .iter()
                .enumerate()
                .map(move |(j, &v)| (NodeKey::at(i, j), v))
        })
    }

    pub(crate) fn set(&mut self, key: NodeKey, value: f64) {
        self.values[key.time()][key.up()] = value;
    }

    /// Value at `key`, which must be inside the tree.
    #[inline]
    pub(crate) fn get(&self, key: NodeKey) -> f64 {
        self.values[key.time()][key.up()]
    }
}
