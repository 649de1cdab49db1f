//! Static catalogues of order shapes and tome deltas.
//!
//! The game draws orders and tome spells from fixed decks. Knowing the decks
//! up front lets the agent precompute, once per process, which tome deltas
//! are worth learning for each order shape. The table is immutable after
//! construction and shared read-only across turns.

use std::collections::HashMap;

use cauldron_types::Ingredients;
use tracing::debug;

/// Every order requirement the game can deal.
pub const ORDER_SHAPES: [[i32; 4]; 36] = [
    [2, 2, 0, 0],
    [3, 2, 0, 0],
    [0, 4, 0, 0],
    [2, 0, 2, 0],
    [2, 3, 0, 0],
    [3, 0, 2, 0],
    [0, 2, 2, 0],
    [0, 5, 0, 0],
    [2, 0, 0, 2],
    [2, 0, 3, 0],
    [3, 0, 0, 2],
    [0, 0, 4, 0],
    [0, 2, 0, 2],
    [0, 3, 2, 0],
    [0, 2, 3, 0],
    [0, 0, 5, 0],
    [0, 0, 2, 2],
    [0, 3, 0, 2],
    [2, 0, 0, 3],
    [0, 0, 0, 4],
    [0, 2, 0, 3],
    [0, 0, 3, 2],
    [0, 0, 2, 3],
    [0, 0, 0, 5],
    [2, 1, 0, 1],
    [0, 2, 1, 1],
    [1, 0, 2, 1],
    [2, 2, 2, 0],
    [2, 2, 0, 2],
    [2, 0, 2, 2],
    [0, 2, 2, 2],
    [1, 1, 1, 1],
    [3, 1, 1, 1],
    [1, 3, 1, 1],
    [1, 1, 3, 1],
    [1, 1, 1, 3],
];

/// Every spell delta the tome can offer.
pub const TOME_DELTAS: [[i32; 4]; 42] = [
    [-3, 0, 0, 1],
    [3, -1, 0, 0],
    [1, 1, 0, 0],
    [0, 0, 1, 0],
    [3, 0, 0, 0],
    [2, 3, -2, 0],
    [2, 1, -2, 1],
    [3, 0, 1, -1],
    [3, -2, 1, 0],
    [2, -3, 2, 0],
    [2, 2, 0, -1],
    [-4, 0, 2, 0],
    [2, 1, 0, 0],
    [4, 0, 0, 0],
    [0, 0, 0, 1],
    [0, 2, 0, 0],
    [1, 0, 1, 0],
    [-2, 0, 1, 0],
    [-1, -1, 0, 1],
    [0, 2, -1, 0],
    [2, -2, 0, 1],
    [-3, 1, 1, 0],
    [0, 2, -2, 1],
    [1, -3, 1, 1],
    [0, 3, 0, -1],
    [0, -3, 0, 2],
    [1, 1, 1, -1],
    [1, 2, -1, 0],
    [4, 1, -1, 0],
    [-5, 0, 0, 2],
    [-4, 0, 1, 1],
    [0, 3, 2, -2],
    [1, 1, 3, -2],
    [-5, 0, 3, 0],
    [-2, 0, -1, 2],
    [0, 0, -3, 3],
    [0, -3, 3, 0],
    [-3, 3, 0, 0],
    [-2, 2, 0, 0],
    [0, 0, -2, 2],
    [0, -2, 2, 0],
    [0, 0, 2, -1],
];

/// Tome deltas known to pay off whenever they are cheap to learn.
pub const HIGH_VALUE_DELTAS: [[i32; 4]; 7] = [
    [-3, 0, 0, 1],
    [-5, 0, 0, 2],
    [-4, 0, 1, 1],
    [-2, 0, 1, 0],
    [-1, -1, 0, 1],
    [-5, 0, 3, 0],
    [2, 1, -2, 1],
];

/// True if `delta` is one of [`HIGH_VALUE_DELTAS`].
pub fn is_high_value(delta: &Ingredients) -> bool {
    HIGH_VALUE_DELTAS
        .iter()
        .any(|known| Ingredients::new(*known) == *delta)
}

/// Order shape to the tome deltas whose output covers enough of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityTable {
    entries: HashMap<Ingredients, Vec<Ingredients>>,
}

impl CompatibilityTable {
    /// Build the table from explicit catalogues.
    ///
    /// A tome delta is compatible with an order shape when the ingredients
    /// it produces cover at least `coverage` of the order's weighted cost.
    /// Order shapes with no compatible delta are still present, mapped to an
    /// empty list. Deltas keep catalogue order.
    pub fn build(order_shapes: &[Ingredients], tome_deltas: &[Ingredients], coverage: f64) -> Self {
        let mut entries = HashMap::with_capacity(order_shapes.len());
        for shape in order_shapes {
            let compatible: Vec<Ingredients> = tome_deltas
                .iter()
                .filter(|delta| delta.positive_part().covers(shape, coverage).unwrap_or(false))
                .copied()
                .collect();
            entries.insert(*shape, compatible);
        }
        let table = Self { entries };
        debug!(
            order_shapes = table.entries.len(),
            pairs = table.pair_count(),
            coverage,
            "compatibility table built"
        );
        table
    }

    /// Build the table from [`ORDER_SHAPES`] and [`TOME_DELTAS`].
    pub fn from_catalogue(coverage: f64) -> Self {
        let shapes: Vec<Ingredients> = ORDER_SHAPES.iter().copied().map(Ingredients::new).collect();
        let deltas: Vec<Ingredients> = TOME_DELTAS.iter().copied().map(Ingredients::new).collect();
        Self::build(&shapes, &deltas, coverage)
    }

    /// Compatible tome deltas for an order requirement. Empty for shapes
    /// outside the catalogue.
    pub fn patterns_for(&self, requirement: &Ingredients) -> &[Ingredients] {
        self.entries.get(requirement).map_or(&[], Vec::as_slice)
    }

    /// Number of order shapes in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no order shapes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (order shape, tome delta) pairs.
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
