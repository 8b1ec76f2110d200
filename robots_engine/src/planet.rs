use std::collections::BTreeSet;

/// A bounded rectangular grid spanning `[0, x_boundary] x [0, y_boundary]`.
///
/// The planet also remembers every cell a robot fell off from. Those cells carry
/// a "scent" that stops later robots from being lost over the same edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Planet {
    x_boundary: u32,
    y_boundary: u32,
    scents: BTreeSet<(i64, i64)>,
}

impl Planet {
    pub fn new(x_boundary: u32, y_boundary: u32) -> Planet {
        Planet {
            x_boundary,
            y_boundary,
            scents: BTreeSet::new(),
        }
    }

    pub fn x_boundary(&self) -> u32 {
        self.x_boundary
    }

    pub fn y_boundary(&self) -> u32 {
        self.y_boundary
    }

    /// Whether `(x, y)` lies on the grid, edges included.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..=i64::from(self.x_boundary)).contains(&x)
            && (0..=i64::from(self.y_boundary)).contains(&y)
    }

    pub fn has_scent_at(&self, x: i64, y: i64) -> bool {
        self.scents.contains(&(x, y))
    }

    /// Marks `(x, y)` as scented. Adding the same cell twice has no further effect.
    pub fn add_scent(&mut self, x: i64, y: i64) {
        self.scents.insert((x, y));
    }

    /// Scented cells ordered by `x` then `y`.
    pub fn scents(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.scents.iter().copied()
    }

    pub fn scent_count(&self) -> usize {
        self.scents.len()
    }
}
