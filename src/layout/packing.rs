use chrono::NaiveDateTime;

use crate::ir::CareerItem;

/// Lane occupancy for one category during one preparation pass.
///
/// Entry `i` holds the end of the interval currently occupying layer `i`.
/// Layers are claimed in order, so the occupied layers are always `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerOccupancy {
    until: Vec<NaiveDateTime>,
}

impl LayerOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer_count(&self) -> usize {
        self.until.len()
    }

    pub fn occupied_until(&self, layer: usize) -> Option<NaiveDateTime> {
        self.until.get(layer).copied()
    }

    /// Greedy first-fit: the lowest layer whose occupant ends at or before
    /// `start` is reused, otherwise a new layer is opened on top.
    pub fn claim(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> usize {
        for (layer, until) in self.until.iter_mut().enumerate() {
            if start >= *until {
                *until = end;
                return layer;
            }
        }
        self.until.push(end);
        self.until.len() - 1
    }
}

/// Assign `item` to a lane of its category.
///
/// Items must be fed in ascending start order; items starting on the same
/// day keep their input order.
pub fn assign_layer(item: &CareerItem, occupancy: &mut LayerOccupancy, now: NaiveDateTime) -> usize {
    occupancy.claim(item.start(), item.effective_end(now))
}
