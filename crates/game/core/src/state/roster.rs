//! Ordered unit roster owned by an encounter.

use super::types::{Side, Unit, UnitId};

/// Ordered list of every unit in one encounter.
///
/// Insertion order is significant: it breaks initiative ties and the enemy
/// policy's nearest-target ties. Dead units are never removed so ids and
/// history stay stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from the party followed by the enemy spawn list.
    pub fn from_sides(party: Vec<Unit>, enemies: Vec<Unit>) -> Self {
        let mut units = party;
        units.extend(enemies);
        Self { units }
    }

    pub fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    pub fn as_slice(&self) -> &[Unit] {
        &self.units
    }

    pub fn index_of(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|unit| unit.id == id)
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    /// Mutable access to two distinct units at once.
    ///
    /// Returns `None` if either id is unknown or both ids are equal.
    pub fn pair_mut(&mut self, first: UnitId, second: UnitId) -> Option<(&mut Unit, &mut Unit)> {
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;
        if a == b {
            return None;
        }

        if a < b {
            let (left, right) = self.units.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.units.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// Living units of the given side, in roster order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .filter(move |unit| unit.side == side && unit.is_alive())
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |unit| unit.side == side)
    }

    /// True when no unit of `side` is alive.
    pub fn is_wiped(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
