//! Unit templates: party classes and monsters.
//!
//! Templates are static content. A [`Unit`] is stamped out of a template when
//! a scenario places it on the grid; templates themselves never appear in
//! encounter state.

use std::collections::BTreeMap;

use tactics_core::{Cell, ResourceMeter, Side, Unit, UnitId, UnitStats};

/// Stat block and reach for one kind of unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub name: String,
    pub hp: u32,
    pub mp: u32,
    pub str: u32,
    pub int: u32,
    pub def: u32,
    pub res: u32,
    pub speed: u32,
    pub mobility: u32,
    pub range: u32,
    /// Experience granted on defeat. Zero for party classes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp_reward: u32,
}

impl UnitTemplate {
    /// Creates a full-health unit from this template.
    pub fn instantiate(&self, id: UnitId, side: Side, position: Cell) -> Unit {
        Unit::new(id, self.name.clone(), side, position)
            .with_stats(UnitStats {
                hp: ResourceMeter::full(self.hp),
                mp: ResourceMeter::full(self.mp),
                str: self.str,
                int: self.int,
                def: self.def,
                res: self.res,
                speed: self.speed,
            })
            .with_mobility(self.mobility)
            .with_range(self.range)
            .with_exp_reward(self.exp_reward)
    }
}

/// Named template lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TemplateCatalog {
    templates: BTreeMap<String, UnitTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four party classes and the two stock monsters.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (id, template) in builtin_templates() {
            catalog.insert(id, template);
        }
        catalog
    }

    pub fn insert(&mut self, id: impl Into<String>, template: UnitTemplate) {
        self.templates.insert(id.into(), template);
    }

    pub fn get(&self, id: &str) -> Option<&UnitTemplate> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Merges `other` into this catalog; entries in `other` win.
    pub fn extend(&mut self, other: TemplateCatalog) {
        self.templates.extend(other.templates);
    }
}

fn template(
    name: &str,
    [hp, mp, str, int, def, res, speed]: [u32; 7],
    mobility: u32,
    range: u32,
    exp_reward: u32,
) -> UnitTemplate {
    UnitTemplate {
        name: name.to_owned(),
        hp,
        mp,
        str,
        int,
        def,
        res,
        speed,
        mobility,
        range,
        exp_reward,
    }
}

fn builtin_templates() -> [(&'static str, UnitTemplate); 6] {
    // [hp, mp, str, int, def, res, speed]
    [
        ("warrior", template("Warrior", [120, 10, 6, 1, 5, 2, 3], 2, 1, 0)),
        ("mage", template("Mage", [60, 100, 1, 8, 1, 6, 4], 3, 2, 0)),
        ("archer", template("Archer", [80, 40, 4, 2, 3, 3, 6], 4, 4, 0)),
        ("cleric", template("Cleric", [90, 60, 3, 4, 4, 5, 2], 3, 1, 0)),
        (
            "goblin_raider",
            template("Goblin Raider", [30, 0, 4, 1, 2, 1, 4], 4, 1, 50),
        ),
        (
            "orc_warrior",
            template("Orc Warrior", [80, 10, 8, 2, 5, 2, 2], 3, 1, 120),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_classes_and_monsters() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.len(), 6);

        let archer = catalog.get("archer").unwrap();
        assert_eq!((archer.speed, archer.mobility, archer.range), (6, 4, 4));

        let orc = catalog.get("orc_warrior").unwrap();
        assert_eq!((orc.str, orc.exp_reward), (8, 120));
    }

    #[test]
    fn instantiated_units_start_at_full_health() {
        let catalog = TemplateCatalog::builtin();
        let unit = catalog.get("mage").unwrap().instantiate(
            UnitId(3),
            Side::Player,
            Cell::new(1, 2),
        );

        assert_eq!(unit.stats.hp, ResourceMeter::full(60));
        assert_eq!(unit.stats.mp.current, 100);
        assert_eq!(unit.range, 2);
        assert!(unit.is_alive());
    }
}
