//! Damage calculation and application.

/// Floor applied to every successful attack so hits are never nullified.
pub const MINIMUM_DAMAGE: u32 = 1;

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// final_damage = max(MINIMUM_DAMAGE, attack - defense)
/// ```
pub fn calculate_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(MINIMUM_DAMAGE)
}

/// Apply damage to current HP.
///
/// Returns the new HP value, clamped to 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_above_defense_deals_the_difference() {
        assert_eq!(calculate_damage(8, 5), 3);
    }

    #[test]
    fn weak_attacks_still_deal_one() {
        assert_eq!(calculate_damage(5, 8), 1);
        assert_eq!(calculate_damage(0, 0), 1);
    }

    #[test]
    fn hp_never_goes_below_zero() {
        assert_eq!(apply_damage(3, 10), 0);
        assert_eq!(apply_damage(10, 3), 7);
    }
}
