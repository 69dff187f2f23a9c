//! Protagonist phase: every weapon swings in equip order

use super::{Battle, LogCategory};
use crate::attack::{attack, AttackResult, EffectiveStats, StagedEffect};
use crate::config::constants;
use crate::status::{
    apply_status_effect, cannot_act, get_reflect_percent, get_stat_modifiers, modified_stat,
    strip_break_on_damage, ApplyOptions, ApplyOutcome, ApplyResult,
};
use crate::unit::Side;
use gear_core::{EffectTarget, Weapon};
use rand::Rng;

impl<'a, R: Rng> Battle<'a, R> {
    pub(super) fn player_phase(&mut self) {
        if cannot_act(self.catalog, &self.player.unit) {
            let line = format!("{} cannot act", self.player.unit.name);
            self.log(LogCategory::Control, Some(Side::Player), None, line);
            return;
        }

        let weapons: Vec<Weapon> = self.player.weapons().to_vec();
        if weapons.is_empty() {
            let line = format!("{} has nothing to attack with", self.player.unit.name);
            self.log(LogCategory::System, Some(Side::Player), None, line);
            return;
        }

        for weapon in &weapons {
            let swings = self.swings_for(weapon);
            for _ in 0..swings {
                if !self.player.unit.is_alive() || !self.enemy.unit.is_alive() {
                    return;
                }
                self.swing(weapon);
            }
        }
    }

    /// clamp(floor(speed / divisor) + 1, 1, max)
    fn swings_for(&self, weapon: &Weapon) -> u32 {
        let tempo = &constants().tempo;
        let stats = EffectiveStats::snapshot(weapon, &self.player.stats, &self.synergy);
        let speed = modified_stat(stats.speed, get_stat_modifiers(self.catalog, &self.player.unit).speed);
        let swings = (speed / tempo.player_swing_divisor).floor() as u32 + 1;
        swings.clamp(1, tempo.player_max_swings.max(1))
    }

    fn swing(&mut self, weapon: &Weapon) {
        let result = attack(
            self.catalog,
            weapon,
            &*self.player,
            &mut self.enemy,
            &self.synergy,
            &mut self.rng,
        );
        self.log_swing(weapon, &result);

        if result.actual_damage_inflicted > 0 {
            for status in strip_break_on_damage(self.catalog, &mut self.enemy.unit) {
                let line = format!("{} breaks free of {}", self.enemy.unit.name, status);
                self.log(LogCategory::Control, Some(Side::Enemy), None, line);
            }
        }

        for staged in &result.status_effects {
            self.commit_staged(staged);
        }

        if result.actual_damage_inflicted > 0 && self.player.stats.life_steal > 0.0 {
            let amount = (result.actual_damage_inflicted as f64 * self.player.stats.life_steal / 100.0).round() as u32;
            let healed = self.player.unit.heal(amount);
            if healed > 0 {
                let line = format!("{} steals {} HP", self.player.unit.name, healed);
                self.log(LogCategory::Heal, Some(Side::Player), None, line);
            }
        }

        let reflect = get_reflect_percent(self.catalog, &self.enemy.unit);
        if reflect > 0.0 && result.actual_damage_inflicted > 0 {
            let amount = (result.actual_damage_inflicted as f64 * reflect / 100.0).round() as u32;
            let taken = self.player.unit.take_damage(amount);
            if taken > 0 {
                let line = format!(
                    "{} reflects {} damage back to {}",
                    self.enemy.unit.name, taken, self.player.unit.name
                );
                self.log(LogCategory::Damage, Some(Side::Enemy), None, line);
            }
        }
    }

    fn log_swing(&mut self, weapon: &Weapon, result: &AttackResult) {
        if result.blocked {
            let line = format!(
                "{}'s {} attack has no effect on {}",
                self.player.unit.name, weapon.weapon_type, self.enemy.unit.name
            );
            self.log(LogCategory::Damage, Some(Side::Player), None, line);
            return;
        }

        let mut line = format!(
            "{} hits {} with {} for {} damage",
            self.player.unit.name, self.enemy.unit.name, weapon.name, result.actual_damage_inflicted
        );
        if result.resistance_applied != 0.0 {
            line.push_str(&format!(" (resistance {:.0}%)", result.resistance_applied));
        }
        if result.penetration > 0.0 {
            line.push_str(&format!(" (penetration {:.0}%)", result.penetration));
        }

        let category = if result.is_critical {
            line = format!("{}! {}", result.critical_tier, line);
            LogCategory::Critical
        } else {
            LogCategory::Damage
        };
        self.log(category, Some(Side::Player), None, line);
    }

    fn commit_staged(&mut self, staged: &StagedEffect) {
        let target = match staged.target {
            EffectTarget::Wielder => Side::Player,
            EffectTarget::Opponent => Side::Enemy,
        };
        let opts = ApplyOptions::from_side(Side::Player).with_power_scale(staged.power_scale);
        let result = apply_status_effect(
            self.catalog,
            self.unit_mut(target),
            staged.status,
            staged.stacks,
            staged.duration,
            opts,
        );
        self.log_application(target, &result);
    }

    /// Shared by both phases
    pub(super) fn log_application(&mut self, target: Side, result: &ApplyResult) {
        let name = self.unit(target).name.clone();
        let line = match result.outcome {
            ApplyOutcome::Applied => {
                let mut line = format!(
                    "{} gains {} ({} stack{}, {} turns)",
                    name,
                    result.status,
                    result.stacks,
                    if result.stacks == 1 { "" } else { "s" },
                    result.duration
                );
                if result.resistance > 0.0 {
                    line.push_str(&format!(" (resistance {:.0}%)", result.resistance));
                }
                line
            }
            ApplyOutcome::Immune => format!("{} is immune to {}", name, result.status),
            ApplyOutcome::Resisted => format!(
                "{} resists {} (resistance {:.0}%)",
                name, result.status, result.resistance
            ),
            ApplyOutcome::Banned | ApplyOutcome::Unknown => {
                format!("{} cannot be applied to {}", result.status, name)
            }
        };
        self.log(LogCategory::Status, Some(target), None, line);
    }
}
