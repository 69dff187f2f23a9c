//! Opponent phase: weighted action picks, one per attack slot

use super::{Battle, LogCategory};
use crate::config::constants;
use crate::damage::resolve_damage_against_player;
use crate::status::{
    apply_damage_modifiers, apply_status_effect, apply_vulnerability_modifier, cannot_act,
    get_reflect_percent, get_stat_modifiers, modified_stat, strip_break_on_damage, ApplyOptions,
};
use crate::unit::Side;
use bestiary_core::{ActionCategory, DamageFormula, EnemyAction, StatusGrant};
use gear_core::{DamageKind, EffectTarget, StatusType};
use rand::Rng;

/// Self-buffs an opponent can pick from with a "buff" action
const BUFF_MENU: [StatusType; 4] = [
    StatusType::AttackUp,
    StatusType::DefenseUp,
    StatusType::SpeedUp,
    StatusType::Reflect,
];
const BUFF_DURATION: u32 = 3;
const GUARD_DURATION: u32 = 2;

impl<'a, R: Rng> Battle<'a, R> {
    pub(super) fn enemy_phase(&mut self) {
        if cannot_act(self.catalog, &self.enemy.unit) {
            let line = format!("{} cannot act", self.enemy.unit.name);
            self.log(LogCategory::Control, Some(Side::Enemy), None, line);
            return;
        }

        for _ in 0..self.enemy_attacks() {
            if !self.player.unit.is_alive() || !self.enemy.unit.is_alive() {
                return;
            }
            let action = self.enemy.actions.pick(&mut self.rng).clone();
            self.dispatch(action);
        }
    }

    /// clamp(floor(speed / divisor), 1, max)
    fn enemy_attacks(&self) -> u32 {
        let tempo = &constants().tempo;
        let mods = get_stat_modifiers(self.catalog, &self.enemy.unit);
        let speed = modified_stat(self.enemy.stats.speed, mods.speed);
        ((speed / tempo.enemy_attack_divisor).floor() as u32).clamp(1, tempo.enemy_max_attacks.max(1))
    }

    fn dispatch(&mut self, action: EnemyAction) {
        let name = self.enemy.unit.name.clone();
        let category = action.category();

        match action {
            EnemyAction::Attack(formula) => {
                self.strike_player(formula, category);
            }
            EnemyAction::Defend => {
                self.log(
                    LogCategory::Action,
                    Some(Side::Enemy),
                    Some(category),
                    format!("{} takes a defensive stance", name),
                );
                self.apply_to(Side::Enemy, StatusType::Guard, 1, GUARD_DURATION);
            }
            EnemyAction::Buff => {
                let status = BUFF_MENU[self.rng.gen_range(0..BUFF_MENU.len())];
                self.log(
                    LogCategory::Action,
                    Some(Side::Enemy),
                    Some(category),
                    format!("{} empowers itself", name),
                );
                self.apply_to(Side::Enemy, status, 1, BUFF_DURATION);
            }
            EnemyAction::Status { damage, grants } => {
                self.log(
                    LogCategory::Action,
                    Some(Side::Enemy),
                    Some(category),
                    format!("{} uses a special technique", name),
                );
                if let Some(formula) = damage {
                    self.strike_player(formula, category);
                }
                for grant in &grants {
                    if !self.player.unit.is_alive() {
                        break;
                    }
                    self.roll_grant(grant);
                }
            }
            EnemyAction::Nothing => {
                self.log(
                    LogCategory::Action,
                    Some(Side::Enemy),
                    Some(category),
                    format!("{} hesitates", name),
                );
            }
        }
    }

    /// A direct hit on the protagonist with variance, gear mitigation and reflect
    fn strike_player(&mut self, formula: DamageFormula, category: ActionCategory) {
        let variance = &constants().variance;
        let (kind, stat) = if formula.magical {
            (DamageKind::Magical, self.enemy.stats.magic)
        } else {
            (DamageKind::Physical, self.enemy.stats.attack)
        };

        let roll = if variance.enemy_max > variance.enemy_min {
            self.rng.gen_range(variance.enemy_min..=variance.enemy_max)
        } else {
            variance.enemy_min
        };
        let raw = apply_damage_modifiers(self.catalog, &self.enemy.unit, stat * formula.power * roll, kind);

        let player_mods = get_stat_modifiers(self.catalog, &self.player.unit);
        let defense = match kind {
            DamageKind::Physical => modified_stat(self.player.stats.defense, player_mods.defense),
            DamageKind::Magical => modified_stat(self.player.stats.magic_defense, player_mods.magic_defense),
        };
        let outcome = resolve_damage_against_player(raw, defense, kind, self.player.trait_totals());
        let damage = apply_vulnerability_modifier(self.catalog, &self.player.unit, outcome.damage as f64) as u32;
        let dealt = self.player.unit.take_damage(damage);

        let mut line = format!(
            "{} hits {} for {} {} damage",
            self.enemy.unit.name,
            self.player.unit.name,
            dealt,
            kind
        );
        if outcome.resistance_applied > 0.0 {
            line.push_str(&format!(" (mitigated {:.0}%)", outcome.resistance_applied));
        }
        self.log(LogCategory::Damage, Some(Side::Enemy), Some(category), line);

        if dealt == 0 {
            return;
        }

        for status in strip_break_on_damage(self.catalog, &mut self.player.unit) {
            let line = format!("{} breaks free of {}", self.player.unit.name, status);
            self.log(LogCategory::Control, Some(Side::Player), None, line);
        }

        let reflect = get_reflect_percent(self.catalog, &self.player.unit);
        if reflect > 0.0 {
            let amount = (dealt as f64 * reflect / 100.0).round() as u32;
            let taken = self.enemy.unit.take_damage(amount);
            if taken > 0 {
                let line = format!(
                    "{} reflects {} damage back to {}",
                    self.player.unit.name, taken, self.enemy.unit.name
                );
                self.log(LogCategory::Damage, Some(Side::Player), None, line);
            }
        }
    }

    fn roll_grant(&mut self, grant: &StatusGrant) {
        let target = match grant.target {
            EffectTarget::Wielder => Side::Enemy,
            EffectTarget::Opponent => Side::Player,
        };
        if self.rng.gen::<f64>() * 100.0 >= grant.chance.min(100.0) {
            let line = format!("{}'s {} fails to take hold", self.enemy.unit.name, grant.status);
            self.log(LogCategory::Status, Some(Side::Enemy), Some(ActionCategory::Status), line);
            return;
        }
        self.apply_to(target, grant.status, grant.stacks, grant.duration);
    }

    fn apply_to(&mut self, target: Side, status: StatusType, stacks: u32, duration: u32) {
        let result = apply_status_effect(
            self.catalog,
            self.unit_mut(target),
            status,
            stacks,
            duration,
            ApplyOptions::from_side(Side::Enemy),
        );
        self.log_application(target, &result);
    }
}
