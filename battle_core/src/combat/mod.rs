//! Combat orchestration - drives one battle to a terminal outcome
//!
//! Each turn runs in a fixed order:
//! 1. Status phase (protagonist, then opponent)
//! 2. Protagonist weapons
//! 3. Opponent actions
//!
//! with an end check after every phase.

mod enemy_phase;
mod generate;
mod log;
mod player_phase;
mod rewards;

pub use generate::{generate_enemy, sparring_enemy, GenerateOptions};
pub use log::{CombatLog, CombatLogEntry, LogCategory};
pub use rewards::{calculate_exp_reward, calculate_next_level_exp};

use crate::status::{process_status_effects, StatusCatalog, StatusTick};
use crate::unit::{CombatUnit, Enemy, Player, Side};
use bestiary_core::ActionCategory;
use gear_core::{calculate_synergy, SynergyBonus};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// How a finished battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    PlayerVictory,
    PlayerDefeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    Ongoing,
    Finished(BattleOutcome),
}

/// One encounter between the protagonist and a single opponent
///
/// The protagonist is borrowed for the battle; HP and effects are mutated
/// in place. The opponent is owned and can be taken back with `into_enemy`.
pub struct Battle<'a, R: Rng = ChaCha8Rng> {
    catalog: &'a StatusCatalog,
    player: &'a mut Player,
    enemy: Enemy,
    synergy: SynergyBonus,
    turn: u32,
    state: BattleState,
    log: CombatLog,
    rng: R,
}

impl<'a> Battle<'a, ChaCha8Rng> {
    /// Start a battle with a seeded RNG (same seed, same battle)
    pub fn new(catalog: &'a StatusCatalog, player: &'a mut Player, enemy: Enemy, seed: u64) -> Self {
        Self::with_rng(catalog, player, enemy, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> Battle<'a, R> {
    pub fn with_rng(catalog: &'a StatusCatalog, player: &'a mut Player, enemy: Enemy, rng: R) -> Self {
        let synergy = calculate_synergy(player.weapons());
        let mut battle = Battle {
            catalog,
            player,
            enemy,
            synergy,
            turn: 0,
            state: BattleState::Ongoing,
            log: CombatLog::new(),
            rng,
        };

        let intro = format!(
            "{} (Lv {}) engages {} ({} Lv {})",
            battle.player.unit.name,
            battle.player.level,
            battle.enemy.unit.name,
            battle.enemy.tier,
            battle.enemy.level
        );
        battle.log(LogCategory::System, None, None, intro);
        for (tag, count) in battle.synergy.active.clone() {
            let line = format!("Synergy active: {:?} x{}", tag, count);
            battle.log(LogCategory::System, Some(Side::Player), None, line);
        }
        battle
    }

    /// Advance one full turn; does nothing once the battle is over
    pub fn execute_turn(&mut self) {
        if self.is_game_over() {
            return;
        }

        self.turn += 1;
        let header = format!("--- Turn {} ---", self.turn);
        self.log(LogCategory::Turn, None, None, header);

        self.status_phase();
        if self.check_end() {
            return;
        }

        self.player_phase();
        if self.check_end() {
            return;
        }

        self.enemy_phase();
        self.check_end();
    }

    /// Loop `execute_turn` until the battle ends or `max_turns` is reached
    pub fn run_to_completion(&mut self, max_turns: u32) -> Option<BattleOutcome> {
        while !self.is_game_over() && self.turn < max_turns {
            self.execute_turn();
        }
        self.outcome()
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, BattleState::Finished(_))
    }

    pub fn is_player_victory(&self) -> bool {
        self.state == BattleState::Finished(BattleOutcome::PlayerVictory)
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state {
            BattleState::Finished(outcome) => Some(outcome),
            BattleState::Ongoing => None,
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn combat_log(&self) -> &CombatLog {
        &self.log
    }

    pub fn player(&self) -> &Player {
        &*self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn synergy(&self) -> &SynergyBonus {
        &self.synergy
    }

    /// Exp for winning this battle (0 until the protagonist has won)
    pub fn exp_reward(&self) -> u64 {
        if self.is_player_victory() {
            calculate_exp_reward(self.enemy.level, self.enemy.tier)
        } else {
            0
        }
    }

    /// End the battle and hand back the opponent
    pub fn into_enemy(self) -> Enemy {
        self.enemy
    }

    fn log(
        &mut self,
        category: LogCategory,
        actor: Option<Side>,
        action: Option<ActionCategory>,
        message: impl Into<String>,
    ) {
        self.log.push(self.turn, category, actor, action, message);
    }

    fn unit(&self, side: Side) -> &CombatUnit {
        match side {
            Side::Player => &self.player.unit,
            Side::Enemy => &self.enemy.unit,
        }
    }

    fn unit_mut(&mut self, side: Side) -> &mut CombatUnit {
        match side {
            Side::Player => &mut self.player.unit,
            Side::Enemy => &mut self.enemy.unit,
        }
    }

    fn status_phase(&mut self) {
        for side in [Side::Player, Side::Enemy] {
            let ticks = process_status_effects(self.catalog, self.unit_mut(side));
            for tick in ticks {
                self.log_tick(side, &tick);
            }
        }
    }

    fn log_tick(&mut self, side: Side, tick: &StatusTick) {
        let name = self.unit(side).name.clone();

        if tick.damage > 0 {
            let line = format!("{} takes {} damage from {}", name, tick.damage, tick.status);
            self.log(LogCategory::Damage, Some(side), None, line);
        }

        if let Some(receiver) = tick.heal_to {
            let healed = self.unit_mut(receiver).heal(tick.heal);
            if healed > 0 {
                let line = format!(
                    "{} drains {} HP through {}",
                    self.unit(receiver).name,
                    healed,
                    tick.status
                );
                self.log(LogCategory::Heal, Some(receiver), None, line);
            }
        }

        if tick.expired {
            let is_control = self
                .catalog
                .get(tick.status)
                .is_some_and(|def| def.is_control());
            if is_control {
                let line = format!("{} is no longer affected by {}", name, tick.status);
                self.log(LogCategory::Control, Some(side), None, line);
            } else {
                let line = format!("{}'s {} wore off", name, tick.status);
                self.log(LogCategory::Status, Some(side), None, line);
            }
        }
    }

    /// Record the terminal state if either side is down; defeat is checked first
    fn check_end(&mut self) -> bool {
        if self.is_game_over() {
            return true;
        }

        let outcome = if !self.player.unit.is_alive() {
            BattleOutcome::PlayerDefeat
        } else if !self.enemy.unit.is_alive() {
            BattleOutcome::PlayerVictory
        } else {
            return false;
        };

        self.state = BattleState::Finished(outcome);
        let line = match outcome {
            BattleOutcome::PlayerVictory => format!("{} is defeated. Victory!", self.enemy.unit.name),
            BattleOutcome::PlayerDefeat => format!("{} has fallen. Defeat.", self.player.unit.name),
        };
        tracing::info!(turn = self.turn, ?outcome, "battle finished");
        self.log(LogCategory::Outcome, None, None, line);
        true
    }
}
