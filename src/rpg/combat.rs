//! ターン制の戦闘
//!
//! `Encounter` が状態遷移だけを持ち、`fight_monster` がコンソールとのやり取りと
//! 実況を担当する。

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::models::{Monster, PlayerState};
use super::rules::Rules;
use super::ui::COMBAT_MENU;
use crate::console::Console;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    Ongoing,
    PlayerWon,
    PlayerFled,
    PlayerDefeated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    Flee,
}

impl CombatAction {
    /// "1" = Attack, "2" = Run。それ以外は None
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Attack),
            "2" => Some(Self::Flee),
            _ => None,
        }
    }
}

/// The monster's counter-attack after a non-lethal hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retaliation {
    pub damage: i32,
    pub player_hp: i32,
}

/// What happened when one action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Fled,
    Attacked {
        damage: i32,
        monster_hp: i32,
        retaliation: Option<Retaliation>,
    },
    /// The encounter was already resolved; nothing changed.
    Finished,
}

/// 1回の遭遇の状態
#[derive(Debug, Clone)]
pub struct Encounter {
    monster: Monster,
    monster_hp: i32,
    player: PlayerState,
    state: CombatState,
}

impl Encounter {
    pub fn new(monster: Monster, player: PlayerState) -> Self {
        let state = if player.is_alive() {
            CombatState::Ongoing
        } else {
            CombatState::PlayerDefeated
        };
        Self {
            monster_hp: monster.health,
            monster,
            player,
            state,
        }
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn monster_hp(&self) -> i32 {
        self.monster_hp
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Applies one player action.
    ///
    /// An attack rolls damage from `attack_damage`. If the monster survives it hits
    /// back for its power. A kill pays out the monster's money before any counter.
    pub fn apply<S: RandomSource + ?Sized>(
        &mut self,
        action: CombatAction,
        attack_damage: RangeInclusive<i32>,
        rng: &mut S,
    ) -> Exchange {
        if self.state != CombatState::Ongoing {
            return Exchange::Finished;
        }

        match action {
            CombatAction::Flee => {
                self.state = CombatState::PlayerFled;
                Exchange::Fled
            }
            CombatAction::Attack => {
                let damage = rng.roll(attack_damage);
                self.monster_hp -= damage;
                debug!(target: "combat", damage, monster_hp = self.monster_hp, "player hits");

                if self.monster_hp <= 0 {
                    self.state = CombatState::PlayerWon;
                    self.player.gold += self.monster.money;
                    return Exchange::Attacked {
                        damage,
                        monster_hp: self.monster_hp,
                        retaliation: None,
                    };
                }

                let counter = self.monster.power;
                self.player.hp -= counter;
                debug!(target: "combat", damage = counter, player_hp = self.player.hp, "monster hits");
                if self.player.hp <= 0 {
                    self.state = CombatState::PlayerDefeated;
                }
                Exchange::Attacked {
                    damage,
                    monster_hp: self.monster_hp,
                    retaliation: Some(Retaliation {
                        damage: counter,
                        player_hp: self.player.hp,
                    }),
                }
            }
        }
    }

    pub fn into_resolution(self) -> Resolution {
        Resolution {
            player: self.player,
            outcome: self.state,
            monster: self.monster,
        }
    }
}

/// 戦闘結果。`outcome == PlayerDefeated` の扱いは呼び出し側が決める
#[derive(Debug, Clone)]
pub struct Resolution {
    pub player: PlayerState,
    pub outcome: CombatState,
    pub monster: Monster,
}

/// Generates a monster and runs the attack/run loop until the encounter resolves.
pub fn fight_monster<R, W, S>(
    console: &mut Console<R, W>,
    rng: &mut S,
    rules: &Rules,
    player: PlayerState,
) -> Result<Resolution>
where
    R: BufRead,
    W: Write,
    S: RandomSource + ?Sized,
{
    let monster = Monster::random_with_rules(rules, rng);
    info!(target: "combat", monster = %monster.name, health = monster.health, power = monster.power, "encounter started");

    console.blank()?;
    console.say(&monster.description)?;
    console.say(format!("It has {} HP and {} power.", monster.health, monster.power))?;

    let mut encounter = Encounter::new(monster, player);
    while encounter.state() == CombatState::Ongoing {
        console.blank()?;
        console.say("What would you like to do?")?;
        for line in COMBAT_MENU {
            console.say(line)?;
        }
        let input = console.prompt("Choose an action: ")?;
        let Some(action) = CombatAction::parse(&input) else {
            debug!(target: "combat", input = %input, "rejected action");
            console.say("Invalid choice. Please choose again.")?;
            continue;
        };

        match encounter.apply(action, rules.attack_damage.clone(), rng) {
            Exchange::Fled => console.say("You run away from the fight.")?,
            Exchange::Attacked {
                damage,
                monster_hp,
                retaliation,
            } => {
                console.blank()?;
                console.say(format!("You hit the monster for {damage} damage."))?;
                console.say(format!("Monster HP is now {monster_hp}."))?;
                if let Some(r) = retaliation {
                    console.say(format!("The monster hits you for {} damage.", r.damage))?;
                    console.say(format!("Your HP is now {}.", r.player_hp))?;
                }
            }
            Exchange::Finished => {}
        }
    }

    let resolution = encounter.into_resolution();
    match resolution.outcome {
        CombatState::PlayerWon => {
            console.blank()?;
            console.say(format!(
                "You defeated the monster and gained {} gold!",
                resolution.monster.money
            ))?;
        }
        CombatState::PlayerDefeated => {
            console.blank()?;
            console.say("You have been defeated by the monster...")?;
        }
        CombatState::PlayerFled | CombatState::Ongoing => {}
    }
    info!(target: "combat", outcome = ?resolution.outcome, hp = resolution.player.hp, gold = %resolution.player.gold, "encounter resolved");
    Ok(resolution)
}
