use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use color_eyre::eyre::{Report, Result, eyre};
use serde::{Deserialize, Serialize};

use super::rules::{Archetype, Rules};
use crate::rng::RandomSource;

/// Money in cents. Always displayed with two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Gold(i64);

impl Gold {
    pub const ZERO: Gold = Gold(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_whole(units: i64) -> Self {
        Self(units * 100)
    }

    /// Rounds a real amount to the nearest cent.
    pub fn from_real(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_real(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Gold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{sign}{}.{:02}", abs / 100, abs % 100))
    }
}

impl FromStr for Gold {
    type Err = Report;

    /// "10", "1.23", " 2.5 " など実数として読めるテキストを受け付け、セントに丸める
    fn from_str(s: &str) -> Result<Self> {
        // MAX_AMOUNT 以内なのでセント換算は i64 に収まる
        let amount = parse_amount(s)?;
        Ok(Self::from_real(amount))
    }
}

/// Upper bound for amounts typed by the player.
pub const MAX_AMOUNT: f64 = 1e15;

/// 実数として読めるテキストをそのまま f64 で返す（丸めない）
///
/// # Errors
/// 数値でない、有限でない、または絶対値が [`MAX_AMOUNT`] を超える場合
pub fn parse_amount(s: &str) -> Result<f64> {
    let amount: f64 = s
        .trim()
        .parse()
        .map_err(|e| eyre!("could not convert '{s}' to a number: {e}"))?;
    if !amount.is_finite() {
        return Err(eyre!("amount '{s}' is not a finite number"));
    }
    if amount.abs() > MAX_AMOUNT {
        return Err(eyre!("amount '{}' exceeds the supported maximum of {MAX_AMOUNT}", s.trim()));
    }
    Ok(amount)
}

impl Add for Gold {
    type Output = Gold;
    fn add(self, rhs: Gold) -> Gold {
        Gold(self.0 + rhs.0)
    }
}

impl AddAssign for Gold {
    fn add_assign(&mut self, rhs: Gold) {
        self.0 += rhs.0;
    }
}

impl Sub for Gold {
    type Output = Gold;
    fn sub(self, rhs: Gold) -> Gold {
        Gold(self.0 - rhs.0)
    }
}

impl Mul<u32> for Gold {
    type Output = Gold;
    fn mul(self, rhs: u32) -> Gold {
        Gold(self.0 * i64::from(rhs))
    }
}

/// プレイヤーの状態。戦闘や休息の結果として値で受け渡しする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hp: i32,
    pub max_hp: i32,
    pub gold: Gold,
}

impl PlayerState {
    pub fn new_with_rules(rules: &Rules) -> Self {
        Self {
            hp: rules.player_start_hp.min(rules.player_max_hp),
            max_hp: rules.player_max_hp,
            gold: rules.player_start_gold,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Heals up to `amount`, never above `max_hp`. Returns the HP actually restored.
    pub fn rest(&mut self, amount: i32) -> i32 {
        let old = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp).max(old);
        self.hp - old
    }
}

/// 1回の遭遇だけ存在するモンスター
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub description: String,
    pub health: i32,
    pub power: i32,
    pub money: Gold,
    pub speed: i32,
    pub defense: i32,
    pub intelligence: i32,
}

impl Monster {
    /// Picks an archetype uniformly, then rolls every attribute inside its range.
    ///
    /// Roll order is health, power, money, speed, defense, intelligence.
    pub fn random_with_rules<S: RandomSource + ?Sized>(rules: &Rules, rng: &mut S) -> Self {
        let idx = rng.pick(rules.archetypes.len());
        match rules.archetypes.get(idx) {
            Some(archetype) => Self::roll(archetype, rng),
            None => Self::roll(&Archetype::fallback(), rng),
        }
    }

    pub fn roll<S: RandomSource + ?Sized>(archetype: &Archetype, rng: &mut S) -> Self {
        let health = rng.roll(archetype.health.clone());
        let power = rng.roll(archetype.power.clone());
        let money = Gold::from_real(rng.roll_real(archetype.money.clone()));
        let speed = rng.roll(archetype.speed.clone());
        let defense = rng.roll(archetype.defense.clone());
        let intelligence = rng.roll(archetype.intelligence.clone());
        Self {
            name: archetype.name.clone(),
            description: archetype.description.clone(),
            health,
            power,
            money,
            speed,
            defense,
            intelligence,
        }
    }

    /// `(key, value)` pairs in display order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("health", self.health.to_string()),
            ("power", self.power.to_string()),
            ("money", self.money.to_string()),
            ("speed", self.speed.to_string()),
            ("defense", self.defense.to_string()),
            ("intelligence", self.intelligence.to_string()),
        ]
    }
}
