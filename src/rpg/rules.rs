use std::ops::RangeInclusive;

use super::models::Gold;
use super::shop::ShopItem;

/// モンスターの雛形。各属性は閉区間で与える
#[derive(Debug, Clone, PartialEq)]
pub struct Archetype {
    pub name: String,
    pub description: String,
    pub health: RangeInclusive<i32>,
    pub power: RangeInclusive<i32>,
    /// 実数で抽選し、セント単位に丸める
    pub money: RangeInclusive<f64>,
    pub speed: RangeInclusive<i32>,
    pub defense: RangeInclusive<i32>,
    pub intelligence: RangeInclusive<i32>,
}

impl Archetype {
    /// Used only when a rule set has no archetypes at all.
    pub(crate) fn fallback() -> Self {
        Self {
            name: "A shadow".into(),
            description: "A shapeless shadow stands before you".into(),
            health: 1..=1,
            power: 0..=0,
            money: 0.0..=0.0,
            speed: 0..=0,
            defense: 0..=0,
            intelligence: 0..=0,
        }
    }
}

/// ゲームの固定値一式
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub game_name: String,
    pub player_max_hp: i32,
    pub player_start_hp: i32,
    pub player_start_gold: Gold,
    pub rest_heal: i32,
    pub attack_damage: RangeInclusive<i32>,
    pub archetypes: Vec<Archetype>,
    pub shop_items: Vec<ShopItem>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            game_name: "Monster Quest".to_string(),
            player_max_hp: 100,
            player_start_hp: 50,
            player_start_gold: Gold::from_whole(20),
            rest_heal: 10,
            attack_damage: 5..=10,
            archetypes: default_archetypes(),
            shop_items: vec![
                ShopItem::new("Sword", Gold::from_whole(100)),
                ShopItem::new("Shield", Gold::from_whole(80)),
            ],
        }
    }
}

fn default_archetypes() -> Vec<Archetype> {
    vec![
        Archetype {
            name: "A goblin".into(),
            description: "A goblin stands before you".into(),
            health: 10..=25,
            power: 4..=9,
            money: 2.0..=9.0,
            speed: 18..=28,
            defense: 1..=4,
            intelligence: 4..=9,
        },
        Archetype {
            name: "A Crow".into(),
            description: "A crow stands before you".into(),
            health: 2..=4,
            power: 1..=4,
            money: 40.0..=130.0,
            speed: 28..=38,
            defense: 2..=4,
            intelligence: 2..=4,
        },
        Archetype {
            name: "An Orc".into(),
            description: "A tall green orc stands before you".into(),
            health: 25..=45,
            power: 4..=11,
            money: 1.0..=25.0,
            speed: 8..=18,
            defense: 4..=9,
            intelligence: 2..=6,
        },
        Archetype {
            name: "A Cyclops".into(),
            description: "A Cyclops stands before you".into(),
            health: 55..=95,
            power: 12..=22,
            money: 210.0..=490.0,
            speed: 13..=28,
            defense: 18..=28,
            intelligence: 18..=38,
        },
        Archetype {
            name: "A Possessed Crow".into(),
            description: "A possessed crow with glowing eyes and a haunting presence hovers in the air".into(),
            health: 6..=8,
            power: 4..=7,
            money: 35.0..=65.0,
            speed: 36..=46,
            defense: 3..=5,
            intelligence: 9..=13,
        },
    ]
}
