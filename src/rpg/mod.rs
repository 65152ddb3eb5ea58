pub mod rules;
pub mod models;
pub mod shop;
pub mod combat;
pub mod game;
pub mod ui;

pub use game::{Game, GameEnd, GameSnapshot, MenuChoice};
pub use models::{Gold, Monster, PlayerState};
pub use rules::{Archetype, Rules};
pub use shop::{Purchase, ShopItem, purchase_item};
pub use combat::{CombatAction, CombatState, Encounter, Resolution, fight_monster};
