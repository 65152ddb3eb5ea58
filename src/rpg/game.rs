use std::io::{BufRead, Write};

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::combat::{CombatState, fight_monster};
use super::models::{Gold, Monster, PlayerState};
use super::rules::Rules;
use super::shop::{DEFAULT_QUANTITY, parse_quantity, purchase_item, shop_menu_lines};
use super::ui;
use crate::config::GameConfig;
use crate::console::Console;
use crate::rng::RandomSource;

/// メインメニューの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuChoice {
    City,
    Fight,
    Rest,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::City),
            "2" => Some(Self::Fight),
            "3" => Some(Self::Rest),
            "4" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEnd {
    Quit,
    Died,
}

/// ログ出力用のセッション状態
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player_name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub gold: Gold,
    pub encounters: usize,
    pub victories: usize,
    pub escapes: usize,
    pub ended: Option<GameEnd>,
}

/// 1プレイ分のセッション
#[derive(Debug)]
pub struct Game<R, W, S> {
    pub rules: Rules,
    config: GameConfig,
    console: Console<R, W>,
    rng: S,
    player_name: String,
    player: PlayerState,
    encounters: usize,
    victories: usize,
    escapes: usize,
    ended: Option<GameEnd>,
}

impl<R: BufRead, W: Write, S: RandomSource> Game<R, W, S> {
    pub fn new(console: Console<R, W>, rng: S, config: GameConfig) -> Self {
        Self::with_rules(console, rng, config, Rules::default())
    }

    pub fn with_rules(console: Console<R, W>, rng: S, config: GameConfig, rules: Rules) -> Self {
        Self {
            player: PlayerState::new_with_rules(&rules),
            rules,
            config,
            console,
            rng,
            player_name: String::new(),
            encounters: 0,
            victories: 0,
            escapes: 0,
            ended: None,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player_name: self.player_name.clone(),
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            gold: self.player.gold,
            encounters: self.encounters,
            victories: self.victories,
            escapes: self.escapes,
            ended: self.ended,
        }
    }

    /// Opening sequence followed by the menu loop.
    pub fn run(&mut self) -> Result<GameEnd> {
        info!(target: "game", game = %self.rules.game_name, "session started");
        self.intro()?;
        let end = self.main_loop()?;
        match serde_json::to_string(&self.snapshot()) {
            Ok(json) => debug!(target: "game", snapshot = %json, "final state"),
            Err(e) => debug!(target: "game", error = %e, "snapshot not serializable"),
        }
        info!(target: "game", ?end, "session ended");
        Ok(end)
    }

    /// 名前入力、バナー、モンスター紹介、購入計算、ショップ表示
    ///
    /// 購入計算の残金はプレイヤーの所持金とは別扱い。
    pub fn intro(&mut self) -> Result<()> {
        self.player_name = self.console.prompt("Enter your name: ")?;
        self.console
            .say(ui::welcome_line(&self.player_name, self.config.banner_width))?;
        self.console.blank()?;

        let monster = Monster::random_with_rules(&self.rules, &mut self.rng);
        self.console.say("A wild monster appears!")?;
        for line in ui::monster_lines(&monster) {
            self.console.say(line)?;
        }
        self.console.blank()?;

        let price = self
            .console
            .prompt("Enter the item price (e.g. some real number like 5.00): ")?;
        let money = self
            .console
            .prompt("Enter your starting money (e.g., some real number like 10.00): ")?;
        let quantity_text = self.console.prompt("Enter the quantity to purchase: ")?;
        let quantity = match parse_quantity(&quantity_text) {
            Ok(q) => q,
            Err(reason) => {
                debug!(target: "shop", input = %quantity_text, ?reason, "quantity fallback");
                self.console.say(reason.notice())?;
                DEFAULT_QUANTITY
            }
        };
        let purchase = purchase_item(&price, &money, quantity)?;
        self.console.say(format!(
            "You purchased {} item(s) and have ${} left.",
            purchase.purchased,
            purchase.leftover_text()
        ))?;
        self.console.blank()?;

        self.console.say("Welcome to the shop:")?;
        if let [first, second, ..] = self.rules.shop_items.as_slice() {
            for line in shop_menu_lines(first, second) {
                self.console.say(line)?;
            }
        }
        Ok(())
    }

    /// City / Fight / Rest / Quit を終了まで繰り返す
    pub fn main_loop(&mut self) -> Result<GameEnd> {
        loop {
            self.console.blank()?;
            self.console.say(ui::status_line(&self.player))?;
            self.console.say("What would you like to do?")?;
            for line in ui::main_menu_lines(self.rules.rest_heal) {
                self.console.say(line)?;
            }

            let input = self.console.prompt("Enter your choice: ")?;
            let Some(choice) = MenuChoice::parse(&input) else {
                debug!(target: "game", input = %input, "rejected menu choice");
                self.console.say("Invalid choice. Please try again.")?;
                continue;
            };

            if let Some(end) = self.step(choice)? {
                self.ended = Some(end);
                self.console.say("Exiting game.")?;
                return Ok(end);
            }
        }
    }

    /// Runs one menu choice. Returns `Some` when the session is over.
    pub fn step(&mut self, choice: MenuChoice) -> Result<Option<GameEnd>> {
        match choice {
            MenuChoice::City => {
                self.console.blank()?;
                self.console
                    .say("You head to the city. You see beautiful buildings, and shops all around")?;
                Ok(None)
            }
            MenuChoice::Fight => {
                self.encounters += 1;
                let resolution =
                    fight_monster(&mut self.console, &mut self.rng, &self.rules, self.player.clone())?;
                self.player = resolution.player;
                match resolution.outcome {
                    CombatState::PlayerWon => self.victories += 1,
                    CombatState::PlayerFled => self.escapes += 1,
                    CombatState::PlayerDefeated | CombatState::Ongoing => {}
                }
                if self.player.is_alive() {
                    return Ok(None);
                }
                self.console.blank()?;
                self.console.say("You died. Game Over.")?;
                Ok(Some(GameEnd::Died))
            }
            MenuChoice::Rest => {
                let healed = self.player.rest(self.rules.rest_heal);
                debug!(target: "game", healed, hp = self.player.hp, "rested");
                self.console.blank()?;
                self.console.say(format!(
                    "You rest, restoring {healed} HP. Your HP is now {}.",
                    self.player.hp
                ))?;
                Ok(None)
            }
            MenuChoice::Quit => {
                self.console.blank()?;
                self.console.say("Thanks for playing!")?;
                Ok(Some(GameEnd::Quit))
            }
        }
    }

    /// コンソールを取り出す（テストで出力を検査する用）
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn game(input: &'static str, rules: Rules) -> Game<&'static [u8], Vec<u8>, ScriptedSource> {
        Game::with_rules(
            Console::new(input.as_bytes(), Vec::new()),
            ScriptedSource::new(),
            GameConfig::new(),
            rules,
        )
    }

    #[test]
    fn parse_menu_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::City));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::Fight));
        assert_eq!(MenuChoice::parse("3 "), Some(MenuChoice::Rest));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn rest_twice_from_fifty() -> Result<()> {
        let mut g = game("3\n3\n4\n", Rules::default());
        assert_eq!(g.main_loop()?, GameEnd::Quit);
        assert_eq!(g.player().hp, 70);
        let out = String::from_utf8(g.into_console().into_output())?;
        assert!(out.contains("You rest, restoring 10 HP. Your HP is now 60."));
        assert!(out.contains("You rest, restoring 10 HP. Your HP is now 70."));
        assert!(out.ends_with("Thanks for playing!\nExiting game.\n"));
        Ok(())
    }

    #[test]
    fn rest_reports_clamped_amount() -> Result<()> {
        let rules = Rules { player_start_hp: 96, ..Rules::default() };
        let mut g = game("3\n4\n", rules);
        g.main_loop()?;
        assert_eq!(g.player().hp, 100);
        let out = String::from_utf8(g.into_console().into_output())?;
        assert!(out.contains("You rest, restoring 4 HP. Your HP is now 100."));
        Ok(())
    }

    #[test]
    fn invalid_and_city_choices_keep_state() -> Result<()> {
        let mut g = game("9\n1\n4\n", Rules::default());
        let before = g.player().clone();
        g.main_loop()?;
        assert_eq!(g.player(), &before);
        let snap = g.snapshot();
        assert_eq!(snap.ended, Some(GameEnd::Quit));
        assert_eq!(snap.encounters, 0);
        let out = String::from_utf8(g.into_console().into_output())?;
        assert_eq!(out.matches("Invalid choice. Please try again.").count(), 1);
        assert!(out.contains("You head to the city."));
        assert_eq!(out.matches("You have 50 HP and 20.00 gold.").count(), 3);
        Ok(())
    }
}
