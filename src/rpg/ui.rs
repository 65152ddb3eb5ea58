//! テキスト整形（出力先には依存しない）

use super::models::{Monster, PlayerState};

/// `Hello, {name}!` を幅 `width` で中央寄せ。余りは右側に付く
pub fn welcome_line(name: &str, width: usize) -> String {
    let message = format!("Hello, {name}!");
    format!("{message:^width$}")
}

/// `  key: value` 形式のモンスター属性一覧
pub fn monster_lines(monster: &Monster) -> Vec<String> {
    monster
        .attributes()
        .into_iter()
        .map(|(key, value)| format!("  {key}: {value}"))
        .collect()
}

pub fn status_line(player: &PlayerState) -> String {
    format!("You have {} HP and {} gold.", player.hp, player.gold)
}

pub fn main_menu_lines(rest_heal: i32) -> [String; 4] {
    [
        "  1) City".to_string(),
        "  2) Fight a monster outside of the city".to_string(),
        format!("  3) Sleep (Restore up to {rest_heal} HP)"),
        "  4) Quit".to_string(),
    ]
}

pub const COMBAT_MENU: [&str; 2] = ["  1) Attack", "  2) Run"];
