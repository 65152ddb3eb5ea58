// 同階層のファイルをモジュールとしてインポート
pub mod config;
pub mod console;
pub mod rng; // injectable random sources
pub mod rpg; // monsters, shop, combat and the menu loop

pub use config::GameConfig;
pub use console::Console;

use color_eyre::Result;
use rpg::{Game, GameEnd};
use tracing::info;

// Ensure .env is loaded for tests before anything else runs in the test process.
#[cfg(test)]
#[ctor::ctor]
fn load_dotenv_for_tests() {
    let _ = dotenvy::dotenv();
}

/// 標準入出力でゲームを1回プレイする
pub fn run(config: GameConfig) -> Result<GameEnd> {
    info!(seed = ?config.seed, "starting game");
    let rng = rng::RngSource::from_seed_option(config.seed);
    let mut game = Game::new(Console::stdio(), rng, config);
    game.run()
}
