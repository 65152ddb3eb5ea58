//! アプリケーション設定

use std::path::PathBuf;

use tracing::warn;

/// 乱数シードを指定する環境変数
pub const SEED_VAR: &str = "QUEST_SEED";

/// ログ出力先ディレクトリを指定する環境変数
pub const LOG_DIR_VAR: &str = "QUEST_LOG_DIR";

/// 実行時の設定（ゲームのルール値は `rpg::Rules` 側）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// ウェルカムバナーの中央寄せ幅
    pub banner_width: usize,
    /// 乱数シード。None ならエントロピーから生成
    pub seed: Option<u64>,
    /// ログファイルの出力先
    pub log_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            banner_width: 40,
            seed: None,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl GameConfig {
    /// 新しい設定インスタンスを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// プロセスの環境変数から設定を読み込む（`.env` は呼び出し側で読み込み済みの想定）
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を組み立てる。
    /// 解釈できない値は警告を出して既定値のままにする。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(e) => warn!(var = SEED_VAR, value = %raw, error = %e, "ignoring invalid seed"),
            }
        }

        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir.trim());
        }

        config
    }
}
