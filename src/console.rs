//! 行単位のコンソール入出力
//!
//! ゲーム本体は `Console` 経由でのみ入出力するため、テストではバイト列と
//! `Vec<u8>` を渡してセッション全体を再現できる。

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::trace;

/// ブロッキングな行入力とテキスト出力のペア
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// プロセスの標準入出力に接続する
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 1行出力
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref()).wrap_err("failed to write to console")?;
        Ok(())
    }

    /// 空行を出力
    pub fn blank(&mut self) -> Result<()> {
        self.say("")
    }

    /// プロンプトを表示して1行読む。改行コードは取り除く。
    ///
    /// # Errors
    /// 入力が閉じている (EOF) 場合や I/O エラー時
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}").wrap_err("failed to write prompt")?;
        self.output.flush().wrap_err("failed to flush console")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .wrap_err("failed to read from console")?;
        if read == 0 {
            return Err(eyre!("input closed while waiting for: {}", message.trim()));
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        trace!(target: "console", prompt = message.trim(), input = %line, "read line");
        Ok(line)
    }

    /// 出力先を取り出す（テスト用）
    pub fn into_output(self) -> W {
        self.output
    }
}
