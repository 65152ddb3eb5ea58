//! ショップ: 購入計算とメニュー表示
//!
//! 購入計算は残金を返すだけで、プレイヤーの所持金には反映しない。

use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::models::{Gold, parse_amount};

/// 数量が読めなかったときの既定値
pub const DEFAULT_QUANTITY: u32 = 1;

/// 表示専用の商品。購入しても所持品にはならない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub price: Gold,
}

impl ShopItem {
    pub fn new(name: impl Into<String>, price: Gold) -> Self {
        Self { name: name.into(), price }
    }
}

/// Result of a purchase calculation.
///
/// `leftover` keeps the unrounded amount; it is only rounded for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Purchase {
    pub purchased: u32,
    pub leftover: f64,
}

impl Purchase {
    /// Leftover money with exactly two decimals.
    pub fn leftover_text(&self) -> String {
        format!("{:.2}", self.leftover)
    }
}

/// Buys as many of the wanted items as the money covers.
///
/// `purchased = min(quantity, floor(money / price))`, `leftover = money - purchased * price`.
/// Amounts are used exactly as parsed; rounding happens in [`Purchase::leftover_text`].
///
/// # Errors
/// Price or money text that is not a number, a price that is not positive,
/// or negative money.
pub fn purchase_item(item_price: &str, starting_money: &str, quantity: u32) -> Result<Purchase> {
    let price = parse_amount(item_price).wrap_err("invalid item price")?;
    let money = parse_amount(starting_money).wrap_err("invalid starting money")?;
    let purchase = purchase_with(price, money, quantity)?;
    info!(
        target: "shop",
        price,
        money,
        quantity,
        purchased = purchase.purchased,
        leftover = %purchase.leftover_text(),
        "purchase computed"
    );
    Ok(purchase)
}

/// Same as [`purchase_item`] for already parsed amounts.
pub fn purchase_with(price: f64, money: f64, quantity: u32) -> Result<Purchase> {
    if !(price.is_finite() && price > 0.0) {
        return Err(eyre!("item price must be positive, got {price}"));
    }
    if !(money.is_finite() && money >= 0.0) {
        return Err(eyre!("starting money must not be negative, got {money}"));
    }
    let max_affordable = floor_div(money, price);
    let purchased = if max_affordable >= f64::from(quantity) {
        quantity
    } else {
        max_affordable as u32
    };
    // 浮動小数の誤差で -0.00 にならないよう 0 で止める
    let leftover = (money - f64::from(purchased) * price).max(0.0) + 0.0;
    Ok(Purchase { purchased, leftover })
}

/// `floor(a / b)` for `a >= 0`, `b > 0`, computed through the exact remainder so a
/// quotient that rounds up to the next integer does not overcount.
fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let div = (a - rem) / b;
    let mut floored = div.floor();
    if div - floored > 0.5 {
        floored += 1.0;
    }
    floored
}

/// Why a quantity entry fell back to [`DEFAULT_QUANTITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    NotInteger,
    Negative,
}

impl QuantityError {
    /// 利用者向けの通知文
    pub fn notice(self) -> &'static str {
        match self {
            Self::NotInteger => "Invalid quantity. Defaulting to 1.",
            Self::Negative => "Quantity cannot be negative. Defaulting to 1.",
        }
    }
}

/// 数量テキストを読む。失敗時は呼び出し側で既定値 1 を使う
pub fn parse_quantity(text: &str) -> std::result::Result<u32, QuantityError> {
    let text = text.trim();
    if let Ok(q) = text.parse::<u32>() {
        return Ok(q);
    }
    match text.parse::<i64>() {
        Ok(n) if n < 0 => Err(QuantityError::Negative),
        _ => Err(QuantityError::NotInteger),
    }
}

/// Two-item shop menu, bordered, 24 characters wide.
pub fn shop_menu_lines(first: &ShopItem, second: &ShopItem) -> Vec<String> {
    let border = "-".repeat(22);
    vec![
        format!("/{border}\\"),
        shop_line(first),
        shop_line(second),
        format!("\\{border}/"),
    ]
}

fn shop_line(item: &ShopItem) -> String {
    format!("| {:<12}${:>7} |", item.name, item.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buys_requested_quantity_when_affordable() -> Result<()> {
        let p = purchase_item("1.23", "10", 3)?;
        assert_eq!(p.purchased, 3);
        assert_eq!(p.leftover_text(), "6.31");
        Ok(())
    }

    #[test]
    fn limited_by_money() -> Result<()> {
        let p = purchase_item("1.23", "2.01", 3)?;
        assert_eq!(p.purchased, 1);
        assert_eq!(p.leftover_text(), "0.78");
        Ok(())
    }

    #[test]
    fn default_quantity_case() -> Result<()> {
        let p = purchase_item("3.41", "21.12", DEFAULT_QUANTITY)?;
        assert_eq!(p.purchased, 1);
        assert_eq!(p.leftover_text(), "17.71");
        Ok(())
    }

    #[test]
    fn cannot_afford_any() -> Result<()> {
        let p = purchase_item("31.41", "21.12", DEFAULT_QUANTITY)?;
        assert_eq!(p.purchased, 0);
        assert_eq!(p.leftover_text(), "21.12");
        Ok(())
    }

    #[test]
    fn exact_multiple_leaves_zero() -> Result<()> {
        let p = purchase_item("1.23", "2.46", 5)?;
        assert_eq!(p.purchased, 2);
        assert_eq!(p.leftover_text(), "0.00");
        Ok(())
    }

    #[test]
    fn leftover_never_negative() -> Result<()> {
        for price in 1..=300 {
            for money in (0..=2000).step_by(37) {
                let (price, money) = (f64::from(price) / 100.0, f64::from(money) / 100.0);
                let p = purchase_with(price, money, 50)?;
                assert!(p.leftover >= 0.0);
                assert!(p.leftover < price + 1e-9 || p.purchased == 50);
            }
        }
        Ok(())
    }

    #[test]
    fn sub_cent_amounts_are_not_rounded_before_buying() -> Result<()> {
        let cases = [
            ("0.5", "0.999", 5, 1, "0.50"),
            ("0.004", "1", 1, 1, "1.00"),
            ("0.004", "1", 500, 249, "0.00"),
            ("0.333", "1", 5, 3, "0.00"),
            ("2.675", "10", 5, 3, "1.98"),
            ("0.1", "0.3", 5, 2, "0.10"),
            ("0.07", "0.21", 9, 2, "0.07"),
        ];
        for (price, money, quantity, purchased, leftover) in cases {
            let p = purchase_item(price, money, quantity)?;
            assert_eq!(p.purchased, purchased, "{price} / {money}");
            assert_eq!(p.leftover_text(), leftover, "{price} / {money}");

            let (price, money): (f64, f64) = (price.parse()?, money.parse()?);
            let affordable = (money / price).floor().min(f64::from(quantity));
            assert!((f64::from(p.purchased) - affordable).abs() <= 1.0);
            assert!(f64::from(p.purchased) * price <= money + 1e-9);
            assert!(p.leftover >= 0.0);
        }
        Ok(())
    }

    #[test]
    fn malformed_amounts_are_errors() {
        assert!(purchase_item("abc", "10", 1).is_err());
        assert!(purchase_item("1.00", "", 1).is_err());
        assert!(purchase_item("0", "10", 1).is_err());
        assert!(purchase_item("-2", "10", 1).is_err());
        assert!(purchase_item("2", "-10", 1).is_err());
        assert!(purchase_item("2", "1e300", 1).is_err());
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!(parse_quantity(" 3 "), Ok(3));
        assert_eq!(parse_quantity("0"), Ok(0));
        assert_eq!(parse_quantity("3.5"), Err(QuantityError::NotInteger));
        assert_eq!(parse_quantity("lots"), Err(QuantityError::NotInteger));
        assert_eq!(parse_quantity("-1"), Err(QuantityError::Negative));
        assert_ne!(QuantityError::Negative.notice(), QuantityError::NotInteger.notice());
        assert_eq!(QuantityError::NotInteger.notice(), "Invalid quantity. Defaulting to 1.");
    }

    #[test]
    fn shop_menu_layout() {
        let lines = shop_menu_lines(
            &ShopItem::new("Sword", Gold::from_whole(100)),
            &ShopItem::new("Mango", Gold::from_cents(20)),
        );
        assert_eq!(
            lines,
            [
                "/----------------------\\",
                "| Sword       $ 100.00 |",
                "| Mango       $   0.20 |",
                "\\----------------------/",
            ]
        );
        assert!(lines.iter().all(|l| l.chars().count() == 24));
    }

    #[test]
    fn long_names_are_not_truncated() {
        let lines = shop_menu_lines(
            &ShopItem::new("Spoiled Bread", Gold::from_cents(10)),
            &ShopItem::new("Bag of Oats", Gold::from_cents(1234)),
        );
        assert_eq!(lines[1], "| Spoiled Bread$   0.10 |");
        assert_eq!(lines[2], "| Bag of Oats $  12.34 |");
    }
}
