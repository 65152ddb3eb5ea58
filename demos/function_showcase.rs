//! Example: print what each game function produces, without playing a session
use monster_quest::rng::RngSource;
use monster_quest::rpg::shop::{DEFAULT_QUANTITY, shop_menu_lines};
use monster_quest::rpg::ui::{monster_lines, welcome_line};
use monster_quest::rpg::{Gold, Monster, Rules, ShopItem, purchase_item};

fn show_purchase(label: &str, price: &str, money: &str, quantity: u32) -> color_eyre::Result<()> {
    let p = purchase_item(price, money, quantity)?;
    println!("{label}");
    println!("  Items purchased: {}", p.purchased);
    println!("  Money remaining: {}", p.leftover_text());
    println!();
    Ok(())
}

fn show_shop(first: (&str, i64), second: (&str, i64)) {
    let a = ShopItem::new(first.0, Gold::from_cents(first.1));
    let b = ShopItem::new(second.0, Gold::from_cents(second.1));
    for line in shop_menu_lines(&a, &b) {
        println!("{line}");
    }
    println!();
}

fn main() -> color_eyre::Result<()> {
    let _ = dotenvy::dotenv();
    color_eyre::install()?;

    println!("----- Testing purchase_item() -----");
    show_purchase("Test 1: purchase_item('1.23', '10', 3)", "1.23", "10", 3)?;
    show_purchase("Test 2: purchase_item('1.23', '2.01', 3)", "1.23", "2.01", 3)?;
    show_purchase("Test 3: purchase_item('3.41', '21.12') [default quantity]", "3.41", "21.12", DEFAULT_QUANTITY)?;
    show_purchase("Additional Test: purchase_item('31.41', '21.12')", "31.41", "21.12", DEFAULT_QUANTITY)?;

    println!("----- Testing random_monster() -----");
    let mut rng = RngSource::from_entropy();
    let monster = Monster::random_with_rules(&Rules::default(), &mut rng);
    println!("Monster 1:");
    for line in monster_lines(&monster) {
        println!("{line}");
    }
    println!();

    println!("----- Testing print_welcome() -----");
    for name in ["Jeff", "Audrey", "Christopher"] {
        println!("{}", welcome_line(name, 20));
    }
    println!();

    println!("----- Testing print_shop_menu() -----");
    show_shop(("Wooden Sword", 11900), ("Wooden Spear", 10000));
    show_shop(("Mango", 20), ("Rasberries", 14000));
    show_shop(("Spoiled Bread", 10), ("Bag of Oats", 1234));
    show_shop(("Rare Gem", 33900), ("Dirty Gem", 13200));
    show_shop(("Iron Sword", 55000), ("Iron Spear", 13200));
    Ok(())
}
