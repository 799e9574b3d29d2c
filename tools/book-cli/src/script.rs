//! Line-oriented order script
//!
//! ```text
//! add <id> <buy|sell> <gtc|fak> <price> <qty>
//! cancel <id>
//! modify <id> <buy|sell> <price> <qty>
//! book
//! size
//! ```
//!
//! Blank lines and `#` comments are skipped.

use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderModify, OrderType, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Order),
    Cancel(OrderId),
    Modify(OrderModify),
    Book,
    Size,
}

/// Parse one script line; `Ok(None)` for blanks and comments
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = match line.split_once('#') {
        Some((code, _)) => code,
        None => line,
    };
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&keyword, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match (keyword, args) {
        ("add", [id, side, kind, price, qty]) => Command::Add(Order::new(
            parse_order_type(kind)?,
            parse_id(id)?,
            parse_side(side)?,
            parse_num::<i32>("price", price)?.into(),
            parse_num::<u32>("quantity", qty)?.into(),
        )),
        ("cancel", [id]) => Command::Cancel(parse_id(id)?),
        ("modify", [id, side, price, qty]) => Command::Modify(OrderModify::new(
            parse_id(id)?,
            parse_side(side)?,
            Price::from(parse_num::<i32>("price", price)?),
            Quantity::from(parse_num::<u32>("quantity", qty)?),
        )),
        ("book", []) => Command::Book,
        ("size", []) => Command::Size,
        ("add" | "cancel" | "modify" | "book" | "size", _) => {
            bail!("wrong number of arguments for '{}'", keyword)
        }
        _ => bail!("unknown command '{}'", keyword),
    };

    Ok(Some(command))
}

fn parse_num<T>(what: &str, token: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    token
        .parse::<T>()
        .with_context(|| format!("invalid {} '{}'", what, token))
}

fn parse_id(token: &str) -> Result<OrderId> {
    parse_num::<u64>("order id", token).map(OrderId::new)
}

fn parse_side(token: &str) -> Result<Side> {
    match token.to_ascii_lowercase().as_str() {
        "buy" | "b" => Ok(Side::Buy),
        "sell" | "s" => Ok(Side::Sell),
        _ => Err(anyhow!("invalid side '{}'", token)),
    }
}

fn parse_order_type(token: &str) -> Result<OrderType> {
    match token.to_ascii_lowercase().as_str() {
        "gtc" => Ok(OrderType::GoodTillCancel),
        "fak" => Ok(OrderType::FillAndKill),
        _ => Err(anyhow!("invalid order type '{}'", token)),
    }
}
