//! Coin amounts and wallet balances.
//!
//! The sheet tracks three independent denominations. There is no conversion
//! between them: 100 bronze is never folded into a silver piece, and a
//! negative silver balance stays negative even when gold is plentiful.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// One of the three coin units, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    Gold,
    Silver,
    Bronze,
}

impl Denomination {
    /// Fixed display order: gold, silver, bronze.
    pub const ALL: [Denomination; 3] =
        [Denomination::Gold, Denomination::Silver, Denomination::Bronze];

    /// Unit abbreviation shown after an amount ("peça de ouro/prata/cobre").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Denomination::Gold => "PO",
            Denomination::Silver => "PP",
            Denomination::Bronze => "PC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Denomination::Gold => "Gold",
            Denomination::Silver => "Silver",
            Denomination::Bronze => "Bronze",
        }
    }
}

/// A non-negative amount of coins, as carried by a single transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coins {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl Coins {
    pub fn new(gold: u32, silver: u32, bronze: u32) -> Self {
        Self { gold, silver, bronze }
    }

    pub fn is_zero(&self) -> bool {
        self.gold == 0 && self.silver == 0 && self.bronze == 0
    }

    pub fn get(&self, denomination: Denomination) -> u32 {
        match denomination {
            Denomination::Gold => self.gold,
            Denomination::Silver => self.silver,
            Denomination::Bronze => self.bronze,
        }
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_coins(self))
    }
}

/// A signed wallet balance. Derived from transactions, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Balance {
    pub gold: i64,
    pub silver: i64,
    pub bronze: i64,
}

impl Balance {
    pub const ZERO: Balance = Balance { gold: 0, silver: 0, bronze: 0 };

    pub fn new(gold: i64, silver: i64, bronze: i64) -> Self {
        Self { gold, silver, bronze }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn get(&self, denomination: Denomination) -> i64 {
        match denomination {
            Denomination::Gold => self.gold,
            Denomination::Silver => self.silver,
            Denomination::Bronze => self.bronze,
        }
    }

    /// True when any denomination is below zero.
    pub fn has_debt(&self) -> bool {
        Denomination::ALL.iter().any(|d| self.get(*d) < 0)
    }
}

impl From<Coins> for Balance {
    fn from(coins: Coins) -> Self {
        Self {
            gold: i64::from(coins.gold),
            silver: i64::from(coins.silver),
            bronze: i64::from(coins.bronze),
        }
    }
}

impl Add for Balance {
    type Output = Balance;

    fn add(self, rhs: Balance) -> Balance {
        Balance {
            gold: self.gold + rhs.gold,
            silver: self.silver + rhs.silver,
            bronze: self.bronze + rhs.bronze,
        }
    }
}

impl Sub for Balance {
    type Output = Balance;

    fn sub(self, rhs: Balance) -> Balance {
        self + (-rhs)
    }
}

impl Neg for Balance {
    type Output = Balance;

    fn neg(self) -> Balance {
        Balance {
            gold: -self.gold,
            silver: -self.silver,
            bronze: -self.bronze,
        }
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Balance) {
        *self = *self + rhs;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Balance) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_balance(self))
    }
}

/// Zero is always expressed in the smallest denomination.
fn zero_token() -> String {
    format!("0 {}", Denomination::Bronze.abbreviation())
}

fn join_parts(parts: impl Iterator<Item = (i64, Denomination)>) -> String {
    let parts: Vec<String> = parts
        .filter(|(value, _)| *value != 0)
        .map(|(value, denomination)| format!("{} {}", value, denomination.abbreviation()))
        .collect();

    if parts.is_empty() {
        zero_token()
    } else {
        parts.join(", ")
    }
}

/// Format an amount as e.g. `"10 PO, 5 PC"`. Zero denominations are skipped.
pub fn format_coins(coins: &Coins) -> String {
    join_parts(Denomination::ALL.iter().map(|d| (i64::from(coins.get(*d)), *d)))
}

/// Format a balance as e.g. `"10 PO, -5 PP"`. Signs are kept per denomination.
pub fn format_balance(balance: &Balance) -> String {
    join_parts(Denomination::ALL.iter().map(|d| (balance.get(*d), *d)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coins_skips_zero_denominations() {
        assert_eq!(format_coins(&Coins::new(10, 0, 5)), "10 PO, 5 PC");
        assert_eq!(format_coins(&Coins::new(0, 3, 0)), "3 PP");
        assert_eq!(format_coins(&Coins::new(1, 2, 3)), "1 PO, 2 PP, 3 PC");
    }

    #[test]
    fn test_zero_formats_as_bronze() {
        assert_eq!(format_coins(&Coins::default()), "0 PC");
        assert_eq!(format_balance(&Balance::ZERO), "0 PC");
    }

    #[test]
    fn test_format_balance_keeps_sign() {
        assert_eq!(format_balance(&Balance::new(10, -5, 0)), "10 PO, -5 PP");
        assert_eq!(Balance::new(0, 0, -7).to_string(), "-7 PC");
    }

    #[test]
    fn test_balance_arithmetic_is_per_denomination() {
        let a = Balance::new(1, 2, 3);
        let b = Balance::new(0, 5, 100);

        assert_eq!(a + b, Balance::new(1, 7, 103));
        assert_eq!(a - b, Balance::new(1, -3, -97));
        assert_eq!(-a, Balance::new(-1, -2, -3));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_has_debt() {
        assert!(!Balance::new(1, 0, 0).has_debt());
        assert!(Balance::new(10, -1, 0).has_debt());
    }

    #[test]
    fn test_coins_into_balance() {
        let balance: Balance = Coins::new(u32::MAX, 0, 1).into();
        assert_eq!(balance.gold, i64::from(u32::MAX));
        assert_eq!(balance.bronze, 1);
    }
}
