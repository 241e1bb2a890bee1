/// Record - the order value type
///
/// One resting limit order: identifier, limit price, quantity and side.
/// Records are plain `Copy` values; the store owns them once inserted.
///
/// ## Memory Layout
/// ```text
/// offset  0  id        u64   8 bytes
/// offset  8  price     f64   8 bytes
/// offset 16  quantity  u32   4 bytes
/// offset 20  side      u32   4 bytes (repr(u32) tag)
///                      total 24 bytes, align 8
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side, encoded on the wire as `0` (buy) / `1` (sell)
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl Side {
    /// Maps a numeric side code to a `Side`, `None` for anything above 1
    #[inline]
    pub fn from_code(code: u32) -> Option<Side> {
        match code {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl TryFrom<u32> for Side {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Side::from_code(code).ok_or(code)
    }
}

/// Accepts `0`, `1`, `buy` or `sell` (any case)
impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("buy") {
            return Ok(Side::Buy);
        }
        if s.eq_ignore_ascii_case("sell") {
            return Ok(Side::Sell);
        }
        s.parse::<u32>()
            .ok()
            .and_then(Side::from_code)
            .ok_or_else(|| format!("invalid side '{}', expected 0|1|buy|sell", s))
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single limit order
///
/// Fields are private so a record cannot change after construction;
/// read them through the accessors.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: u64,
    price: f64,
    quantity: u32,
    side: Side,
}

const _: () = assert!(std::mem::size_of::<Record>() == 24);
const _: () = assert!(std::mem::align_of::<Record>() == 8);

impl Record {
    /// Per-record payload footprint in bytes
    pub const SIZE: usize = std::mem::size_of::<Record>();

    #[inline]
    pub fn new(id: u64, price: f64, quantity: u32, side: Side) -> Self {
        Record { id, price, quantity, side }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    #[inline]
    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record{{id={}, price={}, qty={}, side={}}}",
            self.id, self.price, self.quantity, self.side
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = Record::new(1, 150.50, 100, Side::Buy);
        assert_eq!(record.id(), 1);
        assert_eq!(record.price(), 150.50);
        assert_eq!(record.quantity(), 100);
        assert_eq!(record.side(), Side::Buy);
        assert!(record.is_buy());
        assert!(!record.is_sell());
    }

    #[test]
    fn test_record_copy_is_independent() {
        let original = Record::new(7, 99.0, 5, Side::Sell);
        let copied = original;

        assert_eq!(original, copied);
        assert!(copied.is_sell());
    }

    #[test]
    fn test_memory_layout() {
        assert_eq!(std::mem::size_of::<Record>(), 24);
        assert_eq!(std::mem::align_of::<Record>(), 8);
        assert_eq!(std::mem::size_of::<Side>(), 4);
        assert_eq!(Record::SIZE, 24);
    }

    #[test]
    fn test_display() {
        let buy = Record::new(1, 150.5, 100, Side::Buy);
        assert_eq!(buy.to_string(), "Record{id=1, price=150.5, qty=100, side=BUY}");

        let sell = Record::new(2, 151.25, 200, Side::Sell);
        assert_eq!(sell.to_string(), "Record{id=2, price=151.25, qty=200, side=SELL}");
    }

    #[test]
    fn test_side_codes() {
        assert_eq!(Side::from_code(0), Some(Side::Buy));
        assert_eq!(Side::from_code(1), Some(Side::Sell));
        assert_eq!(Side::from_code(2), None);
        assert_eq!(Side::try_from(7u32), Err(7));
        assert_eq!(Side::Sell.code(), 1);
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("0".parse::<Side>(), Ok(Side::Buy));
        assert_eq!("SELL".parse::<Side>(), Ok(Side::Sell));
        assert_eq!(" buy ".parse::<Side>(), Ok(Side::Buy));
        assert!("2".parse::<Side>().is_err());
        assert!("short".parse::<Side>().is_err());
    }

    #[test]
    fn test_serde_json() {
        let record = Record::new(3, 101.75, 10, Side::Sell);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":3,"price":101.75,"quantity":10,"side":"sell"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
