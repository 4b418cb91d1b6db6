use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::LedgerError;

/// Which fields form the natural key of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    /// Lot identity plus the logical date: one row per lot per business day.
    LotPerDay,
    /// Lot identity only: one row per lot for the life of the ledger.
    Lot,
}

/// The quantity-bearing record categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedgerKind {
    WarehouseStockIn,
    WarehouseStockOut,
    DepotStockIn,
    DepotStockOut,
    DepotRequest,
    Damaged,
    Expired,
    PurchaseOrder,
    Return,
}

impl LedgerKind {
    pub const ALL: [LedgerKind; 9] = [
        LedgerKind::WarehouseStockIn,
        LedgerKind::WarehouseStockOut,
        LedgerKind::DepotStockIn,
        LedgerKind::DepotStockOut,
        LedgerKind::DepotRequest,
        LedgerKind::Damaged,
        LedgerKind::Expired,
        LedgerKind::PurchaseOrder,
        LedgerKind::Return,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::WarehouseStockIn => "warehouse-stock-in",
            LedgerKind::WarehouseStockOut => "warehouse-stock-out",
            LedgerKind::DepotStockIn => "depot-stock-in",
            LedgerKind::DepotStockOut => "depot-stock-out",
            LedgerKind::DepotRequest => "depot-request",
            LedgerKind::Damaged => "damaged",
            LedgerKind::Expired => "expired",
            LedgerKind::PurchaseOrder => "purchase-order",
            LedgerKind::Return => "return",
        }
    }

    /// Store collection holding this ledger's entries.
    pub fn collection(&self) -> &'static str {
        match self {
            LedgerKind::WarehouseStockIn => "wh-stock-in",
            LedgerKind::WarehouseStockOut => "wh-stock-out",
            LedgerKind::DepotStockIn => "depot-stock-in",
            LedgerKind::DepotStockOut => "depot-stock-out",
            LedgerKind::DepotRequest => "depot-requests",
            LedgerKind::Damaged => "damaged-products",
            LedgerKind::Expired => "expired-products",
            LedgerKind::PurchaseOrder => "purchase-orders",
            LedgerKind::Return => "returns",
        }
    }

    /// Expiry logs are kept per lot; every other ledger is per lot per day.
    pub fn key_scope(&self) -> KeyScope {
        match self {
            LedgerKind::Expired => KeyScope::Lot,
            _ => KeyScope::LotPerDay,
        }
    }

    /// Ledgers whose entries go through `pending → approved | rejected`.
    pub fn tracks_status(&self) -> bool {
        matches!(
            self,
            LedgerKind::DepotRequest | LedgerKind::Damaged | LedgerKind::Return
        )
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LedgerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LedgerError::Validation(format!("unknown ledger type: {}", s)))
    }
}
