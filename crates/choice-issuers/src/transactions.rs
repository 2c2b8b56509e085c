//! # Transaction Summary
//!
//! Reduces a block-explorer transaction list to the display statistics
//! carried by a wallet-history credential.
//!
//! The volume, asset and value figures are projections from the
//! transaction count, not measured values. Only `txCount`, `accountAge`,
//! `firstTxDate` and `activityData` come from the transactions themselves.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use choice_core::Timestamp;

use crate::error::IssuerError;
use crate::traits::Transaction;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Months covered by [`BlockchainStats::activity_data`], current included.
pub const ACTIVITY_MONTHS: i32 = 6;

/// Transaction count in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthActivity {
    /// Three-letter month name.
    pub name: String,
    /// Transactions in that month.
    pub tx: u64,
}

/// Display statistics for a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainStats {
    /// Number of transactions.
    pub tx_count: u64,
    /// Calendar-year age, e.g. `"3 Yrs"` or `"< 1 Yrs"`.
    pub account_age: String,
    /// Earliest transaction, absent for a wallet with no history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_tx_date: Option<Timestamp>,
    /// Projected volume, e.g. `"1.50 ETH"`.
    pub total_volume: String,
    /// Projected asset count, e.g. `"3 Token(s)"`.
    pub assets_held: String,
    /// Projected value, e.g. `"$1,200"`.
    pub net_value: String,
    /// Per-month counts for the last six months, oldest first.
    pub activity_data: Vec<MonthActivity>,
}

/// Summarize `transactions` as of `now`.
///
/// The earliest block time is taken as the first transaction regardless of
/// list order. Account age is the difference of calendar years, so a wallet
/// first used last December is "1 Yrs" old in January.
///
/// # Errors
///
/// [`IssuerError::Unavailable`] if any block time is not an epoch-seconds
/// integer.
pub fn summarize_transactions(
    transactions: &[Transaction],
    now: &Timestamp,
) -> Result<BlockchainStats, IssuerError> {
    let times = transactions
        .iter()
        .map(Transaction::timestamp)
        .collect::<Result<Vec<_>, _>>()?;

    let tx_count = times.len() as u64;
    let first = times.iter().min().copied();
    let age_years = now.as_datetime().year() - first.unwrap_or(*now).as_datetime().year();
    let account_age = if age_years > 0 {
        format!("{age_years} Yrs")
    } else {
        "< 1 Yrs".to_string()
    };

    // 0.15 ETH per transaction, in hundredths.
    let volume_hundredths = tx_count * 15;

    Ok(BlockchainStats {
        tx_count,
        account_age,
        first_tx_date: first,
        total_volume: format!("{}.{:02} ETH", volume_hundredths / 100, volume_hundredths % 100),
        assets_held: format!("{} Token(s)", tx_count / 5 + 1),
        net_value: format!("${}", group_thousands(tx_count * 120)),
        activity_data: activity_by_month(&times, now),
    })
}

fn activity_by_month(times: &[Timestamp], now: &Timestamp) -> Vec<MonthActivity> {
    let month_index = |t: &Timestamp| {
        let dt = t.as_datetime();
        dt.year() * 12 + dt.month0() as i32
    };
    let current = month_index(now);
    (0..ACTIVITY_MONTHS)
        .rev()
        .map(|back| {
            let index = current - back;
            let tx = times.iter().filter(|t| month_index(t) == index).count() as u64;
            MonthActivity {
                name: MONTH_NAMES[index.rem_euclid(12) as usize].to_string(),
                tx,
            }
        })
        .collect()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn tx(i: usize, when: &str) -> Transaction {
        Transaction::new(format!("0x{i:02x}"), at(when).epoch_secs())
    }

    #[test]
    fn empty_history() {
        let stats = summarize_transactions(&[], &at("2026-10-19T00:00:00Z")).unwrap();
        assert_eq!(stats.tx_count, 0);
        assert_eq!(stats.account_age, "< 1 Yrs");
        assert_eq!(stats.first_tx_date, None);
        assert_eq!(stats.total_volume, "0.00 ETH");
        assert_eq!(stats.assets_held, "1 Token(s)");
        assert_eq!(stats.net_value, "$0");
        let names: Vec<&str> = stats.activity_data.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["May", "Jun", "Jul", "Aug", "Sep", "Oct"]);
        assert!(stats.activity_data.iter().all(|m| m.tx == 0));
    }

    #[test]
    fn projections_scale_with_count() {
        let txs: Vec<Transaction> = (0..12).map(|i| tx(i, "2026-10-01T00:00:00Z")).collect();
        let stats = summarize_transactions(&txs, &at("2026-10-19T00:00:00Z")).unwrap();
        assert_eq!(stats.tx_count, 12);
        assert_eq!(stats.total_volume, "1.80 ETH");
        assert_eq!(stats.assets_held, "3 Token(s)");
        assert_eq!(stats.net_value, "$1,440");
        assert_eq!(stats.activity_data[5].tx, 12);
    }

    #[test]
    fn account_age_is_calendar_year_difference() {
        let txs = vec![
            tx(1, "2026-01-05T00:00:00Z"),
            tx(2, "2025-12-31T23:00:00Z"),
        ];
        let stats = summarize_transactions(&txs, &at("2026-01-10T00:00:00Z")).unwrap();
        assert_eq!(stats.account_age, "1 Yrs");
        assert_eq!(stats.first_tx_date, Some(at("2025-12-31T23:00:00Z")));
    }

    #[test]
    fn earliest_transaction_wins_regardless_of_order() {
        let txs = vec![
            tx(1, "2021-03-01T00:00:00Z"),
            tx(2, "2024-03-01T00:00:00Z"),
            tx(3, "2019-03-01T00:00:00Z"),
        ];
        let stats = summarize_transactions(&txs, &at("2026-10-19T00:00:00Z")).unwrap();
        assert_eq!(stats.account_age, "7 Yrs");
    }

    #[test]
    fn activity_window_crosses_year_boundary() {
        let txs = vec![
            tx(1, "2025-09-15T00:00:00Z"),
            tx(2, "2025-09-20T00:00:00Z"),
            tx(3, "2026-02-01T00:00:00Z"),
            // Outside the window.
            tx(4, "2025-08-31T00:00:00Z"),
            tx(5, "2024-09-15T00:00:00Z"),
        ];
        let stats = summarize_transactions(&txs, &at("2026-02-10T00:00:00Z")).unwrap();
        let got: Vec<(&str, u64)> = stats
            .activity_data
            .iter()
            .map(|m| (m.name.as_str(), m.tx))
            .collect();
        assert_eq!(
            got,
            vec![("Sep", 2), ("Oct", 0), ("Nov", 0), ("Dec", 0), ("Jan", 0), ("Feb", 1)]
        );
    }

    #[test]
    fn non_numeric_block_time_is_an_error() {
        let bad = Transaction {
            hash: "0x1".to_string(),
            time_stamp: "yesterday".to_string(),
        };
        assert!(matches!(
            summarize_transactions(&[bad], &at("2026-10-19T00:00:00Z")),
            Err(IssuerError::Unavailable(_))
        ));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn explorer_json_shape() {
        let raw = r#"{"hash":"0xab","timeStamp":"1700000000","value":"0"}"#;
        let t: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(t.timestamp().unwrap().epoch_secs(), 1_700_000_000);
    }

    #[test]
    fn serializes_with_display_field_names() {
        let v = serde_json::to_value(
            summarize_transactions(&[tx(1, "2026-10-01T00:00:00Z")], &at("2026-10-19T00:00:00Z"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(v["txCount"], 1);
        assert_eq!(v["accountAge"], "< 1 Yrs");
        assert!(v["firstTxDate"].is_string());
        assert_eq!(v["activityData"][5]["name"], "Oct");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The window always has six months and never counts a transaction
        /// twice.
        #[test]
        fn activity_window_shape(
            secs in prop::collection::vec(1_500_000_000i64..1_800_000_000, 0..60),
        ) {
            let now = Timestamp::parse("2026-10-19T12:00:00Z").unwrap();
            let txs: Vec<Transaction> = secs.iter().map(|s| Transaction::new("0x", *s)).collect();
            let stats = summarize_transactions(&txs, &now).unwrap();
            prop_assert_eq!(stats.activity_data.len(), ACTIVITY_MONTHS as usize);
            let counted: u64 = stats.activity_data.iter().map(|m| m.tx).sum();
            prop_assert!(counted <= stats.tx_count);
            prop_assert_eq!(stats.tx_count, secs.len() as u64);
        }
    }
}
