//! # Reporting
//!
//! Read-only aggregates over the transaction and customer collections:
//! dashboard metrics, daily sales series, per-product profit ranking,
//! filtered transaction listings, and the outstanding receivables view.
//!
//! Every function here computes from a fresh read snapshot and writes
//! nothing. Repeated calls over unchanged data return identical figures.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::error::PosResult;
use warung_core::{Customer, Money, PaymentMethod, Transaction};
use warung_store::{CustomerRepository, Storage, TransactionRepository};

// =============================================================================
// Report DTOs
// =============================================================================

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_sales: Money,
    pub total_profit: Money,
    pub transaction_count: usize,
}

/// One day in the daily sales series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: Money,
    pub total_profit: Money,
    pub transaction_count: usize,
}

/// One row of the per-product ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRank {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
    pub revenue: Money,
    pub profit: Money,
}

/// Optional constraints for the transaction listing. Unset fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub method: Option<PaymentMethod>,
    pub customer_id: Option<i64>,
}

/// A customer with money still owed, plus the unpaid credit transactions
/// behind the balance.
#[derive(Debug, Clone)]
pub struct OutstandingReceivable {
    pub customer: Customer,
    pub unpaid_transactions: Vec<Transaction>,
}

// =============================================================================
// Reporting Service
// =============================================================================

/// Read-only reporting over the store.
pub struct Reporting {
    transactions: TransactionRepository,
    customers: CustomerRepository,
}

impl Reporting {
    /// Creates a reporting service over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Reporting {
            transactions: TransactionRepository::new(storage.clone()),
            customers: CustomerRepository::new(storage),
        }
    }

    /// Totals across all transactions ever recorded.
    pub fn dashboard(&self) -> PosResult<DashboardSummary> {
        let transactions = self.transactions.list()?;
        let summary = DashboardSummary {
            total_sales: transactions.iter().map(|t| t.total_rp).sum(),
            total_profit: transactions.iter().map(|t| t.profit_rp).sum(),
            transaction_count: transactions.len(),
        };
        debug!(
            transactions = summary.transaction_count,
            sales = %summary.total_sales,
            "Dashboard computed"
        );
        Ok(summary)
    }

    /// Per-day sales for the last `days` calendar days ending today.
    ///
    /// Days without sales appear with zero totals, so the series always
    /// has exactly `days` entries in chronological order.
    pub fn daily_sales(&self, days: u32) -> PosResult<Vec<DailySales>> {
        self.daily_sales_ending(Utc::now().date_naive(), days)
    }

    /// Like [`daily_sales`](Self::daily_sales) with an explicit end date.
    pub fn daily_sales_ending(&self, end: NaiveDate, days: u32) -> PosResult<Vec<DailySales>> {
        let transactions = self.transactions.list()?;

        let mut series: Vec<DailySales> = (0..days)
            .rev()
            .filter_map(|offset| end.checked_sub_days(chrono::Days::new(offset as u64)))
            .map(|date| DailySales {
                date,
                total_sales: Money::zero(),
                total_profit: Money::zero(),
                transaction_count: 0,
            })
            .collect();

        for txn in &transactions {
            let date = txn.timestamp.date_naive();
            if let Some(day) = series.iter_mut().find(|d| d.date == date) {
                day.total_sales += txn.total_rp;
                day.total_profit += txn.profit_rp;
                day.transaction_count += 1;
            }
        }

        Ok(series)
    }

    /// Quantity, revenue, and profit per product, best profit first.
    ///
    /// Figures come from the line item snapshots, so renamed or deleted
    /// catalog entries keep their sale-time identity. Ties break by
    /// product id for a stable order.
    pub fn product_ranking(&self) -> PosResult<Vec<ProductRank>> {
        let transactions = self.transactions.list()?;

        let mut by_product: HashMap<i64, ProductRank> = HashMap::new();
        for line in transactions.iter().flat_map(|t| t.items.iter()) {
            let rank = by_product.entry(line.product_id).or_insert_with(|| ProductRank {
                product_id: line.product_id,
                name: line.name.clone(),
                quantity_sold: 0,
                revenue: Money::zero(),
                profit: Money::zero(),
            });
            rank.quantity_sold += line.quantity;
            rank.revenue += line.line_total();
            rank.profit += line.line_profit();
        }

        let mut ranking: Vec<ProductRank> = by_product.into_values().collect();
        ranking.sort_by(|a, b| b.profit.cmp(&a.profit).then(a.product_id.cmp(&b.product_id)));
        Ok(ranking)
    }

    /// Transactions matching `filter`, newest first.
    pub fn transactions(&self, filter: &ReportFilter) -> PosResult<Vec<Transaction>> {
        let mut matches: Vec<Transaction> = self
            .transactions
            .list()?
            .into_iter()
            .filter(|t| {
                let date = t.timestamp.date_naive();
                filter.from.map_or(true, |from| date >= from)
                    && filter.to.map_or(true, |to| date <= to)
                    && filter.method.map_or(true, |m| t.payment_method == m)
                    && filter.customer_id.map_or(true, |c| t.customer_id == Some(c))
            })
            .collect();

        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matches)
    }

    /// Customers who still owe money, each with their unpaid credit
    /// transactions.
    pub fn outstanding_receivables(&self) -> PosResult<Vec<OutstandingReceivable>> {
        let customers = self.customers.list()?;
        let transactions = self.transactions.list()?;

        let report = customers
            .into_iter()
            .filter(|c| c.has_outstanding_balance())
            .map(|customer| {
                let unpaid = transactions
                    .iter()
                    .filter(|t| t.customer_id == Some(customer.id) && t.is_unpaid_credit())
                    .cloned()
                    .collect();
                OutstandingReceivable {
                    customer,
                    unpaid_transactions: unpaid,
                }
            })
            .collect();

        Ok(report)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};
    use warung_core::{LineItem, ProductKind};
    use warung_store::MemoryStore;

    fn line(product_id: i64, price: i64, cost: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id,
            name: format!("Produk {}", product_id),
            unit_price_rp: Money::from_rupiah(price),
            unit_cost_rp: Money::from_rupiah(cost),
            kind: ProductKind::Good,
            quantity,
            note: None,
        }
    }

    fn txn(id: &str, timestamp: DateTime<Utc>, items: Vec<LineItem>) -> Transaction {
        let total_rp = items.iter().map(|l| l.line_total()).sum();
        let profit_rp = items.iter().map(|l| l.line_profit()).sum();
        Transaction {
            id: id.to_string(),
            timestamp,
            payment_method: PaymentMethod::Cash,
            items,
            total_rp,
            profit_rp,
            customer_id: None,
            paid_rp: None,
            change_rp: None,
            due_date: None,
            paid_off: false,
        }
    }

    fn reporting_with(transactions: &[Transaction]) -> Reporting {
        let storage = Arc::new(MemoryStore::new());
        TransactionRepository::new(storage.clone())
            .save_all(transactions)
            .unwrap();
        Reporting::new(storage)
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_dashboard_totals() {
        let reporting = reporting_with(&[
            txn("TRX-1", at(2026, 8, 20), vec![line(1, 8_000, 5_000, 2)]),
            txn("TRX-2", at(2026, 8, 21), vec![line(2, 10_000, 4_000, 1)]),
        ]);

        let summary = reporting.dashboard().unwrap();
        assert_eq!(summary.total_sales, Money::from_rupiah(26_000));
        assert_eq!(summary.total_profit, Money::from_rupiah(12_000));
        assert_eq!(summary.transaction_count, 2);
    }

    #[test]
    fn test_dashboard_idempotent() {
        let reporting = reporting_with(&[txn(
            "TRX-1",
            at(2026, 8, 20),
            vec![line(1, 8_000, 5_000, 2)],
        )]);

        let first = reporting.dashboard().unwrap();
        let second = reporting.dashboard().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_daily_sales_zero_fills_quiet_days() {
        let end = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();
        let reporting = reporting_with(&[
            txn("TRX-1", at(2026, 8, 20), vec![line(1, 8_000, 5_000, 1)]),
            txn("TRX-2", at(2026, 8, 22), vec![line(1, 8_000, 5_000, 2)]),
        ]);

        let series = reporting.daily_sales_ending(end, 7).unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 8, 16).unwrap());
        assert_eq!(series[6].date, end);
        assert_eq!(series[4].total_sales, Money::from_rupiah(8_000));
        assert_eq!(series[5].total_sales, Money::zero());
        assert_eq!(series[6].total_sales, Money::from_rupiah(16_000));
        assert_eq!(series[6].transaction_count, 1);
    }

    #[test]
    fn test_product_ranking_sorted_by_profit() {
        let reporting = reporting_with(&[
            txn("TRX-1", at(2026, 8, 20), vec![line(1, 8_000, 5_000, 2)]),
            txn(
                "TRX-2",
                at(2026, 8, 21),
                vec![line(2, 20_000, 5_000, 1), line(1, 8_000, 5_000, 1)],
            ),
        ]);

        let ranking = reporting.product_ranking().unwrap();
        assert_eq!(ranking.len(), 2);
        // Product 2: profit 15000; product 1: profit 9000 over qty 3
        assert_eq!(ranking[0].product_id, 2);
        assert_eq!(ranking[0].profit, Money::from_rupiah(15_000));
        assert_eq!(ranking[1].product_id, 1);
        assert_eq!(ranking[1].quantity_sold, 3);
        assert_eq!(ranking[1].revenue, Money::from_rupiah(24_000));
    }

    #[test]
    fn test_transaction_filter_by_method_and_date() {
        let mut credit = txn("TRX-3", at(2026, 8, 22), vec![line(1, 8_000, 5_000, 1)]);
        credit.payment_method = PaymentMethod::Credit;
        credit.customer_id = Some(101);

        let reporting = reporting_with(&[
            txn("TRX-1", at(2026, 8, 18), vec![line(1, 8_000, 5_000, 1)]),
            txn("TRX-2", at(2026, 8, 21), vec![line(1, 8_000, 5_000, 1)]),
            credit,
        ]);

        let recent = reporting
            .transactions(&ReportFilter {
                from: NaiveDate::from_ymd_opt(2026, 8, 20),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first
        assert_eq!(recent[0].id, "TRX-3");

        let credit_only = reporting
            .transactions(&ReportFilter {
                method: Some(PaymentMethod::Credit),
                customer_id: Some(101),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(credit_only.len(), 1);
        assert_eq!(credit_only[0].id, "TRX-3");
    }

    #[test]
    fn test_outstanding_receivables_only_lists_debtors() {
        let storage = Arc::new(MemoryStore::new());

        let mut unpaid = txn("TRX-1", at(2026, 8, 20), vec![line(1, 8_000, 5_000, 1)]);
        unpaid.payment_method = PaymentMethod::Credit;
        unpaid.customer_id = Some(101);
        TransactionRepository::new(storage.clone())
            .save_all(&[unpaid])
            .unwrap();

        CustomerRepository::new(storage.clone())
            .save_all(&[
                Customer {
                    id: 101,
                    name: "Bu Sari".to_string(),
                    contact: String::new(),
                    receivable_rp: Money::from_rupiah(8_000),
                },
                Customer {
                    id: 102,
                    name: "Pak Budi".to_string(),
                    contact: String::new(),
                    receivable_rp: Money::zero(),
                },
            ])
            .unwrap();

        let report = Reporting::new(storage).outstanding_receivables().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].customer.id, 101);
        assert_eq!(report[0].unpaid_transactions.len(), 1);
    }
}
