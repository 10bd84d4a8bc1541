//! # Receipt Rendering
//!
//! Turns a committed transaction into the plain-text slip handed to the
//! customer. Pure consumer of the transaction record; nothing here reads
//! or writes the store.

use std::fmt::Write;

use warung_core::{PaymentMethod, Transaction};

const RECEIPT_WIDTH: usize = 32;
const STORE_NAME: &str = "WARUNG POS";

/// Renders a printable plain-text receipt for a completed transaction.
///
/// Layout targets a 32-column thermal printer: centered header, one line
/// per item with a `qty x unit price` detail row, then totals and the
/// settlement details for the payment method used.
pub fn render_receipt(transaction: &Transaction) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RECEIPT_WIDTH);
    let thin = "-".repeat(RECEIPT_WIDTH);

    let _ = writeln!(out, "{}", center(STORE_NAME));
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "No    : {}", transaction.id);
    let _ = writeln!(
        out,
        "Waktu : {}",
        transaction.timestamp.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(out, "{}", thin);

    for item in &transaction.items {
        let _ = writeln!(out, "{}", item.name);
        let _ = writeln!(
            out,
            "{}",
            right_pad(
                &format!("  {} x {}", item.quantity, item.unit_price_rp),
                &item.line_total().to_string(),
            )
        );
        if let Some(note) = &item.note {
            let _ = writeln!(out, "  ({})", note);
        }
    }

    let _ = writeln!(out, "{}", thin);
    let _ = writeln!(
        out,
        "{}",
        right_pad("TOTAL", &transaction.total_rp.to_string())
    );
    let _ = writeln!(out, "Metode: {}", transaction.payment_method);

    match transaction.payment_method {
        PaymentMethod::Cash => {
            if let (Some(paid), Some(change)) = (transaction.paid_rp, transaction.change_rp) {
                let _ = writeln!(out, "{}", right_pad("Bayar", &paid.to_string()));
                let _ = writeln!(out, "{}", right_pad("Kembali", &change.to_string()));
            }
        }
        PaymentMethod::Credit => {
            if let Some(customer_id) = transaction.customer_id {
                let _ = writeln!(out, "Pelanggan: #{}", customer_id);
            }
            if let Some(due) = transaction.due_date {
                let _ = writeln!(out, "Jatuh tempo: {}", due.format("%Y-%m-%d"));
            }
        }
        PaymentMethod::Qris | PaymentMethod::Transfer => {}
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", center("Terima kasih!"));

    out
}

// Widths are counted in characters, not bytes, so non-ASCII names keep
// the columns aligned.
fn center(text: &str) -> String {
    let width = text.chars().count();
    if width >= RECEIPT_WIDTH {
        return text.to_string();
    }
    let pad = (RECEIPT_WIDTH - width) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn right_pad(left: &str, right: &str) -> String {
    let width = left.chars().count() + right.chars().count();
    if width >= RECEIPT_WIDTH {
        return format!("{} {}", left, right);
    }
    format!("{}{}{}", left, " ".repeat(RECEIPT_WIDTH - width), right)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use warung_core::{LineItem, Money, ProductKind};

    fn cash_transaction() -> Transaction {
        Transaction {
            id: "TRX-1724650000000".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 26, 9, 30, 0).unwrap(),
            payment_method: PaymentMethod::Cash,
            items: vec![LineItem {
                product_id: 1,
                name: "Kopi Sachet".to_string(),
                unit_price_rp: Money::from_rupiah(8_000),
                unit_cost_rp: Money::from_rupiah(5_000),
                kind: ProductKind::Good,
                quantity: 2,
                note: Some("tanpa gula".to_string()),
            }],
            total_rp: Money::from_rupiah(16_000),
            profit_rp: Money::from_rupiah(6_000),
            customer_id: None,
            paid_rp: Some(Money::from_rupiah(20_000)),
            change_rp: Some(Money::from_rupiah(4_000)),
            due_date: None,
            paid_off: false,
        }
    }

    #[test]
    fn test_cash_receipt_contents() {
        let receipt = render_receipt(&cash_transaction());

        assert!(receipt.contains("WARUNG POS"));
        assert!(receipt.contains("TRX-1724650000000"));
        assert!(receipt.contains("Kopi Sachet"));
        assert!(receipt.contains("2 x Rp8.000"));
        assert!(receipt.contains("(tanpa gula)"));
        assert!(receipt.contains("Rp16.000"));
        assert!(receipt.contains("Rp20.000"));
        assert!(receipt.contains("Rp4.000"));
        assert!(receipt.contains("Metode: Cash"));
    }

    #[test]
    fn test_layout_counts_characters_not_bytes() {
        // "Es Dégan" is 8 characters but 9 bytes
        let padded = right_pad("Es Dégan", "Rp6.000");
        assert_eq!(padded.chars().count(), 32);

        let centered = center("Kue Lapis Légit");
        assert_eq!(
            centered.chars().count(),
            (32 - "Kue Lapis Légit".chars().count()) / 2 + "Kue Lapis Légit".chars().count()
        );
        assert!(centered.starts_with("        "));
    }

    #[test]
    fn test_credit_receipt_shows_customer_and_due_date() {
        let mut txn = cash_transaction();
        txn.payment_method = PaymentMethod::Credit;
        txn.paid_rp = None;
        txn.change_rp = None;
        txn.customer_id = Some(101);
        txn.due_date = NaiveDate::from_ymd_opt(2026, 9, 10);

        let receipt = render_receipt(&txn);
        assert!(receipt.contains("Pelanggan: #101"));
        assert!(receipt.contains("Jatuh tempo: 2026-09-10"));
        assert!(!receipt.contains("Kembali"));
    }
}
