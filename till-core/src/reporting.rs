//! Sales reporting
//!
//! One-way CSV export of order history and the backup file naming
//! convention. Reporting output is never read back as authoritative
//! state.

use chrono::{DateTime, Utc};

use shared::models::Order;

/// Render order history as CSV: `Order ID, Date, Time, Customer,
/// Items, Total`. Items are the semicolon-joined `"{qty}x {name}"`
/// lines; text fields are double-quoted with embedded quotes doubled.
pub fn orders_to_csv(orders: &[Order]) -> String {
    let mut rows = Vec::with_capacity(orders.len() + 1);
    rows.push("Order ID,Date,Time,Customer,Items,Total".to_string());

    for order in orders {
        let (date, time) = split_date(&order.date);
        let items = order
            .items
            .iter()
            .map(|i| format!("{}x {}", i.quantity, i.name))
            .collect::<Vec<_>>()
            .join("; ");
        let customer = if order.customer_name.is_empty() {
            "Unknown"
        } else {
            &order.customer_name
        };
        rows.push(format!(
            "{},{date},{time},{},{},{:.2}",
            quote(&order.id),
            quote(customer),
            quote(&items),
            order.total
        ));
    }

    rows.join("\n")
}

/// Backup file name: `Till_{prefix}_{YYYY-MM-DD}_{HH-MM-SS}.json`
/// (colon-free, safe on every filesystem).
pub fn export_file_name(prefix: &str) -> String {
    let now = Utc::now();
    format!(
        "Till_{prefix}_{}_{}.json",
        now.format("%Y-%m-%d"),
        now.format("%H-%M-%S")
    )
}

/// Split an ISO order date into date and time columns. Unparseable
/// dates are exported verbatim in the date column.
fn split_date(raw: &str) -> (String, String) {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => {
            let dt = dt.with_timezone(&Utc);
            (
                dt.format("%Y-%m-%d").to_string(),
                dt.format("%H:%M:%S").to_string(),
            )
        }
        Err(_) => (raw.to_string(), String::new()),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
