#![forbid(unsafe_code)]

//! Harness datasets: JSON files or synthetic rows.

use rankbar::{ChartOptionsPatch, RowRecord, TooltipPayload};

/// Deterministic synthetic dataset of `rows` stores.
///
/// Amounts follow a simple LCG so repeated runs produce identical charts;
/// percents are each row's share of the total.
pub fn synthetic(rows: usize, seed: u64) -> Vec<RowRecord> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let amounts: Vec<f64> = (0..rows)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % 100_000) as f64 / 100.0
        })
        .collect();
    let total: f64 = amounts.iter().sum();

    amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            let percent = if total > 0.0 {
                (amount / total * 10_000.0).round() / 100.0
            } else {
                0.0
            };
            let mut record = RowRecord::new(format!("Store #{i:05}"), amount, percent);
            if i % 3 == 0 {
                record = record.with_tooltip(
                    TooltipPayload::new(format!("{} orders", (amount * 3.0).round()))
                        .with_unit("pcs"),
                );
            }
            record
        })
        .collect()
}

/// Parse a dataset file: either a bare array of records or an options
/// object (`{"data": [...], "sort": "desc", ...}`).
pub fn parse(json: &str) -> Result<ChartOptionsPatch, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        let data: Vec<RowRecord> = serde_json::from_value(value)?;
        Ok(ChartOptionsPatch::new().data(data))
    } else {
        serde_json::from_value(value)
    }
}
