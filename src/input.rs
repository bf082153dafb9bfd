//! Cash-flow input parsing
//!
//! Two sources: a comma-separated string as typed on the command line, and
//! a CSV file with one cash flow per row.

use crate::error::{EngineResult, NpvError};
use csv::Reader;
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;

/// Parse "-1000, 300, 400" into decimals
///
/// Empty tokens are skipped. Every token that is not a number is reported in
/// a single error.
pub fn parse_cash_flows(text: &str) -> EngineResult<Vec<Decimal>> {
    let tokens: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(NpvError::invalid_input(
            "cash_flows",
            "At least one cash flow is required",
        ));
    }

    let mut values = Vec::with_capacity(tokens.len());
    let mut invalid = Vec::new();
    for token in tokens {
        match Decimal::from_str(token) {
            Ok(value) => values.push(value),
            Err(_) => invalid.push(token),
        }
    }

    if !invalid.is_empty() {
        return Err(NpvError::invalid_input(
            "cash_flows",
            format!("Invalid cash flow values: {}", invalid.join(", ")),
        ));
    }

    Ok(values)
}

/// Load cash flows from CSV with a header row
///
/// Uses the `amount` column when there is one, otherwise the first column.
/// Row order is period order.
pub fn load_cash_flows_csv<R: Read>(reader: R) -> EngineResult<Vec<Decimal>> {
    let mut csv_reader = Reader::from_reader(reader);

    let column = csv_reader
        .headers()
        .map_err(|e| NpvError::invalid_input("cash_flows", format!("Unreadable CSV header: {}", e)))?
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("amount"))
        .unwrap_or(0);

    let mut values = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result
            .map_err(|e| NpvError::invalid_input("cash_flows", format!("Unreadable CSV row {}: {}", row + 1, e)))?;
        let field = record.get(column).unwrap_or("").trim();
        let value = Decimal::from_str(field).map_err(|_| {
            NpvError::invalid_input(
                "cash_flows",
                format!("Invalid cash flow {:?} on row {}", field, row + 1),
            )
        })?;
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_comma_separated() {
        let values = parse_cash_flows(" -1000, 300.50 ,400,, 500 ").unwrap();
        assert_eq!(values, vec![dec!(-1000), dec!(300.50), dec!(400), dec!(500)]);
    }

    #[test]
    fn test_parse_empty_input() {
        for text in ["", "   ", ",,,"] {
            match parse_cash_flows(text) {
                Err(NpvError::InvalidInput { reason, .. }) => {
                    assert_eq!(reason, "At least one cash flow is required")
                }
                other => panic!("expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_reports_every_bad_token() {
        match parse_cash_flows("-1000, abc, 300, 4x0") {
            Err(NpvError::InvalidInput { reason, .. }) => {
                assert_eq!(reason, "Invalid cash flow values: abc, 4x0")
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_load_csv_amount_column() {
        let data = "period,amount\n0,-1000\n1,300\n2,400\n";
        let values = load_cash_flows_csv(data.as_bytes()).unwrap();
        assert_eq!(values, vec![dec!(-1000), dec!(300), dec!(400)]);
    }

    #[test]
    fn test_load_csv_first_column_fallback() {
        let data = "cash_flow\n-500\n125.25\n";
        let values = load_cash_flows_csv(data.as_bytes()).unwrap();
        assert_eq!(values, vec![dec!(-500), dec!(125.25)]);
    }

    #[test]
    fn test_load_csv_bad_value_names_row() {
        let data = "amount\n-500\nlots\n";
        match load_cash_flows_csv(data.as_bytes()) {
            Err(NpvError::InvalidInput { reason, .. }) => assert!(reason.contains("row 2")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
