//! CSV output of sweep results

use crate::request::NpvResult;
use csv::Writer;
use std::error::Error;
use std::io::Write;

/// Write results as `rate,npv` rows, two decimals each
pub fn write_results_csv<W: Write>(writer: W, results: &[NpvResult]) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(["rate", "npv"])?;

    for result in results {
        csv_writer.write_record([format!("{:.2}", result.rate), format!("{:.2}", result.value)])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_results() {
        let results = vec![
            NpvResult { rate: dec!(1), value: dec!(164.79) },
            NpvResult { rate: dec!(1.5), value: dec!(-3) },
        ];

        let mut buffer = Vec::new();
        write_results_csv(&mut buffer, &results).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "rate,npv\n1.00,164.79\n1.50,-3.00\n");
    }
}
