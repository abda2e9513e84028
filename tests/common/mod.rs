use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: &str = "id,name,remaining_amount,interest_rate,minimum_payment";

/// Writes `rows` under the standard debts header to a temporary file.
pub fn debts_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// Generates `rows` debts with varied balances and rates, each with a convergent minimum.
pub fn generate_debts_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "name", "remaining_amount", "interest_rate", "minimum_payment"])?;

    for i in 1..=rows {
        let balance = 500 + (i * 137) % 9500;
        let rate = (i * 7) % 30;
        // 3% of the balance always beats at most 29.x% APR monthly interest
        let minimum = balance * 3 / 100 + 10;
        wtr.write_record([
            format!("debt-{i:04}"),
            format!("Debt {i}"),
            balance.to_string(),
            rate.to_string(),
            minimum.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
