use crate::domain::debt::Debt;
use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streams [`Debt`] rows out of a CSV document.
///
/// Columns are matched by header name, snake_case or the front end's
/// camelCase. Cells are trimmed and optional trailing columns may be left off.
/// Rows are only parsed here; the engine checks their values.
pub struct DebtReader<R> {
    inner: csv::Reader<R>,
}

impl DebtReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> DebtReader<R> {
    pub fn new(source: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { inner }
    }

    /// One item per data row, in file order. A row that fails to parse turns
    /// into an `Err` and reading carries on with the next one.
    pub fn debts(self) -> impl Iterator<Item = Result<Debt>> {
        self.inner
            .into_deserialize::<Debt>()
            .map(|row| -> Result<Debt> { Ok(row?) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::error::PlannerError;
    use std::io::Write;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, name, remaining_amount, interest_rate, minimum_payment, total_amount, due_date\n\
                    card, Visa, 1200, 12, 103, 2000, 2026-11-01\n\
                    loan, , 1000.50, 6.5, 40, , ";
        let reader = DebtReader::new(data.as_bytes());
        let results: Vec<Result<Debt>> = reader.debts().collect();

        assert_eq!(results.len(), 2);
        let card = results[0].as_ref().unwrap();
        assert_eq!(card.id, "card");
        assert_eq!(card.name.as_deref(), Some("Visa"));
        assert_eq!(card.minimum_payment, Some(Money::new(dec!(103))));
        assert_eq!(card.total_amount, Some(Money::new(dec!(2000))));
        assert_eq!(card.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));

        let loan = results[1].as_ref().unwrap();
        assert_eq!(loan.name, None);
        assert_eq!(loan.remaining_amount, Money::new(dec!(1000.50)));
        assert_eq!(loan.total_amount, None);
        assert_eq!(loan.due_date, None);
    }

    #[test]
    fn test_reader_accepts_camel_case_headers() {
        let data = "id,remainingAmount,interestRate,monthlyPayment\nloan,1000,24,50";
        let reader = DebtReader::new(data.as_bytes());
        let debt = reader.debts().next().unwrap().unwrap();
        assert_eq!(debt.minimum_payment, Some(Money::new(dec!(50))));
    }

    #[test]
    fn test_reader_missing_minimum_is_none() {
        let data = "id,remaining_amount,interest_rate,minimum_payment\ncard,500,20,";
        let reader = DebtReader::new(data.as_bytes());
        let debt = reader.debts().next().unwrap().unwrap();
        assert_eq!(debt.minimum_payment, None);
    }

    #[test]
    fn test_reader_keeps_going_after_bad_row() {
        let data = "id,remaining_amount,interest_rate,minimum_payment\n\
                    card,lots,20,10\n\
                    loan,900,8,45";
        let reader = DebtReader::new(data.as_bytes());
        let results: Vec<Result<Debt>> = reader.debts().collect();

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(PlannerError::CsvError(_))));
        assert_eq!(results[1].as_ref().unwrap().id, "loan");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,remaining_amount,interest_rate,minimum_payment").unwrap();
        writeln!(file, "car,5000,6,150").unwrap();
        file.flush().unwrap();

        let debts: Vec<Debt> = DebtReader::from_path(file.path())
            .unwrap()
            .debts()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].remaining_amount, Money::new(dec!(5000)));

        assert!(matches!(
            DebtReader::from_path("no/such/debts.csv"),
            Err(PlannerError::IoError(_))
        ));
    }
}
