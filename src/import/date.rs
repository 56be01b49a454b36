use chrono::NaiveDate;

const SHORT_YEAR_FORMAT: &str = "%d.%m.%y";
const LONG_YEAR_FORMAT: &str = "%d.%m.%Y";

/// Parses a `dd.mm.yy` date as bank statements write it. `dd.mm.yyyy` is accepted as well.
pub fn parse_date(cell: &str) -> Result<NaiveDate, chrono::ParseError> {
    let cell = cell.trim();
    NaiveDate::parse_from_str(cell, SHORT_YEAR_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(cell, LONG_YEAR_FORMAT))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("01.03.23", date(2023, 3, 1))]
    #[case("31.12.99", date(1999, 12, 31))]
    #[case("29.02.24", date(2024, 2, 29))]
    #[case("15.03.2023", date(2023, 3, 15))]
    #[case(" 02.04.23", date(2023, 4, 2))]
    fn valid_dates(#[case] input: &str, #[case] expected: NaiveDate) {
        assert_eq!(Ok(expected), parse_date(input));
    }

    #[rstest]
    fn invalid_dates(
        #[values("", "2023-03-01", "32.01.23", "29.02.23", "01/03/23", "1.3", "vorgemerkt")] input: &str,
    ) {
        assert!(parse_date(input).is_err());
    }
}
