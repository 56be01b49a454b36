use rust_decimal::Decimal;

const MAX_DECIMAL_PLACES: u32 = 2;

/// Parses an amount cell written with a decimal comma, e.g. `-1.234,56`.
///
/// `.` is a thousands separator if the cell also contains a comma, and the decimal point
/// otherwise. An empty cell is zero. Amounts finer than cents are rejected.
pub fn parse_amount(cell: &str) -> Result<Decimal, &'static str> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let normalized = if cell.contains(',') {
        cell.replace('.', "").replace(',', ".")
    } else {
        cell.to_string()
    };
    if normalized.chars().any(char::is_whitespace) {
        return Err("Amount contains whitespace");
    }
    let amount = Decimal::from_str_exact(&normalized).map_err(|_| "Failed to parse amount")?;
    if amount.scale() > MAX_DECIMAL_PLACES {
        return Err("Amount has more than two decimal places");
    }
    Ok(amount)
}
