//! Cart pricing

use crate::domain::carts::{errors::InvalidInput, models::CartLine};

/// Largest total a cart may carry. Totals are persisted as signed 64-bit integers.
pub const MAX_TOTAL_PRICE: u64 = i64::MAX.unsigned_abs();

/// Sum of `price × quantity` over `lines`, using each line's snapshot price.
///
/// # Errors
///
/// Returns [`InvalidInput::PriceOverflow`] when the total exceeds [`MAX_TOTAL_PRICE`].
pub fn total_price(lines: &[CartLine]) -> Result<u64, InvalidInput> {
    let total = lines.iter().try_fold(0_u64, |total, line| {
        line.price
            .checked_mul(u64::from(line.quantity))
            .and_then(|line_total| total.checked_add(line_total))
            .ok_or(InvalidInput::PriceOverflow)
    })?;

    if total > MAX_TOTAL_PRICE {
        return Err(InvalidInput::PriceOverflow);
    }

    Ok(total)
}
