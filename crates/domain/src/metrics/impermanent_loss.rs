use crate::error::DomainError;
use crate::value_objects::impermanent_loss::IlPriceChange;
use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Loss reported for a ratio the formula is undefined for (100% loss).
pub const IL_FLOOR: f64 = -1.0;

/// Impermanent loss of a constant product position for a change in the
/// relative price of the two pooled assets.
///
/// formula: 2 * sqrt(r) / (1 + r) - 1
///
/// where `r` is the new price ratio divided by the old one. Non-positive and
/// non-finite ratios return [`IL_FLOOR`].
///
/// # Returns
///
/// * `f64` - The loss as a non-positive decimal (e.g., -0.0572 for 5.72%)
pub fn calculate_il_for_ratio(price_ratio: f64) -> f64 {
    if !price_ratio.is_finite() || price_ratio <= 0.0 {
        return IL_FLOOR;
    }
    let sqrt_ratio = price_ratio.sqrt();
    2.0 * sqrt_ratio / (1.0 + price_ratio) - 1.0
}

/// [`calculate_il_for_ratio`] in percent points.
pub fn calculate_il_percentage(price_ratio: f64) -> f64 {
    calculate_il_for_ratio(price_ratio) * 100.0
}

/// Calculates Impermanent Loss for a constant product pool from the entry
/// and current price of token1 in terms of token0.
///
/// # Arguments
///
/// * `entry_price` - The price at which the position was opened
/// * `current_price` - The current price
pub fn calculate_il_constant_product(
    entry_price: Decimal,
    current_price: Decimal,
) -> Result<Decimal, DomainError> {
    Price::new(entry_price).ensure_positive("entry_price")?;
    Price::new(current_price).ensure_positive("current_price")?;

    let ratio = (current_price / entry_price).to_f64().unwrap_or(0.0);
    let il = calculate_il_for_ratio(ratio);
    Decimal::from_f64(il).ok_or(DomainError::UnrepresentablePrice(il))
}

/// Impermanent loss when both pooled prices move from an initial to a final
/// value.
pub fn calculate_il_for_price_change(
    initial_price_a: Price,
    initial_price_b: Price,
    final_price_a: Price,
    final_price_b: Price,
) -> Result<IlPriceChange, DomainError> {
    initial_price_a.ensure_positive("initial_price_a")?;
    initial_price_b.ensure_positive("initial_price_b")?;
    final_price_a.ensure_positive("final_price_a")?;
    final_price_b.ensure_positive("final_price_b")?;

    let (ia, ib) = (initial_price_a.as_f64(), initial_price_b.as_f64());
    let (fa, fb) = (final_price_a.as_f64(), final_price_b.as_f64());

    let ratio_change = (fa / fb) / (ia / ib);
    let il = calculate_il_for_ratio(ratio_change);

    Ok(IlPriceChange {
        il_decimal: il,
        il_percentage: il * 100.0,
        ratio_change,
        price_change_a_pct: (fa / ia - 1.0) * 100.0,
        price_change_b_pct: (fb / ib - 1.0) * 100.0,
    })
}
