//! Monetary amount helpers.
//!
//! Amounts are carried as [`Decimal`] so that values such as `0.1` stay
//! exact. Balances arriving as IEEE doubles are converted once, on intake,
//! and quantized to a fixed number of decimal places (the minor-unit scale:
//! 2 for cents).

use crate::core::error::InvalidInput;
use crate::core::participant::ParticipantId;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest supported minor-unit scale. Keeps `10^scale` within `i64`.
pub const MAX_SCALE: u32 = 18;

/// Default scale: two decimal places (cents).
pub const DEFAULT_SCALE: u32 = 2;

pub fn check_scale(scale: u32) -> Result<(), InvalidInput> {
    if scale > MAX_SCALE {
        return Err(InvalidInput::UnsupportedScale {
            scale,
            max: MAX_SCALE,
        });
    }
    Ok(())
}

/// Round an amount to `scale` decimal places, half away from zero.
pub fn quantize(amount: Decimal, scale: u32) -> Decimal {
    amount
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Convert a wire balance into a quantized decimal.
///
/// Rejects NaN and infinities, and values too large for [`Decimal`].
///
/// # Examples
///
/// ```
/// use bill_settlement::core::money::from_f64;
/// use bill_settlement::core::participant::ParticipantId;
/// use rust_decimal_macros::dec;
///
/// let name = ParticipantId::new("A");
/// assert_eq!(from_f64(&name, 0.1, 2).unwrap(), dec!(0.1));
/// assert!(from_f64(&name, f64::NAN, 2).is_err());
/// ```
pub fn from_f64(name: &ParticipantId, value: f64, scale: u32) -> Result<Decimal, InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::NonFiniteBalance {
            name: name.clone(),
            value,
        });
    }
    let decimal = Decimal::from_f64(value).ok_or_else(|| InvalidInput::OutOfRange {
        name: name.clone(),
        value,
    })?;
    Ok(quantize(decimal, scale))
}

/// Lossy conversion back to `f64` for JSON number output.
pub fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Express an amount in integer minor units (e.g. cents for scale 2).
///
/// Returns `None` if the amount has more precision than `scale` or does
/// not fit in an `i64`.
pub fn to_minor_units(amount: Decimal, scale: u32) -> Option<i64> {
    let factor = Decimal::from_i128_with_scale(10_i128.checked_pow(scale)?, 0);
    let units = amount.checked_mul(factor)?;
    if units.fract() != Decimal::ZERO {
        return None;
    }
    units.to_i64()
}

pub fn from_minor_units(units: i64, scale: u32) -> Decimal {
    Decimal::new(units, scale).normalize()
}
