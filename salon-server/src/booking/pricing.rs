//! Money calculation using rust_decimal
//!
//! Amounts are stored as `f64` and computed as `Decimal`, rounded to two
//! places half-up.

use rust_decimal::prelude::*;
use shared::models::{DiscountType, Offer};

use super::BookingError;

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to cents, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// One booked service: snapshot price, discount and quantity
#[derive(Debug, Clone, Copy)]
pub struct ServiceCharge {
    pub unit_price: f64,
    pub discount_percent: f64,
    pub quantity: i64,
}

/// One booked add-on
#[derive(Debug, Clone, Copy)]
pub struct AddonCharge {
    pub unit_price: f64,
    pub quantity: i64,
}

/// `unit_price × (1 − discount/100) × quantity`
pub fn service_line_total(charge: &ServiceCharge) -> Decimal {
    let unit = to_decimal(charge.unit_price);
    let discount = to_decimal(charge.discount_percent) / Decimal::ONE_HUNDRED;
    unit * (Decimal::ONE - discount) * Decimal::from(charge.quantity)
}

pub fn addon_line_total(charge: &AddonCharge) -> Decimal {
    to_decimal(charge.unit_price) * Decimal::from(charge.quantity)
}

/// Priced booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Discount an offer grants on `subtotal` at `now`
///
/// # Errors
///
/// `OfferNotApplicable` when the offer is inactive, expired, or the
/// subtotal is below its minimum.
pub fn offer_discount(offer: &Offer, subtotal: Decimal, now: i64) -> Result<Decimal, BookingError> {
    if !offer.is_active || offer.valid_until <= now {
        return Err(BookingError::OfferNotApplicable(format!(
            "Offer {} is not active",
            offer.code
        )));
    }
    if subtotal < to_decimal(offer.min_booking_amount) {
        return Err(BookingError::OfferNotApplicable(format!(
            "Offer {} requires a minimum booking of {}",
            offer.code, offer.min_booking_amount
        )));
    }

    let value = to_decimal(offer.discount_value);
    let discount = match offer.discount_type {
        DiscountType::Percentage => subtotal * value / Decimal::ONE_HUNDRED,
        DiscountType::Flat => value.min(subtotal),
    };
    Ok(round_money(discount.max(Decimal::ZERO)))
}

/// Price services and add-ons, then apply an optional offer
pub fn quote(
    services: &[ServiceCharge],
    addons: &[AddonCharge],
    offer: Option<&Offer>,
    now: i64,
) -> Result<Quote, BookingError> {
    let subtotal: Decimal = services.iter().map(service_line_total).sum::<Decimal>()
        + addons.iter().map(addon_line_total).sum::<Decimal>();
    let subtotal = round_money(subtotal);

    let discount = match offer {
        Some(offer) => offer_discount(offer, subtotal, now)?,
        None => Decimal::ZERO,
    };

    Ok(Quote {
        subtotal,
        discount,
        total: round_money(subtotal - discount),
    })
}

/// Commission owed on `amount` at `rate` (0.05 = 5%)
pub fn commission(amount: f64, rate: f64) -> Decimal {
    round_money(to_decimal(amount) * to_decimal(rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(discount_type: DiscountType, value: f64, min: f64) -> Offer {
        Offer {
            id: 1,
            title: "Test".into(),
            description: None,
            discount_type,
            discount_value: value,
            min_booking_amount: min,
            code: "TEST".into(),
            valid_until: 2_000,
            category_id: None,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn svc(price: f64, discount: f64, qty: i64) -> ServiceCharge {
        ServiceCharge {
            unit_price: price,
            discount_percent: discount,
            quantity: qty,
        }
    }

    #[test]
    fn test_lines_aggregate_with_discounts_and_quantity() {
        let q = quote(
            &[svc(500.0, 10.0, 1), svc(200.0, 0.0, 2)],
            &[AddonCharge {
                unit_price: 99.99,
                quantity: 3,
            }],
            None,
            0,
        )
        .unwrap();
        // 450 + 400 + 299.97
        assert_eq!(to_f64(q.subtotal), 1149.97);
        assert_eq!(q.discount, Decimal::ZERO);
        assert_eq!(to_f64(q.total), 1149.97);
    }

    #[test]
    fn test_rounding_half_up() {
        // 33.335 rounds up
        let q = quote(&[svc(66.67, 50.0, 1)], &[], None, 0).unwrap();
        assert_eq!(to_f64(q.subtotal), 33.34);
    }

    #[test]
    fn test_percentage_offer() {
        let q = quote(
            &[svc(1000.0, 0.0, 1)],
            &[],
            Some(&offer(DiscountType::Percentage, 15.0, 0.0)),
            1_000,
        )
        .unwrap();
        assert_eq!(to_f64(q.discount), 150.0);
        assert_eq!(to_f64(q.total), 850.0);
    }

    #[test]
    fn test_flat_offer_is_capped_at_subtotal() {
        let q = quote(
            &[svc(80.0, 0.0, 1)],
            &[],
            Some(&offer(DiscountType::Flat, 100.0, 0.0)),
            1_000,
        )
        .unwrap();
        assert_eq!(to_f64(q.discount), 80.0);
        assert_eq!(q.total, Decimal::ZERO);
    }

    #[test]
    fn test_offer_rejections() {
        let services = [svc(100.0, 0.0, 1)];

        let expired = offer(DiscountType::Flat, 10.0, 0.0);
        assert!(quote(&services, &[], Some(&expired), 2_000).is_err());

        let mut inactive = offer(DiscountType::Flat, 10.0, 0.0);
        inactive.is_active = false;
        assert!(quote(&services, &[], Some(&inactive), 1_000).is_err());

        let minimum = offer(DiscountType::Flat, 10.0, 500.0);
        assert!(matches!(
            quote(&services, &[], Some(&minimum), 1_000),
            Err(BookingError::OfferNotApplicable(_))
        ));
    }

    #[test]
    fn test_commission() {
        assert_eq!(to_f64(commission(999.0, 0.05)), 49.95);
        assert_eq!(to_f64(commission(999.0, 0.0)), 0.0);
    }
}
