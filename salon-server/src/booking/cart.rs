//! Cart booking
//!
//! A cart holds one entry per salon visit. Every entry is validated, priced
//! and inserted on one write transaction: either all bookings land or none.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::models::{
    BookingDetail, BookingType, CartBookingRequest, CartEntry, Offer, ProviderKind,
    ServiceStatus,
};
use sqlx::{SqliteConnection, SqlitePool};

use super::pricing::{self, AddonCharge, ServiceCharge};
use super::slot::{self, Slot};
use super::BookingError;
use crate::db::repository::booking::{self as booking_repo, NewAddonLine, NewBooking, NewServiceLine};
use crate::db::repository::{RepoError, addon, offer, salon, service_item, specialist};

/// Most units of one add-on in a single booking
const MAX_ADDON_QUANTITY: i64 = 20;

/// Slot already claimed by an earlier entry of the same cart
struct Claimed {
    salon_id: i64,
    date: NaiveDate,
    specialist_id: Option<i64>,
    slot: Slot,
}

impl Claimed {
    fn collides(&self, salon_id: i64, date: NaiveDate, specialist_id: Option<i64>, slot: &Slot) -> bool {
        if self.salon_id != salon_id || self.date != date || !self.slot.overlaps(slot) {
            return false;
        }
        // Two named specialists work in parallel
        !matches!((self.specialist_id, specialist_id), (Some(a), Some(b)) if a != b)
    }
}

/// Book every entry of a cart for `customer_id`
///
/// `today` bounds the earliest bookable date; `now` decides offer validity.
pub async fn book_cart(
    pool: &SqlitePool,
    customer_id: i64,
    req: &CartBookingRequest,
    today: NaiveDate,
    now: i64,
) -> Result<Vec<BookingDetail>, BookingError> {
    if req.salons.is_empty() {
        return Err(BookingError::CartEmpty("Cart has no salons".into()));
    }
    let location = match req.booking_type {
        BookingType::HomeService => match &req.service_location {
            Some(loc) if !loc.address.trim().is_empty() => Some(loc),
            _ => return Err(BookingError::ServiceLocationRequired),
        },
        BookingType::InSalon => None,
    };

    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    booking_repo::lock_for_write(&mut tx).await?;

    let offer = match req.offer_code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => Some(offer::find_by_code(&mut *tx, code).await?.ok_or_else(|| {
            BookingError::OfferNotApplicable(format!("Offer code {code} is not valid"))
        })?),
        None => None,
    };

    let mut claimed: Vec<Claimed> = Vec::with_capacity(req.salons.len());
    let mut details = Vec::with_capacity(req.salons.len());

    for entry in &req.salons {
        let detail = book_entry(
            &mut tx,
            customer_id,
            req,
            entry,
            offer.as_ref(),
            location.map(|l| (l.address.trim().to_string(), l.latitude, l.longitude)),
            &mut claimed,
            today,
            now,
        )
        .await?;
        details.push(detail);
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(customer_id, bookings = details.len(), "Cart booked");
    Ok(details)
}

#[allow(clippy::too_many_arguments)]
async fn book_entry(
    conn: &mut SqliteConnection,
    customer_id: i64,
    req: &CartBookingRequest,
    entry: &CartEntry,
    offer: Option<&Offer>,
    location: Option<(String, Option<f64>, Option<f64>)>,
    claimed: &mut Vec<Claimed>,
    today: NaiveDate,
    now: i64,
) -> Result<BookingDetail, BookingError> {
    if entry.services.is_empty() {
        return Err(BookingError::CartEmpty(format!(
            "No services selected for salon {}",
            entry.salon_id
        )));
    }

    let salon = salon::find_by_id(&mut *conn, entry.salon_id)
        .await?
        .ok_or(BookingError::SalonNotFound(entry.salon_id))?;
    if !salon.verified_by_admin {
        return Err(BookingError::SalonNotVerified(salon.id));
    }
    if req.booking_type == BookingType::HomeService && !salon.offers_home_service {
        return Err(BookingError::HomeServiceUnavailable(salon.id));
    }

    // Services: repeated ids become quantities
    let mut service_qty: BTreeMap<i64, i64> = BTreeMap::new();
    for id in &entry.services {
        *service_qty.entry(*id).or_default() += 1;
    }
    let ids: Vec<i64> = service_qty.keys().copied().collect();
    let items = service_item::find_many_owned(conn, ProviderKind::Salon, salon.id, &ids).await?;
    if items.len() != ids.len() || items.iter().any(|i| i.status != ServiceStatus::Active) {
        return Err(BookingError::InvalidServiceSelection);
    }

    let mut addon_qty: BTreeMap<i64, i64> = BTreeMap::new();
    for sel in &entry.addons {
        if !(1..=MAX_ADDON_QUANTITY).contains(&sel.quantity) {
            return Err(BookingError::InvalidAddonSelection);
        }
        let qty = addon_qty.entry(sel.addon_id).or_default();
        *qty += sel.quantity;
        if *qty > MAX_ADDON_QUANTITY {
            return Err(BookingError::InvalidAddonSelection);
        }
    }
    let addon_ids: Vec<i64> = addon_qty.keys().copied().collect();
    let addons = addon::find_many_owned(conn, ProviderKind::Salon, salon.id, &addon_ids).await?;
    if addons.len() != addon_ids.len() {
        return Err(BookingError::InvalidAddonSelection);
    }

    if let Some(specialist_id) = entry.specialist_id {
        specialist::find_owned(&mut *conn, salon.id, specialist_id)
            .await?
            .ok_or(BookingError::InvalidSpecialist)?;
    }

    // Slot
    let date = slot::booking_date(&entry.booking_date_time, today)?;
    let start = slot::parse_time(&entry.booking_date_time.time)?;
    let service_lines: Vec<NewServiceLine> = items
        .iter()
        .map(|item| NewServiceLine {
            service_item_id: item.id,
            name: item.name.clone(),
            quantity: service_qty.get(&item.id).copied().unwrap_or(1),
            unit_price: item.price,
            discount_percent: item.discount_percent,
            duration_mins: item.duration_mins,
        })
        .collect();
    let addon_lines: Vec<NewAddonLine> = addons
        .iter()
        .map(|a| NewAddonLine {
            addon_id: a.id,
            name: a.name.clone(),
            quantity: addon_qty.get(&a.id).copied().unwrap_or(1),
            unit_price: a.price,
        })
        .collect();

    let duration: i64 = service_lines
        .iter()
        .map(|l| l.duration_mins * l.quantity)
        .sum::<i64>()
        + addons
            .iter()
            .map(|a| a.duration_mins * addon_qty.get(&a.id).copied().unwrap_or(1))
            .sum::<i64>();
    let duration = u32::try_from(duration)
        .map_err(|_| BookingError::InvalidTime(format!("duration {duration} minutes")))?;
    let slot = Slot::starting_at(start, duration)?;

    // Conflicts: first within the cart, then against stored bookings
    if claimed
        .iter()
        .any(|c| c.collides(salon.id, date, entry.specialist_id, &slot))
    {
        return Err(BookingError::OverlapInCart);
    }
    let date_label = date.format("%Y-%m-%d").to_string();
    let (start_label, end_label) = (slot.start_label(), slot.end_label());
    if booking_repo::has_conflict(
        conn,
        ProviderKind::Salon,
        salon.id,
        entry.specialist_id,
        &date_label,
        &start_label,
        &end_label,
    )
    .await?
    {
        return Err(BookingError::SlotUnavailable);
    }

    // Price
    let service_charges: Vec<ServiceCharge> = service_lines
        .iter()
        .map(|l| ServiceCharge {
            unit_price: l.unit_price,
            discount_percent: l.discount_percent,
            quantity: l.quantity,
        })
        .collect();
    let addon_charges: Vec<AddonCharge> = addon_lines
        .iter()
        .map(|l| AddonCharge {
            unit_price: l.unit_price,
            quantity: l.quantity,
        })
        .collect();
    let quote = pricing::quote(&service_charges, &addon_charges, offer, now)?;

    let (service_address, service_latitude, service_longitude) = match location {
        Some((address, lat, lon)) => (Some(address), lat, lon),
        None => (None, None, None),
    };
    let new_booking = NewBooking {
        customer_id,
        provider_type: ProviderKind::Salon,
        provider_id: salon.id,
        specialist_id: entry.specialist_id,
        booking_date: date_label,
        start_time: start_label,
        end_time: end_label,
        duration_mins: i64::from(duration),
        booking_type: req.booking_type,
        service_address,
        service_latitude,
        service_longitude,
        subtotal_amount: pricing::to_f64(quote.subtotal),
        discount_amount: pricing::to_f64(quote.discount),
        total_amount: pricing::to_f64(quote.total),
        offer_id: offer.map(|o| o.id),
        payment_method: req.payment_method.unwrap_or_default(),
        notes: req.notes.clone(),
    };
    let (booking, services, addons) =
        booking_repo::insert(conn, &new_booking, &service_lines, &addon_lines).await?;

    claimed.push(Claimed {
        salon_id: salon.id,
        date,
        specialist_id: entry.specialist_id,
        slot,
    });

    Ok(BookingDetail {
        booking,
        provider_name: Some(salon.shop_name),
        customer_name: None,
        customer_phone: None,
        services,
        addons,
    })
}
