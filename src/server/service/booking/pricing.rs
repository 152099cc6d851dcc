//! Booking price computation.

use crate::{model::booking::PricingDto, server::util::money::round2};

/// Goods and services tax applied to the subtotal
pub const GST_RATE: f64 = 0.18;

/// Inputs that determine the price of a booking.
#[derive(Debug, Clone, Copy)]
pub struct PriceInputs {
    pub price_per_bed: f64,
    pub beds: i32,
    pub months: i32,
    pub security_deposit: f64,
    /// Monthly mess charge, `None` when the student did not ask for mess
    pub mess_per_month: Option<f64>,
    pub discount: f64,
}

/// Computes pricing for a booking, rounding each amount to two decimals.
pub fn compute(inputs: PriceInputs) -> PricingDto {
    let months = f64::from(inputs.months);

    let total_bed_cost = round2(inputs.price_per_bed * f64::from(inputs.beds) * months);
    let mess_charges = round2(inputs.mess_per_month.unwrap_or(0.0) * months);
    let subtotal = round2(total_bed_cost + mess_charges + inputs.security_deposit);
    let gst = round2(subtotal * GST_RATE);
    let final_amount = round2(subtotal + gst - inputs.discount);

    PricingDto {
        price_per_bed: inputs.price_per_bed,
        total_bed_cost,
        mess_charges,
        security_deposit: inputs.security_deposit,
        total_amount: subtotal,
        gst,
        final_amount,
        discount: inputs.discount,
        advance_amount: 0.0,
    }
}
