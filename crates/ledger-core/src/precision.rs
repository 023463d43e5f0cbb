//! Monetary precision hints

/// Decimal places requested for unit prices (`unitdp` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitDp {
    Two,
    Four,
}

impl UnitDp {
    pub fn as_param(&self) -> &'static str {
        match self {
            UnitDp::Two => "2",
            UnitDp::Four => "4",
        }
    }
}

/// Whether `price` carries information past the second decimal place.
///
/// The price is rendered to 4 and to 2 decimals as text and both strings are
/// parsed back, the same way upstream displays amounts. Comparing the
/// re-parsed values keeps binary float noise (12.30 stored as 12.2999…)
/// from flagging ordinary two-decimal prices. Upstream rounds the 4th decimal
/// up when the 5th is >= 5, so 12.345 still counts as high precision.
pub fn is_high_precision(price: f64) -> bool {
    if !price.is_finite() {
        return false;
    }

    let four = format!("{:.4}", price).parse::<f64>();
    let two = format!("{:.2}", price).parse::<f64>();

    match (four, two) {
        (Ok(four), Ok(two)) => four != two,
        _ => false,
    }
}

/// Precision to request when writing a record with this price.
pub fn unit_dp_for(price: f64) -> Option<UnitDp> {
    is_high_precision(price).then_some(UnitDp::Four)
}
