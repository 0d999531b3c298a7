//! Bill arithmetic shared by the cart, the POS ticket and the order ledger.

use serde::{Deserialize, Serialize};

/// GST applied to every bill.
pub const DEFAULT_GST_RATE: f64 = 0.05;

/// Rounds a rupee amount to paise.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Subtotal, GST and grand total of a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pricing {
    pub gst_rate: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            gst_rate: DEFAULT_GST_RATE,
        }
    }
}

impl Pricing {
    /// Bills `(unit_price, quantity)` lines. Each amount is rounded separately,
    /// so `total == subtotal + tax` holds to the paisa.
    pub fn bill<I>(&self, lines: I) -> Bill
    where
        I: IntoIterator<Item = (f64, u32)>,
    {
        let subtotal = round_money(
            lines
                .into_iter()
                .map(|(unit_price, quantity)| unit_price * f64::from(quantity))
                .sum(),
        );
        let tax = round_money(subtotal * self.gst_rate);
        Bill {
            subtotal,
            tax,
            total: round_money(subtotal + tax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_applies_five_percent_gst() {
        let bill = Pricing::default().bill([(180.0, 2), (250.0, 1)]);
        assert_eq!(bill.subtotal, 610.0);
        assert_eq!(bill.tax, 30.5);
        assert_eq!(bill.total, 640.5);
    }

    #[test]
    fn test_bill_rounds_to_paise() {
        let bill = Pricing::default().bill([(99.99, 3)]);
        assert_eq!(bill.subtotal, 299.97);
        // 14.9985 rounds up
        assert_eq!(bill.tax, 15.0);
        assert_eq!(bill.total, 314.97);
    }

    #[test]
    fn test_empty_bill_is_zero() {
        let bill = Pricing::default().bill(std::iter::empty());
        assert_eq!(bill, Bill::default());
    }

    #[test]
    fn test_custom_rate() {
        let pricing = Pricing { gst_rate: 0.18 };
        let bill = pricing.bill([(100.0, 1)]);
        assert_eq!(bill.tax, 18.0);
        assert_eq!(bill.total, 118.0);
    }
}
