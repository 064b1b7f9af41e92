//! Wallet data models
//!
//! Mirrors the JSON returned by the `/api/wallet` routes

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Current wallet balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub user_id: u64,
    pub balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl WalletBalance {
    /// Balance with two decimals, as shown in the balance card
    pub fn display(&self) -> String {
        format!("{:.2}", self.balance)
    }
}

/// Preset top-up amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAddOption {
    pub amount: f64,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuickAddResponse {
    #[serde(default)]
    pub quick_add_options: Vec<QuickAddOption>,
}

/// Top-up request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMoneyRequest {
    pub user_id: u64,
    pub amount: f64,
    pub method: String,
}

/// Successful top-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMoneyReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub amount: f64,
    pub new_balance: f64,
    #[serde(default)]
    pub method: String,
}

/// Wallet transaction, positive amounts are credits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub payment_id: Option<u64>,
    #[serde(default)]
    pub booking_id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub amount: f64,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub payment_date: Option<NaiveDateTime>,
}

impl Payment {
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    pub fn kind_label(&self) -> &'static str {
        if self.is_credit() {
            "Credit"
        } else {
            "Debit"
        }
    }

    /// Signed rupee amount: `+₹500.00` for credits, `₹120.50` for debits
    pub fn display_amount(&self) -> String {
        let sign = if self.is_credit() { "+" } else { "" };
        format!("{}₹{:.2}", sign, self.amount.abs())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PaymentHistoryResponse {
    #[serde(default)]
    pub payments: Vec<Payment>,
}

/// Ride booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub route_id: Option<u64>,
    #[serde(default)]
    pub passenger_name: Option<String>,
    #[serde(default)]
    pub transport_type: Option<String>,
    #[serde(default)]
    pub from_location: Option<String>,
    #[serde(default)]
    pub to_location: Option<String>,
    #[serde(default)]
    pub fare: Option<f64>,
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
    #[serde(default)]
    pub booking_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_time: Option<NaiveDateTime>,
}

fn default_status() -> String {
    "CONFIRMED".to_string()
}

fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

impl Booking {
    /// `"Kochi → Aluva"`, unknown ends shown as `"?"`
    pub fn route_label(&self) -> String {
        format!(
            "{} → {}",
            self.from_location.as_deref().unwrap_or("?"),
            self.to_location.as_deref().unwrap_or("?")
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BookingHistoryResponse {
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FareRequest<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub transport_type: &'a str,
}

/// Fare estimate for a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub start: String,
    pub end: String,
    pub distance: f64,
    pub transport_type: String,
    pub fare: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Ride booking paid from the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideBookingRequest {
    pub user_id: u64,
    pub passenger_name: String,
    pub from_location: String,
    pub to_location: String,
    pub transport_type: String,
    /// `YYYY-MM-DD`
    pub travel_date: String,
    /// `HH:MM`
    pub travel_time: String,
}

/// Confirmed ride booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideBookingReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub booking_id: u64,
    pub fare: f64,
    pub new_balance: f64,
    #[serde(default)]
    pub booking_date: Option<String>,
}
