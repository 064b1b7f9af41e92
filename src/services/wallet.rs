//! Wallet client
//!
//! Balance, top-ups, history and ride booking over the `/api/wallet` routes.
//! Wallet calls are independent and not single-flight guarded.

use crate::config::Settings;
use crate::models::wallet::*;
use crate::services::transport::{HttpTransport, Transport, TransportResponse};
use crate::utils::error::{ClientResult, ErrorContext};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Top-up method used when the caller does not pick one
pub const DEFAULT_TOP_UP_METHOD: &str = "DEMO";

/// Wallet API client for one user
#[derive(Clone)]
pub struct WalletClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    user_id: u64,
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl WalletClient {
    /// Create a client backed by reqwest
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(settings.api.timeout)?;
        Ok(Self::with_transport(Arc::new(transport), settings))
    }

    /// Create a client over an existing transport
    pub fn with_transport(transport: Arc<dyn Transport>, settings: &Settings) -> Self {
        Self {
            transport,
            base_url: settings.api_base().to_string(),
            user_id: settings.wallet.user_id,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub async fn balance(&self) -> ClientResult<WalletBalance> {
        let url = self.user_url("balance");
        self.get_json::<WalletBalance>(&url)
            .await
            .operation_context("Failed to load wallet balance")
    }

    pub async fn quick_add_options(&self) -> ClientResult<Vec<QuickAddOption>> {
        let url = self.user_url("quick-add");
        self.get_json::<QuickAddResponse>(&url)
            .await
            .map(|r| r.quick_add_options)
            .operation_context("Failed to load quick add options")
    }

    /// Top up the wallet; `method` defaults to [`DEFAULT_TOP_UP_METHOD`]
    pub async fn add_money(&self, amount: f64, method: Option<&str>) -> ClientResult<AddMoneyReceipt> {
        let request = AddMoneyRequest {
            user_id: self.user_id,
            amount,
            method: method.unwrap_or(DEFAULT_TOP_UP_METHOD).to_string(),
        };

        let receipt = self
            .post_json::<_, AddMoneyReceipt>(&self.url("add-money"), &request)
            .await
            .operation_context("Failed to add money to wallet")?;

        info!("₹{:.2} added to wallet, new balance ₹{:.2}", receipt.amount, receipt.new_balance);
        Ok(receipt)
    }

    pub async fn payment_history(&self) -> ClientResult<Vec<Payment>> {
        let url = self.user_url("history");
        self.get_json::<PaymentHistoryResponse>(&url)
            .await
            .map(|r| r.payments)
            .operation_context("Failed to load payment history")
    }

    pub async fn booking_history(&self) -> ClientResult<Vec<Booking>> {
        let url = self.user_url("bookings");
        self.get_json::<BookingHistoryResponse>(&url)
            .await
            .map(|r| r.bookings)
            .operation_context("Failed to load booking history")
    }

    pub async fn calculate_fare(&self, start: &str, end: &str, transport_type: &str) -> ClientResult<FareQuote> {
        let request = FareRequest {
            start,
            end,
            transport_type,
        };
        self.post_json::<_, FareQuote>(&self.url("calculate-fare"), &request)
            .await
            .operation_context("Failed to calculate fare")
    }

    /// Book a ride paid from this user's wallet
    pub async fn book_ride(&self, mut request: RideBookingRequest) -> ClientResult<RideBookingReceipt> {
        request.user_id = self.user_id;

        let receipt = self
            .post_json::<_, RideBookingReceipt>(&self.url("book-ride"), &request)
            .await
            .operation_context("Failed to book ride")?;

        info!("Ride #{} booked, new balance ₹{:.2}", receipt.booking_id, receipt.new_balance);
        Ok(receipt)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/wallet/{}", self.base_url, path)
    }

    fn user_url(&self, path: &str) -> String {
        format!("{}/{}", self.url(path), self.user_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        debug!("GET {}", url);
        let response = self.transport.get(url, &[]).await?;
        Self::decode(response)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> ClientResult<T> {
        debug!("POST {}", url);
        let payload = serde_json::to_value(body)?;
        let response = self
            .transport
            .post_json(url, &payload, &Uuid::new_v4().to_string())
            .await?;
        Self::decode(response)
    }

    fn decode<T: DeserializeOwned>(response: TransportResponse) -> ClientResult<T> {
        let body = response.into_checked_json()?;
        Ok(serde_json::from_value(body)?)
    }
}
