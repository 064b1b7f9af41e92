//! Service layer module
//!
//! Contains the single-flight LLM client, the JSON extractor, and the wallet
//! and routing clients built on a shared HTTP transport

pub mod client;
pub mod extractor;
pub mod routing;
pub mod single_flight;
pub mod transport;
pub mod wallet;

pub use client::LlmClient;
pub use extractor::{extract_structured, extract_structured_json, extract_structured_value};
pub use routing::RouteServiceClient;
pub use single_flight::{FlightGuard, FlightPermit, FlightState};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use wallet::WalletClient;
