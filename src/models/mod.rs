//! Data models module
//!
//! Defines request and response data structures for the LLM, wallet and routing APIs

pub mod chat;
pub mod routing;
pub mod wallet;

pub use chat::{
    ChatHistory, ChatTurn, LlmRequest, Role, RouteRecommendation, ServerResponse, SmartChatReply,
};
pub use routing::{Feature, FeatureCollection, Geometry, LonLat, PlannedRoute};
pub use wallet::{
    AddMoneyReceipt, AddMoneyRequest, Booking, FareQuote, Payment, QuickAddOption,
    RideBookingReceipt, RideBookingRequest, WalletBalance,
};
