pub mod client;
pub mod envelope;
pub mod history_client;
pub mod subscription_client;

pub use client::{OutboundClient, RemoteError, RemoteResponse};
pub use envelope::unwrap_envelope;
pub use history_client::HistoryClient;
pub use subscription_client::SubscriptionClient;
