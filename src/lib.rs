pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod period;
pub mod request;
pub mod transport;

pub use client::ChartClient;
pub use config::{ChartOptions, ProviderConfig, ServerConfig};
pub use error::{ChartError, Result};
pub use models::{ChartEntry, ChartResult, DateWindow, PeriodKind};
pub use period::{Clock, FixedClock, SystemClock};
pub use transport::{HttpTransport, Transport};
