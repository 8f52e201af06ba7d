//! Profile gateway adapters.

mod http_gateway;
mod mock;

pub use http_gateway::{HttpGatewayConfig, HttpProfileGateway};
pub use mock::{MockProfileGateway, RecordedCall};
