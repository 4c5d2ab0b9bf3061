pub mod error;
mod remote;
mod r#trait;

pub use error::WalletGatewayError;
pub use r#trait::*;
pub use remote::*;
