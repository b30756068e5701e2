pub mod error;
pub mod request;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;
pub mod wire;

pub use error::{RpcError, RpcResult};
pub use session::{Command, Convergence, Session};
pub use transport::{Connection, Connector, TcpConnector};
