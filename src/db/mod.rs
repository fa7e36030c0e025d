pub mod connection;

pub use connection::{Connector, DbCredentials, MySqlConnector, StoreConnection};
