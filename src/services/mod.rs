pub mod login_gate;
pub mod password_digest;

pub use login_gate::{GateState, LoginGate, Session};
pub use password_digest::DigestScheme;
