pub mod employee_credential;

pub use employee_credential::*;
