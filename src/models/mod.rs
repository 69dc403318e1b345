// Data models and DTOs

pub mod account;

pub use account::{Account, CreateAccountRequest, NewAccount, UpdateAccountRequest};
