pub mod account;
pub mod cart;
pub mod catalogue;
pub mod checkout;
pub mod errors;
pub mod order;
pub mod ports;
pub mod pricing;
