pub mod account;
pub mod auth;
pub mod cart;
pub mod catalogue;
pub mod dto;
pub mod orders;
