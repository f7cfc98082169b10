pub mod cart_service;
pub mod catalogue_service;
pub mod order_service;
