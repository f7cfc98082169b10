#[cfg(test)]
pub(crate) mod in_memory;
pub mod models;
pub mod shop_repo;

pub use shop_repo::DieselShopRepository;
