use uuid::Uuid;

use crate::domain::catalogue::{Collection, Colour, Flower, ListResult, Packing, ProductFilter};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogueRepository;

pub struct CatalogueService<R> {
    repo: R,
}

impl<R: CatalogueRepository> CatalogueService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_flowers(
        &self,
        filter: &ProductFilter,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<Flower>, DomainError> {
        self.repo.list_flowers(filter, page, limit)
    }

    pub fn get_flower(&self, id: Uuid) -> Result<Option<Flower>, DomainError> {
        self.repo.find_flower(id)
    }

    pub fn list_collections(
        &self,
        filter: &ProductFilter,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<Collection>, DomainError> {
        self.repo.list_collections(filter, page, limit)
    }

    pub fn list_colours(&self) -> Result<Vec<Colour>, DomainError> {
        self.repo.list_colours()
    }

    pub fn list_packings(&self) -> Result<Vec<Packing>, DomainError> {
        self.repo.list_packings()
    }
}
