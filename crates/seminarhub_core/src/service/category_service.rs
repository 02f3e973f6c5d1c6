//! Category catalog use-case service.

use crate::model::category::{Category, CategoryId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoResult;

/// Read-only category catalog facade.
pub struct CategoryService<C: CategoryRepository> {
    repo: C,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    /// Lists `(id, name)` options for seminar forms.
    pub fn list(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    pub fn get(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.repo.get_category(id)
    }

    /// Resolves a category display name.
    pub fn name_of(&self, id: CategoryId) -> RepoResult<Option<String>> {
        Ok(self.repo.get_category(id)?.map(|category| category.name))
    }
}
