use crate::domain::catalog::{
    visible_specification, Category, CategoryDraft, Product, ProductDraft, SpecRow,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;

/// How many products of each kind the homepage shows.
pub const LATEST_PER_KIND: i64 = 5;

pub struct CatalogService<C> {
    repo: C,
}

impl<C: CatalogRepository> CatalogService<C> {
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    pub fn categories(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.categories()
    }

    pub fn create_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        let category = self.repo.insert_category(draft.validate()?)?;
        log::info!("Created category {} ({})", category.slug, category.id);
        Ok(category)
    }

    pub fn category_products(&self, slug: &str) -> Result<(Category, Vec<Product>), DomainError> {
        let category = self
            .repo
            .find_category_by_slug(slug)?
            .ok_or_else(|| DomainError::NotFound(format!("category '{slug}'")))?;
        let products = self.repo.products_in_category(category.id)?;
        Ok((category, products))
    }

    pub fn product_detail(&self, slug: &str) -> Result<(Product, Vec<SpecRow>), DomainError> {
        let product = self
            .repo
            .find_product_by_slug(slug)?
            .ok_or_else(|| DomainError::NotFound(format!("product '{slug}'")))?;
        let spec = visible_specification(&product);
        Ok((product, spec))
    }

    pub fn latest_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.latest_products(LATEST_PER_KIND)
    }

    pub fn create_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        let product = self.repo.insert_product(draft.validate()?)?;
        log::info!(
            "Created {} product {} ({})",
            product.variant.kind(),
            product.slug,
            product.vendor_code
        );
        Ok(product)
    }
}
