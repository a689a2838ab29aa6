use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{Category, CategoryDraft, Product, ProductKind};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{categories, products};

use super::models::{CategoryRow, NewProductRow, ProductRow};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, DomainError> {
    rows.into_iter().map(Product::try_from).collect()
}

impl CatalogRepository for DieselCatalogRepository {
    fn categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = categories::table
            .select(CategoryRow::as_select())
            .order(categories::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = categories::table
            .filter(categories::slug.eq(slug))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Category::from))
    }

    fn insert_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(categories::table)
            .values(&CategoryRow {
                id: Uuid::new_v4(),
                name: draft.name,
                slug: draft.slug,
            })
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn products_in_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = products::table
            .filter(products::category_id.eq(category_id))
            .select(ProductRow::as_select())
            .order(products::title.asc())
            .load(&mut conn)?;
        into_products(rows)
    }

    fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        products::table
            .filter(products::slug.eq(slug))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Product::try_from)
            .transpose()
    }

    fn latest_products(&self, per_kind: i64) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let mut latest = Vec::new();
        for kind in ProductKind::ALL {
            let rows = products::table
                .filter(products::kind.eq(kind.as_str()))
                .select(ProductRow::as_select())
                .order((products::created_at.desc(), products::id.desc()))
                .limit(per_kind)
                .load(&mut conn)?;
            latest.extend(into_products(rows)?);
        }
        Ok(latest)
    }

    fn insert_product(&self, product: Product) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(products::table)
            .values(&NewProductRow::from(product))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;
        Product::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::catalog::fixtures::draft;
    use crate::domain::catalog::{BrandFit, ProductVariant};
    use crate::infrastructure::test_db::setup_db;

    fn category(repo: &DieselCatalogRepository, slug: &str) -> Category {
        repo.insert_category(CategoryDraft {
            name: slug.replace('_', " "),
            slug: slug.to_string(),
        })
        .expect("insert category")
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn insert_and_find_product_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let light = category(&repo, "light_motors");

        let mut d = draft(ProductKind::LightMotor, "bmw-longlife", "A0001", "2100.00");
        d.category_id = light.id;
        d.brand_fit = BrandFit {
            under_a_specific_brand: true,
            brand: Some("BMW".to_string()),
            year_of_issue: NaiveDate::from_ymd_opt(2018, 1, 1),
        };
        let product = d.validate().expect("valid draft");
        repo.insert_product(product.clone()).expect("insert");

        let found = repo
            .find_product_by_slug("bmw-longlife")
            .expect("find")
            .expect("product should exist");
        assert_eq!(found, product);
        assert!(matches!(found.variant, ProductVariant::LightMotor(_)));
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn vendor_code_is_unique_across_kinds() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let light = category(&repo, "light_motors");
        let heavy = category(&repo, "commercial_vehicles");

        let mut a = draft(ProductKind::LightMotor, "castrol-edge", "X0001", "1500.00");
        a.category_id = light.id;
        repo.insert_product(a.validate().expect("valid")).expect("first");

        let mut b = draft(ProductKind::CommercialVehicles, "shell-rimula", "X0001", "900.00");
        b.category_id = heavy.id;
        let err = repo
            .insert_product(b.validate().expect("valid"))
            .expect_err("duplicate vendor code");
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    #[ignore = "requires docker for the postgres testcontainer"]
    async fn products_in_category_are_sorted_by_title() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let light = category(&repo, "light_motors");

        for (slug, code) in [("zic-top", "Z0001"), ("addinol-super", "Z0002")] {
            let mut d = draft(ProductKind::LightMotor, slug, code, "800.00");
            d.category_id = light.id;
            repo.insert_product(d.validate().expect("valid")).expect("insert");
        }

        let products = repo.products_in_category(light.id).expect("list");
        let slugs: Vec<_> = products.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["addinol-super", "zic-top"]);
        assert_eq!(repo.categories().expect("categories").len(), 1);
    }
}
