use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use crate::domain::catalog::{
    visible_specification, BrandFit, Category, CategoryDraft, OilSpec, Product, ProductDraft,
    ProductKind, ProductVariant, SpecRow,
};
use crate::domain::errors::DomainError;
use crate::domain::validation::FieldError;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    /// `light_motor` or `commercial_vehicles`
    pub kind: String,
    pub vendor_code: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Decimal price as a string, e.g. "1500.00"
    pub price: String,
    pub available: bool,
    pub product_group: String,
    pub composition: String,
    pub viscosity: String,
    pub volume: String,
    pub classification: String,
    pub manufacturer_approval: String,
    pub under_a_specific_brand: bool,
    pub brand: Option<String>,
    pub year_of_issue: Option<NaiveDate>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        let kind = p.variant.kind().to_string();
        let fit = match p.variant {
            ProductVariant::LightMotor(fit) => fit,
            ProductVariant::CommercialVehicles => BrandFit::default(),
        };
        Self {
            id: p.id,
            category_id: p.category_id,
            kind,
            vendor_code: p.vendor_code,
            title: p.title,
            slug: p.slug,
            description: p.description,
            price: p.price.to_string(),
            available: p.available,
            product_group: p.spec.product_group,
            composition: p.spec.composition,
            viscosity: p.spec.viscosity,
            volume: p.spec.volume,
            classification: p.spec.classification,
            manufacturer_approval: p.spec.manufacturer_approval,
            under_a_specific_brand: fit.under_a_specific_brand,
            brand: fit.brand,
            year_of_issue: fit.year_of_issue,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpecRowResponse {
    pub label: String,
    pub value: String,
}

impl From<SpecRow> for SpecRowResponse {
    fn from(row: SpecRow) -> Self {
        Self {
            label: row.label.to_string(),
            value: row.value,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub specification: Vec<SpecRowResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryProductsResponse {
    pub category: CategoryResponse,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: Uuid,
    /// `light_motor` or `commercial_vehicles`
    pub kind: String,
    pub vendor_code: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "1500.00"
    pub price: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub product_group: String,
    #[serde(default)]
    pub composition: String,
    pub viscosity: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub manufacturer_approval: String,
    #[serde(default)]
    pub under_a_specific_brand: bool,
    pub brand: Option<String>,
    pub year_of_issue: Option<NaiveDate>,
}

fn default_available() -> bool {
    true
}

impl TryFrom<CreateProductRequest> for ProductDraft {
    type Error = DomainError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        let kind = req.kind.parse::<ProductKind>()?;
        let price = BigDecimal::from_str(req.price.trim()).map_err(|_| {
            DomainError::Validation(vec![FieldError::new(
                "price",
                format!("'{}' is not a decimal number", req.price),
            )])
        })?;
        Ok(ProductDraft {
            category_id: req.category_id,
            kind,
            vendor_code: req.vendor_code,
            title: req.title,
            slug: req.slug,
            description: req.description,
            price,
            available: req.available,
            spec: OilSpec {
                product_group: req.product_group,
                composition: req.composition,
                viscosity: req.viscosity,
                volume: req.volume,
                classification: req.classification,
                manufacturer_approval: req.manufacturer_approval,
            },
            brand_fit: BrandFit {
                under_a_specific_brand: req.under_a_specific_brand,
                brand: req.brand,
                year_of_issue: req.year_of_issue,
            },
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories by name", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = blocking(move || state.catalog.categories()).await?;
    let body: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 409, description = "Slug already taken"),
        (status = 422, description = "Invalid fields"),
    ),
    tag = "catalog"
)]
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let category = blocking(move || {
        state.catalog.create_category(CategoryDraft {
            name: body.name,
            slug: body.slug,
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

#[utoipa::path(
    get,
    path = "/categories/{slug}/products",
    params(
        ("slug" = String, Path, description = "Category slug"),
    ),
    responses(
        (status = 200, description = "Category with its products", body = CategoryProductsResponse),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn category_products(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let (category, products) = blocking(move || state.catalog.category_products(&slug)).await?;
    Ok(HttpResponse::Ok().json(CategoryProductsResponse {
        category: category.into(),
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// GET /products/latest
///
/// The newest products of each kind, as shown on the homepage.
#[utoipa::path(
    get,
    path = "/products/latest",
    responses(
        (status = 200, description = "Latest products", body = Vec<ProductResponse>),
    ),
    tag = "catalog"
)]
pub async fn latest_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = blocking(move || state.catalog.latest_products()).await?;
    let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    get,
    path = "/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug"),
    ),
    responses(
        (status = 200, description = "Product with its specification table", body = ProductDetailResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let (product, rows) = blocking(move || state.catalog.product_detail(&slug)).await?;
    Ok(HttpResponse::Ok().json(ProductDetailResponse {
        product: product.into(),
        specification: rows.into_iter().map(Into::into).collect(),
    }))
}

/// POST /products
///
/// Brand fields are cleared unless the oil is made for a specific car brand.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Unknown product kind"),
        (status = 409, description = "Vendor code or slug already taken"),
        (status = 422, description = "Invalid fields"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = ProductDraft::try_from(body.into_inner())?;
    let product = blocking(move || state.catalog.create_product(draft)).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}
