use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartLine};
use crate::domain::catalog::{BrandFit, Category, OilSpec, Product, ProductKind, ProductVariant};
use crate::domain::content::{Review, Slide};
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{BuyingType, Order, OrderStatus, ShippingDetails};
use crate::schema::{
    cart_lines, carts, categories, customer_orders, customers, orders, products, reviews, slides,
};

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub category_id: Uuid,
    pub kind: String,
    pub title: String,
    pub vendor_code: String,
    pub slug: String,
    pub description: String,
    pub price: BigDecimal,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let variant = match row.kind.parse::<ProductKind>() {
            Ok(ProductKind::LightMotor) => ProductVariant::LightMotor(BrandFit {
                under_a_specific_brand: row.under_a_specific_brand,
                brand: row.brand,
                year_of_issue: row.year_of_issue,
            }),
            Ok(ProductKind::CommercialVehicles) => ProductVariant::CommercialVehicles,
            Err(e) => return Err(DomainError::Internal(e.to_string())),
        };
        Ok(Product {
            id: row.id,
            category_id: row.category_id,
            vendor_code: row.vendor_code,
            title: row.title,
            slug: row.slug,
            description: row.description,
            price: row.price,
            available: row.available,
            spec: OilSpec {
                product_group: row.product_group,
                composition: row.composition,
                viscosity: row.viscosity,
                volume: row.volume,
                classification: row.classification,
                manufacturer_approval: row.manufacturer_approval,
            },
            variant,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub category_id: Uuid,
    pub kind: String,
    pub title: String,
    pub vendor_code: String,
    pub slug: String,
    pub description: String,
    pub price: BigDecimal,
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

impl From<Product> for NewProductRow {
    fn from(p: Product) -> Self {
        let kind = p.variant.kind().as_str().to_string();
        let fit = match p.variant {
            ProductVariant::LightMotor(fit) => fit.normalized(),
            ProductVariant::CommercialVehicles => BrandFit::default(),
        };
        NewProductRow {
            id: p.id,
            category_id: p.category_id,
            kind,
            title: p.title,
            vendor_code: p.vendor_code,
            slug: p.slug,
            description: p.description,
            price: p.price,
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

// ── Customers ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: Uuid,
    pub identity: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            identity: row.identity,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow<'a> {
    pub id: Uuid,
    pub identity: &'a str,
}

// ── Carts ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartRow {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub total_products: i32,
    pub total_price: BigDecimal,
    pub in_order: bool,
    pub for_anonymous_user: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartRow {
    pub fn into_cart(self, lines: Vec<CartLineRow>) -> Cart {
        Cart {
            id: self.id,
            owner_id: self.owner_id,
            lines: lines.into_iter().map(CartLine::from).collect(),
            total_products: self.total_products,
            total_price: self.total_price,
            in_order: self.in_order,
            for_anonymous_user: self.for_anonymous_user,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = carts)]
pub struct NewCartRow {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub total_products: i32,
    pub total_price: BigDecimal,
    pub in_order: bool,
    pub for_anonymous_user: bool,
}

impl From<&Cart> for NewCartRow {
    fn from(cart: &Cart) -> Self {
        NewCartRow {
            id: cart.id,
            owner_id: cart.owner_id,
            total_products: cart.total_products,
            total_price: cart.total_price.clone(),
            in_order: cart.in_order,
            for_anonymous_user: cart.for_anonymous_user,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = cart_lines)]
#[diesel(belongs_to(CartRow, foreign_key = cart_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartLineRow {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            id: row.id,
            cart_id: row.cart_id,
            customer_id: row.customer_id,
            product_id: row.product_id,
            quantity: row.quantity,
            total_price: row.total_price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_lines)]
pub struct NewCartLineRow {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total_price: BigDecimal,
}

impl From<&CartLine> for NewCartLineRow {
    fn from(line: &CartLine) -> Self {
        NewCartLineRow {
            id: line.id,
            cart_id: line.cart_id,
            customer_id: line.customer_id,
            product_id: line.product_id,
            quantity: line.quantity,
            total_price: line.total_price.clone(),
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cart_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub status: String,
    pub buying_type: String,
    pub comments: Option<String>,
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let buying_type = row
            .buying_type
            .parse::<BuyingType>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(Order {
            id: row.id,
            customer_id: row.customer_id,
            cart_id: row.cart_id,
            details: ShippingDetails {
                first_name: row.first_name,
                last_name: row.last_name,
                phone: row.phone,
                address: row.address,
                buying_type,
                order_date: row.order_date,
                comments: row.comments,
            },
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cart_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub status: String,
    pub buying_type: String,
    pub comments: Option<String>,
    pub order_date: NaiveDate,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customer_orders)]
pub struct CustomerOrderRow {
    pub customer_id: Uuid,
    pub order_id: Uuid,
}

// ── Content ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = slides)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SlideRow {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl From<SlideRow> for Slide {
    fn from(row: SlideRow) -> Self {
        Slide {
            id: row.id,
            name: row.name,
            title: row.title,
            description: row.description,
            image: row.image,
            created_at: row.created_at,
        }
    }
}
