use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use super::errors::DomainError;
use super::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

impl CategoryDraft {
    pub fn validate(self) -> Result<CategoryDraft, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name, 200);
        let slug = errors.slug("slug", &self.slug, 200);
        errors.finish()?;
        Ok(CategoryDraft { name, slug })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    LightMotor,
    CommercialVehicles,
}

impl ProductKind {
    pub const ALL: [ProductKind; 2] = [ProductKind::LightMotor, ProductKind::CommercialVehicles];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductKind::LightMotor => "light_motor",
            ProductKind::CommercialVehicles => "commercial_vehicles",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light_motor" => Ok(ProductKind::LightMotor),
            "commercial_vehicles" => Ok(ProductKind::CommercialVehicles),
            other => Err(DomainError::InvalidInput(format!(
                "unknown product kind '{other}'"
            ))),
        }
    }
}

/// Technical characteristics shared by both oil variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OilSpec {
    pub product_group: String,
    pub composition: String,
    pub viscosity: String,
    pub volume: String,
    pub classification: String,
    pub manufacturer_approval: String,
}

/// Car-brand targeting of a light motor oil.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandFit {
    pub under_a_specific_brand: bool,
    pub brand: Option<String>,
    pub year_of_issue: Option<NaiveDate>,
}

impl BrandFit {
    /// Brand and year only carry meaning for brand-specific oils; drop them otherwise.
    pub fn normalized(self) -> BrandFit {
        if self.under_a_specific_brand {
            self
        } else {
            BrandFit {
                under_a_specific_brand: false,
                brand: None,
                year_of_issue: None,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductVariant {
    LightMotor(BrandFit),
    CommercialVehicles,
}

impl ProductVariant {
    pub fn kind(&self) -> ProductKind {
        match self {
            ProductVariant::LightMotor(_) => ProductKind::LightMotor,
            ProductVariant::CommercialVehicles => ProductKind::CommercialVehicles,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub vendor_code: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: BigDecimal,
    pub available: bool,
    pub spec: OilSpec,
    pub variant: ProductVariant,
}

/// Exclusive upper bound of a NUMERIC(10, 2) money column.
pub const MONEY_LIMIT: i64 = 100_000_000;

/// Whether a two-decimal `amount` can be stored in a price or total column.
pub fn fits_money_column(amount: &BigDecimal) -> bool {
    *amount < BigDecimal::from(MONEY_LIMIT)
}

/// Admin input for a new product, before validation.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub category_id: Uuid,
    pub kind: ProductKind,
    pub vendor_code: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: BigDecimal,
    pub available: bool,
    pub spec: OilSpec,
    pub brand_fit: BrandFit,
}

impl ProductDraft {
    /// Checks field limits and applies the brand rule, yielding the product to store.
    pub fn validate(self) -> Result<Product, DomainError> {
        let mut errors = FieldErrors::new();
        let title = errors.required("title", &self.title, 255);
        let vendor_code = errors.required("vendor_code", &self.vendor_code, 6);
        let slug = errors.slug("slug", &self.slug, 255);
        if self.price < BigDecimal::from(0) {
            errors.push("price", "must not be negative");
        } else if self.price.normalized().as_bigint_and_exponent().1 > 2 {
            errors.push("price", "must have at most two decimal places");
        } else if !fits_money_column(&self.price) {
            errors.push("price", "must not exceed 99999999.99");
        }
        let spec = OilSpec {
            product_group: errors.required("product_group", &self.spec.product_group, 200),
            composition: errors
                .optional("composition", Some(self.spec.composition.as_str()), 200)
                .unwrap_or_default(),
            viscosity: errors.required("viscosity", &self.spec.viscosity, 6),
            volume: errors
                .optional("volume", Some(self.spec.volume.as_str()), 6)
                .unwrap_or_default(),
            classification: errors
                .optional("classification", Some(self.spec.classification.as_str()), 200)
                .unwrap_or_default(),
            manufacturer_approval: errors
                .optional(
                    "manufacturer_approval",
                    Some(self.spec.manufacturer_approval.as_str()),
                    200,
                )
                .unwrap_or_default(),
        };

        let variant = match self.kind {
            ProductKind::LightMotor => {
                let fit = self.brand_fit.normalized();
                let brand = errors.optional("brand", fit.brand.as_deref(), 50);
                ProductVariant::LightMotor(BrandFit { brand, ..fit })
            }
            ProductKind::CommercialVehicles => ProductVariant::CommercialVehicles,
        };
        errors.finish()?;

        Ok(Product {
            id: Uuid::new_v4(),
            category_id: self.category_id,
            vendor_code,
            title,
            slug,
            description: self.description.trim().to_string(),
            price: self.price,
            available: self.available,
            spec,
            variant,
        })
    }
}

/// One labelled row of a product's specification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub label: &'static str,
    pub value: String,
}

impl SpecRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Rows shown on a product page. Brand rows only appear for brand-specific light motor oils.
pub fn visible_specification(product: &Product) -> Vec<SpecRow> {
    let spec = &product.spec;
    match &product.variant {
        ProductVariant::LightMotor(fit) => {
            let mut rows = vec![
                SpecRow::new("Product group", spec.product_group.as_str()),
                SpecRow::new("Composition", spec.composition.as_str()),
                SpecRow::new("Viscosity", spec.viscosity.as_str()),
                SpecRow::new("Volume", spec.volume.as_str()),
                SpecRow::new("Classification", spec.classification.as_str()),
                SpecRow::new("Manufacturer approval", spec.manufacturer_approval.as_str()),
                SpecRow::new(
                    "Specific car brand",
                    if fit.under_a_specific_brand { "yes" } else { "no" },
                ),
            ];
            if fit.under_a_specific_brand {
                rows.push(SpecRow::new(
                    "Car brand",
                    fit.brand.clone().unwrap_or_default(),
                ));
                rows.push(SpecRow::new(
                    "Year of issue",
                    fit.year_of_issue
                        .map(|d| d.format("%Y").to_string())
                        .unwrap_or_default(),
                ));
            }
            rows
        }
        ProductVariant::CommercialVehicles => vec![
            SpecRow::new("Product group", spec.product_group.as_str()),
            SpecRow::new("Composition", spec.composition.as_str()),
            SpecRow::new("Viscosity", spec.viscosity.as_str()),
            SpecRow::new("Classification", spec.classification.as_str()),
            SpecRow::new("Manufacturer approval", spec.manufacturer_approval.as_str()),
            SpecRow::new("Volume", spec.volume.as_str()),
        ],
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn oil_spec() -> OilSpec {
        OilSpec {
            product_group: "Engine oil".to_string(),
            composition: "Synthetic".to_string(),
            viscosity: "5W-30".to_string(),
            volume: "4L".to_string(),
            classification: "API SN".to_string(),
            manufacturer_approval: "VW 504.00".to_string(),
        }
    }

    pub fn draft(kind: ProductKind, slug: &str, vendor_code: &str, price: &str) -> ProductDraft {
        ProductDraft {
            category_id: Uuid::new_v4(),
            kind,
            vendor_code: vendor_code.to_string(),
            title: format!("Oil {slug}"),
            slug: slug.to_string(),
            description: String::new(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            available: true,
            spec: oil_spec(),
            brand_fit: BrandFit::default(),
        }
    }
}
