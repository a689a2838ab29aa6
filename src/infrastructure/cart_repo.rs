use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::Cart;
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::{cart_lines, carts};

use super::models::{CartLineRow, CartRow, NewCartLineRow, NewCartRow};

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(super) fn load_lines(conn: &mut PgConnection, cart: &CartRow) -> QueryResult<Vec<CartLineRow>> {
    CartLineRow::belonging_to(cart)
        .select(CartLineRow::as_select())
        .order((cart_lines::created_at.asc(), cart_lines::id.asc()))
        .load(conn)
}

impl CartRepository for DieselCartRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError> {
        let mut conn = self.pool.get()?;

        let cart = carts::table
            .find(id)
            .select(CartRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let lines = load_lines(&mut conn, &cart)?;
        Ok(Some(cart.into_cart(lines)))
    }

    fn create_anonymous(&self) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;
        let cart = Cart::new(None);
        diesel::insert_into(carts::table)
            .values(&NewCartRow::from(&cart))
            .execute(&mut conn)?;
        Ok(cart)
    }

    fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the cart so an order placed meanwhile cannot be overwritten
            let in_order: bool = carts::table
                .find(cart.id)
                .select(carts::in_order)
                .for_update()
                .first(conn)
                .optional()?
                .ok_or_else(|| DomainError::NotFound(format!("cart {}", cart.id)))?;
            if in_order {
                return Err(DomainError::Conflict(format!(
                    "cart {} has already been ordered",
                    cart.id
                )));
            }

            // 2. Drop lines that are no longer in the cart
            let kept: Vec<Uuid> = cart.lines.iter().map(|l| l.id).collect();
            diesel::delete(
                cart_lines::table
                    .filter(cart_lines::cart_id.eq(cart.id))
                    .filter(cart_lines::id.ne_all(kept)),
            )
            .execute(conn)?;

            // 3. Upsert the remaining lines
            for line in &cart.lines {
                diesel::insert_into(cart_lines::table)
                    .values(&NewCartLineRow::from(line))
                    .on_conflict(cart_lines::id)
                    .do_update()
                    .set((
                        cart_lines::quantity.eq(line.quantity),
                        cart_lines::total_price.eq(&line.total_price),
                    ))
                    .execute(conn)?;
            }

            // 4. Store the recalculated totals
            diesel::update(carts::table.find(cart.id))
                .set((
                    carts::total_products.eq(cart.total_products),
                    carts::total_price.eq(&cart.total_price),
                    carts::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            Ok(())
        })
    }
}
