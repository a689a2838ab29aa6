use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::Cart;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerDirectory;
use crate::schema::{carts, customers};

use super::cart_repo::load_lines;
use super::models::{CartRow, CustomerRow, NewCartRow, NewCustomerRow};

pub struct DieselCustomerDirectory {
    pool: DbPool,
}

impl DieselCustomerDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn active_cart_row(conn: &mut PgConnection, customer_id: Uuid) -> QueryResult<Option<CartRow>> {
    carts::table
        .filter(carts::owner_id.eq(Some(customer_id)))
        .filter(carts::in_order.eq(false))
        .select(CartRow::as_select())
        .first(conn)
        .optional()
}

impl CustomerDirectory for DieselCustomerDirectory {
    fn get_or_create_customer(&self, identity: &str) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;

        // Concurrent first visits race on the unique identity; the loser reads the winner's row.
        diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                id: Uuid::new_v4(),
                identity,
            })
            .on_conflict(customers::identity)
            .do_nothing()
            .execute(&mut conn)?;

        let row = customers::table
            .filter(customers::identity.eq(identity))
            .select(CustomerRow::as_select())
            .first(&mut conn)?;
        Ok(row.into())
    }

    fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }

    fn get_or_create_active_cart(&self, customer_id: Uuid) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            if let Some(row) = active_cart_row(conn, customer_id)? {
                let lines = load_lines(conn, &row)?;
                return Ok(row.into_cart(lines));
            }

            // The partial unique index on open carts turns a racing insert into a no-op.
            let cart = Cart::new(Some(customer_id));
            diesel::insert_into(carts::table)
                .values(&NewCartRow::from(&cart))
                .on_conflict_do_nothing()
                .execute(conn)?;

            let row = active_cart_row(conn, customer_id)?.ok_or_else(|| {
                DomainError::Internal(format!("no open cart for customer {customer_id}"))
            })?;
            let lines = load_lines(conn, &row)?;
            Ok(row.into_cart(lines))
        })
    }
}
