use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderPage, OrderStatus, ShippingDetails};
use crate::domain::ports::OrderRepository;
use crate::schema::{carts, customer_orders, customers, orders};

use super::models::{CartRow, CustomerOrderRow, NewOrderRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
    rows.into_iter().map(Order::try_from).collect()
}

impl OrderRepository for DieselOrderRepository {
    fn place(
        &self,
        cart_id: Uuid,
        customer_id: Uuid,
        details: ShippingDetails,
    ) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            customers::table
                .find(customer_id)
                .select(customers::id)
                .first::<Uuid>(conn)
                .optional()?
                .ok_or_else(|| DomainError::NotFound(format!("customer {customer_id}")))?;

            // Lock the cart; a concurrent placement waits here and then sees in_order.
            let cart = carts::table
                .find(cart_id)
                .select(CartRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or_else(|| DomainError::NotFound(format!("cart {cart_id}")))?;
            if cart.in_order {
                return Err(DomainError::Conflict(format!(
                    "cart {cart_id} has already been ordered"
                )));
            }
            if cart.owner_id.is_some_and(|owner| owner != customer_id) {
                return Err(DomainError::Conflict(format!(
                    "cart {cart_id} belongs to another customer"
                )));
            }

            // 1. Insert the order
            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    customer_id,
                    cart_id: None,
                    first_name: details.first_name,
                    last_name: details.last_name,
                    phone: details.phone,
                    address: details.address,
                    status: OrderStatus::New.as_str().to_string(),
                    buying_type: details.buying_type.as_str().to_string(),
                    comments: details.comments,
                    order_date: details.order_date,
                })
                .execute(conn)?;

            // 2. Close the cart
            diesel::update(carts::table.find(cart_id))
                .set((carts::in_order.eq(true), carts::updated_at.eq(Utc::now())))
                .execute(conn)?;

            // 3. Link the order to the cart
            diesel::update(orders::table.find(order_id))
                .set(orders::cart_id.eq(Some(cart_id)))
                .execute(conn)?;

            // 4. Record the order in the customer's history
            diesel::insert_into(customer_orders::table)
                .values(&CustomerOrderRow {
                    customer_id,
                    order_id,
                })
                .execute(conn)?;

            let row = orders::table
                .find(order_id)
                .select(OrderRow::as_select())
                .first(conn)?;
            Order::try_from(row)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = customer_orders::table
            .inner_join(orders::table)
            .filter(customer_orders::customer_id.eq(customer_id))
            .select(OrderRow::as_select())
            .order((orders::created_at.desc(), orders::id.desc()))
            .load(&mut conn)?;
        into_orders(rows)
    }

    fn list(&self, page: i64, limit: i64) -> Result<OrderPage, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table.count().get_result(conn)?;

            let rows = orders::table
                .select(OrderRow::as_select())
                .order((orders::created_at.desc(), orders::id.desc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(OrderPage {
                items: into_orders(rows)?,
                total,
            })
        })
    }

    fn advance_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = orders::table
                .find(id)
                .select(OrderRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or_else(|| DomainError::NotFound(format!("order {id}")))?;
            let order = Order::try_from(row)?;
            if !order.status.can_advance_to(status) {
                return Err(DomainError::Conflict(format!(
                    "order {id} cannot move from {} to {status}",
                    order.status
                )));
            }

            diesel::update(orders::table.find(id))
                .set(orders::status.eq(status.as_str()))
                .execute(conn)?;

            Ok(Order { status, ..order })
        })
    }
}
