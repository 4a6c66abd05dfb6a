use std::sync::Arc;

use chrono::Duration;
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

mod application;
mod domain;
mod infrastructure;

use application::orders::{
    CreateOrderCommand, CreateOrderHandler, DeleteOrderCommand, DeleteOrderHandler,
    GetOrderByIdHandler, GetOrderByIdQuery, OrderItemRequest, UpdateOrderCommand,
    UpdateOrderHandler,
};
use application::ports::Clock;
use domain::voucher::{Voucher, VoucherDiscountType};
use infrastructure::clock::SystemClock;
use infrastructure::memory::{InMemoryOrderRepository, InMemoryUnitOfWork, InMemoryVoucherRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging with environment-based filtering.
    // Default to INFO level, can be overridden with RUST_LOG env var.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,order_core=debug")),
        )
        .init();

    tracing::info!("Starting order management demo");

    // === 1. Wire collaborators ===
    let clock = Arc::new(SystemClock);
    let unit_of_work = Arc::new(InMemoryUnitOfWork::new());
    let order_repository = Arc::new(InMemoryOrderRepository::new(unit_of_work.clone()));
    let voucher_repository = Arc::new(InMemoryVoucherRepository::new(unit_of_work.clone()));

    // === 2. Seed vouchers ===
    let now = clock.utc_now();
    let expiration = now + Duration::days(5 * 365);
    voucher_repository
        .insert(Voucher::create(
            "30-OFF",
            Some(Decimal::from(30)),
            None,
            5000,
            VoucherDiscountType::Percentage,
            expiration,
            now,
        ))
        .await;
    voucher_repository
        .insert(Voucher::create(
            "50-OFF",
            None,
            Some(Decimal::from(50)),
            5000,
            VoucherDiscountType::Value,
            expiration,
            now,
        ))
        .await;
    tracing::info!("Seeded vouchers 30-OFF (percentage) and 50-OFF (value)");

    let create_handler = CreateOrderHandler::new(
        clock.clone(),
        voucher_repository.clone(),
        order_repository.clone(),
        unit_of_work.clone(),
    );
    let update_handler = UpdateOrderHandler::new(order_repository.clone(), unit_of_work.clone());
    let get_handler = GetOrderByIdHandler::new(order_repository.clone());
    let delete_handler = DeleteOrderHandler::new(order_repository, unit_of_work);

    // === 3. Create an order redeeming the percentage voucher ===
    let first_product = Uuid::new_v4();
    let second_product = Uuid::new_v4();
    let created = create_handler
        .handle(CreateOrderCommand {
            customer_id: Uuid::new_v4(),
            branch_id: Uuid::new_v4(),
            amount: Decimal::from(200),
            order_items: vec![
                OrderItemRequest {
                    product_id: first_product,
                    quantity: 2,
                    price: Decimal::from(50),
                },
                OrderItemRequest {
                    product_id: second_product,
                    quantity: 1,
                    price: Decimal::from(100),
                },
            ],
            voucher_code: Some("30-OFF".to_string()),
            has_voucher: true,
            discount: Decimal::from(60),
        })
        .await?;
    tracing::info!("Created order {}", created.order_id);

    // === 4. Update the order, dropping the second product ===
    let updated = update_handler
        .handle(UpdateOrderCommand {
            order_id: created.order_id,
            order_items: vec![OrderItemRequest {
                product_id: first_product,
                quantity: 3,
                price: Decimal::from(50),
            }],
        })
        .await?;
    tracing::info!("Updated order {}", updated.order_id);

    // === 5. Read the projection back ===
    let projection = get_handler
        .handle(GetOrderByIdQuery {
            order_id: created.order_id,
        })
        .await?;
    tracing::info!(
        "Order projection:\n{}",
        serde_json::to_string_pretty(&projection)?
    );

    // === 6. Delete the order ===
    delete_handler
        .handle(DeleteOrderCommand {
            order_id: created.order_id,
        })
        .await?;
    tracing::info!("Deleted order {}", created.order_id);

    tracing::info!("Demo complete");
    Ok(())
}
