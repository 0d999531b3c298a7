//! Demo run of a service at King Chinese Bowl: a customer orders online and books a
//! table, then a cashier rings up a dine-in order that the kitchen works through.

use chrono::{Days, Local, NaiveTime};
use king_bowl::checkout::{CheckoutForm, Fulfilment, PaymentMethod};
use king_bowl::config::AppConfig;
use king_bowl::lifecycle::{setup_tracing, RestaurantSystem};
use king_bowl::model::{
    Category, ItemStatus, MenuFilter, MenuItemId, OrderType, ReservationRequest,
};
use king_bowl::views::{OrderFilter, PosTicket};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(None)?;
    setup_tracing(&config.log.filter);

    info!(restaurant = %config.restaurant.name, "Starting");
    let system = RestaurantSystem::start(&config).await?;

    // Customer: browse, fill a cart, check out
    let receipt = async {
        let veg_starters = system
            .catalog
            .filter(&MenuFilter::default().category(Category::Starters).veg_only());
        info!(count = veg_starters.len(), "Browsing veg starters");

        let cart = system.carts.open_cart(Some("web".to_string())).await?;
        system.carts.add_item(cart, MenuItemId(2), 1).await?;
        system.carts.add_item(cart, MenuItemId(9), 2).await?;
        let summary = system.carts.add_item(cart, MenuItemId(21), 1).await?;
        info!(items = summary.item_count, total = summary.bill.total, "Cart ready");

        let form = CheckoutForm {
            name: "Meera Nair".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "meera@example.com".to_string(),
            fulfilment: Fulfilment::Delivery {
                address: "14 Residency Road, Bengaluru".to_string(),
            },
            payment: PaymentMethod::Upi,
        };
        let receipt = system.checkout.place_order(cart, form).await?;
        Ok::<_, Box<dyn std::error::Error>>(receipt)
    }
    .instrument(tracing::info_span!("customer_checkout"))
    .await?;
    info!(reference = %receipt.reference, total = receipt.bill.total, "Receipt issued");

    // Customer: reserve a table for tomorrow evening
    let tomorrow = Local::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .ok_or("date out of range")?;
    let time = NaiveTime::from_hms_opt(20, 0, 0).ok_or("invalid time")?;
    let reservation = system
        .reservations
        .submit(ReservationRequest {
            name: "Vikram Singh".to_string(),
            email: "vikram@example.com".to_string(),
            phone: "9123456780".to_string(),
            date: tomorrow,
            time,
            party_size: 4,
            special_requests: "Window table".to_string(),
        })
        .instrument(tracing::info_span!("reservation"))
        .await?;
    info!(confirmation = %reservation.confirmation, "Table booked");

    // Staff: POS order for table 4
    let session = system.staff.login("2345").await?;
    let mut ticket = PosTicket::new();
    for id in [MenuItemId(4), MenuItemId(14), MenuItemId(14), MenuItemId(23)] {
        if let Some(dish) = system.catalog.get(id) {
            ticket.add_item(dish);
        }
    }
    ticket.set_table(Some(4));
    info!(items = ticket.item_count(), total = ticket.bill(&system.pricing).total, "POS ticket");
    let dine_in = system
        .orders
        .place_order(ticket.submit(&session)?)
        .instrument(tracing::info_span!("pos"))
        .await?;
    ticket.clear();

    let mut takeaway = PosTicket::new();
    takeaway.set_order_type(OrderType::Takeaway);
    if let Some(dish) = system.catalog.get(MenuItemId(20)) {
        takeaway.add_item(dish);
    }
    let takeaway_order = system.orders.place_order(takeaway.submit(&session)?).await?;

    // Kitchen works the dine-in order; the takeaway is called off
    {
        let kitchen = system.kitchen();
        let board = kitchen.board().await?;
        info!(new = board.new.len(), preparing = board.preparing.len(), "Kitchen board");

        kitchen.set_item_status(dine_in, 0, ItemStatus::Preparing).await?;
        kitchen.advance(dine_in).await?;
        let done = kitchen.advance(dine_in).await?;
        info!(order = %done.id, status = %done.status, "Order served");

        let dashboard = system.dashboard();
        dashboard
            .cancel(takeaway_order, Some("Customer left".to_string()))
            .await?;
        if let Err(e) = dashboard.cancel(takeaway_order, None).await {
            warn!(error = %e, "Second cancel rejected");
        }

        let view = dashboard.view(&OrderFilter::default()).await?;
        info!(
            orders = view.stats.total_orders,
            completed = view.stats.completed,
            cancelled = view.stats.cancelled,
            revenue = view.stats.revenue,
            "Dashboard"
        );
    }

    system.staff.logout().await?;
    system.shutdown().await?;

    info!("Service complete");
    Ok(())
}
