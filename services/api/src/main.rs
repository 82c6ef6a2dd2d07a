use anyhow::Result;
use std::env;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod mailer;
mod models;
mod repositories;
mod routes;
mod state;
mod validation;

use common::database::{self, DatabaseConfig};

use crate::{
    mailer::{OrderMailer, SmtpConfig},
    repositories::{
        coupons::CouponRepository, orders::OrderRepository, products::ProductRepository,
        reviews::ReviewRepository, users::UserRepository,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting storefront API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize the confirmation mailer
    let mailer = OrderMailer::new(&SmtpConfig::from_env())?;

    info!("Storefront API service initialized successfully");

    let app_state = AppState {
        product_repository: ProductRepository::new(pool.clone()),
        review_repository: ReviewRepository::new(pool.clone()),
        order_repository: OrderRepository::new(pool.clone()),
        coupon_repository: CouponRepository::new(pool.clone()),
        user_repository: UserRepository::new(pool),
        mailer,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Storefront API listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
