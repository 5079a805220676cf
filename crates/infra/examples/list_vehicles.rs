//! Example: Log in and list vehicles
//!
//! # Setup
//!
//! 1. Put application credentials in `.env` or the environment: ```bash
//!    export MOJIO_APP_ID=... MOJIO_SECRET_KEY=... ```
//!
//! 2. Either seed a token with `MOJIO_TOKEN`, or set `MOJIO_USERNAME` and
//!    `MOJIO_PASSWORD` to log in with the password grant.
//!
//! 3. Run this example: ```bash cargo run -p mojio-infra --example
//!    list_vehicles ```

use std::sync::Arc;

use mojio_infra::{config, ApiClient, ApiCommands, Credentials, ListQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let client = Arc::new(ApiClient::new(config::load()?)?);

    if !client.is_authenticated() {
        let username = std::env::var("MOJIO_USERNAME")?;
        let password = std::env::var("MOJIO_PASSWORD")?;
        client.login(&Credentials::new(username, password)).await?;
    }

    let api = ApiCommands::new(client.clone());
    let me = api.me().await?;
    println!("Signed in as {}", me.user_name.as_deref().unwrap_or(&me.id));

    let vehicles = api.vehicles(ListQuery::new().page(1).page_size(25).sort_by("Name", false)).await?;
    println!("{} of {} vehicles", vehicles.len(), vehicles.total_count());
    for vehicle in &vehicles {
        println!("  {} {}", vehicle.id, vehicle.name.as_deref().unwrap_or("(unnamed)"));
    }

    Ok(())
}
