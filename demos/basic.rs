//! Basic example demonstrating the Autotask API client.
//!
//! Run with:
//! ```
//! AUTOTASK_USERNAME=api@example.com AUTOTASK_SECRET=... AUTOTASK_INTEGRATION_CODE=... \
//!     cargo run --example basic
//! ```

use autotask::{AutotaskClient, Credentials, FilterBuilder, Operator};

#[tokio::main]
async fn main() -> autotask::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Discover the tenant's zone, then connect to it
    println!("Creating Autotask client...");
    let client = AutotaskClient::for_zone(Credentials::from_env()?).await?;
    println!("Connected to: {}", client.base_url());

    // First page of active companies
    println!("\n--- Active Companies (first page) ---");
    let companies = client
        .companies()
        .query()
        .filter("isActive", Operator::Eq, true)
        .records(10)
        .get()
        .await?;
    println!("Found {} companies", companies.len());

    for company in &companies {
        println!(
            "  - {} ({})",
            company.company_name.as_deref().unwrap_or("unnamed"),
            company.id.unwrap_or_default()
        );
    }

    let Some(first) = companies.first().and_then(|c| c.id) else {
        return Ok(());
    };

    // Contacts of the first company
    println!("\n--- Contacts ---");
    let contacts = client
        .contacts()
        .query()
        .filter("companyID", Operator::Eq, first)
        .or(|g| g.exists("emailAddress").exists("phone"))
        .get_all()
        .await?;
    println!("Found {} reachable contacts", contacts.len());

    for contact in contacts.iter().take(5) {
        println!(
            "  - {} <{}>",
            contact.full_name(),
            contact.email_address.as_deref().unwrap_or("-")
        );
    }

    // Metadata for an adjustment entity
    println!("\n--- Contract Service Adjustment Fields ---");
    let fields = client
        .contract_service_adjustments()
        .get_entity_fields()
        .await?;
    for name in fields.required() {
        println!("  * {name}");
    }

    Ok(())
}
