use anyhow::Context;
use chimpx::core::config::ClientConfig;
use chimpx::resources::Account;
use chimpx::MailchimpClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Reads MAILCHIMP_API_KEY (and friends) from .env or the environment
    #[cfg(feature = "env-file")]
    let config = ClientConfig::from_env_file("MAILCHIMP")?;
    #[cfg(not(feature = "env-file"))]
    let config = ClientConfig::from_env("MAILCHIMP")?;

    let mut client = MailchimpClient::new(config)?;
    println!("Using endpoint {}", client.endpoint());

    let account: Account = client
        .get_account(None)
        .await
        .context("Failed to fetch account")?;
    println!(
        "Account: {} ({} subscribers)",
        account.account_name,
        account.total_subscribers.unwrap_or_default()
    );

    let page = client.lists().get_lists(None).await?;
    println!("Found {} lists", page.total_items);
    for list in page.lists.iter().take(5) {
        println!("  {} ({})", list.name, list.id);
    }

    Ok(())
}
