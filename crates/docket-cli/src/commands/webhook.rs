//! Automation webhook settings.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use docket_core::config::Config;
use docket_core::notifier::WebhookNotifier;
use docket_core::CaseStore;

#[derive(Subcommand)]
pub enum WebhookCommands {
    /// Save the webhook URL that receives case and task events
    Set {
        /// Endpoint URL
        url: String,
    },

    /// Show the configured webhook URL
    Show,

    /// Remove the webhook URL
    Clear,

    /// Send a test event to the webhook
    Test {
        /// Endpoint to test instead of the configured one
        url: Option<String>,
    },
}

pub async fn execute(cmd: WebhookCommands, store: &CaseStore, config: &Config) -> Result<()> {
    match cmd {
        WebhookCommands::Set { url } => {
            let url = url.trim();
            if url.is_empty() {
                anyhow::bail!("Please enter a webhook URL");
            }
            store.set_webhook_url(url)?;
            println!("{} Webhook URL saved: {}", "✓".green().bold(), url.cyan());
        }

        WebhookCommands::Show => {
            match store.webhook_url()? {
                Some(url) => println!("{}: {}", "Webhook URL".bold(), url.cyan()),
                None => println!("{}", "No webhook URL configured.".dimmed()),
            }
            if let Some(url) = &config.webhook_url_override {
                println!(
                    "{}: {} {}",
                    "Override".bold(),
                    url.yellow(),
                    "(events are sent here this run)".dimmed()
                );
            }
        }

        WebhookCommands::Clear => {
            store.set_webhook_url("")?;
            println!("{} Webhook URL cleared", "✓".green().bold());
        }

        WebhookCommands::Test { url } => {
            let url = match url.filter(|u| !u.trim().is_empty()) {
                Some(u) => u,
                None => config
                    .webhook_url_override
                    .clone()
                    .or(store.webhook_url()?)
                    .ok_or_else(|| anyhow::anyhow!("Please enter a webhook URL"))?,
            };

            let status = WebhookNotifier::new(config.webhook_timeout)
                .send_test(&url)
                .await?;

            if status.is_success() {
                println!(
                    "{} Test webhook sent to {} ({})",
                    "✓".green().bold(),
                    url.cyan(),
                    status
                );
            } else {
                anyhow::bail!("Webhook at {} responded with {}", url, status);
            }
        }
    }

    Ok(())
}
