//! # myemma demo
//!
//! Connects with the configuration from `emma.yaml` / `EMMA_*`, lists the
//! account's groups and, given a member id as the first argument, that
//! member's groups and mailings.
//!
//! ```bash
//! EMMA_ACCOUNT_ID=1234 EMMA_PUBLIC_KEY=... EMMA_PRIVATE_KEY=... RUST_LOG=info cargo run -- 1000
//! ```

use myemma::{Account, EmmaConfig, MemberId};
use resource_framework::tracing::setup_tracing;
use serde_json::json;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = EmmaConfig::load().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e.to_string()
    })?;
    let mut account = Account::connect(&config).map_err(|e| e.to_string())?;
    info!(account_id = %account.account_id(), "Connected");

    let mut groups = account.groups();
    for (name, group) in groups.fetch_all().await.map_err(|e| e.to_string())? {
        info!(group = %name, group_id = ?group.id(), "Account group");
    }

    let Some(arg) = std::env::args().nth(1) else {
        return Ok(());
    };
    let member_id: i64 = arg
        .parse()
        .map_err(|e| format!("invalid member id '{arg}': {e}"))?;

    let mut member = account.new_member(
        json!({ "member_id": member_id })
            .as_object()
            .cloned()
            .unwrap_or_default(),
    );

    let span = tracing::info_span!("member", member_id = %MemberId(member_id));
    async {
        let mut groups = member.groups();
        groups.fetch_all().await.map_err(|e| e.to_string())?;
        info!(count = groups.len(), names = ?groups.keys().collect::<Vec<_>>(), "Member groups");

        let mut mailings = member.mailings();
        mailings.fetch_all().await.map_err(|e| e.to_string())?;
        info!(count = mailings.len(), "Member mailings");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    info!("Done");
    Ok(())
}
