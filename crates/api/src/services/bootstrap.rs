//! First-start bootstrap: initial organization and API key.

use sqlx::PgPool;
use tracing::{info, warn};

use persistence::repositories::{ApiKeyRepository, FeederSizeRepository, OrganizationRepository};
use shared::crypto::{extract_key_prefix, generate_api_key, sha256_hex};

use crate::config::BootstrapConfig;

/// Creates an organization and API key when the database has none.
///
/// The plaintext key is logged exactly once, at startup; only its hash is
/// stored. Subsequent starts are no-ops.
pub async fn ensure_bootstrap(pool: &PgPool, config: &BootstrapConfig) -> Result<(), sqlx::Error> {
    if !config.enabled {
        return Ok(());
    }

    let api_keys = ApiKeyRepository::new(pool.clone());
    if api_keys.count().await? > 0 {
        return Ok(());
    }

    let organizations = OrganizationRepository::new(pool.clone());
    let organization = organizations.create(&config.organization_name).await?;

    let key = generate_api_key();
    let prefix = extract_key_prefix(&key).unwrap_or_default();
    api_keys
        .create(
            organization.organization_id,
            &sha256_hex(&key),
            prefix,
            "bootstrap",
        )
        .await?;

    let feeder_sizes = FeederSizeRepository::new(pool.clone());
    if let Err(e) = feeder_sizes.seed_defaults(organization.organization_id).await {
        warn!("Failed to seed feeder sizes: {}", e);
    }

    info!(
        organization_id = %organization.organization_id,
        "Bootstrap organization created"
    );
    // Shown once; store it somewhere safe.
    warn!("Bootstrap API key (not stored in plaintext): {}", key);

    Ok(())
}
