//! Wiring of the verification service from configuration

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use vg_core::{
    Clock, CodeStore, DeliveryBackend, DeliveryDispatcher, SecureCodeGenerator, SharedSecretGate,
    SlidingWindowRateLimiter, SystemClock, UserSessionClient, VerificationService,
    VerificationServiceConfig,
};
use vg_infra::{InfrastructureError, JsonFileSnapshotStore, SessionGatewayClient, TelegramBotBackend};
use vg_shared::{AppConfig, DeliveryConfig};

/// Build the service against the wall clock
pub async fn build(config: &AppConfig) -> Result<Arc<VerificationService>, InfrastructureError> {
    build_with_clock(config, Arc::new(SystemClock)).await
}

/// Build the service, restoring pending codes from the snapshot file
pub async fn build_with_clock(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<VerificationService>, InfrastructureError> {
    let snapshots = JsonFileSnapshotStore::from_config(&config.persistence);
    let store = Arc::new(CodeStore::new(Arc::new(snapshots), clock.clone()));
    store.load().await;

    let limiter = Arc::new(SlidingWindowRateLimiter::from_config(
        &config.rate_limit,
        clock.clone(),
    ));
    let dispatcher = Arc::new(build_dispatcher(&config.delivery).await?);

    info!(
        delivery_mode = %dispatcher.mode(),
        auth_required = config.auth.is_enabled(),
        bot_token_configured = config.delivery.has_bot_token(),
        code_ttl_seconds = config.verification.code_ttl_seconds,
        rate_limit = config.rate_limit.max_requests,
        rate_window_seconds = config.rate_limit.window_seconds,
        store_path = %config.persistence.path.display(),
        "Verification service ready"
    );

    Ok(Arc::new(VerificationService::new(
        store,
        limiter,
        Arc::new(SecureCodeGenerator),
        dispatcher,
        SharedSecretGate::from_config(&config.auth),
        clock,
        VerificationServiceConfig::from_config(&config.verification),
    )))
}

/// Construct the configured transports and let the dispatcher choose
pub async fn build_dispatcher(config: &DeliveryConfig) -> Result<DeliveryDispatcher, InfrastructureError> {
    let session: Option<Arc<dyn UserSessionClient>> = match SessionGatewayClient::from_config(config)? {
        Some(client) => {
            client.connect().await;
            Some(Arc::new(client) as Arc<dyn UserSessionClient>)
        }
        None => None,
    };

    let bot = TelegramBotBackend::from_config(config)?
        .map(|backend| Arc::new(backend) as Arc<dyn DeliveryBackend>);

    Ok(DeliveryDispatcher::select(
        session,
        config.dry_run,
        bot,
        Duration::from_secs(config.timeout_secs),
    ))
}
