use async_trait::async_trait;

use crate::api::{Notice, Notifier};

/// Notifier that writes every notice to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notice: Notice) {
        tracing::info!(kind = %notice.kind, "{}", notice.message);
    }
}
