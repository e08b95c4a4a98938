use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Process-wide HTTP client shared by the fetcher and the backend forwarder
///
/// Timeouts are applied per request, so the two directions can have
/// different budgets.
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .pool_idle_timeout(Some(Duration::from_secs(30)))
                .tcp_nodelay(true)
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .build()
                .expect("Failed to build default HTTP client")
        })
        .clone()
}
