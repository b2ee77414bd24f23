use std::{sync::Arc, time::Duration};

use anyhow::Result;
use log::info;
use reqwest::{Client, Proxy};

use crate::{Config, fetching::HttpFetcher};

/// Seconds to wait for a source before giving up on it
const DEFAULT_TIMEOUT: u64 = 10;

pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let mut builder = Client::builder().timeout(Duration::from_secs(
            config.http.timeout.unwrap_or(DEFAULT_TIMEOUT),
        ));

        if let Some(user_agent) = &config.http.user_agent {
            builder = builder.user_agent(user_agent)
        }

        if let Some(proxy) = &config.http.proxy {
            info!("With proxy: {}", proxy);
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(Self {
            config,
            http_client: builder.build()?,
        })
    }

    pub fn fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(self.http_client.clone())
    }
}
