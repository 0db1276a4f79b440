//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::AdminConfig,
    hadawi::{HadawiClient, HadawiError},
    i18n::{Catalog, Translator},
};

use hadawi_core::Language;

/// Application state shared across all handlers.
///
/// Immutable after startup; cloning is an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    hadawi: HadawiClient,
    catalog: Arc<Catalog>,
}

impl AppState {
    /// Build the state from configuration and a loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the Hadawi HTTP client cannot be built.
    pub fn new(config: AdminConfig, catalog: Catalog) -> Result<Self, HadawiError> {
        let hadawi = HadawiClient::new(&config.api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                hadawi,
                catalog: Arc::new(catalog),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn hadawi(&self) -> &HadawiClient {
        &self.inner.hadawi
    }

    /// A translator for `language` over the shared catalog.
    #[must_use]
    pub fn translator(&self, language: Language) -> Translator {
        Translator::new(Arc::clone(&self.inner.catalog), language)
    }
}
