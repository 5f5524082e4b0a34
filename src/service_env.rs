//! Runtime environment of the Pokedex API (development or production).

// strum's `EnumIs` generates undocumented methods
#![allow(missing_docs)]

use std::env;
use std::sync::{OnceLock, RwLock};

use strum_macros::{AsRefStr, Display, EnumIs, EnumIter, EnumString};

/// Name of the environment variable used to select the [`ServiceEnv`].
pub const SERVICE_ENV_VAR: &str = "POKEDEX_ENV";

/// Environment in which the service is running.
///
/// Read from the [`POKEDEX_ENV`](SERVICE_ENV_VAR) environment variable, case-insensitively
/// (see [`current`](ServiceEnv::current)).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, AsRefStr, Display, EnumIs, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ServiceEnv {
    /// Development environment.
    ///
    /// Error responses include a description of the internal error (see
    /// [`ErrorResponse`](crate::api::errors::ErrorResponse)).
    Development,

    /// Production environment.
    ///
    /// Error responses never include internal error information. This is the default
    /// whenever the environment variable is missing or contains an unknown value.
    #[default]
    Production,
}

impl ServiceEnv {
    /// Returns the current service runtime environment.
    ///
    /// The environment variable is read once; later changes to it are ignored. Use
    /// [`reload`](ServiceEnv::reload) to read it again.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use log::info;
    /// use pokedex_api::service_env::ServiceEnv;
    ///
    /// info!("Pokedex API running in {}", ServiceEnv::current());
    ///
    /// if ServiceEnv::current().is_development() {
    ///     info!("Internal errors will be included in error responses");
    /// }
    /// ```
    pub fn current() -> Self {
        static CURRENT_ENV: OnceLock<ServiceEnv> = OnceLock::new();

        if cfg!(test) {
            if let Some(test_env) = *TEST_ENV.read().unwrap() {
                return test_env;
            }
        }

        *CURRENT_ENV.get_or_init(ServiceEnv::reload)
    }

    /// Reads the runtime environment from the [`POKEDEX_ENV`](SERVICE_ENV_VAR) environment variable.
    ///
    /// Regular code should use [`current`](ServiceEnv::current) instead.
    pub fn reload() -> Self {
        env::var(SERVICE_ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Runs a test future while [`ServiceEnv::current`] returns the given environment.
    ///
    /// The previous override (if any) is restored afterwards.
    #[cfg(test)]
    pub async fn test<F>(env: ServiceEnv, f: F)
    where
        F: std::future::Future<Output = ()>,
    {
        let prev_test_env = TEST_ENV.write().unwrap().replace(env);

        f.await;

        *TEST_ENV.write().unwrap() = prev_test_env;
    }
}

/// Override of [`ServiceEnv::current`] used in tests (see [`ServiceEnv::test`]).
static TEST_ENV: RwLock<Option<ServiceEnv>> = RwLock::new(None);
