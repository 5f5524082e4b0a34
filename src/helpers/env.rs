//! Helpers pertaining to interacting with environment variables.

use std::env;
use std::num::ParseIntError;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::error::EnvVarError;

/// Optionally loads `.env` file via [`dotenv`], skipping if not found.
///
/// # Return values
///
/// | `.env` file                | Return value |
/// |----------------------------|--------------|
/// | Exists, loads successfully | `Ok(true)`   |
/// | Does not exist             | `Ok(false)`  |
/// | Exists but fails to load   | `Err(_)`     |
pub fn load_optional_dotenv() -> dotenvy::Result<bool> {
    dotenv().map(|_| true).or_else(|err| match err {
        err if err.not_found() => Ok(false),
        err => Err(err),
    })
}

/// Reads the value of an environment variable, as an int value.
///
/// # Possible return values
///
/// | Environment variable     | Return value                    |
/// |--------------------------|---------------------------------|
/// | Contains value `42`      | `Ok(42)`                        |
/// | Does not exist           | `Err(EnvVarError::NotFound)`    |
/// | Contains invalid unicode | `Err(EnvVarError::NotUnicode)`  |
/// | Contains value `foo`     | `Err(EnvVarError::IntExpected)` |
pub fn int_env_var<T>(key: &str) -> Result<T, EnvVarError>
where
    T: FromStr<Err = ParseIntError>,
{
    env::var(key).map_err(Into::into).and_then(|value| {
        value
            .parse::<T>()
            .map_err(|parse_err| EnvVarError::IntExpected { value, source: parse_err })
    })
}

/// Reads the value of an environment variable, falling back to a default value if it is not set.
///
/// # Possible return values
///
/// | Environment variable     | Return value                   |
/// |--------------------------|--------------------------------|
/// | Contains value `foo`     | `Ok("foo")`                    |
/// | Does not exist           | `Ok(default)`                  |
/// | Contains invalid unicode | `Err(EnvVarError::NotUnicode)` |
pub fn env_var_or<D>(key: &str, default: D) -> Result<String, EnvVarError>
where
    D: Into<String>,
{
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.into()),
        Err(err) => Err(err.into()),
    }
}

/// Reads the value of an environment variable as an int value, falling back to a default
/// value if it is not set.
///
/// See [`int_env_var`] for possible errors.
pub fn int_env_var_or<T>(key: &str, default: T) -> Result<T, EnvVarError>
where
    T: FromStr<Err = ParseIntError>,
{
    match int_env_var(key) {
        Err(EnvVarError::NotFound) => Ok(default),
        result => result,
    }
}
