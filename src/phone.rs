//! Phone number normalization.
//!
//! Numbers are parsed with the [`phonenumber`] crate against a default
//! region and rendered as `+{country_code}{national_number}`. Leading
//! national zeros are not preserved.

use phonenumber::country;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhoneError {
    #[error("unknown region code '{0}'")]
    UnknownRegion(String),

    #[error("{raw} is not a phone number: {source}")]
    Parse {
        raw: String,
        #[source]
        source: phonenumber::ParseError,
    },
}

/// Parse `raw` with `region` as the default country and return it in
/// international form.
pub fn normalize(raw: &str, region: &str) -> Result<String, PhoneError> {
    let id: country::Id = region
        .parse()
        .map_err(|_| PhoneError::UnknownRegion(region.to_string()))?;

    let number = phonenumber::parse(Some(id), raw).map_err(|source| PhoneError::Parse {
        raw: raw.to_string(),
        source,
    })?;

    Ok(format!(
        "+{}{}",
        number.country().code(),
        number.national().value()
    ))
}
