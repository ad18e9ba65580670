use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{Error, Result};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Unix timestamp `hours` from now, as used for token expiry.
pub fn expiry_after_hours(hours: i64) -> Result<usize> {
    let expires_at = TimeDelta::try_hours(hours.max(1))
        .and_then(|ttl| now().checked_add_signed(ttl))
        .ok_or_else(|| Error::Internal(format!("token ttl of {} hours is out of range", hours)))?;
    usize::try_from(expires_at.timestamp())
        .map_err(|_| Error::Internal("token expiry before the unix epoch".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_lies_in_the_future() {
        let exp = expiry_after_hours(1).unwrap();
        assert!(exp as i64 > now().timestamp());
    }

    #[test]
    fn oversized_ttl_is_an_error_not_a_panic() {
        assert!(matches!(
            expiry_after_hours(i64::MAX / 1000),
            Err(Error::Internal(_))
        ));
        assert!(expiry_after_hours(i64::MAX).is_err());
    }
}
