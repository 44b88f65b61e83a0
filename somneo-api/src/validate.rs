use crate::{ApiError, Result};

/// Reject `value` outside the inclusive range `[min, max]`
pub(crate) fn check_range(parameter: &str, value: u8, min: u8, max: u8) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::out_of_range(parameter, value.into(), min.into(), max.into()))
    }
}
