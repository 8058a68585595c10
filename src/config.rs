use crate::error::ProfileError;
use crate::levels::whole;

/// Level spacing and reporting parameters in one struct.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Distance between consecutive y-levels.
    /// The level range is snapped outward to multiples of this value.
    pub step: f64,
    /// Decimal places kept in the reported `y_level`.
    pub decimals: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            decimals: 1,
        }
    }
}

impl ProfileConfig {
    pub(crate) fn validate(&self) -> Result<(), ProfileError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ProfileError::InvalidConfig(format!(
                "level step must be a positive number, got {}",
                self.step
            )));
        }
        // 10^decimals must stay representable.
        if self.decimals > 15 {
            return Err(ProfileError::InvalidConfig(format!(
                "at most 15 decimals supported, got {}",
                self.decimals
            )));
        }
        // Each step must be a whole number of reported units, or adjacent
        // levels round to the same or unevenly spaced `y_level`.
        let units = self.step * 10f64.powi(self.decimals as i32);
        if !whole(units).is_some_and(|n| n >= 1.0) {
            return Err(ProfileError::InvalidConfig(format!(
                "level step {} is not a multiple of {} decimal place(s)",
                self.step, self.decimals
            )));
        }
        Ok(())
    }
}
