use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Tunables of the link graph flow calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkGraphSettings {
    /// Divisor applied to the unsatisfied demand when pushing a flow quantum.
    /// Higher values spread demand over more paths and converge slower.
    pub mcf_accuracy: u32,
    /// Percentage of an edge's capacity the first (shortest path) pass may fill.
    pub short_path_saturation: u32,
    /// Ceiling on outer iterations of the second pass.
    pub max_second_pass_iterations: u32,
}

impl LinkGraphSettings {
    pub const DEFAULT_ACCURACY: u32 = 16;
    pub const DEFAULT_SATURATION: u32 = 100;
    pub const DEFAULT_MAX_ITERATIONS: u32 = 1024;

    pub fn with_accuracy(mut self, mcf_accuracy: u32) -> Self {
        self.mcf_accuracy = mcf_accuracy;
        self
    }

    pub fn with_saturation(mut self, short_path_saturation: u32) -> Self {
        self.short_path_saturation = short_path_saturation;
        self
    }

    pub fn with_max_iterations(mut self, max_second_pass_iterations: u32) -> Self {
        self.max_second_pass_iterations = max_second_pass_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.mcf_accuracy < 1 {
            Err(Error::InvalidAccuracy(self.mcf_accuracy))
        } else if !(1..=100).contains(&self.short_path_saturation) {
            Err(Error::InvalidSaturation(self.short_path_saturation))
        } else if self.max_second_pass_iterations == 0 {
            Err(Error::InvalidIterationCeiling)
        } else {
            Ok(())
        }
    }
}

impl Default for LinkGraphSettings {
    fn default() -> Self {
        Self {
            mcf_accuracy: Self::DEFAULT_ACCURACY,
            short_path_saturation: Self::DEFAULT_SATURATION,
            max_second_pass_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LinkGraphSettings::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_accuracy() {
        let settings = LinkGraphSettings::default().with_accuracy(0);
        assert_eq!(settings.validate(), Err(Error::InvalidAccuracy(0)));
    }

    #[test]
    fn rejects_saturation_outside_percentage() {
        let settings = LinkGraphSettings::default().with_saturation(0);
        assert_eq!(settings.validate(), Err(Error::InvalidSaturation(0)));

        let settings = LinkGraphSettings::default().with_saturation(101);
        assert_eq!(settings.validate(), Err(Error::InvalidSaturation(101)));
    }

    #[test]
    fn rejects_zero_iteration_ceiling() {
        let settings = LinkGraphSettings::default().with_max_iterations(0);
        assert_eq!(settings.validate(), Err(Error::InvalidIterationCeiling));
    }
}
