//! Capability filters for narrowing a registry.

use crate::error::ScenarioError;
use crate::types::ScenarioDescriptor;
use std::fmt;
use std::str::FromStr;

/// Which scenarios survive [`ScenarioRegistry::filter`](crate::ScenarioRegistry::filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioFilter {
    #[default]
    All,
    /// Both an input and an output file
    HasInputAndOutput,
    /// At least one year-tagged output file
    HasYearly,
    /// `HasInputAndOutput` and `HasYearly`
    HasBoth,
}

impl ScenarioFilter {
    pub const VALID_OPTIONS: &'static str = "inout, yearly, both, all";

    pub fn matches(&self, scenario: &ScenarioDescriptor) -> bool {
        match self {
            ScenarioFilter::All => true,
            ScenarioFilter::HasInputAndOutput => scenario.has_input_and_output(),
            ScenarioFilter::HasYearly => scenario.has_yearly(),
            ScenarioFilter::HasBoth => scenario.has_input_and_output() && scenario.has_yearly(),
        }
    }
}

impl FromStr for ScenarioFilter {
    type Err = ScenarioError;

    fn from_str(option: &str) -> Result<Self, Self::Err> {
        match option.trim().to_lowercase().as_str() {
            "inout" | "io" | "input-output" | "input_output" => Ok(ScenarioFilter::HasInputAndOutput),
            "yearly" | "year" | "output-year" | "output_year" => Ok(ScenarioFilter::HasYearly),
            "both" => Ok(ScenarioFilter::HasBoth),
            "all" | "none" | "" => Ok(ScenarioFilter::All),
            _ => Err(ScenarioError::InvalidArgument(format!(
                "Unknown option '{}'. Valid options: {}",
                option,
                ScenarioFilter::VALID_OPTIONS
            ))),
        }
    }
}

impl fmt::Display for ScenarioFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioFilter::All => "all",
            ScenarioFilter::HasInputAndOutput => "inout",
            ScenarioFilter::HasYearly => "yearly",
            ScenarioFilter::HasBoth => "both",
        };
        f.write_str(name)
    }
}
