//! Simulation scenarios.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokenswap_form::Side;

/// A scripted sequence of form interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// A step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioStep {
    /// Pick a currency on one side.
    SelectCurrency { side: Side, currency: String },
    /// Type an amount on one side.
    EnterAmount { side: Side, amount: String },
    /// Let time pass.
    Wait { millis: u64 },
    /// Reload the price catalog.
    RefreshCatalog,
    /// Check a side's amount text.
    ExpectAmount { side: Side, amount: String },
    /// Check whether the form can be submitted.
    ExpectSubmittable { submittable: bool },
}

/// Names of the built-in scenarios.
pub const BUILTIN: &[&str] = &["basic-swap", "reverse-swap", "currency-reset", "missing-currency"];

impl Scenario {
    /// Load a built-in scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "basic-swap" => Ok(Self::basic_swap()),
            "reverse-swap" => Ok(Self::reverse_swap()),
            "currency-reset" => Ok(Self::currency_reset()),
            "missing-currency" => Ok(Self::missing_currency()),
            _ => Err(anyhow::anyhow!(
                "Unknown scenario: {} (available: {})",
                name,
                BUILTIN.join(", ")
            )),
        }
    }

    /// Load a scenario from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Type on the "from" side and wait for the quote to settle.
    fn basic_swap() -> Self {
        Self {
            name: "basic-swap".to_string(),
            description: "USD to USDC driven from the sending side".to_string(),
            steps: vec![
                select(Side::From, "USD"),
                select(Side::To, "USDC"),
                enter(Side::From, "0100"),
                expect_amount(Side::From, "100"),
                expect_amount(Side::To, "100.000000"),
                ScenarioStep::ExpectSubmittable { submittable: false },
                ScenarioStep::Wait { millis: 1100 },
                ScenarioStep::ExpectSubmittable { submittable: true },
            ],
        }
    }

    /// Type on the "to" side.
    fn reverse_swap() -> Self {
        Self {
            name: "reverse-swap".to_string(),
            description: "ETH to USD driven from the receiving side".to_string(),
            steps: vec![
                select(Side::From, "ETH"),
                select(Side::To, "USD"),
                enter(Side::To, "3291.86"),
                expect_amount(Side::From, "2.000000"),
                ScenarioStep::Wait { millis: 1100 },
                ScenarioStep::ExpectSubmittable { submittable: true },
            ],
        }
    }

    /// Switch the driven side's currency after typing.
    fn currency_reset() -> Self {
        Self {
            name: "currency-reset".to_string(),
            description: "Changing the driven currency clears both amounts".to_string(),
            steps: vec![
                select(Side::From, "USD"),
                select(Side::To, "ETH"),
                enter(Side::From, "1645.93"),
                expect_amount(Side::To, "1.000000"),
                select(Side::From, "ATOM"),
                expect_amount(Side::From, "0"),
                expect_amount(Side::To, "0"),
                ScenarioStep::Wait { millis: 1100 },
                ScenarioStep::ExpectSubmittable { submittable: false },
            ],
        }
    }

    /// Select a currency the feed does not publish.
    fn missing_currency() -> Self {
        Self {
            name: "missing-currency".to_string(),
            description: "Unknown currencies leave the form unsubmittable".to_string(),
            steps: vec![
                select(Side::From, "USD"),
                select(Side::To, "XYZ"),
                enter(Side::From, "10"),
                expect_amount(Side::To, "0"),
                ScenarioStep::RefreshCatalog,
                ScenarioStep::ExpectSubmittable { submittable: false },
            ],
        }
    }
}

fn select(side: Side, currency: &str) -> ScenarioStep {
    ScenarioStep::SelectCurrency {
        side,
        currency: currency.to_string(),
    }
}

fn enter(side: Side, amount: &str) -> ScenarioStep {
    ScenarioStep::EnterAmount {
        side,
        amount: amount.to_string(),
    }
}

fn expect_amount(side: Side, amount: &str) -> ScenarioStep {
    ScenarioStep::ExpectAmount {
        side,
        amount: amount.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenarios_load() {
        for name in BUILTIN {
            let scenario = Scenario::load(name).unwrap();
            assert_eq!(scenario.name, *name);
            assert!(!scenario.steps.is_empty());
        }
        assert!(Scenario::load("nope").is_err());
    }

    #[test]
    fn test_scenario_json() {
        let json = r#"{
            "name": "custom",
            "description": "from a file",
            "steps": [
                {"SelectCurrency": {"side": "from", "currency": "USD"}},
                {"EnterAmount": {"side": "to", "amount": "5"}},
                {"Wait": {"millis": 10}},
                "RefreshCatalog",
                {"ExpectSubmittable": {"submittable": false}}
            ]
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(
            scenario.steps[1],
            ScenarioStep::EnterAmount { side: Side::To, .. }
        ));
    }
}
