use crate::config::SimConfig;
use crate::metrics::MetricsSnapshot;
use crate::model::run;
use crate::Result;

/// A labeled parameter set for one kernel invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub label: String,
    pub config: SimConfig,
}

impl Scenario {
    pub fn new(label: impl Into<String>, config: SimConfig) -> Self {
        Self {
            label: label.into(),
            config,
        }
    }
}

/// One scenario's results, paired with its label for tabulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub label: String,
    pub snapshot: MetricsSnapshot,
}

/// Run the kernel once per scenario and collect the outcomes in order.
///
/// Each scenario gets a fresh simulation seeded from its own config, so
/// scenarios sharing a seed see identical variate sequences and differ only
/// in the parameters under comparison. Presentation of the outcomes stays
/// with the caller.
///
/// # Errors
///
/// Stops at the first scenario whose configuration is rejected or whose run
/// fails.
pub fn run_scenarios(scenarios: &[Scenario]) -> Result<Vec<ScenarioOutcome>> {
    scenarios
        .iter()
        .map(|scenario| {
            run(&scenario.config).map(|snapshot| ScenarioOutcome {
                label: scenario.label.clone(),
                snapshot,
            })
        })
        .collect()
}

/// Build the classic comparison sweep: `base` re-run with each rider count.
pub fn rider_sweep(base: &SimConfig, rider_counts: &[u32]) -> Vec<Scenario> {
    rider_counts
        .iter()
        .map(|&riders| {
            Scenario::new(
                format!("riders={riders}"),
                base.clone().with_riders(riders),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_labels_and_configs_line_up() {
        let base = SimConfig::default().with_seed(5);
        let scenarios = rider_sweep(&base, &[1, 2, 4]);
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].label, "riders=1");
        assert_eq!(scenarios[2].config.riders, 4);
        // Everything but the rider count stays fixed.
        assert_eq!(scenarios[1].config.seed, 5);
        assert_eq!(scenarios[1].config.horizon, base.horizon);
    }

    #[test]
    fn first_invalid_scenario_aborts_the_batch() {
        let scenarios = vec![
            Scenario::new("ok", SimConfig::default()),
            Scenario::new("broken", SimConfig::default().with_riders(0)),
        ];
        assert!(run_scenarios(&scenarios).is_err());
    }
}
