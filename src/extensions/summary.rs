use serde::{Deserialize, Serialize};

use crate::core::{LeadTime, ScenarioAnalysis, SignalName};

/// One footer entry: how much warning a signal gave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeLine {
    pub signal: SignalName,
    pub lead_time: LeadTime,
    pub label: String,
}

/// Footer summary derived from a scenario analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeSummary {
    pub lines: Vec<LeadTimeLine>,
    /// Signal with the largest lead, if any signal warned at all.
    pub earliest_warning: Option<SignalName>,
    pub has_integrity_issues: bool,
}

impl LeadTimeSummary {
    #[must_use]
    pub fn from_analysis(analysis: &ScenarioAnalysis) -> Self {
        let lines = analysis
            .iter()
            .map(|entry| LeadTimeLine {
                signal: entry.signal,
                lead_time: entry.lead_time,
                label: format_lead_time(entry.signal, entry.lead_time),
            })
            .collect();
        Self {
            lines,
            earliest_warning: analysis.earliest_warning().map(|entry| entry.signal),
            has_integrity_issues: analysis.has_integrity_issues(),
        }
    }

    #[must_use]
    pub fn line(&self, signal: SignalName) -> Option<&LeadTimeLine> {
        self.lines.iter().find(|line| line.signal == signal)
    }
}

/// `"Z: 20.0% lead"` or `"Z: no warning"`.
#[must_use]
pub fn format_lead_time(signal: SignalName, lead_time: LeadTime) -> String {
    match lead_time {
        LeadTime::Percent(value) => format!("{signal}: {value:.1}% lead"),
        LeadTime::NoWarning => format!("{signal}: no warning"),
    }
}
