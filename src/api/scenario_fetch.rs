use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LensResult;

/// Source of raw dataset artifacts, addressed by catalog `file`.
///
/// Hosts plug in HTTP, filesystem or bundled-asset access here; the crate
/// only needs the whole document as text.
pub trait DatasetFetcher {
    fn fetch(&self, file: &str) -> impl Future<Output = LensResult<String>>;
}

/// Identity of one load request. Only the most recent ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTicket {
    pub(super) generation: u64,
    pub(super) scenario_id: String,
    pub(super) file: String,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// Completed fetch, handed back to the session.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: LensResult<String>,
}

/// What `complete_load` did with an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Applied,
    /// A newer request superseded this one; the outcome was dropped.
    Discarded,
    /// Fetch or validation failed; the previous scenario stays displayed.
    Failed(crate::error::LensError),
}

/// Fetches the artifact for `ticket` without touching the session.
///
/// Several fetches may be in flight; pass each outcome to
/// `ScenarioSession::complete_load` and stale ones are discarded there.
pub async fn fetch_scenario<F: DatasetFetcher>(fetcher: &F, ticket: LoadTicket) -> LoadOutcome {
    debug!(
        scenario_id = ticket.scenario_id(),
        file = ticket.file(),
        generation = ticket.generation(),
        "fetching scenario artifact"
    );
    let result = fetcher.fetch(ticket.file()).await;
    LoadOutcome { ticket, result }
}
