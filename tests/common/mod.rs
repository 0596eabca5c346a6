#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use ejection_lens::api::DatasetFetcher;
use ejection_lens::core::{ScenarioCatalog, ScenarioDataset, ScenarioEntry};
use ejection_lens::{LensError, LensResult};
use serde_json::{Value, json};
use tokio::sync::oneshot;

/// Artifact with `time = 0..n`, ejection at the last sample.
///
/// With `n = 11`: Z crosses at t=8 (20 %), dIdt at t=4 (60 %),
/// Dmin falls to its threshold at t=7 (30 %), Vmax never crosses.
pub fn artifact_value(name: &str, sample_count: usize) -> Value {
    let last = (sample_count - 1) as f64;
    let time: Vec<f64> = (0..sample_count).map(|i| i as f64).collect();
    let positions: Vec<Value> = (0..sample_count)
        .map(|i| {
            let t = i as f64;
            json!([[t, 0.0, 0.0], [0.0, t, 0.0], [0.0, 0.0, -t]])
        })
        .collect();
    json!({
        "scenario": name,
        "masses": [1.0, 1.0, 0.8],
        "time": time,
        "positions": positions,
        "scalars": {
            "I": time.iter().map(|t| t * t).collect::<Vec<_>>(),
            "dIdt": time.iter().map(|t| t * 0.5).collect::<Vec<_>>(),
            "Z": time.clone(),
            "Dmin": time.iter().map(|t| last - t).collect::<Vec<_>>(),
            "Vmax": vec![0.1; sample_count],
        },
        "ejectionTime": last,
        "firstCrossingTimes": {"Z": 8.0, "dIdt": 4.0, "Dmin": 7.0, "Vmax": null},
        "thresholds": {"Z": 8.0, "dIdt": 2.0, "Dmin": 3.0, "Vmax": 10.0},
        "placeholder": false
    })
}

pub fn artifact_json(name: &str, sample_count: usize) -> String {
    artifact_value(name, sample_count).to_string()
}

pub fn dataset(sample_count: usize) -> ScenarioDataset {
    ScenarioDataset::from_json_str(&artifact_json("fixture", sample_count)).expect("fixture dataset")
}

pub fn catalog() -> ScenarioCatalog {
    ScenarioCatalog::new(vec![
        ScenarioEntry::new("a", "Scenario A", "a.json"),
        ScenarioEntry::new("b", "Scenario B", "b.json"),
        ScenarioEntry::new("broken", "Broken", "broken.json"),
    ])
    .expect("catalog")
}

/// Serves artifacts from memory, yielding once to model a real suspension.
#[derive(Default)]
pub struct MemoryFetcher {
    files: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn with_file(mut self, file: &str, body: impl Into<String>) -> Self {
        self.files.insert(file.to_owned(), body.into());
        self
    }
}

impl DatasetFetcher for MemoryFetcher {
    async fn fetch(&self, file: &str) -> LensResult<String> {
        tokio::task::yield_now().await;
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| LensError::Load(format!("no artifact named `{file}`")))
    }
}

/// Resolves each file only when the test sends its body.
#[derive(Default)]
pub struct ChannelFetcher {
    pending: RefCell<HashMap<String, oneshot::Receiver<String>>>,
}

impl ChannelFetcher {
    pub fn expect(&self, file: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().insert(file.to_owned(), rx);
        tx
    }
}

impl DatasetFetcher for ChannelFetcher {
    async fn fetch(&self, file: &str) -> LensResult<String> {
        let receiver = self.pending.borrow_mut().remove(file);
        let receiver =
            receiver.ok_or_else(|| LensError::Load(format!("no artifact named `{file}`")))?;
        receiver
            .await
            .map_err(|_| LensError::Load(format!("fetch of `{file}` was abandoned")))
    }
}
