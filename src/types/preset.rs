use serde::{Deserialize, Serialize};

use crate::ordered::Sequenced;

/// A named manufacturing workflow template: an ordered sequence of stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinePreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub steps: Vec<PresetStep>,
}

/// One slot in a preset. A station appears at most once per preset, so the
/// station id doubles as the step's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetStep {
    pub station_id: String,
    /// Display name carried along so the editor does not re-resolve it.
    pub station_name: String,
    pub position: usize,
}

impl Sequenced for PresetStep {
    fn key(&self) -> &str {
        &self.station_id
    }
    fn position(&self) -> usize {
        self.position
    }
    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordered::OrderedStore;

    #[test]
    fn test_preset_steps_hydrate_into_store() {
        let preset: PipelinePreset = serde_json::from_str(
            r#"{"id":"p1","name":"anodize line","steps":[
                {"stationId":"s2","stationName":"CNC","position":1},
                {"stationId":"s1","stationName":"Saw","position":0}
            ]}"#,
        )
        .unwrap();

        let mut store = OrderedStore::new();
        store.hydrate(preset.steps);
        // Wire order is preserved; positions are renumbered locally
        assert_eq!(store.keys_in_order(), vec!["s2", "s1"]);
        assert_eq!(store.items()[0].position, 0);
    }
}
