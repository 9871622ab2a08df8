//! Interns the external (string) station ids used in the source tables into
//! the small integer [`StationId`]s the core operates on.

use std::collections::HashMap;

use ridepool_core::graph::StationId;

#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    by_name: HashMap<String, StationId>,
    names: Vec<String>,
}

impl StationIndex {
    pub fn intern(&mut self, name: &str) -> StationId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = StationId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: StationId) -> &str {
        &self.names[id.0 as usize]
    }

    pub fn ids(&self) -> Vec<StationId> {
        (0..self.names.len() as u32).map(StationId).collect()
    }
}
