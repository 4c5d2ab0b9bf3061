use crate::{primitives::Identity, scoring::StandingRecord};

/// Reward standing of a single identity.
///
/// Only the orchestrator writes to it, and only after a confirmed transfer.
#[derive(Debug, Clone, Default)]
pub struct PointsLedger {
    owner: Option<Identity>,
    standing: Option<StandingRecord>,
}

impl PointsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the record that belongs to `identity`. Matching is exact on the canonical
    /// identity, never on the display name.
    pub fn reconcile(
        identity: &Identity,
        records: impl IntoIterator<Item = StandingRecord>,
    ) -> Option<StandingRecord> {
        records
            .into_iter()
            .find(|record| &record.identity == identity)
    }

    pub fn apply(&mut self, identity: &Identity, standing: Option<StandingRecord>) {
        if self.owner.as_ref() != Some(identity) {
            self.owner = Some(identity.clone());
        }
        self.standing = standing.filter(|record| &record.identity == identity);
    }

    pub fn standing_for(&self, identity: &Identity) -> Option<&StandingRecord> {
        match &self.owner {
            Some(owner) if owner == identity => self.standing.as_ref(),
            _ => None,
        }
    }

    pub fn standing(&self) -> Option<&StandingRecord> {
        self.standing.as_ref()
    }

    pub fn owner(&self) -> Option<&Identity> {
        self.owner.as_ref()
    }

    pub fn clear(&mut self) {
        self.owner = None;
        self.standing = None;
    }
}
