use cl_core::{ContainerId, Position, StorageSite};
use cl_spatial::RecipientQuery;
use cl_task::TravelTuning;

/// Where units are taken from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferSource {
    /// A placed container the agent walks to first.
    Storage(StorageSite),
    /// A container the agent carries; no travel to the source.
    Carried(ContainerId),
}

impl TransferSource {
    pub fn container(&self) -> ContainerId {
        match self {
            TransferSource::Storage(site) => site.container,
            TransferSource::Carried(id) => *id,
        }
    }

    /// Fixed position of the source, if it has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            TransferSource::Storage(site) => Some(site.position),
            TransferSource::Carried(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferConfig {
    /// Behavior name for logs and reports.
    pub name: String,

    pub source: TransferSource,

    /// The agent's own carry container, used when the source is full on
    /// rollback.
    pub carry: Option<ContainerId>,

    /// Who may receive, and how far to look.
    pub query: RecipientQuery,

    /// Ticks between recipient scans in `can_start`.
    pub scan_interval: u64,

    pub travel: TravelTuning,
}

impl TransferConfig {
    pub const DEFAULT_SCAN_INTERVAL: u64 = 20;

    pub fn new(name: impl Into<String>, source: TransferSource, query: RecipientQuery) -> Self {
        Self {
            name:          name.into(),
            source,
            carry:         None,
            query,
            scan_interval: Self::DEFAULT_SCAN_INTERVAL,
            travel:        TravelTuning::default(),
        }
    }

    pub fn with_carry(mut self, carry: ContainerId) -> Self {
        self.carry = Some(carry);
        self
    }

    pub fn with_scan_interval(mut self, ticks: u64) -> Self {
        self.scan_interval = ticks;
        self
    }

    pub fn with_travel(mut self, travel: TravelTuning) -> Self {
        self.travel = travel;
        self
    }
}
