//! Network-specific error types.

use hn_core::{CompId, HnError, HxId, LoopId, NodeId, ScheduleId, TankId, UnitId};

/// Network construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// An operation referenced a loop that doesn't exist.
    UnknownLoop { lp: LoopId },

    /// A component or manager references a node that doesn't exist.
    UnknownNode { node: NodeId },

    /// An operation referenced a component that doesn't exist.
    UnknownComponent { comp: CompId },

    /// A port references a tank that doesn't exist.
    UnknownTank { tank: TankId },

    /// A port references a heat exchanger that doesn't exist.
    UnknownHeatExchanger { hx: HxId },

    /// A port references a heat source unit that doesn't exist.
    UnknownHeatSource { unit: UnitId },

    /// A loop, manager, or heater element references a schedule that
    /// doesn't exist.
    UnknownSchedule { schedule: ScheduleId },

    /// A tank/hx/unit attachment slot was filled twice.
    PortAlreadyAttached { what: &'static str, comp: CompId },

    /// `chain_after` target is not on any parallel branch.
    ChainTargetNotFound { comp: CompId },

    /// `chain_after` target is not the last component of its branch.
    ChainNotAtTail { comp: CompId },

    /// An arena entry's ID doesn't match its position.
    MisplacedId { what: &'static str, index: usize },

    /// A series segment's node chain is inconsistent.
    BrokenSeries { lp: LoopId, comp: CompId },

    /// A branch's node chain is inconsistent.
    BrokenBranch { lp: LoopId, comp: CompId },

    /// A component appears on more than one loop position.
    ComponentReused { comp: CompId },

    /// A component is not placed on any loop.
    OrphanComponent { comp: CompId },

    /// A required attachment (tank use port, hx port, unit body) is absent.
    MissingAttachment { what: &'static str, index: usize },

    /// An attachment's component kind or placement doesn't match its owner.
    WrongAttachment { what: &'static str, comp: CompId },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::UnknownLoop { lp } => {
                write!(f, "Reference to non-existent loop {}", lp)
            }
            NetworkError::UnknownNode { node } => {
                write!(f, "Reference to non-existent node {}", node)
            }
            NetworkError::UnknownComponent { comp } => {
                write!(f, "Reference to non-existent component {}", comp)
            }
            NetworkError::UnknownTank { tank } => {
                write!(f, "Reference to non-existent tank {}", tank)
            }
            NetworkError::UnknownHeatExchanger { hx } => {
                write!(f, "Reference to non-existent heat exchanger {}", hx)
            }
            NetworkError::UnknownHeatSource { unit } => {
                write!(f, "Reference to non-existent heat source unit {}", unit)
            }
            NetworkError::UnknownSchedule { schedule } => {
                write!(f, "Reference to non-existent schedule {}", schedule)
            }
            NetworkError::PortAlreadyAttached { what, comp } => {
                write!(f, "{} already attached (component {})", what, comp)
            }
            NetworkError::ChainTargetNotFound { comp } => {
                write!(f, "Component {} is not on any parallel branch", comp)
            }
            NetworkError::ChainNotAtTail { comp } => {
                write!(f, "Component {} is not the tail of its branch", comp)
            }
            NetworkError::MisplacedId { what, index } => {
                write!(f, "{} at position {} has a mismatched ID", what, index)
            }
            NetworkError::BrokenSeries { lp, comp } => {
                write!(
                    f,
                    "Series segment on loop {} breaks at component {}",
                    lp, comp
                )
            }
            NetworkError::BrokenBranch { lp, comp } => {
                write!(f, "Branch on loop {} breaks at component {}", lp, comp)
            }
            NetworkError::ComponentReused { comp } => {
                write!(f, "Component {} placed in more than one position", comp)
            }
            NetworkError::OrphanComponent { comp } => {
                write!(f, "Component {} is not placed on any loop", comp)
            }
            NetworkError::MissingAttachment { what, index } => {
                write!(f, "{} missing on entry {}", what, index)
            }
            NetworkError::WrongAttachment { what, comp } => {
                write!(f, "{} mismatched at component {}", what, comp)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<NetworkError> for HnError {
    fn from(err: NetworkError) -> Self {
        HnError::Invariant {
            what: Box::leak(err.to_string().into_boxed_str()),
        }
    }
}
