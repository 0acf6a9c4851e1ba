//! Core network data structures.

use hn_core::{CompId, HxId, LoopId, NodeId, ScheduleId, TankId, UnitId};

use crate::components::{Component, HeatSourceKind, TankSpec};

/// A pure hydraulic junction. Nodes hold no state; they exist so that
/// components, managers, and chains can reference exact attachment points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub id: NodeId,
    pub name: String,
}

/// What a loop is for. Determines setpoints, design deltas, and which
/// attachments the synthesis puts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopRole {
    /// One heat source + one storage tank.
    Supply,
    /// The common recirculation loop chaining all tanks.
    Source,
    /// Domestic hot water distribution.
    Dhw,
    /// Hydronic space-heating distribution.
    SpaceHeating,
}

impl LoopRole {
    pub fn as_str(self) -> &'static str {
        match self {
            LoopRole::Supply => "supply",
            LoopRole::Source => "source",
            LoopRole::Dhw => "dhw",
            LoopRole::SpaceHeating => "space heating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSide {
    Supply,
    Demand,
}

/// Which end of a half-loop a series component is pushed onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesEnd {
    Inlet,
    Outlet,
}

/// One parallel branch between a half-loop's splitter and mixer.
///
/// Components form a series chain: the first component's inlet is `entry`,
/// consecutive components share a node, the last component's outlet is
/// `exit`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub entry: NodeId,
    pub exit: NodeId,
    pub components: Vec<CompId>,
}

/// One side (supply or demand) of a plant loop.
///
/// Flow runs inlet -> inlet_segment -> splitter -> branches -> mixer ->
/// outlet_segment -> outlet. Empty segments mean a direct connection.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfLoop {
    pub inlet: NodeId,
    pub splitter: NodeId,
    pub mixer: NodeId,
    pub outlet: NodeId,
    pub inlet_segment: Vec<CompId>,
    pub branches: Vec<Branch>,
    pub outlet_segment: Vec<CompId>,
}

impl HalfLoop {
    /// All components on this half, series segments and branches flattened.
    pub fn all_components(&self) -> Vec<CompId> {
        let mut out = self.inlet_segment.clone();
        for branch in &self.branches {
            out.extend_from_slice(&branch.components);
        }
        out.extend_from_slice(&self.outlet_segment);
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantLoop {
    pub id: LoopId,
    pub name: String,
    pub role: LoopRole,
    pub setpoint: ScheduleId,
    pub design_delta_t_f: f64,
    /// None means the downstream engine autosizes the loop flow.
    pub design_flow_gpm: Option<f64>,
    pub supply: HalfLoop,
    pub demand: HalfLoop,
}

impl PlantLoop {
    pub fn half(&self, side: LoopSide) -> &HalfLoop {
        match side {
            LoopSide::Supply => &self.supply,
            LoopSide::Demand => &self.demand,
        }
    }
}

/// Tank arena entry: spec plus hydraulic attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    pub id: TankId,
    pub name: String,
    pub spec: TankSpec,
    /// Use-side port component. Required on every tank.
    pub use_port: Option<CompId>,
    /// Source-side port component. Absent on swing tanks and on tanks
    /// wrapped by an electric heat pump.
    pub source_port: Option<CompId>,
}

/// Bridges a distribution loop's supply branch to the source loop's demand
/// branch.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatExchanger {
    pub id: HxId,
    pub name: String,
    pub distribution_loop: LoopId,
    pub source_loop: LoopId,
    pub distribution_port: Option<CompId>,
    pub source_port: Option<CompId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatSourceUnit {
    pub id: UnitId,
    pub name: String,
    pub kind: HeatSourceKind,
    /// The component physically on the supply branch: the unit body for
    /// boiler/fuel-fired variants, the wrapped tank's use port for the
    /// electric variant.
    pub attached: Option<CompId>,
}

/// Constant-value schedule, degrees Fahrenheit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConstant {
    pub id: ScheduleId,
    pub name: String,
    pub value_f: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlVariable {
    Temperature,
}

/// Scheduled setpoint manager placed on a loop's supply outlet node.
///
/// `control_variable` of None is the temperature-only construction path;
/// it behaves identically to `Some(Temperature)` downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct SetpointManager {
    pub name: String,
    pub node: NodeId,
    pub schedule: ScheduleId,
    pub control_variable: Option<ControlVariable>,
}

/// Differential-temperature interlock for a supply loop.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityManager {
    pub name: String,
    pub plant_loop: LoopId,
    pub hot_node: NodeId,
    pub cold_node: NodeId,
    pub delta_t_on_f: f64,
    pub delta_t_off_f: f64,
}

/// The frozen, validated network arena returned by
/// [`crate::NetworkBuilder::build`]. Nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct PlantNetwork {
    pub(crate) nodes: Vec<FlowNode>,
    pub(crate) loops: Vec<PlantLoop>,
    pub(crate) components: Vec<Component>,
    pub(crate) tanks: Vec<Tank>,
    pub(crate) heat_exchangers: Vec<HeatExchanger>,
    pub(crate) heat_sources: Vec<HeatSourceUnit>,
    pub(crate) schedules: Vec<ScheduleConstant>,
    pub(crate) setpoint_managers: Vec<SetpointManager>,
    pub(crate) availability_managers: Vec<AvailabilityManager>,
}

impl PlantNetwork {
    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn loops(&self) -> &[PlantLoop] {
        &self.loops
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    pub fn heat_exchangers(&self) -> &[HeatExchanger] {
        &self.heat_exchangers
    }

    pub fn heat_sources(&self) -> &[HeatSourceUnit] {
        &self.heat_sources
    }

    pub fn schedules(&self) -> &[ScheduleConstant] {
        &self.schedules
    }

    pub fn setpoint_managers(&self) -> &[SetpointManager] {
        &self.setpoint_managers
    }

    pub fn availability_managers(&self) -> &[AvailabilityManager] {
        &self.availability_managers
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&FlowNode> {
        self.nodes.get(id.index() as usize)
    }

    pub fn plant_loop(&self, id: LoopId) -> Option<&PlantLoop> {
        self.loops.get(id.index() as usize)
    }

    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.index() as usize)
    }

    pub fn tank(&self, id: TankId) -> Option<&Tank> {
        self.tanks.get(id.index() as usize)
    }

    pub fn heat_exchanger(&self, id: HxId) -> Option<&HeatExchanger> {
        self.heat_exchangers.get(id.index() as usize)
    }

    pub fn heat_source(&self, id: UnitId) -> Option<&HeatSourceUnit> {
        self.heat_sources.get(id.index() as usize)
    }

    pub fn schedule(&self, id: ScheduleId) -> Option<&ScheduleConstant> {
        self.schedules.get(id.index() as usize)
    }

    /// First loop with the given role, if any.
    pub fn loop_with_role(&self, role: LoopRole) -> Option<&PlantLoop> {
        self.loops.iter().find(|l| l.role == role)
    }

    /// All loops with the given role, in creation order.
    pub fn loops_with_role(&self, role: LoopRole) -> Vec<&PlantLoop> {
        self.loops.iter().filter(|l| l.role == role).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_role_labels() {
        assert_eq!(LoopRole::Dhw.as_str(), "dhw");
        assert_eq!(LoopRole::SpaceHeating.as_str(), "space heating");
    }

    #[test]
    fn half_loop_flattens_in_flow_order() {
        use hn_core::Id;
        let half = HalfLoop {
            inlet: Id::from_index(0),
            splitter: Id::from_index(1),
            mixer: Id::from_index(2),
            outlet: Id::from_index(3),
            inlet_segment: vec![Id::from_index(0)],
            branches: vec![Branch {
                entry: Id::from_index(4),
                exit: Id::from_index(5),
                components: vec![Id::from_index(1), Id::from_index(2)],
            }],
            outlet_segment: vec![Id::from_index(3)],
        };
        let flat = half.all_components();
        let indices: Vec<u32> = flat.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
