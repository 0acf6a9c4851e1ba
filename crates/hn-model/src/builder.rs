//! Incremental network builder.

use hn_core::{CompId, HnResult, HxId, LoopId, NodeId, ScheduleId, TankId, UnitId};

use crate::components::{Component, ComponentKind, HeatSourceKind, HxSide, TankSide, TankSpec};
use crate::error::NetworkError;
use crate::network::{
    AvailabilityManager, Branch, ControlVariable, FlowNode, HalfLoop, HeatExchanger,
    HeatSourceUnit, LoopRole, LoopSide, PlantLoop, PlantNetwork, ScheduleConstant, SeriesEnd,
    SetpointManager, Tank,
};
use crate::validate;

/// Builder for constructing a plant network incrementally.
///
/// Loops are created empty and populated through three placement
/// operations: `push_series` (onto a half-loop's inlet or outlet segment),
/// `add_parallel` (a new branch between splitter and mixer), and
/// `chain_after` (splice downstream of a branch tail, sharing its outlet
/// node, which is the tank-chaining primitive). Call `build()` to validate
/// and freeze the arena into an immutable [`PlantNetwork`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<FlowNode>,
    loops: Vec<PlantLoop>,
    components: Vec<Component>,
    tanks: Vec<Tank>,
    heat_exchangers: Vec<HeatExchanger>,
    heat_sources: Vec<HeatSourceUnit>,
    schedules: Vec<ScheduleConstant>,
    setpoint_managers: Vec<SetpointManager>,
    availability_managers: Vec<AvailabilityManager>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free node and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(FlowNode {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a constant-value schedule (degrees Fahrenheit).
    pub fn add_schedule_constant(&mut self, name: impl Into<String>, value_f: f64) -> ScheduleId {
        let id = ScheduleId::from_index(self.schedules.len() as u32);
        self.schedules.push(ScheduleConstant {
            id,
            name: name.into(),
            value_f,
        });
        id
    }

    /// Add an empty loop with its eight boundary/junction nodes.
    pub fn add_loop(
        &mut self,
        name: impl Into<String>,
        role: LoopRole,
        setpoint: ScheduleId,
        design_delta_t_f: f64,
        design_flow_gpm: Option<f64>,
    ) -> LoopId {
        let name = name.into();
        let supply = self.make_half(&name, "Supply");
        let demand = self.make_half(&name, "Demand");
        let id = LoopId::from_index(self.loops.len() as u32);
        self.loops.push(PlantLoop {
            id,
            name,
            role,
            setpoint,
            design_delta_t_f,
            design_flow_gpm,
            supply,
            demand,
        });
        id
    }

    fn make_half(&mut self, loop_name: &str, side: &str) -> HalfLoop {
        let inlet = self.add_node(format!("{} {} Inlet Node", loop_name, side));
        let splitter = self.add_node(format!("{} {} Splitter Node", loop_name, side));
        let mixer = self.add_node(format!("{} {} Mixer Node", loop_name, side));
        let outlet = self.add_node(format!("{} {} Outlet Node", loop_name, side));
        HalfLoop {
            inlet,
            splitter,
            mixer,
            outlet,
            inlet_segment: Vec::new(),
            branches: Vec::new(),
            outlet_segment: Vec::new(),
        }
    }

    /// Push a component onto a half-loop's series segment.
    ///
    /// The first push on the inlet segment spans inlet -> splitter; later
    /// pushes splice in downstream of the previous tail. The outlet
    /// segment behaves symmetrically between mixer and outlet.
    pub fn push_series(
        &mut self,
        lp: LoopId,
        side: LoopSide,
        end: SeriesEnd,
        name: impl Into<String>,
        kind: ComponentKind,
    ) -> HnResult<CompId> {
        let name = name.into();
        let li = lp.index() as usize;
        if li >= self.loops.len() {
            return Err(NetworkError::UnknownLoop { lp }.into());
        }

        let (first_node, last_node, tail) = {
            let half = self.loops[li].half(side);
            match end {
                SeriesEnd::Inlet => (
                    half.inlet,
                    half.splitter,
                    half.inlet_segment.last().copied(),
                ),
                SeriesEnd::Outlet => (
                    half.mixer,
                    half.outlet,
                    half.outlet_segment.last().copied(),
                ),
            }
        };

        let comp = match tail {
            None => self.new_component(name, first_node, last_node, kind)?,
            Some(prev) => {
                let mid = self.add_node(format!("{} Inlet Node", name));
                self.components[prev.index() as usize].outlet = mid;
                self.new_component(name, mid, last_node, kind)?
            }
        };

        let half = self.half_mut(li, side);
        match end {
            SeriesEnd::Inlet => half.inlet_segment.push(comp),
            SeriesEnd::Outlet => half.outlet_segment.push(comp),
        }
        Ok(comp)
    }

    /// Add a component as a new parallel branch between a half-loop's
    /// splitter and mixer, with fresh entry/exit nodes.
    pub fn add_parallel(
        &mut self,
        lp: LoopId,
        side: LoopSide,
        name: impl Into<String>,
        kind: ComponentKind,
    ) -> HnResult<CompId> {
        let name = name.into();
        let li = lp.index() as usize;
        if li >= self.loops.len() {
            return Err(NetworkError::UnknownLoop { lp }.into());
        }

        let entry = self.add_node(format!("{} Inlet Node", name));
        let exit = self.add_node(format!("{} Outlet Node", name));
        let comp = self.new_component(name, entry, exit, kind)?;
        self.half_mut(li, side).branches.push(Branch {
            entry,
            exit,
            components: vec![comp],
        });
        Ok(comp)
    }

    /// Splice a component downstream of `prev` on its branch.
    ///
    /// The new component's inlet IS `prev`'s outlet node, so downstream
    /// consumers can rely on the two being joined at that exact node.
    /// `prev` must be the current tail of a parallel branch.
    pub fn chain_after(
        &mut self,
        prev: CompId,
        name: impl Into<String>,
        kind: ComponentKind,
    ) -> HnResult<CompId> {
        let name = name.into();
        if prev.index() as usize >= self.components.len() {
            return Err(NetworkError::UnknownComponent { comp: prev }.into());
        }

        let mut found: Option<(usize, LoopSide, usize)> = None;
        let mut on_branch = false;
        'outer: for (li, l) in self.loops.iter().enumerate() {
            for side in [LoopSide::Supply, LoopSide::Demand] {
                for (bi, branch) in l.half(side).branches.iter().enumerate() {
                    if branch.components.contains(&prev) {
                        on_branch = true;
                        if branch.components.last() == Some(&prev) {
                            found = Some((li, side, bi));
                        }
                        break 'outer;
                    }
                }
            }
        }
        let (li, side, bi) = match (found, on_branch) {
            (Some(f), _) => f,
            (None, true) => return Err(NetworkError::ChainNotAtTail { comp: prev }.into()),
            (None, false) => return Err(NetworkError::ChainTargetNotFound { comp: prev }.into()),
        };

        let shared = self.components[prev.index() as usize].outlet;
        let exit = self.add_node(format!("{} Outlet Node", name));
        let comp = self.new_component(name, shared, exit, kind)?;
        let branch = &mut self.half_mut(li, side).branches[bi];
        branch.components.push(comp);
        branch.exit = exit;
        Ok(comp)
    }

    /// Add a tank entry with no attachments yet.
    pub fn add_tank(&mut self, name: impl Into<String>, spec: TankSpec) -> TankId {
        let id = TankId::from_index(self.tanks.len() as u32);
        self.tanks.push(Tank {
            id,
            name: name.into(),
            spec,
            use_port: None,
            source_port: None,
        });
        id
    }

    /// Add a heat exchanger entry bridging two loops.
    pub fn add_heat_exchanger(
        &mut self,
        name: impl Into<String>,
        distribution_loop: LoopId,
        source_loop: LoopId,
    ) -> HnResult<HxId> {
        for lp in [distribution_loop, source_loop] {
            if lp.index() as usize >= self.loops.len() {
                return Err(NetworkError::UnknownLoop { lp }.into());
            }
        }
        let id = HxId::from_index(self.heat_exchangers.len() as u32);
        self.heat_exchangers.push(HeatExchanger {
            id,
            name: name.into(),
            distribution_loop,
            source_loop,
            distribution_port: None,
            source_port: None,
        });
        Ok(id)
    }

    /// Add a heat source unit entry, not yet attached to any loop.
    pub fn add_heat_source(
        &mut self,
        name: impl Into<String>,
        kind: HeatSourceKind,
    ) -> HnResult<UnitId> {
        if let HeatSourceKind::ElectricHeatPumpWithTank { tank, .. } = &kind {
            if tank.index() as usize >= self.tanks.len() {
                return Err(NetworkError::UnknownTank { tank: *tank }.into());
            }
        }
        let id = UnitId::from_index(self.heat_sources.len() as u32);
        self.heat_sources.push(HeatSourceUnit {
            id,
            name: name.into(),
            kind,
            attached: None,
        });
        Ok(id)
    }

    /// Record which component stands in for a unit on its supply branch.
    ///
    /// Boiler and fuel-fired units register themselves when their
    /// `HeatSourcePort` component is placed; this is for the electric
    /// variant, whose loop presence is its wrapped tank's use port.
    pub fn attach_heat_source(&mut self, unit: UnitId, comp: CompId) -> HnResult<()> {
        if comp.index() as usize >= self.components.len() {
            return Err(NetworkError::UnknownComponent { comp }.into());
        }
        let entry = self
            .heat_sources
            .get_mut(unit.index() as usize)
            .ok_or(NetworkError::UnknownHeatSource { unit })?;
        if entry.attached.is_some() {
            return Err(NetworkError::PortAlreadyAttached {
                what: "heat source attachment",
                comp,
            }
            .into());
        }
        entry.attached = Some(comp);
        Ok(())
    }

    /// Place a scheduled setpoint manager on a node.
    pub fn add_setpoint_manager(
        &mut self,
        name: impl Into<String>,
        node: NodeId,
        schedule: ScheduleId,
        control_variable: Option<ControlVariable>,
    ) -> HnResult<()> {
        if node.index() as usize >= self.nodes.len() {
            return Err(NetworkError::UnknownNode { node }.into());
        }
        if schedule.index() as usize >= self.schedules.len() {
            return Err(NetworkError::UnknownSchedule { schedule }.into());
        }
        self.setpoint_managers.push(SetpointManager {
            name: name.into(),
            node,
            schedule,
            control_variable,
        });
        Ok(())
    }

    /// Place a differential-temperature availability manager on a loop.
    pub fn add_availability_manager(
        &mut self,
        name: impl Into<String>,
        plant_loop: LoopId,
        hot_node: NodeId,
        cold_node: NodeId,
        delta_t_on_f: f64,
        delta_t_off_f: f64,
    ) -> HnResult<()> {
        if plant_loop.index() as usize >= self.loops.len() {
            return Err(NetworkError::UnknownLoop { lp: plant_loop }.into());
        }
        for node in [hot_node, cold_node] {
            if node.index() as usize >= self.nodes.len() {
                return Err(NetworkError::UnknownNode { node }.into());
            }
        }
        self.availability_managers.push(AvailabilityManager {
            name: name.into(),
            plant_loop,
            hot_node,
            cold_node,
            delta_t_on_f,
            delta_t_off_f,
        });
        Ok(())
    }

    /// Get a loop by ID (returns None if ID out of bounds).
    pub fn plant_loop(&self, id: LoopId) -> Option<&PlantLoop> {
        self.loops.get(id.index() as usize)
    }

    /// Get a component by ID (returns None if ID out of bounds).
    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.index() as usize)
    }

    /// Get a tank by ID (returns None if ID out of bounds).
    pub fn tank(&self, id: TankId) -> Option<&Tank> {
        self.tanks.get(id.index() as usize)
    }

    /// Mutable access to a tank's spec, for late sizing adjustments before
    /// the arena is frozen.
    pub fn tank_spec_mut(&mut self, id: TankId) -> Option<&mut TankSpec> {
        self.tanks.get_mut(id.index() as usize).map(|t| &mut t.spec)
    }

    /// Build and validate the network, returning an immutable
    /// [`PlantNetwork`].
    pub fn build(self) -> HnResult<PlantNetwork> {
        let net = PlantNetwork {
            nodes: self.nodes,
            loops: self.loops,
            components: self.components,
            tanks: self.tanks,
            heat_exchangers: self.heat_exchangers,
            heat_sources: self.heat_sources,
            schedules: self.schedules,
            setpoint_managers: self.setpoint_managers,
            availability_managers: self.availability_managers,
        };
        validate::validate(&net)?;
        Ok(net)
    }

    fn half_mut(&mut self, li: usize, side: LoopSide) -> &mut HalfLoop {
        match side {
            LoopSide::Supply => &mut self.loops[li].supply,
            LoopSide::Demand => &mut self.loops[li].demand,
        }
    }

    fn new_component(
        &mut self,
        name: String,
        inlet: NodeId,
        outlet: NodeId,
        kind: ComponentKind,
    ) -> HnResult<CompId> {
        let id = CompId::from_index(self.components.len() as u32);
        self.register_attachment(id, &kind)?;
        self.components.push(Component {
            id,
            name,
            inlet,
            outlet,
            kind,
        });
        Ok(id)
    }

    /// Patch the owning arena entry when a port component is placed.
    fn register_attachment(&mut self, comp: CompId, kind: &ComponentKind) -> HnResult<()> {
        match kind {
            ComponentKind::TankPort { tank, side } => {
                let entry = self
                    .tanks
                    .get_mut(tank.index() as usize)
                    .ok_or(NetworkError::UnknownTank { tank: *tank })?;
                let slot = match side {
                    TankSide::Use => &mut entry.use_port,
                    TankSide::Source => &mut entry.source_port,
                };
                if slot.is_some() {
                    return Err(NetworkError::PortAlreadyAttached {
                        what: "tank port",
                        comp,
                    }
                    .into());
                }
                *slot = Some(comp);
            }
            ComponentKind::HxPort { hx, side } => {
                let entry = self
                    .heat_exchangers
                    .get_mut(hx.index() as usize)
                    .ok_or(NetworkError::UnknownHeatExchanger { hx: *hx })?;
                let slot = match side {
                    HxSide::Distribution => &mut entry.distribution_port,
                    HxSide::Source => &mut entry.source_port,
                };
                if slot.is_some() {
                    return Err(NetworkError::PortAlreadyAttached {
                        what: "heat exchanger port",
                        comp,
                    }
                    .into());
                }
                *slot = Some(comp);
            }
            ComponentKind::HeatSourcePort { unit } => {
                let entry = self
                    .heat_sources
                    .get_mut(unit.index() as usize)
                    .ok_or(NetworkError::UnknownHeatSource { unit: *unit })?;
                if entry.attached.is_some() {
                    return Err(NetworkError::PortAlreadyAttached {
                        what: "heat source attachment",
                        comp,
                    }
                    .into());
                }
                entry.attached = Some(comp);
            }
            _ => {}
        }
        Ok(())
    }
}
