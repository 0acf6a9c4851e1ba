//! Network validation logic.

use hn_core::{CompId, HnResult, HxId, LoopId, NodeId, TankId};

use crate::components::{ComponentKind, HeatSourceKind, HxSide, TankSide};
use crate::error::NetworkError;
use crate::network::{LoopSide, PlantNetwork};

/// Where a component sits: which loop, which side, branch or series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    lp: LoopId,
    side: LoopSide,
    on_branch: bool,
}

/// Validate the frozen arena: IDs match positions, every reference
/// resolves, every series/branch chain is node-consistent, and every
/// tank/heat-exchanger/heat-source attachment points at a component of
/// the right kind in the right place.
pub(crate) fn validate(net: &PlantNetwork) -> HnResult<()> {
    check_ids(net)?;
    check_component_nodes(net)?;
    let placements = check_loops(net)?;
    check_placement_complete(net, &placements)?;
    check_tanks(net)?;
    check_heat_exchangers(net, &placements)?;
    check_heat_sources(net)?;
    check_managers(net)?;
    Ok(())
}

fn check_ids(net: &PlantNetwork) -> HnResult<()> {
    for (i, n) in net.nodes.iter().enumerate() {
        if n.id.index() as usize != i {
            return Err(NetworkError::MisplacedId {
                what: "node",
                index: i,
            }
            .into());
        }
    }
    for (i, l) in net.loops.iter().enumerate() {
        if l.id.index() as usize != i {
            return Err(NetworkError::MisplacedId {
                what: "loop",
                index: i,
            }
            .into());
        }
    }
    for (i, c) in net.components.iter().enumerate() {
        if c.id.index() as usize != i {
            return Err(NetworkError::MisplacedId {
                what: "component",
                index: i,
            }
            .into());
        }
    }
    for (i, t) in net.tanks.iter().enumerate() {
        if t.id.index() as usize != i {
            return Err(NetworkError::MisplacedId {
                what: "tank",
                index: i,
            }
            .into());
        }
    }
    for (i, h) in net.heat_exchangers.iter().enumerate() {
        if h.id.index() as usize != i {
            return Err(NetworkError::MisplacedId {
                what: "heat exchanger",
                index: i,
            }
            .into());
        }
    }
    for (i, u) in net.heat_sources.iter().enumerate() {
        if u.id.index() as usize != i {
            return Err(NetworkError::MisplacedId {
                what: "heat source",
                index: i,
            }
            .into());
        }
    }
    for (i, s) in net.schedules.iter().enumerate() {
        if s.id.index() as usize != i {
            return Err(NetworkError::MisplacedId {
                what: "schedule",
                index: i,
            }
            .into());
        }
    }
    Ok(())
}

fn check_component_nodes(net: &PlantNetwork) -> HnResult<()> {
    let n = net.nodes.len();
    for c in &net.components {
        for node in [c.inlet, c.outlet] {
            if node.index() as usize >= n {
                return Err(NetworkError::UnknownNode { node }.into());
            }
        }
    }
    Ok(())
}

fn check_loops(net: &PlantNetwork) -> HnResult<Vec<Option<Placement>>> {
    let mut placements: Vec<Option<Placement>> = vec![None; net.components.len()];

    for l in &net.loops {
        if l.setpoint.index() as usize >= net.schedules.len() {
            return Err(NetworkError::UnknownSchedule {
                schedule: l.setpoint,
            }
            .into());
        }

        for side in [LoopSide::Supply, LoopSide::Demand] {
            let half = l.half(side);
            for node in [half.inlet, half.splitter, half.mixer, half.outlet] {
                if node.index() as usize >= net.nodes.len() {
                    return Err(NetworkError::UnknownNode { node }.into());
                }
            }

            check_chain(
                net,
                l.id,
                &half.inlet_segment,
                half.inlet,
                half.splitter,
                false,
            )?;
            for branch in &half.branches {
                for node in [branch.entry, branch.exit] {
                    if node.index() as usize >= net.nodes.len() {
                        return Err(NetworkError::UnknownNode { node }.into());
                    }
                }
                check_chain(net, l.id, &branch.components, branch.entry, branch.exit, true)?;
            }
            check_chain(
                net,
                l.id,
                &half.outlet_segment,
                half.mixer,
                half.outlet,
                false,
            )?;

            for cid in half.all_components() {
                let slot = &mut placements[cid.index() as usize];
                if slot.is_some() {
                    return Err(NetworkError::ComponentReused { comp: cid }.into());
                }
                *slot = Some(Placement {
                    lp: l.id,
                    side,
                    on_branch: half.branches.iter().any(|b| b.components.contains(&cid)),
                });
            }
        }
    }

    Ok(placements)
}

/// A chain is consistent when the first inlet, shared interior nodes, and
/// the last outlet line up with the given endpoints. Empty chains are a
/// direct connection.
fn check_chain(
    net: &PlantNetwork,
    lp: LoopId,
    comps: &[CompId],
    from: NodeId,
    to: NodeId,
    on_branch: bool,
) -> HnResult<()> {
    if comps.is_empty() {
        return Ok(());
    }

    let broken = |comp: CompId| -> HnResult<()> {
        if on_branch {
            Err(NetworkError::BrokenBranch { lp, comp }.into())
        } else {
            Err(NetworkError::BrokenSeries { lp, comp }.into())
        }
    };

    let mut expect = from;
    for &cid in comps {
        let comp = net
            .component(cid)
            .ok_or(NetworkError::UnknownComponent { comp: cid })?;
        if comp.inlet != expect {
            return broken(cid);
        }
        expect = comp.outlet;
    }
    if expect != to {
        return broken(comps[comps.len() - 1]);
    }
    Ok(())
}

fn check_placement_complete(
    net: &PlantNetwork,
    placements: &[Option<Placement>],
) -> HnResult<()> {
    for c in &net.components {
        if placements[c.id.index() as usize].is_none() {
            return Err(NetworkError::OrphanComponent { comp: c.id }.into());
        }
    }
    Ok(())
}

fn check_tanks(net: &PlantNetwork) -> HnResult<()> {
    for (i, tank) in net.tanks.iter().enumerate() {
        for element in [&tank.spec.heater_upper, &tank.spec.heater_lower] {
            if element.setpoint.index() as usize >= net.schedules.len() {
                return Err(NetworkError::UnknownSchedule {
                    schedule: element.setpoint,
                }
                .into());
            }
        }

        let use_port = tank.use_port.ok_or(NetworkError::MissingAttachment {
            what: "tank use port",
            index: i,
        })?;
        check_tank_port(net, tank.id, use_port, TankSide::Use)?;
        if let Some(source_port) = tank.source_port {
            check_tank_port(net, tank.id, source_port, TankSide::Source)?;
        }
    }
    Ok(())
}

fn check_tank_port(net: &PlantNetwork, tank: TankId, comp: CompId, side: TankSide) -> HnResult<()> {
    let c = net
        .component(comp)
        .ok_or(NetworkError::UnknownComponent { comp })?;
    match &c.kind {
        ComponentKind::TankPort {
            tank: owner,
            side: port_side,
        } if *owner == tank && *port_side == side => Ok(()),
        _ => Err(NetworkError::WrongAttachment {
            what: "tank port",
            comp,
        }
        .into()),
    }
}

fn check_heat_exchangers(
    net: &PlantNetwork,
    placements: &[Option<Placement>],
) -> HnResult<()> {
    for (i, hx) in net.heat_exchangers.iter().enumerate() {
        for lp in [hx.distribution_loop, hx.source_loop] {
            if lp.index() as usize >= net.loops.len() {
                return Err(NetworkError::UnknownLoop { lp }.into());
            }
        }

        let dist = hx.distribution_port.ok_or(NetworkError::MissingAttachment {
            what: "heat exchanger distribution port",
            index: i,
        })?;
        let source = hx.source_port.ok_or(NetworkError::MissingAttachment {
            what: "heat exchanger source port",
            index: i,
        })?;

        check_hx_port(net, hx.id, dist, HxSide::Distribution)?;
        check_hx_port(net, hx.id, source, HxSide::Source)?;

        // The bridge only makes sense between a distribution supply branch
        // and the source loop's demand branch.
        let dist_ok = placements[dist.index() as usize]
            == Some(Placement {
                lp: hx.distribution_loop,
                side: LoopSide::Supply,
                on_branch: true,
            });
        if !dist_ok {
            return Err(NetworkError::WrongAttachment {
                what: "heat exchanger distribution port placement",
                comp: dist,
            }
            .into());
        }
        let source_ok = placements[source.index() as usize]
            == Some(Placement {
                lp: hx.source_loop,
                side: LoopSide::Demand,
                on_branch: true,
            });
        if !source_ok {
            return Err(NetworkError::WrongAttachment {
                what: "heat exchanger source port placement",
                comp: source,
            }
            .into());
        }
    }
    Ok(())
}

fn check_hx_port(net: &PlantNetwork, hx: HxId, comp: CompId, side: HxSide) -> HnResult<()> {
    let c = net
        .component(comp)
        .ok_or(NetworkError::UnknownComponent { comp })?;
    match &c.kind {
        ComponentKind::HxPort {
            hx: owner,
            side: port_side,
        } if *owner == hx && *port_side == side => Ok(()),
        _ => Err(NetworkError::WrongAttachment {
            what: "heat exchanger port",
            comp,
        }
        .into()),
    }
}

fn check_heat_sources(net: &PlantNetwork) -> HnResult<()> {
    for (i, unit) in net.heat_sources.iter().enumerate() {
        let attached = unit.attached.ok_or(NetworkError::MissingAttachment {
            what: "heat source attachment",
            index: i,
        })?;
        let comp = net
            .component(attached)
            .ok_or(NetworkError::UnknownComponent { comp: attached })?;

        match &unit.kind {
            HeatSourceKind::Boiler(_) | HeatSourceKind::FuelFiredHeatPump(_) => match &comp.kind {
                ComponentKind::HeatSourcePort { unit: owner } if *owner == unit.id => {}
                _ => {
                    return Err(NetworkError::WrongAttachment {
                        what: "heat source body",
                        comp: attached,
                    }
                    .into())
                }
            },
            HeatSourceKind::ElectricHeatPumpWithTank { tank, .. } => {
                let entry = net
                    .tank(*tank)
                    .ok_or(NetworkError::UnknownTank { tank: *tank })?;
                if entry.use_port != Some(attached) {
                    return Err(NetworkError::WrongAttachment {
                        what: "wrapped tank attachment",
                        comp: attached,
                    }
                    .into());
                }
            }
        }
    }
    Ok(())
}

fn check_managers(net: &PlantNetwork) -> HnResult<()> {
    for spm in &net.setpoint_managers {
        if spm.node.index() as usize >= net.nodes.len() {
            return Err(NetworkError::UnknownNode { node: spm.node }.into());
        }
        if spm.schedule.index() as usize >= net.schedules.len() {
            return Err(NetworkError::UnknownSchedule {
                schedule: spm.schedule,
            }
            .into());
        }
    }
    for avm in &net.availability_managers {
        if avm.plant_loop.index() as usize >= net.loops.len() {
            return Err(NetworkError::UnknownLoop { lp: avm.plant_loop }.into());
        }
        for node in [avm.hot_node, avm.cold_node] {
            if node.index() as usize >= net.nodes.len() {
                return Err(NetworkError::UnknownNode { node }.into());
            }
        }
    }
    Ok(())
}
