//! hn-model: owned plant-network arena for hydronet.
//!
//! Provides:
//! - Network data structures (nodes, loops, half-loops, branches, components,
//!   tanks, heat exchangers, heat source units, schedules, managers)
//! - Incremental network builder with freeze-time validation
//!
//! # Example
//!
//! ```
//! use hn_model::{ComponentKind, LoopRole, LoopSide, NetworkBuilder, PipeSpec, SeriesEnd};
//!
//! let mut builder = NetworkBuilder::new();
//! let sched = builder.add_schedule_constant("Setpoint", 140.0);
//! let lp = builder.add_loop("Loop", LoopRole::Dhw, sched, 10.0, None);
//! builder
//!     .push_series(
//!         lp,
//!         LoopSide::Supply,
//!         SeriesEnd::Outlet,
//!         "Outlet Pipe",
//!         ComponentKind::Pipe(PipeSpec::Adiabatic),
//!     )
//!     .unwrap();
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.loops().len(), 1);
//! assert_eq!(network.components().len(), 1);
//! ```

pub mod builder;
pub mod components;
pub mod error;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use components::{
    BaseboardSpec, BoilerFlowMode, BoilerSpec, Component, ComponentKind, FuelType, GahpSpec,
    HeatSourceKind, HeaterElement, HxSide, PipeSpec, PumpSpec, TankDuty, TankSide, TankSpec,
    WaterUseSpec,
};
pub use error::NetworkError;
pub use network::{
    AvailabilityManager, Branch, ControlVariable, FlowNode, HalfLoop, HeatExchanger,
    HeatSourceUnit, LoopRole, LoopSide, PlantLoop, PlantNetwork, ScheduleConstant, SeriesEnd,
    SetpointManager, Tank,
};
