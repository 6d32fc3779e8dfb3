//! # ybus-algo: Nodal Admittance Matrix Assembly
//!
//! Builds the Y-bus of a network from its branch list and renders it for display.
//!
//! ## Pipeline
//!
//! ```text
//! branches ──► validation::validate ──► YBusBuilder::build ──► AdmittanceTable
//!               (structural gate)        (stamping loop)        ("Node k" labels,
//!                                                                 5-digit cells)
//! ```
//!
//! - [`validation`]: one gate for every structural check; errors halt, warnings pass through
//! - [`ybus`]: the dense [`YBus`] matrix and its [`YBusBuilder`]
//! - [`format`]: [`format_complex`] and [`AdmittanceTable`]
//! - [`workflow`]: [`YBusAnalysis`], the gate and builder chained behind one call
//!
//! ## Example
//!
//! ```
//! use ybus_algo::{format_complex, YBusAnalysis};
//! use ybus_core::{Branch, NodeId, ShuntLocation, StampingPolicy};
//!
//! let branches = vec![Branch::new(NodeId::new(1), NodeId::new(2), 0.0, 0.1)
//!     .with_shunt(0.02, ShuntLocation::Both)];
//!
//! let report = YBusAnalysis::new(2, &branches)
//!     .with_policy(StampingPolicy::LocationSelectable)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(format_complex(report.ybus.get(0, 1)), "0.00000 + 10.00000j");
//! ```

pub mod format;
pub mod validation;
pub mod workflow;
pub mod ybus;

pub use format::{format_complex, AdmittanceTable};
pub use validation::{ensure_valid, validate};
pub use workflow::{YBusAnalysis, YBusReport};
pub use ybus::{series_admittance, YBus, YBusBuilder};
