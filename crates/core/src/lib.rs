//! # Cutlist Core
//!
//! One-dimensional cutting plan optimizer for bar stock, tubing and lumber.
//!
//! Given the parts you need and the stock you have, the optimizer assigns every
//! part to a stock piece, accounting for the saw kerf lost between adjacent
//! cuts, and synthesizes default-length stock when the supplied pieces run out.
//!
//! ## Pipeline
//!
//! 1. **Initial allocation** ([`allocator`]): First-Fit Decreasing over the
//!    supplied stock, followed by overflow pieces of the default length.
//! 2. **Waste balancing** ([`balancer`]): a bounded local search that moves
//!    short cuts from the piece with the most waste to the piece with the least.
//! 3. **Layout finalization** ([`layout`]): canonical cut positions and leftover
//!    lengths for every stock piece.
//!
//! The result is a greedy heuristic, not an exact bin-packing solution.
//!
//! ## Quick Start
//!
//! ```rust
//! use cutlist_core::{optimize, Part, StockPiece};
//!
//! let parts = vec![Part::new("p1", 1000.0), Part::new("p2", 1000.0)];
//! let stock = vec![StockPiece::new("s1", 3000.0)];
//!
//! let plan = optimize(&parts, &stock, 3.0, 3600.0).unwrap();
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan.assignments[0].remaining_length, 997.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod allocator;
pub mod balancer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod naming;
pub mod optimizer;
pub mod plan;

// Re-exports
pub use allocator::{allocate, Allocation};
pub use balancer::{balance, BalanceReport, BalanceStop};
pub use catalog::{parse_lengths, CutList, LengthGroup, PartList, StockGroup, StockList};
pub use config::{OptimizerConfig, DEFAULT_KERF, DEFAULT_STOCK_LENGTH};
pub use error::{Error, Result};
pub use layout::finalize;
pub use model::{Part, PartId, StockId, StockPiece};
pub use naming::column_name;
pub use optimizer::{optimize, Optimizer};
pub use plan::{Cut, CuttingAssignment, Plan, PlanSummary, WasteEntry};
