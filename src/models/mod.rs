//! Domain model types for the alpha-neighbor p-center problem.
//!
//! Provides vertices, immutable problem instances, allocation records,
//! solutions for the ANPCP and the p-dispersion seeding problem, and a
//! direct objective evaluator.

mod allocation;
mod err;
mod instance;
mod objective;
mod solution;
mod vertex;

pub use allocation::{Allocation, CriticalPair};
pub use err::{
    DimensionMismatchError, DuplicateIdError, EmptyVertexSetError, InstanceError,
    UnknownFacilityError, VertexRole,
};
pub use instance::{Instance, InstanceKind};
pub use objective::alpha_objective;
pub use solution::{AnpcpSolution, FacilityPartition, FacilitySolution, PdpSolution};
pub use vertex::{Vertex, VertexId};
