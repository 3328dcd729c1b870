//! # u-anpcp
//!
//! Alpha-neighbor p-center (ANPCP) facility placement: open `p` facilities so
//! that the largest distance from any user to its `alpha`-th nearest open
//! facility is as small as possible.
//!
//! ## Modules
//!
//! - [`distance`] — Distance matrix with per-row nearest ordering, ID/index maps
//! - [`models`] — Vertices, instances, solutions and objective oracles
//! - [`constructive`] — Greedy and randomized maximum-dispersion construction
//! - [`local_search`] — Alpha Fast Vertex Substitution (AFVS)
//! - [`grasp`] — GRASP loop, reactive beta, path relinking, parallel restarts
//!
//! ## Example
//!
//! ```
//! use u_anpcp::grasp::{solve, GraspConfig};
//! use u_anpcp::models::{FacilitySolution, Instance, Vertex};
//!
//! let vertices: Vec<Vertex> = (0..20)
//!     .map(|i| Vertex::new(i, (i % 5) as f64 * 10.0, (i / 5) as f64 * 10.0))
//!     .collect();
//! let instance = Instance::same_set(vertices).unwrap();
//!
//! let result = solve(&instance, GraspConfig::new(4, 2).with_seed(1)).unwrap();
//! assert_eq!(result.best_solution.size(), 4);
//! assert_eq!(result.best_solution.objective_value(), Some(result.best_objective));
//! ```

pub mod constructive;
pub mod distance;
pub mod grasp;
pub mod local_search;
pub mod models;
