#![warn(missing_docs)]

//! CSG boolean operations on triangulated solids.
//!
//! A thin adapter over [`csgrs`]:
//! 1. **AABB filter**: disjoint or empty inputs take a shortcut
//! 2. **Convert**: each [`Solid`] triangle becomes a `csgrs` polygon
//! 3. **Operate**: `csgrs` runs union, difference or intersection
//! 4. **Reconstruction**: result polygons are fan-triangulated and their
//!    vertices welded
//!
//! Results are watertight up to T-junctions along split edges, which is
//! enough for volume measurement, containment queries and printing.
//!
//! [`Solid`]: articula_mesh::Solid

mod api;

pub use api::{boolean_op, difference, intersection, union, BooleanOp};
