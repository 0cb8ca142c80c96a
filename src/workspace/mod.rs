//! The workspace module makes the destination tree's generated files match the
//! staged artifact set: it enumerates existing stubs, computes the minimal
//! add/edit/delete change set by byte comparison, and applies it while driving
//! a version-control capability.

pub mod error;
pub mod reconcile;
pub mod vcs;

mod tests;
