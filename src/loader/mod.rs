//! The loader is responsible for turning the raw `SYSCALLS.TXT` table into the
//! ordered sequence of syscall descriptors that drives stub and header generation.

pub mod descriptor;
pub mod error;
pub mod parse;

mod tests;
