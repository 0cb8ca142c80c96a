//! The sysgen codegen module renders syscall stub routines, the numeric-id and
//! declaration headers, and the per-architecture build manifest from the
//! descriptor sequence produced by the loader. Rendering is pure; writing the
//! results out belongs to the workspace module.

pub mod arch;
pub mod error;
pub mod stub;
pub mod support;


use crate::codegen::arch::{Arch, GenConfig};
use crate::codegen::error::{ErrorKind, GenError, GenResult};
use crate::loader::descriptor::Syscall;

/// A generated file, identified by its path relative to the source tree root.
/// Stub files carry the architecture family they belong to; support files
/// (headers, build manifest) carry none.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: String,
    pub arch: Option<Arch>,
    pub content: String,
}

/// The ordered artifact set produced by one generation run, owned by the
/// staging phase until the reconciler promotes it.
#[derive(Debug, Default, PartialEq)]
pub struct Staging {
    artifacts: Vec<Artifact>,
}

impl Staging {
    pub fn new() -> Self {
        Staging { artifacts: vec![] }
    }

    /// Adds an artifact to the set. Two artifacts may not claim the same
    /// relative path for different architecture families, since the
    /// reconciler would otherwise delete and re-add that file in one run.
    pub fn push(&mut self, artifact: Artifact) -> GenResult<()> {
        if let Some(existing) = self.artifacts.iter().find(|a| a.path == artifact.path) {
            if existing.arch != artifact.arch {
                return Err(GenError::new(
                    ErrorKind::PathConflict,
                    format!(
                        "{} is generated for both {} and {}",
                        artifact.path,
                        arch_label(existing.arch),
                        arch_label(artifact.arch)
                    )
                    .as_str(),
                ));
            }
        }

        self.artifacts.push(artifact);
        Ok(())
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Returns the relative paths of every artifact, in generation order.
    pub fn paths(&self) -> Vec<String> {
        self.artifacts.iter().map(|a| a.path.clone()).collect()
    }
}

fn arch_label(arch: Option<Arch>) -> String {
    match arch {
        Some(a) => a.to_string(),
        None => "support files".to_string(),
    }
}

/// Renders every eligible stub plus all support files for the table, in a
/// deterministic order: per descriptor, one stub per architecture family that
/// has a number for it, then the two headers and the build manifest.
pub fn generate(syscalls: &[Syscall], config: &GenConfig) -> GenResult<Staging> {
    let mut staging = Staging::new();

    for sc in syscalls {
        for arch in &config.archs {
            if sc.supports(*arch) {
                staging.push(Artifact {
                    path: arch.stub_path(&sc.func),
                    arch: Some(*arch),
                    content: stub::render(
                        &sc.func,
                        *arch,
                        sc.param_count(),
                        sc.id_symbol().as_str(),
                        config,
                    ),
                })?;
            }
        }
    }

    staging.push(Artifact {
        path: support::SYSCALLS_HEADER_PATH.to_string(),
        arch: None,
        content: support::linux_syscalls_h(syscalls),
    })?;
    staging.push(Artifact {
        path: support::UNISTD_HEADER_PATH.to_string(),
        arch: None,
        content: support::linux_unistd_h(syscalls),
    })?;
    staging.push(Artifact {
        path: support::ARM_MAKEFILE_PATH.to_string(),
        arch: None,
        content: support::arm_syscalls_mk(syscalls),
    })?;

    Ok(staging)
}
