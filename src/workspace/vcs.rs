use std::path::{Path, PathBuf};
use std::process::Command;

/// Capability interface over the version-control system backing the
/// destination tree. All paths are relative to the destination root and each
/// call covers one batch. Outcomes are not reported: reconciliation works on
/// file content alone, and VCS bookkeeping that drifts is left for the
/// operator to notice.
pub trait Vcs {
    /// Records a batch of newly created paths.
    fn stage(&mut self, paths: &[String]);

    /// Opens a batch of existing paths for modification.
    fn promote(&mut self, paths: &[String]);

    /// Removes a batch of paths.
    fn retire(&mut self, paths: &[String]);
}

/// Perforce-backed implementation: one `p4` invocation per batch, run from the
/// destination root so relative paths resolve.
pub struct P4Vcs {
    root: PathBuf,
}

impl P4Vcs {
    pub fn new(root: &Path) -> Self {
        P4Vcs {
            root: root.to_path_buf(),
        }
    }

    fn run(&self, verb: &str, paths: &[String]) {
        // Exit status and output are not inspected; content copying proceeds
        // regardless of what p4 thought of the batch.
        let _ = Command::new("p4")
            .arg(verb)
            .args(paths)
            .current_dir(&self.root)
            .output();
    }
}

impl Vcs for P4Vcs {
    fn stage(&mut self, paths: &[String]) {
        self.run("add", paths);
    }

    fn promote(&mut self, paths: &[String]) {
        self.run("edit", paths);
    }

    fn retire(&mut self, paths: &[String]) {
        self.run("delete", paths);
    }
}

/// No-op implementation for destination trees not under version control.
pub struct NullVcs;

impl Vcs for NullVcs {
    fn stage(&mut self, _paths: &[String]) {}

    fn promote(&mut self, _paths: &[String]) {}

    fn retire(&mut self, _paths: &[String]) {}
}
