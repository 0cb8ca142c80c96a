#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::codegen::arch::Arch;
    use crate::codegen::{Artifact, Staging};
    use crate::workspace::reconcile::{
        apply, classify, enumerate_stubs, write_staging, ChangeSet,
    };
    use crate::workspace::vcs::Vcs;

    /// Vcs implementation that records every batch it was handed, so
    /// reconciliation can be verified without a live version-control system.
    #[derive(Default)]
    struct RecordingVcs {
        staged: Vec<Vec<String>>,
        promoted: Vec<Vec<String>>,
        retired: Vec<Vec<String>>,
    }

    impl Vcs for RecordingVcs {
        fn stage(&mut self, paths: &[String]) {
            self.staged.push(paths.to_vec());
        }

        fn promote(&mut self, paths: &[String]) {
            self.promoted.push(paths.to_vec());
        }

        fn retire(&mut self, paths: &[String]) {
            self.retired.push(paths.to_vec());
        }
    }

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sysgen-test-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("should succeed");
        dir
    }

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("should succeed");
        fs::write(path, content).expect("should succeed");
    }

    fn strings(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn classify_add_and_delete() {
        let staging = temp_root("classify-add-staging");
        let dest = temp_root("classify-add-dest");

        write_file(&dest, "arch-arm/syscalls/a.S", "a");
        write_file(&dest, "arch-arm/syscalls/b.S", "b");
        write_file(&staging, "arch-arm/syscalls/b.S", "b");
        write_file(&staging, "arch-arm/syscalls/c.S", "c");

        let old_paths = strings(&["arch-arm/syscalls/a.S", "arch-arm/syscalls/b.S"]);
        let new_paths = strings(&["arch-arm/syscalls/b.S", "arch-arm/syscalls/c.S"]);

        let change_set =
            classify(&old_paths, &new_paths, &staging, &dest).expect("should succeed");
        assert_eq!(
            change_set,
            ChangeSet {
                adds: strings(&["arch-arm/syscalls/c.S"]),
                edits: vec![],
                deletes: strings(&["arch-arm/syscalls/a.S"]),
            }
        );
    }

    #[test]
    fn classify_edit_on_changed_bytes() {
        let staging = temp_root("classify-edit-staging");
        let dest = temp_root("classify-edit-dest");

        write_file(&dest, "arch-arm/syscalls/a.S", "a");
        write_file(&dest, "arch-arm/syscalls/b.S", "old");
        write_file(&staging, "arch-arm/syscalls/b.S", "new");
        write_file(&staging, "arch-arm/syscalls/c.S", "c");

        let old_paths = strings(&["arch-arm/syscalls/a.S", "arch-arm/syscalls/b.S"]);
        let new_paths = strings(&["arch-arm/syscalls/b.S", "arch-arm/syscalls/c.S"]);

        let change_set =
            classify(&old_paths, &new_paths, &staging, &dest).expect("should succeed");
        assert_eq!(
            change_set,
            ChangeSet {
                adds: strings(&["arch-arm/syscalls/c.S"]),
                edits: strings(&["arch-arm/syscalls/b.S"]),
                deletes: strings(&["arch-arm/syscalls/a.S"]),
            }
        );
    }

    #[test]
    fn apply_syncs_the_destination_and_reconverges() {
        let staging = temp_root("apply-staging");
        let dest = temp_root("apply-dest");

        write_file(&dest, "arch-arm/syscalls/a.S", "a");
        write_file(&dest, "arch-arm/syscalls/b.S", "old");
        write_file(&staging, "arch-arm/syscalls/b.S", "new");
        write_file(&staging, "arch-arm/syscalls/c.S", "c");

        let old_paths = strings(&["arch-arm/syscalls/a.S", "arch-arm/syscalls/b.S"]);
        let new_paths = strings(&["arch-arm/syscalls/b.S", "arch-arm/syscalls/c.S"]);

        let change_set =
            classify(&old_paths, &new_paths, &staging, &dest).expect("should succeed");

        let mut vcs = RecordingVcs::default();
        apply(&change_set, &mut vcs, &staging, &dest).expect("should succeed");

        // Content promoted, deletions gone, additions in place.
        assert_eq!(
            fs::read_to_string(dest.join("arch-arm/syscalls/b.S")).unwrap(),
            "new"
        );
        assert_eq!(
            fs::read_to_string(dest.join("arch-arm/syscalls/c.S")).unwrap(),
            "c"
        );
        assert!(!dest.join("arch-arm/syscalls/a.S").exists());

        // One batch per operation kind.
        assert_eq!(vcs.staged, vec![strings(&["arch-arm/syscalls/c.S"])]);
        assert_eq!(vcs.promoted, vec![strings(&["arch-arm/syscalls/b.S"])]);
        assert_eq!(vcs.retired, vec![strings(&["arch-arm/syscalls/a.S"])]);

        // A second run over the synchronized tree is a no-op.
        let old_paths = enumerate_stubs(&dest, &Arch::all()).expect("should succeed");
        let change_set =
            classify(&old_paths, &new_paths, &staging, &dest).expect("should succeed");
        assert!(change_set.is_empty());
    }

    #[test]
    fn enumerate_stubs_finds_only_stub_files() {
        let dest = temp_root("enumerate-dest");

        write_file(&dest, "arch-arm/syscalls/write.S", "w");
        write_file(&dest, "arch-arm/syscalls/read.S", "r");
        write_file(&dest, "arch-arm/syscalls/notes.txt", "n");
        write_file(&dest, "arch-x86/syscalls/read.S", "r");
        write_file(&dest, "include/sys/linux-unistd.h", "h");

        let result = enumerate_stubs(&dest, &Arch::all()).expect("should succeed");
        assert_eq!(
            result,
            strings(&[
                "arch-arm/syscalls/read.S",
                "arch-arm/syscalls/write.S",
                "arch-x86/syscalls/read.S",
            ])
        );

        // Missing stub directories contribute nothing.
        let empty = temp_root("enumerate-empty");
        let result = enumerate_stubs(&empty, &Arch::all()).expect("should succeed");
        assert!(result.is_empty());
    }

    #[test]
    fn write_staging_creates_directories_and_files() {
        let staging_root = temp_root("write-staging");

        let mut staging = Staging::new();
        staging
            .push(Artifact {
                path: "arch-arm/syscalls/read.S".to_string(),
                arch: Some(Arch::Arm),
                content: "stub".to_string(),
            })
            .expect("should succeed");
        staging
            .push(Artifact {
                path: "include/sys/linux-unistd.h".to_string(),
                arch: None,
                content: "header".to_string(),
            })
            .expect("should succeed");

        write_staging(&staging, &staging_root).expect("should succeed");

        assert_eq!(
            fs::read_to_string(staging_root.join("arch-arm/syscalls/read.S")).unwrap(),
            "stub"
        );
        assert_eq!(
            fs::read_to_string(staging_root.join("include/sys/linux-unistd.h")).unwrap(),
            "header"
        );
    }
}
