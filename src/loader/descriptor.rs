use crate::codegen::arch::Arch;

/// One row of the syscall table: a named system call, the symbol its stub exports,
/// its parameter list, and its numeric id per architecture family.
#[derive(Debug, Clone, PartialEq)]
pub struct Syscall {
    /// The kernel-side name of the syscall. Unique within the table.
    pub name: String,
    /// The externally callable routine name. Often equal to `name`.
    pub func: String,
    /// Parameter type list. Only the count matters to stub generation.
    pub params: Vec<String>,
    /// Syscall number for the ARM family. `None` means the syscall does not
    /// exist there and no ARM stub is generated.
    pub arm_id: Option<u32>,
    /// Syscall number for the x86 family. `None` means no x86 stub.
    pub x86_id: Option<u32>,
    /// Pre-formatted C declaration, emitted verbatim into the declarations
    /// header. Opaque to everything downstream of the loader.
    pub decl: String,
}

impl Syscall {
    /// Returns the number of parameters the syscall takes.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Returns the symbolic constant name used for this syscall's number.
    pub fn id_symbol(&self) -> String {
        format!("__NR_{}", self.name)
    }

    /// Returns this syscall's number for the given architecture family, if it
    /// exists there.
    pub fn id_for(&self, arch: Arch) -> Option<u32> {
        match arch {
            Arch::Arm => self.arm_id,
            Arch::X86 => self.x86_id,
        }
    }

    /// Returns true if the syscall exists on the given architecture family and
    /// therefore gets a stub for it.
    pub fn supports(&self, arch: Arch) -> bool {
        self.id_for(arch).is_some()
    }
}
