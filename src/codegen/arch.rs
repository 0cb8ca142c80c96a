use std::fmt;

/// An architecture family the generator can target. ARM is the primary family
/// and carries the mode/convention flags in `GenConfig`; x86 has a single
/// stub shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Arm,
    X86,
}

impl Arch {
    /// Returns every built-in architecture family, in generation order.
    pub fn all() -> Vec<Arch> {
        vec![Arch::Arm, Arch::X86]
    }

    /// Returns the directory holding this family's generated stubs, relative
    /// to the source tree root.
    pub fn syscalls_dir(&self) -> &'static str {
        match self {
            Arch::Arm => "arch-arm/syscalls",
            Arch::X86 => "arch-x86/syscalls",
        }
    }

    /// Returns the relative path of the stub file for the given routine name.
    pub fn stub_path(&self, func: &str) -> String {
        format!("{}/{}.S", self.syscalls_dir(), func)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arch::Arm => write!(f, "arm"),
            Arch::X86 => write!(f, "x86"),
        }
    }
}

/// Immutable generation settings, fixed at startup and threaded through every
/// rendering call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
    /// Use the narrow (Thumb) instruction encoding for ARM stubs instead of
    /// the full-width ARM encoding.
    pub thumb: bool,
    /// Load the syscall number into r7 through the constant pool and trap with
    /// `swi #0` (EABI), instead of embedding the number in the trap immediate.
    pub eabi: bool,
    /// Architecture families to generate stubs for.
    pub archs: Vec<Arch>,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            thumb: false,
            eabi: true,
            archs: Arch::all(),
        }
    }
}
