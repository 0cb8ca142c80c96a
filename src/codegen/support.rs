use crate::codegen::arch::Arch;
use crate::loader::descriptor::Syscall;

pub const SYSCALLS_HEADER_PATH: &str = "include/sys/linux-syscalls.h";
pub const UNISTD_HEADER_PATH: &str = "include/sys/linux-unistd.h";
pub const ARM_MAKEFILE_PATH: &str = "arch-arm/syscalls.mk";

/// Renders the numeric-id header. Numbers shared by both families come first,
/// unconditionally; family-specific numbers follow in per-family preprocessor
/// blocks. Table order is preserved within each section. The base offset is
/// nonzero only for the legacy (pre-EABI, non-Thumb) ARM configuration, which
/// the preprocessor decides at compile time.
pub fn linux_syscalls_h(syscalls: &[Syscall]) -> String {
    let mut out = String::new();
    out.push_str("/* auto-generated by sysgen, do not touch */\n");
    out.push_str("#ifndef _LINUX_SYSCALLS_H_\n\n");
    out.push_str("#if !defined __ASM_ARM_UNISTD_H && !defined __ASM_I386_UNISTD_H\n");
    out.push_str("#if defined __arm__ && !defined __ARM_EABI__ && !defined __thumb__\n");
    out.push_str("  #  define __NR_SYSCALL_BASE  0x900000\n");
    out.push_str("#else\n");
    out.push_str("  #  define __NR_SYSCALL_BASE  0\n");
    out.push_str("#endif\n\n");

    // Syscalls numbered identically everywhere.
    for sc in syscalls {
        if sc.arm_id == sc.x86_id {
            if let Some(id) = sc.arm_id {
                out.push_str(nr_line(&sc.name, id).as_str());
            }
        }
    }

    // ARM-specific numbers.
    out.push_str("\n#ifdef __arm__\n");
    for sc in syscalls {
        if sc.arm_id != sc.x86_id {
            if let Some(id) = sc.arm_id {
                out.push_str(nr_line(&sc.name, id).as_str());
            }
        }
    }
    out.push_str("#endif\n");

    // x86-specific numbers.
    out.push_str("\n#ifdef __i386__\n");
    for sc in syscalls {
        if sc.arm_id != sc.x86_id {
            if let Some(id) = sc.x86_id {
                out.push_str(nr_line(&sc.name, id).as_str());
            }
        }
    }
    out.push_str("#endif\n");

    out.push_str("\n#endif\n");
    out.push_str("\n#endif /* _LINUX_SYSCALLS_H_ */\n");
    out
}

fn nr_line(name: &str, id: u32) -> String {
    format!("#define __NR_{:<25}    (__NR_SYSCALL_BASE + {})\n", name, id)
}

/// Renders the declarations header: every descriptor's pre-formatted
/// declaration, verbatim and in table order, inside an `extern "C"` guard.
/// Descriptors with no stub on either family still get their line.
pub fn linux_unistd_h(syscalls: &[Syscall]) -> String {
    let mut out = String::new();
    out.push_str("/* auto-generated by sysgen, do not touch */\n");
    out.push_str("#ifndef _LINUX_UNISTD_H_\n\n");
    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");

    for sc in syscalls {
        out.push_str(sc.decl.as_str());
        out.push('\n');
    }

    out.push_str("\n#ifdef __cplusplus\n}\n#endif\n");
    out.push_str("\n#endif /* _LINUX_UNISTD_H_ */\n");
    out
}

/// Renders the ARM build manifest: one source entry per descriptor that gets
/// an ARM stub, in table order.
pub fn arm_syscalls_mk(syscalls: &[Syscall]) -> String {
    let mut out = String::new();
    out.push_str("# auto-generated by sysgen, do not touch\n");
    out.push_str("syscall_src :=\n");

    for sc in syscalls {
        if sc.supports(Arch::Arm) {
            out.push_str(format!("syscall_src += {}\n", Arch::Arm.stub_path(&sc.func)).as_str());
        }
    }

    out
}
