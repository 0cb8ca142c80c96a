use crate::codegen::arch::{Arch, GenConfig};

/// Registers that carry x86 syscall arguments, in convention order.
const X86_REGISTERS: [&str; 6] = ["%ebx", "%ecx", "%edx", "%esi", "%edi", "%ebp"];

/// Stack slot size on both families.
const WORD_SIZE: usize = 4;

/// Renders the stub routine for one syscall on one architecture family.
/// `idname` is the symbolic constant holding the syscall number (`__NR_*`).
/// Pure and deterministic; the shape depends only on the arguments and the
/// config flags, never on descriptor order.
pub fn render(func: &str, arch: Arch, nparams: usize, idname: &str, config: &GenConfig) -> String {
    match arch {
        Arch::Arm => arm_stub(func, nparams, idname, config),
        Arch::X86 => x86_stub(func, nparams, idname),
    }
}

/// Renders an ARM-family stub. The instruction encoding (ARM vs Thumb) and the
/// way the syscall number reaches the trap instruction (immediate vs constant
/// pool) come from the config; the parameter count picks the default or long
/// shape. Arguments 1-4 already ride in r0-r3, so the default shape does no
/// marshaling; the long shape reloads the caller's stack arguments first.
fn arm_stub(func: &str, nparams: usize, idname: &str, config: &GenConfig) -> String {
    // The threshold is strictly greater-than: a 4-argument syscall still fits
    // the convention registers.
    let long = nparams > 4;

    let body = match (config.thumb, config.eabi, long) {
        (false, false, false) => arm_call_default(idname),
        (false, false, true) => arm_call_long(idname),
        (false, true, false) => arm_eabi_call_default(idname),
        (false, true, true) => arm_eabi_call_long(idname),
        (true, _, false) => thumb_call_default(idname, config.eabi),
        (true, _, true) => thumb_call_long(idname, config.eabi),
    };

    format!("{}{}", arm_header(func, config.thumb), body)
}

fn arm_header(func: &str, thumb: bool) -> String {
    if thumb {
        format!(
            "/* auto-generated by sysgen, do not touch */
    .text
    .type {func}, #function
    .globl {func}
    .align 4
    .thumb_func
    .fnstart

#define __thumb__
#include <sys/linux-syscalls.h>

{func}:
"
        )
    } else {
        format!(
            "/* auto-generated by sysgen, do not touch */
#include <sys/linux-syscalls.h>

    .text
    .type {func}, #function
    .globl {func}
    .align 4
    .fnstart

{func}:
"
        )
    }
}

/// ARM encoding, syscall number embedded in the trap immediate, up to four
/// register arguments. A negative result falls through to the errno setter.
fn arm_call_default(idname: &str) -> String {
    format!(
        "    swi     #{idname}
    movs    r0, r0
    bxpl    lr
    b       __set_syscall_errno
    .fnend
"
    )
}

/// Same as `arm_call_default` but reloads syscall arguments 5 and 6 from the
/// caller's stack into r4 and r5 around the trap.
fn arm_call_long(idname: &str) -> String {
    format!(
        "    .save   {{r4, r5, lr}}
    stmfd   sp!, {{r4, r5, lr}}
    ldr     r4, [sp, #12]
    ldr     r5, [sp, #16]
    swi     #{idname}
    ldmfd   sp!, {{r4, r5, lr}}
    movs    r0, r0
    bxpl    lr
    b       __set_syscall_errno
    .fnend
"
    )
}

/// ARM encoding, EABI convention: the syscall number travels in r7, loaded
/// from the constant pool, and the trap immediate is zero.
fn arm_eabi_call_default(idname: &str) -> String {
    format!(
        "    .save   {{r4, r7}}
    stmfd   sp!, {{r4, r7}}
    ldr     r7, ={idname}
    swi     #0
    ldmfd   sp!, {{r4, r7}}
    movs    r0, r0
    bxpl    lr
    b       __set_syscall_errno
    .fnend
"
    )
}

/// EABI long shape: snapshots sp into ip, then reloads syscall arguments 5-7
/// from the caller's frame into r4-r6 before trapping.
fn arm_eabi_call_long(idname: &str) -> String {
    format!(
        "    mov     ip, sp
    .save   {{r4, r5, r6, r7}}
    stmfd   sp!, {{r4, r5, r6, r7}}
    ldmfd   ip, {{r4, r5, r6}}
    ldr     r7, ={idname}
    swi     #0
    ldmfd   sp!, {{r4, r5, r6, r7}}
    movs    r0, r0
    bxpl    lr
    b       __set_syscall_errno
    .fnend
"
    )
}

/// In Thumb mode the trap sequence is the only part the operand convention
/// changes: EABI loads r7 from the constant pool and traps with `swi #0`,
/// the direct convention embeds the number in the trap immediate.
fn thumb_trap(idname: &str, eabi: bool) -> String {
    if eabi {
        format!(
            "    ldr     r7, ={idname}
    swi     #0
"
        )
    } else {
        format!("    swi     #{idname}\n")
    }
}

fn thumb_call_default(idname: &str, eabi: bool) -> String {
    format!(
        "    .save   {{r7, lr}}
    push    {{r7, lr}}
{}    tst     r0, r0
    bmi     1f
    pop     {{r7, pc}}
1:
    neg     r0, r0
    ldr     r1, =__set_errno
    blx     r1
    pop     {{r7, pc}}
    .fnend
",
        thumb_trap(idname, eabi)
    )
}

fn thumb_call_long(idname: &str, eabi: bool) -> String {
    format!(
        "    .save   {{r4, r5, r7, lr}}
    push    {{r4, r5, r7, lr}}
    ldr     r4, [sp, #16]
    ldr     r5, [sp, #20]
{}    tst     r0, r0
    bmi     1f
    pop     {{r4, r5, r7, pc}}
1:
    neg     r0, r0
    ldr     r1, =__set_errno
    blx     r1
    pop     {{r4, r5, r7, pc}}
    .fnend
",
        thumb_trap(idname, eabi)
    )
}

/// Renders the single x86 stub shape, used for any parameter count. Each
/// argument register is saved, then reloaded from the caller's stack at an
/// offset that accounts for the return address plus everything pushed above
/// it. Zero parameters emit no push/reload/pop lines at all.
fn x86_stub(func: &str, nparams: usize, idname: &str) -> String {
    let mut out = x86_header(func);

    // The kernel convention carries at most six arguments in registers;
    // anything beyond that has no slot to marshal.
    let nregs = nparams.min(X86_REGISTERS.len());

    let stack_bias = WORD_SIZE + nregs * WORD_SIZE;
    for reg in &X86_REGISTERS[..nregs] {
        out.push_str(format!("    pushl   {}\n", reg).as_str());
    }
    for (i, reg) in X86_REGISTERS[..nregs].iter().enumerate() {
        out.push_str(format!("    mov     {}(%esp), {}\n", stack_bias + i * WORD_SIZE, reg).as_str());
    }

    out.push_str(x86_call(idname).as_str());

    for reg in X86_REGISTERS[..nregs].iter().rev() {
        out.push_str(format!("    popl    {}\n", reg).as_str());
    }

    out.push_str("    ret\n");
    out
}

fn x86_header(func: &str) -> String {
    format!(
        "/* auto-generated by sysgen, do not touch */
#include <sys/linux-syscalls.h>

    .text
    .type {func}, @function
    .globl {func}
    .align 4

{func}:
"
    )
}

/// The x86 trap and error check. Results in [-129, -1] are errors: the value
/// is negated, handed to `__set_errno`, and the return value forced to -1.
/// Anything below -129 is a legitimate return value and passes through.
fn x86_call(idname: &str) -> String {
    format!(
        "    movl    ${idname}, %eax
    int     $0x80
    cmpl    $-129, %eax
    jb      1f
    negl    %eax
    pushl   %eax
    call    __set_errno
    addl    $4, %esp
    orl     $-1, %eax
1:
"
    )
}
