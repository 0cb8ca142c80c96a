use lazy_static::lazy_static;
use regex::Regex;

use crate::loader::descriptor::Syscall;
use crate::loader::error::{ErrorKind, ParseError, ParseResult};

/// Parses the full text of a syscall table into descriptors, preserving table
/// order. Blank lines and `#` comments are skipped. Each remaining line must
/// have the form
///
///     return-type  func-name[:syscall-name] ( [parameters] )  id[,id2]
///
/// where a negative id marks the syscall as unsupported on that architecture
/// family. A single id applies to both families.
pub fn parse_table(src: &str) -> ParseResult<Vec<Syscall>> {
    let mut syscalls = vec![];
    for (i, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        syscalls.push(parse_line(line, i + 1)?);
    }

    Ok(syscalls)
}

/// Parses a single non-comment table line into a descriptor.
fn parse_line(line: &str, lineno: usize) -> ParseResult<Syscall> {
    let lparen = match line.find('(') {
        Some(pos) => pos,
        None => {
            return Err(ParseError::new(
                ErrorKind::MissingParamList,
                "expected '('",
                lineno,
            ))
        }
    };

    let rparen = match line[lparen..].find(')') {
        Some(pos) => lparen + pos,
        None => {
            return Err(ParseError::new(
                ErrorKind::MissingParamList,
                "expected ')'",
                lineno,
            ))
        }
    };

    let sig = line[..lparen].trim();
    let params_raw = line[lparen + 1..rparen].trim();
    let ids_raw = line[rparen + 1..].trim();

    // The last whitespace-separated word of the signature names the syscall;
    // everything before it is the return type.
    let split_at = match sig.rfind(char::is_whitespace) {
        Some(pos) => pos,
        None => {
            return Err(ParseError::new(
                ErrorKind::ExpectedSignature,
                "expected return type and syscall name",
                lineno,
            ))
        }
    };

    let mut ret = sig[..split_at].trim().to_string();
    let mut symbol_spec = sig[split_at + 1..].trim();

    // Pointer stars glued onto the name belong to the return type.
    while let Some(rest) = symbol_spec.strip_prefix('*') {
        ret.push('*');
        symbol_spec = rest;
    }

    lazy_static! {
        static ref RE_SYMBOL: Regex =
            Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*)(:([a-zA-Z_][a-zA-Z0-9_]*))?$").unwrap();
    }

    let (func, name) = match RE_SYMBOL.captures(symbol_spec) {
        Some(caps) => {
            let func = caps.get(1).unwrap().as_str().to_string();
            let name = match caps.get(3) {
                Some(m) => m.as_str().to_string(),
                None => func.clone(),
            };
            (func, name)
        }
        None => {
            return Err(ParseError::new(
                ErrorKind::ExpectedSignature,
                format!("invalid syscall name {}", symbol_spec).as_str(),
                lineno,
            ))
        }
    };

    let params: Vec<String> = if params_raw.is_empty() || params_raw == "void" {
        vec![]
    } else {
        params_raw.split(',').map(|p| p.trim().to_string()).collect()
    };

    let (arm_id, x86_id) = parse_ids(ids_raw, lineno)?;

    // The declaration is emitted verbatim into the declarations header later,
    // so it gets its final formatting here.
    let decl = format!(
        "{:<15}  {} ({});",
        ret,
        func,
        if params_raw.is_empty() {
            "void"
        } else {
            params_raw
        }
    );

    Ok(Syscall {
        name,
        func,
        params,
        arm_id,
        x86_id,
        decl,
    })
}

/// Parses the trailing id list of a table line. One number covers both
/// architecture families; two comma-separated numbers set them independently.
/// Negative numbers become `None` (no stub for that family).
fn parse_ids(ids_raw: &str, lineno: usize) -> ParseResult<(Option<u32>, Option<u32>)> {
    let mut ids = vec![];
    for part in ids_raw.split(',') {
        match part.trim().parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => {
                return Err(ParseError::new(
                    ErrorKind::InvalidSyscallId,
                    format!("expected a syscall number, found {}", part.trim()).as_str(),
                    lineno,
                ))
            }
        }
    }

    let (arm_id, x86_id) = match ids.as_slice() {
        [id] => (*id, *id),
        [id, id2] => (*id, *id2),
        _ => {
            return Err(ParseError::new(
                ErrorKind::InvalidSyscallId,
                "expected one or two syscall numbers",
                lineno,
            ))
        }
    };

    Ok((to_id(arm_id, lineno)?, to_id(x86_id, lineno)?))
}

/// Maps one raw id to its per-family form: negative numbers are the
/// "unsupported" sentinel, everything else must fit a u32.
fn to_id(id: i64, lineno: usize) -> ParseResult<Option<u32>> {
    if id < 0 {
        return Ok(None);
    }

    match u32::try_from(id) {
        Ok(id) => Ok(Some(id)),
        Err(_) => Err(ParseError::new(
            ErrorKind::InvalidSyscallId,
            format!("syscall number {} is out of range", id).as_str(),
            lineno,
        )),
    }
}
