#[cfg(test)]
mod tests {
    use crate::loader::error::{ErrorKind, ParseError};
    use crate::loader::parse::parse_table;

    #[test]
    fn parse_shared_id() {
        let result = parse_table("ssize_t read (int, void*, size_t) 3\n").expect("should succeed");
        assert_eq!(result.len(), 1);

        let sc = &result[0];
        assert_eq!(sc.name, "read");
        assert_eq!(sc.func, "read");
        assert_eq!(sc.params, vec!["int", "void*", "size_t"]);
        assert_eq!(sc.arm_id, Some(3));
        assert_eq!(sc.x86_id, Some(3));
        assert_eq!(sc.decl, "ssize_t          read (int, void*, size_t);");
        assert_eq!(sc.id_symbol(), "__NR_read");
    }

    #[test]
    fn parse_split_ids() {
        let result = parse_table("int fork () 2,58\n").expect("should succeed");
        let sc = &result[0];
        assert_eq!(sc.name, "fork");
        assert!(sc.params.is_empty());
        assert_eq!(sc.arm_id, Some(2));
        assert_eq!(sc.x86_id, Some(58));
        assert_eq!(sc.decl, "int              fork (void);");
    }

    #[test]
    fn parse_aliased_symbol() {
        let result = parse_table("void _exit:exit_group (int) 248\n").expect("should succeed");
        let sc = &result[0];
        assert_eq!(sc.func, "_exit");
        assert_eq!(sc.name, "exit_group");
        assert_eq!(sc.id_symbol(), "__NR_exit_group");
    }

    #[test]
    fn parse_unsupported_sentinel() {
        let result = parse_table("int vfork (void) -1,66\n").expect("should succeed");
        let sc = &result[0];
        assert_eq!(sc.arm_id, None);
        assert_eq!(sc.x86_id, Some(66));

        // Both sentinels is legal; such a descriptor only contributes its
        // declaration line.
        let result = parse_table("int stat64 (const char*, struct stat64*) -1,-1\n")
            .expect("should succeed");
        assert_eq!(result[0].arm_id, None);
        assert_eq!(result[0].x86_id, None);
    }

    #[test]
    fn parse_pointer_return_glued_to_name() {
        let result = parse_table("void *sbrk (int) 45\n").expect("should succeed");
        let sc = &result[0];
        assert_eq!(sc.func, "sbrk");
        assert_eq!(sc.decl, "void*            sbrk (int);");
    }

    #[test]
    fn skips_comments_and_blank_lines_and_keeps_order() {
        let table = r#"
# process syscalls
int exit (int) 1

int fork () 2,58
# io
ssize_t read (int, void*, size_t) 3
"#;

        let result = parse_table(table).expect("should succeed");
        let names: Vec<&str> = result.iter().map(|sc| sc.name.as_str()).collect();
        assert_eq!(names, vec!["exit", "fork", "read"]);
    }

    #[test]
    fn missing_param_list_is_an_error() {
        let result = parse_table("int exit (int) 1\nint nope 42\n");
        assert_eq!(
            result,
            Err(ParseError::new(
                ErrorKind::MissingParamList,
                "expected '('",
                2,
            ))
        );
    }

    #[test]
    fn invalid_id_is_an_error() {
        let result = parse_table("int foo () bar\n");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ErrorKind::InvalidSyscallId,
                ..
            })
        ));

        let result = parse_table("int foo () 1,2,3\n");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ErrorKind::InvalidSyscallId,
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_id_is_an_error() {
        // One past u32::MAX. Only negative numbers mean "unsupported"; a
        // positive number that cannot be a syscall id is a table mistake.
        let result = parse_table("int foo () 4294967296\n");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ErrorKind::InvalidSyscallId,
                ..
            })
        ));

        let result = parse_table("int foo () 1,4294967296\n");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ErrorKind::InvalidSyscallId,
                ..
            })
        ));

        let result = parse_table("int bar () 4294967295\n").expect("should succeed");
        assert_eq!(result[0].arm_id, Some(u32::MAX));
    }
}
