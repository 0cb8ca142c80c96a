use colored::{ColoredString, Colorize};

/// Prints an error message and exits with code 1.
#[macro_export]
macro_rules! fatalln {
    ($($arg:tt)*) => {{
        errorln!($($arg)*);
        process::exit(1);
    }};
}

/// Prints an error message.
#[macro_export]
macro_rules! errorln {
    ($($arg:tt)*) => {{
        print!("{}", "error: ".red().bold());
        println!($($arg)*);
    }};
}

/// Prints a warning message.
#[macro_export]
macro_rules! warnln {
    ($($arg:tt)*) => {{
        print!("{}", "warning: ".yellow().bold());
        println!($($arg)*);
    }};
}

/// Formats the file location as a colored string.
pub fn format_file_loc(path: &str, line: Option<usize>) -> ColoredString {
    match line {
        Some(l) if l > 0 => format!("--> {}:{}", path, l).bright_black().bold(),
        _ => format!("--> {}", path).bright_black(),
    }
}
