use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{arg, ArgAction, ArgMatches, Command};
use colored::*;

use crate::codegen::arch::{Arch, GenConfig};
use crate::fmt::format_file_loc;
use crate::loader::descriptor::Syscall;
use crate::loader::parse::parse_table;
use crate::workspace::reconcile::{apply, classify, enumerate_stubs, write_staging, ChangeSet};
use crate::workspace::vcs::{NullVcs, P4Vcs, Vcs};

mod codegen;
#[macro_use]
mod fmt;
mod loader;
mod workspace;

/// Name of the syscall table file expected at the source tree root.
const TABLE_FILE: &str = "SYSCALLS.TXT";

fn main() {
    // Define the root command.
    let cmd = Command::new("sysgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates syscall stubs, headers, and build manifests from a syscall table.")
        .subcommand_required(true)
        .arg_required_else_help(true);

    // Add the "generate" subcommand for a full regeneration run.
    let cmd = cmd.subcommand(
        Command::new("generate")
            .about("Regenerate all artifacts and sync them into the source tree")
            .arg(arg!([ROOT] "Path to the source tree root").required(true))
            .arg(
                arg!(--thumb ... "Generate Thumb (narrow) ARM stubs")
                    .required(false)
                    .action(ArgAction::SetTrue),
            )
            .arg(
                arg!(--"no-eabi" ... "Embed syscall numbers in the trap immediate instead of loading them from the constant pool")
                    .required(false)
                    .action(ArgAction::SetTrue),
            )
            .arg(arg!(-s --staging <DIR> "Staging directory for freshly rendered files").required(false))
            .arg(
                arg!(--vcs <VCS> "Version control backend")
                    .required(false)
                    .value_parser(["p4", "none"]),
            )
            .arg(
                arg!(-q --quiet ... "Don't print progress messages")
                    .required(false)
                    .action(ArgAction::SetTrue),
            ),
    );

    // Add the "check" subcommand for computing the change set without applying it.
    let cmd = cmd.subcommand(
        Command::new("check")
            .about("Report the add/edit/delete set without applying it")
            .arg(arg!([ROOT] "Path to the source tree root").required(true))
            .arg(
                arg!(--thumb ... "Generate Thumb (narrow) ARM stubs")
                    .required(false)
                    .action(ArgAction::SetTrue),
            )
            .arg(
                arg!(--"no-eabi" ... "Embed syscall numbers in the trap immediate instead of loading them from the constant pool")
                    .required(false)
                    .action(ArgAction::SetTrue),
            )
            .arg(arg!(-s --staging <DIR> "Staging directory for freshly rendered files").required(false))
            .arg(
                arg!(-q --quiet ... "Don't print progress messages")
                    .required(false)
                    .action(ArgAction::SetTrue),
            ),
    );

    // Handle the command.
    match cmd.get_matches().subcommand() {
        Some(("generate", sub_matches)) => run(sub_matches, false),
        Some(("check", sub_matches)) => run(sub_matches, true),
        _ => unreachable!("no subcommand"),
    };
}

/// Runs the pipeline: load the table, render every artifact into the staging
/// directory, classify staged files against the destination tree, and (unless
/// this is a dry run) apply the resulting change set.
fn run(matches: &ArgMatches, dry_run: bool) {
    let root = match matches.get_one::<String>("ROOT") {
        Some(path) => PathBuf::from(path),
        None => fatalln!("expected source tree root"),
    };

    let config = GenConfig {
        thumb: matches.get_flag("thumb"),
        eabi: !matches.get_flag("no-eabi"),
        archs: Arch::all(),
    };

    let staging_root = match matches.get_one::<String>("staging") {
        Some(dir) => PathBuf::from(dir),
        None => env::temp_dir().join("sysgen-staging"),
    };

    let quiet = matches.get_flag("quiet");

    let syscalls = load_table(&root);
    if !quiet {
        println!(
            "loaded {} syscalls from {}",
            syscalls.len(),
            root.join(TABLE_FILE).display()
        );
    }

    let staging = match codegen::generate(&syscalls, &config) {
        Ok(staging) => staging,
        Err(err) => fatalln!("{}", err),
    };

    if let Err(err) = write_staging(&staging, &staging_root) {
        fatalln!("{}", err);
    }

    let old_paths = match enumerate_stubs(&root, &config.archs) {
        Ok(paths) => paths,
        Err(err) => fatalln!("{}", err),
    };
    if !quiet {
        println!("found {} existing stub files", old_paths.len());
    }

    let change_set = match classify(&old_paths, &staging.paths(), &staging_root, &root) {
        Ok(change_set) => change_set,
        Err(err) => fatalln!("{}", err),
    };

    if dry_run {
        print_change_set(&change_set);
        return;
    }

    let mut vcs: Box<dyn Vcs> = match matches.get_one::<String>("vcs").map(|s| s.as_str()) {
        Some("p4") => Box::new(P4Vcs::new(&root)),
        _ => Box::new(NullVcs),
    };

    if let Err(err) = apply(&change_set, vcs.as_mut(), &staging_root, &root) {
        fatalln!("{}", err);
    }

    if !quiet {
        println!(
            "Synced {}: {} added, {} edited, {} deleted.",
            root.display(),
            change_set.adds.len(),
            change_set.edits.len(),
            change_set.deletes.len()
        );
    }
}

/// Reads and parses the syscall table at the source tree root. A missing
/// table aborts the run before anything is generated.
fn load_table(root: &Path) -> Vec<Syscall> {
    let table_path = root.join(TABLE_FILE);
    if !table_path.exists() {
        fatalln!(r#"could not find "{}", aborting"#, table_path.display());
    }

    let src = match fs::read_to_string(&table_path) {
        Ok(src) => src,
        Err(err) => fatalln!(r#"error reading "{}": {}"#, table_path.display(), err),
    };

    match parse_table(&src) {
        Ok(syscalls) => syscalls,
        Err(err) => {
            errorln!("{}", err);
            println!(
                "  {}",
                format_file_loc(table_path.to_string_lossy().as_ref(), Some(err.line))
            );
            process::exit(1);
        }
    }
}

/// Prints the would-be change set of a dry run.
fn print_change_set(change_set: &ChangeSet) {
    if change_set.is_empty() {
        println!("destination tree is already in sync");
        return;
    }

    for path in &change_set.adds {
        println!("add:    {}", path);
    }
    for path in &change_set.edits {
        println!("edit:   {}", path);
    }
    for path in &change_set.deletes {
        println!("delete: {}", path);
    }
}
