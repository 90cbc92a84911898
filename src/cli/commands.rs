use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Zero-setup C/C++ build-and-run tool
#[derive(Parser, Debug)]
#[command(
    name = "cforge",
    about = "Zero-setup C/C++ build-and-run tool with automatic dependency detection",
    version,
    author,
    long_about = "cforge compiles and runs C/C++ sources without a build file. It scans \
                  #include directives, installs known third-party dependencies through \
                  vcpkg, compiles incrementally, links a single executable and runs it, \
                  streaming its output.\n\n\
                  Examples:\n  \
                  cforge main.cpp\n  \
                  cforge src/ --flags \"-O2 -Wall\"\n  \
                  cforge main.c util.c --clean --no-run"
)]
pub struct CliArgs {
    #[arg(
        value_name = "PATH",
        required = true,
        help = "Source files or directories to build"
    )]
    pub sources: Vec<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_name = "FLAGS",
        allow_hyphen_values = true,
        help = "Extra compiler flags, shell-quoted (e.g. \"-O2 -Wall\")"
    )]
    pub flags: Option<String>,

    #[arg(long, help = "Recompile every source file, ignoring cached objects")]
    pub clean: bool,

    #[arg(long, help = "Build without running the produced executable")]
    pub no_run: bool,

    #[arg(
        long,
        value_enum,
        default_value = "human",
        help = "Log output format"
    )]
    pub format: LogFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Plain text with severity markers
    Human,
    /// One JSON object per log record
    Json,
}
