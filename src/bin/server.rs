//! Module Mapper Binary
//!
//! Serves one module mapper conversation over stdin/stdout. GCC starts it
//! with `-fmodule-mapper=|gcc-module-cmi-builder`.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cmi_builder::build::BuildDispatcher;
use cmi_builder::protocol::BlockReader;
use cmi_builder::{Config, Conversation, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// GCC module mapper that builds CMIs on demand
#[derive(Parser, Debug)]
#[command(name = "gcc-module-cmi-builder")]
#[command(about = "Build and cache C++ module interfaces for GCC")]
#[command(version)]
struct Args {
    /// Repository directory for cached interfaces
    #[arg(short, long, env = "CMI_REPO_DIR", default_value = ".modules-cmi")]
    repo_dir: PathBuf,

    /// Cross-compiler executable prefix (e.g. aarch64-linux-gnu-)
    #[arg(short = 'x', long, env = "CROSS_COMPILE", default_value = "")]
    cross_compile: String,

    /// Base compiler executable
    #[arg(short, long, env = "CMI_COMPILER", default_value = "g++")]
    compiler: String,

    /// Language standard
    #[arg(long = "std", env = "CMI_STD", default_value = "c++20")]
    language_standard: String,

    /// Directory module sources are resolved against
    #[arg(short, long, env = "CMI_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Only parse stdin and print each block to stderr
    #[arg(long)]
    dump_blocks: bool,
}

fn main() -> ExitCode {
    // Stdout carries protocol replies, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cmi_builder=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let result = if args.dump_blocks {
        dump_blocks(io::stdin().lock())
    } else {
        build_config(&args).and_then(serve)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_config(args: &Args) -> Result<Config> {
    // The compiler calls back into whatever started us
    let mapper = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "gcc-module-cmi-builder".to_string());

    let mut builder = Config::builder()
        .repo_dir(&args.repo_dir)
        .cross_compile_prefix(&args.cross_compile)
        .compiler(&args.compiler)
        .language_standard(&args.language_standard)
        .mapper_command(mapper);
    if let Some(dir) = &args.source_dir {
        builder = builder.source_dir(dir);
    }
    let config = builder.build();
    config.validate()?;
    Ok(config)
}

fn serve(config: Config) -> Result<()> {
    tracing::debug!(
        "gcc-module-cmi-builder v{} repo={} cross_compile={:?}",
        cmi_builder::VERSION,
        config.repo_dir.display(),
        config.cross_compile_prefix
    );

    let dispatcher = BuildDispatcher::with_process_compiler(config);
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    let mut conversation = Conversation::new(stdin, stdout, dispatcher);
    conversation.run()
}

fn dump_blocks<R: BufRead>(input: R) -> Result<()> {
    for block in BlockReader::new(input) {
        eprintln!("{:#?}", block?);
    }
    Ok(())
}
