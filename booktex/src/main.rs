// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use booktex::chapters::{chapter_for, scan_chapters};
use booktex::cli::CliArgs;
use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("no input file")]
    NoInput,
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Render(#[from] booktex_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    init_logging();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let Some(input) = args.input.as_deref() else {
        if args.output.is_some()
            || args.config.is_some()
            || args.chapters_dir.is_some()
            || args.chapter.is_some()
        {
            return Err(CliError::NoInput);
        }
        CliArgs::command().print_help()?;
        return Ok(());
    };

    let options = booktex::config::load_options(args.config.as_deref())?;
    let json = if args.reads_stdin() {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(input).map_err(|source| CliError::Read {
            path: input.to_path_buf(),
            source,
        })?
    };

    let chapters_dir = match &args.chapters_dir {
        Some(dir) => dir.clone(),
        None if args.reads_stdin() => PathBuf::from("."),
        None => input
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let chapters = scan_chapters(&chapters_dir)?;
    let chapter = chapter_for(Some(input), args.chapter.as_deref());
    tracing::info!(
        chapter = %chapter.slug,
        unnumbered = chapter.unnumbered,
        chapters = chapters.len(),
        "rendering chapter"
    );

    let latex = booktex_core::render_str_with_options(&json, &chapters, &chapter, &options)?;

    match &args.output {
        Some(path) => fs::write(path, latex)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(latex.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use clap::error::ErrorKind;

    use booktex::cli::CliArgs;

    // 行为：仅输入文件时能解析 input 且 output 为空。
    #[test]
    fn parse_input_only() {
        let args = CliArgs::try_parse_from(["booktex", "01_basics.json"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("01_basics.json")));
        assert_eq!(args.output, None);
        assert!(!args.reads_stdin());
    }

    // 行为：`-` 表示从标准输入读取。
    #[test]
    fn parse_stdin_marker() {
        let args = CliArgs::try_parse_from(["booktex", "-"]).unwrap();
        assert!(args.reads_stdin());
    }

    // 行为：支持短参数 -o，并且允许与 input 混排。
    #[test]
    fn parse_output_short_mixed() {
        let args = CliArgs::try_parse_from(["booktex", "-o", "out.tex", "a.json"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("a.json")));
        assert_eq!(args.output, Some(PathBuf::from("out.tex")));
    }

    // 行为：支持 --chapters-dir 与 --chapter。
    #[test]
    fn parse_chapter_overrides() {
        let args = CliArgs::try_parse_from([
            "booktex",
            "a.json",
            "--chapters-dir",
            "book",
            "--chapter",
            "basics",
        ])
        .unwrap();
        assert_eq!(args.chapters_dir, Some(PathBuf::from("book")));
        assert_eq!(args.chapter.as_deref(), Some("basics"));
    }

    // 行为：重复指定 -o 会报错。
    #[test]
    fn error_on_duplicate_output() {
        let err = CliArgs::try_parse_from([
            "booktex",
            "-o",
            "a.tex",
            "-o",
            "b.tex",
            "input.json",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    // 行为：多个输入文件会报错。
    #[test]
    fn error_on_multiple_inputs() {
        let err = CliArgs::try_parse_from(["booktex", "a.json", "b.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    // 行为：未知参数会报错。
    #[test]
    fn error_on_unknown_argument() {
        let err = CliArgs::try_parse_from(["booktex", "--unknown"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
