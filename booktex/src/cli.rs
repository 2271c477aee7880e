// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Render a transformed markdown token stream as a LaTeX chapter")]
pub struct CliArgs {
    /// Token stream (JSON) of one chapter, or `-` for standard input.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory holding the `NN_slug.md` chapter files; defaults to the input's directory.
    #[arg(long, value_name = "DIR")]
    pub chapters_dir: Option<PathBuf>,

    /// Chapter slug to render as, instead of the one derived from the input file name.
    #[arg(long, value_name = "SLUG")]
    pub chapter: Option<String>,

    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_some_and(|input| input.as_os_str() == "-")
    }
}
