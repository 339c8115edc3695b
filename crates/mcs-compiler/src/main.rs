//! compiler binary

// SPDX-FileCopyrightText: © 2023 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use clap::Parser;
use compiler::data::{load_text_file, TextFile};
use compiler::datapack::Datapack;
use relative_path::RelativePath;

use std::fs;
use std::path::{Path, PathBuf};

macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit(1);
    }};
}

#[derive(Parser)]
#[command(author, version)]
#[command(about = "MCS datapack compiler")]
#[command(arg_required_else_help = true)]
struct ArgParser {
    #[arg(value_name = "MCS_FILE", help = "mcs script file")]
    source: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = "out",
        help = "datapack output directory"
    )]
    output: PathBuf,
}

fn main() {
    let args = ArgParser::parse();

    let source = load_source_file(args.source);

    let datapack = match compiler::compile(&source.contents) {
        Ok(d) => d,
        Err(e) => error!("{}: {}", source.file_name, e),
    };

    write_datapack(&args.output, &datapack);
}

fn load_source_file(path: PathBuf) -> TextFile {
    match load_text_file(path) {
        Ok(tf) => tf,
        Err(e) => error!("{}", e),
    }
}

fn write_datapack(out_dir: &Path, datapack: &Datapack) {
    for function in &datapack.functions {
        let rel = RelativePath::new("data")
            .join(function.namespace.as_str())
            .join("functions")
            .join(format!("{}.mcfunction", function.path));

        write_file(rel.to_path(out_dir), function.commands.join("\n"));
    }

    let meta = match serde_json::to_string(&datapack.pack_meta) {
        Ok(m) => m,
        Err(e) => error!("Cannot serialize pack.mcmeta: {}", e),
    };
    write_file(out_dir.join("pack.mcmeta"), meta);
}

fn write_file(path: PathBuf, contents: String) {
    if let Some(parent) = path.parent() {
        match fs::create_dir_all(parent) {
            Ok(()) => (),
            Err(why) => error!("Error creating {}: {}", parent.display(), why),
        }
    }

    match fs::write(&path, contents) {
        Ok(()) => (),
        Err(why) => error!("Error writing {}: {}", path.display(), why),
    }
}
