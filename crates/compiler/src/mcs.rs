//! MCS compiler
//!
//! Compiles MCS source text into a [`Datapack`]: one ordered command list per
//! declared (or synthesized) function, plus the pack manifest.

// SPDX-FileCopyrightText: © 2023 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

mod aliases;
mod parser;
mod tokenizer;

use crate::datapack::Datapack;
use crate::errors::CompileError;

/// Compiles one MCS source file.
///
/// The tokenizer runs to completion before parsing begins; either phase
/// aborts the compilation on its first error.
pub fn compile(source: &str) -> Result<Datapack, CompileError> {
    let tokens = tokenizer::tokenize(source)?;
    let datapack = parser::parse(&tokens)?;

    Ok(datapack)
}
