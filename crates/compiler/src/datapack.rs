//! Compiled datapack data

// SPDX-FileCopyrightText: © 2023 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::data::Name;

use relative_path::RelativePathBuf;

use serde::Serialize;

pub const PACK_FORMAT: u32 = 5;

// Every variable and synthesized constant of a namespace lives in this
// single scoreboard objective.
pub fn variables_objective(namespace: &Name) -> String {
    format!("{}_vars", namespace)
}

/// A single `mcfunction` file, addressable in-game as `<namespace>:<path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub namespace: Name,

    // Slash-separated, extension-less (`init`, `if/f0`)
    pub path: RelativePathBuf,

    pub commands: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Pack {
    pub pack_format: u32,
}

/// The `pack.mcmeta` document describing the generated pack.
#[derive(Debug, Serialize)]
pub struct PackMeta {
    pub pack: Pack,
}

impl PackMeta {
    pub fn new() -> Self {
        Self {
            pack: Pack {
                pack_format: PACK_FORMAT,
            },
        }
    }
}

impl Default for PackMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the compiler produces for one source file, in creation order.
pub struct Datapack {
    pub functions: Vec<Function>,
    pub pack_meta: PackMeta,
}
