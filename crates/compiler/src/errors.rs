//! A single location for all of the errors in the compiler

// SPDX-FileCopyrightText: © 2023 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::fmt::Display;
use std::io;

#[derive(Debug)]
pub enum ValueError {
    InvalidName(String),
}

#[derive(Debug)]
pub enum FileError {
    OpenError(String, io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum TokenizeError {
    UnrecognizedCharacter(char),
    InvalidValueCharacter(char),
    UnterminatedString,
    UnterminatedCommand,
}

// u32 is the line number the error was detected on
#[derive(Debug, PartialEq, Eq)]
pub struct ErrorWithLine(pub u32, pub TokenizeError);

#[derive(Debug, PartialEq)]
pub enum StructureError {
    MissingNamespace,
    InvalidNamespace(String),

    ExpectedIdentifier(String),
    ExpectedValue(String),

    NoBlockStartAfterFunc,
    NoBlockStartAfterIf,

    UnrecognizedKeyword(String),
    UnrecognizedOperation(String),
    UnrecognizedOperator(String),
    InvalidCondition(String),

    UnexpectedToken(String),
    UnexpectedEof,
}

#[derive(Debug, PartialEq)]
pub enum CompileError {
    Tokenize(ErrorWithLine),
    Structure(StructureError),
}

// From Traits
// ===========

impl From<ErrorWithLine> for CompileError {
    fn from(e: ErrorWithLine) -> Self {
        Self::Tokenize(e)
    }
}

impl From<StructureError> for CompileError {
    fn from(e: StructureError) -> Self {
        Self::Structure(e)
    }
}

impl From<ValueError> for StructureError {
    fn from(e: ValueError) -> Self {
        match e {
            ValueError::InvalidName(s) => Self::InvalidNamespace(s),
        }
    }
}

// Display
// =======

impl Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(s) => write!(f, "Invalid name: {:?}", s),
        }
    }
}

impl Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenError(file_name, e) => write!(f, "Unable to open {}: {}", file_name, e),
        }
    }
}

impl Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCharacter(c) => write!(f, "Unrecognized character {:?}", c),
            Self::InvalidValueCharacter(c) => write!(f, "Invalid character for value {:?}", c),
            Self::UnterminatedString => write!(f, "Unterminated string"),
            Self::UnterminatedCommand => write!(f, "Unterminated command"),
        }
    }
}

impl Display for ErrorWithLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.0, self.1)
    }
}

impl Display for StructureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNamespace => write!(f, "You must define a namespace"),
            Self::InvalidNamespace(s) => write!(f, "Invalid namespace {:?}", s),
            Self::ExpectedIdentifier(s) => write!(f, "Expected an identifier, found {:?}", s),
            Self::ExpectedValue(s) => {
                write!(f, "Expected an integer or identifier, found {:?}", s)
            }
            Self::NoBlockStartAfterFunc => write!(f, "No block start after FUNC"),
            Self::NoBlockStartAfterIf => write!(f, "No block start after IF"),
            Self::UnrecognizedKeyword(s) => write!(f, "Unrecognized keyword {}", s),
            Self::UnrecognizedOperation(s) => write!(f, "Unrecognized operation {}", s),
            Self::UnrecognizedOperator(s) => write!(f, "Unrecognized operator {:?}", s),
            Self::InvalidCondition(s) => write!(f, "Invalid condition {:?}", s),
            Self::UnexpectedToken(s) => write!(f, "Unexpected token {:?}", s),
            Self::UnexpectedEof => write!(f, "Unexpected end of input"),
        }
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokenize(e) => e.fmt(f),
            Self::Structure(e) => e.fmt(f),
        }
    }
}
