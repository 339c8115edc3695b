//! MCS parser and command generator

// SPDX-FileCopyrightText: © 2023 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use super::aliases::AliasTable;
use super::tokenizer::{Token, TokenKind};

use crate::data::Name;
use crate::datapack::{variables_objective, Datapack, Function, PackMeta};
use crate::errors::StructureError;

use relative_path::RelativePath;

/// Forward-only cursor over the token sequence.
///
/// Comment tokens are trivia and skipped everywhere.  Once the sequence is
/// exhausted the cursor yields `End` tokens forever, so fixed-shape rules
/// see a truncated source as `UnexpectedEof` instead of panicking.
struct TokenCursor<'a, 'b> {
    tokens: &'b [Token<'a>],
    pos: usize,
}

impl<'a, 'b> TokenCursor<'a, 'b> {
    fn new(tokens: &'b [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn next(&mut self) -> Token<'a> {
        loop {
            match self.tokens.get(self.pos) {
                Some(t) => {
                    self.pos += 1;
                    if t.kind != TokenKind::Comment {
                        return *t;
                    }
                }
                None => {
                    return Token {
                        kind: TokenKind::End,
                        text: "",
                        line: self.tokens.last().map(|t| t.line).unwrap_or(1),
                    };
                }
            }
        }
    }
}

struct Parser<'a, 'b> {
    tokens: TokenCursor<'a, 'b>,

    namespace: Option<Name>,
    aliases: AliasTable,
    functions: Vec<Function>,

    // One counter for both `if/f<N>` helpers and `anon_const_<N>` holders.
    anonymous_id: u32,
}

/// Parses a complete token sequence into a datapack.
/// Aborts on the first structural error.
pub(crate) fn parse(tokens: &[Token]) -> Result<Datapack, StructureError> {
    let mut parser = Parser {
        tokens: TokenCursor::new(tokens),
        namespace: None,
        aliases: AliasTable::new(),
        functions: Vec::new(),
        anonymous_id: 0,
    };
    parser.parse_file()?;

    Ok(Datapack {
        functions: parser.functions,
        pack_meta: PackMeta::new(),
    })
}

impl<'a, 'b> Parser<'a, 'b> {
    fn parse_file(&mut self) -> Result<(), StructureError> {
        loop {
            let t = self.tokens.next();
            match t.kind {
                TokenKind::Def => self.parse_top_level_def(t)?,
                TokenKind::End => return Ok(()),
                _ => return Err(StructureError::UnexpectedToken(t.text.to_owned())),
            }
        }
    }

    fn parse_top_level_def(&mut self, keyword: Token) -> Result<(), StructureError> {
        if self.namespace.is_none() && keyword.text != "NAMESPACE" {
            return Err(StructureError::MissingNamespace);
        }

        match keyword.text {
            "NAMESPACE" => {
                let name = self.tokens.next();
                if name.kind == TokenKind::End {
                    return Err(StructureError::UnexpectedEof);
                }
                self.namespace = Some(Name::try_new(name.text.to_owned())?);
                Ok(())
            }
            "FUNC" => self.parse_func(),
            "ALIAS" => self.parse_alias(),
            _ => Err(StructureError::UnrecognizedKeyword(keyword.text.to_owned())),
        }
    }

    fn parse_func(&mut self) -> Result<(), StructureError> {
        let namespace = self.namespace()?;
        let path = self.expect_ident()?;

        self.expect_block_start(StructureError::NoBlockStartAfterFunc)?;
        let commands = self.parse_block()?;

        self.functions.push(Function {
            namespace,
            path: RelativePath::new(path).to_relative_path_buf(),
            commands,
        });
        Ok(())
    }

    fn parse_alias(&mut self) -> Result<(), StructureError> {
        let name = self.expect_ident()?;

        // the middle token is consumed but never inspected
        if self.tokens.next().kind == TokenKind::End {
            return Err(StructureError::UnexpectedEof);
        }

        let value = self.tokens.next();
        let value = match value.kind {
            // quotes are stripped before storage
            TokenKind::Str => value.text[1..value.text.len() - 1].to_owned(),
            TokenKind::End => return Err(StructureError::UnexpectedEof),
            _ => value.text.to_owned(),
        };

        self.aliases.insert(name, value);
        Ok(())
    }

    /// Reads command lines until the closing `}`.
    fn parse_block(&mut self) -> Result<Vec<String>, StructureError> {
        let mut lines = Vec::new();
        loop {
            let t = self.tokens.next();
            match t.kind {
                TokenKind::EndBlock => return Ok(lines),
                TokenKind::Command => {
                    // strip the backticks, then expand `#{alias}` markers
                    let body = &t.text[1..t.text.len() - 1];
                    lines.push(self.aliases.expand(body));
                }
                TokenKind::Def => lines.extend(self.parse_inner_def(t)?),
                TokenKind::End => return Err(StructureError::UnexpectedEof),
                _ => return Err(StructureError::UnexpectedToken(t.text.to_owned())),
            }
        }
    }

    fn parse_inner_def(&mut self, keyword: Token) -> Result<Vec<String>, StructureError> {
        match keyword.text {
            "SET" => self.parse_set(),
            "CALL" => self.parse_call(),
            "IF" => self.parse_if(),
            _ => Err(StructureError::UnrecognizedOperation(
                keyword.text.to_owned(),
            )),
        }
    }

    fn parse_set(&mut self) -> Result<Vec<String>, StructureError> {
        let namespace = self.namespace()?;
        let objective = variables_objective(&namespace);

        let name = self.expect_ident()?;
        let op = self.tokens.next();
        if op.kind == TokenKind::End {
            return Err(StructureError::UnexpectedEof);
        }
        let value = self.expect_value()?;

        match op.text {
            "=" => Ok(vec![format!(
                "scoreboard players set {} {} {}",
                name, objective, value.text
            )]),
            "+=" | "-=" | "*=" | "/=" | "%=" => {
                let mut lines = Vec::new();
                let source = self.operand(&value, &objective, &mut lines);
                lines.push(format!(
                    "scoreboard players operation {} {} {} {} {}",
                    name, objective, op.text, source, objective
                ));
                Ok(lines)
            }
            _ => Err(StructureError::UnrecognizedOperator(op.text.to_owned())),
        }
    }

    fn parse_call(&mut self) -> Result<Vec<String>, StructureError> {
        let namespace = self.namespace()?;
        let name = self.expect_ident()?;

        Ok(vec![format!("function {}:{}", namespace, name)])
    }

    fn parse_if(&mut self) -> Result<Vec<String>, StructureError> {
        let namespace = self.namespace()?;
        let objective = variables_objective(&namespace);

        // the helper id is allocated before the block is parsed
        let helper_path = format!("if/f{}", self.next_anonymous_id());

        let name = self.expect_ident()?;

        let condition = self.tokens.next();
        match condition.kind {
            TokenKind::Condition => (),
            TokenKind::End => return Err(StructureError::UnexpectedEof),
            _ => return Err(StructureError::InvalidCondition(condition.text.to_owned())),
        }

        let value = self.expect_value()?;

        self.expect_block_start(StructureError::NoBlockStartAfterIf)?;
        let commands = self.parse_block()?;

        self.functions.push(Function {
            namespace: namespace.clone(),
            path: RelativePath::new(&helper_path).to_relative_path_buf(),
            commands,
        });

        let mut lines = Vec::new();
        let source = self.operand(&value, &objective, &mut lines);
        lines.push(format!(
            "execute if score {} {} {} {} {} run function {}:{}",
            name, objective, condition.text, source, objective, namespace, helper_path
        ));
        Ok(lines)
    }

    /// The right-hand operand of a scoreboard operation or condition.
    ///
    /// A literal cannot appear there directly: it is first copied into a
    /// freshly numbered `anon_const_<N>` holder.
    fn operand(&mut self, value: &Token, objective: &str, lines: &mut Vec<String>) -> String {
        match value.kind {
            TokenKind::Integer => {
                let holder = format!("anon_const_{}", self.next_anonymous_id());
                lines.push(format!(
                    "scoreboard players set {} {} {}",
                    holder, objective, value.text
                ));
                holder
            }
            _ => value.text.to_owned(),
        }
    }

    fn next_anonymous_id(&mut self) -> u32 {
        let id = self.anonymous_id;
        self.anonymous_id += 1;
        id
    }

    fn namespace(&self) -> Result<Name, StructureError> {
        self.namespace
            .clone()
            .ok_or(StructureError::MissingNamespace)
    }

    fn expect_ident(&mut self) -> Result<&'a str, StructureError> {
        let t = self.tokens.next();
        match t.kind {
            TokenKind::Ident if !t.text.is_empty() => Ok(t.text),
            TokenKind::End => Err(StructureError::UnexpectedEof),
            _ => Err(StructureError::ExpectedIdentifier(t.text.to_owned())),
        }
    }

    fn expect_value(&mut self) -> Result<Token<'a>, StructureError> {
        let t = self.tokens.next();
        match t.kind {
            TokenKind::Integer => Ok(t),
            TokenKind::Ident if !t.text.is_empty() => Ok(t),
            TokenKind::End => Err(StructureError::UnexpectedEof),
            _ => Err(StructureError::ExpectedValue(t.text.to_owned())),
        }
    }

    fn expect_block_start(&mut self, err: StructureError) -> Result<(), StructureError> {
        let t = self.tokens.next();
        match t.kind {
            TokenKind::StartBlock => Ok(()),
            TokenKind::End => Err(StructureError::UnexpectedEof),
            _ => Err(err),
        }
    }
}
