//! Command-text aliases

// SPDX-FileCopyrightText: © 2023 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Aliases declared with `ALIAS`, substituted into command text.
///
/// Redeclaring a name overwrites the old value.  Substitution happens when a
/// command line is parsed, so earlier-parsed commands keep the old value.
pub(crate) struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, value: String) {
        self.aliases.insert(name.to_owned(), value);
    }

    /// Replaces every `#{name}` marker in `text`.
    ///
    /// An undeclared name expands to the empty string.  A `#` not followed
    /// by `{` is literal text.  An unterminated marker drops the remainder
    /// of the text.
    pub fn expand(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(i) = rest.find("#{") {
            output.push_str(&rest[..i]);

            let after_marker = &rest[i + 2..];
            match after_marker.find('}') {
                Some(end) => {
                    if let Some(value) = self.aliases.get(&after_marker[..end]) {
                        output.push_str(value);
                    }
                    rest = &after_marker[end + 1..];
                }
                None => return output,
            }
        }

        output.push_str(rest);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> AliasTable {
        let mut t = AliasTable::new();
        for (name, value) in entries {
            t.insert(name, value.to_string());
        }
        t
    }

    #[test]
    fn expand_single_marker() {
        let t = table(&[("greeting", "hello")]);
        assert_eq!(t.expand("say #{greeting} world"), "say hello world");
    }

    #[test]
    fn expand_multiple_markers() {
        let t = table(&[("a", "1"), ("b", "2")]);
        assert_eq!(t.expand("#{a}+#{b}=3"), "1+2=3");
    }

    #[test]
    fn unknown_alias_expands_to_empty_string() {
        let t = table(&[]);
        assert_eq!(t.expand("say #{missing}!"), "say !");
    }

    #[test]
    fn redeclaration_overwrites() {
        let mut t = table(&[("x", "old")]);
        t.insert("x", "new".to_owned());
        assert_eq!(t.expand("#{x}"), "new");
    }

    #[test]
    fn hash_without_brace_is_literal() {
        let t = table(&[("c", "5")]);
        assert_eq!(t.expand("tag #important #{c}"), "tag #important 5");
    }

    #[test]
    fn trailing_hash_is_literal() {
        let t = table(&[]);
        assert_eq!(t.expand("count #"), "count #");
    }

    #[test]
    fn unterminated_marker_drops_remainder() {
        let t = table(&[("a", "1")]);
        assert_eq!(t.expand("say #{a} and #{oops"), "say 1 and ");
    }

    #[test]
    fn marker_at_boundaries() {
        let t = table(&[("x", "mid")]);
        assert_eq!(t.expand("#{x}"), "mid");
        assert_eq!(t.expand("#{x} end"), "mid end");
        assert_eq!(t.expand("start #{x}"), "start mid");
    }

    #[test]
    fn no_markers() {
        let t = table(&[("x", "y")]);
        assert_eq!(t.expand("plain command text"), "plain command text");
    }
}
