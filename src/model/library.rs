// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The canned equation library.
//!
//! Definitions live in `library.json`, embedded at compile time. A definition
//! is a template: the workspace instantiates it with fresh variable ids each
//! time it is added, so two copies of the same equation never share
//! variables. By convention the first listed variable is the one the
//! equation defines (its left-hand side).

use crate::model::Dimension;
use serde::Deserialize;
use std::sync::OnceLock;

/// One variable slot of an equation template
#[derive(Debug, Clone, Deserialize)]
pub struct VarDef {
    pub sym: String,
    pub dim: Dimension,
}

/// Linear token stream describing an equation's display
#[derive(Debug, Clone, Deserialize)]
pub enum Tok {
    /// Reference to a template variable by symbol
    Sym(String),
    /// Literal text span
    Lit(String),
    /// Numerator and denominator token runs
    Frac(Vec<Tok>, Vec<Tok>),
    /// Superscript run attached after the preceding token
    Sup(Vec<Tok>),
    /// Subscript run attached after the preceding token
    Sub(Vec<Tok>),
}

/// An equation template from the library
#[derive(Debug, Clone, Deserialize)]
pub struct EquationDef {
    pub key: String,
    pub name: String,
    pub vars: Vec<VarDef>,
    pub layout: Vec<Tok>,
}

impl EquationDef {
    /// The symbol of the variable this equation defines
    pub fn lhs_symbol(&self) -> &str {
        &self.vars[0].sym
    }
}

/// The built-in equation catalog
#[derive(Debug)]
pub struct Library {
    defs: Vec<EquationDef>,
}

static BUILTIN: OnceLock<Library> = OnceLock::new();

impl Library {
    /// The embedded catalog. Parsed once; the asset is validated by tests.
    pub fn builtin() -> &'static Library {
        BUILTIN.get_or_init(|| {
            let defs = serde_json::from_str(include_str!("library.json"))
                .expect("embedded equation library is valid JSON");
            Library { defs }
        })
    }

    pub fn get(&self, key: &str) -> Option<&EquationDef> {
        self.defs.iter().find(|def| def.key == key)
    }

    pub fn defs(&self) -> impl Iterator<Item = &EquationDef> {
        self.defs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let lib = Library::builtin();
        assert!(lib.defs().count() >= 5);
    }

    #[test]
    fn every_layout_symbol_is_declared() {
        fn check(toks: &[Tok], def: &EquationDef) {
            for tok in toks {
                match tok {
                    Tok::Sym(sym) => {
                        assert!(
                            def.vars.iter().any(|v| &v.sym == sym),
                            "{}: undeclared symbol {sym}",
                            def.key
                        );
                    }
                    Tok::Lit(_) => {}
                    Tok::Frac(num, den) => {
                        check(num, def);
                        check(den, def);
                    }
                    Tok::Sup(run) | Tok::Sub(run) => check(run, def),
                }
            }
        }

        for def in Library::builtin().defs() {
            check(&def.layout, def);
        }
    }

    #[test]
    fn first_variable_is_the_lhs() {
        for def in Library::builtin().defs() {
            match def.layout.first() {
                Some(Tok::Sym(sym)) => assert_eq!(sym, def.lhs_symbol(), "{}", def.key),
                other => panic!("{}: layout starts with {other:?}", def.key),
            }
        }
    }

    #[test]
    fn known_keys_resolve() {
        let lib = Library::builtin();
        assert!(lib.get("ke_def").is_some());
        assert!(lib.get("pe_def").is_some());
        assert!(lib.get("nonsense").is_none());
    }
}
