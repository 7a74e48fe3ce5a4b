// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The workspace snapshot: the model the canvas queries and commands.
//!
//! A `Workspace` is an immutable snapshot. Every command returns a new
//! snapshot (copy-on-write over `Arc`-backed collections) and the host swaps
//! it in wholesale, so a render pass always observes one consistent model.
//!
//! This is a deliberately small stand-in for a full symbolic engine: the
//! equality relation is a flat pair list queried by search, and a rewrite
//! substitutes a variable's glyph with the target equation's right-hand side
//! without any simplification. Enough to drive the canvas; nothing more.

use crate::model::library::{EquationDef, Tok};
use crate::model::{
    AnchorKey, Dimension, DisplayNode, EquationId, ExpressionId, TileId, VarId,
};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;

/// Errors crossing the model boundary. The canvas treats all of these as
/// logged no-ops; they indicate a command raced a deletion or a caller bug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("unknown equation {0:?}")]
    UnknownEquation(EquationId),
    #[error("unknown expression {0:?}")]
    UnknownExpression(ExpressionId),
    #[error("unknown variable {0:?}")]
    UnknownVariable(VarId),
    #[error("variables {a:?} and {b:?} have different dimensions")]
    DimensionMismatch { a: VarId, b: VarId },
    #[error("equation {equation:?} cannot replace variable {replace:?}")]
    RewriteNotApplicable {
        replace: VarId,
        equation: EquationId,
    },
}

#[derive(Debug, Clone)]
struct VariableInfo {
    symbol: String,
    dimension: Dimension,
}

/// One equation instance
#[derive(Debug, Clone)]
pub struct Equation {
    pub id: EquationId,
    pub name: String,
    pub vars: Vec<VarId>,
    /// The variable this equation defines (first template variable)
    pub lhs: VarId,
    display: DisplayNode,
    /// Display of everything right of the "=", used as rewrite replacement
    rhs: Vec<DisplayNode>,
}

/// One derived-expression instance
#[derive(Debug, Clone)]
pub struct Expression {
    pub id: ExpressionId,
    /// The variable the expression was promoted from
    pub source: VarId,
    display: DisplayNode,
}

/// An immutable model snapshot
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    variables: Arc<BTreeMap<VarId, VariableInfo>>,
    equations: Arc<Vec<Equation>>,
    expressions: Arc<Vec<Expression>>,
    /// Declared equality pairs; the full relation is their transitive closure
    equalities: Arc<Vec<(VarId, VarId)>>,
    /// Tile created by the most recent add command, for initial placement
    last_added: Option<TileId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn equations(&self) -> impl Iterator<Item = &Equation> {
        self.equations.iter()
    }

    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.expressions.iter()
    }

    pub fn equation(&self, id: EquationId) -> Option<&Equation> {
        self.equations.iter().find(|eq| eq.id == id)
    }

    pub fn expression(&self, id: ExpressionId) -> Option<&Expression> {
        self.expressions.iter().find(|ex| ex.id == id)
    }

    pub fn equation_display(&self, id: EquationId) -> Option<&DisplayNode> {
        self.equation(id).map(|eq| &eq.display)
    }

    pub fn expression_display(&self, id: ExpressionId) -> Option<&DisplayNode> {
        self.expression(id).map(|ex| &ex.display)
    }

    pub fn dimension(&self, var: VarId) -> Option<Dimension> {
        self.variables.get(&var).map(|info| info.dimension)
    }

    pub fn symbol(&self, var: VarId) -> Option<&str> {
        self.variables.get(&var).map(|info| info.symbol.as_str())
    }

    /// The tile created by the most recent add command, if any
    pub fn last_added(&self) -> Option<TileId> {
        self.last_added
    }

    /// Resolve a rendered glyph's key back to its variable, verifying the
    /// variable is still live in this snapshot.
    pub fn variable_for_display_key(&self, key: &AnchorKey) -> Option<VarId> {
        self.variables.contains_key(&key.var).then_some(key.var)
    }

    /// Whether two variables are currently declared equal (directly or
    /// transitively). A variable is always equal to itself.
    pub fn are_equal(&self, a: VarId, b: VarId) -> bool {
        if a == b {
            return true;
        }
        let mut seen = BTreeSet::from([a]);
        let mut queue = VecDeque::from([a]);
        while let Some(current) = queue.pop_front() {
            for &(x, y) in self.equalities.iter() {
                let next = if current == x {
                    y
                } else if current == y {
                    x
                } else {
                    continue;
                };
                if next == b {
                    return true;
                }
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Maximal sets of mutually equal variables, each sorted, ordered by
    /// their smallest member. Singleton classes are not reported.
    pub fn equality_classes(&self) -> Vec<Vec<VarId>> {
        let mut adjacency: BTreeMap<VarId, Vec<VarId>> = BTreeMap::new();
        for &(a, b) in self.equalities.iter() {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }

        let mut classes = Vec::new();
        let mut visited = BTreeSet::new();
        for &start in adjacency.keys() {
            if !visited.insert(start) {
                continue;
            }
            let mut class = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for &next in &adjacency[&current] {
                    if visited.insert(next) {
                        class.push(next);
                        queue.push_back(next);
                    }
                }
            }
            class.sort();
            classes.push(class);
        }
        classes
    }

    // ===== Commands =====

    /// Instantiate a library equation with fresh variables.
    pub fn add_equation(&self, def: &EquationDef) -> Workspace {
        let mut variables = (*self.variables).clone();
        let mut symbol_to_id = BTreeMap::new();
        let mut vars = Vec::with_capacity(def.vars.len());
        for var_def in &def.vars {
            let id = VarId::next();
            symbol_to_id.insert(var_def.sym.clone(), id);
            variables.insert(
                id,
                VariableInfo {
                    symbol: var_def.sym.clone(),
                    dimension: var_def.dim,
                },
            );
            vars.push(id);
        }

        let nodes = toks_to_nodes(&def.layout, &symbol_to_id);
        let rhs = rhs_nodes(&def.layout, &symbol_to_id);
        let id = EquationId::next();
        let equation = Equation {
            id,
            name: def.name.clone(),
            lhs: vars[0],
            vars,
            display: DisplayNode::row(nodes),
            rhs,
        };

        tracing::info!(key = %def.key, ?id, "added equation");

        let mut equations = (*self.equations).clone();
        equations.push(equation);
        Workspace {
            variables: Arc::new(variables),
            equations: Arc::new(equations),
            expressions: Arc::clone(&self.expressions),
            equalities: Arc::clone(&self.equalities),
            last_added: Some(TileId::Equation(id)),
        }
    }

    /// Promote a variable to a derived-expression tile.
    pub fn add_expression(&self, var: VarId) -> Result<Workspace, WorkspaceError> {
        let info = self
            .variables
            .get(&var)
            .ok_or(WorkspaceError::UnknownVariable(var))?;
        let id = ExpressionId::next();
        let expression = Expression {
            id,
            source: var,
            display: DisplayNode::var_symbol(var, info.symbol.clone()),
        };

        tracing::info!(symbol = %info.symbol, ?id, "added expression");

        let mut expressions = (*self.expressions).clone();
        expressions.push(expression);
        Ok(Workspace {
            variables: Arc::clone(&self.variables),
            equations: Arc::clone(&self.equations),
            expressions: Arc::new(expressions),
            equalities: Arc::clone(&self.equalities),
            last_added: Some(TileId::Expression(id)),
        })
    }

    pub fn delete_expression(&self, id: ExpressionId) -> Result<Workspace, WorkspaceError> {
        if self.expression(id).is_none() {
            return Err(WorkspaceError::UnknownExpression(id));
        }
        let expressions: Vec<Expression> = self
            .expressions
            .iter()
            .filter(|ex| ex.id != id)
            .cloned()
            .collect();
        tracing::info!(?id, "deleted expression");
        Ok(Workspace {
            variables: Arc::clone(&self.variables),
            equations: Arc::clone(&self.equations),
            expressions: Arc::new(expressions),
            equalities: Arc::clone(&self.equalities),
            last_added: None,
        })
    }

    /// Declare two variables equal. Dimensions must match; declaring an
    /// already-equal pair returns an unchanged snapshot.
    pub fn declare_equal(&self, a: VarId, b: VarId) -> Result<Workspace, WorkspaceError> {
        let dim_a = self.dimension(a).ok_or(WorkspaceError::UnknownVariable(a))?;
        let dim_b = self.dimension(b).ok_or(WorkspaceError::UnknownVariable(b))?;
        if !dim_a.equal_units(&dim_b) {
            return Err(WorkspaceError::DimensionMismatch { a, b });
        }
        if self.are_equal(a, b) {
            return Ok(self.clone());
        }

        tracing::info!(?a, ?b, "declared equal");

        let mut equalities = (*self.equalities).clone();
        equalities.push((a, b));
        Ok(Workspace {
            variables: Arc::clone(&self.variables),
            equations: Arc::clone(&self.equations),
            expressions: Arc::clone(&self.expressions),
            equalities: Arc::new(equalities),
            last_added: None,
        })
    }

    /// Substitute `replace` inside an expression using `target`'s
    /// right-hand side. Applicable when the equation defines `replace`
    /// itself or a variable declared equal to it.
    pub fn rewrite_expression(
        &self,
        expr: ExpressionId,
        replace: VarId,
        target: EquationId,
    ) -> Result<Workspace, WorkspaceError> {
        let expression = self
            .expression(expr)
            .ok_or(WorkspaceError::UnknownExpression(expr))?;
        let equation = self
            .equation(target)
            .ok_or(WorkspaceError::UnknownEquation(target))?;

        if !expression.display.variables().contains(&replace) {
            return Err(WorkspaceError::UnknownVariable(replace));
        }
        if !self.are_equal(equation.lhs, replace) {
            return Err(WorkspaceError::RewriteNotApplicable {
                replace,
                equation: target,
            });
        }

        let mut replacement_children = vec![DisplayNode::leaf("(")];
        replacement_children.extend(equation.rhs.iter().cloned());
        replacement_children.push(DisplayNode::leaf(")"));
        let replacement = DisplayNode::row(replacement_children);

        tracing::info!(?expr, ?replace, ?target, "rewrote expression");

        let expressions: Vec<Expression> = self
            .expressions
            .iter()
            .map(|ex| {
                if ex.id == expr {
                    Expression {
                        id: ex.id,
                        source: ex.source,
                        display: ex.display.substitute(replace, &replacement),
                    }
                } else {
                    ex.clone()
                }
            })
            .collect();

        Ok(Workspace {
            variables: Arc::clone(&self.variables),
            equations: Arc::clone(&self.equations),
            expressions: Arc::new(expressions),
            equalities: Arc::clone(&self.equalities),
            last_added: None,
        })
    }
}

fn toks_to_nodes(toks: &[Tok], symbol_to_id: &BTreeMap<String, VarId>) -> Vec<DisplayNode> {
    toks.iter()
        .map(|tok| match tok {
            Tok::Sym(sym) => {
                // Symbols are validated against the declaration list when
                // the library is loaded.
                let id = symbol_to_id[sym.as_str()];
                DisplayNode::var_symbol(id, sym.clone())
            }
            Tok::Lit(text) => DisplayNode::leaf(text.clone()),
            Tok::Frac(num, den) => DisplayNode::fraction(
                toks_to_nodes(num, symbol_to_id),
                toks_to_nodes(den, symbol_to_id),
            ),
            Tok::Sup(run) => DisplayNode::superscript(toks_to_nodes(run, symbol_to_id)),
            Tok::Sub(run) => DisplayNode::subscript(toks_to_nodes(run, symbol_to_id)),
        })
        .collect()
}

/// Everything right of the top-level "=" as display nodes
fn rhs_nodes(toks: &[Tok], symbol_to_id: &BTreeMap<String, VarId>) -> Vec<DisplayNode> {
    let eq_pos = toks
        .iter()
        .position(|tok| matches!(tok, Tok::Lit(text) if text == "="));
    match eq_pos {
        Some(pos) => toks_to_nodes(&toks[pos + 1..], symbol_to_id),
        None => toks_to_nodes(toks, symbol_to_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Library;

    fn workspace_with(keys: &[&str]) -> Workspace {
        let lib = Library::builtin();
        let mut ws = Workspace::new();
        for key in keys {
            ws = ws.add_equation(lib.get(key).unwrap());
        }
        ws
    }

    #[test]
    fn add_equation_instantiates_fresh_variables() {
        let ws = workspace_with(&["ke_def", "ke_def"]);
        let equations: Vec<_> = ws.equations().collect();
        assert_eq!(equations.len(), 2);
        assert_ne!(equations[0].id, equations[1].id);
        for (a, b) in equations[0].vars.iter().zip(&equations[1].vars) {
            assert_ne!(a, b);
        }
        assert_eq!(ws.last_added(), Some(TileId::Equation(equations[1].id)));
    }

    #[test]
    fn displays_expose_variables_in_order() {
        let ws = workspace_with(&["ke_def"]);
        let eq = ws.equations().next().unwrap();
        let display = ws.equation_display(eq.id).unwrap();
        // E_k, m, v in layout order
        assert_eq!(display.variables(), eq.vars);
    }

    #[test]
    fn declare_equal_is_transitive() {
        let ws = workspace_with(&["ke_def", "pe_def", "work"]);
        let equations: Vec<_> = ws.equations().collect();
        let (ke, pe, work) = (equations[0].lhs, equations[1].lhs, equations[2].lhs);

        let ws = ws.declare_equal(ke, pe).unwrap();
        let ws = ws.declare_equal(pe, work).unwrap();

        assert!(ws.are_equal(ke, work));
        assert_eq!(ws.equality_classes(), vec![vec![ke, pe, work]]);
    }

    #[test]
    fn declare_equal_rejects_dimension_mismatch() {
        let ws = workspace_with(&["ke_def"]);
        let eq = ws.equations().next().unwrap();
        let (energy, mass) = (eq.vars[0], eq.vars[1]);

        let err = ws.declare_equal(energy, mass).unwrap_err();
        assert_eq!(err, WorkspaceError::DimensionMismatch { a: energy, b: mass });
    }

    #[test]
    fn declare_equal_leaves_the_old_snapshot_untouched() {
        let ws = workspace_with(&["ke_def", "pe_def"]);
        let equations: Vec<_> = ws.equations().collect();
        let (ke, pe) = (equations[0].lhs, equations[1].lhs);

        let updated = ws.declare_equal(ke, pe).unwrap();
        assert!(updated.are_equal(ke, pe));
        assert!(!ws.are_equal(ke, pe));
    }

    #[test]
    fn redeclaring_an_equal_pair_changes_nothing() {
        let ws = workspace_with(&["ke_def", "pe_def"]);
        let equations: Vec<_> = ws.equations().collect();
        let (ke, pe) = (equations[0].lhs, equations[1].lhs);

        let once = ws.declare_equal(ke, pe).unwrap();
        let twice = once.declare_equal(pe, ke).unwrap();
        assert_eq!(once.equality_classes(), twice.equality_classes());
    }

    #[test]
    fn add_and_delete_expression() {
        let ws = workspace_with(&["ke_def"]);
        let energy = ws.equations().next().unwrap().lhs;

        let ws = ws.add_expression(energy).unwrap();
        let expr = ws.expressions().next().unwrap().id;
        assert_eq!(ws.last_added(), Some(TileId::Expression(expr)));
        assert_eq!(
            ws.expression_display(expr).unwrap().variables(),
            vec![energy]
        );

        let ws = ws.delete_expression(expr).unwrap();
        assert_eq!(ws.expressions().count(), 0);
        assert_eq!(
            ws.delete_expression(expr).unwrap_err(),
            WorkspaceError::UnknownExpression(expr)
        );
    }

    #[test]
    fn rewrite_substitutes_the_equation_rhs() {
        let ws = workspace_with(&["ke_def"]);
        let eq = ws.equations().next().unwrap();
        let (eq_id, energy) = (eq.id, eq.lhs);
        let eq_vars = eq.vars.clone();

        let ws = ws.add_expression(energy).unwrap();
        let expr = ws.expressions().next().unwrap().id;

        let ws = ws.rewrite_expression(expr, energy, eq_id).unwrap();
        let display = ws.expression_display(expr).unwrap();
        // E_k replaced by (1/2 m v^2): m and v remain, E_k is gone
        assert_eq!(display.variables(), eq_vars[1..].to_vec());
    }

    #[test]
    fn rewrite_through_a_declared_equality() {
        let ws = workspace_with(&["ke_def", "pe_def"]);
        let equations: Vec<_> = ws.equations().collect();
        let ke = equations[0].lhs;
        let (pe, pe_id) = (equations[1].lhs, equations[1].id);

        let ws = ws.declare_equal(ke, pe).unwrap();
        let ws = ws.add_expression(ke).unwrap();
        let expr = ws.expressions().next().unwrap().id;

        // The PE equation defines pe, which is declared equal to ke.
        let ws = ws.rewrite_expression(expr, ke, pe_id).unwrap();
        let vars = ws.expression_display(expr).unwrap().variables();
        assert!(!vars.contains(&ke));
        assert!(!vars.is_empty());
    }

    #[test]
    fn rewrite_with_an_unrelated_equation_is_rejected() {
        let ws = workspace_with(&["ke_def", "newton2"]);
        let equations: Vec<_> = ws.equations().collect();
        let energy = equations[0].lhs;
        let newton = equations[1].id;

        let ws = ws.add_expression(energy).unwrap();
        let expr = ws.expressions().next().unwrap().id;

        let err = ws.rewrite_expression(expr, energy, newton).unwrap_err();
        assert_eq!(
            err,
            WorkspaceError::RewriteNotApplicable {
                replace: energy,
                equation: newton
            }
        );
    }

    #[test]
    fn display_key_resolution_checks_liveness() {
        let ws = workspace_with(&["ke_def"]);
        let eq = ws.equations().next().unwrap();
        let key = AnchorKey::new(TileId::Equation(eq.id), eq.lhs);
        assert_eq!(ws.variable_for_display_key(&key), Some(eq.lhs));

        let stale = AnchorKey::new(TileId::Equation(eq.id), VarId::next());
        assert_eq!(ws.variable_for_display_key(&stale), None);
    }
}
