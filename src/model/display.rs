// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The tagged display tree the canvas renders.
//!
//! `DisplayNode` is a closed union: the renderer matches it exhaustively, so
//! adding a variant without updating the renderer is a build-time error
//! rather than a silently blank tile. Trees are produced by the workspace and
//! are read-only to the presentation layer. They are always finite and
//! acyclic; `Var` is the only variant the interaction layer attaches anchors
//! and hit regions to.

use crate::model::VarId;

/// Main axis for a `Layout` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// Cross-axis alignment for a `Layout` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// One node of a rendered mathematical expression.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayNode {
    /// Children arranged along an axis with a cross-axis alignment.
    /// Pure spacer: carries no interactivity of its own.
    Layout {
        axis: Axis,
        align: Align,
        children: Vec<DisplayNode>,
    },
    /// Children at reduced scale, raised above the baseline
    Superscript { children: Vec<DisplayNode> },
    /// Children at reduced scale, lowered below the baseline
    Subscript { children: Vec<DisplayNode> },
    /// Stacked numerator and denominator with a divider bar
    Fraction {
        numerator: Vec<DisplayNode>,
        denominator: Vec<DisplayNode>,
    },
    /// Literal text span; doubles as the tile-drag handle
    Leaf { text: String },
    /// An interactive variable glyph wrapping its rendered form
    Var { var: VarId, inner: Box<DisplayNode> },
}

impl DisplayNode {
    /// A centered row of children
    pub fn row(children: Vec<DisplayNode>) -> Self {
        DisplayNode::Layout {
            axis: Axis::Row,
            align: Align::Center,
            children,
        }
    }

    pub fn leaf(text: impl Into<String>) -> Self {
        DisplayNode::Leaf { text: text.into() }
    }

    pub fn var(var: VarId, inner: DisplayNode) -> Self {
        DisplayNode::Var {
            var,
            inner: Box::new(inner),
        }
    }

    /// A variable glyph rendering as its symbol text
    pub fn var_symbol(var: VarId, symbol: impl Into<String>) -> Self {
        Self::var(var, Self::leaf(symbol))
    }

    pub fn fraction(numerator: Vec<DisplayNode>, denominator: Vec<DisplayNode>) -> Self {
        DisplayNode::Fraction {
            numerator,
            denominator,
        }
    }

    pub fn superscript(children: Vec<DisplayNode>) -> Self {
        DisplayNode::Superscript { children }
    }

    pub fn subscript(children: Vec<DisplayNode>) -> Self {
        DisplayNode::Subscript { children }
    }

    /// All variable ids mentioned in this tree, in render order.
    pub fn variables(&self) -> Vec<VarId> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut Vec<VarId>) {
        match self {
            DisplayNode::Layout { children, .. }
            | DisplayNode::Superscript { children }
            | DisplayNode::Subscript { children } => {
                for child in children {
                    child.collect_variables(out);
                }
            }
            DisplayNode::Fraction {
                numerator,
                denominator,
            } => {
                for child in numerator.iter().chain(denominator) {
                    child.collect_variables(out);
                }
            }
            DisplayNode::Leaf { .. } => {}
            DisplayNode::Var { var, inner } => {
                out.push(*var);
                inner.collect_variables(out);
            }
        }
    }

    /// Replace every glyph of `target` with `replacement`, returning the
    /// rewritten tree. Used by the workspace when substituting a variable
    /// via an equation.
    pub fn substitute(&self, target: VarId, replacement: &DisplayNode) -> DisplayNode {
        match self {
            DisplayNode::Layout {
                axis,
                align,
                children,
            } => DisplayNode::Layout {
                axis: *axis,
                align: *align,
                children: children
                    .iter()
                    .map(|c| c.substitute(target, replacement))
                    .collect(),
            },
            DisplayNode::Superscript { children } => DisplayNode::Superscript {
                children: children
                    .iter()
                    .map(|c| c.substitute(target, replacement))
                    .collect(),
            },
            DisplayNode::Subscript { children } => DisplayNode::Subscript {
                children: children
                    .iter()
                    .map(|c| c.substitute(target, replacement))
                    .collect(),
            },
            DisplayNode::Fraction {
                numerator,
                denominator,
            } => DisplayNode::Fraction {
                numerator: numerator
                    .iter()
                    .map(|c| c.substitute(target, replacement))
                    .collect(),
                denominator: denominator
                    .iter()
                    .map(|c| c.substitute(target, replacement))
                    .collect(),
            },
            DisplayNode::Leaf { .. } => self.clone(),
            DisplayNode::Var { var, inner } => {
                if *var == target {
                    replacement.clone()
                } else {
                    DisplayNode::Var {
                        var: *var,
                        inner: Box::new(inner.substitute(target, replacement)),
                    }
                }
            }
        }
    }

    /// Linear text form, used by panel labels in place of typeset output.
    pub fn linear_text(&self, symbol_of: &dyn Fn(VarId) -> String) -> String {
        match self {
            DisplayNode::Layout { children, .. } => children
                .iter()
                .map(|c| c.linear_text(symbol_of))
                .collect::<Vec<_>>()
                .join(" "),
            DisplayNode::Superscript { children } => {
                let inner = children
                    .iter()
                    .map(|c| c.linear_text(symbol_of))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("^{inner}")
            }
            DisplayNode::Subscript { children } => {
                let inner = children
                    .iter()
                    .map(|c| c.linear_text(symbol_of))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("_{inner}")
            }
            DisplayNode::Fraction {
                numerator,
                denominator,
            } => {
                let num = numerator
                    .iter()
                    .map(|c| c.linear_text(symbol_of))
                    .collect::<Vec<_>>()
                    .join(" ");
                let den = denominator
                    .iter()
                    .map(|c| c.linear_text(symbol_of))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{num}/{den}")
            }
            DisplayNode::Leaf { text } => text.clone(),
            DisplayNode::Var { var, .. } => symbol_of(*var),
        }
    }
}
