pub mod propagate;
pub mod simplify;

use crate::assignment::Assignment;
use crate::formula::{Clause, Formula, Literal, Variable};
use crate::SatResult;
use log::{debug, trace};
use propagate::{propagate, BcpResult};
use simplify::simplify;
use std::collections::BTreeSet;

/// A DPLL solver: unit propagation plus chronological backtracking over the two
/// polarities of a branch literal, with no learning.
///
/// The search is depth-first and tries the branch literal as true before trying it as
/// false. Each node owns its own copy of the remaining formula and of the assignment, so
/// backtracking is just popping the next pending node off an explicit stack.
pub struct Solver {
    formula: Formula,
    variables: BTreeSet<Variable>,
    stats: SolverStats,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SolverStats {
    /// Search nodes visited, including the root.
    pub nodes: usize,
    pub decisions: usize,
    pub conflicts: usize,
}

#[derive(Debug)]
struct Frame {
    formula: Formula,
    assignment: Assignment,
    depth: usize,
}

impl Solver {
    pub fn new(formula: &Formula) -> Self {
        Self::with_variables(formula, formula.variables())
    }

    /// Solve over a caller-supplied variable universe. Variables in `variables` that the
    /// formula never mentions still show up in the model.
    pub fn with_variables(formula: &Formula, mut variables: BTreeSet<Variable>) -> Self {
        variables.extend(formula.variables());
        Self {
            formula: formula.clone(),
            variables,
            stats: SolverStats::default(),
        }
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    pub fn solve(&mut self) -> SatResult {
        self.stats = SolverStats::default();
        let result = self.search();
        debug!(
            "{} after {} nodes, {} decisions, {} conflicts",
            if result.is_satisfiable() { "sat" } else { "unsat" },
            self.stats.nodes,
            self.stats.decisions,
            self.stats.conflicts
        );
        result
    }

    fn search(&mut self) -> SatResult {
        let mut stack = vec![Frame {
            formula: self.formula.clone(),
            assignment: Assignment::new(&self.variables),
            depth: 0,
        }];

        while let Some(Frame {
            formula,
            mut assignment,
            depth,
        }) = stack.pop()
        {
            self.stats.nodes += 1;

            if formula.is_empty() {
                return SatResult::Satisfiable(assignment.complete());
            }
            if formula.has_empty_clause() {
                self.conflict(depth);
                continue;
            }

            let formula = match propagate(formula, &mut assignment) {
                BcpResult::Conflict => {
                    self.conflict(depth);
                    continue;
                }
                BcpResult::NoConflict(formula) => formula,
            };
            if formula.is_empty() {
                return SatResult::Satisfiable(assignment.complete());
            }

            let literal = match branch_literal(&formula) {
                Some(literal) => literal,
                None => {
                    self.conflict(depth);
                    continue;
                }
            };

            self.stats.decisions += 1;
            trace!("decision {} at depth {}", literal, depth + 1);

            // pushed in reverse so that the true branch is explored first
            let negated = literal.negated();
            stack.push(Frame {
                formula: simplify(&formula, &negated),
                assignment: assignment.with(&negated),
                depth: depth + 1,
            });
            stack.push(Frame {
                formula: simplify(&formula, &literal),
                assignment: assignment.with(&literal),
                depth: depth + 1,
            });
        }

        SatResult::Unsatisfiable
    }

    fn conflict(&mut self, depth: usize) {
        self.stats.conflicts += 1;
        trace!("conflict at depth {}, backtracking", depth);
    }
}

/// The first literal of the first clause. `None` if that clause is empty.
fn branch_literal(formula: &Formula) -> Option<Literal> {
    formula.clauses().next().and_then(Clause::first).copied()
}

/// Solve `formula` with a fresh solver.
pub fn solve(formula: &Formula) -> SatResult {
    Solver::new(formula).solve()
}
