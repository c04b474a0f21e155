use crate::assignment::Assignment;
use crate::formula::{Clause, Formula};
use crate::solver::simplify::simplify;
use log::trace;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum BcpResult {
    Conflict,
    NoConflict(Formula),
}

/// Unit propagation to a fixpoint.
///
/// The first unit clause in formula order is applied, then the formula is rescanned, since
/// simplifying can create new unit clauses. Every forced literal is recorded in `assignment`.
/// Stops early with `Conflict` as soon as an empty clause shows up.
pub fn propagate(mut formula: Formula, assignment: &mut Assignment) -> BcpResult {
    loop {
        let literal = match formula.clauses().find_map(Clause::unit) {
            Some(literal) => *literal,
            None => break,
        };
        trace!("implied {}", literal);
        assignment.assign(&literal);
        formula = simplify(&formula, &literal);
        if formula.has_empty_clause() {
            trace!("conflict propagating {}", literal);
            return BcpResult::Conflict;
        }
    }
    BcpResult::NoConflict(formula)
}
