use crate::formula::{Clause, Formula, Literal};

/// The formula left over once `literal` is known to be true.
///
/// Clauses containing `literal` are satisfied and dropped; every other clause loses its
/// occurrences of the negation. A clause that loses its last literal stays behind as an
/// empty clause for the caller to treat as a conflict.
pub fn simplify(formula: &Formula, literal: &Literal) -> Formula {
    let negated = literal.negated();
    Formula::new(
        formula
            .clauses()
            .filter(|clause| !clause.contains(literal))
            .map(|clause| Clause::new(clause.literals().filter(|l| **l != negated).copied())),
    )
}
