pub mod dimacs;

use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// A propositional variable. Ids are 1-based and may be sparse.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FormulaError {
    #[error("invalid literal {0}: literals must be nonzero and fit a variable id")]
    InvalidLiteral(i64),
}

impl Literal {
    /// Builds a literal from its signed-integer form, where the sign is the polarity.
    pub fn from_dimacs(l: i64) -> Result<Self, FormulaError> {
        if l == 0 {
            return Err(FormulaError::InvalidLiteral(l));
        }
        let variable = usize::try_from(l.unsigned_abs())
            .map(Variable)
            .map_err(|_| FormulaError::InvalidLiteral(l))?;
        if l > 0 {
            Ok(Literal::Positive(variable))
        } else {
            Ok(Literal::Negative(variable))
        }
    }

    pub fn to_dimacs(&self) -> i64 {
        match self {
            Literal::Positive(v) => v.0 as i64,
            Literal::Negative(v) => -(v.0 as i64),
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(Variable(x)) => write!(f, "x{}", x),
            Literal::Negative(Variable(x)) => write!(f, "~x{}", x),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// The literal of a unit clause.
    pub fn unit(&self) -> Option<&Literal> {
        match self.literals.as_slice() {
            [literal] => Some(literal),
            _ => None,
        }
    }

    pub fn first(&self) -> Option<&Literal> {
        self.literals.first()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("(")?;
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" v ")?;
            }
            write!(f, "{}", literal)?;
        }
        f.write_str(")")
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    /// Builds a formula from clauses of signed integers, rejecting zero literals.
    pub fn from_dimacs<C, L>(clauses: C) -> Result<Self, FormulaError>
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = i64>,
    {
        let clauses = clauses
            .into_iter()
            .map(|clause| {
                clause
                    .into_iter()
                    .map(Literal::from_dimacs)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Clause::new)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clauses })
    }

    /// The set of variables mentioned anywhere in the formula.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals.iter().map(|literal| *literal.variable()))
            .collect()
    }

    /// The largest variable id mentioned, or 0 for a formula with no literals.
    pub fn max_variable(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals.iter().map(Literal::idx))
            .max()
            .unwrap_or(0)
    }

    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Small random formulas over at most `max_vars` variables, kept small enough for the oracle.
#[cfg(test)]
pub(crate) fn formula_strategy(
    max_vars: usize,
) -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::collection::vec;
    use proptest::prelude::*;

    (1..=max_vars).prop_flat_map(|num_vars| {
        let literal = (1..=num_vars, any::<bool>()).prop_map(|(v, positive)| {
            if positive {
                Literal::Positive(Variable(v))
            } else {
                Literal::Negative(Variable(v))
            }
        });
        vec(vec(literal, 1..=3), 0..=(num_vars * 4))
            .prop_map(|clauses| Formula::new(clauses.into_iter().map(Clause::new)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_env_log::test;

    #[test]
    fn literal_from_dimacs() {
        assert_eq!(Literal::from_dimacs(3), Ok(p(3)));
        assert_eq!(Literal::from_dimacs(-7), Ok(n(7)));
        assert_eq!(Literal::from_dimacs(0), Err(FormulaError::InvalidLiteral(0)));
        assert_eq!(n(7).to_dimacs(), -7);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn literal_from_dimacs_wide() {
        let l = Literal::from_dimacs(-i64::MAX).unwrap();
        assert_eq!(l.idx(), i64::MAX as usize);
        assert!(!l.is_positive());
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn literal_from_dimacs_out_of_range() {
        let big = i64::from(u32::MAX) + 1;
        assert_eq!(Literal::from_dimacs(big), Err(FormulaError::InvalidLiteral(big)));
        assert_eq!(Literal::from_dimacs(-big), Err(FormulaError::InvalidLiteral(-big)));
    }

    #[test]
    fn formula_from_dimacs_rejects_zero() {
        let f = Formula::from_dimacs(vec![vec![1, -2], vec![2]]).expect("valid formula");
        assert_eq!(f.len(), 2);
        assert_eq!(f.num_literals(), 3);

        let e = Formula::from_dimacs(vec![vec![1, 0, 2]]);
        assert_eq!(e, Err(FormulaError::InvalidLiteral(0)));
    }

    #[test]
    fn variables_are_union_of_magnitudes() {
        let f = Formula::from_dimacs(vec![vec![1, -16], vec![-1, 14, 1], vec![]]).unwrap();
        let vars = f.variables().into_iter().map(|v| v.0).collect::<Vec<_>>();
        assert_eq!(vars, vec![1, 14, 16]);
        assert_eq!(f.max_variable(), 16);
        assert!(f.has_empty_clause());
        assert_eq!(Formula::default().max_variable(), 0);
    }

    #[test]
    fn pretty_print() {
        let f = Formula::from_dimacs(vec![vec![1, -3], vec![2, 3, -1]]).unwrap();
        assert_eq!(f.to_string(), "(x1 v ~x3) & (x2 v x3 v ~x1)");
        assert_eq!(Formula::default().to_string(), "");
        assert_eq!(Formula::new(vec![Clause::new(vec![])]).to_string(), "()");
    }

    #[test]
    fn unit_clause() {
        assert_eq!(Clause::new(vec![n(2)]).unit(), Some(&n(2)));
        assert_eq!(Clause::new(vec![n(2), n(2)]).unit(), None);
        assert_eq!(Clause::new(vec![]).unit(), None);
    }
}
