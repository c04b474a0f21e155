use crate::formula::{Formula, Literal, Variable};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    Unassigned,
    True,
    False,
}

impl Value {
    fn from_bool(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

/// A partial assignment over a fixed set of variables.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assignment {
    values: BTreeMap<Variable, Value>,
}

impl Assignment {
    /// Every variable in `variables` starts out unassigned.
    pub fn new(variables: &BTreeSet<Variable>) -> Self {
        Self {
            values: variables.iter().map(|v| (*v, Value::Unassigned)).collect(),
        }
    }

    pub fn get(&self, variable: Variable) -> Value {
        self.values.get(&variable).copied().unwrap_or(Value::Unassigned)
    }

    /// Makes `literal` true.
    pub fn assign(&mut self, literal: &Literal) {
        self.values
            .insert(*literal.variable(), Value::from_bool(literal.is_positive()));
    }

    /// Copy of this assignment with `literal` made true.
    pub fn with(&self, literal: &Literal) -> Self {
        let mut assignment = self.clone();
        assignment.assign(literal);
        assignment
    }

    pub fn num_unassigned(&self) -> usize {
        self.values.values().filter(|v| **v == Value::Unassigned).count()
    }

    /// Totalizes the assignment: every variable from 1 up to the largest known id
    /// that is unassigned, or absent altogether, becomes false.
    pub fn complete(&self) -> Model {
        let max = self.values.keys().next_back().map(|v| v.0).unwrap_or(0);
        let values = (1..=max)
            .map(|x| self.get(Variable(x)) == Value::True)
            .collect();
        Model { values }
    }
}

/// A total assignment over variables `1..=len`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// `values[i]` is the value of variable `i + 1`.
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, variable: Variable) -> Option<bool> {
        variable
            .0
            .checked_sub(1)
            .and_then(|i| self.values.get(i).copied())
    }

    /// Values in ascending variable order.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, b)| (Variable(i + 1), *b))
    }

    /// Variables outside the model count as false.
    pub fn satisfies_literal(&self, literal: &Literal) -> bool {
        self.value(*literal.variable()).unwrap_or(false) == literal.is_positive()
    }

    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .all(|clause| clause.literals().any(|l| self.satisfies_literal(l)))
    }
}

/// Renders as a list of 0/1 values, e.g. `[1, 0, 1]`.
impl Display for Model {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (variable, value) in self.iter() {
            if variable.0 > 1 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value as u8)?;
        }
        f.write_str("]")
    }
}
