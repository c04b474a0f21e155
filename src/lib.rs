pub mod assignment;
pub mod brute_force;
pub mod formula;
pub mod report;
pub mod solver;

use assignment::Model;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use formula::{Clause, Formula, FormulaError, Literal, Variable};
pub use solver::{solve, Solver};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{n, p};
    use test_env_log::test;

    #[test]
    fn solve_bcp_sat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2]);

        let mut solver = Solver::new(&f);
        let result = solver.solve();
        assert!(result.is_satisfiable());
        assert_eq!(result.model().map(|m| m.values().to_vec()), Some(vec![false, true]));
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let c3 = Clause::new(vec![n(2)]);
        let f = Formula::new(vec![c1, c2, c3]);

        let mut solver = Solver::new(&f);
        assert_eq!(solver.solve(), SatResult::Unsatisfiable);
        assert_eq!(solver.solve().model(), None);
    }

    #[test]
    fn solve_conflict_sat() {
        let c1 = Clause::new(vec![p(1), p(2), p(3)]);
        let c2 = Clause::new(vec![n(1), n(2), p(3)]);
        let c3 = Clause::new(vec![n(2), n(3)]);
        let f = Formula::new(vec![c1, c2, c3]);

        let result = solve(&f);
        assert!(result.is_satisfiable());
        assert!(solve_brute_force(&f, 3).unwrap().is_satisfiable());
    }
}
