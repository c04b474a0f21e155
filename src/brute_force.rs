use crate::assignment::Model;
use crate::formula::Formula;
use crate::SatResult;
use thiserror::Error;

/// Above this the counter would take far too long to be useful as an oracle.
pub const MAX_ORACLE_VARIABLES: usize = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("{variables} variables is too many for exhaustive search (limit {limit})")]
    TooManyVariables { variables: usize, limit: usize },
}

/// Exhaustive reference solver for cross-checking verdicts.
///
/// Candidate assignments to variables `1..=num_variables` are enumerated as a binary counter
/// whose least significant bit is variable 1, from all-false up to all-true. The first
/// satisfying candidate is returned. Literals over variables past `num_variables` are false.
pub fn solve_brute_force(f: &Formula, num_variables: usize) -> Result<SatResult, OracleError> {
    if num_variables > MAX_ORACLE_VARIABLES {
        return Err(OracleError::TooManyVariables {
            variables: num_variables,
            limit: MAX_ORACLE_VARIABLES,
        });
    }

    let assignment_for = |assignment: u64, x: usize| -> bool {
        x >= 1 && x <= num_variables && assignment & (1 << (x - 1)) != 0
    };

    'search: for assignment in 0..(1u64 << num_variables) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment_for(assignment, literal.idx()) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        let model = (1..=num_variables)
            .map(|x| assignment_for(assignment, x))
            .collect();
        return Ok(SatResult::Satisfiable(Model::new(model)));
    }
    // no assignment is valid
    Ok(SatResult::Unsatisfiable)
}
