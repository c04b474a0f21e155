//! Reader for CNF instances in DIMACS-style text.
//!
//! Tokens may be separated by commas or whitespace, so both `p cnf 3 2` and
//! `p,cnf,3,2` headers are accepted. A file may hold several instances back to back.

use crate::formula::{Clause, Formula, Literal};
use std::io::{BufRead, BufReader, Lines, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },
    #[error("instance ended after {found} of {expected} clauses")]
    Truncated { expected: usize, found: usize },
}

impl DimacsParseError {
    fn format(line: usize, message: impl Into<String>) -> Self {
        DimacsParseError::Format {
            line,
            message: message.into(),
        }
    }
}

/// A formula together with the counts declared by its `p` line.
#[derive(Clone, Debug)]
pub struct Instance {
    pub formula: Formula,
    pub num_variables: usize,
    pub num_clauses: usize,
}

/// Parses the first instance in `reader`.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    match Instances::new(BufReader::new(reader)).next() {
        Some(instance) => instance.map(|instance| instance.formula),
        None => Err(DimacsParseError::format(0, "missing 'p' line before clauses")),
    }
}

/// Iterator over every instance in a multi-instance input.
///
/// A malformed instance yields a single `Err` and its remaining clause lines are
/// skipped, so iteration can carry on with the next instance. I/O errors end the
/// iteration.
pub struct Instances<R> {
    lines: Lines<R>,
    line: usize,
    pending: Option<(usize, Vec<String>)>,
    done: bool,
}

impl<R: BufRead> Instances<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            pending: None,
            done: false,
        }
    }

    /// The next meaningful line as `(line number, tokens)`, skipping blanks and comments.
    fn next_line(&mut self) -> Option<Result<(usize, Vec<String>), DimacsParseError>> {
        if let Some(pending) = self.pending.take() {
            return Some(Ok(pending));
        }
        if self.done {
            return None;
        }
        for line in &mut self.lines {
            self.line += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }
            if trimmed.starts_with('%') {
                self.done = true;
                return None;
            }
            let tokens = trimmed
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(String::from)
                .collect();
            return Some(Ok((self.line, tokens)));
        }
        self.done = true;
        None
    }

    fn read_instance(&mut self, line: usize, header: &[String]) -> Result<Instance, DimacsParseError> {
        let (num_variables, num_clauses) = match parse_header(line, header) {
            Ok(counts) => counts,
            Err(e) => {
                // without a clause count, drop everything up to the next header
                self.skip_to_next_header()?;
                return Err(e);
            }
        };

        let mut clauses = Vec::with_capacity(num_clauses);
        let mut error = None;
        while clauses.len() < num_clauses {
            let (line, tokens) = match self.next_line() {
                Some(next) => next?,
                None => break,
            };
            if is_header(&tokens) {
                self.pending = Some((line, tokens));
                break;
            }
            match parse_clause(line, &tokens) {
                Ok(clause) => clauses.push(clause),
                Err(e) => {
                    // keep consuming this instance's lines so the next one starts cleanly
                    error.get_or_insert(e);
                    clauses.push(Clause::new(vec![]));
                }
            }
        }

        if let Some(e) = error {
            return Err(e);
        }
        if clauses.len() < num_clauses {
            return Err(DimacsParseError::Truncated {
                expected: num_clauses,
                found: clauses.len(),
            });
        }

        Ok(Instance {
            formula: Formula::new(clauses),
            num_variables,
            num_clauses,
        })
    }

    /// Discards lines until the next `p` line, which is left pending.
    fn skip_to_next_header(&mut self) -> Result<(), DimacsParseError> {
        while let Some(next) = self.next_line() {
            let (line, tokens) = next?;
            if is_header(&tokens) {
                self.pending = Some((line, tokens));
                break;
            }
        }
        Ok(())
    }
}

fn is_header(tokens: &[String]) -> bool {
    tokens.first().map(String::as_str) == Some("p")
}

impl<R: BufRead> Iterator for Instances<R> {
    type Item = Result<Instance, DimacsParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (line, tokens) = match self.next_line()? {
            Ok(next) => next,
            Err(e) => return Some(Err(e)),
        };
        if !is_header(&tokens) {
            if let Err(e) = self.skip_to_next_header() {
                return Some(Err(e));
            }
            return Some(Err(DimacsParseError::format(
                line,
                "missing 'p' line before clauses",
            )));
        }
        Some(self.read_instance(line, &tokens))
    }
}

fn parse_header(line: usize, header: &[String]) -> Result<(usize, usize), DimacsParseError> {
    if header.get(1).map(String::as_str) != Some("cnf") {
        return Err(DimacsParseError::format(line, "missing 'cnf'"));
    }

    let num_variables = header
        .get(2)
        .and_then(|c| c.parse::<usize>().ok())
        .ok_or_else(|| DimacsParseError::format(line, "invalid num_variables"))?;

    let num_clauses = header
        .get(3)
        .and_then(|c| c.parse::<usize>().ok())
        .ok_or_else(|| DimacsParseError::format(line, "invalid num_clauses"))?;

    Ok((num_variables, num_clauses))
}

/// One clause per line; the `0` sentinel ends it and anything after it is ignored.
fn parse_clause(line: usize, tokens: &[String]) -> Result<Clause, DimacsParseError> {
    let mut clause = vec![];
    for token in tokens {
        match parse_literal(token) {
            Some(Some(l)) => clause.push(l),
            Some(None) => break,
            None => {
                return Err(DimacsParseError::format(
                    line,
                    format!("invalid literal '{}'", token),
                ))
            }
        }
    }
    Ok(Clause::new(clause))
}

/// `Some(None)` for the `0` sentinel, `None` for a token that is not a literal.
fn parse_literal(s: &str) -> Option<Option<Literal>> {
    match s.parse::<i64>().ok()? {
        0 => Some(None),
        l => Literal::from_dimacs(l).ok().map(Some),
    }
}
