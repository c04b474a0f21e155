//! Text reports for the comparison driver: one status line per instance, an overall
//! summary, and boxed per-instance trace blocks.

use crate::formula::Formula;
use crate::SatResult;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use std::time::Duration;

const STATUS_WIDTH: usize = 10;

pub fn verdict(result: &SatResult) -> &'static str {
    if result.is_satisfiable() {
        "SATISFIABLE"
    } else {
        "UNSATISFIABLE"
    }
}

/// The outcome of one instance: the DPLL result and, when verification ran, the oracle's.
#[derive(Clone, Debug)]
pub struct Comparison {
    /// 1-based position of the instance in the input.
    pub index: usize,
    pub formula: Formula,
    pub dpll: SatResult,
    pub dpll_time: Duration,
    pub oracle: Option<(SatResult, Duration)>,
}

impl Comparison {
    /// `None` when the oracle did not run.
    pub fn agrees(&self) -> Option<bool> {
        self.oracle
            .as_ref()
            .map(|(oracle, _)| oracle.is_satisfiable() == self.dpll.is_satisfiable())
    }

    /// e.g. `WFF 12..... Success   SATISFIABLE`
    pub fn status_line(&self) -> String {
        let number = self.index.to_string();
        let dots = ".".repeat(7usize.saturating_sub(number.len()));
        match self.agrees() {
            None => format!("WFF {}{} {}", number, dots, verdict(&self.dpll)),
            Some(true) => format!(
                "WFF {}{} {:<width$}{}",
                number,
                dots,
                "Success",
                verdict(&self.dpll),
                width = STATUS_WIDTH
            ),
            Some(false) => format!(
                "WFF {}{} {:<width$} <----",
                number,
                dots,
                "Failure",
                width = STATUS_WIDTH
            ),
        }
    }

    /// Writes the boxed trace block for this instance, followed by three blank lines.
    ///
    /// The box is as wide as its longest line, so every row closes on the same column.
    pub fn write_trace<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut sections = vec![vec![
            self.formula.to_string(),
            format!(
                "{} clauses, {} literals",
                self.formula.len(),
                self.formula.num_literals()
            ),
        ]];

        let mut verdicts = vec![format!("DPLL - {}", verdict(&self.dpll))];
        if let Some((oracle, _)) = &self.oracle {
            verdicts.push(format!("Brute force - {}", verdict(oracle)));
        }
        sections.push(verdicts);

        let mut assignments = vec![];
        let mut times = vec![];
        if let Some(model) = self.dpll.model() {
            assignments.push(format!("DPLL Assignment:        {}", model));
            times.push(format!("DPLL Execution Time: {:.2e}", self.dpll_time.as_secs_f64()));
        }
        if let Some((SatResult::Satisfiable(model), oracle_time)) = &self.oracle {
            assignments.push(format!("Brute force Assignment: {}", model));
            times.push(format!(
                "Brute force Execution Time: {:.2e}",
                oracle_time.as_secs_f64()
            ));
        }
        if !assignments.is_empty() {
            // assignment lines share one left edge so their values line up
            let max_width = assignments.iter().map(String::len).max().unwrap_or(0);
            let assignments = assignments
                .iter()
                .map(|line| format!("{:<width$}", line, width = max_width))
                .collect();
            sections.push(assignments);
            sections.push(times);
        }

        let number = self.index.to_string();
        let longest = sections.iter().flatten().map(String::len).max().unwrap_or(0);
        let width = longest.max(number.len()) + 4;
        let left = (width - number.len()) / 2;
        let right = width - number.len() - left;
        let rule = format!("+{}+", "-".repeat(width));

        writeln!(w, "+{}{}{}+", "-".repeat(left), number, "-".repeat(right))?;
        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                writeln!(w, "{}", rule)?;
            }
            for line in section {
                write_centered(w, line, width)?;
            }
        }
        writeln!(w, "{}", rule)?;

        writeln!(w)?;
        writeln!(w)?;
        writeln!(w)
    }
}

fn write_centered<W: Write>(w: &mut W, text: &str, width: usize) -> io::Result<()> {
    let padding = width.saturating_sub(text.len());
    let left = padding / 2;
    writeln!(w, "|{}{}{}|", " ".repeat(left), text, " ".repeat(padding - left))
}

/// Running totals over every instance of a batch, plus the status lines seen so far.
#[derive(Clone, Debug, Default)]
pub struct Summary {
    pub tested: usize,
    pub satisfiable: usize,
    pub unsatisfiable: usize,
    pub matching: usize,
    pub mismatching: usize,
    pub skipped: usize,
    verified: bool,
    lines: Vec<String>,
}

impl Summary {
    pub fn record(&mut self, comparison: &Comparison) {
        self.tested += 1;
        match comparison.agrees() {
            Some(false) => {
                self.verified = true;
                self.mismatching += 1;
            }
            agrees => {
                if agrees.is_some() {
                    self.verified = true;
                    self.matching += 1;
                }
                if comparison.dpll.is_satisfiable() {
                    self.satisfiable += 1;
                } else {
                    self.unsatisfiable += 1;
                }
            }
        }
        self.lines.push(comparison.status_line());
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn all_agree(&self) -> bool {
        self.mismatching == 0
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{} WFFs tested. ", self.tested)?;
        writeln!(f, "{} WFFs SATISFIABLE. ", self.satisfiable)?;
        writeln!(f, "{} WFFs UNSATISFIABLE. ", self.unsatisfiable)?;
        if self.skipped > 0 {
            writeln!(f, "{} WFFs skipped as malformed. ", self.skipped)?;
        }
        if self.verified {
            writeln!(f, "{} WFFs with matching results. ", self.matching)?;
            writeln!(f, "{} WFFs with mismatching results. ", self.mismatching)?;
            if self.all_agree() {
                writeln!(f, "No mismatching results found... SUCCESS! ")?;
            } else {
                writeln!(f, "Mismatching results found. ")?;
            }
        }
        writeln!(f, "{}", "-".repeat(45))?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Model;
    use test_env_log::test;

    fn comparison(index: usize, dpll: SatResult, oracle: Option<SatResult>) -> Comparison {
        Comparison {
            index,
            formula: Formula::from_dimacs(vec![vec![1, -2], vec![2]]).unwrap(),
            dpll,
            dpll_time: Duration::from_micros(12),
            oracle: oracle.map(|o| (o, Duration::from_micros(340))),
        }
    }

    fn sat() -> SatResult {
        SatResult::Satisfiable(Model::new(vec![true, true]))
    }

    #[test]
    fn status_lines() {
        assert_eq!(
            comparison(1, sat(), Some(sat())).status_line(),
            "WFF 1...... Success   SATISFIABLE"
        );
        assert_eq!(
            comparison(12, SatResult::Unsatisfiable, Some(SatResult::Unsatisfiable)).status_line(),
            "WFF 12..... Success   UNSATISFIABLE"
        );
        assert_eq!(
            comparison(3, sat(), Some(SatResult::Unsatisfiable)).status_line(),
            "WFF 3...... Failure    <----"
        );
        assert_eq!(
            comparison(4, SatResult::Unsatisfiable, None).status_line(),
            "WFF 4...... UNSATISFIABLE"
        );
    }

    #[test]
    fn summary_counts() {
        let mut summary = Summary::default();
        summary.record(&comparison(1, sat(), Some(sat())));
        summary.record(&comparison(2, SatResult::Unsatisfiable, Some(SatResult::Unsatisfiable)));
        summary.record(&comparison(3, sat(), Some(SatResult::Unsatisfiable)));
        summary.record_skipped();

        assert_eq!(summary.tested, 3);
        assert_eq!(summary.satisfiable, 1);
        assert_eq!(summary.unsatisfiable, 1);
        assert_eq!(summary.matching, 2);
        assert_eq!(summary.mismatching, 1);
        assert!(!summary.all_agree());

        let text = summary.to_string();
        assert!(text.starts_with("3 WFFs tested. \n"));
        assert!(text.contains("1 WFFs skipped as malformed. \n"));
        assert!(text.contains("Mismatching results found. \n"));
        assert!(text.ends_with("WFF 3...... Failure    <----\n"));
    }

    #[test]
    fn summary_without_verification() {
        let mut summary = Summary::default();
        summary.record(&comparison(1, sat(), None));
        let text = summary.to_string();
        assert!(!text.contains("matching"));
        assert!(summary.all_agree());
    }

    fn trace_lines(comparison: &Comparison) -> (String, Vec<String>) {
        let mut out = vec![];
        comparison.write_trace(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().map(String::from).collect();
        (text, lines)
    }

    fn assert_box_closed(lines: &[String]) {
        let boxed = lines.iter().filter(|l| !l.is_empty()).collect::<Vec<_>>();
        assert!(boxed.len() > 3);
        for line in &boxed {
            assert_eq!(line.len(), boxed[0].len(), "ragged row {:?}", line);
            assert!(line.starts_with('+') || line.starts_with('|'));
            assert!(line.ends_with('+') || line.ends_with('|'));
        }
    }

    #[test]
    fn trace_block() {
        let (text, lines) = trace_lines(&comparison(1, sat(), Some(sat())));
        assert_box_closed(&lines);

        // the longest row, "Brute force Execution Time: ...", sets the width
        let longest = "Brute force Execution Time: 3.40e-4".len();
        assert_eq!(lines[0].len(), longest + 6);
        let dashes = lines[0].trim_matches('+').split('1').collect::<Vec<_>>();
        assert_eq!(dashes.len(), 2);
        assert!(dashes[1].len() - dashes[0].len() <= 1);

        assert_eq!(lines[1].trim_matches('|').trim(), "(x1 v ~x2) & (x2)");
        assert_eq!(lines[2].trim_matches('|').trim(), "2 clauses, 3 literals");
        assert!(lines[3].starts_with("+-"));
        assert_eq!(lines[4].trim_matches('|').trim(), "DPLL - SATISFIABLE");
        assert_eq!(lines[5].trim_matches('|').trim(), "Brute force - SATISFIABLE");
        assert!(text.contains("DPLL Assignment:        [1, 1]"));
        assert!(text.contains("Brute force Assignment: [1, 1]"));
        assert!(text.contains("DPLL Execution Time: 1.20e-5"));
        assert!(text.ends_with("+\n\n\n\n"));
    }

    #[test]
    fn trace_block_short_formula() {
        let mut c = comparison(7, SatResult::Unsatisfiable, Some(SatResult::Unsatisfiable));
        c.formula = Formula::from_dimacs(vec![vec![1], vec![-1]]).unwrap();
        let (_, lines) = trace_lines(&c);
        assert_box_closed(&lines);
        assert_eq!(lines[0].len(), "Brute force - UNSATISFIABLE".len() + 6);
    }

    #[test]
    fn trace_block_mismatch_keeps_dpll_assignment() {
        let (text, lines) = trace_lines(&comparison(5, sat(), Some(SatResult::Unsatisfiable)));
        assert_box_closed(&lines);
        assert!(text.contains("DPLL Assignment:        [1, 1]"));
        assert!(!text.contains("Brute force Assignment"));
        assert!(text.contains("Brute force - UNSATISFIABLE"));
    }

    #[test]
    fn trace_block_unsat_has_no_assignments() {
        let mut out = vec![];
        comparison(2, SatResult::Unsatisfiable, Some(SatResult::Unsatisfiable))
            .write_trace(&mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DPLL - UNSATISFIABLE"));
        assert!(!text.contains("Assignment"));
        assert!(!text.contains("Execution Time"));
    }
}
