//! Minimal dice formula evaluator.
//!
//! Understands sums of `NdM` dice, numbers and `@name` variables, e.g.
//! `3d8+@str-1`. Enough for the attack formulas; hosts with a full dice
//! engine plug in their own [`FormulaEvaluator`].

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::{CollaboratorError, FormulaEvaluator, RollResult, RollVariables};

const MAX_DICE: u32 = 100;

#[derive(Debug)]
pub struct DiceEvaluator {
    rng: Mutex<StdRng>,
}

impl DiceEvaluator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible rolls for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn roll(&self, formula: &str, vars: &RollVariables) -> Result<RollResult, CollaboratorError> {
        let fail = |reason: String| CollaboratorError::Formula {
            formula: formula.to_owned(),
            reason,
        };

        let terms = split_terms(formula).map_err(fail)?;
        let mut rng = self.rng.lock().map_err(|_| CollaboratorError::LockPoisoned)?;

        let mut total = 0.0;
        let mut breakdown = String::new();
        for (negative, term) in terms {
            let (value, shown) = evaluate_term(term, vars, &mut *rng).map_err(fail)?;
            if negative {
                total -= value;
                breakdown.push('-');
            } else {
                total += value;
                if !breakdown.is_empty() {
                    breakdown.push('+');
                }
            }
            breakdown.push_str(&shown);
        }
        breakdown.push_str(&format!(" = {total}"));

        Ok(RollResult { total, breakdown })
    }
}

impl Default for DiceEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormulaEvaluator for DiceEvaluator {
    async fn evaluate(
        &self,
        formula: &str,
        vars: &RollVariables,
    ) -> Result<RollResult, CollaboratorError> {
        self.roll(formula, vars)
    }
}

/// Splits `a+b-c` into signed terms.
fn split_terms(formula: &str) -> Result<Vec<(bool, &str)>, String> {
    let formula = formula.trim();
    if formula.is_empty() {
        return Err("empty formula".to_owned());
    }

    let mut terms = Vec::new();
    let mut negative = false;
    let mut start = 0;
    for (index, ch) in formula.char_indices() {
        if ch == '+' || ch == '-' {
            if index > start {
                terms.push((negative, formula[start..index].trim()));
            } else if index != 0 {
                return Err(format!("dangling operator at {index}"));
            }
            negative = ch == '-';
            start = index + 1;
        }
    }
    let last = formula[start..].trim();
    if last.is_empty() {
        return Err("formula ends with an operator".to_owned());
    }
    terms.push((negative, last));
    Ok(terms)
}

fn evaluate_term(
    term: &str,
    vars: &RollVariables,
    rng: &mut impl Rng,
) -> Result<(f64, String), String> {
    if let Some(name) = term.strip_prefix('@') {
        let value = vars
            .get(name)
            .copied()
            .ok_or_else(|| format!("unknown variable @{name}"))?;
        return Ok((value, format!("@{name}({value})")));
    }

    if let Some((count, faces)) = term.split_once('d') {
        let count: u32 = if count.is_empty() {
            1
        } else {
            count
                .parse()
                .map_err(|_| format!("bad dice count in `{term}`"))?
        };
        let faces: u32 = faces
            .parse()
            .map_err(|_| format!("bad die size in `{term}`"))?;
        if faces == 0 || count > MAX_DICE {
            return Err(format!("unsupported dice `{term}`"));
        }

        let rolls: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=faces)).collect();
        let sum: u32 = rolls.iter().sum();
        let shown = rolls
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        return Ok((f64::from(sum), format!("{term}[{shown}]")));
    }

    let value: f64 = term
        .parse()
        .map_err(|_| format!("cannot read `{term}`"))?;
    Ok((value, term.to_owned()))
}
