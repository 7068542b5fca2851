//! Conditional-expression evaluation.
//!
//! An expression is a chain of comparison terms separated by `AND`/`OR`
//! connectives: `TERM (('AND'|'OR') TERM)*`, each term `LEFT OP RIGHT`.
//! Terms resolve against the state bag; the chain folds to a single
//! boolean.

mod operand;

pub use operand::*;

use game_state::{GameState, Value};

use crate::error::ScriptError;

/// Boolean connective between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

/// Evaluate a conditional expression against the state.
///
/// Chained connectives fold pairwise over the raw term results in source
/// order: connective `i` combines term results `i` and `i + 1`, and the
/// chain's value is the last combination produced. For three or more terms
/// this differs from a conventional left-associative fold - the final
/// answer is the last connective applied to the last two raw terms.
/// Existing scripts rely on that order, so it is part of the contract.
pub fn evaluate(expression: &str, state: &GameState) -> Result<bool, ScriptError> {
    let mut groups: Vec<Vec<&str>> = vec![Vec::new()];
    let mut connectives: Vec<Connective> = Vec::new();

    for term in expression.split_whitespace() {
        match term {
            "AND" => {
                connectives.push(Connective::And);
                groups.push(Vec::new());
            }
            "OR" => {
                connectives.push(Connective::Or);
                groups.push(Vec::new());
            }
            term => {
                if let Some(group) = groups.last_mut() {
                    group.push(term);
                }
            }
        }
    }

    let mut results = Vec::with_capacity(groups.len());
    for group in &groups {
        results.push(evaluate_term(group, state)?);
    }

    for (index, connective) in connectives.iter().enumerate() {
        if index + 1 >= results.len() {
            return Err(ScriptError::InvalidInstructionFormat(expression.to_string()));
        }
        let combined = match connective {
            Connective::And => results[index] && results[index + 1],
            Connective::Or => results[index] || results[index + 1],
        };
        results.push(combined);
    }

    results
        .last()
        .copied()
        .ok_or_else(|| ScriptError::InvalidInstructionFormat(expression.to_string()))
}

/// Resolve one term group to (left, operand, right) and apply the operand.
fn evaluate_term(tokens: &[&str], state: &GameState) -> Result<bool, ScriptError> {
    let mut left: Option<Value> = None;
    let mut right: Option<Value> = None;
    let mut operand: Option<Operand> = None;

    for token in tokens {
        if let Some(found) = Operand::from_token(token) {
            if left.is_none() {
                return Err(term_error(tokens));
            }
            operand = Some(found);
        } else {
            // Falsy state values fall back to the literal token, mirroring
            // the coercion the loose `==` operand applies.
            let value = state
                .get_truthy(token)
                .cloned()
                .unwrap_or_else(|| Value::from_token(token));
            if left.is_none() {
                left = Some(value);
            } else if right.is_none() {
                right = Some(value);
            } else {
                return Err(term_error(tokens));
            }
        }
    }

    match (left, operand, right) {
        (Some(left), Some(operand), Some(right)) => Ok(operand.apply(&left, &right)),
        _ => Err(term_error(tokens)),
    }
}

fn term_error(tokens: &[&str]) -> ScriptError {
    ScriptError::InvalidInstructionFormat(tokens.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(pairs: &[(&str, Value)]) -> GameState {
        let mut state = GameState::new();
        for (key, value) in pairs {
            state.set(*key, value.clone());
        }
        state
    }

    #[test]
    fn test_single_term() {
        let state = state_with(&[("mood", Value::from("grim"))]);

        assert!(evaluate("mood IS grim", &state).unwrap());
        assert!(!evaluate("mood IS cheerful", &state).unwrap());
    }

    #[test]
    fn test_literals_on_both_sides() {
        let state = GameState::new();

        assert!(evaluate("3 > 2", &state).unwrap());
        assert!(!evaluate("2 > 3", &state).unwrap());
    }

    #[test]
    fn test_and_requires_both_terms() {
        let state = state_with(&[("a", Value::Int(1)), ("b", Value::Int(2))]);

        assert!(evaluate("a IS 1 AND b IS 2", &state).unwrap());
        assert!(!evaluate("a IS 1 AND b IS 3", &state).unwrap());
        assert!(!evaluate("a IS 9 AND b IS 2", &state).unwrap());
    }

    #[test]
    fn test_or_requires_one_term() {
        let state = state_with(&[("a", Value::Int(1)), ("b", Value::Int(2))]);

        assert!(evaluate("a IS 1 OR b IS 9", &state).unwrap());
        assert!(evaluate("a IS 9 OR b IS 2", &state).unwrap());
        assert!(!evaluate("a IS 9 OR b IS 9", &state).unwrap());
    }

    #[test]
    fn test_chain_folds_over_raw_term_results() {
        // Terms resolve to (true, false, true). The chain folds pairwise
        // over raw results, so the answer is the last connective applied
        // to the last two raw terms: false AND true = false. A
        // left-associative fold would give (true OR false) AND true = true.
        let state = state_with(&[("a", Value::Int(1))]);

        assert!(!evaluate("a IS 1 OR a IS 2 AND a IS 1", &state).unwrap());
    }

    #[test]
    fn test_falsy_state_lookup_falls_back_to_literal() {
        let state = state_with(&[("x", Value::Int(0))]);

        // Both sides of `x IS x` resolve to the literal string "x"
        assert!(evaluate("x IS x", &state).unwrap());
        // And the literal "x" is not loosely equal to 0
        assert!(!evaluate("x == 0", &state).unwrap());
    }

    #[test]
    fn test_truthy_state_lookup_resolves() {
        let state = state_with(&[("luck", Value::Int(7))]);

        assert!(evaluate("luck > 5", &state).unwrap());
        assert!(evaluate("luck == 7", &state).unwrap());
        assert!(!evaluate("luck < 7", &state).unwrap());
    }

    #[test]
    fn test_operand_without_left_value_is_error() {
        let state = GameState::new();

        assert_eq!(
            evaluate("IS 1", &state),
            Err(ScriptError::InvalidInstructionFormat("IS 1".to_string()))
        );
    }

    #[test]
    fn test_third_value_in_term_is_error() {
        let state = GameState::new();

        assert!(matches!(
            evaluate("a IS b c", &state),
            Err(ScriptError::InvalidInstructionFormat(_))
        ));
    }

    #[test]
    fn test_term_without_operand_is_error() {
        let state = GameState::new();

        assert!(matches!(
            evaluate("a b", &state),
            Err(ScriptError::InvalidInstructionFormat(_))
        ));
    }

    #[test]
    fn test_term_without_right_value_is_error() {
        let state = GameState::new();

        assert!(matches!(
            evaluate("a IS", &state),
            Err(ScriptError::InvalidInstructionFormat(_))
        ));
    }

    #[test]
    fn test_empty_expression_is_error() {
        let state = GameState::new();

        assert!(matches!(
            evaluate("", &state),
            Err(ScriptError::InvalidInstructionFormat(_))
        ));
    }

    #[test]
    fn test_dangling_connective_is_error() {
        let state = state_with(&[("a", Value::Int(1))]);

        // The trailing AND opens an empty term group
        assert!(matches!(
            evaluate("a IS 1 AND", &state),
            Err(ScriptError::InvalidInstructionFormat(_))
        ));
    }
}
