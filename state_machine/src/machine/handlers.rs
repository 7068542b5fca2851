//! Instruction handlers - each a function of (params, state).
//!
//! Handlers validate parameter arity before acting and limit their side
//! effects to mutating the state bag. The `IF` handler lives on the
//! machine itself because it re-enters the processor.

use game_state::{GameState, Value, QUESTION_KEY};
use rand::Rng;

use crate::error::ScriptError;

/// Largest die a script may roll.
const MAX_DICE_SIZE: i64 = 1000;

/// `GOTO target` - jump to another narrative node by writing the
/// `question` key.
pub(super) fn goto(params: &[String], state: &mut GameState) -> Result<(), ScriptError> {
    if params.len() != 1 {
        return Err(invalid_params(params));
    }
    state.set(QUESTION_KEY, Value::from_token(&params[0]));
    Ok(())
}

/// `SET key value` - ingest the value token and write it into the state.
pub(super) fn set(params: &[String], state: &mut GameState) -> Result<(), ScriptError> {
    if params.len() != 2 {
        return Err(invalid_params(params));
    }
    state.set(params[0].clone(), Value::from_token(&params[1]));
    Ok(())
}

/// `COPY src dst` - copy one key's value to another.
///
/// A missing or falsy source value is a format error: the statement asked
/// to propagate a value that is not there.
pub(super) fn copy(params: &[String], state: &mut GameState) -> Result<(), ScriptError> {
    if params.len() != 2 {
        return Err(invalid_params(params));
    }
    let value = match state.get(&params[0]) {
        Some(value) if value.is_truthy() => value.clone(),
        _ => return Err(invalid_params(params)),
    };
    state.set(params[1].clone(), value);
    Ok(())
}

/// `ROLL dice dst` - draw a uniform integer in `[1, dice]` and store it.
pub(super) fn roll(params: &[String], state: &mut GameState) -> Result<(), ScriptError> {
    if params.len() != 2 {
        return Err(invalid_params(params));
    }
    let dice: i64 = params[0]
        .parse()
        .map_err(|_| ScriptError::InvalidInstructionFormat(params[0].clone()))?;
    if !(1..=MAX_DICE_SIZE).contains(&dice) {
        return Err(ScriptError::InvalidInstructionFormat(params[0].clone()));
    }
    let value = rand::thread_rng().gen_range(1..=dice);
    state.set(params[1].clone(), Value::Int(value));
    Ok(())
}

/// Arithmetic selector shared by `ADD`, `SUB` and `MUL`.
#[derive(Debug, Clone, Copy)]
pub(super) enum ArithOp {
    Add,
    Sub,
    Mul,
}

impl ArithOp {
    fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ArithOp::Add => "ADD",
            ArithOp::Sub => "SUB",
            ArithOp::Mul => "MUL",
        }
    }
}

/// `ADD|SUB|MUL a b` - integer arithmetic written back into `a`.
///
/// Operands resolve as integer literals first, then through the numeric
/// view of the named state key. Absent, non-numeric and zero (falsy)
/// resolutions are undefined-value failures.
pub(super) fn calc(op: ArithOp, params: &[String], state: &mut GameState) -> Result<(), ScriptError> {
    if params.len() != 2 {
        return Err(ScriptError::InvalidInstructionFormat(format!(
            "{} {}",
            op.tag(),
            params.join(" ")
        )));
    }
    let a = resolve_operand(&params[0], state)?;
    let b = resolve_operand(&params[1], state)?;
    state.set(params[0].clone(), Value::Int(op.apply(a, b)));
    Ok(())
}

/// Resolve one arithmetic operand to a non-zero integer.
fn resolve_operand(token: &str, state: &GameState) -> Result<i64, ScriptError> {
    let number = match token.parse::<i64>() {
        Ok(number) => Some(number),
        Err(_) => state.get(token).and_then(Value::as_number),
    };
    match number {
        Some(number) if number != 0 => Ok(number),
        _ => Err(ScriptError::UndefinedValue(token.to_string())),
    }
}

fn invalid_params(params: &[String]) -> ScriptError {
    ScriptError::InvalidInstructionFormat(params.join(" "))
}
