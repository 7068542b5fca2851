//! The processor/dispatcher pair driving instructions over the state.
//!
//! `process` splits an instruction string into statements, parses each one
//! and dispatches it to its handler in strict source order. `IF` is the
//! only instruction with control-flow effect; it evaluates its condition
//! and re-enters the processor on the chosen branch.

mod handlers;

use game_state::GameState;
use tracing::{debug, trace};

use crate::error::ScriptError;
use crate::expression::evaluate;
use crate::instruction::{Instruction, InstructionKind};
use handlers::ArithOp;

/// Tunables for one state machine.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Maximum `IF` nesting depth before a run is aborted.
    ///
    /// Branch recursion is a plain nested call; the bound turns a
    /// pathologically nested script into a reported failure instead of a
    /// stack overflow.
    pub max_recursion_depth: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: 64,
        }
    }
}

/// Executes instruction strings against a session state.
///
/// The machine holds no session data of its own; everything a script can
/// observe lives in the [`GameState`] handed to [`StateMachine::process`].
/// The caller keeps exclusive ownership of the state between calls and
/// must serialize access across concurrent sessions.
pub struct StateMachine {
    config: MachineConfig,
}

impl StateMachine {
    /// Create a machine with the given configuration.
    pub fn new(config: MachineConfig) -> Self {
        Self { config }
    }

    /// Create a machine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MachineConfig::default())
    }

    /// Execute one instruction string against the state.
    ///
    /// Statements run strictly in source order; the first failure aborts
    /// the rest of the string. Mutations already applied stay applied, so
    /// on error the state may be partially updated - the caller must treat
    /// any error as a content bug and stop advancing the narrative.
    pub fn process(&self, instructions: &str, state: &mut GameState) -> Result<(), ScriptError> {
        self.process_at_depth(instructions, state, 0)
    }

    fn process_at_depth(
        &self,
        instructions: &str,
        state: &mut GameState,
        depth: usize,
    ) -> Result<(), ScriptError> {
        if depth > self.config.max_recursion_depth {
            return Err(ScriptError::RecursionLimitExceeded(
                self.config.max_recursion_depth,
            ));
        }
        // An absent instruction string means zero statements; anything
        // else, including lone whitespace, must parse.
        if instructions.is_empty() {
            return Ok(());
        }
        debug!(depth, instructions, "processing instruction string");
        for statement in instructions.split(';') {
            let instruction = Instruction::parse(statement)?;
            self.dispatch(&instruction, state, depth)?;
        }
        Ok(())
    }

    /// Route one parsed instruction to its handler.
    ///
    /// The match is exhaustive over [`InstructionKind`]; unknown type text
    /// never reaches this point because parsing already rejected it.
    fn dispatch(
        &self,
        instruction: &Instruction,
        state: &mut GameState,
        depth: usize,
    ) -> Result<(), ScriptError> {
        trace!(kind = %instruction.kind, params = ?instruction.params, "dispatching");
        let params = &instruction.params;
        match instruction.kind {
            InstructionKind::Goto => handlers::goto(params, state),
            InstructionKind::Set => handlers::set(params, state),
            InstructionKind::Copy => handlers::copy(params, state),
            InstructionKind::Roll => handlers::roll(params, state),
            InstructionKind::If => self.branch(params, state, depth),
            InstructionKind::Add => handlers::calc(ArithOp::Add, params, state),
            InstructionKind::Sub => handlers::calc(ArithOp::Sub, params, state),
            InstructionKind::Mul => handlers::calc(ArithOp::Mul, params, state),
        }
    }

    /// `IF cond THEN branch [ELSE branch]` - evaluate the condition, then
    /// re-enter the processor on the chosen branch one level deeper.
    ///
    /// An `ELSE` positioned at or before `THEN` leaves the then-branch
    /// empty; an empty branch is a no-op.
    fn branch(
        &self,
        params: &[String],
        state: &mut GameState,
        depth: usize,
    ) -> Result<(), ScriptError> {
        let then_position = params
            .iter()
            .position(|token| token == "THEN")
            .ok_or_else(|| ScriptError::InvalidInstructionFormat(params.join(" ")))?;
        let else_position = params.iter().position(|token| token == "ELSE");

        let condition = params[..then_position].join(" ");
        if evaluate(&condition, state)? {
            let end = else_position.unwrap_or(params.len());
            let then_branch = if end > then_position + 1 {
                params[then_position + 1..end].join(" ")
            } else {
                String::new()
            };
            self.process_at_depth(&then_branch, state, depth + 1)
        } else if let Some(else_position) = else_position {
            let else_branch = params[else_position + 1..].join(" ");
            self.process_at_depth(&else_branch, state, depth + 1)
        } else {
            Ok(())
        }
    }
}
