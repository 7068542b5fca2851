//! # State Machine
//!
//! The instruction language of the narrative engine. Each narrative node
//! carries a textual instruction string; this crate parses it, evaluates
//! conditional expressions against the session state and applies the
//! resulting mutations.
//!
//! ## Core Components
//!
//! - **instruction**: statement parsing into typed instructions
//! - **expression**: conditional-expression evaluation (`AND`/`OR` chains)
//! - **machine**: the processor/dispatcher driving handlers over the state
//!
//! ## Design Philosophy
//!
//! - **State-driven**: every handler is a function of (params, state); the
//!   only observable output of a script is the mutated state bag
//! - **Fail-fast**: the first malformed or unresolvable statement aborts
//!   the whole instruction string; nothing is recovered internally
//! - **No hidden control flow**: `IF` re-enters the processor on its chosen
//!   branch instead of running a separate interpreter loop

pub mod error;
pub mod expression;
pub mod instruction;
pub mod machine;

pub use error::*;
pub use expression::*;
pub use instruction::*;
pub use machine::*;
