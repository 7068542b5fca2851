//! Parsed instructions - the unit the dispatcher consumes.

use std::str::FromStr;

use crate::error::ScriptError;

/// The closed set of instruction types.
///
/// Scripts spell these as uppercase tags (`SET`, `GOTO`, ...). Keeping the
/// set closed lets the dispatcher match exhaustively; only user-supplied
/// tag text still needs a runtime unknown-type check, which lives in the
/// [`FromStr`] impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    /// Jump to another narrative node (writes the `question` key).
    Goto,
    /// Write a literal value into the state.
    Set,
    /// Copy one key's value to another key.
    Copy,
    /// Roll a die and store the result.
    Roll,
    /// Conditional branch over nested instruction strings.
    If,
    /// Integer addition in place.
    Add,
    /// Integer subtraction in place.
    Sub,
    /// Integer multiplication in place.
    Mul,
}

impl InstructionKind {
    /// The spelling used in scripts.
    pub fn tag(&self) -> &'static str {
        match self {
            InstructionKind::Goto => "GOTO",
            InstructionKind::Set => "SET",
            InstructionKind::Copy => "COPY",
            InstructionKind::Roll => "ROLL",
            InstructionKind::If => "IF",
            InstructionKind::Add => "ADD",
            InstructionKind::Sub => "SUB",
            InstructionKind::Mul => "MUL",
        }
    }
}

impl FromStr for InstructionKind {
    type Err = ScriptError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "GOTO" => Ok(InstructionKind::Goto),
            "SET" => Ok(InstructionKind::Set),
            "COPY" => Ok(InstructionKind::Copy),
            "ROLL" => Ok(InstructionKind::Roll),
            "IF" => Ok(InstructionKind::If),
            "ADD" => Ok(InstructionKind::Add),
            "SUB" => Ok(InstructionKind::Sub),
            "MUL" => Ok(InstructionKind::Mul),
            _ => Err(ScriptError::InvalidInstructionType(tag.to_string())),
        }
    }
}

impl std::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One parsed statement: a type tag plus its parameters in source order.
///
/// Created fresh per statement by the processor and consumed immediately
/// by the dispatcher; never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub params: Vec<String>,
}

impl Instruction {
    /// Parse a single `;`-free statement.
    ///
    /// Splits on whitespace, discards empty tokens and requires at least a
    /// type tag and one parameter. The format check runs before the type
    /// check, so a lone unknown tag reports a malformed statement while an
    /// unknown tag with parameters reports the unknown type.
    pub fn parse(statement: &str) -> Result<Self, ScriptError> {
        let tokens: Vec<&str> = statement.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(ScriptError::InvalidInstructionFormat(statement.to_string()));
        }
        let kind = tokens[0].parse()?;
        let params = tokens[1..].iter().map(|token| token.to_string()).collect();
        Ok(Self { kind, params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statement() {
        let instruction = Instruction::parse("SET gold 120").unwrap();
        assert_eq!(instruction.kind, InstructionKind::Set);
        assert_eq!(instruction.params, vec!["gold", "120"]);
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let instruction = Instruction::parse("  COPY   gold    stash  ").unwrap();
        assert_eq!(instruction.kind, InstructionKind::Copy);
        assert_eq!(instruction.params, vec!["gold", "stash"]);
    }

    #[test]
    fn test_parse_keeps_param_order() {
        let instruction = Instruction::parse("IF luck > 3 THEN GOTO 7 ELSE GOTO 9").unwrap();
        assert_eq!(instruction.kind, InstructionKind::If);
        assert_eq!(
            instruction.params,
            vec!["luck", ">", "3", "THEN", "GOTO", "7", "ELSE", "GOTO", "9"]
        );
    }

    #[test]
    fn test_parse_requires_type_and_param() {
        assert_eq!(
            Instruction::parse("GOTO"),
            Err(ScriptError::InvalidInstructionFormat("GOTO".to_string()))
        );
        assert_eq!(
            Instruction::parse(""),
            Err(ScriptError::InvalidInstructionFormat(String::new()))
        );
        // A lone unknown tag is a format error, not a type error
        assert_eq!(
            Instruction::parse("FOO"),
            Err(ScriptError::InvalidInstructionFormat("FOO".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(
            Instruction::parse("FOO a b"),
            Err(ScriptError::InvalidInstructionType("FOO".to_string()))
        );
    }

    #[test]
    fn test_kind_tags_round_trip() {
        let kinds = [
            InstructionKind::Goto,
            InstructionKind::Set,
            InstructionKind::Copy,
            InstructionKind::Roll,
            InstructionKind::If,
            InstructionKind::Add,
            InstructionKind::Sub,
            InstructionKind::Mul,
        ];
        for kind in kinds {
            assert_eq!(kind.tag().parse::<InstructionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(
            Instruction::parse("set gold 1"),
            Err(ScriptError::InvalidInstructionType("set".to_string()))
        );
    }
}
