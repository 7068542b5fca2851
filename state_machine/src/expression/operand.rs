//! The fixed operand table of the conditional-expression language.

use game_state::Value;

/// A comparison operand - one of the eight fixed spellings scripts may put
/// between the two sides of a term.
///
/// `IS_NOT` and `!=` are alternate spellings of the same strict-inequality
/// predicate. Only `==` coerces across value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `==` - loose, type-coercing equality.
    LooseEq,
    /// `IS` - strict equality (type and payload must match).
    Is,
    /// `IS_NOT` - strict inequality.
    IsNot,
    /// `!=` - strict inequality, alternate spelling.
    NotEq,
    /// `>` - greater than.
    Greater,
    /// `<` - less than.
    Less,
    /// `>=` - greater than or equal.
    GreaterEq,
    /// `<=` - less than or equal.
    LessEq,
}

impl Operand {
    /// Look up a token in the operand table.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "==" => Some(Operand::LooseEq),
            "IS" => Some(Operand::Is),
            "IS_NOT" => Some(Operand::IsNot),
            "!=" => Some(Operand::NotEq),
            ">" => Some(Operand::Greater),
            "<" => Some(Operand::Less),
            ">=" => Some(Operand::GreaterEq),
            "<=" => Some(Operand::LessEq),
            _ => None,
        }
    }

    /// Apply the bound predicate to a resolved (left, right) pair.
    ///
    /// Relational operands order two strings lexicographically and any
    /// other pairing numerically; a side with no numeric view makes the
    /// comparison false.
    pub fn apply(&self, left: &Value, right: &Value) -> bool {
        use std::cmp::Ordering;

        match self {
            Operand::LooseEq => left.loose_eq(right),
            Operand::Is => left == right,
            Operand::IsNot | Operand::NotEq => left != right,
            Operand::Greater => matches!(left.loose_cmp(right), Some(Ordering::Greater)),
            Operand::Less => matches!(left.loose_cmp(right), Some(Ordering::Less)),
            Operand::GreaterEq => matches!(
                left.loose_cmp(right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operand::LessEq => {
                matches!(left.loose_cmp(right), Some(Ordering::Less | Ordering::Equal))
            }
        }
    }
}
