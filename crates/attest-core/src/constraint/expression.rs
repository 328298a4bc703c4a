//! Operator expressions built up one token at a time.

use std::fmt;

use super::{AndConstraint, Constraint, NotConstraint, OrConstraint, ResolveConstraint};
use crate::error::{AssertResult, AssertionError};

enum Token<T: ?Sized> {
    Operand(Box<dyn Constraint<T>>),
    Not,
    And,
    Or,
}

/// A constraint written as a sequence of operands and operators.
///
/// ```ignore
/// let expr = ConstraintExpression::new()
///     .not()
///     .constraint(is::zero())
///     .and()
///     .constraint(is::less_than(10));
/// ```
///
/// `not` binds tighter than `and`, which binds tighter than `or`. The
/// expression is only checked when it is resolved.
pub struct ConstraintExpression<T: ?Sized + 'static> {
    tokens: Vec<Token<T>>,
}

impl<T: ?Sized + 'static> ConstraintExpression<T> {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn not(mut self) -> Self {
        self.tokens.push(Token::Not);
        self
    }

    pub fn and(mut self) -> Self {
        self.tokens.push(Token::And);
        self
    }

    pub fn or(mut self) -> Self {
        self.tokens.push(Token::Or);
        self
    }

    pub fn constraint<C>(mut self, constraint: C) -> Self
    where
        C: Constraint<T> + 'static,
    {
        self.tokens.push(Token::Operand(Box::new(constraint)));
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Builds the constraint tree.
    pub fn build(self) -> AssertResult<Box<dyn Constraint<T>>> {
        if self.tokens.is_empty() {
            return Err(malformed("the constraint expression is empty"));
        }

        let mut operands: Vec<Box<dyn Constraint<T>>> = Vec::new();
        let mut operators: Vec<Token<T>> = Vec::new();
        let mut pending_not = 0usize;
        let mut expect_operand = true;

        for token in self.tokens {
            match token {
                Token::Not => {
                    if !expect_operand {
                        return Err(malformed("'not' must precede a constraint"));
                    }
                    pending_not += 1;
                }
                Token::Operand(constraint) => {
                    if !expect_operand {
                        return Err(malformed("two constraints without an operator between them"));
                    }
                    let mut operand = constraint;
                    for _ in 0..pending_not {
                        operand = Box::new(NotConstraint::new(operand));
                    }
                    pending_not = 0;
                    operands.push(operand);
                    expect_operand = false;
                }
                operator @ (Token::And | Token::Or) => {
                    if expect_operand {
                        return Err(malformed("an operator is missing its left operand"));
                    }
                    operators.push(operator);
                    expect_operand = true;
                }
            }
        }

        if expect_operand {
            return Err(malformed("the constraint expression ends with an operator"));
        }

        let mut operands = operands.into_iter();
        let mut current = operands
            .next()
            .ok_or_else(|| malformed("the constraint expression has no constraint"))?;
        let mut alternatives = Vec::new();
        for (operator, next) in operators.into_iter().zip(operands) {
            match operator {
                Token::And => current = Box::new(AndConstraint::new(current, next)),
                _ => {
                    alternatives.push(current);
                    current = next;
                }
            }
        }
        alternatives.push(current);

        let mut alternatives = alternatives.into_iter();
        let first = alternatives
            .next()
            .ok_or_else(|| malformed("the constraint expression has no constraint"))?;
        Ok(alternatives.fold(first, |tree, next| -> Box<dyn Constraint<T>> {
            Box::new(OrConstraint::new(tree, next))
        }))
    }
}

impl<T: ?Sized + 'static> Default for ConstraintExpression<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for ConstraintExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self
            .tokens
            .iter()
            .map(|token| match token {
                Token::Operand(constraint) => constraint.description(),
                Token::Not => "not".to_string(),
                Token::And => "and".to_string(),
                Token::Or => "or".to_string(),
            })
            .collect();
        f.debug_struct("ConstraintExpression")
            .field("tokens", &tokens)
            .finish()
    }
}

impl<T: ?Sized + 'static> ResolveConstraint<T> for ConstraintExpression<T> {
    type Resolved = Box<dyn Constraint<T>>;

    fn resolve(self) -> AssertResult<Self::Resolved> {
        self.build()
    }
}

fn malformed(reason: &str) -> AssertionError {
    AssertionError::InvalidOperation(format!("Invalid constraint expression: {}", reason))
}
