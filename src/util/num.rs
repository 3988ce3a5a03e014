use crate::{error::RuntimeError, interpreter::evaluator::core::ExecResult};

/// Adds two integers, failing on overflow.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the sum does not fit in an `i64`.
///
/// ## Parameters
/// - `lhs`, `rhs`: The operands.
/// - `line`: Source code line number for error reporting.
///
/// ## Example
/// ```
/// use core_interp::util::num::add_checked;
///
/// assert_eq!(add_checked(2, 3, 1).unwrap(), 5);
/// assert!(add_checked(i64::MAX, 1, 1).is_err());
/// ```
pub fn add_checked(lhs: i64, rhs: i64, line: usize) -> ExecResult<i64> {
    lhs.checked_add(rhs).ok_or(RuntimeError::Overflow { line })
}

/// Subtracts `rhs` from `lhs`, failing on overflow.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the difference does not fit in an
/// `i64`.
///
/// ## Example
/// ```
/// use core_interp::util::num::sub_checked;
///
/// assert_eq!(sub_checked(3, 5, 1).unwrap(), -2);
/// assert!(sub_checked(i64::MIN, 1, 4).is_err());
/// ```
pub fn sub_checked(lhs: i64, rhs: i64, line: usize) -> ExecResult<i64> {
    lhs.checked_sub(rhs).ok_or(RuntimeError::Overflow { line })
}

/// Multiplies two integers, failing on overflow.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the product does not fit in an `i64`.
///
/// ## Example
/// ```
/// use core_interp::{error::RuntimeError, util::num::mul_checked};
///
/// assert_eq!(mul_checked(-4, 6, 1).unwrap(), -24);
/// assert!(matches!(mul_checked(i64::MAX, 2, 7),
///                  Err(RuntimeError::Overflow { line: 7 })));
/// ```
pub fn mul_checked(lhs: i64, rhs: i64, line: usize) -> ExecResult<i64> {
    lhs.checked_mul(rhs).ok_or(RuntimeError::Overflow { line })
}
