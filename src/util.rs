/// Checked integer arithmetic.
///
/// Core integers are signed 64-bit values. The helpers in this module perform
/// the three arithmetic operators of the language and turn any overflow into
/// a runtime error tagged with the source line, instead of wrapping or
/// panicking.
pub mod num;
