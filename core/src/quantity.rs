// core/src/quantity.rs

//! Quantity clamping for everything the client sends to the cart API, plus
//! the product page stepper built on it.

use serde::Serialize;
use std::fmt;

/// A cart quantity guaranteed to lie in `[1, 99]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u8);

impl Quantity {
  pub const MIN: Quantity = Quantity(1);
  pub const MAX: Quantity = Quantity(99);

  /// Clamps any integer into `[1, 99]`.
  pub fn clamp(raw: i64) -> Self {
    // In range after the clamp, so the narrowing cast is lossless.
    Quantity(raw.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
  }

  /// Parses manual input the way a browser number field is read: leading
  /// integer digits win (`"12abc"` is 12, `"3.7"` is 3), anything
  /// non-numeric becomes 1, and the result is clamped.
  pub fn parse(input: &str) -> Self {
    parse_leading_integer(input).map_or(Self::MIN, Self::clamp)
  }

  pub fn get(self) -> u32 {
    u32::from(self.0)
  }

  /// One more, stopping at 99.
  pub fn increment(self) -> Self {
    Self::clamp(i64::from(self.0) + 1)
  }

  /// One less, stopping at 1.
  pub fn decrement(self) -> Self {
    Self::clamp(i64::from(self.0) - 1)
  }
}

impl Default for Quantity {
  fn default() -> Self {
    Self::MIN
  }
}

impl fmt::Display for Quantity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<Quantity> for u32 {
  fn from(quantity: Quantity) -> Self {
    quantity.get()
  }
}

fn parse_leading_integer(input: &str) -> Option<i64> {
  let trimmed = input.trim_start();
  let (negative, unsigned) = match trimmed.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
  };
  let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
  if digits.is_empty() {
    return None;
  }
  // Overlong digit runs saturate; they clamp to the bound anyway.
  let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
  Some(if negative { -magnitude } else { magnitude })
}

/// The `-` / input / `+` control on the product page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantityStepper {
  value: Quantity,
}

impl QuantityStepper {
  pub fn new(initial: Quantity) -> Self {
    Self { value: initial }
  }

  pub fn value(&self) -> Quantity {
    self.value
  }

  pub fn increase(&mut self) -> Quantity {
    self.value = self.value.increment();
    self.value
  }

  pub fn decrease(&mut self) -> Quantity {
    self.value = self.value.decrement();
    self.value
  }

  /// Re-reads the input field after a manual edit.
  pub fn on_input_changed(&mut self, input: &str) -> Quantity {
    self.value = Quantity::parse(input);
    self.value
  }
}
