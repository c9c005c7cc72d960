//! Psalm 139 devotional reader: library exports for the binary and tests

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;
