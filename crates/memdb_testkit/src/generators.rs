//! Property-based test generators using proptest.
//!
//! Names and values are drawn from small pools so that random sequences
//! collide often: re-setting, deleting, and shadowing the same names across
//! layers is what exercises the reverse indexes.

use memdb_core::Statement;
use proptest::prelude::*;

/// Names used by the generators.
pub const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];

/// Values used by the generators.
pub const VALUES: [&str; 4] = ["foo", "bar", "baz", "qux"];

/// Strategy for generating a name from [`NAMES`].
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(str::to_string)
}

/// Strategy for generating a value from [`VALUES`].
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(VALUES.to_vec()).prop_map(str::to_string)
}

/// Strategy for generating arbitrary names, outside the fixed pool.
pub fn free_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,15}").expect("Invalid regex")
}

/// Strategy for a statement that changes the session.
///
/// Weighted towards point writes so that layers accumulate content before
/// they are committed or rolled back.
pub fn mutation_strategy() -> impl Strategy<Value = Statement> {
    prop_oneof![
        6 => (name_strategy(), value_strategy())
            .prop_map(|(name, value)| Statement::Set { name, value }),
        3 => name_strategy().prop_map(|name| Statement::Delete { name }),
        2 => Just(Statement::Begin),
        1 => Just(Statement::Commit),
        1 => Just(Statement::Rollback),
    ]
}

/// Strategy for any statement except END.
pub fn statement_strategy() -> impl Strategy<Value = Statement> {
    prop_oneof![
        8 => mutation_strategy(),
        1 => name_strategy().prop_map(|name| Statement::Get { name }),
        1 => value_strategy().prop_map(|value| Statement::Count { value }),
    ]
}

/// Strategy for generating a sequence of mutations.
pub fn mutation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Statement>> {
    prop::collection::vec(mutation_strategy(), min_ops..max_ops)
}

/// Strategy for generating a sequence of statements.
pub fn statement_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Statement>> {
    prop::collection::vec(statement_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for long soak runs against the reference
    /// model, meant for `#[ignore]`d tests run on demand.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 3000,
            max_shrink_iters: 4096,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
