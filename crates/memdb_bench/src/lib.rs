//! Benchmark utilities for MemDB.

use memdb_core::Session;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate `count` distinct names of the form `n{i}`.
pub fn generate_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("n{i}")).collect()
}

/// Generate a random value drawn from `distinct` possible values.
pub fn random_value(distinct: usize) -> String {
    let mut rng = rand::thread_rng();
    format!("v{}", rng.gen_range(0..distinct.max(1)))
}

/// Build a session whose base store holds every name in `names`, each with
/// a random value out of `distinct`.
pub fn populated_session(names: &[String], distinct: usize) -> Session {
    let mut session = Session::new();
    for name in names {
        session.set(name, &random_value(distinct));
    }
    session
}

/// Open `depth` transactions on `session`, each overwriting `writes_per_layer`
/// randomly chosen names from `names`.
pub fn stack_layers(
    session: &mut Session,
    names: &[String],
    depth: usize,
    writes_per_layer: usize,
    distinct: usize,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..depth {
        session.begin();
        for name in names.choose_multiple(&mut rng, writes_per_layer) {
            if rng.gen_bool(0.2) {
                session.delete(name);
            } else {
                session.set(name, &random_value(distinct));
            }
        }
    }
}
