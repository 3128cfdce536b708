//! Property tests: sessions against the brute-force reference model.

use memdb_core::{CoreError, Session, Statement};
use memdb_testkit::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;

fn visible_state(session: &Session) -> HashMap<String, Option<String>> {
    NAMES
        .iter()
        .map(|name| (name.to_string(), session.get(name).map(str::to_string)))
        .collect()
}

fn replay(session: &mut Session, model: &mut ReferenceModel, stmts: &[Statement]) {
    for stmt in stmts {
        let _ = session.execute(stmt);
        let _ = model.apply(stmt);
    }
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn session_matches_model_after_every_step(stmts in statement_sequence_strategy(1, 80)) {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        for stmt in &stmts {
            let actual = session.execute(stmt);
            let expected = model.apply(stmt);
            prop_assert_eq!(actual, expected, "statement {}", stmt);
            if let Err(divergence) = check_session(&session, &model, &NAMES, &VALUES) {
                return Err(TestCaseError::fail(format!("after {stmt}: {divergence}")));
            }
        }
    }

    #[test]
    fn count_is_size_of_visible_holders(stmts in mutation_sequence_strategy(1, 60)) {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        replay(&mut session, &mut model, &stmts);
        for value in VALUES {
            let holders = session.names_holding(value);
            prop_assert_eq!(holders.len(), session.count(value));
            for name in holders {
                prop_assert_eq!(session.get(name), Some(value));
            }
        }
    }

    #[test]
    fn set_then_get_reads_back(
        prefix in mutation_sequence_strategy(0, 40),
        name in name_strategy(),
        value in value_strategy(),
    ) {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        replay(&mut session, &mut model, &prefix);

        session.set(&name, &value);
        prop_assert_eq!(session.get(&name), Some(value.as_str()));
        prop_assert!(session.is_consistent());
    }

    #[test]
    fn delete_then_get_reads_null(
        prefix in mutation_sequence_strategy(0, 40),
        name in name_strategy(),
    ) {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        replay(&mut session, &mut model, &prefix);

        session.delete(&name);
        prop_assert_eq!(session.get(&name), None);
        for value in VALUES {
            prop_assert!(!session.names_holding(value).contains(name.as_str()));
        }
    }

    #[test]
    fn commit_closes_every_transaction(prefix in mutation_sequence_strategy(0, 40)) {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        replay(&mut session, &mut model, &prefix);

        let before = visible_state(&session);
        session.commit();
        prop_assert_eq!(session.depth(), 0);
        prop_assert_eq!(visible_state(&session), before);
        prop_assert_eq!(session.rollback(), Err(CoreError::TransactionNotFound));
    }

    #[test]
    fn rollback_restores_state_before_begin(
        prefix in mutation_sequence_strategy(0, 30),
        inner in mutation_sequence_strategy(0, 30),
    ) {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        replay(&mut session, &mut model, &prefix);

        let depth = session.depth();
        let before = visible_state(&session);
        let counts: Vec<usize> = VALUES.iter().map(|v| session.count(v)).collect();

        session.begin();
        // Inner statements may not close the transaction opened above.
        for stmt in inner.iter().filter(|s| !matches!(s, Statement::Commit | Statement::Rollback)) {
            session.execute(stmt).unwrap();
        }
        let opened = session.depth() - depth;
        for _ in 0..opened {
            session.rollback().unwrap();
        }

        prop_assert_eq!(session.depth(), depth);
        prop_assert_eq!(visible_state(&session), before);
        let after: Vec<usize> = VALUES.iter().map(|v| session.count(v)).collect();
        prop_assert_eq!(after, counts);
    }

    #[test]
    fn arbitrary_names_parse_and_read_back(name in free_name_strategy(), value in free_name_strategy()) {
        let mut session = Session::new();
        let output = run_script(&mut session, &format!("BEGIN\nSET {name} {value}\nGET {name}\nCOUNT {value}"));
        prop_assert_eq!(output, [value.clone(), "1".to_string()]);
        session.commit();
        prop_assert_eq!(session.get(&name), Some(value.as_str()));
    }
}

proptest! {
    #![proptest_config(PropTestConfig::thorough().to_proptest_config())]

    // Long sessions reach depths and layer sizes the default run rarely does.
    // Run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn long_sessions_match_model(stmts in statement_sequence_strategy(50, 300)) {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        for stmt in &stmts {
            prop_assert_eq!(session.execute(stmt), model.apply(stmt));
        }
        if let Err(divergence) = check_session(&session, &model, &NAMES, &VALUES) {
            return Err(TestCaseError::fail(divergence));
        }
    }
}
