//! Trail and outcome invariants over arbitrary collaborator behaviour.

#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use test_fixtures::ScriptedGenerator;

use common::{harness, TOP_FIVE_SQL};

#[derive(Debug, Clone)]
enum Completion {
    Valid,
    Fenced,
    Invalid,
    Fails,
}

fn generator_for(completion: &Completion) -> ScriptedGenerator {
    match completion {
        Completion::Valid => ScriptedGenerator::always(TOP_FIVE_SQL),
        Completion::Fenced => ScriptedGenerator::always(format!("```sql\n{TOP_FIVE_SQL}\n```")),
        Completion::Invalid => ScriptedGenerator::always("SELECT FROM WHERE"),
        Completion::Fails => ScriptedGenerator::failing("timeout"),
    }
}

fn completion() -> impl Strategy<Value = Completion> {
    prop_oneof![
        Just(Completion::Valid),
        Just(Completion::Fenced),
        Just(Completion::Invalid),
        Just(Completion::Fails),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn trail_is_ordered_and_bounded(
        completion in completion(),
        questions in prop::collection::vec("[a-z]{3,8}( [a-z]{3,8}){0,3}", 1..4),
    ) {
        let h = harness(generator_for(&completion));
        for question in &questions {
            let result = h.engine.resolve(question);
            let actors: Vec<&str> = result.message_trail.iter().map(|s| s.actor.as_str()).collect();

            prop_assert_eq!(actors[0], "user");
            prop_assert_eq!(actors[1], "cache_agent");
            prop_assert_eq!(result.message_count, actors.len());
            prop_assert!(actors.len() <= 4);
            for actor in ["cache_agent", "sql_generator", "executor"] {
                prop_assert!(actors.iter().filter(|a| **a == actor).count() <= 1);
            }

            if result.cached {
                prop_assert_eq!(&actors[1..], &["cache_agent", "executor"][..]);
            }
            if result.error.is_some() {
                prop_assert!(result.results.is_empty());
            } else {
                prop_assert_eq!(actors.last().copied(), Some("executor"));
                prop_assert_eq!(result.sql_query.as_str(), TOP_FIVE_SQL);
            }
        }
        // One generation per distinct uncached question at most.
        prop_assert!(h.generator.calls() <= questions.len());
    }
}
