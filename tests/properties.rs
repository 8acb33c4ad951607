use std::collections::BTreeSet;

use portal_solutions_featscan::{self as featscan, AnalysisResult, Browser, catalogue, snippet};
use proptest::prelude::*;

/// Statements that parse on their own and in any combination.
const POOL: &[&str] = &[
    "const a = 1;",
    "let b = [1, 2];",
    "var c = d?.e ?? f;",
    "async function g() { await h(); }",
    "class K { #p = 1; static q = 2; }",
    "x.at(-1);",
    "s.includes('y');",
    "new Map([[1, 2]]);",
    "Object.entries(o).flat();",
    "/(?<n>a)/u.test(z);",
    "await i();",
    "for (const v of w) {}",
    "var big = 10n ** 2n;",
    "import('m');",
    "function* gen() { yield 1; }",
    "o ||= {};",
    "new Error('e', { cause: o });",
    "var t = `t${a}`;",
    "var { m, ...rest } = n;",
    "Promise.allSettled([]).finally(() => {});",
];

fn statements() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(POOL.to_vec(), 0..=POOL.len()).prop_shuffle()
}

fn key_set(r: &AnalysisResult) -> BTreeSet<&'static str> {
    r.features.iter().map(|f| f.feature.key).collect()
}

proptest! {
    #[test]
    fn analysis_is_deterministic(stmts in statements()) {
        let src = stmts.join("\n");
        let first = featscan::analyze(&src).unwrap();
        let second = featscan::analyze(&src).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn statement_order_does_not_change_the_key_set(stmts in statements()) {
        let forward = featscan::analyze(&stmts.join("\n")).unwrap();
        let mut reversed = stmts.clone();
        reversed.reverse();
        let backward = featscan::analyze(&reversed.join("\n")).unwrap();
        prop_assert_eq!(key_set(&forward), key_set(&backward));
        prop_assert_eq!(forward.summary, backward.summary);
        prop_assert_eq!(forward.minimum_versions, backward.minimum_versions);
    }

    #[test]
    fn every_key_is_catalogued(stmts in statements()) {
        let r = featscan::analyze(&stmts.join("\n")).unwrap();
        for f in &r.features {
            prop_assert!(catalogue::lookup(f.feature.key).is_some());
            prop_assert!(!f.snippets.is_empty());
        }
        prop_assert_eq!(r.summary.total_features, r.features.len());
    }

    #[test]
    fn matrix_is_the_largest_floor(stmts in statements()) {
        let r = featscan::analyze(&stmts.join("\n")).unwrap();
        for b in Browser::ALL {
            let expected = r
                .features
                .iter()
                .filter_map(|f| catalogue::version_floor(f.feature.support.get(b)))
                .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
            let slot = r.minimum_versions.get(b);
            match expected {
                None => prop_assert_eq!(slot, "No"),
                Some(v) => {
                    prop_assert!(slot.ends_with('+'));
                    prop_assert_eq!(catalogue::version_floor(slot), Some(v));
                }
            }
        }
    }

    #[test]
    fn extractor_never_panics(text in "(?s).{0,80}", start in 0usize..100, len in 0usize..20) {
        let s = snippet::extract(&text, start, start + len);
        prop_assert!(text.contains(&s.match_text));
        prop_assert!(s.context_text.contains(&s.match_text));
        prop_assert!(s.match_line >= s.context_start_line);
        prop_assert_eq!(s.clone(), snippet::extract(&text, start, start + len));
    }
}
