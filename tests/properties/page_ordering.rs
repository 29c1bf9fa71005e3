//! Property tests for head script ordering.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use proptest::sample::Index;

use pagedeps::catalog::AssetCatalog;
use pagedeps::page::PageAssetSet;

/// Library `i` may depend only on libraries `0..i`, mirroring the rule that
/// dependencies are registered first.
fn dag_strategy() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<usize>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            proptest::collection::vec(proptest::collection::vec(any::<Index>(), 0..3), n),
            proptest::collection::vec(0..n, 1..8),
        )
            .prop_map(|(picks, required)| {
                let deps = picks
                    .into_iter()
                    .enumerate()
                    .map(|(i, picks)| {
                        if i == 0 {
                            return Vec::new();
                        }
                        let set: BTreeSet<usize> = picks.iter().map(|p| p.index(i)).collect();
                        set.into_iter().collect()
                    })
                    .collect();
                (deps, required)
            })
    })
}

fn name(i: usize) -> String {
    format!("lib{i}")
}

fn url(i: usize) -> String {
    format!("/lib{i}.js")
}

fn build_catalog(deps: &[Vec<usize>]) -> AssetCatalog {
    let mut catalog = AssetCatalog::default();
    for (i, direct) in deps.iter().enumerate() {
        let names: Vec<String> = direct.iter().map(|d| name(*d)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        catalog.register_library(&name(i), url(i), &names).unwrap();
    }
    catalog
}

fn closure(deps: &[Vec<usize>], i: usize, out: &mut BTreeSet<usize>) {
    for d in &deps[i] {
        if out.insert(*d) {
            closure(deps, *d, out);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every URL is emitted once, after the URLs of all its dependencies.
    #[test]
    fn property_dependencies_precede_dependents((deps, required) in dag_strategy()) {
        let catalog = build_catalog(&deps);
        let mut page = PageAssetSet::new(&catalog);
        for i in &required {
            page.require_library(&name(*i)).unwrap();
        }

        let urls = page.script_urls();
        let position: HashMap<&str, usize> =
            urls.iter().enumerate().map(|(pos, url)| (*url, pos)).collect();
        prop_assert_eq!(position.len(), urls.len(), "duplicate url in {:?}", urls);

        let mut expected = BTreeSet::new();
        for i in &required {
            expected.insert(*i);
            closure(&deps, *i, &mut expected);
        }
        let expected_urls: BTreeSet<String> = expected.iter().map(|i| url(*i)).collect();
        let actual_urls: BTreeSet<String> = urls.iter().map(|u| (*u).to_string()).collect();
        prop_assert_eq!(actual_urls, expected_urls);

        for i in &expected {
            let mut all = BTreeSet::new();
            closure(&deps, *i, &mut all);
            for d in all {
                prop_assert!(
                    position[url(d).as_str()] < position[url(*i).as_str()],
                    "{} must precede {} in {:?}", url(d), url(*i), urls
                );
            }
        }
    }

    /// PROPERTY: repeating requirements never changes the output.
    #[test]
    fn property_requirements_are_idempotent((deps, required) in dag_strategy()) {
        let catalog = build_catalog(&deps);

        let mut once = PageAssetSet::new(&catalog);
        for i in &required {
            once.require_library(&name(*i)).unwrap();
        }

        let mut twice = PageAssetSet::new(&catalog);
        for i in required.iter().chain(required.iter()) {
            twice.require_library(&name(*i)).unwrap();
        }

        prop_assert_eq!(once.script_urls(), twice.script_urls());
    }

    /// PROPERTY: a failing requirement leaves the page as it was.
    #[test]
    fn property_unknown_library_changes_nothing((deps, required) in dag_strategy()) {
        let catalog = build_catalog(&deps);
        let mut page = PageAssetSet::new(&catalog);
        for i in &required {
            page.require_library(&name(*i)).unwrap();
        }
        let before = page.resolve();

        let mut batch: Vec<String> = required.iter().map(|i| name(*i)).collect();
        batch.push("missing".to_string());
        prop_assert!(page.require_libraries(batch.as_slice()).is_err());
        prop_assert_eq!(page.resolve(), before);
    }
}
