//! Property tests for stylesheet ordering.

use proptest::prelude::*;

use pagedeps::catalog::{AUTO_PRIORITY_START, AssetCatalog};
use pagedeps::page::PageAssetSet;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: stylesheet output is sorted by (priority, name) whatever the
    /// requirement order.
    #[test]
    fn property_stylesheets_sorted_by_priority_then_name(
        priorities in proptest::collection::vec(proptest::option::of(-5i64..5), 1..10),
        shift in any::<usize>(),
    ) {
        let mut catalog = AssetCatalog::default();
        let names: Vec<String> = (0..priorities.len()).map(|i| format!("sheet{i}")).collect();
        for (name, priority) in names.iter().zip(&priorities) {
            catalog.register_stylesheet(name, format!("/{name}.css"), *priority).unwrap();
        }

        // Require in a rotated order so requirement order differs from registration.
        let shift = shift % names.len();
        let mut page = PageAssetSet::new(&catalog);
        for name in names.iter().cycle().skip(shift).take(names.len()) {
            page.require_stylesheet(name).unwrap();
        }

        let mut expected: Vec<(i64, &str)> = names
            .iter()
            .map(|n| catalog.get_stylesheet(n).unwrap().sort_key())
            .collect();
        expected.sort();
        let expected_urls: Vec<String> = expected.iter().map(|(_, n)| format!("/{n}.css")).collect();

        let actual: Vec<String> = page.stylesheet_urls().into_iter().map(str::to_string).collect();
        prop_assert_eq!(actual, expected_urls);
    }

    /// PROPERTY: auto-assigned priorities follow registration order and start
    /// at AUTO_PRIORITY_START.
    #[test]
    fn property_auto_priorities_increase(count in 1usize..20) {
        let mut catalog = AssetCatalog::default();
        for i in 0..count {
            catalog.register_stylesheet(&format!("s{i}"), format!("/s{i}.css"), None).unwrap();
        }
        let priorities: Vec<i64> = catalog.stylesheets().map(|s| s.priority()).collect();
        let expected: Vec<i64> = (0..count as i64).map(|i| AUTO_PRIORITY_START + i).collect();
        prop_assert_eq!(priorities, expected);
    }
}
