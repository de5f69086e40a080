//! Orphan resolution
//!
//! Pure set differences between resource names and log group names under a
//! log group prefix. No I/O; output order follows the (sorted) input sets.

use std::collections::BTreeSet;

/// Resources that have no log group named `prefix + name`.
///
/// Informational only: nothing is created for these.
pub fn resources_without_log_group(
    resource_names: &BTreeSet<String>,
    log_group_names: &BTreeSet<String>,
    prefix: &str,
) -> Vec<String> {
    resource_names
        .iter()
        .filter(|name| !log_group_names.contains(&format!("{prefix}{name}")))
        .cloned()
        .collect()
}

/// Log groups under `prefix` whose owning resource is not in `resource_names`.
///
/// Log groups outside `prefix` belong to another resource kind and are never
/// returned.
pub fn orphaned_log_groups(
    log_group_names: &BTreeSet<String>,
    resource_names: &BTreeSet<String>,
    prefix: &str,
) -> Vec<String> {
    log_group_names
        .iter()
        .filter(|log_group| {
            log_group
                .strip_prefix(prefix)
                .is_some_and(|owner| !resource_names.contains(owner))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/aws/lambda/";

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_both_directions() {
        let resources = set(&["A", "B"]);
        let log_groups = set(&["/aws/lambda/A", "/aws/lambda/C"]);

        assert_eq!(
            orphaned_log_groups(&log_groups, &resources, PREFIX),
            vec!["/aws/lambda/C"]
        );
        assert_eq!(
            resources_without_log_group(&resources, &log_groups, PREFIX),
            vec!["B"]
        );
    }

    #[test]
    fn test_empty_resources_orphans_everything_under_prefix() {
        let log_groups = set(&["/aws/lambda/a", "/aws/lambda/b", "/aws/codebuild/c"]);

        assert_eq!(
            orphaned_log_groups(&log_groups, &BTreeSet::new(), PREFIX),
            vec!["/aws/lambda/a", "/aws/lambda/b"]
        );
    }

    #[test]
    fn test_empty_log_groups() {
        let resources = set(&["a", "b"]);

        assert!(orphaned_log_groups(&BTreeSet::new(), &resources, PREFIX).is_empty());
        assert_eq!(
            resources_without_log_group(&resources, &BTreeSet::new(), PREFIX),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_other_prefixes_ignored() {
        let log_groups = set(&["/aws/codebuild/x", "/aws/lambda-edge/x", "lambda/x"]);

        assert!(orphaned_log_groups(&log_groups, &BTreeSet::new(), PREFIX).is_empty());
    }

    #[test]
    fn test_suffix_must_match_exactly() {
        // A function named "api" does not own "/aws/lambda/api-v2"
        let resources = set(&["api"]);
        let log_groups = set(&["/aws/lambda/api", "/aws/lambda/api-v2"]);

        assert_eq!(
            orphaned_log_groups(&log_groups, &resources, PREFIX),
            vec!["/aws/lambda/api-v2"]
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn log_group_name() -> impl Strategy<Value = String> {
            prop_oneof![
                "[a-d]{1,3}".prop_map(|s| format!("/aws/lambda/{s}")),
                "[a-d]{1,3}".prop_map(|s| format!("/aws/codebuild/{s}")),
                "/[a-z/]{0,12}",
            ]
        }

        proptest! {
            /// Orphans always carry the prefix and never name a live resource
            #[test]
            fn orphans_respect_prefix(
                log_groups in prop::collection::btree_set(log_group_name(), 0..30),
                resources in prop::collection::btree_set("[a-d]{1,3}", 0..10),
            ) {
                for orphan in orphaned_log_groups(&log_groups, &resources, PREFIX) {
                    let owner = orphan.strip_prefix(PREFIX);
                    prop_assert!(owner.is_some(), "{} lacks prefix", orphan);
                    prop_assert!(!resources.contains(owner.unwrap_or_default()));
                    prop_assert!(log_groups.contains(&orphan));
                }
            }

            /// Every prefixed log group is either owned or orphaned
            #[test]
            fn prefixed_log_groups_are_classified(
                log_groups in prop::collection::btree_set(log_group_name(), 0..30),
                resources in prop::collection::btree_set("[a-d]{1,3}", 0..10),
            ) {
                let orphans: BTreeSet<String> =
                    orphaned_log_groups(&log_groups, &resources, PREFIX).into_iter().collect();
                for log_group in &log_groups {
                    if let Some(owner) = log_group.strip_prefix(PREFIX) {
                        prop_assert_eq!(orphans.contains(log_group), !resources.contains(owner));
                    } else {
                        prop_assert!(!orphans.contains(log_group));
                    }
                }
            }

            /// Resolution is a pure function of its inputs
            #[test]
            fn resolution_is_idempotent(
                log_groups in prop::collection::btree_set(log_group_name(), 0..30),
                resources in prop::collection::btree_set("[a-d]{1,3}", 0..10),
            ) {
                prop_assert_eq!(
                    orphaned_log_groups(&log_groups, &resources, PREFIX),
                    orphaned_log_groups(&log_groups, &resources, PREFIX)
                );
                prop_assert_eq!(
                    resources_without_log_group(&resources, &log_groups, PREFIX),
                    resources_without_log_group(&resources, &log_groups, PREFIX)
                );
            }
        }
    }
}
