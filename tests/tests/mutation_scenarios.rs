//! Mutation scenarios over the fixture content tree.

use nodemorph_core::parse_assignments;
use nodemorph_tests::prelude::*;

/// Parse `key=value` lines the way the update form does.
fn assignments(lines: &[&str]) -> Vec<PropertyAssignment> {
    parse_assignments(&lines.join("\n"))
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

mod add {
    use super::*;

    pub fn publish_drafts() -> MutationOperation {
        MutationOperation::new(
            "/content/articles",
            OperationKind::Add {
                condition: MatchCondition::Property {
                    name: "status".to_string(),
                    value: "draft".to_string(),
                },
                properties: assignments(&["status=published"]),
            },
        )
    }

    pub fn scenario() -> Scenario {
        Scenario::new("publish_drafts")
            // five articles, two drafts
            .update("publish", publish_drafts(), |a| {
                a.total(2)
                    .actions(2)
                    .label("Add")
                    .status("/content/articles/a1", ActionStatus::Success)
                    .status("/content/articles/a3", ActionStatus::Success)
                    .message("/content/articles/a1", "Set status=published")
            })
            .search(
                "verify_published",
                SearchCriteria::by_property("/content/articles", "status", "published"),
                |a| {
                    a.hit_paths(&[
                        "/content/articles/a1",
                        "/content/articles/a2",
                        "/content/articles/a3",
                    ])
                },
            )
            // nothing is a draft any more
            .update("publish_again", publish_drafts(), |a| a.total(0).actions(0))
    }

    #[test]
    fn test_add_with_property_condition() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_add_by_node_name() {
        let op = MutationOperation::new(
            "/content/articles",
            OperationKind::Add {
                condition: MatchCondition::NodeName("a*".to_string()),
                properties: assignments(&["featured=true", "tags=[home, top]"]),
            },
        );

        let store = Scenario::new("add_by_name")
            .update("feature", op, |a| a.total(5).failed(0))
            .search(
                "verify",
                SearchCriteria::by_property("/content/articles", "tags", "top"),
                |a| a.hits(5),
            )
            .run()
            .unwrap();

        let a1 = store
            .nodes()
            .find(|n| n.path.to_string() == "/content/articles/a1")
            .unwrap();
        assert_eq!(a1.get("tags").map(|v| v.to_string()).as_deref(), Some("[home, top]"));
    }
}

mod pages {
    use super::*;

    fn review_pages() -> MutationOperation {
        MutationOperation::new(
            "/content/site",
            OperationKind::Add {
                condition: MatchCondition::All,
                properties: assignments(&["reviewed=true"]),
            },
        )
        .pages_only()
    }

    pub fn scenario() -> Scenario {
        Scenario::new("review_pages")
            // fr has no jcr:content
            .update("review", review_pages(), |a| {
                a.total(2)
                    .failed(1)
                    .status("/content/site/en/jcr:content", ActionStatus::Success)
                    .status("/content/site/de/jcr:content", ActionStatus::Success)
                    .status("/content/site/fr", ActionStatus::Failed)
                    .message("/content/site/fr", "No modifiable target node")
            })
            .search(
                "verify_reviewed",
                SearchCriteria::by_property("/content/site", "reviewed", "true"),
                |a| {
                    a.hit_paths(&[
                        "/content/site/de/jcr:content",
                        "/content/site/en/jcr:content",
                    ])
                },
            )
            // give fr a content node, then every page succeeds
            .update(
                "copy_content_to_fr",
                MutationOperation::new(
                    "/content/site",
                    OperationKind::Copy {
                        copy_type: CopyType::Node,
                        source: "en/jcr:content".to_string(),
                        target: "fr/jcr:content".to_string(),
                        overwrite: false,
                    },
                ),
                |a| a.total(1).status("/content/site", ActionStatus::Success),
            )
            .update("review_again", review_pages(), |a| a.total(3).failed(0))
    }

    #[test]
    fn test_page_targeting_and_stamping() {
        let store = scenario().run().unwrap();

        let content = store
            .nodes()
            .find(|n| n.path.to_string() == "/content/site/en/jcr:content")
            .unwrap();
        assert_eq!(
            content.get("cq:lastModifiedBy").map(|v| v.to_string()).as_deref(),
            Some("admin")
        );
        assert!(content.get("cq:lastModified").is_some());

        // the page node itself is never written
        let page = store
            .nodes()
            .find(|n| n.path.to_string() == "/content/site/en")
            .unwrap();
        assert!(page.get("reviewed").is_none());
    }

    #[test]
    fn test_unscoped_add_reaches_each_content_node_once() {
        // every node under the site is a candidate; a page and its content
        // share one target
        let op = MutationOperation::new(
            "/content/site",
            OperationKind::Add {
                condition: MatchCondition::All,
                properties: assignments(&["status=review"]),
            },
        );

        Scenario::new("dedupe")
            .update("review", op, |a| {
                a.total(3)
                    .actions(4)
                    .failed(1)
                    .status("/content/site/de/jcr:content", ActionStatus::Success)
                    .status("/content/site/en/jcr:content", ActionStatus::Success)
                    .status("/content/site/jcr:content", ActionStatus::Success)
                    .status("/content/site/fr", ActionStatus::Failed)
            })
            .run()
            .unwrap();
    }
}

mod delete {
    use super::*;

    fn delete_legacy() -> MutationOperation {
        MutationOperation::new(
            "/content/legacy",
            OperationKind::Delete {
                prop_names: names(&["oldProp", "legacyFlag"]),
            },
        )
    }

    pub fn scenario() -> Scenario {
        Scenario::new("delete_legacy")
            // two of three nodes carry oldProp; the third is skipped
            .update("delete", delete_legacy(), |a| {
                a.total(2)
                    .actions(3)
                    .skipped(1)
                    .label("Delete")
                    .message("/content/legacy/one", "Deleted oldProp, legacyFlag")
                    .message("/content/legacy/two", "Deleted oldProp")
                    .status("/content/legacy/three", ActionStatus::Skipped)
            })
            .search(
                "verify_gone",
                SearchCriteria::by_property("/content/legacy", "oldProp", "x"),
                |a| a.hits(0),
            )
            .update("delete_again", delete_legacy(), |a| a.total(0).skipped(3))
    }

    #[test]
    fn test_delete_listed_properties() {
        scenario().run().unwrap();
    }
}

mod replace {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("replace_status")
            .update(
                "exact",
                MutationOperation::new(
                    "/content/articles",
                    OperationKind::Replace {
                        prop_name: "status".to_string(),
                        find: "draft".to_string(),
                        replace: "review".to_string(),
                        partial_match: false,
                    },
                ),
                // a mismatch is skipped, never failed
                |a| {
                    a.total(2)
                        .skipped(3)
                        .failed(0)
                        .message("/content/articles/a2", "does not match")
                        .message("/content/articles/a4", "status not set")
                },
            )
            .update(
                "partial",
                MutationOperation::new(
                    "/content/articles",
                    OperationKind::Replace {
                        prop_name: "jcr:title".to_string(),
                        find: "ing".to_string(),
                        replace: "ed".to_string(),
                        partial_match: true,
                    },
                ),
                |a| {
                    a.total(1)
                        .status("/content/articles/a3", ActionStatus::Success)
                        .message("/content/articles/a3", "Hired")
                }
            )
            .search(
                "verify_review",
                SearchCriteria::by_property("/content/articles", "status", "review"),
                |a| a.hit_paths(&["/content/articles/a1", "/content/articles/a3"]),
            )
    }

    #[test]
    fn test_replace_exact_and_partial() {
        scenario().run().unwrap();
    }
}

mod copy {
    use super::*;

    fn copy_title(overwrite: bool) -> MutationOperation {
        MutationOperation::new(
            "/content/articles",
            OperationKind::Copy {
                copy_type: CopyType::Property,
                source: "jcr:title".to_string(),
                target: "navTitle".to_string(),
                overwrite,
            },
        )
    }

    #[test]
    fn test_copy_property_respects_overwrite() {
        Scenario::new("copy_title")
            .update("copy", copy_title(false), |a| a.total(5))
            .update("copy_again", copy_title(false), |a| {
                a.total(0)
                    .failed(5)
                    .message("/content/articles/a1", "Target property already exists")
            })
            .update("overwrite", copy_title(true), |a| a.total(5).failed(0))
            .run()
            .unwrap();
    }

    #[test]
    fn test_copy_property_to_child_path() {
        let op = MutationOperation::new(
            "/content/articles",
            OperationKind::Copy {
                copy_type: CopyType::PropertyToPath,
                source: "status".to_string(),
                target: "meta/status".to_string(),
                overwrite: false,
            },
        );

        Scenario::new("copy_to_path")
            // a4 has no status
            .update("copy", op, |a| {
                a.total(4)
                    .failed(1)
                    .status("/content/articles/a4", ActionStatus::Failed)
                    .message("/content/articles/a4", "Source property not found: status")
            })
            .search(
                "verify_children",
                SearchCriteria::by_name("/content/articles", "meta"),
                |a| a.hits(4),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_copy_node_onto_existing_target_fails() {
        let op = MutationOperation::new(
            "/content/site",
            OperationKind::Copy {
                copy_type: CopyType::Node,
                source: "en/jcr:content".to_string(),
                target: "de/jcr:content".to_string(),
                overwrite: false,
            },
        );

        Scenario::new("copy_existing")
            .update("copy", op, |a| {
                a.total(0)
                    .failed(1)
                    .message("/content/site", "Target already exists")
            })
            .run()
            .unwrap();
    }
}

mod create {
    use super::*;

    fn create_meta() -> MutationOperation {
        MutationOperation::new(
            "/content/site",
            OperationKind::Create {
                new_node_name: "meta".to_string(),
                new_node_type: "nt:unstructured".to_string(),
                parent_condition: assignments(&["sling:resourceType=site/page"]),
                properties: assignments(&["robots=noindex"]),
            },
        )
    }

    pub fn scenario() -> Scenario {
        Scenario::new("create_meta")
            .update("create", create_meta(), |a| {
                a.total(2)
                    .label("Create")
                    .status("/content/site/en/jcr:content/meta", ActionStatus::Success)
                    .status("/content/site/de/jcr:content/meta", ActionStatus::Success)
            })
            .search(
                "verify_created",
                SearchCriteria::by_property("/content/site", "robots", "noindex"),
                |a| a.hits(2),
            )
            .update("create_again", create_meta(), |a| {
                a.total(0)
                    .skipped(2)
                    .message("/content/site/en/jcr:content/meta", "Node already exists")
            })
    }

    #[test]
    fn test_create_under_matching_parents() {
        scenario().run().unwrap();
    }
}

mod primary_type {
    use super::*;

    // ========== TEST: primary_type_written_as_property ==========
    #[test]
    fn test_primary_type_written_as_property() {
        // GIVEN a1 as a plain unstructured article
        let retype = MutationOperation::new(
            "/content/articles",
            OperationKind::Add {
                condition: MatchCondition::NodeName("a1".to_string()),
                properties: assignments(&["jcr:primaryType=cq:Page"]),
            },
        );
        let delete_type = MutationOperation::new(
            "/content/articles",
            OperationKind::Delete {
                prop_names: names(&["jcr:primaryType"]),
            },
        );
        let replace_type = MutationOperation::new(
            "/content/articles",
            OperationKind::Replace {
                prop_name: "jcr:primaryType".to_string(),
                find: "nt:unstructured".to_string(),
                replace: "sling:Folder".to_string(),
                partial_match: false,
            },
        );

        // WHEN its type is set, deleted and replaced through properties
        let store = Scenario::new("primary_type")
            .update("retype", retype, |a| a.total(1))
            .search(
                "found_as_page",
                SearchCriteria::by_name("/content/articles", "a1").pages_only(),
                |a| a.hit_paths(&["/content/articles/a1"]),
            )
            // a1 is now a page without content
            .update("delete_type", delete_type, |a| {
                a.total(0)
                    .failed(5)
                    .message("/content/articles/a2", "Cannot remove jcr:primaryType")
            })
            .update("replace_type", replace_type, |a| {
                a.total(4)
                    .status("/content/articles/a2", ActionStatus::Success)
                    .message("/content/articles/a2", "nt:unstructured → sling:Folder")
            })
            .search(
                "found_by_type",
                SearchCriteria::by_property("/content/articles", "jcr:primaryType", "sling:Folder"),
                |a| a.hits(4),
            )
            .run()
            .unwrap();

        // THEN the saved snapshot carries the same types as the tree
        let reloaded = TreeStore::from_json(&store.to_json()).unwrap();
        let types: Vec<(String, String)> = reloaded
            .nodes()
            .filter(|n| n.path.to_string().starts_with("/content/articles/"))
            .map(|n| (n.path.to_string(), n.primary_type.clone()))
            .collect();
        assert_eq!(types[0], ("/content/articles/a1".to_string(), "cq:Page".to_string()));
        assert!(types[1..].iter().all(|(_, t)| t == "sling:Folder"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_invalid_requests_fail_whole() {
        Scenario::new("validation")
            .update(
                "blank_path",
                MutationOperation::new(
                    "",
                    OperationKind::Delete {
                        prop_names: names(&["oldProp"]),
                    },
                ),
                |a| a.error_matches("^Missing required field: path"),
            )
            .update(
                "bad_prop_name",
                MutationOperation::new(
                    "/content/articles",
                    OperationKind::Replace {
                        prop_name: "jcr title".to_string(),
                        find: "a".to_string(),
                        replace: "b".to_string(),
                        partial_match: false,
                    },
                ),
                |a| a.error("Invalid property name"),
            )
            .update(
                "no_properties",
                MutationOperation::new(
                    "/content/articles",
                    OperationKind::Add {
                        condition: MatchCondition::All,
                        properties: Vec::new(),
                    },
                ),
                |a| a.error("properties"),
            )
            .update(
                "escaping_child_path",
                MutationOperation::new(
                    "/content/articles",
                    OperationKind::Copy {
                        copy_type: CopyType::PropertyToPath,
                        source: "status".to_string(),
                        target: "../legacy/status".to_string(),
                        overwrite: false,
                    },
                ),
                |a| a.error("Invalid target path"),
            )
            .update(
                "absolute_child_path",
                MutationOperation::new(
                    "/content/articles",
                    OperationKind::Copy {
                        copy_type: CopyType::PropertyToPath,
                        source: "status".to_string(),
                        target: "/content/legacy/status".to_string(),
                        overwrite: false,
                    },
                ),
                |a| a.error("Invalid target path"),
            )
            .run()
            .unwrap();
    }
}
