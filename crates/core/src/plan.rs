use crate::error::StructuralError;
use crate::naming::unique_file_names;
use crate::ranges::{compute_ranges, validate_coverage};
use crate::reroot::reroot;
use crate::types::{OutlineTree, SplitUnit};

/// Produce one [`SplitUnit`] per flat bookmark.
///
/// All validation happens here, before anything touches the filesystem: a
/// structural problem anywhere in the outline fails the whole plan.
pub fn plan_split(
    tree: &OutlineTree,
    total_pages: usize,
) -> Result<Vec<SplitUnit>, StructuralError> {
    let ranges = compute_ranges(&tree.flat, total_pages)?;
    validate_coverage(&ranges, total_pages)?;

    let safe_titles: Vec<&str> = tree.flat.iter().map(|b| b.safe_title.as_str()).collect();
    let file_names = unique_file_names(&safe_titles);

    let units = tree
        .flat
        .iter()
        .zip(ranges)
        .zip(file_names)
        .map(|((bookmark, range), file_name)| SplitUnit {
            safe_title: bookmark.safe_title.clone(),
            file_name,
            range,
            outline: reroot(&tree.roots, range),
        })
        .collect();

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::build_tree;
    use crate::outline::tests::{book, children, item, options, MarkResolver};
    use crate::types::{count_nodes, BookmarkNode, PageRange, SplitOptions};

    #[test]
    fn test_two_chapters_scenario() {
        let entries = vec![item("Alpha", 0), item("Beta", 5)];
        let tree = build_tree(&entries, &MarkResolver, &SplitOptions::default()).unwrap();
        let units = plan_split(&tree, 10).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].file_name, "Alpha.pdf");
        assert_eq!(units[0].range, PageRange::new(0, 5));
        assert_eq!(units[1].file_name, "Beta.pdf");
        assert_eq!(units[1].range, PageRange::new(5, 10));

        for unit in &units {
            assert_eq!(unit.outline.len(), 1);
            assert_eq!(unit.outline[0].page, 0);
            assert!(unit.outline[0].children.is_empty());
        }
    }

    #[test]
    fn test_two_chapters_scenario_with_index() {
        let entries = vec![item("Alpha", 0), item("Beta", 5)];
        let tree = build_tree(&entries, &MarkResolver, &options(2, true)).unwrap();
        let names: Vec<String> = plan_split(&tree, 10)
            .unwrap()
            .into_iter()
            .map(|u| u.file_name)
            .collect();
        assert_eq!(names, vec!["01_Alpha.pdf", "02_Beta.pdf"]);
    }

    #[test]
    fn test_empty_outline_plans_nothing() {
        let tree = OutlineTree::default();
        assert!(plan_split(&tree, 12).unwrap().is_empty());
    }

    #[test]
    fn test_depth_one_keeps_nested_bookmarks_in_outline() {
        let tree = build_tree(&book(), &MarkResolver, &options(1, false)).unwrap();
        let units = plan_split(&tree, 10).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].range, PageRange::new(0, 6));
        assert_eq!(units[1].range, PageRange::new(6, 10));

        let chapter = &units[0].outline[0];
        assert_eq!(chapter.children.len(), 2);
        assert_eq!(chapter.children[1].children[0].title, "Section 1.2.1");
        assert_eq!(chapter.children[1].children[0].page, 4);
        assert_eq!(count_nodes(&units[0].outline), 4);
    }

    #[test]
    fn test_default_depth_sub_splits_and_reroots() {
        let tree = build_tree(&book(), &MarkResolver, &SplitOptions::default()).unwrap();
        let units = plan_split(&tree, 10).unwrap();

        let ranges: Vec<PageRange> = units.iter().map(|u| u.range).collect();
        assert_eq!(
            ranges,
            vec![
                PageRange::new(0, 1),
                PageRange::new(1, 3),
                PageRange::new(3, 6),
                PageRange::new(6, 10)
            ]
        );
        let total: usize = ranges.iter().map(PageRange::len).sum();
        assert_eq!(total, 10);

        // Chapter 1's unit only holds the chapter itself.
        assert_eq!(units[0].outline.len(), 1);
        assert!(units[0].outline[0].children.is_empty());

        // Each section unit is rooted at its own bookmark.
        let section = &units[2].outline;
        assert_eq!(section.len(), 1);
        assert_eq!(section[0].title, "Section 1.2");
        assert_eq!((section[0].page, section[0].depth), (0, 0));
        assert_eq!(section[0].children[0].title, "Section 1.2.1");
        assert_eq!(
            (section[0].children[0].page, section[0].children[0].depth),
            (1, 1)
        );
        assert_eq!(units[1].outline[0].title, "Section 1.1");
    }

    fn placements(nodes: &[BookmarkNode], range: PageRange, out: &mut Vec<(String, usize)>) {
        for node in nodes {
            assert!(node.page < range.len(), "{} escapes {}", node.title, range);
            out.push((node.title.clone(), node.page + range.start));
            placements(&node.children, range, out);
        }
    }

    fn all_nodes(nodes: &[BookmarkNode], out: &mut Vec<(String, usize)>) {
        for node in nodes {
            out.push((node.title.clone(), node.page));
            all_nodes(&node.children, out);
        }
    }

    #[test]
    fn test_every_bookmark_lands_in_exactly_one_unit() {
        for depth in 1..=3 {
            let tree = build_tree(&book(), &MarkResolver, &options(depth, false)).unwrap();
            let units = plan_split(&tree, 10).unwrap();

            let mut placed = Vec::new();
            for unit in &units {
                placements(&unit.outline, unit.range, &mut placed);
            }
            placed.sort();

            let mut expected = Vec::new();
            all_nodes(&tree.roots, &mut expected);
            expected.sort();

            assert_eq!(placed, expected, "depth {}", depth);
        }
    }

    #[test]
    fn test_duplicate_titles_get_distinct_names() {
        let entries = vec![item("Part", 0), item("Part", 2), item("Part!", 4)];
        let tree = build_tree(&entries, &MarkResolver, &SplitOptions::default()).unwrap();
        let names: Vec<String> = plan_split(&tree, 6)
            .unwrap()
            .into_iter()
            .map(|u| u.file_name)
            .collect();
        assert_eq!(names, vec!["Part.pdf", "Part_2.pdf", "Part_3.pdf"]);
    }

    #[test]
    fn test_out_of_order_outline_fails_plan() {
        let entries = vec![
            item("A", 0),
            children(vec![item("A.2", 4), item("A.1", 2)]),
            item("B", 6),
        ];
        let tree = build_tree(&entries, &MarkResolver, &SplitOptions::default()).unwrap();
        let err = plan_split(&tree, 8).unwrap_err();
        assert!(matches!(err, StructuralError::OutOfOrder { ref title, .. } if title == "A.1"));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let tree = build_tree(&book(), &MarkResolver, &options(3, true)).unwrap();
        assert_eq!(plan_split(&tree, 10).unwrap(), plan_split(&tree, 10).unwrap());
    }

    #[test]
    fn test_plan_serializes() {
        let tree = build_tree(&book(), &MarkResolver, &SplitOptions::default()).unwrap();
        let units = plan_split(&tree, 10).unwrap();
        let json = serde_json::to_string(&units).unwrap();
        assert!(json.contains("\"file_name\":\"Chapter 1.pdf\""));
    }
}
