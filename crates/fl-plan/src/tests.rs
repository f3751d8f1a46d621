//! Unit tests for plan and node-info loading.

#[cfg(test)]
mod plan_loader {
    use std::io::Cursor;

    use fl_core::NodeId;

    use crate::{load_plan_reader, PlanEntry, PlanError};

    #[test]
    fn parses_all_entry_kinds() {
        let plan = load_plan_reader(Cursor::new("0 10 0 20\n1 5 40\n2 30\n")).unwrap();
        assert_eq!(
            plan.entries(),
            &[
                PlanEntry::Waypoint { east: 10.0, north: 0.0, alt: 20.0 },
                PlanEntry::CollectData { node: NodeId(5), power: 40.0 },
                PlanEntry::SetAltitude { alt: 30.0 },
            ]
        );
    }

    #[test]
    fn skips_blank_lines() {
        let plan = load_plan_reader(Cursor::new("0 1 2 3\n\n\n2 25\n")).unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn negative_offsets_allowed() {
        let plan = load_plan_reader(Cursor::new("0 -15.5 7.25 20\n")).unwrap();
        assert_eq!(
            plan.entries()[0],
            PlanEntry::Waypoint { east: -15.5, north: 7.25, alt: 20.0 }
        );
    }

    #[test]
    fn unknown_token_is_malformed_line() {
        let err = load_plan_reader(Cursor::new("0 1 2 3\n7 9 9\n")).unwrap_err();
        match err {
            PlanError::MalformedLine { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "7");
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_reports_line() {
        let err = load_plan_reader(Cursor::new("0 10 0\n")).unwrap_err();
        match err {
            PlanError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_field_rejected() {
        assert!(load_plan_reader(Cursor::new("1 five 40\n")).is_err());
    }

    #[test]
    fn collect_targets_in_plan_order() {
        let plan =
            load_plan_reader(Cursor::new("1 3 40\n0 5 5 20\n1 8 35\n")).unwrap();
        let targets: Vec<_> = plan.collect_targets().collect();
        assert_eq!(targets, vec![NodeId(3), NodeId(8)]);
    }
}

#[cfg(test)]
mod node_loader {
    use std::io::Cursor;

    use fl_core::{NodeId, Point2};

    use crate::{load_nodes_reader, PlanError};

    const NODES: &str = "\
5 10.0.0.5 340 12.0 2.0
9 10.0.0.9 2048 -30.0 40.0
";

    #[test]
    fn loads_table() {
        let table = load_nodes_reader(Cursor::new(NODES)).unwrap();
        assert_eq!(table.len(), 2);

        let n5 = table.get(NodeId(5)).unwrap();
        assert_eq!(n5.address, "10.0.0.5");
        assert_eq!(n5.data_size, 340);
        assert_eq!(n5.position, Point2::new(12.0, 2.0));

        assert!(table.contains(NodeId(9)));
        assert!(!table.contains(NodeId(6)));
    }

    #[test]
    fn duplicate_id_rejected() {
        let dup = "5 10.0.0.5 340 12.0 2.0\n5 10.0.0.6 100 1.0 1.0\n";
        let err = load_nodes_reader(Cursor::new(dup)).unwrap_err();
        assert!(matches!(err, PlanError::DuplicateNode(NodeId(5))));
    }

    #[test]
    fn malformed_row_rejected() {
        assert!(load_nodes_reader(Cursor::new("5 10.0.0.5 not-a-size 1 1\n")).is_err());
    }

    #[test]
    fn positions_iterates_all_nodes() {
        let table = load_nodes_reader(Cursor::new(NODES)).unwrap();
        let mut positions: Vec<_> = table.positions().collect();
        positions.sort_by_key(|(id, _)| *id);
        assert_eq!(positions[0], (NodeId(5), Point2::new(12.0, 2.0)));
        assert_eq!(positions[1], (NodeId(9), Point2::new(-30.0, 40.0)));
    }
}
