use rust_decimal::{Decimal, RoundingStrategy};

use super::{Node, NodePath};

/// Column headers, one per nesting depth, followed by the sum column.
pub const COLUMN_TITLES: [&str; 5] = ["Period", "Group", "Category", "Detail", "Sum"];

/// One line of the flattened tree as the view shows it.
///
/// Exactly one of the four label cells is filled, chosen by the nesting depth of the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub depth: usize,
    pub period: String,
    pub group: String,
    pub category: String,
    pub detail: String,
    pub total: String,
}

impl DisplayRow {
    fn new(node: &Node, depth: usize) -> Self {
        let mut labels: [String; 4] = Default::default();
        labels[depth.min(3)] = node.key().to_string();
        let [period, group, category, detail] = labels;
        Self {
            depth,
            period,
            group,
            category,
            detail,
            total: format_total(node.total()),
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [
            &self.period,
            &self.group,
            &self.category,
            &self.detail,
            &self.total,
        ]
    }

    /// The filled label cell.
    pub fn label(&self) -> &str {
        self.cells()[self.depth.min(3)]
    }
}

/// Rounds half away from zero to cents. Totals that round to zero never carry a sign.
fn format_total(total: Decimal) -> String {
    let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{:.2}", rounded)
}

/// Visible rows of a tree together with the node each row came from.
///
/// `rows[i]` was produced by the node at `paths[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    rows: Vec<DisplayRow>,
    paths: Vec<NodePath>,
}

impl Projection {
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn paths(&self) -> &[NodePath] {
        &self.paths
    }

    pub fn resolve(&self, index: usize) -> Option<&NodePath> {
        self.paths.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn push(&mut self, row: DisplayRow, path: NodePath) {
        self.rows.push(row);
        self.paths.push(path);
    }
}

/// Flattens `root` into rows, depth first, children in order.
///
/// The root itself never produces a row, its children are at depth 0. A hidden node is skipped
/// together with its whole subtree.
pub fn project(root: &Node) -> Projection {
    let mut projection = Projection::default();
    project_children(root, &NodePath::root(), 0, &mut projection);
    projection
}

fn project_children(parent: &Node, parent_path: &NodePath, depth: usize, out: &mut Projection) {
    for (position, child) in parent.children().iter().enumerate() {
        if !child.is_visible() {
            continue;
        }
        let path = parent_path.child(position);
        out.push(DisplayRow::new(child, depth), path.clone());
        project_children(child, &path, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::record::TransactionRecord;
    use crate::tree::aggregate;

    fn rent_and_food() -> Node {
        let records = vec![
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
                "Landlord",
                "Rent",
                dec!(-800.00),
            ),
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
                "Landlord",
                "Rent",
                dec!(-800.00),
            ),
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2023, 4, 2).unwrap(),
                "Grocer",
                "Food",
                dec!(-45.50),
            ),
        ];
        aggregate::build(&records)
    }

    fn labels(projection: &Projection) -> Vec<&str> {
        projection.rows().iter().map(DisplayRow::label).collect()
    }

    #[test]
    fn empty_tree_has_no_rows() {
        let projection = project(&Node::new_branch("root"));
        assert!(projection.is_empty());
        assert!(projection.paths().is_empty());
    }

    #[test]
    fn initial_projection_hides_details() {
        let projection = project(&rent_and_food());
        assert_eq!(
            vec!["2023", "March", "Landlord", "April", "Grocer"],
            labels(&projection)
        );
        assert_eq!(5, projection.paths().len());
    }

    #[test]
    fn rows_use_the_column_of_their_depth() {
        let projection = project(&rent_and_food());
        let rows = projection.rows();
        assert_eq!(
            ["2023", "", "", "", "-1645.50"],
            rows[0].cells()
        );
        assert_eq!(["", "March", "", "", "-1600.00"], rows[1].cells());
        assert_eq!(["", "", "Landlord", "", "-1600.00"], rows[2].cells());
        assert_eq!(["", "", "Grocer", "", "-45.50"], rows[4].cells());
        assert_eq!(vec![0, 1, 2, 1, 2], rows.iter().map(|r| r.depth).collect::<Vec<_>>());
    }

    #[test]
    fn detail_rows_use_the_last_column() {
        let mut root = rent_and_food();
        root.descendant_mut(&NodePath::from(vec![0, 0, 0]))
            .unwrap()
            .toggle();
        let projection = project(&root);
        let rent = &projection.rows()[3];
        assert_eq!(["", "", "", "Rent", "-800.00"], rent.cells());
        assert_eq!(3, rent.depth);
    }

    #[test]
    fn totals_have_two_decimals() {
        let mut root = Node::new_branch("root");
        let group = root.add_child(Node::new_branch("g")).unwrap();
        group.push_child(Node::new_leaf("a", dec!(5)));
        group.push_child(Node::new_leaf("b", dec!(0.5)));
        let projection = project(&root);
        assert_eq!("5.50", projection.rows()[0].total);
    }

    #[test]
    fn totals_round_to_cents_without_negative_zero() {
        let mut root = Node::new_branch("root");
        let group = root.add_child(Node::new_branch("g")).unwrap();
        group.push_child(Node::new_leaf("a", dec!(1.005)));
        group.push_child(Node::new_leaf("b", dec!(-0.004)));
        let tiny = root.add_child(Node::new_branch("tiny")).unwrap();
        tiny.push_child(Node::new_leaf("c", dec!(-0.004)));
        root.get_child_mut("g").unwrap().toggle();

        let projection = project(&root);
        let totals: Vec<&str> = projection
            .rows()
            .iter()
            .map(|row| row.total.as_str())
            .collect();
        assert_eq!(vec!["1.00", "1.01", "0.00", "0.00"], totals);
    }

    #[test]
    fn paths_point_back_to_their_nodes() {
        let root = rent_and_food();
        let projection = project(&root);
        for (row, path) in projection.rows().iter().zip(projection.paths()) {
            let node = root.descendant(path).unwrap();
            assert_eq!(row.label(), node.key());
            assert_eq!(row.depth + 1, path.len());
        }
    }

    #[test]
    fn hidden_branch_hides_its_subtree() {
        let mut root = rent_and_food();
        // Details of Landlord become visible, but Landlord itself is hidden below
        root.descendant_mut(&NodePath::from(vec![0, 0, 0]))
            .unwrap()
            .toggle();
        root.descendant_mut(&NodePath::from(vec![0, 0, 0]))
            .unwrap()
            .set_visible(false);
        assert_eq!(
            vec!["2023", "March", "April", "Grocer"],
            labels(&project(&root))
        );
    }

    #[test]
    fn projecting_twice_is_identical() {
        let root = rent_and_food();
        assert_eq!(project(&root), project(&root));
    }

    #[test]
    fn deep_nodes_clamp_to_detail_column() {
        let mut root = Node::new_branch("root");
        let mut node = root.add_child(Node::new_branch("0")).unwrap();
        for depth in 1..6 {
            node = node.add_child(Node::new_branch(depth.to_string())).unwrap();
        }
        node.push_child(Node::new_leaf("leaf", dec!(1)));
        let projection = project(&root);
        assert_eq!(6, projection.len());
        assert_eq!(["", "", "", "5", "1.00"], projection.rows()[5].cells());
    }
}
