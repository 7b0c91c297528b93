use treedist::edge_list::EdgeListReader;
use treedist::parser::ParsingErrorType;
use treedist::{build_labels, parse_newick_str, read_edge_list_file};

fn name(s: &str) -> String {
    s.to_string()
}

const ACTORS: &str = "\
# actor\tco-star\tweight
Kevin Bacon\tTom Hanks\t2
Tom Hanks\tMeg Ryan\t1.5

Kevin Bacon\tJulia Roberts\t3
Julia Roberts\tHugh Grant
";

#[test]
fn test_read_str_and_query() {
    let tree = EdgeListReader::new().read_str(ACTORS).unwrap();
    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.num_edges(), 4);

    let labels = build_labels(&tree).unwrap();
    assert_eq!(
        labels
            .distance(&name("Meg Ryan"), &name("Hugh Grant"))
            .unwrap(),
        7.5
    );
}

#[test]
fn test_single_node_record() {
    let tree = EdgeListReader::new().read_str("lonely\n").unwrap();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(build_labels(&tree).unwrap().len(), 1);
}

#[test]
fn test_empty_input() {
    let tree = EdgeListReader::new().read_str("# nothing here\n\n").unwrap();
    assert!(tree.is_empty());
    assert!(build_labels(&tree).unwrap().is_empty());
}

#[test]
fn test_read_file() {
    let path = std::env::temp_dir().join(format!("treedist-edges-{}.tsv", std::process::id()));
    std::fs::write(&path, "1\t2\t10\r\n2\t3\t20\r\n").unwrap();
    let tree = read_edge_list_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let labels = build_labels(&tree).unwrap();
    assert_eq!(labels.distance(&name("1"), &name("3")).unwrap(), 30.0);
}

#[test]
fn test_empty_node_name() {
    let err = EdgeListReader::new().read_str("a\t\t1\n").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidEdgeList(_)));
    assert_eq!(err.position(), 0);
}

#[test]
fn test_self_loop() {
    let err = EdgeListReader::new().read_str("a\tb\nb\tb\n").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParsingErrorType::InvalidTreeStructure(_)
    ));
    assert_eq!(err.position(), 4);
}

#[test]
fn test_cycle_is_found_when_labeling() {
    let tree = EdgeListReader::new()
        .read_str("a\tb\nb\tc\nc\ta\n")
        .unwrap();
    assert!(build_labels(&tree).is_err());
}

#[test]
fn test_hash_names_are_nodes() {
    let tree = EdgeListReader::new()
        .read_str("# header\n#1\t#2\t1.5\n#\n#2\t#3\n")
        .unwrap();
    assert_eq!(tree.num_nodes(), 3);
    assert_eq!(tree.num_edges(), 2);
    assert_eq!(tree.path_distance(&name("#1"), &name("#3")).unwrap(), 2.5);
}

#[test]
fn test_newick_tree_written_as_edge_list() {
    let tree = parse_newick_str("((A:1,B:2):3,(C:4,D:5):6);").unwrap();
    let mut input = String::from("# from\tto\tweight\n");
    for (index, node) in tree.nodes().iter().enumerate() {
        for edge in tree.neighbors(index) {
            if index < edge.target {
                input.push_str(&format!("{node}\t{}\t{}\n", tree[edge.target], *edge.weight));
            }
        }
    }

    let reread = EdgeListReader::new().read_str(&input).unwrap();
    assert_eq!(reread.num_nodes(), tree.num_nodes());
    assert_eq!(reread.num_edges(), tree.num_edges());
    assert!(reread.contains(&name("#1")));
    assert_eq!(reread.path_distance(&name("A"), &name("D")).unwrap(), 15.0);
}
