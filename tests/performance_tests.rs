use fxlayout_migrator::{rewrite, transform_tree_with_stats, Attribute, Node, RewriteArgs};
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn card_tree(index: usize) -> String {
    format!(
        r#"{{"type":"root","children":[{{"type":"element","name":"mat-card","attrs":[
            {{"name":"fxLayout","value":"column"}},
            {{"name":"fxLayoutAlign","value":"space-between stretch"}},
            {{"name":"class","value":"card-{index}"}}
        ],"children":[
            {{"type":"element","name":"span","attrs":[{{"name":"fxFlex"}},{{"name":"[fxHide]","value":"compact"}}],"children":[]}},
            {{"type":"element","name":"button","attrs":[{{"name":"fxFlexAlign","value":"end"}}],"children":[]}}
        ]}}]}}"#
    )
}

#[tokio::test]
async fn test_performance_500_files_under_10_seconds() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..500 {
        fs::write(temp_dir.path().join(format!("card_{}.json", i)), card_tree(i)).unwrap();
    }

    let args = RewriteArgs {
        input: vec![format!("{}/*.json", temp_dir.path().display())],
        out_dir: Some(temp_dir.path().join("out")),
        in_place: false,
        manifest: Some(temp_dir.path().join("manifest.json")),
        config: None,
        compact: true,
        verbose: false,
        jobs: Some(4),
        exclude: vec![],
        dry_run: false,
    };

    let start = Instant::now();
    let result = rewrite(args).await.unwrap();
    let duration = start.elapsed();

    assert_eq!(result.total_files_processed, 500);
    assert_eq!(result.total_directives_rewritten, 500 * 4);
    assert_eq!(result.manifest.metadata.bindings_rewritten, 500);
    assert!(duration < Duration::from_secs(10),
            "Rewriting 500 files took {:?}, expected < 10s", duration);

    let stats = result.performance_stats.unwrap();
    assert!(stats.bytes_processed > 0);
    assert!(stats.files_per_second > 0.0);
}

#[test]
fn test_wide_tree_rewrite() {
    let children: Vec<Node> = (0..20_000)
        .map(|i| {
            Node::element(
                "li",
                vec![
                    Attribute::new("class", format!("item-{}", i % 7)),
                    Attribute::new("fxLayout", "row inline"),
                    Attribute::new("fxLayoutAlign", "center"),
                ],
                vec![],
            )
        })
        .collect();
    let mut root = Node::root(vec![Node::element("ul", vec![], children)]);

    let start = Instant::now();
    let stats = transform_tree_with_stats(&mut root);
    let duration = start.elapsed();

    assert_eq!(stats.elements_visited, 20_001);
    assert_eq!(stats.directives_rewritten, 40_000);
    assert_eq!(
        root.children[0].children[3].class_value(),
        Some("item-3 inline-flex items-center content-center justify-center")
    );
    assert!(duration < Duration::from_secs(5), "Wide tree took {:?}", duration);
}
