use std::path::{Path, PathBuf};

use sciprodir_core::{
    LinkConfig, LinkError, LinkMode, LinkResult, ManifestStyle, ManifestTarget, NodeKind,
    TreeNode,
};

#[test]
fn test_link_result_scenario_totals() {
    // data/{a.txt (100), sub/{b.txt (2048)}}
    let mut root = LinkResult::new();
    root.record_file(100);

    let mut sub = LinkResult::new();
    sub.record_file(2048);
    root.merge(sub);

    assert_eq!(
        root,
        LinkResult {
            files: 2,
            folders: 2,
            total_bytes: 2148,
        }
    );
}

#[test]
fn test_link_result_serialization() {
    let result = LinkResult {
        files: 3,
        folders: 2,
        total_bytes: 4096,
    };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"total_bytes\":4096"));

    let back: LinkResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_link_config_builder_with_manifests() {
    let config = LinkConfig::builder()
        .source("/data")
        .destination("/proj/res/traindata")
        .project_root("/proj")
        .depth(2usize)
        .manifests(vec![
            ManifestTarget::markdown("/proj/README.md"),
            ManifestTarget::plain("/proj/protocol.log"),
        ])
        .build()
        .unwrap();

    assert_eq!(config.depth, 2);
    assert_eq!(config.mode, LinkMode::HardLink);
    assert_eq!(config.manifests[1].style, ManifestStyle::Plain);
    assert_eq!(config.manifests[1].path, PathBuf::from("/proj/protocol.log"));
}

#[test]
fn test_link_config_chaining() {
    let config = LinkConfig::new("/data", "/proj/res", "/proj")
        .with_mode(LinkMode::Copy)
        .with_manifest(ManifestTarget::plain("/tmp/manifest.txt"));

    assert_eq!(config.mode, LinkMode::Copy);
    assert_eq!(config.manifests.len(), 1);
}

#[test]
fn test_tree_node_depth_and_kind() {
    let node = TreeNode::new(
        "sub",
        Path::new("/data"),
        Path::new("/proj/res"),
        NodeKind::Directory,
        1,
    );
    assert!(node.is_dir());
    assert_eq!(node.depth, 1);
    assert_eq!(node.name.as_str(), "sub");
    assert_eq!(node.destination, PathBuf::from("/proj/res/sub"));
}

#[test]
fn test_errors_display_paths() {
    let err = LinkError::NotADirectory {
        path: PathBuf::from("/data/file.txt"),
    };
    assert_eq!(err.to_string(), "Source path is not a directory: /data/file.txt");

    let err = LinkError::write(
        "/proj/README.md",
        std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
    );
    assert!(matches!(err, LinkError::Write { .. }));
    assert!(err.to_string().starts_with("Failed to write to /proj/README.md"));
}
