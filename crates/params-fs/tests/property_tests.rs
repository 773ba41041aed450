use params_fs::{DirectoryChain, NormalizedPath};
use proptest::prelude::*;

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_-]{0,7}", 0..8)
}

proptest! {
    #[test]
    fn chain_spans_boundary_to_start(base in segments(), rest in segments()) {
        let boundary = NormalizedPath::new(format!("/{}", base.join("/")));
        let start = rest.iter().fold(boundary.clone(), |acc, seg| acc.join(seg));

        let chain = DirectoryChain::between(&boundary, &start).unwrap();

        // Boundary first, start last, one entry per segment in between
        prop_assert_eq!(chain.root(), &boundary);
        prop_assert_eq!(chain.start(), &start);
        prop_assert_eq!(chain.len(), rest.len() + 1);

        // Every entry is the parent of the next one
        for pair in chain.as_slice().windows(2) {
            let parent = pair[1].parent();
            prop_assert_eq!(parent.as_ref(), Some(&pair[0]));
        }
    }

    #[test]
    fn filesystem_root_chain_always_starts_at_root(rest in segments()) {
        let start = rest.iter().fold(NormalizedPath::new("/"), |acc, seg| acc.join(seg));
        let chain = DirectoryChain::to_filesystem_root(&start);

        prop_assert_eq!(chain.root().as_str(), "/");
        prop_assert_eq!(chain.start(), &start);
        prop_assert_eq!(chain.len(), rest.len() + 1);
    }
}
