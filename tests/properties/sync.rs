//! Property tests for resource synchronization and manifest generation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use kiln::application::{ResourceSync, SyncOptions};
use kiln::domain::entities::Manifest;
use kiln::domain::value_objects::AssetFilter;
use kiln::infrastructure::MemoryFs;

const SOURCE: &str = "core";
const DEST: &str = "pkg";

/// File names drawn from a small pool so source and destination overlap
fn name() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["a", "b", "c", "init", "list", "Z"]),
        prop::sample::select(vec!["lua", "txt"]),
    )
        .prop_map(|(stem, ext)| format!("{}.{}", stem, ext))
}

fn dir_state() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(name(), "[a-c]{0,3}", 0..6)
}

fn options() -> SyncOptions {
    SyncOptions {
        source: PathBuf::from(SOURCE),
        destination: PathBuf::from(DEST),
        filter: AssetFilter::extension("lua"),
        manifest: ".manifest".to_string(),
        dry_run: false,
    }
}

fn seed(source: &BTreeMap<String, String>, dest: &BTreeMap<String, String>) -> MemoryFs {
    let fs = MemoryFs::new().with_dir(SOURCE);
    for (name, content) in source {
        fs.put(&Path::new(SOURCE).join(name), content.as_bytes());
    }
    for (name, content) in dest {
        fs.put(&Path::new(DEST).join(name), content.as_bytes());
    }
    fs
}

fn is_managed(name: &str) -> bool {
    name.ends_with(".lua")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: After one sync the managed subset of the destination equals
    /// source ∩ filter, and unmanaged destination files are untouched.
    #[test]
    fn property_sync_converges(source in dir_state(), dest in dir_state()) {
        let sync = ResourceSync::new(seed(&source, &dest));
        sync.execute(&options()).unwrap();

        let after = sync.file_system().snapshot(DEST);
        let managed: BTreeMap<&str, &[u8]> = after
            .iter()
            .filter(|(n, _)| is_managed(n))
            .map(|(n, c)| (n.as_str(), c.as_slice()))
            .collect();
        let expected: BTreeMap<&str, &[u8]> = source
            .iter()
            .filter(|(n, _)| is_managed(n))
            .map(|(n, c)| (n.as_str(), c.as_bytes()))
            .collect();
        prop_assert_eq!(managed, expected);

        for (name, content) in dest.iter().filter(|(n, _)| !is_managed(n)) {
            prop_assert_eq!(after.get(name).map(Vec::as_slice), Some(content.as_bytes()));
        }
    }

    /// PROPERTY: A second sync is a no-op and leaves identical bytes.
    #[test]
    fn property_sync_is_idempotent(source in dir_state(), dest in dir_state()) {
        let sync = ResourceSync::new(seed(&source, &dest));
        sync.execute(&options()).unwrap();
        let first = sync.file_system().snapshot(DEST);

        let second = sync.execute(&options()).unwrap();

        prop_assert!(second.plan.is_noop());
        prop_assert_eq!(sync.file_system().snapshot(DEST), first);
    }

    /// PROPERTY: The manifest is the sorted list of managed names and never
    /// lists itself.
    #[test]
    fn property_manifest_matches_directory(source in dir_state(), dest in dir_state()) {
        let sync = ResourceSync::new(seed(&source, &dest));
        let result = sync.execute(&options()).unwrap();

        let after = sync.file_system().snapshot(DEST);
        let on_disk = String::from_utf8(after[".manifest"].clone()).unwrap();
        let mut expected: Vec<&str> = after
            .keys()
            .map(String::as_str)
            .filter(|n| is_managed(n))
            .collect();
        expected.sort();

        prop_assert_eq!(on_disk.clone(), expected.join("\n"));
        prop_assert!(!on_disk.lines().any(|l| l == ".manifest"));
        prop_assert_eq!(Manifest::parse(&on_disk), result.manifest.unwrap());
    }
}
