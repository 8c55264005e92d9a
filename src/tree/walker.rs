//! TreeBuilder - walks a directory and builds the full node tree in memory

use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

use crate::error::BuildError;
use crate::stats::WalkStats;

use super::budget::{Budget, Clock, SystemClock};
use super::config::BuildConfig;
use super::filter::IgnoreFilter;
use super::node::Node;
use super::utils::{Measured, entry_name, measure_file};

/// Result of a successful walk.
#[derive(Debug, Clone)]
pub struct Walk {
    pub root: Node,
    pub stats: WalkStats,
}

/// A directory whose entries are still being visited.
struct Frame {
    id: PathBuf,
    name: String,
    entries: vec::IntoIter<DirEntry>,
    children: Vec<Node>,
}

impl Frame {
    fn new(id: PathBuf, name: String, entries: Vec<DirEntry>) -> Self {
        Self {
            id,
            name,
            entries: entries.into_iter(),
            children: Vec::new(),
        }
    }

    fn finish(self) -> Node {
        Node::folder(self.id, self.name, self.children)
    }
}

enum Visit {
    Leaf(Node),
    Descend(Frame),
}

/// Builds a [`Node`] tree for a directory under a time budget.
///
/// The walk is depth-first over an explicit stack of open directories, so
/// deep trees do not grow the call stack. Symlinks are never traversed.
pub struct TreeBuilder<C: Clock = SystemClock> {
    config: BuildConfig,
    filter: IgnoreFilter,
    clock: C,
}

impl TreeBuilder<SystemClock> {
    pub fn new(config: BuildConfig) -> Self {
        let filter = IgnoreFilter::new(config.ignore_names.iter().cloned());
        Self {
            config,
            filter,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> TreeBuilder<C> {
    /// Use a different time source for the budget.
    pub fn with_clock<D: Clock>(self, clock: D) -> TreeBuilder<D> {
        TreeBuilder {
            config: self.config,
            filter: self.filter,
            clock,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn build(&self, root: &Path) -> Result<Node, BuildError> {
        self.walk(root).map(|walk| walk.root)
    }

    /// Walk `root` and return the tree together with walk statistics.
    pub fn walk(&self, root: &Path) -> Result<Walk, BuildError> {
        let mut budget = Budget::start(&self.clock, self.config.time_limit());
        let mut current = open_root(root)?;
        log::info!("walking {}", current.id.display());

        let mut stats = WalkStats::default();
        let mut stack: Vec<Frame> = Vec::new();

        let tree = loop {
            match current.entries.next() {
                Some(entry) => {
                    if self.filter.is_ignored(&entry.file_name()) {
                        log::debug!("ignoring {}", entry.path().display());
                        stats.ignored += 1;
                        continue;
                    }
                    match self.visit(entry, &mut budget, &mut stats) {
                        Visit::Leaf(node) => current.children.push(node),
                        Visit::Descend(child) => {
                            stack.push(std::mem::replace(&mut current, child));
                        }
                    }
                }
                None => {
                    stats.record_folder();
                    let node = current.finish();
                    match stack.pop() {
                        Some(parent) => {
                            current = parent;
                            current.children.push(node);
                        }
                        None => break node,
                    }
                }
            }
        };

        stats.elapsed = budget.elapsed();
        stats.budget_exhausted_at = budget.exhausted_at();
        log::info!("walk finished: {}", stats.summary());

        Ok(Walk { root: tree, stats })
    }

    fn visit(&self, entry: DirEntry, budget: &mut Budget<&C>, stats: &mut WalkStats) -> Visit {
        let path = entry.path();
        let name = entry_name(&path);

        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("could not determine type of {}: {}", path.display(), e);
                stats.record_file(Measured::Unreadable);
                return Visit::Leaf(Node::file(path, name, None));
            }
        };

        if file_type.is_dir() {
            return match read_entries(&path) {
                Ok(entries) => Visit::Descend(Frame::new(path, name, entries)),
                Err(e) => {
                    log::warn!("could not read directory {}: {}", path.display(), e);
                    stats.record_folder();
                    stats.unreadable_folders += 1;
                    Visit::Leaf(Node::folder(path, name, Vec::new()))
                }
            };
        }

        let measured = if file_type.is_symlink() {
            // Classifying a link needs one stat regardless of the budget
            let target = fs::metadata(&path);
            if target.as_ref().is_ok_and(|m| m.is_dir()) {
                log::debug!("not following directory symlink {}", path.display());
                stats.record_folder();
                stats.symlinked_folders += 1;
                return Visit::Leaf(Node::folder(path, name, Vec::new()));
            }
            if !budget.allows_measure() {
                Measured::OverBudget
            } else {
                match target {
                    Ok(meta) => Measured::Size(meta.len()),
                    Err(e) => {
                        log::warn!("could not access size of file {}: {}", path.display(), e);
                        Measured::Unreadable
                    }
                }
            }
        } else if budget.allows_measure() {
            measure_file(&path)
        } else {
            Measured::OverBudget
        };

        stats.record_file(measured);
        Visit::Leaf(Node::file(path, name, measured.size()))
    }
}

/// Resolve and list the root directory. Every failure here is fatal.
fn open_root(root: &Path) -> Result<Frame, BuildError> {
    let id = root.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BuildError::NotFound {
            path: root.to_path_buf(),
        },
        io::ErrorKind::NotADirectory => BuildError::NotADirectory {
            path: root.to_path_buf(),
        },
        _ => BuildError::Unreadable {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    let meta = fs::metadata(&id).map_err(|e| BuildError::Unreadable {
        path: id.clone(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(BuildError::NotADirectory { path: id });
    }

    let entries = read_entries(&id).map_err(|e| BuildError::Unreadable {
        path: id.clone(),
        source: e,
    })?;
    let name = entry_name(&id);
    Ok(Frame::new(id, name, entries))
}

/// List a directory in the order the filesystem returns entries.
fn read_entries(path: &Path) -> io::Result<Vec<DirEntry>> {
    let entries = fs::read_dir(path)?
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                log::debug!("skipping unreadable entry in {}: {}", path.display(), e);
                None
            }
        })
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::budget::test_clock::SteppingClock;
    use super::super::node::NodeKind;
    use super::*;
    use crate::test_utils::TestDir;

    fn unlimited() -> TreeBuilder {
        TreeBuilder::new(BuildConfig::unlimited())
    }

    #[test]
    fn test_basic_scenario() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "0123456789");
        dir.add_file("sub/b.txt", "01234567890123456789");
        dir.add_file(".git/HEAD", "ref: refs/heads/main");

        let root = unlimited().build(dir.path()).unwrap();
        assert_eq!(root.kind, NodeKind::Folder);
        assert_eq!(root.size_bytes, Some(30));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.child("a.txt").unwrap().size_bytes, Some(10));

        let sub = root.child("sub").unwrap();
        assert_eq!(sub.kind, NodeKind::Folder);
        assert_eq!(sub.size_bytes, Some(20));
        assert_eq!(sub.child("b.txt").unwrap().size_bytes, Some(20));

        assert!(root.iter().all(|n| n.name != ".git"));
    }

    #[test]
    fn test_ids_are_canonical_and_unique() {
        let dir = TestDir::new();
        dir.add_file("x/same", "1");
        dir.add_file("y/same", "2");

        let root = unlimited().build(dir.path()).unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        assert_eq!(root.id, canonical);
        assert!(root.iter().all(|n| n.id.is_absolute()));
        assert!(root.find(&canonical.join("x").join("same")).is_some());

        let mut ids: Vec<_> = root.iter().map(|n| n.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_node_count_matches_entries() {
        let dir = TestDir::new();
        dir.add_file("one", "1");
        dir.add_file("d1/two", "22");
        dir.add_file("d1/d2/three", "333");
        dir.add_dir("empty");

        let walk = unlimited().walk(dir.path()).unwrap();
        // root + one + d1 + two + d2 + three + empty
        assert_eq!(walk.root.count(), 7);
        assert_eq!(walk.stats.nodes(), 7);
        assert_eq!(walk.stats.folders, 4);
        assert_eq!(walk.stats.files, 3);
        assert_eq!(walk.stats.measured_bytes, 6);
        assert!(!walk.stats.is_partial());
    }

    #[test]
    fn test_ignored_files_and_dirs() {
        let dir = TestDir::new();
        dir.add_file("keep.txt", "k");
        dir.add_file("node_modules/pkg/index.js", "x");
        dir.add_file("deep/node_modules/other.js", "y");
        dir.add_file("deep/skip.me", "z");

        let builder = TreeBuilder::new(
            BuildConfig::unlimited().with_ignore_names(["node_modules", "skip.me"]),
        );
        let walk = builder.walk(dir.path()).unwrap();
        let root = walk.root;

        assert!(root.iter().all(|n| n.name != "node_modules" && n.name != "skip.me"));
        assert!(root.iter().all(|n| {
            n.id.strip_prefix(&root.id)
                .unwrap()
                .components()
                .all(|c| c.as_os_str() != "node_modules")
        }));
        assert_eq!(root.count(), 3); // root, keep.txt, deep
        assert_eq!(walk.stats.ignored, 3);
    }

    #[test]
    fn test_empty_ignore_list_keeps_everything() {
        let dir = TestDir::new();
        dir.add_file(".git/HEAD", "ref");
        let builder = TreeBuilder::new(BuildConfig::unlimited().with_ignore_names(Vec::<String>::new()));
        let root = builder.build(dir.path()).unwrap();
        assert!(root.child(".git").is_some());
    }

    #[test]
    fn test_unlimited_budget_measures_everything() {
        let dir = TestDir::new();
        for i in 0..20 {
            dir.add_file(&format!("d{}/f{}.txt", i % 4, i), "abc");
        }
        // A clock that jumps an hour per read never matters without a budget
        let clock = SteppingClock::new(Duration::from_secs(3600));
        let root = unlimited().with_clock(&clock).build(dir.path()).unwrap();
        assert!(root.iter().all(|n| n.size_bytes.is_some()));
        assert_eq!(root.size_bytes, Some(60));
    }

    #[test]
    fn test_oversized_budget_is_unlimited() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "abc");
        dir.add_file("sub/b.txt", "abcd");
        for max_seconds in [1e20, f64::MAX] {
            let walk = TreeBuilder::new(BuildConfig::unlimited().with_max_seconds(max_seconds))
                .walk(dir.path())
                .unwrap();
            assert_eq!(walk.root.size_bytes, Some(7));
            assert!(walk.stats.budget_exhausted_at.is_none());
        }
    }

    #[test]
    fn test_exhausted_budget_skips_all_sizes() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "0123456789");
        dir.add_file("sub/b.txt", "0123456789");
        dir.add_file("sub/deeper/c.txt", "0123456789");

        let clock = SteppingClock::new(Duration::from_secs(10));
        let builder = TreeBuilder::new(BuildConfig::unlimited().with_max_seconds(1.0))
            .with_clock(&clock);
        let walk = builder.walk(dir.path()).unwrap();

        for node in &walk.root {
            match node.kind {
                NodeKind::File => assert_eq!(node.size_bytes, None, "{}", node.id.display()),
                NodeKind::Folder => assert_eq!(node.size_bytes, Some(0), "{}", node.id.display()),
            }
        }
        assert_eq!(walk.root.count(), 6);
        assert_eq!(walk.stats.over_budget_files, 3);
        assert!(walk.stats.budget_exhausted_at.is_some());
    }

    #[test]
    fn test_budget_exhausts_mid_walk_and_stays_exhausted() {
        let dir = TestDir::new();
        dir.add_file("a/1.txt", "1");
        dir.add_file("a/2.txt", "22");
        dir.add_file("b/3.txt", "333");
        dir.add_file("c/4.txt", "4444");

        // start at t=0, each file poll advances one second; limit of 2.5s
        // lets exactly two files through
        let clock = SteppingClock::new(Duration::from_secs(1));
        let builder = TreeBuilder::new(BuildConfig::unlimited().with_max_seconds(2.5))
            .with_clock(&clock);
        let walk = builder.walk(dir.path()).unwrap();

        let files: Vec<&Node> = walk.root.iter().filter(|n| !n.is_dir()).collect();
        assert_eq!(files.len(), 4);
        let measured = files.iter().filter(|n| n.size_bytes.is_some()).count();
        assert_eq!(measured, 2);
        assert_eq!(walk.stats.over_budget_files, 2);

        // Once a file is unsized, every later file in visit order is too
        let first_skip = files.iter().position(|n| n.size_bytes.is_none()).unwrap();
        assert!(files[first_skip..].iter().all(|n| n.size_bytes.is_none()));
    }

    #[test]
    fn test_folder_sizes_equal_child_sums() {
        let dir = TestDir::new();
        dir.add_file("a/b/c/d.txt", "dddd");
        dir.add_file("a/b/e.txt", "ee");
        dir.add_file("a/f.txt", "f");
        dir.add_file("g.txt", "gggggg");

        let root = unlimited().build(dir.path()).unwrap();
        for node in root.iter().filter(|n| n.is_dir()) {
            assert_eq!(node.size_bytes, Some(node.aggregate_size()));
        }
        assert_eq!(root.size_bytes, Some(13));
    }

    #[test]
    fn test_missing_root() {
        let dir = TestDir::new();
        let err = unlimited().build(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, BuildError::NotFound { .. }));
    }

    #[test]
    fn test_root_is_file() {
        let dir = TestDir::new();
        let file = dir.add_file("plain.txt", "x");
        let err = unlimited().build(&file).unwrap_err();
        assert!(matches!(err, BuildError::NotADirectory { .. }));
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let root = unlimited().build(Path::new("src")).unwrap();
        assert!(root.id.is_absolute());
        assert_eq!(root.name, "src");
    }

    #[cfg(unix)]
    mod unix {
        use std::os::unix::fs::{PermissionsExt, symlink};

        use super::*;

        #[test]
        fn test_broken_symlink_has_unknown_size() {
            let dir = TestDir::new();
            dir.add_file("sub/b.txt", "01234567890123456789");
            symlink("missing-target", dir.path().join("sub/c.txt")).unwrap();

            let walk = unlimited().walk(dir.path()).unwrap();
            let sub = walk.root.child("sub").unwrap();
            let c = sub.child("c.txt").unwrap();
            assert_eq!(c.kind, NodeKind::File);
            assert_eq!(c.size_bytes, None);
            assert_eq!(sub.size_bytes, Some(20));
            assert_eq!(walk.stats.unreadable_files, 1);
        }

        #[test]
        fn test_symlink_to_file_uses_target_size() {
            let dir = TestDir::new();
            dir.add_file("target.txt", "12345");
            symlink(dir.path().join("target.txt"), dir.path().join("link.txt")).unwrap();

            let root = unlimited().build(dir.path()).unwrap();
            let link = root.child("link.txt").unwrap();
            assert_eq!(link.kind, NodeKind::File);
            assert_eq!(link.size_bytes, Some(5));
            assert_eq!(link.id, root.id.join("link.txt"));
        }

        #[test]
        fn test_symlink_cycle_is_not_followed() {
            let dir = TestDir::new();
            dir.add_file("sub/file.txt", "abc");
            symlink("..", dir.path().join("sub/parent")).unwrap();
            symlink("loop", dir.path().join("loop")).unwrap();

            let walk = unlimited().walk(dir.path()).unwrap();
            let sub = walk.root.child("sub").unwrap();
            let parent = sub.child("parent").unwrap();
            assert_eq!(parent.kind, NodeKind::Folder);
            assert!(parent.children.is_empty());
            assert_eq!(parent.size_bytes, Some(0));

            // Self-referential link fails to resolve
            let looped = walk.root.child("loop").unwrap();
            assert_eq!(looped.kind, NodeKind::File);
            assert_eq!(looped.size_bytes, None);

            assert_eq!(walk.root.count(), 5);
            assert_eq!(walk.stats.symlinked_folders, 1);
        }

        #[test]
        fn test_unreadable_subdirectory_is_empty_folder() {
            let dir = TestDir::new();
            dir.add_file("ok/file.txt", "abc");
            let locked = dir.add_dir("locked");
            dir.add_file("locked/hidden.txt", "hidden");

            fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
            let result = unlimited().walk(dir.path());
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

            let walk = result.unwrap();
            let locked = walk.root.child("locked").unwrap();
            assert_eq!(locked.kind, NodeKind::Folder);
            // Running as root can still list the directory
            if walk.stats.unreadable_folders == 1 {
                assert!(locked.children.is_empty());
                assert_eq!(locked.size_bytes, Some(0));
            }
            assert_eq!(walk.root.child("ok").unwrap().size_bytes, Some(3));
            assert_eq!(walk.root.size_bytes, Some(walk.root.aggregate_size()));
        }
    }
}
