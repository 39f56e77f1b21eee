use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Compiled ignore patterns
///
/// Patterns use gitignore glob syntax. A pattern without a slash matches the
/// file name at any depth, so `*.log` ignores `build/out/run.log`. A pattern
/// with a slash is anchored at the workspace root: `a/*.txt` ignores
/// `a/b.txt` but not `x/a/b.txt`, which needs `**/a/*.txt`. Blank lines and
/// `#` comments are skipped.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Rules that ignore nothing
    pub fn empty() -> Self {
        IgnoreRules {
            matcher: Gitignore::empty(),
        }
    }

    /// Load rules from `ignore_file`, matching paths relative to `root`
    ///
    /// A missing ignore file yields empty rules.
    pub fn load(root: &Path, ignore_file: &Path) -> anyhow::Result<Self> {
        if !ignore_file.is_file() {
            return Ok(Self::empty());
        }

        let content = std::fs::read_to_string(ignore_file)
            .with_context(|| format!("Unable to read ignore file {:?}", ignore_file))?;

        Self::from_patterns(root, content.lines())
    }

    pub fn from_patterns<'p>(
        root: &Path,
        patterns: impl IntoIterator<Item = &'p str>,
    ) -> anyhow::Result<Self> {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in patterns {
            builder
                .add_line(None, pattern.trim())
                .with_context(|| format!("Invalid ignore pattern {:?}", pattern))?;
        }

        Ok(IgnoreRules {
            matcher: builder.build().context("Unable to compile ignore patterns")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Whether a path relative to the workspace root is ignored, either
    /// directly or through one of its parent directories
    pub fn is_ignored(&self, relative_path: &Path, is_dir: bool) -> bool {
        if self.is_empty() || relative_path.as_os_str().is_empty() {
            return false;
        }

        self.matcher
            .matched_path_or_any_parents(relative_path, is_dir)
            .is_ignore()
    }
}
