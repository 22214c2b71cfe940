use std::env;
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::RealFs;
use crate::fs::dir::DirCache;
use crate::fs::limit::{OpenLimiter, Unlimited};
use crate::fs::path;

/// A builder for [`RealFs`], with logical defaults. Available via [`RealFs::options`] to avoid
/// additional use statements.
#[derive(Clone)]
pub struct RealFsOptions {
    pub(crate) limiter: Arc<dyn OpenLimiter>,
    pub(crate) working_dir: Option<PathBuf>,
    pub(crate) resolve_links: bool,
}

impl RealFsOptions {
    pub fn new() -> RealFsOptions {
        RealFsOptions::default()
    }

    /// Sets the limiter consulted around every open and stat.
    pub fn limiter<L: OpenLimiter + 'static>(&mut self, limiter: L) -> &mut Self {
        self.limiter = Arc::new(limiter);
        self
    }

    /// Sets a limiter that is shared with other filesystems or inspected by the caller.
    pub fn shared_limiter(&mut self, limiter: Arc<dyn OpenLimiter>) -> &mut Self {
        self.limiter = limiter;
        self
    }

    /// Uses `dir` as the working directory instead of the process's. A relative `dir` is made
    /// absolute against the process's working directory.
    pub fn working_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Whether to resolve symlinks in the working directory. On by default.
    pub fn resolve_cwd_links(&mut self, value: bool) -> &mut Self {
        self.resolve_links = value;
        self
    }

    /// Creates the filesystem. This never fails: a working directory that can't be canonicalized
    /// is kept as it is, and one that can't be determined at all is left empty.
    pub fn build(&self) -> RealFs {
        RealFs {
            listings: DirCache::new(),
            cwd: self.resolve_cwd(),
            limiter: Arc::clone(&self.limiter),
        }
    }

    fn resolve_cwd(&self) -> PathBuf {
        let cwd = match &self.working_dir {
            Some(dir) => path::abs(dir).unwrap_or_else(|| dir.clone()),
            None => match env::current_dir() {
                Ok(dir) => dir,
                Err(error) => {
                    debug!(%error, "working directory unavailable");
                    return PathBuf::new();
                },
            },
        };

        if !self.resolve_links {
            return cwd;
        }

        // Inputs are identified by their canonical path, so the cwd has to be canonical as well.
        // Errors (a symlink loop, a removed directory) surface again later if the cwd matters.
        match dunce::canonicalize(&cwd) {
            Ok(resolved) => resolved,
            Err(error) => {
                debug!(cwd = %cwd.display(), %error, "keeping unresolved working directory");
                cwd
            },
        }
    }
}

impl Default for RealFsOptions {
    fn default() -> Self {
        RealFsOptions {
            limiter: Arc::new(Unlimited),
            working_dir: None,
            resolve_links: true,
        }
    }
}

impl Debug for RealFsOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealFsOptions")
            .field("working_dir", &self.working_dir)
            .field("resolve_links", &self.resolve_links)
            .finish_non_exhaustive()
    }
}
