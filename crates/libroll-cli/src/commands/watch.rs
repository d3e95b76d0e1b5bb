//! Watch mode: rebuild every target when files matching a glob change.
//!
//! Change events are debounced. Each event pushes the rebuild deadline back,
//! so a burst of saves produces one run once things go quiet. A run already in
//! progress is always awaited; events arriving meanwhile queue up for the next
//! quiet period.

use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use glob::Pattern;
use libroll_bundler::BundleService;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, warn};

use crate::commands::run::run;
use crate::context::RunOptions;
use crate::destination::DIST_DIR;
use crate::error::{CliError, Result};
use crate::ui;

/// Default quiet period before a rebuild.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Directory names never watched.
const IGNORED_DIRS: [&str; 2] = ["node_modules", DIST_DIR];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Glob selecting the files whose changes trigger a rebuild.
    pub pattern: String,
    pub debounce: Duration,
}

impl WatchOptions {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_event(kind: &EventKind, path: PathBuf) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// Recursive file watcher forwarding changes that match a glob.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Watch `root` recursively, sending changes matching `pattern`.
    ///
    /// Relative patterns are matched against paths relative to `cwd`.
    pub fn new(
        root: PathBuf,
        pattern: Pattern,
        cwd: PathBuf,
    ) -> Result<(Self, mpsc::UnboundedReceiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!("watch error: {}", e);
                    return;
                }
            };

            for path in event.paths {
                if !Self::matches(&pattern, &path, &cwd) {
                    continue;
                }
                if let Some(change) = FileChange::from_event(&event.kind, path) {
                    // Receiver gone means the watch loop has stopped.
                    let _ = tx.send(change);
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        debug!("watching {}", root.display());

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Whether a changed path should trigger a rebuild.
    fn matches(pattern: &Pattern, path: &Path, cwd: &Path) -> bool {
        let ignored = path.components().any(|c| match c {
            Component::Normal(name) => IGNORED_DIRS.iter().any(|dir| name == *dir),
            _ => false,
        });
        if ignored {
            return false;
        }

        pattern.matches_path(path)
            || path
                .strip_prefix(cwd)
                .is_ok_and(|relative| pattern.matches_path(relative))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Longest directory prefix of `pattern` without glob syntax, under `cwd`.
pub fn watch_root(pattern: &str, cwd: &Path) -> PathBuf {
    let mut root = PathBuf::new();
    let mut components = Path::new(pattern).components().peekable();

    while let Some(component) = components.next() {
        let text = component.as_os_str().to_string_lossy();
        if text.contains(['*', '?', '[', ']', '{', '}']) {
            break;
        }
        // The last literal component is a file name, not a directory.
        if components.peek().is_none() {
            break;
        }
        root.push(component);
    }

    if root.is_absolute() {
        root
    } else {
        cwd.join(root)
    }
}

/// Timer-reset debouncer.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Call `on_fire` once per quiet period following events on `rx`.
    ///
    /// Returns when the channel closes. A pending trigger is dropped then.
    pub async fn run<T, F, Fut>(self, mut rx: mpsc::UnboundedReceiver<T>, mut on_fire: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(_) => deadline = Some(Instant::now() + self.delay),
                    None => break,
                },
                _ = sleep_until_deadline(deadline) => {
                    deadline = None;
                    on_fire().await;
                }
            }
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Build once, then rebuild on every debounced change until Ctrl-C.
pub async fn watch(
    options: &RunOptions,
    watch: &WatchOptions,
    bundler: Arc<dyn BundleService>,
) -> Result<()> {
    let pattern = Pattern::new(&watch.pattern).map_err(|e| {
        CliError::InvalidArgument(format!("invalid watch pattern '{}': {}", watch.pattern, e))
    })?;

    if let Err(err) = run(options, Arc::clone(&bundler)).await {
        error!("initial build failed: {}", err);
    }

    let root = watch_root(&watch.pattern, &options.cwd);
    let (watcher, rx) = FileWatcher::new(root, pattern, options.cwd.clone())?;
    ui::info(&format!(
        "Watching {} in {} (Ctrl-C to stop)",
        watch.pattern,
        watcher.root().display()
    ));

    let rebuild = || {
        let options = options.clone();
        let bundler = Arc::clone(&bundler);
        async move {
            info!("change detected, rebuilding");
            if let Err(err) = run(&options, bundler).await {
                error!("rebuild failed: {}", err);
            }
        }
    };

    tokio::select! {
        _ = Debouncer::new(watch.debounce).run(rx, rebuild) => {
            warn!("file watcher stopped");
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("stopping watch");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_watch_root_literal_prefix() {
        let cwd = Path::new("/w");
        assert_eq!(watch_root("src/**/*.js", cwd), PathBuf::from("/w/src"));
        assert_eq!(watch_root("src/lib/*.js", cwd), PathBuf::from("/w/src/lib"));
        assert_eq!(watch_root("*.js", cwd), PathBuf::from("/w"));
        assert_eq!(watch_root("src/index.js", cwd), PathBuf::from("/w/src"));
        assert_eq!(watch_root("/abs/{a,b}/*.js", cwd), PathBuf::from("/abs"));
    }

    #[test]
    fn test_matches_relative_and_absolute() {
        let cwd = Path::new("/w");
        let pattern = Pattern::new("src/**/*.js").unwrap();
        assert!(FileWatcher::matches(&pattern, Path::new("/w/src/a/b.js"), cwd));
        assert!(!FileWatcher::matches(&pattern, Path::new("/w/src/a/b.css"), cwd));

        let absolute = Pattern::new("/w/src/*.js").unwrap();
        assert!(FileWatcher::matches(&absolute, Path::new("/w/src/a.js"), cwd));
    }

    #[test]
    fn test_matches_skips_outputs_and_dependencies() {
        let cwd = Path::new("/w");
        let pattern = Pattern::new("**/*.js").unwrap();
        assert!(!FileWatcher::matches(&pattern, Path::new("/w/dist/lib.es.js"), cwd));
        assert!(!FileWatcher::matches(&pattern, Path::new("/w/node_modules/x/index.js"), cwd));
        assert!(FileWatcher::matches(&pattern, Path::new("/w/index.js"), cwd));
    }

    #[test]
    fn test_file_change_from_event() {
        let path = PathBuf::from("/w/a.js");
        let created = FileChange::from_event(
            &EventKind::Create(notify::event::CreateKind::File),
            path.clone(),
        );
        assert_eq!(created, Some(FileChange::Created(path.clone())));
        assert_eq!(created.unwrap().path(), path.as_path());

        let access = FileChange::from_event(
            &EventKind::Access(notify::event::AccessKind::Any),
            path,
        );
        assert!(access.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_event_fires_after_delay() {
        let (tx, rx) = mpsc::unbounded_channel();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let task = tokio::spawn(Debouncer::new(Duration::from_millis(300)).run(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async {}
        }));

        tx.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        drop(tx);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_events_never_fires() {
        let (tx, rx) = mpsc::unbounded_channel::<()>();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let task = tokio::spawn(Debouncer::new(Duration::from_millis(300)).run(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async {}
        }));

        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(tx);
        task.await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
