//! Live configuration with hot reload.
//!
//! The store is opened once at startup (any failure there is fatal to the
//! caller) and then polled by the simulation at most once per
//! `CONFIG_POLL_INTERVAL` of simulated time. A poll compares the source's
//! change token with the last one seen and only reads and parses the
//! document when it differs. A document that fails to load never touches
//! the live configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use skyfire_core::config::Configuration;
use skyfire_core::constants::CONFIG_POLL_INTERVAL;
use skyfire_core::error::ConfigError;

/// Cheap, comparable identity of a source's current contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeToken {
    /// File modification time and length.
    Modified { at: SystemTime, len: u64 },
    /// Explicit revision counter, for sources that keep one.
    Revision(u64),
}

/// Where configuration documents come from.
pub trait ConfigSource {
    /// Human-readable name for diagnostics.
    fn describe(&self) -> String;

    /// Current change token. Must be cheap; no full read.
    fn check(&self) -> io::Result<ChangeToken>;

    /// Full document text.
    fn read(&self) -> io::Result<String>;
}

/// A configuration document on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn check(&self) -> io::Result<ChangeToken> {
        let meta = fs::metadata(&self.path)?;
        Ok(ChangeToken::Modified {
            at: meta.modified()?,
            len: meta.len(),
        })
    }

    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// Result of one poll.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// The poll interval has not elapsed; nothing was checked.
    NotDue,
    /// Source unchanged since the last load attempt.
    Unchanged,
    /// A new configuration is live.
    Applied,
    /// The changed document failed to load; the previous one stays live.
    Rejected(ConfigError),
    /// The source could not be checked; the previous configuration stays live.
    SourceUnavailable(ConfigError),
}

impl ReloadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ReloadOutcome::Applied)
    }
}

/// Owns the live [`Configuration`] and its source.
pub struct ConfigStore {
    source: Box<dyn ConfigSource>,
    live: Configuration,
    /// Token of the last document we attempted to load, good or bad.
    seen: ChangeToken,
    last_poll: f64,
    poll_interval: f64,
}

impl ConfigStore {
    /// Check and load the source. Errors here are startup errors.
    pub fn open(source: impl ConfigSource + 'static) -> Result<Self, ConfigError> {
        let source: Box<dyn ConfigSource> = Box::new(source);
        let seen = check(source.as_ref())?;
        let live = read_and_parse(source.as_ref())?;
        tracing::info!(
            source = %source.describe(),
            weapons = live.weapons.len(),
            "configuration loaded"
        );

        Ok(Self {
            source,
            live,
            seen,
            last_poll: 0.0,
            poll_interval: CONFIG_POLL_INTERVAL,
        })
    }

    /// Override the poll interval (seconds of simulated time).
    pub fn with_poll_interval(mut self, secs: f64) -> Self {
        self.poll_interval = secs.max(0.0);
        self
    }

    /// The live configuration.
    pub fn config(&self) -> &Configuration {
        &self.live
    }

    pub fn source_name(&self) -> String {
        self.source.describe()
    }

    /// Current change token of the source.
    pub fn check(&self) -> Result<ChangeToken, ConfigError> {
        check(self.source.as_ref())
    }

    /// Read, parse and validate the source. On success the result replaces
    /// the live configuration as a whole; on failure the live configuration
    /// is untouched. Either way the source's token is remembered, so a
    /// following poll sees the document as unchanged.
    pub fn load(&mut self) -> Result<&Configuration, ConfigError> {
        let token = self.check()?;
        self.load_token(token)
    }

    /// Rate-limited change detection. `now` is simulated seconds.
    pub fn poll(&mut self, now: f64) -> ReloadOutcome {
        if now - self.last_poll < self.poll_interval {
            return ReloadOutcome::NotDue;
        }
        self.last_poll = now;
        self.reload_if_changed()
    }

    /// Check the source and load it if its token moved.
    pub fn reload_if_changed(&mut self) -> ReloadOutcome {
        let token = match self.check() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("configuration source unavailable, keeping current: {err}");
                return ReloadOutcome::SourceUnavailable(err);
            }
        };
        if token == self.seen {
            return ReloadOutcome::Unchanged;
        }

        match self.load_token(token) {
            Ok(config) => {
                let weapons = config.weapons.len();
                tracing::info!(
                    source = %self.source.describe(),
                    weapons,
                    "configuration reloaded"
                );
                ReloadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!("configuration reload rejected, keeping current: {err}");
                ReloadOutcome::Rejected(err)
            }
        }
    }

    /// Record `token` and load the document it identifies. The token is kept
    /// even if loading fails, so a broken document is reported once instead
    /// of on every poll.
    fn load_token(&mut self, token: ChangeToken) -> Result<&Configuration, ConfigError> {
        self.seen = token;
        self.live = read_and_parse(self.source.as_ref())?;
        Ok(&self.live)
    }
}

fn check(source: &dyn ConfigSource) -> Result<ChangeToken, ConfigError> {
    source.check().map_err(|error| ConfigError::Io {
        source_name: source.describe(),
        error,
    })
}

fn read_and_parse(source: &dyn ConfigSource) -> Result<Configuration, ConfigError> {
    let text = source.read().map_err(|error| ConfigError::Io {
        source_name: source.describe(),
        error,
    })?;
    Configuration::parse(&text)
}
