//! Candidate search: derive the verifier of every candidate and stop at the
//! first one matching the target.

use crate::{
    userdat::UserRecord,
    verifier::{verifier_x, Verifier},
    Result,
};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How often the sequential scan reports progress at debug level.
const PROGRESS_INTERVAL: usize = 10_000;

/// Credentials being attacked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Username hashed into every candidate.
    pub username: String,
    /// Salt of the user.
    pub salt: Vec<u8>,
    /// Stored verifier candidates are compared against.
    pub verifier: Verifier,
}

impl Target {
    /// Bundle the credentials of one user.
    pub fn new(username: impl Into<String>, salt: impl Into<Vec<u8>>, verifier: Verifier) -> Self {
        Self {
            username: username.into(),
            salt: salt.into(),
            verifier,
        }
    }

    /// Does `password` derive the stored verifier?
    pub fn check(&self, password: &[u8]) -> Result<bool> {
        let u = verifier_x(&self.username, password, &self.salt)?;
        Ok(self.verifier.matches(&u))
    }
}

/// Run `check` on one candidate, logging and skipping domain errors.
/// Returns `None` for a skipped candidate.
fn try_candidate<F>(check: &F, index: usize, password: &[u8]) -> Option<bool>
where
    F: Fn(&[u8]) -> Result<bool>,
{
    trace!("candidate {index}: {:?}", String::from_utf8_lossy(password));

    match check(password) {
        Ok(found) => Some(found),
        Err(err) => {
            warn!("candidate {index} skipped: {err}");
            None
        }
    }
}

impl From<&UserRecord> for Target {
    fn from(record: &UserRecord) -> Self {
        Self::new(record.username.clone(), record.salt.clone(), record.verifier)
    }
}

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The first matching candidate and its position in the word list.
    Found {
        /// Matching candidate as read.
        password: Vec<u8>,
        /// Zero-based position in the word list.
        index: usize,
    },

    /// No candidate matched.
    Exhausted {
        /// Candidates examined, skipped ones included.
        tried: usize,
        /// Candidates whose derivation failed.
        skipped: usize,
    },
}

impl SearchOutcome {
    /// The recovered password, if any.
    pub fn password(&self) -> Option<&[u8]> {
        match self {
            SearchOutcome::Found { password, .. } => Some(password.as_slice()),
            SearchOutcome::Exhausted { .. } => None,
        }
    }
}

/// Try candidates in order and stop at the first match.
///
/// Candidates are consumed lazily, so nothing past the match is read.
pub fn search<I>(target: &Target, candidates: I) -> SearchOutcome
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    search_with(|password| target.check(password), candidates)
}

/// [`search`] with the per-candidate test supplied by the caller.
pub(crate) fn search_with<F, I>(check: F, candidates: I) -> SearchOutcome
where
    F: Fn(&[u8]) -> Result<bool>,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut tried = 0;
    let mut skipped = 0;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let password = candidate.as_ref();
        tried += 1;

        match try_candidate(&check, index, password) {
            Some(true) => {
                info!("password found at candidate {index}");
                return SearchOutcome::Found {
                    password: password.to_vec(),
                    index,
                };
            }
            Some(false) => {}
            None => skipped += 1,
        }

        if tried % PROGRESS_INTERVAL == 0 {
            debug!("{tried} candidates tried");
        }
    }

    info!("exhausted {tried} candidates ({skipped} skipped)");
    SearchOutcome::Exhausted { tried, skipped }
}

/// Parallel version of [`search`] over an in-memory word list.
///
/// `threads == 0` uses one worker per logical CPU. The reported match is
/// the one with the lowest index, so the outcome is the same as for
/// [`search`].
pub fn search_parallel<C>(
    target: &Target,
    candidates: &[C],
    threads: usize,
) -> Result<SearchOutcome>
where
    C: AsRef<[u8]> + Sync,
{
    search_parallel_with(|password| target.check(password), candidates, threads)
}

/// [`search_parallel`] with the per-candidate test supplied by the caller.
pub(crate) fn search_parallel_with<F, C>(
    check: F,
    candidates: &[C],
    threads: usize,
) -> Result<SearchOutcome>
where
    F: Fn(&[u8]) -> Result<bool> + Sync,
    C: AsRef<[u8]> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    debug!(
        "searching {} candidates on {} threads",
        candidates.len(),
        pool.current_num_threads()
    );

    let skipped = AtomicUsize::new(0);
    let found = pool.install(|| {
        candidates
            .par_iter()
            .enumerate()
            .find_first(|(index, candidate)| {
                try_candidate(&check, *index, candidate.as_ref())
                    .unwrap_or_else(|| {
                        skipped.fetch_add(1, Ordering::Relaxed);
                        false
                    })
            })
    });

    let outcome = match found {
        Some((index, candidate)) => {
            info!("password found at candidate {index}");
            SearchOutcome::Found {
                password: candidate.as_ref().to_vec(),
                index,
            }
        }
        None => {
            let skipped = skipped.into_inner();
            info!("exhausted {} candidates ({skipped} skipped)", candidates.len());
            SearchOutcome::Exhausted {
                tried: candidates.len(),
                skipped,
            }
        }
    };

    Ok(outcome)
}
