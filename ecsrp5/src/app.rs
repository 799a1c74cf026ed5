//! Command line configuration and the top-level attack routine.

use crate::{
    search::{search, search_parallel, SearchOutcome, Target},
    userdat::UserDatabase,
    verifier::Verifier,
    wordlist, Error, Result,
};
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

/// Recover the password of an EC-SRP5 user from its `user.dat` verifier.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about)]
pub struct Config {
    /// User whose password is searched for.
    #[arg(short, long, default_value = "admin", env = "ECSRP5_USERNAME")]
    pub username: String,

    /// User database to read the salt and verifier from.
    #[arg(short = 'd', long, default_value = "user.dat", conflicts_with = "salt")]
    pub userdat: PathBuf,

    /// Candidate passwords, one per line.
    #[arg(short, long, default_value = "dictionary.txt")]
    pub wordlist: PathBuf,

    /// Hex encoded salt, used instead of a user database.
    #[arg(long, requires = "verifier")]
    pub salt: Option<String>,

    /// Hex encoded verifier (32 or 33 bytes), used instead of a user database.
    #[arg(long, requires = "salt")]
    pub verifier: Option<String>,

    /// Worker threads. 1 scans sequentially, 0 uses every CPU.
    #[arg(short = 'j', long, default_value_t = 1)]
    pub threads: usize,

    /// More logging; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Config {
    /// Log level selected by `-v` and `-q`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Resolve the attacked credentials, either from the command line or from
/// the user database.
pub fn load_target(config: &Config) -> Result<Target> {
    if let (Some(salt), Some(verifier)) = (&config.salt, &config.verifier) {
        let verifier = Verifier::from_bytes(&hex::decode(verifier)?)?;
        info!("using salt and verifier given for {:?}", config.username);
        return Ok(Target::new(
            config.username.clone(),
            hex::decode(salt)?,
            verifier,
        ));
    }

    let database = UserDatabase::load(&config.userdat)?;
    let record = database.lookup(&config.username)?;
    info!(
        "attacking {:?} from {} (salt {})",
        record.username,
        config.userdat.display(),
        hex::encode(&record.salt)
    );
    Ok(Target::from(record))
}

/// Load the target and run the search over the configured word list.
pub fn run(config: &Config) -> Result<SearchOutcome> {
    let target = load_target(config)?;

    if config.threads == 1 {
        let reader = wordlist::open(&config.wordlist)?;
        let mut read_error = None;
        let candidates = wordlist::read_lines(reader).map_while(|line| {
            line.map_err(|err| read_error = Some(err)).ok()
        });

        let outcome = search(&target, candidates);
        return match read_error {
            Some(err) => Err(Error::io(&config.wordlist, err)),
            None => Ok(outcome),
        };
    }

    let candidates = wordlist::load(&config.wordlist)?;
    info!("loaded {} candidates", candidates.len());
    search_parallel(&target, &candidates, config.threads)
}
