//! Command implementations for sealbox CLI.
//!
//! Main commands:
//! - encrypt / decrypt: run the pipelines over one or more files
//! - generate: print random passwords or passphrases
//! - check: rate a password
//! - config: show or initialise the config file

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sealbox::crypto::{container, HEADER_LEN, TAG_LEN};
use sealbox::password::{
    evaluate, evaluate_with, generate_passphrase, generate_password, KnownBreached,
    StrengthLevel, StrengthResult,
};
use sealbox::{Config, FilenameSource, InputFile, SealError};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Where and how batch outputs are written.
pub struct OutputOptions {
    pub dir: Option<PathBuf>,
    pub force: bool,
}

/// How a new password is vetted before use.
pub struct StrengthOptions {
    pub breach_list: Option<PathBuf>,
    pub assume_yes: bool,
}

/// Prompt for a password (input hidden)
fn prompt_password(prompt: &str) -> Result<String> {
    let password = rpassword::prompt_password(prompt).context("Cannot read password")?;

    if password.is_empty() {
        bail!(SealError::EmptyPassword);
    }

    Ok(password)
}

/// Password for a new container: prompted twice so a typo can't lock the file.
fn new_password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }

    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if password != confirm {
        bail!("Passwords do not match");
    }
    Ok(password)
}

fn existing_password(given: Option<String>) -> Result<String> {
    match given {
        Some(password) => Ok(password),
        None => prompt_password("Password: "),
    }
}

fn print_strength(result: &StrengthResult) {
    let level = result.level.to_string();
    let level = match result.level {
        StrengthLevel::Strong => level.green().bold(),
        StrengthLevel::Medium => level.yellow().bold(),
        StrengthLevel::Weak | StrengthLevel::None => level.red().bold(),
    };
    println!(
        "Strength: {} {}",
        level,
        format!("(~{:.0} bits)", result.entropy).dimmed()
    );
    let reasons: Vec<String> = result.reasons.iter().map(ToString::to_string).collect();
    println!("  {}", reasons.join(". "));
}

/// Load an offline breach list, if one was given.
fn load_breach_list(path: Option<&Path>) -> Result<Option<KnownBreached>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read breach list: {}", path.display()))?;
    let list = KnownBreached::from_list(&text);
    if list.is_empty() {
        warn!(path = %path.display(), "breach list is empty");
    }
    debug!(entries = list.len(), "loaded breach list");
    Ok(Some(list))
}

fn rate(candidate: &str, breach_list: Option<&KnownBreached>) -> StrengthResult {
    match breach_list {
        Some(list) => evaluate_with(candidate, list),
        None => evaluate(candidate),
    }
}

/// Whether to go ahead with a password rated `strength`.
///
/// Only weak passwords are questioned. Without a terminal there is nobody
/// to ask, so the run continues with a warning.
fn confirm_strength(
    strength: &StrengthResult,
    config: &Config,
    assume_yes: bool,
    interactive: bool,
) -> Result<bool> {
    if strength.level != StrengthLevel::Weak || !config.confirm_weak_password {
        return Ok(true);
    }
    if assume_yes || !interactive {
        warn!("continuing with a weak password");
        return Ok(true);
    }

    let proceed = dialoguer::Confirm::new()
        .with_prompt("The password is weak. This may compromise security. Continue?")
        .default(false)
        .interact()?;
    Ok(proceed)
}

/// Read a whole input file, refusing anything over `limit` bytes.
fn read_input(path: &Path, limit: u64) -> Result<Vec<u8>> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("Cannot read file: {}", path.display()))?
        .len();
    if size > limit {
        return Err(SealError::FileTooLarge { size, limit }.into());
    }

    std::fs::read(path).with_context(|| format!("Cannot read file: {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final path component of `name`, if it is a usable filename.
///
/// Stored names come from the container and are not trusted to stay
/// inside the output directory.
fn safe_file_name(name: &str) -> Option<&str> {
    let last = name.rsplit(|c: char| c == '/' || c == '\\').next()?.trim();
    match last {
        "" | "." | ".." => None,
        _ => Some(last),
    }
}

fn already_exists(target: &Path) -> anyhow::Error {
    anyhow::anyhow!("{} already exists (use --force to overwrite)", target.display())
}

/// Write `bytes` to `dir/name` via a temp file so no partial output is left behind.
fn write_output(dir: &Path, name: &str, bytes: &[u8], force: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory: {}", dir.display()))?;

    let target = dir.join(name);
    if target.exists() && !force {
        return Err(already_exists(&target));
    }

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Cannot create temp file in {}", dir.display()))?;
    tmp.write_all(bytes)?;

    // The check above can race with other writers in the same batch
    let persisted = if force {
        tmp.persist(&target)
    } else {
        tmp.persist_noclobber(&target)
    };
    match persisted {
        Ok(_) => Ok(target),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(already_exists(&target))
        }
        Err(e) => Err(e.error)
            .with_context(|| format!("Cannot write file: {}", target.display())),
    }
}

fn encrypt_one(
    path: &Path,
    password: &str,
    config: &Config,
    out: &OutputOptions,
) -> Result<PathBuf> {
    let bytes = read_input(path, config.max_file_size)?;
    let name = display_name(path);

    let sealed = sealbox::encrypt(&InputFile::new(&name, &bytes), password)?;

    let dir = out.dir.clone().unwrap_or_else(|| config.output_dir_for(path));
    write_output(&dir, &sealed.filename, &sealed.bytes, out.force)
}

fn decrypt_one(
    path: &Path,
    password: &str,
    config: &Config,
    out: &OutputOptions,
) -> Result<PathBuf> {
    let limit = config.max_file_size + (HEADER_LEN + TAG_LEN) as u64;
    let bytes = read_input(path, limit)?;
    let name = display_name(path);

    let opened = sealbox::decrypt(&InputFile::new(&name, &bytes), password)?;

    let filename = match safe_file_name(&opened.filename) {
        Some(safe) if opened.filename_source == FilenameSource::Recovered => {
            if safe != opened.filename {
                warn!(
                    stored = %opened.filename,
                    used = safe,
                    "stripped directories from stored filename"
                );
            }
            safe.to_string()
        }
        Some(safe) => safe.to_string(),
        None => container::fallback_name(&name),
    };

    let dir = out.dir.clone().unwrap_or_else(|| config.output_dir_for(path));
    write_output(&dir, &filename, &opened.bytes, out.force)
}

/// Run `job` over every file in parallel and report each outcome.
fn run_batch<F>(files: &[PathBuf], verb: &str, job: F) -> Result<()>
where
    F: Fn(&Path) -> Result<PathBuf> + Sync,
{
    println!("{} {} file(s)...", verb.cyan(), files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")?
            .progress_chars("█▓░"),
    );

    let results: Vec<(&PathBuf, Result<PathBuf>)> = files
        .par_iter()
        .map(|path| {
            let result = job(path.as_path());
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut failed = 0;
    for (input, result) in &results {
        match result {
            Ok(output) => println!(
                "  {} {} -> {}",
                "✓".green(),
                input.display(),
                output.display().to_string().bold()
            ),
            Err(e) => {
                failed += 1;
                println!("  {} {}: {:#}", "✗".red(), input.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed", failed, files.len());
    }
    Ok(())
}

pub fn encrypt(
    files: &[PathBuf],
    password: Option<String>,
    strength: &StrengthOptions,
    config: &Config,
    out: &OutputOptions,
) -> Result<()> {
    let password = new_password(password)?;
    if password.is_empty() {
        bail!(SealError::EmptyPassword);
    }

    let breach_list = load_breach_list(strength.breach_list.as_deref())?;
    let result = rate(&password, breach_list.as_ref());
    print_strength(&result);

    let interactive = std::io::stdin().is_terminal();
    if !confirm_strength(&result, config, strength.assume_yes, interactive)? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }

    run_batch(files, "Encrypting", |path| {
        encrypt_one(path, &password, config, out)
    })
}

pub fn decrypt(
    files: &[PathBuf],
    password: Option<String>,
    config: &Config,
    out: &OutputOptions,
) -> Result<()> {
    let password = existing_password(password)?;

    run_batch(files, "Decrypting", |path| {
        decrypt_one(path, &password, config, out)
    })
}

pub fn generate(
    passphrase: bool,
    length: Option<usize>,
    count: usize,
    config: &Config,
) -> Result<()> {
    let length = length.unwrap_or(config.password_length);
    debug!(passphrase, length, count, "generating secrets");

    for _ in 0..count {
        let secret = if passphrase {
            generate_passphrase()
        } else {
            generate_password(length)
        };
        println!("{}", secret);
    }
    Ok(())
}

pub fn check(password: Option<String>, breach_list: Option<&Path>, json: bool) -> Result<()> {
    let breach_list = load_breach_list(breach_list)?;
    let candidate = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ").context("Cannot read password")?,
    };

    let result = rate(&candidate, breach_list.as_ref());
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_strength(&result);
    }
    Ok(())
}

pub fn show_config(path: &Path, init: bool) -> Result<()> {
    if init && !path.exists() {
        Config::default().save(path)?;
        println!("  {} Wrote {}", "✓".green(), path.display());
    }

    let config = Config::load_or_default(path)?;
    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("{}{}", path.display().to_string().bold(), source.dimmed());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
