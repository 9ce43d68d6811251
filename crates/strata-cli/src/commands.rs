use std::path::PathBuf;

use anyhow::{bail, Context};
use colored::Colorize;
use strata_diff::Change;
use strata_repo::{CommitOutcome, Repository, Status, CONTROL_DIR};
use strata_store::{Node, Tree};
use strata_types::Digest;

use crate::cli::*;
use crate::ignore_rules::IgnoreRules;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => cmd_init(args),
        Command::Status(_) => cmd_status(&cli.format),
        Command::Commit(_) => cmd_commit(&cli.format),
        Command::Checkout(args) => cmd_checkout(args),
        Command::Log(args) => cmd_log(args, &cli.format),
        Command::Tree(args) => cmd_tree(args),
        Command::Diff(args) => cmd_diff(args, &cli.format),
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let path = PathBuf::from(args.path.unwrap_or_else(|| ".".into()));
    Repository::init(&path)?;
    println!(
        "{} Initialized empty strata repository in {}",
        "✓".green().bold(),
        path.join(CONTROL_DIR).display().to_string().bold()
    );
    Ok(())
}

fn cmd_status(format: &OutputFormat) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let rules = IgnoreRules::discover(repo.root());
    let status = repo.status(&rules)?;

    if let OutputFormat::Json = format {
        let state = match &status {
            Status::NoCommits => "no-commits",
            Status::Clean => "clean",
            Status::Changed(_) => "changed",
        };
        let doc = serde_json::json!({ "state": state, "changes": status.changes() });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    match status {
        Status::NoCommits => println!("no commits yet"),
        Status::Clean => println!("no changes"),
        Status::Changed(changes) => {
            for change in &changes {
                print_change(change);
            }
        }
    }
    Ok(())
}

fn cmd_commit(format: &OutputFormat) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let rules = IgnoreRules::discover(repo.root());
    let outcome = repo.commit(&rules)?;

    if let OutputFormat::Json = format {
        let doc = match &outcome {
            CommitOutcome::Created(d) => {
                serde_json::json!({ "created": true, "commit": d.to_hex() })
            }
            CommitOutcome::NoChange => serde_json::json!({ "created": false }),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    match outcome {
        CommitOutcome::Created(digest) => {
            println!("{} committed {}", "✓".green().bold(), digest.to_hex().yellow());
        }
        CommitOutcome::NoChange => {
            println!("nothing to commit, working tree matches head");
        }
    }
    Ok(())
}

fn cmd_checkout(args: CheckoutArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let rules = IgnoreRules::discover(repo.root());
    let target = resolve_commit(&repo, &args.commit)?;

    // Save the current tree first so nothing is lost on switch.
    if let CommitOutcome::Created(saved) = repo.commit(&rules)? {
        println!(
            "saved working tree as {}",
            saved.short_hex().yellow()
        );
    }

    let changes = repo.checkout(&target, &rules)?;
    for change in &changes {
        print_change(change);
    }
    println!(
        "{} checked out {}",
        "✓".green().bold(),
        target.to_hex().yellow()
    );
    Ok(())
}

fn cmd_log(args: LogArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let chain = repo.history()?;

    if let OutputFormat::Json = format {
        let docs: Vec<_> = chain
            .iter()
            .map(|(digest, commit)| {
                serde_json::json!({
                    "commit": digest.to_hex(),
                    "tree": commit.tree.digest().to_hex(),
                    "parent": commit.parent.map(|p| p.to_hex()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }

    if chain.is_empty() {
        println!("no commits yet");
        return Ok(());
    }

    for (digest, commit) in &chain {
        if args.short {
            println!("{} {}", digest.short_hex().yellow(), commit.tree.name);
        } else {
            println!("commit {}", digest.to_hex().yellow().bold());
            println!("  tree   {}", commit.tree.digest().to_hex().dimmed());
            match commit.parent {
                Some(parent) => println!("  parent {}", parent.to_hex().dimmed()),
                None => println!("  parent {}", "none".dimmed()),
            }
        }
    }
    Ok(())
}

fn cmd_tree(args: TreeArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let tree = if args.no_ignore {
        repo.snapshot(&strata_worktree::IgnoreNothing)?
    } else {
        let rules = IgnoreRules::discover(repo.root());
        repo.snapshot(&rules)?
    };
    println!("{}", tree.name.blue().bold());
    print_tree(&tree, 1);
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let old = resolve_commit(&repo, &args.old)?;
    let new = resolve_commit(&repo, &args.new)?;
    let changes = repo.diff_commits(&old, &new)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&changes)?);
        return Ok(());
    }

    if changes.is_empty() {
        println!("no changes");
    }
    for change in &changes {
        print_change(change);
    }
    Ok(())
}

fn print_change(change: &Change) {
    match change {
        Change::Added(path) => println!("{} {}", "+".green().bold(), path),
        Change::Removed(path) => println!("{} {}", "-".red().bold(), path),
        Change::Modified(path) => println!("{} {}", "?".yellow().bold(), path),
        Change::Renamed { from, to } => {
            println!("{} {} {} {}", "?".yellow().bold(), from, ">".dimmed(), to)
        }
    }
}

fn print_tree(tree: &Tree, depth: usize) {
    for child in &tree.children {
        let pad = "  ".repeat(depth);
        match child {
            Node::Dir(sub) => {
                println!("{pad}{}", sub.name.blue().bold());
                print_tree(sub, depth + 1);
            }
            Node::File(file) => println!("{pad}{}", file.name),
        }
    }
}

/// Find the enclosing repository by walking up from the current directory.
fn open_repo() -> anyhow::Result<Repository> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    for dir in cwd.ancestors() {
        if dir.join(CONTROL_DIR).is_dir() {
            return Ok(Repository::open(dir)?);
        }
    }
    bail!("not a strata repository (no {CONTROL_DIR} directory found)")
}

/// Resolve a full digest or a unique commit prefix against the history.
fn resolve_commit(repo: &Repository, spec: &str) -> anyhow::Result<Digest> {
    if let Ok(digest) = Digest::from_hex(spec) {
        return Ok(digest);
    }

    let matches: Vec<Digest> = repo
        .history()?
        .into_iter()
        .map(|(digest, _)| digest)
        .filter(|digest| digest.to_hex().starts_with(spec))
        .collect();

    match matches.as_slice() {
        [digest] => Ok(*digest),
        [] => bail!("no commit matches '{spec}'"),
        _ => bail!("'{spec}' is ambiguous ({} commits match)", matches.len()),
    }
}
