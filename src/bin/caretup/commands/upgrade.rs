//! `caretup` command: upgrade, then normalize

use anyhow::{bail, Context, Result};

use crate::cli::Cli;
use caretup::ops::{
    normalize_manifest, run_upgrade, ChangeReason, NormalizeOptions, UpgradeOptions,
};
use caretup::util::shell::{Shell, Status};
use caretup::util::GlobalContext;

pub fn execute(args: Cli, shell: &Shell) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    if let Some(home) = args.home {
        ctx = ctx.with_home(Some(home));
    }

    let manifest_path = ctx.resolve_manifest(args.manifest_path.as_deref())?;
    if !manifest_path.is_file() {
        bail!("manifest not found: {}", manifest_path.display());
    }
    let project_root = manifest_path
        .parent()
        .context("manifest path has no parent directory")?;

    let config = ctx.load_config(project_root, args.config.as_deref())?;

    if args.skip_upgrade {
        shell.verbose(Status::Skipped, "upgrade commands (--skip-upgrade)");
    } else {
        let opts = UpgradeOptions::from_config(&config).with_cwd(project_root);
        if opts.commands.is_empty() {
            shell.verbose(Status::Skipped, "upgrade commands (none configured)");
        } else {
            shell.status(Status::Upgrading, opts.commands.join(", "));
            for outcome in run_upgrade(&opts) {
                if !outcome.status.is_success() {
                    shell.warn(format!("`{}` {}", outcome.command, outcome.status));
                }
            }
        }
    }

    let mut opts = NormalizeOptions::from_config(&config);
    opts.dry_run = args.dry_run;

    let report = normalize_manifest(&manifest_path, &opts)?;

    for change in &report.changes {
        let status = match change.reason {
            ChangeReason::Caret => Status::Updated,
            ChangeReason::Pinned => Status::Pinned,
        };
        if shell.is_verbose() {
            shell.status(status, format!("{} (line {})", change, change.line));
        } else {
            shell.status(status, change);
        }
    }

    if report.is_unchanged() {
        shell.status(Status::Finished, "dependencies already normalized");
    } else if args.dry_run {
        shell.note(format!(
            "dry run: {} would change {} dependency requirement(s)",
            manifest_path.display(),
            report.changes.len()
        ));
    } else {
        shell.status(
            Status::Finished,
            format!(
                "{} dependency requirement(s) normalized",
                report.changes.len()
            ),
        );
    }

    Ok(())
}
