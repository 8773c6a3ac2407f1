// ABOUTME: Assembles rsync argument vectors and the ordered sync plan.
// ABOUTME: One pass normally, create-then-update passes when requested.

use nonempty::NonEmpty;
use std::fmt;
use std::path::Path;

use crate::config::{SyncOptions, Target};
use crate::error::{Error, Result};
use crate::transport::Transport;

pub const RSYNC: &str = "rsync";

/// Which step of a deployment an invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPass {
    /// Single full sync.
    Full,
    /// Create missing files only (`--ignore-existing`).
    Create,
    /// Full sync following a create pass.
    Update,
}

impl fmt::Display for SyncPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncPass::Full => "full sync",
            SyncPass::Create => "create pass",
            SyncPass::Update => "update pass",
        };
        f.write_str(name)
    }
}

/// Options forwarded to the spawn facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnOptions {
    pub verbose: bool,
}

/// A program and its arguments, ready to be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub arguments: Vec<String>,
    pub options: SpawnOptions,
    pub pass: SyncPass,
}

impl CommandInvocation {
    /// Shell-quoted command line, for display only.
    pub fn command_line(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(&self.arguments))
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Invocations to run strictly in order; each waits for the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    passes: NonEmpty<CommandInvocation>,
}

impl SyncPlan {
    pub fn build(
        source: &Path,
        target: &Target,
        options: &SyncOptions,
        transport: Option<&Transport>,
        extra_args: Option<&str>,
    ) -> Result<Self> {
        let extra = split_extra_args(extra_args)?;
        let invocation = |pass| assemble(pass, source, target, options, transport, &extra);

        let passes = if options.create_before_update {
            NonEmpty {
                head: invocation(SyncPass::Create),
                tail: vec![invocation(SyncPass::Update)],
            }
        } else {
            NonEmpty::new(invocation(SyncPass::Full))
        };

        Ok(SyncPlan { passes })
    }

    pub fn passes(&self) -> &NonEmpty<CommandInvocation> {
        &self.passes
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandInvocation> {
        self.passes.iter()
    }
}

fn split_extra_args(args: Option<&str>) -> Result<Vec<String>> {
    let Some(args) = args else {
        return Ok(Vec::new());
    };
    shell_words::split(args).map_err(|e| Error::InvalidArgs {
        args: args.to_string(),
        reason: e.to_string(),
    })
}

fn assemble(
    pass: SyncPass,
    source: &Path,
    target: &Target,
    options: &SyncOptions,
    transport: Option<&Transport>,
    extra: &[String],
) -> CommandInvocation {
    let mut arguments = vec!["-az".to_string()];

    let flags = [
        (options.delete, "--delete"),
        (options.verbose, "-v"),
        (options.progress, "--progress"),
        (options.ignore_errors, "--ignore-errors"),
        (pass == SyncPass::Create, "--ignore-existing"),
    ];
    arguments.extend(
        flags
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, flag)| flag.to_string()),
    );

    if let Some(transport) = transport {
        arguments.push("-e".to_string());
        arguments.push(transport.render());
    }

    arguments.extend(extra.iter().cloned());
    arguments.push(source_operand(source));
    arguments.push(target.destination());

    CommandInvocation {
        program: RSYNC.to_string(),
        arguments,
        options: SpawnOptions {
            verbose: options.verbose,
        },
        pass,
    }
}

/// rsync builds for Windows cannot take drive-letter paths, so the source is
/// given relative to the project directory there.
#[cfg(windows)]
fn source_operand(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{name}/")
}

#[cfg(not(windows))]
fn source_operand(source: &Path) -> String {
    source.to_string_lossy().into_owned()
}
