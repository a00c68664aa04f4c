//! Coverage Collector Use Case
//!
//! Wraps one execution context so that it leaves exactly one trace
//! artifact at `<trace_dir>/<name>.trace`. The destination is handed to
//! the instrumentation agent through an environment variable.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::CoverageConfig;
use crate::domain::ports::{LaunchRequest, ProcessLauncher, TraceError, TraceRepository};
use crate::domain::value_objects::{ContextKind, ExecutionContext};
use crate::error::{KilnError, KilnResult};

/// What one wrapped execution produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedTrace {
    pub context: String,
    pub kind: ContextKind,
    /// The trace artifact
    pub path: PathBuf,
    /// Instrumented binaries the execution touched
    pub touched: BTreeSet<String>,
}

/// Runs execution contexts under instrumentation
pub struct CoverageCollector<L, R>
where
    L: ProcessLauncher,
    R: TraceRepository + Sync,
{
    launcher: L,
    traces: R,
    trace_dir: PathBuf,
    trace_env: String,
    /// Appended to every context's command, e.g. a test filter
    extra_args: Vec<String>,
}

impl<L, R> CoverageCollector<L, R>
where
    L: ProcessLauncher,
    R: TraceRepository + Sync,
{
    pub fn new(launcher: L, traces: R, config: &CoverageConfig) -> Self {
        Self {
            launcher,
            traces,
            trace_dir: config.trace_dir.clone(),
            trace_env: config.trace_env.clone(),
            extra_args: Vec::new(),
        }
    }

    /// Builder: pass `args` through to each launched command
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn trace_dir(&self) -> &Path {
        &self.trace_dir
    }

    /// Run one context to completion and return its trace.
    ///
    /// A non-zero exit is fatal for the context; its trace, if any, is
    /// never handed on.
    pub fn collect(&self, context: &ExecutionContext) -> KilnResult<CollectedTrace> {
        let name = context.name();
        let path = context.trace_path(&self.trace_dir);
        self.traces.clear(&path)?;

        let request = self.request(context, &path)?;
        tracing::info!(
            context = name,
            kind = %context.kind(),
            program = %request.program,
            trace = %path.display(),
            "launching"
        );

        let outcome = self
            .launcher
            .launch(&request)
            .map_err(|source| KilnError::Launch {
                context: name.to_string(),
                source,
            })?;
        if !outcome.success {
            return Err(KilnError::ExecutionFailed {
                context: name.to_string(),
                status: outcome.status,
            });
        }

        let trace = self.traces.load(&path).map_err(|e| match e {
            TraceError::Missing(path) => KilnError::TraceNotProduced {
                context: name.to_string(),
                path,
            },
            other => KilnError::Trace(other),
        })?;
        if trace.context.name != name {
            tracing::warn!(
                context = name,
                recorded = %trace.context.name,
                "trace was recorded under a different context name"
            );
        }

        let touched = trace.touched_binaries();
        tracing::info!(context = name, binaries = touched.len(), "trace collected");
        Ok(CollectedTrace {
            context: name.to_string(),
            kind: context.kind(),
            path,
            touched,
        })
    }

    /// Run independent contexts in parallel, one thread each.
    ///
    /// Results come back in the order the contexts were given. Each
    /// context writes its own artifact, so nothing is shared between the
    /// threads except the launcher and repository.
    pub fn collect_all(&self, contexts: &[ExecutionContext]) -> Vec<KilnResult<CollectedTrace>> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = contexts
                .iter()
                .map(|ctx| scope.spawn(move || self.collect(ctx)))
                .collect();
            handles
                .into_iter()
                .zip(contexts)
                .map(|(handle, ctx)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(KilnError::ExecutionFailed {
                            context: ctx.name().to_string(),
                            status: "collector thread panicked".to_string(),
                        })
                    })
                })
                .collect()
        })
    }

    fn request(&self, context: &ExecutionContext, trace: &Path) -> KilnResult<LaunchRequest> {
        let Some((program, args)) = context.command().split_first() else {
            return Err(KilnError::Launch {
                context: context.name().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
            });
        };

        let mut env = context.env().clone();
        env.insert(self.trace_env.clone(), trace.display().to_string());

        Ok(LaunchRequest {
            program: program.clone(),
            args: args.iter().chain(&self.extra_args).cloned().collect(),
            working_dir: context.working_dir().map(Path::to_path_buf),
            env,
        })
    }
}
