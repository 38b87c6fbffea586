use crate::util::human::fmt_mb;
use super::{FillerEngine, GenerateReport, GenerationRequest, RemoveReport, Result};
use std::sync::mpsc;
use std::thread;

/// One engine operation, runnable off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Generate(GenerationRequest),
    RemoveAll,
    RemoveCount(usize),
}

#[derive(Debug)]
pub enum JobOutcome {
    Generated(GenerateReport),
    Removed(RemoveReport),
}

pub type JobResult = (Job, Result<JobOutcome>);

impl Job {
    pub fn label(&self) -> String {
        match self {
            Job::Generate(req) => format!(
                "Generating {} file{} of {}…",
                req.file_count(),
                if req.file_count() == 1 { "" } else { "s" },
                fmt_mb(req.bytes_per_file()),
            ),
            Job::RemoveAll      => "Deleting all files…".to_string(),
            Job::RemoveCount(1) => "Deleting one file…".to_string(),
            Job::RemoveCount(n) => format!("Deleting {} files…", n),
        }
    }

    pub fn run(&self, engine: &FillerEngine) -> Result<JobOutcome> {
        match self {
            Job::Generate(req)  => engine.generate(req).map(JobOutcome::Generated),
            Job::RemoveAll      => engine.remove_all().map(JobOutcome::Removed),
            Job::RemoveCount(n) => engine.remove_count(*n).map(JobOutcome::Removed),
        }
    }
}

/// Run `job` on its own thread and send the job back with its result.
/// There is no way to cancel it once started.
pub fn spawn(engine: FillerEngine, job: Job, tx: mpsc::Sender<JobResult>) {
    thread::spawn(move || {
        let result = job.run(&engine);
        let _ = tx.send((job, result));
    });
}
