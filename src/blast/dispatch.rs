//! runs tasks with a bounded pool of workers, each worker launching one blast process at a time.
//!
//! There is no retry. A failed process is logged and its output (empty, partial or absent) is
//! collated as is. [dispatch] returns when all tasks are done.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::errors::MultiBlastError;
use super::task::Task;


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// process exited with success
    Success,
    /// process ran and exited with failure, exit code if any
    Failed(Option<i32>),
    /// process could not be spawned (executable not found ...)
    NotLaunched,
}


#[derive(Clone, Debug)]
pub struct TaskOutcome {
    output : PathBuf,
    status : TaskStatus,
}

impl TaskOutcome {
    pub fn get_output(&self) -> &Path {
        &self.output
    }

    pub fn get_status(&self) -> TaskStatus {
        self.status
    }
}


/// runs one task to completion
pub fn run_task(task : &Task) -> TaskOutcome {
    log::debug!("launching {:?} db {} query {:?}", task.get_executable(), task.get_db_name(), task.get_query_path());
    let status = match task.command().output() {
        Ok(output) => {
            if output.status.success() {
                TaskStatus::Success
            }
            else {
                log::warn!("{:?} failed on db {} query {} with status {}, stderr : {}", task.get_executable(), task.get_db_name(),
                            task.get_query_name(), output.status, String::from_utf8_lossy(&output.stderr).trim());
                TaskStatus::Failed(output.status.code())
            }
        }
        Err(e) => {
            log::warn!("could not launch {:?} : {}", task.get_executable(), e);
            TaskStatus::NotLaunched
        }
    };
    TaskOutcome{output : task.get_output().to_path_buf(), status}
} // end of run_task



/// runs all tasks with nb_workers blast processes at most running simultaneously.
/// Outcomes are returned in the order of tasks.
pub fn dispatch(tasks : &[Task], nb_workers : usize) -> Result<Vec<TaskOutcome>, MultiBlastError> {
    let nb_workers = nb_workers.max(1);
    log::info!("dispatching {} tasks on {} workers", tasks.len(), nb_workers);
    let start_t = SystemTime::now();
    //
    let pool = ThreadPoolBuilder::new().num_threads(nb_workers).build()?;
    let outcomes : Vec<TaskOutcome> = pool.install(|| tasks.par_iter().map(run_task).collect());
    //
    let nb_failed = outcomes.iter().filter(|o| o.status != TaskStatus::Success).count();
    if nb_failed > 0 {
        log::warn!("{} tasks out of {} did not succeed", nb_failed, outcomes.len());
    }
    if let Ok(elapsed) = start_t.elapsed() {
        log::info!("dispatch done in system time(s) : {}", elapsed.as_secs());
    }
    Ok(outcomes)
} // end of dispatch
