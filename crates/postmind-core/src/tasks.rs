use std::future::Future;

use tokio::task::AbortHandle;

/// Background requests started on behalf of one mounted view.
///
/// Dropping the scope aborts whatever is still running, so a view that goes
/// away never receives late results.
#[derive(Debug, Default)]
pub struct TaskScope {
    handles: Vec<AbortHandle>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.retain(|handle| !handle.is_finished());
        let handle = tokio::spawn(future);
        self.handles.push(handle.abort_handle());
    }

    /// Tasks spawned here that have not finished yet
    pub fn active(&self) -> usize {
        self.handles.iter().filter(|handle| !handle.is_finished()).count()
    }

    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}
