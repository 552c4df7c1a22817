use alloc::collections::VecDeque;

/// FIFO of work scheduled for the end of the current task.
///
/// The list never invokes host callbacks while it recomputes its window; it queues them here and
/// the host drains the queue once it is done handling the current event.
#[derive(Clone, Debug)]
pub struct TaskQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    pub fn defer(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every queued task in order.
    pub fn drain(&mut self, mut run: impl FnMut(T)) -> usize {
        let mut n = 0usize;
        while let Some(task) = self.tasks.pop_front() {
            run(task);
            n += 1;
        }
        n
    }
}
