use std::sync::Arc;
use std::time::Duration;

use futures::stream::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::domain::DisplayBuffer;

pub const REVEAL_UNIT_DELAY: Duration = Duration::from_millis(10);

/// Lazily yields every prefix of `text`, one more character each step.
///
/// The prefix ending at character `i` becomes available `i * unit_delay`
/// after the stream is first polled, so the first character shows up
/// immediately and the schedule does not drift with slow consumers.
pub fn reveal_stream(text: String, unit_delay: Duration) -> impl Stream<Item = String> + Send {
    async_stream::stream! {
        let start = Instant::now();
        let mut revealed = String::with_capacity(text.len());
        for (index, ch) in text.chars().enumerate() {
            let offset = unit_delay.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            tokio::time::sleep_until(start + offset).await;
            revealed.push(ch);
            yield revealed.clone();
        }
    }
}

/// Publishes a reveal cycle into a [`DisplayBuffer`] from one background task.
///
/// Starting a new cycle aborts the previous task and clears the buffer before
/// the first character of the new answer is written.
pub struct IncrementalRevealer {
    buffer: Arc<watch::Sender<DisplayBuffer>>,
    task: Option<JoinHandle<()>>,
    unit_delay: Duration,
}

impl IncrementalRevealer {
    pub fn new(unit_delay: Duration) -> Self {
        let (buffer, _) = watch::channel(DisplayBuffer::new());
        Self {
            buffer: Arc::new(buffer),
            task: None,
            unit_delay,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayBuffer> {
        self.buffer.subscribe()
    }

    pub fn current(&self) -> String {
        self.buffer.borrow().as_str().to_string()
    }

    /// Must be called from within a Tokio runtime.
    pub fn reveal(&mut self, text: String) {
        self.cancel();
        let cycle = self.clear();

        let buffer = Arc::clone(&self.buffer);
        let steps = reveal_stream(text, self.unit_delay);
        self.task = Some(tokio::spawn(async move {
            futures::pin_mut!(steps);
            while let Some(prefix) = steps.next().await {
                let mut superseded = false;
                buffer.send_if_modified(|display| {
                    superseded = display.cycle() != cycle;
                    display.advance_to(cycle, &prefix)
                });
                if superseded {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Empties the buffer synchronously and invalidates writes from earlier cycles.
    pub fn clear(&self) -> u64 {
        let mut cycle = 0;
        self.buffer.send_modify(|display| cycle = display.start_cycle());
        cycle
    }

    pub fn is_revealing(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Resolves once the current cycle has written its last character.
    /// Safe to cancel: the task handle is only released after it completes.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Reveal task failed");
                }
            }
            self.task = None;
        }
    }
}

impl Default for IncrementalRevealer {
    fn default() -> Self {
        Self::new(REVEAL_UNIT_DELAY)
    }
}

impl Drop for IncrementalRevealer {
    fn drop(&mut self) {
        self.cancel();
    }
}
