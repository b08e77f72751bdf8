//! Job event bus
//!
//! Broadcast channel carrying job lifecycle events to any number of
//! subscribers. Publishing never blocks the dispatcher; subscribers that
//! fall behind lose the oldest events.

use tokio::sync::broadcast;
use vendo_core::domain::job::Job;

/// Events published as jobs move through their lifecycle
#[derive(Debug, Clone)]
pub enum JobEvent {
    /// A job was accepted and queued in `pending` state
    Submitted(Job),

    /// A job reached a terminal state
    Resolved(Job),
}

impl JobEvent {
    /// The job snapshot carried by this event
    pub fn job(&self) -> &Job {
        match self {
            JobEvent::Submitted(job) | JobEvent::Resolved(job) => job,
        }
    }
}

/// Fan-out channel for job events
#[derive(Debug, Clone)]
pub struct JobEventBus {
    sender: broadcast::Sender<JobEvent>,
}

impl JobEventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all current subscribers
    ///
    /// Events published while nobody is subscribed are dropped.
    pub fn publish(&self, event: JobEvent) {
        let _ = self.sender.send(event);
    }

    /// Opens a subscription that sees every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use vendo_core::domain::job::JobStatus;

    fn sample_job() -> Job {
        Job {
            id: Uuid::new_v4(),
            job_type: "text_generation".to_string(),
            input: "hello".to_string(),
            expected_output_size: None,
            status: JobStatus::Pending,
            submitter: "user_public_key".to_string(),
            requested_at: Utc::now(),
            resolved_at: None,
            provider_id: None,
            output: None,
            error: None,
        }
    }

    #[test]
    fn test_publish_without_subscribers_does_not_panic() {
        let bus = JobEventBus::new(4);
        bus.publish(JobEvent::Submitted(sample_job()));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let bus = JobEventBus::new(4);
        let mut rx = bus.subscribe();

        let job = sample_job();
        bus.publish(JobEvent::Submitted(job.clone()));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.job().id, job.id);
        assert!(matches!(event, JobEvent::Submitted(_)));
    }
}
