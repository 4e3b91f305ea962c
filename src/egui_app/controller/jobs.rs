//! Background job plumbing: worker threads report back over one channel
//! that the controller drains on the UI thread each frame.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use url::Url;

use crate::sentiment::api::{self, PredictError, PredictOutcome, PredictRequest};
use crate::sentiment::session::SubmissionTicket;

pub(crate) enum JobMessage {
    PredictFinished(PredictFinished),
}

/// One prediction to run off the UI thread.
#[derive(Debug)]
pub(crate) struct PredictJob {
    pub(crate) url: Url,
    pub(crate) ticket: SubmissionTicket,
    pub(crate) request: PredictRequest,
}

#[derive(Debug)]
pub(crate) struct PredictFinished {
    pub(crate) ticket: SubmissionTicket,
    pub(crate) result: Result<PredictOutcome, PredictError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    predict_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            predict_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn predict_in_progress(&self) -> bool {
        self.predict_in_progress
    }

    /// Spawn the blocking predict call on a worker thread. Refused while a
    /// prediction is already in flight.
    pub(super) fn begin_predict(&mut self, job: PredictJob) {
        if self.predict_in_progress {
            return;
        }
        self.predict_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api::predict(&job.url, &job.request);
            let _ = tx.send(JobMessage::PredictFinished(PredictFinished {
                ticket: job.ticket,
                result,
            }));
        });
    }

    pub(super) fn clear_predict(&mut self) {
        self.predict_in_progress = false;
    }
}
