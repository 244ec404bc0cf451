use smol::{
    channel,
    channel::{Receiver, Sender, TryRecvError},
};

use crate::SessionKey;

use super::{RecvError, SendError, UpdateSender};

/// In-process transport: every session's updates go down one channel,
/// tagged with the session they are addressed to
pub struct UpdateChannel;

impl UpdateChannel {
    pub fn unbounded() -> (Box<dyn UpdateSender>, UpdateReceiver) {
        let (sender, receiver) = channel::unbounded();
        (Box::new(sender), UpdateReceiver::new(receiver))
    }
}

impl UpdateSender for Sender<(SessionKey, Box<[u8]>)> {
    fn send(&self, session: &SessionKey, payload: &[u8]) -> Result<(), SendError> {
        self.send_blocking((*session, payload.into()))
            .map_err(|_| SendError { session: *session })
    }
}

#[derive(Clone)]
pub struct UpdateReceiver {
    receiver: Receiver<(SessionKey, Box<[u8]>)>,
}

impl UpdateReceiver {
    fn new(receiver: Receiver<(SessionKey, Box<[u8]>)>) -> Self {
        Self { receiver }
    }

    /// Returns the next queued update without waiting
    pub fn try_receive(&self) -> Result<Option<(SessionKey, Box<[u8]>)>, RecvError> {
        match self.receiver.try_recv() {
            Ok(update) => Ok(Some(update)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(RecvError),
        }
    }

    /// Waits for the next update
    pub async fn receive(&self) -> Result<(SessionKey, Box<[u8]>), RecvError> {
        self.receiver.recv().await.map_err(|_| RecvError)
    }

    /// Takes every update currently queued
    pub fn drain(&self) -> Vec<(SessionKey, Box<[u8]>)> {
        let mut output = Vec::new();
        while let Ok(update) = self.receiver.try_recv() {
            output.push(update);
        }
        output
    }
}
