//! The outbound control-message queue.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

use crate::messages::ControlMessage;

/// Create a bounded control channel of the given capacity.
///
/// The [`Controller`] half belongs to the input core; the
/// [`ControlReceiver`] half belongs to the transport.
pub fn control_channel(capacity: usize) -> (Controller, ControlReceiver) {
    let (tx, rx) = bounded(capacity);
    (Controller { tx }, ControlReceiver { rx })
}

/// Sending half of the outbound queue.
///
/// `push_msg` is non-blocking: under backpressure (or after the transport
/// hung up) it returns `false` and drops the message. Callers treat a failed
/// push as a soft failure and log it.
#[derive(Debug, Clone)]
pub struct Controller {
    tx: Sender<ControlMessage>,
}

impl Controller {
    /// Push a message without blocking. Returns whether the queue took it.
    pub fn push_msg(&self, msg: ControlMessage) -> bool {
        self.tx.try_send(msg).is_ok()
    }
}

/// Receiving half of the outbound queue, owned by the transport.
#[derive(Debug)]
pub struct ControlReceiver {
    rx: Receiver<ControlMessage>,
}

impl ControlReceiver {
    /// Block until the next message, or `None` once all senders are gone.
    pub fn recv(&self) -> Option<ControlMessage> {
        self.rx.recv().ok()
    }

    /// Pop a message if one is queued.
    pub fn try_recv(&self) -> Option<ControlMessage> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drain every queued message.
    pub fn drain(&self) -> Vec<ControlMessage> {
        let mut out = Vec::new();
        while let Some(msg) = self.try_recv() {
            out.push(msg);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let (controller, rx) = control_channel(2);
        assert!(controller.push_msg(ControlMessage::RotateDevice));
        assert!(controller.push_msg(ControlMessage::CollapsePanels));
        assert_eq!(rx.drain().len(), 2);
    }

    #[test]
    fn test_push_full_queue_fails_without_blocking() {
        let (controller, rx) = control_channel(1);
        assert!(controller.push_msg(ControlMessage::RotateDevice));
        assert!(!controller.push_msg(ControlMessage::CollapsePanels));

        // The queued message is intact and ordered.
        assert_eq!(rx.try_recv(), Some(ControlMessage::RotateDevice));
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn test_push_after_receiver_dropped_fails() {
        let (controller, rx) = control_channel(4);
        drop(rx);
        assert!(!controller.push_msg(ControlMessage::RotateDevice));
    }
}
