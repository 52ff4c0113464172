use std::sync::mpsc::Sender;

use super::router::Message;

/// Payloads crossing from producer threads onto the mediator thread.
#[derive(Debug)]
pub(crate) enum Envelope {
    Message(Message),
    Alert(String),
}

/// Thread-safe hand-off for background producers.
///
/// Solvers and meshers run off the UI thread; the router must not. Producers
/// clone a `Postbox`, post from wherever they are, and the mediator drains
/// the queue at the top of each tick. Posting after the mediator is gone is
/// silently ignored.
#[derive(Clone)]
pub struct Postbox {
    tx: Sender<Envelope>,
}

impl Postbox {
    pub(crate) fn new(tx: Sender<Envelope>) -> Self {
        Self { tx }
    }

    pub fn post(&self, message: Message) {
        let _ = self.tx.send(Envelope::Message(message));
    }

    /// Marshaled pop-up: shown when the mediator next drains its queue.
    pub fn alert(&self, text: impl Into<String>) {
        let _ = self.tx.send(Envelope::Alert(text.into()));
    }
}
