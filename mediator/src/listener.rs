use protocol::Notification;
use tokio::sync::mpsc;

/// Receiver of the notifications the mediator emits. Called synchronously, in
/// emission order, on the mediator's thread.
pub trait Listener {
    fn notify(&mut self, notification: &Notification);
}

impl<F> Listener for F
where
    F: FnMut(&Notification),
{
    fn notify(&mut self, notification: &Notification) {
        self(notification)
    }
}

/// For UIs living on another task or thread.
impl Listener for mpsc::UnboundedSender<Notification> {
    fn notify(&mut self, notification: &Notification) {
        if self.send(notification.clone()).is_err() {
            log::debug!("listener channel is closed, dropping {}", notification.name());
        }
    }
}

#[derive(Default)]
pub(crate) struct Listeners {
    inner: Vec<Box<dyn Listener>>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn Listener>) {
        self.inner.push(listener);
    }

    pub(crate) fn emit(&mut self, notification: Notification) {
        log::debug!("emitting {:?}", notification);
        for listener in self.inner.iter_mut() {
            listener.notify(&notification);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listeners({})", self.inner.len())
    }
}
