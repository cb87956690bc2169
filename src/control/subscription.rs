use tokio::select;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::oneshot;

/// Runs a callback for every value received on a [broadcast] channel.
///
/// The callback keeps being invoked until the Subscription is dropped or the
/// sending side goes away.
pub struct Subscription {
    _drop_sender: oneshot::Sender<()>,
}

impl Subscription {
    pub fn new<T, F>(mut source_channel: broadcast::Receiver<T>, mut callback: F) -> Subscription
    where
        T: Clone + Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let (drop_sender, mut drop_receiver) = oneshot::channel::<()>();

        tokio::spawn(async move {
            loop {
                select! {
                    Err(_) = &mut drop_receiver => return,
                    received = source_channel.recv() => {
                        match received {
                            Ok(value) => callback(value),
                            Err(RecvError::Lagged(skipped)) => {
                                log::warn!("Subscriber fell behind, skipped {} notifications", skipped);
                            }
                            Err(RecvError::Closed) => return,
                        }
                    }
                }
            }
        });

        Subscription {
            _drop_sender: drop_sender,
        }
    }
}
