/// Background polling thread and the channel handoff to the UI thread.
///
/// The monitor never touches view state: notifications cross to the UI
/// over an mpsc channel, focus changes cross back over a second channel,
/// and a shared cell holding the focused filename answers `is_active`
/// queries between focus messages.
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use logtab_core::{Monitor, Notification, Sink};

/// How often the monitor rescans the directory.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// UI-side handle to the polling thread.
pub struct WatchHandle {
    pub notifications: Receiver<Notification>,
    pub focus_tx: Sender<String>,
    pub active: Arc<Mutex<Option<String>>>,
}

/// Forwards monitor notifications into the channel and answers focus
/// queries from the shared active-view cell.
struct ChannelSink {
    tx: Sender<Notification>,
    active: Arc<Mutex<Option<String>>>,
    disconnected: bool,
}

impl ChannelSink {
    fn send(&mut self, note: Notification) {
        if self.tx.send(note).is_err() {
            self.disconnected = true;
        }
    }
}

impl Sink for ChannelSink {
    fn on_appeared(&mut self, name: &str) {
        self.send(Notification::Appeared(name.to_string()));
    }

    fn on_disappeared(&mut self, name: &str) {
        self.send(Notification::Disappeared(name.to_string()));
    }

    fn on_updated(&mut self, name: &str, fragment: &str) {
        self.send(Notification::Updated {
            name: name.to_string(),
            fragment: fragment.to_string(),
        });
    }

    fn is_active(&mut self, name: &str) -> bool {
        self.active
            .lock()
            .map(|active| active.as_deref() == Some(name))
            .unwrap_or(false)
    }
}

/// Spawn the polling thread for `dir`. The thread runs until the UI side
/// drops its end of either channel.
pub fn spawn(dir: PathBuf) -> WatchHandle {
    let (tx, notifications) = mpsc::channel();
    let (focus_tx, focus_rx) = mpsc::channel::<String>();
    let active = Arc::new(Mutex::new(None));
    let sink_active = Arc::clone(&active);

    thread::spawn(move || {
        let mut monitor = Monitor::new(dir);
        let mut sink = ChannelSink {
            tx,
            active: sink_active,
            disconnected: false,
        };
        loop {
            // Apply focus changes reported since the last tick.
            loop {
                match focus_rx.try_recv() {
                    Ok(name) => monitor.focus_changed(&name),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::debug!("ui hung up focus channel, watcher exiting");
                        return;
                    }
                }
            }
            monitor.tick(&mut sink);
            if sink.disconnected {
                tracing::debug!("ui hung up notification channel, watcher exiting");
                return;
            }
            thread::sleep(POLL_INTERVAL);
        }
    });

    WatchHandle {
        notifications,
        focus_tx,
        active,
    }
}
