//! Tab change notifications
//!
//! Tabs push state changes to the container through a channel instead of
//! holding a reference back to it. The container drains the channel on its
//! event-processing pass and dispatches to its callback methods.

use std::sync::mpsc;

use crate::tab::TabId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    TitleChanged { tab_id: TabId, title: String },
    IconChanged { tab_id: TabId, icon_path: String },
    PersistenceChanged { tab_id: TabId, is_persistent: bool },
}

/// Clonable sending half handed to each tab at construction.
#[derive(Clone)]
pub struct TabNotifier {
    tx: mpsc::Sender<TabEvent>,
}

impl TabNotifier {
    pub fn channel() -> (Self, mpsc::Receiver<TabEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, event: TabEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("Dropped tab event, container receiver is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let (notifier, rx) = TabNotifier::channel();
        let tab_id = TabId(0);

        notifier.send(TabEvent::TitleChanged {
            tab_id,
            title: "a".to_string(),
        });
        notifier.clone().send(TabEvent::PersistenceChanged {
            tab_id,
            is_persistent: true,
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            TabEvent::TitleChanged {
                tab_id,
                title: "a".to_string()
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            TabEvent::PersistenceChanged {
                tab_id,
                is_persistent: true
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
