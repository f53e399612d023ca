use core::time::Duration;
use gloo::storage::{LocalStorage, Storage};
use gloo::timers::callback::Timeout;
use memorito_core::{GameError, KeyValueStore, Notifier, Result, ScheduledTask, Scheduler, WinReport};
use yew::html::Scope;

use crate::game::{GameView, Msg};

/// Profile persistence backed by the browser's local storage.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn load(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Could not read {} from local storage: {:?}", key, err);
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| GameError::Storage(format!("{:?}", err)))
    }
}

/// Hands scheduled tasks back to the game view through a browser timeout.
pub(crate) struct LinkScheduler<'a> {
    link: &'a Scope<GameView>,
}

impl<'a> LinkScheduler<'a> {
    pub(crate) fn new(link: &'a Scope<GameView>) -> Self {
        Self { link }
    }
}

impl Scheduler for LinkScheduler<'_> {
    fn schedule(&mut self, delay: Duration, task: ScheduledTask) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let link = self.link.clone();
        log::trace!("scheduling {:?} in {}ms", task, millis);
        Timeout::new(millis, move || link.send_message(Msg::Task(task))).forget();
    }
}

/// Shows the win report in a blocking browser alert.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify_win(&mut self, report: &WinReport) {
        gloo::dialogs::alert(&report.message());
    }
}
