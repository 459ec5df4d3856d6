//! Day planning and timed prompt dispatch
//!
//! One scheduler instance serves every chat. A plan registers plain tokio
//! timers on the shared runtime; state is process-local, so a restart forgets
//! the rest of the day until the next `/start` or `/settings`. Re-planning
//! never cancels timers that are already registered - after a mid-day
//! settings change both generations fire.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;
use log::{debug, error, info, warn};
use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use crate::core::config::DEFAULT_TZ;
use crate::core::error::Result;
use crate::features::users::UserStore;
use crate::features::vocab::VocabStore;
use crate::transport::Transport;

/// Prompt templates; one is drawn uniformly at fire time.
const PROMPTS: [&str; 3] = [
    "How was your day? Use **{item}** in a short sentence.",
    "Write one line about your life using **{item}**.",
    "Make a simple daily sentence with **{item}**.",
];

/// Minutes a reminder may land on. Never on the hour: the cadence is meant
/// to be visibly off-beat.
const SAMPLE_MINUTES: [u32; 5] = [5, 15, 25, 35, 45];

/// Draw cap before the day is declared exhausted and scheduled short.
const MAX_DRAWS: usize = 500;

/// Plans each chat's daily prompt times and fires them through the transport.
#[derive(Clone)]
pub struct ReminderScheduler {
    users: UserStore,
    vocab: VocabStore,
    transport: Arc<dyn Transport>,
    /// Registered-but-unfired instants per chat.
    pending: Arc<DashMap<i64, Vec<DateTime<Utc>>>>,
}

impl ReminderScheduler {
    pub fn new(users: UserStore, vocab: VocabStore, transport: Arc<dyn Transport>) -> Self {
        ReminderScheduler {
            users,
            vocab,
            transport,
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Compute and register the rest of today's prompts for one chat.
    pub async fn plan_day(&self, chat_id: i64) -> Result<()> {
        let profile = self.users.get_or_create(chat_id).await?;
        let tz = parse_tz(chat_id, &profile.tz);
        let now = Utc::now().with_timezone(&tz);

        let times = sample_day_times(now, profile.start_hour, profile.end_hour, profile.daily_count);
        info!("Planned {} reminder(s) for chat {chat_id}", times.len());

        for fire_at in times {
            self.register(chat_id, fire_at.with_timezone(&Utc));
        }
        Ok(())
    }

    fn register(&self, chat_id: i64, fire_at: DateTime<Utc>) {
        self.pending.entry(chat_id).or_default().push(fire_at);

        let scheduler = self.clone();
        tokio::spawn(async move {
            let delay = (fire_at - Utc::now()).to_std().unwrap_or_default();
            tokio::time::sleep(delay).await;
            scheduler.forget(chat_id, fire_at);
            scheduler.dispatch(chat_id).await;
        });
    }

    fn forget(&self, chat_id: i64, fire_at: DateTime<Utc>) {
        if let Some(mut pending) = self.pending.get_mut(&chat_id) {
            if let Some(pos) = pending.iter().position(|t| *t == fire_at) {
                pending.remove(pos);
            }
        }
    }

    /// Timer fire body: choose an item and hand the prompt to the transport.
    ///
    /// Everything fallible is logged and swallowed; a timer must never take
    /// the process down.
    pub async fn dispatch(&self, chat_id: i64) {
        let request_id = Uuid::new_v4();
        debug!("[{request_id}] Reminder fired for chat {chat_id}");

        let item = match self.vocab.pick(chat_id).await {
            Ok(item) => item,
            Err(e) => {
                error!("[{request_id}] Failed to pick an item for chat {chat_id}: {e}");
                return;
            }
        };

        let delivery = match item {
            Some(item) => {
                let template = PROMPTS
                    .choose(&mut rand::rng())
                    .copied()
                    .unwrap_or(PROMPTS[0]);
                let message = template.replace("{item}", &item.text);
                debug!("[{request_id}] Prompting item {} for chat {chat_id}", item.id);
                self.transport.deliver(chat_id, &message, true).await
            }
            None => {
                self.transport
                    .deliver(chat_id, "Add some words with /add ✍️", false)
                    .await
            }
        };

        if let Err(e) = delivery {
            error!("[{request_id}] Failed to deliver reminder to chat {chat_id}: {e}");
        }
    }

    /// `HH:MM` strings of the still-pending timers falling on the chat's
    /// current local day, sorted ascending.
    pub async fn upcoming_today(&self, chat_id: i64) -> Result<Vec<String>> {
        let profile = self.users.get_or_create(chat_id).await?;
        let tz = parse_tz(chat_id, &profile.tz);
        let now = Utc::now().with_timezone(&tz);

        let mut times: Vec<String> = match self.pending.get(&chat_id) {
            Some(pending) => pending
                .iter()
                .map(|t| t.with_timezone(&tz))
                .filter(|t| *t > now && t.date_naive() == now.date_naive())
                .map(|t| t.format("%H:%M").to_string())
                .collect(),
            None => Vec::new(),
        };
        times.sort();
        Ok(times)
    }
}

fn parse_tz(chat_id: i64, name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        warn!("Chat {chat_id} has unknown timezone {name:?}, falling back to {DEFAULT_TZ}");
        DEFAULT_TZ.parse().expect("default timezone is valid")
    })
}

/// Sample up to `clamp(daily_count, 1, 12)` distinct future instants on the
/// day of `now`: hour uniform in `[start_hour, max(start_hour, end_hour - 1)]`,
/// minute uniform from the fixed five-minute set, candidates at or before
/// `now` discarded.
///
/// Stops after [`MAX_DRAWS`] draws so a window that has (nearly) elapsed
/// yields a short or empty day instead of spinning. The result is sorted
/// ascending and duplicate-free.
pub fn sample_day_times(
    now: DateTime<Tz>,
    start_hour: i64,
    end_hour: i64,
    daily_count: i64,
) -> Vec<DateTime<Tz>> {
    let tz = now.timezone();
    let target = daily_count.clamp(1, 12) as usize;
    let start = start_hour.clamp(0, 23) as u32;
    let effective_end = start.max(end_hour.saturating_sub(1).clamp(0, 23) as u32);

    let mut rng = rand::rng();
    let mut planned: BTreeSet<DateTime<Tz>> = BTreeSet::new();
    let mut draws = 0;
    while planned.len() < target && draws < MAX_DRAWS {
        draws += 1;
        let hour = rng.random_range(start..=effective_end);
        let minute = *SAMPLE_MINUTES.choose(&mut rng).expect("minute set is non-empty");
        let candidate = match tz
            .with_ymd_and_hms(now.year(), now.month(), now.day(), hour, minute, 0)
            .single()
        {
            Some(t) => t,
            // nonexistent or ambiguous local time around a DST switch
            None => continue,
        };
        if candidate > now {
            planned.insert(candidate);
        }
    }

    if planned.len() < target {
        debug!(
            "Sampling exhausted after {draws} draws: {} of {target} time(s)",
            planned.len()
        );
    }
    planned.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::transport::testing::{Delivered, RecordingTransport};
    use chrono::Timelike;

    fn kyiv() -> Tz {
        "Europe/Kyiv".parse().unwrap()
    }

    async fn scheduler_with(transport: Arc<RecordingTransport>) -> ReminderScheduler {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        ReminderScheduler::new(
            UserStore::new(db.clone()),
            VocabStore::new(db),
            transport,
        )
    }

    #[test]
    fn test_sampling_respects_the_window() {
        let tz = kyiv();
        let now = tz.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();

        let times = sample_day_times(now, 10, 12, 3);
        assert_eq!(times.len(), 3);
        for t in &times {
            assert!(*t > now);
            assert!((10..=11).contains(&t.hour()));
            assert!(SAMPLE_MINUTES.contains(&t.minute()));
            assert_eq!(t.date_naive(), now.date_naive());
        }
        assert!(times.windows(2).all(|w| w[0] < w[1]), "sorted and distinct");
    }

    #[test]
    fn test_sampling_count_is_clamped() {
        let tz = kyiv();
        let now = tz.with_ymd_and_hms(2026, 3, 10, 6, 0, 0).unwrap();

        assert_eq!(sample_day_times(now, 8, 20, 99).len(), 12);
        assert_eq!(sample_day_times(now, 8, 20, 0).len(), 1);
        assert_eq!(sample_day_times(now, 8, 20, -5).len(), 1);
    }

    #[test]
    fn test_sampling_degenerate_window() {
        let tz = kyiv();
        let now = tz.with_ymd_and_hms(2026, 3, 10, 20, 0, 0).unwrap();

        // end <= start collapses to the single start hour
        let times = sample_day_times(now, 22, 21, 3);
        assert_eq!(times.len(), 3);
        assert!(times.iter().all(|t| t.hour() == 22));
    }

    #[test]
    fn test_sampling_elapsed_window_terminates_empty() {
        let tz = kyiv();
        let now = tz.with_ymd_and_hms(2026, 3, 10, 23, 50, 0).unwrap();

        let times = sample_day_times(now, 10, 12, 3);
        assert!(times.is_empty());
    }

    #[test]
    fn test_sampling_nearly_elapsed_window_plans_short() {
        let tz = kyiv();
        // only 11:45 is still ahead inside 10:00-12:00
        let now = tz.with_ymd_and_hms(2026, 3, 10, 11, 40, 0).unwrap();

        let times = sample_day_times(now, 10, 12, 3);
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].hour(), 11);
        assert_eq!(times[0].minute(), 45);
    }

    #[tokio::test]
    async fn test_dispatch_without_items_sends_notice() {
        let transport = Arc::new(RecordingTransport::default());
        let scheduler = scheduler_with(transport.clone()).await;

        scheduler.dispatch(42).await;

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            Delivered::Text {
                chat_id,
                text,
                expect_reply,
            } => {
                assert_eq!(*chat_id, 42);
                assert!(text.contains("/add"));
                assert!(!expect_reply);
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_prompts_with_the_item() {
        let transport = Arc::new(RecordingTransport::default());
        let scheduler = scheduler_with(transport.clone()).await;
        scheduler.vocab.add(42, "la ventana").await.unwrap();

        scheduler.dispatch(42).await;

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            Delivered::Text {
                text, expect_reply, ..
            } => {
                assert!(text.contains("la ventana"));
                assert!(expect_reply, "prompts solicit a reply");
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upcoming_today_filters_and_formats() {
        let transport = Arc::new(RecordingTransport::default());
        let scheduler = scheduler_with(transport).await;
        scheduler.users.get_or_create(7).await.unwrap();

        let tz = kyiv();
        let now = Utc::now().with_timezone(&tz);
        let soon = now + chrono::Duration::minutes(3);
        let past = now - chrono::Duration::hours(1);
        let tomorrow = now + chrono::Duration::days(1);

        {
            let mut pending = scheduler.pending.entry(7).or_default();
            pending.push(soon.with_timezone(&Utc));
            pending.push(past.with_timezone(&Utc));
            pending.push(tomorrow.with_timezone(&Utc));
        }

        let times = scheduler.upcoming_today(7).await.unwrap();
        if soon.date_naive() == now.date_naive() {
            assert_eq!(times, vec![soon.format("%H:%M").to_string()]);
        } else {
            // planned instant slid past local midnight; nothing left today
            assert!(times.is_empty());
        }
    }

    #[tokio::test]
    async fn test_upcoming_today_empty_without_plan() {
        let transport = Arc::new(RecordingTransport::default());
        let scheduler = scheduler_with(transport).await;

        assert!(scheduler.upcoming_today(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replan_keeps_existing_timers() {
        let transport = Arc::new(RecordingTransport::default());
        let scheduler = scheduler_with(transport).await;
        scheduler.users.get_or_create(7).await.unwrap();

        let first = Utc::now() + chrono::Duration::hours(1);
        scheduler.pending.entry(7).or_default().push(first);

        // a fresh plan adds, never cancels
        scheduler.plan_day(7).await.unwrap();
        let pending = scheduler.pending.get(&7).unwrap();
        assert!(pending.contains(&first));
    }
}
