use std::time::Duration;
use tokio::task::JoinHandle;

pub const LOADING_MESSAGES: &[&str] = &[
    "천간과 지지를 살피는 중입니다...",
    "오행의 균형을 가늠하고 있습니다...",
    "대운과 세운의 흐름을 읽는 중입니다...",
    "하늘의 기운을 풀어내고 있습니다...",
    "월별 운세의 흐름을 정리하고 있습니다...",
];

pub const ROTATE_INTERVAL: Duration = Duration::from_secs(3);

/// Cycles through [`LOADING_MESSAGES`] while an analysis is in flight.
/// The first message is emitted immediately; the task stops when dropped.
pub struct LoadingTicker {
    handle: JoinHandle<()>,
}

impl LoadingTicker {
    pub fn spawn<F>(period: Duration, mut on_message: F) -> Self
    where
        F: FnMut(&'static str) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            let mut index = 0usize;
            loop {
                interval.tick().await;
                on_message(LOADING_MESSAGES[index]);
                index = (index + 1) % LOADING_MESSAGES.len();
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for LoadingTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
