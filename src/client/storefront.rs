use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::client::source::{ConfigOrigin, ConfigSource, ResolvedConfig};
use crate::models::visual::{Banner, LogoConfig, VisualConfig};

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

/// Rotation state over the active banners only. Inactive banners never enter
/// the cycle.
#[derive(Debug, Clone)]
pub struct Carousel {
    banners: Vec<Banner>,
    current: usize,
}

#[allow(dead_code)]
impl Carousel {
    pub fn new(items: &[Banner]) -> Self {
        Self {
            banners: items.iter().filter(|b| b.active).cloned().collect(),
            current: 0,
        }
    }

    pub fn active_count(&self) -> usize {
        self.banners.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_banner(&self) -> Option<&Banner> {
        self.banners.get(self.current)
    }

    /// Cyclic advance; wraps from the last banner back to the first.
    pub fn advance(&mut self) {
        if self.banners.is_empty() {
            return;
        }
        self.current = if self.current == self.banners.len() - 1 {
            0
        } else {
            self.current + 1
        };
    }

    /// Manual selection via an indicator dot. Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.banners.len() {
            self.current = index;
        }
    }

    pub fn set_banners(&mut self, items: &[Banner]) {
        *self = Carousel::new(items);
    }
}

/// Drives a shared carousel on a timer. The timer task exists only while
/// autoplay is on and more than one banner is active; it is re-created
/// whenever the banner set or the interval changes and aborted on drop.
pub struct CarouselPlayer {
    carousel: Arc<Mutex<Carousel>>,
    interval: Duration,
    autoplay: bool,
    timer: Option<JoinHandle<()>>,
}

#[allow(dead_code)]
impl CarouselPlayer {
    pub fn new(config: &VisualConfig) -> Self {
        let interval = if config.banners.interval > 0 {
            Duration::from_millis(u64::from(config.banners.interval))
        } else {
            DEFAULT_AUTOPLAY_INTERVAL
        };

        let mut player = Self {
            carousel: Arc::new(Mutex::new(Carousel::new(&config.banners.items))),
            interval,
            autoplay: config.banners.enabled && config.banners.autoplay,
            timer: None,
        };
        player.restart_timer();
        player
    }

    pub fn carousel(&self) -> Arc<Mutex<Carousel>> {
        self.carousel.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn select(&self, index: usize) {
        self.carousel.lock().unwrap().select(index);
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.restart_timer();
    }

    pub fn set_banners(&mut self, items: &[Banner]) {
        self.carousel.lock().unwrap().set_banners(items);
        self.restart_timer();
    }

    fn restart_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        if !self.autoplay || self.carousel.lock().unwrap().active_count() <= 1 {
            return;
        }

        let carousel = self.carousel.clone();
        let interval = self.interval;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of tokio's interval completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                carousel.lock().unwrap().advance();
            }
        }));
    }
}

impl Drop for CarouselPlayer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Storefront view state: the logo plus the carousel, resolved through the
/// fallback chain so it renders even with zero backend availability.
#[allow(dead_code)]
pub struct Storefront {
    pub logo: LogoConfig,
    pub origin: ConfigOrigin,
    pub player: CarouselPlayer,
}

#[allow(dead_code)]
impl Storefront {
    pub async fn load(source: &ConfigSource) -> Self {
        let ResolvedConfig { config, origin } = source.resolve().await;
        Self {
            logo: config.logo.clone(),
            origin,
            player: CarouselPlayer::new(&config),
        }
    }
}
