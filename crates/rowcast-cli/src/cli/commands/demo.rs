//! `rowcast demo`: several producers sharing one block of rows.
//!
//! Row 0 is a clock header. Each producer owns one row with a label, a
//! progress bar and an elapsed timer. Part-way through a notice row is
//! inserted under the header (pushing every producer down one row) and later
//! closed again (pulling them back up).

use std::time::Duration;

use anyhow::{Context, Result};
use rowcast_components::{
    Datetime, DatetimeLayout, Precision, ProgressBar, Rgb, Shared, Styling, Text, Timestamp,
};
use rowcast_core::{Profile, Renderer};
use tokio::task::JoinSet;
use tracing::info;

use crate::config::Config;

const PALETTE: [u32; 4] = [0x5F_AF_FF, 0x87_D7_87, 0xFF_AF_5F, 0xD7_87_FF];
const NOTICE: u32 = 0xFF_FF_5F;

#[derive(clap::Args, Debug, Clone, Default)]
pub struct DemoArgs {
    /// Number of concurrent producers
    #[arg(long)]
    slots: Option<usize>,

    /// Steps each producer takes to reach 100%
    #[arg(long)]
    steps: Option<u32>,

    /// Delay between a producer's frames, in milliseconds
    #[arg(long = "interval-ms", value_name = "MS")]
    interval_ms: Option<u64>,

    /// Progress bar width in cells (4-75)
    #[arg(long = "bar-width", value_name = "CELLS")]
    bar_width: Option<u8>,

    /// Disable colors and text attributes
    #[arg(long)]
    plain: bool,
}

/// Demo settings after flags are layered over the config file.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub slots: usize,
    pub steps: u32,
    pub interval: Duration,
    pub bar_width: u8,
    pub color: bool,
    pub timestamp: Precision,
    pub datetime: DatetimeLayout,
}

impl DemoArgs {
    pub fn resolve(self, config: &Config) -> DemoOptions {
        DemoOptions {
            slots: self.slots.unwrap_or(config.slots),
            steps: self.steps.unwrap_or(config.steps),
            interval: self
                .interval_ms
                .map_or_else(|| config.interval(), Duration::from_millis),
            bar_width: self.bar_width.unwrap_or(config.bar_width),
            color: config.color && !self.plain,
            timestamp: config.timestamp,
            datetime: config.datetime,
        }
    }
}

impl DemoOptions {
    /// `style` as given, or only its template when color is off.
    fn paint(&self, style: Styling) -> Styling {
        if self.color {
            style
        } else {
            Styling::new().format(style.format)
        }
    }
}

pub async fn run(opts: DemoOptions) -> Result<()> {
    info!(?opts, "demo starting");
    let renderer = Renderer::new();

    let mut header = renderer.create_slot(0).context("create header slot")?;
    header.add_component(0, Datetime::new(opts.datetime, opts.paint(Styling::new().bold())));
    header.add_component(
        1,
        Text::fixed(
            format!("  {} producers", opts.slots),
            opts.paint(Styling::new().italic()),
        ),
    );
    header.render().await.context("render header")?;

    let mut producers = JoinSet::new();
    for index in 0..opts.slots {
        let profile = renderer
            .create_slot(isize::MAX)
            .context("create producer slot")?;
        producers.spawn(produce(profile, index, opts.clone()));
    }

    let insert_at = u64::from(opts.steps / 3).max(1);
    let remove_at = insert_at * 2;
    let mut ticker = tokio::time::interval(opts.interval);
    let mut notice: Option<Profile> = None;
    let mut finished = Vec::with_capacity(opts.slots);
    let mut tick = 0u64;

    loop {
        tokio::select! {
            joined = producers.join_next() => {
                let Some(joined) = joined else { break };
                finished.push(joined.context("producer task panicked")??);
            }
            _ = ticker.tick() => {
                tick += 1;
                header.render().await.context("render header")?;
                if tick == insert_at {
                    notice = Some(announce(&renderer, &opts).await?);
                } else if tick == remove_at {
                    if let Some(mut inserted) = notice.take() {
                        inserted.close().await;
                    }
                }
            }
        }
    }

    if let Some(mut inserted) = notice.take() {
        inserted.close().await;
    }
    header.render().await.context("render header")?;
    renderer.shutdown().await.context("shut down renderer")?;

    println!("{} producers finished", finished.len());
    info!(producers = finished.len(), "demo finished");
    Ok(())
}

/// Drives one producer row from 0% to 100%. The profile is handed back so
/// its row stays on screen until the renderer shuts down.
async fn produce(mut profile: Profile, index: usize, opts: DemoOptions) -> Result<Profile> {
    let progress = Shared::new(0u8);
    let hue = Rgb::from_hex(PALETTE[index % PALETTE.len()]);

    profile.add_component(
        0,
        Text::fixed(
            format!("task {index:>2} "),
            opts.paint(Styling::new().bold().fg(hue)),
        ),
    );
    profile.add_component(
        1,
        ProgressBar::new(
            progress.clone(),
            opts.bar_width,
            opts.paint(Styling::new().fg(hue)),
        ),
    );
    profile.add_component(
        2,
        Timestamp::new(
            opts.timestamp,
            opts.paint(Styling::new().italic().format("  %ss")),
        ),
    );

    let pause = opts.interval * (1 + (index % 3) as u32);
    for step in 0..=opts.steps {
        progress.set(percent(step, opts.steps));
        profile
            .render()
            .await
            .with_context(|| format!("render task {index}"))?;
        if step < opts.steps {
            tokio::time::sleep(pause).await;
        }
    }

    info!(task = index, "producer finished");
    Ok(profile)
}

async fn announce(renderer: &Renderer, opts: &DemoOptions) -> Result<Profile> {
    let mut notice = renderer.create_slot(1).context("insert notice slot")?;
    notice.add_component(
        0,
        Text::fixed(
            "-- inserted row: producers shifted down --",
            opts.paint(Styling::new().fg(Rgb::from_hex(NOTICE))),
        ),
    );
    notice.render().await.context("render notice")?;
    info!("notice row inserted");
    Ok(notice)
}

fn percent(step: u32, steps: u32) -> u8 {
    if steps == 0 {
        return 100;
    }
    (u64::from(step.min(steps)) * 100 / u64::from(steps)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_spans_zero_to_hundred() {
        assert_eq!(percent(0, 8), 0);
        assert_eq!(percent(3, 8), 37);
        assert_eq!(percent(8, 8), 100);
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            slots: 2,
            interval_ms: 10,
            ..Config::default()
        };
        let args = DemoArgs {
            slots: Some(5),
            plain: true,
            ..DemoArgs::default()
        };

        let opts = args.resolve(&config);
        assert_eq!(opts.slots, 5);
        assert_eq!(opts.interval, Duration::from_millis(10));
        assert_eq!(opts.steps, config.steps);
        assert!(!opts.color);
    }

    #[test]
    fn plain_mode_keeps_only_the_template() {
        let opts = DemoArgs {
            plain: true,
            ..DemoArgs::default()
        }
        .resolve(&Config::default());

        let style = opts.paint(Styling::new().bold().format("<%s>"));
        assert_eq!(style.apply("x"), "<x>");
    }
}
