use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        cmd_executor::{CmdExecutor, ExecutorSettings},
        msg::{carousel::CarouselMsg, theme::ThemeMsg, Msg},
        raw_msg::RawMsg,
        state::AppState,
        translator::translate_raw_to_domain,
        update::update,
    },
    infrastructure::{
        config::Config, dom::Dom, storage::PreferenceStore, transport::FormTransport,
        visibility::SpyObserver,
    },
    integration::{
        bindings::PageBindings,
        event_source::{EventSource, SourceEvent},
    },
};

/// Drives one page: binds the markup, owns the widget state and applies
/// every command the update loop produces
#[derive(Debug)]
pub struct PageRuntime<D: Dom> {
    state: AppState,
    executor: CmdExecutor<D>,
    observer: SpyObserver,
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    raw_rx: mpsc::UnboundedReceiver<RawMsg>,
    liveness: CancellationToken,
}

impl<D: Dom> PageRuntime<D> {
    pub fn new(
        mut dom: D,
        config: &Config,
        store: Box<dyn PreferenceStore>,
        transport: Arc<dyn FormTransport>,
    ) -> Self {
        let bindings = PageBindings::resolve(&mut dom);

        let state = AppState::new(config)
            .with_images(bindings.images())
            .with_slide_count(bindings.slide_count())
            .with_nav_targets(bindings.scroll.nav_targets());

        let mut observer = SpyObserver::new(config.scroll.spy_margin_ratio);
        for (node, id) in &bindings.scroll.sections {
            observer.observe(*node, id.clone());
        }

        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let liveness = CancellationToken::new();
        let executor = CmdExecutor::new(
            dom,
            bindings,
            store,
            transport,
            raw_tx.clone(),
            liveness.clone(),
            ExecutorSettings::from(config),
        );

        Self {
            state,
            executor,
            observer,
            raw_tx,
            raw_rx,
            liveness,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dom(&self) -> &D {
        self.executor.dom()
    }

    pub fn bindings(&self) -> &PageBindings {
        self.executor.bindings()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.executor.is_autoplaying()
    }

    /// Sender a host uses to deliver page events
    pub fn raw_sender(&self) -> mpsc::UnboundedSender<RawMsg> {
        self.raw_tx.clone()
    }

    /// Initial pass once the page is bound: restore the saved theme, render
    /// the carousel and start its autoplay, report initial section visibility
    pub fn start(&mut self) -> Result<()> {
        let key = self.executor.settings().storage_key.clone();
        let stored = match self.executor.store().get(&key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%err, "theme preference unavailable");
                None
            }
        };
        self.dispatch(Msg::Theme(ThemeMsg::Restore(stored)))?;

        if self.bindings().carousel.is_some() {
            self.dispatch(Msg::Carousel(CarouselMsg::Start))?;
        }

        self.observe_sections()?;
        tracing::info!("page started");
        Ok(())
    }

    /// Fire the page `load` event
    pub fn load(&mut self) -> Result<()> {
        self.dispatch_raw(RawMsg::Load)
    }

    /// Translate and apply one raw event
    pub fn dispatch_raw(&mut self, raw: RawMsg) -> Result<()> {
        if !raw.is_frequent() {
            tracing::debug!(?raw, "raw event");
        }

        let scrolled = match &raw {
            RawMsg::Input { node, value } => {
                self.executor.dom_mut().set_value(*node, value);
                false
            }
            RawMsg::Scroll(offset) => {
                self.executor.dom_mut().set_scroll_y(*offset);
                true
            }
            _ => false,
        };

        let msgs = translate_raw_to_domain(
            raw,
            &self.state,
            self.executor.bindings(),
            self.executor.dom(),
        );
        for msg in msgs {
            self.dispatch(msg)?;
        }

        if scrolled {
            self.observe_sections()?;
        }
        Ok(())
    }

    /// Run one domain message through update and execute its commands
    pub fn dispatch(&mut self, msg: Msg) -> Result<()> {
        let (state, cmds) = update(msg, std::mem::take(&mut self.state));
        self.state = state;
        self.executor.execute_commands(&cmds)
    }

    /// Handle every event already queued (timer ticks, submission outcomes,
    /// scrolls caused by commands). Returns how many were handled.
    pub fn process_pending(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Ok(raw) = self.raw_rx.try_recv() {
            self.dispatch_raw(raw)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Handle queued events as they arrive until `duration` has elapsed
    pub async fn run_for(&mut self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            tokio::select! {
                biased;
                Some(raw) = self.raw_rx.recv() => self.dispatch_raw(raw)?,
                _ = time::sleep_until(deadline) => break,
            }
        }
        Ok(())
    }

    /// Consume `source` until it ends. Internal events are handled before
    /// the next external one.
    pub async fn run(&mut self, mut source: EventSource) -> Result<()> {
        loop {
            tokio::select! {
                biased;
                Some(raw) = self.raw_rx.recv() => self.dispatch_raw(raw)?,
                event = source.next() => match event {
                    Some(SourceEvent::Raw(raw)) => self.dispatch_raw(raw)?,
                    Some(SourceEvent::Scripted(step)) => {
                        if let Some(wait) = step.wait_duration() {
                            self.run_for(wait).await?;
                            continue;
                        }
                        match step.resolve(self.executor.dom()) {
                            Ok(Some(raw)) => self.dispatch_raw(raw)?,
                            Ok(None) => {}
                            Err(err) => tracing::warn!(%err, ?step, "scripted event skipped"),
                        }
                    }
                    None => break,
                },
            }
        }
        self.process_pending()?;
        Ok(())
    }

    /// Stop autoplay and drop any submission outcome still in flight
    pub fn shutdown(&mut self) {
        self.executor.shutdown();
        tracing::info!("page shut down");
    }

    fn observe_sections(&mut self) -> Result<()> {
        let entries = self.observer.take_records(self.executor.dom());
        if entries.is_empty() {
            return Ok(());
        }
        self.dispatch_raw(RawMsg::Intersections(entries))
    }
}

impl<D: Dom> Drop for PageRuntime<D> {
    fn drop(&mut self) {
        self.liveness.cancel();
    }
}
